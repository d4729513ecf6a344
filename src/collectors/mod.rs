pub mod replay_collector;
