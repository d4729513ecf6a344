pub mod jsonl_writer;
pub mod log_notifier;
