pub mod analysis;
pub mod candle;
pub mod engine;
pub mod events;
pub mod orderbook;
