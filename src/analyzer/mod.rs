pub mod indicators;
pub mod orderbook;
pub mod patterns;
pub mod set;
pub mod signals;
pub mod symbol;
pub mod window;
