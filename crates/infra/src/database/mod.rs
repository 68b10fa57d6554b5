//! Database implementations

pub mod card_store;
pub mod manager;
pub mod pool;
pub mod revision;

pub use card_store::*;
pub use manager::*;
pub use pool::*;
