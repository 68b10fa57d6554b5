//! Domain types and models

pub mod card;
pub mod card_id;
pub mod interval;
pub mod queue;

pub use card::Card;
pub use card_id::CardId;
pub use interval::Interval;
pub use queue::Queue;
