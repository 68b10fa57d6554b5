//! Service implementations of the non-storage ports.

pub mod clock;
pub mod random;
pub mod session;

pub use clock::SystemClock;
pub use random::ThreadSafeRandom;
pub use session::StaticSession;
