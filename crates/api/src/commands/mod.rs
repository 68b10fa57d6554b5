//! Commands exposed to the session layer

mod health;
mod session;
mod study;

pub use health::*;
pub use session::*;
pub use study::*;
