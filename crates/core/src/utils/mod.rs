pub mod cancel;

pub use cancel::cancellable;
