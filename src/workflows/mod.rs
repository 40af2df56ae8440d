pub mod candidates;
pub mod progress;
pub mod resolver;
pub mod setup;
pub mod sync;
