//! Event loop that plays navigation against the core on tokio timers

pub mod driver;
pub mod engine;

pub use driver::Driver;
pub use engine::TimerEngine;
