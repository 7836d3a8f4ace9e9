//! CLI command implementations

pub mod interactive;
pub mod play;
pub mod resolve;
pub mod routes;

pub use interactive::interactive_command;
pub use play::play_command;
pub use resolve::resolve_command;
pub use routes::routes_command;
