// Presentation layer - CLI, command handlers and read-only rendering
pub mod app_state;
pub mod cli;
pub mod handlers;
pub mod renderer;
