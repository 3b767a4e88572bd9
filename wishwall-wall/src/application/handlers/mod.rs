pub mod command_handler;
pub mod query_handler;

#[cfg(test)]
mod command_handler_test;

pub use command_handler::{RevealAction, WallCommandHandler};
pub use query_handler::{MessageDetail, WallQueryHandler, WallStats};
