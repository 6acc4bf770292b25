//! Text front-end

pub mod console;

pub use console::{parse_command, Command, Console};
