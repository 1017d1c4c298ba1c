//! Text front end for `chess_rules`: configuration and the command session.

pub mod config;
pub mod session;

pub use config::CliConfig;
pub use session::{HELP, Response, Session};
