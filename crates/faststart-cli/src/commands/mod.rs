//! Command handlers. Each translates parsed arguments into core calls and
//! renders the result; no business logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod matrix;
pub mod new;
