//! CLI front end for Kakebo
//!
//! A line-oriented shell over one budget session, usable interactively or
//! with a script file.

pub mod commands;
pub mod shell;

pub use commands::{help_text, parse_line, SessionCommand};
pub use shell::{LoopControl, Shell};
