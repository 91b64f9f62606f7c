//! A line-oriented shell: each input line is parsed into a pipeline of
//! commands joined by `|`, optionally redirected with `< file` / `> file`
//! and backgrounded with a trailing `&`, then run as one process per stage.
//!
//! `cd` and `exit` are handled in-process.

#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod input;
pub mod parse;
pub mod process;
pub mod state;
