#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod input;
pub mod logging;
pub mod parse;
pub mod process;
pub mod session;
pub mod wildcard;
