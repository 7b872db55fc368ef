//! Runs, tokens and the parser that builds them.

mod parser;
pub mod run;

pub use run::{Run, Token, Visibility};
