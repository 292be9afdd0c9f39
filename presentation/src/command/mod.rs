//! Console command parsing

pub mod parser;
