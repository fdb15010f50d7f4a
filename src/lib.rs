//! Shell syntax tree, traversal protocol and unparser.
//!
//! Trees are built by an external parser from the types in [`ast`], walked
//! with [`ast::walk()`], and turned back into shell text with [`printer`].

pub mod ast;
pub mod config;
pub mod error;
pub mod printer;
pub mod token;

pub use config::PrintConfig;
pub use error::{ConfigError, RenderError};
pub use printer::{expr_list_str, expr_str, print, print_with, to_string, to_string_with};
