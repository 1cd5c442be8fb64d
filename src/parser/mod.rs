//! Number template compilation module
//!
//! This module turns a template string into a validated descriptor and instruction list.
//! The main entry point is the `compile_format` function.

mod format;
mod tokens;

pub use format::{CompiledFormat, compile_format};
pub use tokens::next_token;
