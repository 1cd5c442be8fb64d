pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod types;
pub mod validator;

// 导出主要 API
pub use config::{ConfigError, Limits};
pub use context::{Arena, Context};
pub use convert::{Argument, Converter, to_number, to_number_with_format};
pub use error::{FormatRule, Result, ToNumberError};
pub use matcher::match_value;
pub use parser::{CompiledFormat, compile_format};
pub use types::*;
pub use validator::validate_plain_number;

#[cfg(test)]
mod tests;
