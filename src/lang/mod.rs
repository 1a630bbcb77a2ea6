/*!
# Rill Language Module

This Rust module provides lexical analysis for the RILL language.

*/

pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod lex;
mod op;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::is_math_char;
pub use lex::is_operator_char;
pub use lex::lex;
pub use op::Operator;
