use super::Address;
use crate::lang::Operator;
use std::rc::Rc;

/// Declared type of a variable, derived from the `VAR` keyword.
///
/// `int` and `float` are exact; any keyword starting with `str` declares a
/// string. Everything else is `Any`, which declares nothing but still
/// appears in handler signatures as the `x` wildcard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableType {
    Integer,
    Float,
    String,
    Any,
}

impl VariableType {
    pub fn from_keyword(name: &str) -> VariableType {
        if name == "int" {
            VariableType::Integer
        } else if name == "float" {
            VariableType::Float
        } else if name.starts_with("str") {
            VariableType::String
        } else {
            VariableType::Any
        }
    }

    pub fn from_signature(c: char) -> Option<VariableType> {
        match c {
            'i' => Some(VariableType::Integer),
            'f' => Some(VariableType::Float),
            's' => Some(VariableType::String),
            'x' => Some(VariableType::Any),
            _ => None,
        }
    }
}

/// Compile-time operand form stored inside a [`super::Command`].
///
/// Immutable once emitted, except that backpatching appends trailing
/// `JumpDest` arguments to already-emitted commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Integer(i64),
    Float(f64),
    String(String),
    Op(Operator),
    IntegerVar(Rc<str>),
    FloatVar(Rc<str>),
    StringVar(Rc<str>),
    JumpDest(Address),
}

impl Argument {
    /// One-character type code used to build a call site's concrete
    /// signature. Jump destinations are appended after resolution and
    /// never contribute a character.
    pub fn signature(&self) -> Option<char> {
        use Argument::*;
        match self {
            Integer(_) | IntegerVar(_) => Some('i'),
            Float(_) | FloatVar(_) => Some('f'),
            String(_) | StringVar(_) => Some('s'),
            Op(_) => Some('o'),
            JumpDest(_) => None,
        }
    }
}

/// Runtime value of a variable or resolved argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Integer(i64),
    Float(f64),
    String(String),
    Op(Operator),
}

impl Variable {
    pub fn signature(&self) -> char {
        match self {
            Variable::Integer(_) => 'i',
            Variable::Float(_) => 'f',
            Variable::String(_) => 's',
            Variable::Op(_) => 'o',
        }
    }

    /// Textual rendering used by `print` and string interpolation.
    pub fn formatted(&self) -> String {
        match self {
            Variable::Integer(val) => val.to_string(),
            Variable::Float(val) => val.to_string(),
            Variable::String(val) => val.clone(),
            Variable::Op(val) => val.as_str().to_string(),
        }
    }
}
