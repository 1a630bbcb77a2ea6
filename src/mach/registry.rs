use super::program::{Command, Program};
use super::runtime::{Machine, Status};
use super::value::VariableType;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Native execution function for one command. Handlers receive the machine
/// state (call stack, output sink), the running program and the current
/// command, and report their outcome as a [`Status`].
pub type HandlerExec = Box<dyn FnMut(&mut Machine, &mut Program, &Command) -> Status>;

/// A registered command: its name, declared argument types, return flag,
/// declared signature string and native handler.
pub struct CommandHandler {
    pub name: String,
    pub arg_types: Vec<VariableType>,
    pub has_return: bool,
    pub signature: String,
    pub exec: HandlerExec,
}

/// Handler table shared by the compiler (resolution) and the runtime
/// (dispatch). A command's opcode is its index in this table. Handlers are
/// registered once, before compilation, and never removed.
#[derive(Default)]
pub struct Registry {
    handlers: Vec<CommandHandler>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers a command from a declaration string.
    ///
    /// Grammar: `[retSig] name [argSig]` with signature characters
    /// `i` `f` `s` `x` and the variadic marker `:`. One token declares a
    /// bare command, two declare name plus arguments, three declare a
    /// return type as well (the call site's destination variable becomes
    /// the leading signature position).
    pub fn register<F>(&mut self, declaration: &str, exec: F) -> Result<()>
    where
        F: FnMut(&mut Machine, &mut Program, &Command) -> Status + 'static,
    {
        let parts: Vec<&str> = declaration.split_whitespace().collect();
        let (name, signature, has_return) = match parts.as_slice() {
            [name] => (*name, String::new(), false),
            [name, sig] => (*name, (*sig).to_string(), false),
            [ret, name, sig] => (*name, format!("{}{}", ret, sig), true),
            _ => return Err(error!(SyntaxError; "BAD COMMAND DECLARATION")),
        };
        let arg_types = signature
            .chars()
            .filter_map(VariableType::from_signature)
            .collect();
        self.handlers.push(CommandHandler {
            name: name.to_string(),
            arg_types,
            has_return,
            signature,
            exec: Box::new(exec),
        });
        Ok(())
    }

    /// Resolves a call site to an opcode: the first handler with a matching
    /// name, a matching signature and the requested return flag. Scanning
    /// in registration order keeps resolution deterministic.
    pub fn code_for(&self, name: &str, signature: &str, has_return: bool) -> Option<usize> {
        self.handlers.iter().position(|h| {
            h.name == name
                && h.has_return == has_return
                && signatures_match(&h.signature, signature)
        })
    }

    pub fn handler_mut(&mut self, code: usize) -> Option<&mut CommandHandler> {
        self.handlers.get_mut(code)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A declared signature matches a concrete one when, after stripping the
/// `:` marker and (for variadic declarations) padding with `x` up to the
/// concrete length, both have equal length and every non-`x` declared
/// character equals the concrete character at that position.
fn signatures_match(declared: &str, concrete: &str) -> bool {
    let variadic = declared.contains(':');
    let mut declared: String = declared.chars().filter(|&c| c != ':').collect();
    if variadic {
        while declared.len() < concrete.len() {
            declared.push('x');
        }
    }
    if declared.len() != concrete.len() {
        return false;
    }
    declared
        .chars()
        .zip(concrete.chars())
        .all(|(d, c)| d == 'x' || d == c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_positions() {
        assert!(signatures_match("xox", "ioi"));
        assert!(signatures_match("xox", "fos"));
        assert!(!signatures_match("xox", "iii"));
        assert!(!signatures_match("xox", "io"));
    }

    #[test]
    fn test_variadic_padding() {
        assert!(signatures_match("f:", "f"));
        assert!(signatures_match("f:", "fofof"));
        assert!(signatures_match(":", ""));
        // Padding never truncates a declaration longer than the call.
        assert!(!signatures_match("ff:", "f"));
    }

    #[test]
    fn test_exact_match() {
        assert!(signatures_match("ii", "ii"));
        assert!(!signatures_match("ii", "if"));
        assert!(!signatures_match("ii", "iii"));
    }
}
