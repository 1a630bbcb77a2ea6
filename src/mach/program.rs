use super::value::{Argument, Variable};
use super::Address;
use std::collections::HashMap;
use std::rc::Rc;

/// One bytecode instruction: an opcode into the registry's handler table,
/// its argument list, and whether the first argument is an implicit
/// return slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub opcode: usize,
    pub arguments: Vec<Argument>,
    pub first_arg_is_return: bool,
}

/// The compiled program: an ordered command list (index = address), one
/// shared name→value table for user variables and labels, and the
/// instruction pointer.
///
/// Labels (`"main:"` and subroutine names) live in the same namespace as
/// user variables and hold their entry address as an `Integer`.
#[derive(Debug, Default)]
pub struct Program {
    commands: Vec<Command>,
    variables: HashMap<Rc<str>, Variable>,
    pc: Address,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn command_mut(&mut self, addr: Address) -> Option<&mut Command> {
        self.commands.get_mut(addr)
    }

    /// Declares `name` if it is not already taken. Variables, subroutine
    /// labels and `"main:"` share one namespace.
    pub fn declare(&mut self, name: &str, value: Variable) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        self.variables.insert(Rc::from(name), value);
        true
    }

    /// Raw lookup without string interpolation; used at compile time to
    /// type variable references.
    pub fn declared(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    /// Rewinds to the `"main:"` label if one was recorded, else address 0.
    pub fn reset(&mut self) {
        self.pc = 0;
        if let Some(Variable::Integer(main)) = self.variables.get("main:") {
            self.pc = *main as Address;
        }
    }

    pub fn jump(&mut self, dest: Address) {
        self.pc = dest;
    }

    pub fn next(&mut self) {
        self.pc += 1;
    }

    /// The command at the instruction pointer; `None` past the end.
    pub fn fetch(&self) -> Option<&Command> {
        self.commands.get(self.pc)
    }

    /// Resolves argument `num` of `command` to a concrete value. The index
    /// is shifted past the return slot when the command has one. String
    /// literals and string variables are interpolated on read.
    pub fn argument(&self, command: &Command, num: usize) -> Option<Variable> {
        let num = if command.first_arg_is_return {
            num + 1
        } else {
            num
        };
        match command.arguments.get(num)? {
            Argument::Integer(val) => Some(Variable::Integer(*val)),
            Argument::Float(val) => Some(Variable::Float(*val)),
            Argument::String(val) => Some(Variable::String(self.expand(val))),
            Argument::Op(op) => Some(Variable::Op(*op)),
            Argument::IntegerVar(name) => self.variable(name),
            Argument::FloatVar(name) => self.variable(name),
            Argument::StringVar(name) => self.variable(name),
            Argument::JumpDest(dest) => Some(Variable::Integer(*dest as i64)),
        }
    }

    /// Writes into the command's return variable. Fails when the command
    /// has no return slot or when the value's signature differs from the
    /// stored one; the variable is left untouched on failure.
    pub fn set_return(&mut self, command: &Command, value: Variable) -> bool {
        if !command.first_arg_is_return {
            return false;
        }
        match command.arguments.get(0) {
            Some(Argument::IntegerVar(name))
            | Some(Argument::FloatVar(name))
            | Some(Argument::StringVar(name)) => {
                let name = name.clone();
                self.set_variable(&name, value)
            }
            _ => false,
        }
    }

    /// Current value of a variable. String values are interpolated, so a
    /// stored `"[x]"` reads back as the current rendering of `x`.
    pub fn variable(&self, name: &str) -> Option<Variable> {
        match self.variables.get(name)? {
            Variable::String(val) => Some(Variable::String(self.expand(val))),
            other => Some(other.clone()),
        }
    }

    /// Type-checked write: the new value must carry the same signature as
    /// the current one. Undeclared names are rejected.
    pub fn set_variable(&mut self, name: &str, value: Variable) -> bool {
        match self.variables.get_mut(name) {
            Some(old) if old.signature() == value.signature() => {
                *old = value;
                true
            }
            _ => false,
        }
    }

    /// Substitutes `[name]` placeholders with each variable's formatted
    /// text in a single linear scan, then percent-decodes the fully
    /// substituted result once. Unknown names substitute nothing.
    pub fn expand(&self, s: &str) -> String {
        let mut expanded = String::new();
        let mut name = String::new();
        let mut in_brackets = false;
        for c in s.chars() {
            if c == '[' {
                in_brackets = true;
                name.clear();
            } else if c == ']' {
                in_brackets = false;
                if let Some(val) = self.variable(&name) {
                    expanded.push_str(&val.formatted());
                }
            } else if in_brackets {
                name.push(c);
            } else {
                expanded.push(c);
            }
        }
        percent_decode(&expanded)
    }
}

/// One decode pass over `%XX` escapes. Malformed escapes pass through
/// verbatim; if decoding produces invalid UTF-8 the input is returned
/// unchanged.
fn percent_decode(s: &str) -> String {
    fn hex(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    match String::from_utf8(out) {
        Ok(decoded) => decoded,
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("%41%20b"), "A b");
        assert_eq!(percent_decode("50%"), "50%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_namespace_is_shared() {
        let mut program = Program::new();
        assert!(program.declare("x", Variable::Integer(0)));
        assert!(!program.declare("x", Variable::Integer(7)));
        assert!(program.declare("main:", Variable::Integer(3)));
        program.reset();
        assert_eq!(program.pc(), 3);
    }
}
