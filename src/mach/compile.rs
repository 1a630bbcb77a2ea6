use super::program::{Command, Program};
use super::registry::Registry;
use super::value::{Argument, Variable, VariableType};
use crate::error;
use crate::lang::{is_math_char, is_operator_char, lex, Error, Operator};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Compiles line-oriented source into a [`Program`], resolving every call
/// against `registry`. The first error aborts compilation and carries the
/// 1-based line number and raw line text; no partial program escapes.
pub fn compile(registry: &Registry, source: &str) -> Result<Program> {
    Compiler::new(registry).compile(source)
}

/// Per-compilation state: the program under construction plus the
/// control-flow nesting stacks. Each `compile` call gets a fresh one.
struct Compiler<'a> {
    registry: &'a Registry,
    program: Program,
    if_stack: Vec<usize>,
    while_stack: Vec<usize>,
    repeat_stack: Vec<usize>,
    case_stack: Vec<usize>,
    select_stack: Vec<Vec<usize>>,
}

impl<'a> Compiler<'a> {
    fn new(registry: &'a Registry) -> Compiler<'a> {
        Compiler {
            registry,
            program: Program::new(),
            if_stack: vec![],
            while_stack: vec![],
            repeat_stack: vec![],
            case_stack: vec![],
            select_stack: vec![],
        }
    }

    fn compile(mut self, source: &str) -> Result<Program> {
        for (n, line) in source.lines().enumerate() {
            self.line(line)
                .map_err(|e| e.in_line_number(Some(n + 1)).in_line(line))?;
        }
        if !self.if_stack.is_empty() {
            return Err(error!(NestingIf; "MISSING 'endif'"));
        }
        if !self.while_stack.is_empty() {
            return Err(error!(NestingWhile; "MISSING 'wend'"));
        }
        if !self.repeat_stack.is_empty() {
            return Err(error!(NestingRepeat; "MISSING 'until'"));
        }
        if !self.case_stack.is_empty() {
            return Err(error!(NestingCase; "MISSING 'break'"));
        }
        if !self.select_stack.is_empty() {
            return Err(error!(NestingSelect; "MISSING 'selend'"));
        }
        Ok(self.program)
    }

    fn line(&mut self, line: &str) -> Result<()> {
        let trimmed = line.trim();
        let mut words: Vec<String> = lex(trimmed)
            .iter()
            .map(|r| trimmed[r.clone()].to_string())
            .filter(|w| !w.trim().is_empty())
            .collect();
        if words.is_empty() {
            return Ok(());
        }
        if words.len() > 1 && words[0] == "VAR" {
            return self.declare_variables(&words);
        }
        if words.len() > 1 && words[0] == "SUB" {
            return self.declare_label(&words[1]);
        }
        if words.len() == 1 && words[0] == "MAIN" {
            return self.declare_label("main:");
        }

        // Assignment sugar: `dest := rhs...` becomes a `set` call when the
        // rhs opens with a literal, otherwise the rhs command itself with
        // the destination spliced in as the return slot.
        let mut is_assignment = false;
        if words.len() > 1 && words[1] == ":=" {
            is_assignment = true;
            if words.len() >= 3 {
                if opens_literal(&words[2]) {
                    words[1] = std::mem::replace(&mut words[0], "set".to_string());
                } else {
                    let dest = words.remove(0);
                    words.remove(0);
                    words.insert(1, dest);
                }
            }
        }

        let mut command = self.create_command(&words, is_assignment)?;
        self.resolve_control_flow(&words[0], &mut command)?;
        self.program.push(command);
        Ok(())
    }

    /// `VAR <type> <name,name,...>`. The first clash aborts the whole
    /// compilation.
    fn declare_variables(&mut self, words: &[String]) -> Result<()> {
        if words.len() < 3 {
            return Err(error!(SyntaxError; "EXPECTED NAME LIST"));
        }
        let var_type = VariableType::from_keyword(&words[1]);
        for name in words[2].split(',') {
            let zero = match var_type {
                VariableType::Integer => Variable::Integer(0),
                VariableType::Float => Variable::Float(0.0),
                VariableType::String => Variable::String(String::new()),
                // A non-typed keyword declares nothing.
                VariableType::Any => continue,
            };
            if !self.program.declare(name, zero) {
                return Err(error!(AlreadyDeclared));
            }
        }
        Ok(())
    }

    /// `SUB <name>` and `MAIN` record the next command's address as a
    /// label. Labels share the variable namespace.
    fn declare_label(&mut self, name: &str) -> Result<()> {
        let address = Variable::Integer(self.program.len() as i64);
        if !self.program.declare(name, address) {
            return Err(error!(AlreadyDeclared));
        }
        Ok(())
    }

    /// Classifies each word into an [`Argument`], builds the concrete
    /// signature and resolves the call against the registry.
    fn create_command(&self, words: &[String], is_assignment: bool) -> Result<Command> {
        let mut arguments: Vec<Argument> = vec![];
        for word in &words[1..] {
            let first = match word.chars().next() {
                Some(c) => c,
                None => continue,
            };
            if let Some(argument) = classify_literal(word, first) {
                arguments.push(argument);
                continue;
            }
            match self.program.declared(word) {
                Some(Variable::Integer(_)) => {
                    arguments.push(Argument::IntegerVar(Rc::from(word.as_str())))
                }
                Some(Variable::Float(_)) => {
                    arguments.push(Argument::FloatVar(Rc::from(word.as_str())))
                }
                Some(Variable::String(_)) => {
                    arguments.push(Argument::StringVar(Rc::from(word.as_str())))
                }
                Some(Variable::Op(_)) => {}
                None => return Err(error!(UnknownVariable)),
            }
        }
        let signature: String = arguments.iter().filter_map(|a| a.signature()).collect();
        match self
            .registry
            .code_for(&words[0], &signature, is_assignment)
        {
            Some(opcode) => Ok(Command {
                opcode,
                arguments,
                first_arg_is_return: is_assignment,
            }),
            None => Err(error!(UnknownCommand)),
        }
    }

    /// Backpatching, keyed by the command's leading keyword. Jump
    /// destinations are appended as trailing arguments either to this
    /// command or to the matching opener popped from its nesting stack.
    fn resolve_control_flow(&mut self, name: &str, command: &mut Command) -> Result<()> {
        let count = self.program.len();
        match name {
            "if" => self.if_stack.push(count),
            "else" => {
                let last = self.if_stack.pop().ok_or_else(|| error!(NestingIf))?;
                self.patch(last, count + 1);
                self.if_stack.push(count);
            }
            "endif" => {
                let last = self.if_stack.pop().ok_or_else(|| error!(NestingIf))?;
                self.patch(last, count + 1);
            }
            "while" => self.while_stack.push(count),
            "wend" => {
                let last = self.while_stack.pop().ok_or_else(|| error!(NestingWhile))?;
                command.arguments.push(Argument::JumpDest(last));
                self.patch(last, count + 1);
            }
            "repeat" => self.repeat_stack.push(count),
            "until" => {
                let last = self.repeat_stack.pop().ok_or_else(|| error!(NestingRepeat))?;
                command.arguments.push(Argument::JumpDest(last));
            }
            "select" => self.select_stack.push(vec![]),
            "case" => self.case_stack.push(count),
            "fallthrough" => {
                let last = self.case_stack.pop().ok_or_else(|| error!(NestingCase))?;
                self.patch(last, count + 1);
            }
            "break" => {
                let last = self.case_stack.pop().ok_or_else(|| error!(NestingCase))?;
                self.patch(last, count + 1);
                match self.select_stack.last_mut() {
                    Some(breaks) => breaks.push(count),
                    // A stray break opens an implicit list; end of input
                    // then reports the missing selend.
                    None => self.select_stack.push(vec![count]),
                }
            }
            "selend" => {
                let breaks = self
                    .select_stack
                    .pop()
                    .ok_or_else(|| error!(NestingSelect))?;
                for addr in breaks {
                    self.patch(addr, count + 1);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn patch(&mut self, addr: usize, dest: usize) {
        if let Some(command) = self.program.command_mut(addr) {
            command.arguments.push(Argument::JumpDest(dest));
        }
    }
}

/// Does this word open an assignment's literal right-hand side?
fn opens_literal(word: &str) -> bool {
    match word.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '-' => true,
        Some('"') => true,
        _ => false,
    }
}

/// Literal classification, tried in order: quoted string, numeric
/// (parse failures fall through), operator (unknown spellings fall
/// through). `None` sends the word to variable lookup.
fn classify_literal(word: &str, first: char) -> Option<Argument> {
    if first == '"' {
        return Some(Argument::String(strip_quotes(word)));
    }
    if first.is_ascii_digit() || (first == '-' && word.len() > 1) {
        if word.contains('.') {
            if let Ok(val) = word.parse::<f64>() {
                return Some(Argument::Float(val));
            }
        } else if let Ok(val) = word.parse::<i64>() {
            return Some(Argument::Integer(val));
        }
    }
    if is_operator_char(first) || is_math_char(first, false) {
        if let Some(op) = Operator::from_str(word) {
            return Some(Argument::Op(op));
        }
    }
    None
}

/// Drops the first and last character (the enclosing quotes).
fn strip_quotes(word: &str) -> String {
    let count = word.chars().count();
    word.chars().skip(1).take(count.saturating_sub(2)).collect()
}
