use super::builtin;
use super::compile;
use super::program::{Command, Program};
use super::registry::Registry;
use super::Address;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Outcome of one command handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Success,
    /// The handler set the instruction pointer itself.
    Jumped,
    /// The command could not do its work. Failure has the same
    /// control-flow effect as success: the loop advances regardless.
    Failure,
    /// End the run loop.
    Stopped,
}

/// Mutable machine state handed to every handler: the subroutine call
/// stack and the host's print sink. Per-runtime, not per-program, so one
/// runtime must not execute two programs concurrently.
pub struct Machine {
    call_stack: Vec<Address>,
    output: Box<dyn FnMut(&str)>,
}

impl Machine {
    fn new() -> Machine {
        Machine {
            call_stack: vec![],
            output: Box::new(|text| println!("{}", text)),
        }
    }

    pub fn print(&mut self, text: &str) {
        (self.output)(text)
    }

    pub fn push_return(&mut self, addr: Address) {
        self.call_stack.push(addr)
    }

    pub fn pop_return(&mut self) -> Option<Address> {
        self.call_stack.pop()
    }
}

/// The virtual machine: owns the command registry and the machine state,
/// and drives the fetch-dispatch-advance loop.
pub struct Runtime {
    registry: Registry,
    machine: Machine,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new()
    }
}

impl Runtime {
    /// A runtime with the built-in command set installed.
    pub fn new() -> Runtime {
        let mut registry = Registry::new();
        if let Err(error) = builtin::install(&mut registry) {
            debug_assert!(false, "Failed to install builtins: {}", error);
        }
        Runtime {
            registry,
            machine: Machine::new(),
        }
    }

    /// Registers a host command. Must happen before `compile` for scripts
    /// that call it; see [`Registry::register`] for the declaration
    /// grammar.
    pub fn register<F>(&mut self, declaration: &str, exec: F) -> Result<()>
    where
        F: FnMut(&mut Machine, &mut Program, &Command) -> Status + 'static,
    {
        self.registry.register(declaration, exec)
    }

    /// Replaces the print sink. The default writes lines to stdout.
    pub fn set_output(&mut self, output: Box<dyn FnMut(&str)>) {
        self.machine.output = output;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn compile(&self, source: &str) -> Result<Program> {
        compile::compile(&self.registry, source)
    }

    /// Resets the program to its entry point and executes until the end of
    /// the command list or a `stop`. A resolved opcode without a handler
    /// is fatal; a failing handler is not (the pointer advances exactly as
    /// on success).
    pub fn run(&mut self, program: &mut Program) -> Result<()> {
        program.reset();
        loop {
            let command = match program.fetch() {
                Some(command) => command.clone(),
                None => return Ok(()),
            };
            let handler = match self.registry.handler_mut(command.opcode) {
                Some(handler) => handler,
                None => return Err(error!(InternalError; "NO HANDLER FOR OPCODE")),
            };
            match (handler.exec)(&mut self.machine, program, &command) {
                Status::Stopped => return Ok(()),
                Status::Jumped => {}
                Status::Success | Status::Failure => program.next(),
            }
        }
    }
}
