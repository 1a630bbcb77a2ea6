/*!
## Rill Machine Module

This Rust module is a compiler and virtual machine for RILL.

Source lines pass through [`crate::lang::lex`] into the compiler, which
resolves every call against the runtime's command registry and emits a flat
[`Program`]. The runtime then drives a fetch-dispatch-advance loop over the
program's commands.

*/

pub type Address = usize;

mod builtin;
mod compile;
mod eval;
mod program;
mod registry;
mod runtime;
mod value;

pub use compile::compile;
pub use program::Command;
pub use program::Program;
pub use registry::CommandHandler;
pub use registry::Registry;
pub use runtime::Machine;
pub use runtime::Runtime;
pub use runtime::Status;
pub use value::Argument;
pub use value::Variable;
pub use value::VariableType;
