//! # RILL
//!
//! RILL is a small scripting language for embedding in a host application.
//! The host registers native command handlers, compiles line-oriented
//! source into a flat bytecode [`Program`](mach::Program), and executes it
//! with a [`Runtime`](mach::Runtime).
//!
//! ```text
//! VAR int i
//! MAIN
//! i := 0
//! while i < 3
//! print "i=[i]"
//! i := add i 1
//! wend
//! stop
//! ```
//!
//! ```no_run
//! use rill::mach::Runtime;
//!
//! let mut runtime = Runtime::default();
//! let mut program = runtime.compile("MAIN\nprint \"hello\"\nstop").unwrap();
//! runtime.run(&mut program).unwrap();
//! ```

pub mod lang;
pub mod mach;
