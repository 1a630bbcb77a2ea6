//! # RILL
//!
//! Command-line host for the RILL scripting language. Runs a script file,
//! or opens a small interactive session when started without arguments.

extern crate ansi_term;
extern crate chrono;
extern crate ctrlc;
extern crate linefeed;
extern crate rand;

use ansi_term::Style;
use chrono::Local;
use linefeed::{Interface, ReadResult};
use rand::Rng;
use rill::lang::Error;
use rill::mach::{Runtime, Status, Variable};
use std::fs;

fn main() {
    ctrlc::set_handler(|| {
        println!();
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");
    let mut runtime = match host_runtime() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            std::process::exit(1);
        }
    };
    let result = match std::env::args().nth(1) {
        Some(path) => run_file(&mut runtime, &path),
        None => session(&mut runtime),
    };
    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

/// A runtime with the host's extra commands on top of the built-ins:
/// `s date s` (chrono format string), `f rnd f` (random in `[0, n)`) and
/// the classic `f fact f`.
fn host_runtime() -> Result<Runtime, Error> {
    let mut runtime = Runtime::default();
    runtime.register("s date s", |_, program, cmd| {
        match program.argument(cmd, 0) {
            Some(Variable::String(format)) => {
                let now = Local::now().format(&format).to_string();
                if program.set_return(cmd, Variable::String(now)) {
                    Status::Success
                } else {
                    Status::Failure
                }
            }
            _ => Status::Failure,
        }
    })?;
    runtime.register("f rnd f", |_, program, cmd| {
        match program.argument(cmd, 0) {
            Some(Variable::Float(limit)) if limit > 0.0 => {
                let value = rand::thread_rng().gen_range(0.0..limit);
                if program.set_return(cmd, Variable::Float(value)) {
                    Status::Success
                } else {
                    Status::Failure
                }
            }
            _ => Status::Failure,
        }
    })?;
    runtime.register("f fact f", |_, program, cmd| {
        match program.argument(cmd, 0) {
            Some(Variable::Float(val)) => {
                let mut mult = val;
                let mut acc = 1.0;
                while mult > 0.0 {
                    acc *= mult;
                    mult -= 1.0;
                }
                if program.set_return(cmd, Variable::Float(acc)) {
                    Status::Success
                } else {
                    Status::Failure
                }
            }
            _ => Status::Failure,
        }
    })?;
    Ok(runtime)
}

fn run_file(runtime: &mut Runtime, path: &str) -> std::io::Result<()> {
    let source = fs::read_to_string(path)?;
    if let Err(error) = compile_and_run(runtime, &source) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(2);
    }
    Ok(())
}

fn compile_and_run(runtime: &mut Runtime, source: &str) -> Result<(), Error> {
    let mut program = runtime.compile(source)?;
    runtime.run(&mut program)
}

/// Line entry session: accumulates script lines and understands the
/// directives `run`, `list`, `new`, `load <file>` and `exit`.
fn session(runtime: &mut Runtime) -> std::io::Result<()> {
    let interface = Interface::new("rill")?;
    interface.set_prompt("> ")?;
    interface.write_fmt(format_args!("RILL\nREADY.\n"))?;
    let mut lines: Vec<String> = vec![];
    while let ReadResult::Input(input) = interface.read_line()? {
        match input.trim() {
            "exit" => break,
            "run" => {
                let source = lines.join("\n");
                if let Err(error) = compile_and_run(runtime, &source) {
                    interface.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(error.to_string())
                    ))?;
                }
            }
            "list" => {
                for (n, line) in lines.iter().enumerate() {
                    interface.write_fmt(format_args!("{:>4} {}\n", n + 1, line))?;
                }
            }
            "new" => lines.clear(),
            directive if directive.starts_with("load ") => {
                match fs::read_to_string(directive[5..].trim()) {
                    Ok(source) => {
                        lines = source.lines().map(|l| l.to_string()).collect();
                    }
                    Err(error) => {
                        interface.write_fmt(format_args!(
                            "{}\n",
                            Style::new().bold().paint(error.to_string())
                        ))?;
                    }
                }
            }
            _ => {
                interface.add_history_unique(input.clone());
                lines.push(input);
            }
        }
    }
    Ok(())
}
