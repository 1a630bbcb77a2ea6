use super::eval::{self, Term};
use super::program::{Command, Program};
use super::registry::Registry;
use super::runtime::{Machine, Status};
use super::value::Variable;
use crate::lang::{Error, Operator};

/// Installs the built-in command set. Hosts add their own commands on top
/// of these before compiling.
pub fn install(registry: &mut Registry) -> Result<(), Error> {
    registry.register("print x", print)?;
    registry.register("x set x", set)?;
    registry.register("if xox", branch)?;
    registry.register("else", jump)?;
    registry.register("endif", noop)?;
    registry.register("while xox", branch)?;
    registry.register("wend", jump)?;
    registry.register("repeat", noop)?;
    registry.register("until xox", branch)?;
    registry.register("i add ii", add_integer)?;
    registry.register("f add ff", add_float)?;
    registry.register("s add ss", add_string)?;
    registry.register("i sub ii", sub_integer)?;
    registry.register("f sub ff", sub_float)?;
    registry.register("i mult ii", mult_integer)?;
    registry.register("f mult ff", mult_float)?;
    registry.register("i div ii", div_integer)?;
    registry.register("f div ff", div_float)?;
    registry.register("i strlen s", strlen)?;
    registry.register("i integer x", to_integer)?;
    registry.register("f float x", to_float)?;
    registry.register("stop", stop)?;
    registry.register("select", noop)?;
    registry.register("case xox", branch)?;
    registry.register("fallthrough", noop)?;
    registry.register("break", jump)?;
    registry.register("selend", noop)?;
    registry.register("call i", call)?;
    registry.register("return", ret)?;
    registry.register("f eval :", eval_expression)?;
    Ok(())
}

/// Typed comparison. Operands must share a signature; `<` and the rest are
/// lexicographic for strings. Everything else compares unmatched (false).
fn compare(lhs: &Variable, op: &Variable, rhs: &Variable) -> bool {
    fn decide<T: PartialOrd>(op: Operator, a: &T, b: &T) -> bool {
        match op {
            Operator::Equal => a == b,
            Operator::NotEqual => a != b,
            Operator::Less => a < b,
            Operator::Greater => a > b,
            Operator::LessEqual => a <= b,
            Operator::GreaterEqual => a >= b,
            _ => false,
        }
    }
    if lhs.signature() != rhs.signature() {
        return false;
    }
    let op = match op {
        Variable::Op(op) => *op,
        _ => return false,
    };
    match (lhs, rhs) {
        (Variable::Integer(a), Variable::Integer(b)) => decide(op, a, b),
        (Variable::Float(a), Variable::Float(b)) => decide(op, a, b),
        (Variable::String(a), Variable::String(b)) => decide(op, a, b),
        _ => false,
    }
}

fn set_result(program: &mut Program, cmd: &Command, value: Variable) -> Status {
    if program.set_return(cmd, value) {
        Status::Success
    } else {
        Status::Failure
    }
}

fn print(machine: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(value) => {
            machine.print(&value.formatted());
            Status::Success
        }
        None => Status::Failure,
    }
}

fn set(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(value) => set_result(program, cmd, value),
        None => Status::Failure,
    }
}

/// `if`/`while`/`until`/`case`: fall through while the comparison holds,
/// jump to the backpatched destination when it does not.
fn branch(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    let (lhs, op, rhs, dest) = match (
        program.argument(cmd, 0),
        program.argument(cmd, 1),
        program.argument(cmd, 2),
        program.argument(cmd, 3),
    ) {
        (Some(lhs), Some(op), Some(rhs), Some(Variable::Integer(dest))) => (lhs, op, rhs, dest),
        _ => return Status::Failure,
    };
    if compare(&lhs, &op, &rhs) {
        Status::Success
    } else {
        program.jump(dest as usize);
        Status::Jumped
    }
}

/// `else`/`wend`/`break`: unconditional jump to the backpatched
/// destination.
fn jump(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(Variable::Integer(dest)) => {
            program.jump(dest as usize);
            Status::Jumped
        }
        _ => Status::Failure,
    }
}

fn noop(_: &mut Machine, _: &mut Program, _: &Command) -> Status {
    Status::Success
}

fn stop(_: &mut Machine, _: &mut Program, _: &Command) -> Status {
    Status::Stopped
}

fn call(machine: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(Variable::Integer(dest)) => {
            machine.push_return(program.pc() + 1);
            program.jump(dest as usize);
            Status::Jumped
        }
        _ => Status::Failure,
    }
}

fn ret(machine: &mut Machine, program: &mut Program, _: &Command) -> Status {
    match machine.pop_return() {
        Some(dest) => {
            program.jump(dest);
            Status::Jumped
        }
        None => Status::Failure,
    }
}

fn add_integer(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Integer(a)), Some(Variable::Integer(b))) => {
            set_result(program, cmd, Variable::Integer(a.wrapping_add(b)))
        }
        _ => Status::Failure,
    }
}

fn add_float(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Float(a)), Some(Variable::Float(b))) => {
            set_result(program, cmd, Variable::Float(a + b))
        }
        _ => Status::Failure,
    }
}

fn add_string(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::String(a)), Some(Variable::String(b))) => {
            set_result(program, cmd, Variable::String(a + &b))
        }
        _ => Status::Failure,
    }
}

fn sub_integer(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Integer(a)), Some(Variable::Integer(b))) => {
            set_result(program, cmd, Variable::Integer(a.wrapping_sub(b)))
        }
        _ => Status::Failure,
    }
}

fn sub_float(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Float(a)), Some(Variable::Float(b))) => {
            set_result(program, cmd, Variable::Float(a - b))
        }
        _ => Status::Failure,
    }
}

fn mult_integer(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Integer(a)), Some(Variable::Integer(b))) => {
            set_result(program, cmd, Variable::Integer(a.wrapping_mul(b)))
        }
        _ => Status::Failure,
    }
}

fn mult_float(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Float(a)), Some(Variable::Float(b))) => {
            set_result(program, cmd, Variable::Float(a * b))
        }
        _ => Status::Failure,
    }
}

/// Truncating integer division. Dividing by zero reports a failure status
/// instead of halting; see the silent-continue policy in `runtime`.
fn div_integer(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Integer(a)), Some(Variable::Integer(b))) => match a.checked_div(b) {
            Some(quotient) => set_result(program, cmd, Variable::Integer(quotient)),
            None => Status::Failure,
        },
        _ => Status::Failure,
    }
}

fn div_float(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match (program.argument(cmd, 0), program.argument(cmd, 1)) {
        (Some(Variable::Float(a)), Some(Variable::Float(b))) => {
            set_result(program, cmd, Variable::Float(a / b))
        }
        _ => Status::Failure,
    }
}

/// Byte length of the (interpolated) string.
fn strlen(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(Variable::String(val)) => {
            set_result(program, cmd, Variable::Integer(val.len() as i64))
        }
        _ => Status::Failure,
    }
}

/// String parse or float truncation. An integer input is a failure.
fn to_integer(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(Variable::String(val)) => match val.parse::<i64>() {
            Ok(parsed) => set_result(program, cmd, Variable::Integer(parsed)),
            Err(_) => Status::Failure,
        },
        Some(Variable::Float(val)) => set_result(program, cmd, Variable::Integer(val as i64)),
        _ => Status::Failure,
    }
}

/// String parse or integer widening. A float input is a failure.
fn to_float(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    match program.argument(cmd, 0) {
        Some(Variable::String(val)) => match val.parse::<f64>() {
            Ok(parsed) => set_result(program, cmd, Variable::Float(parsed)),
            Err(_) => Status::Failure,
        },
        Some(Variable::Integer(val)) => set_result(program, cmd, Variable::Float(val as f64)),
        _ => Status::Failure,
    }
}

/// Variadic arithmetic over everything after the return slot. Integers
/// widen to floats; operators pass through to the evaluator.
fn eval_expression(_: &mut Machine, program: &mut Program, cmd: &Command) -> Status {
    let count = cmd.arguments.len();
    let mut terms: Vec<Term> = Vec::with_capacity(count);
    for i in 1..count {
        match program.argument(cmd, i - 1) {
            Some(Variable::Float(val)) => terms.push(Term::Number(val)),
            Some(Variable::Integer(val)) => terms.push(Term::Number(val as f64)),
            Some(Variable::Op(op)) => terms.push(Term::Op(op)),
            _ => return Status::Failure,
        }
    }
    match eval::eval(&terms) {
        Some(value) => set_result(program, cmd, Variable::Float(value)),
        None => Status::Failure,
    }
}
