mod common;
use common::*;
use rill::mach::{Runtime, Status, Variable};

#[test]
fn test_assignment_type_safety() {
    // A string cannot land in an integer variable; the write is refused
    // and execution continues with the old value intact.
    let source = "\
VAR int x
MAIN
x := 7
x := \"oops\"
print x
stop";
    assert_eq!(exec(source), "7\n");
}

#[test]
fn test_integer_arithmetic() {
    let source = "\
VAR int a
MAIN
a := add 40 2
print a
a := sub a 44
print a
a := mult a 3
print a
a := div a 2
print a
stop";
    assert_eq!(exec(source), "42\n-2\n-6\n-3\n");
}

#[test]
fn test_integer_division_truncates() {
    let source = "\
VAR int a
MAIN
a := div 7 2
print a
stop";
    assert_eq!(exec(source), "3\n");
}

#[test]
fn test_division_by_zero_continues_silently() {
    let source = "\
VAR int a
MAIN
a := 9
a := div a 0
print a
stop";
    assert_eq!(exec(source), "9\n");
}

#[test]
fn test_float_arithmetic() {
    let source = "\
VAR float f
MAIN
f := add 1.5 2.25
print f
f := div f 1.5
print f
stop";
    assert_eq!(exec(source), "3.75\n2.5\n");
}

#[test]
fn test_type_coercion_commands() {
    let source = "\
VAR int i
VAR float f
MAIN
i := integer \"41\"
print i
f := float i
print f
i := integer 2.9
print i
f := float \"0.5\"
print f
stop";
    assert_eq!(exec(source), "41\n41\n2\n0.5\n");
}

#[test]
fn test_coercion_from_own_type_fails_silently() {
    // `integer` of an integer is a failure status; the destination keeps
    // its previous value and the program keeps running.
    let source = "\
VAR int i
MAIN
i := 5
i := integer 6
print i
stop";
    assert_eq!(exec(source), "5\n");
}

#[test]
fn test_return_without_call_continues() {
    let source = "\
MAIN
return
print \"still here\"
stop";
    assert_eq!(exec(source), "still here\n");
}

#[test]
fn test_eval_precedence_and_parens() {
    let source = "\
VAR float f
MAIN
f := eval 2 + 3 * 4
print f
f := eval ( 2 + 3 ) * 4
print f
f := eval 1 / 2
print f
stop";
    assert_eq!(exec(source), "14\n20\n0.5\n");
}

#[test]
fn test_eval_with_variables() {
    let source = "\
VAR float x,f
MAIN
x := 1.5
f := eval ( x + 0.5 ) * 3
print f
stop";
    assert_eq!(exec(source), "6\n");
}

#[test]
fn test_host_registered_command() {
    let (mut runtime, captured) = capture_runtime();
    runtime
        .register("i double i", |_, program, cmd| {
            match program.argument(cmd, 0) {
                Some(Variable::Integer(val)) => {
                    if program.set_return(cmd, Variable::Integer(val * 2)) {
                        Status::Success
                    } else {
                        Status::Failure
                    }
                }
                _ => Status::Failure,
            }
        })
        .expect("register failed");
    let source = "\
VAR int x
MAIN
x := double 21
print x
stop";
    let mut program = runtime.compile(source).expect("compile failed");
    runtime.run(&mut program).expect("run failed");
    assert_eq!(*captured.borrow(), "42\n");
}

#[test]
fn test_program_reruns_from_main() {
    let (mut runtime, captured) = capture_runtime();
    let source = "\
VAR int i
MAIN
i := add i 1
print i
stop";
    let mut program = runtime.compile(source).expect("compile failed");
    runtime.run(&mut program).expect("run failed");
    runtime.run(&mut program).expect("run failed");
    // Variable state survives between runs of the same program.
    assert_eq!(*captured.borrow(), "1\n2\n");
}

#[test]
fn test_bad_registration_declarations() {
    let mut runtime = Runtime::default();
    assert!(runtime
        .register("a b c d", |_, _, _| Status::Success)
        .is_err());
    assert!(runtime.register("", |_, _, _| Status::Success).is_err());
}
