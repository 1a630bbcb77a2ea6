mod common;
use common::*;
use rill::mach::{Registry, Status};

fn nop(
    _: &mut rill::mach::Machine,
    _: &mut rill::mach::Program,
    _: &rill::mach::Command,
) -> Status {
    Status::Success
}

#[test]
fn test_resolution_is_registration_order() {
    let mut registry = Registry::new();
    registry.register("probe s", nop).expect("register");
    registry.register("probe x", nop).expect("register");
    // A string call site hits the first declaration, anything else the
    // wildcard one.
    assert_eq!(registry.code_for("probe", "s", false), Some(0));
    assert_eq!(registry.code_for("probe", "i", false), Some(1));
    assert_eq!(registry.code_for("probe", "f", false), Some(1));
}

#[test]
fn test_return_flag_must_match() {
    let mut registry = Registry::new();
    registry.register("i twice i", nop).expect("register");
    assert_eq!(registry.code_for("twice", "ii", true), Some(0));
    // Calling without a destination variable does not resolve.
    assert_eq!(registry.code_for("twice", "i", false), None);
    assert_eq!(registry.code_for("twice", "ii", false), None);
}

#[test]
fn test_bare_command_takes_no_arguments() {
    let mut registry = Registry::new();
    registry.register("ping", nop).expect("register");
    assert_eq!(registry.code_for("ping", "", false), Some(0));
    assert_eq!(registry.code_for("ping", "i", false), None);
}

#[test]
fn test_variadic_accepts_any_tail() {
    let mut registry = Registry::new();
    registry.register("f sum :", nop).expect("register");
    assert_eq!(registry.code_for("sum", "f", true), Some(0));
    assert_eq!(registry.code_for("sum", "fioioi", true), Some(0));
    assert_eq!(registry.code_for("sum", "f", false), None);
}

#[test]
fn test_declaration_rejects_extra_tokens() {
    let mut registry = Registry::new();
    assert!(registry.register("i bogus ii extra", nop).is_err());
    assert!(registry.register("", nop).is_err());
}

#[test]
fn test_typed_overloads_dispatch_by_argument() {
    // add resolves per operand type, so one script line picks the integer
    // handler and the next the float handler.
    let source = "\
VAR int i
VAR float f
MAIN
i := add 1 2
f := add 1.5 2.5
print i
print f
stop";
    assert_eq!(exec(source), "3\n4\n");
}

#[test]
fn test_unknown_signature_is_a_compile_error() {
    // add has no integer/float mix.
    let source = "\
VAR int i
MAIN
i := add 1 2.5
stop";
    let rendered = compile_error(source);
    assert!(rendered.starts_with("UNKNOWN COMMAND"), "{}", rendered);
}
