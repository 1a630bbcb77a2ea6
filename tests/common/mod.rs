use rill::mach::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

/// A runtime whose print sink appends each printed line (plus `\n`) to a
/// shared buffer.
pub fn capture_runtime() -> (Runtime, Rc<RefCell<String>>) {
    let mut runtime = Runtime::default();
    let captured = Rc::new(RefCell::new(String::new()));
    let sink = captured.clone();
    runtime.set_output(Box::new(move |text| {
        let mut buf = sink.borrow_mut();
        buf.push_str(text);
        buf.push('\n');
    }));
    (runtime, captured)
}

/// Compiles and runs `source`, returning everything printed.
#[allow(dead_code)]
pub fn exec(source: &str) -> String {
    let (mut runtime, captured) = capture_runtime();
    let mut program = runtime.compile(source).expect("compile failed");
    runtime.run(&mut program).expect("run failed");
    let output = captured.borrow().clone();
    output
}

/// Compiles `source` expecting failure, returning the error rendering.
#[allow(dead_code)]
pub fn compile_error(source: &str) -> String {
    match Runtime::default().compile(source) {
        Ok(_) => panic!("expected a compile error"),
        Err(error) => error.to_string(),
    }
}
