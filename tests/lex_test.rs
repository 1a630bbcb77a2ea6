use rill::lang::lex;

fn words(line: &str) -> Vec<String> {
    lex(line)
        .iter()
        .map(|r| line[r.clone()].to_string())
        .filter(|w| !w.trim().is_empty())
        .collect()
}

#[test]
fn test_ranges_cover_the_line() {
    for line in &[
        "print \"hello world\"",
        "x := add  a b",
        "if a==b",
        "f := eval ( x + 1.5 ) * -2",
        "   ",
        "",
    ] {
        let joined: String = lex(line).iter().map(|r| &line[r.clone()]).collect();
        assert_eq!(&joined, line);
    }
}

#[test]
fn test_empty_line() {
    assert!(lex("").is_empty());
}

#[test]
fn test_operator_cluster() {
    assert_eq!(words("a:=1"), ["a", ":=", "1"]);
    assert_eq!(words("a == b"), ["a", "==", "b"]);
    assert_eq!(words("a<=b"), ["a", "<=", "b"]);
}

#[test]
fn test_quotes_kept_inclusive() {
    assert_eq!(words("print \"a b c\""), ["print", "\"a b c\""]);
    assert_eq!(words("\"x\"\"y\""), ["\"x\"", "\"y\""]);
}

#[test]
fn test_math_singletons() {
    assert_eq!(words("( 1 + 2 ) * 3"), ["(", "1", "+", "2", ")", "*", "3"]);
    // A math char directly after another math char opens a word instead.
    assert_eq!(words("(1+2)*3"), ["(", "1", "+", "2", ")", "*3"]);
}

#[test]
fn test_minus_after_operator_is_a_sign() {
    // After an operator or math token, the minus glues to the literal.
    assert_eq!(words("x == -12"), ["x", "==", "-12"]);
    assert_eq!(words("y := * -12"), ["y", ":=", "*", "-12"]);
}

#[test]
fn test_minus_after_word_is_binary() {
    assert_eq!(words("a - 12"), ["a", "-", "12"]);
    assert_eq!(words("a-12"), ["a", "-", "12"]);
    assert_eq!(words("\"a\" - 12"), ["\"a\"", "-", "12"]);
}
