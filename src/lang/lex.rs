use std::ops::Range;

/// Splits one trimmed line into ordered byte ranges covering the whole line.
///
/// Every character of the input lands in exactly one range: words, quoted
/// strings (quotes included), operator clusters, single math operators and
/// whitespace runs. Callers that want statement words discard the
/// whitespace-only ranges. An empty line yields no ranges.
pub fn lex(line: &str) -> Vec<Range<usize>> {
    Splitter::split(line)
}

/// `+ * / ( )` always; `-` only when it is not glued to a following
/// numeric literal as its sign.
pub fn is_math_char(c: char, ignore_minus: bool) -> bool {
    match c {
        '+' | '*' | '/' | '(' | ')' => true,
        '-' => !ignore_minus,
        _ => false,
    }
}

pub fn is_operator_char(c: char) -> bool {
    matches!(c, ':' | '=' | '!' | '<' | '>')
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Word,
    Space,
    Quote,
    Math,
    Operator,
}

struct Splitter {
    ranges: Vec<Range<usize>>,
    state: State,
    // State before the current one; `-` after whitespace is taken as a
    // literal's sign when the token before the whitespace was a math or
    // operator token.
    last: State,
    start: usize,
}

impl Splitter {
    fn split(line: &str) -> Vec<Range<usize>> {
        let mut s = Splitter {
            ranges: vec![],
            state: State::Word,
            last: State::Word,
            start: 0,
        };
        for (i, c) in line.char_indices() {
            s.step(i, c);
        }
        if s.start < line.len() {
            s.ranges.push(s.start..line.len());
        }
        s.ranges
    }

    fn close(&mut self, at: usize) {
        if self.start < at {
            self.ranges.push(self.start..at);
        }
        self.start = at;
    }

    fn step(&mut self, i: usize, c: char) {
        match self.state {
            State::Word => {
                if c == ' ' {
                    self.close(i);
                    self.last = State::Word;
                    self.state = State::Space;
                } else if c == '"' {
                    self.close(i);
                    self.last = State::Word;
                    self.state = State::Quote;
                } else if is_operator_char(c) {
                    self.close(i);
                    self.last = State::Word;
                    self.state = State::Operator;
                } else if is_math_char(c, false) {
                    self.close(i);
                    self.last = State::Word;
                    self.state = State::Math;
                }
            }
            State::Space => {
                if c != ' ' {
                    self.close(i);
                    let ignore_minus = self.last == State::Math || self.last == State::Operator;
                    self.state = if is_operator_char(c) {
                        State::Operator
                    } else if is_math_char(c, ignore_minus) {
                        State::Math
                    } else if c == '"' {
                        State::Quote
                    } else {
                        State::Word
                    };
                }
            }
            State::Quote => {
                if c == '"' {
                    let next = i + c.len_utf8();
                    self.close(next);
                    self.last = State::Quote;
                    self.state = State::Word;
                }
            }
            State::Math => {
                // Math tokens are a single character wide.
                self.close(i);
                self.last = State::Math;
                self.state = if c == ' ' {
                    State::Space
                } else if c == '"' {
                    State::Quote
                } else {
                    State::Word
                };
            }
            State::Operator => {
                if !is_operator_char(c) {
                    self.close(i);
                    self.last = State::Operator;
                    self.state = if c == ' ' {
                        State::Space
                    } else if c == '"' {
                        State::Quote
                    } else {
                        State::Word
                    };
                }
            }
        }
    }
}
