use crate::lang::Operator;

/// One token of an arithmetic expression handed to [`eval`].
#[derive(Debug, Clone, Copy)]
pub enum Term {
    Number(f64),
    Op(Operator),
}

/// Evaluates `+ - * / ( )` over f64 operands with standard precedence and
/// unary minus. Self-contained precedence climbing; `None` for malformed
/// expressions or trailing tokens.
pub fn eval(terms: &[Term]) -> Option<f64> {
    let mut parser = Parser { terms, pos: 0 };
    let value = parser.expression()?;
    if parser.pos == terms.len() {
        Some(value)
    } else {
        None
    }
}

struct Parser<'a> {
    terms: &'a [Term],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek_op(&self) -> Option<Operator> {
        match self.terms.get(self.pos) {
            Some(Term::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn expression(&mut self) -> Option<f64> {
        let mut lhs = self.term()?;
        loop {
            match self.peek_op() {
                Some(Operator::Plus) => {
                    self.pos += 1;
                    lhs += self.term()?;
                }
                Some(Operator::Minus) => {
                    self.pos += 1;
                    lhs -= self.term()?;
                }
                _ => return Some(lhs),
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut lhs = self.factor()?;
        loop {
            match self.peek_op() {
                Some(Operator::Times) => {
                    self.pos += 1;
                    lhs *= self.factor()?;
                }
                Some(Operator::Divide) => {
                    self.pos += 1;
                    lhs /= self.factor()?;
                }
                _ => return Some(lhs),
            }
        }
    }

    fn factor(&mut self) -> Option<f64> {
        match self.terms.get(self.pos)? {
            Term::Number(val) => {
                self.pos += 1;
                Some(*val)
            }
            Term::Op(Operator::Minus) => {
                self.pos += 1;
                Some(-self.factor()?)
            }
            Term::Op(Operator::LParen) => {
                self.pos += 1;
                let value = self.expression()?;
                match self.peek_op() {
                    Some(Operator::RParen) => {
                        self.pos += 1;
                        Some(value)
                    }
                    _ => None,
                }
            }
            Term::Op(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operator::*;

    fn n(val: f64) -> Term {
        Term::Number(val)
    }

    fn o(op: Operator) -> Term {
        Term::Op(op)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval(&[n(2.0), o(Plus), n(3.0), o(Times), n(4.0)]), Some(14.0));
        assert_eq!(eval(&[n(8.0), o(Minus), n(6.0), o(Divide), n(2.0)]), Some(5.0));
    }

    #[test]
    fn test_parentheses() {
        let terms = [
            o(LParen),
            n(2.0),
            o(Plus),
            n(3.0),
            o(RParen),
            o(Times),
            n(4.0),
        ];
        assert_eq!(eval(&terms), Some(20.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval(&[o(Minus), n(3.0), o(Times), n(2.0)]), Some(-6.0));
        assert_eq!(eval(&[n(1.0), o(Minus), o(Minus), n(2.0)]), Some(3.0));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(eval(&[]), None);
        assert_eq!(eval(&[n(1.0), o(Plus)]), None);
        assert_eq!(eval(&[o(LParen), n(1.0)]), None);
        assert_eq!(eval(&[n(1.0), n(2.0)]), None);
    }
}
