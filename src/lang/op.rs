/// Closed operator set, reversible by exact spelling.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    Assign,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Plus,
    Minus,
    Times,
    Divide,
    LParen,
    RParen,
}

impl Operator {
    pub fn from_str(s: &str) -> Option<Operator> {
        use Operator::*;
        match s {
            ":=" => Some(Assign),
            "==" => Some(Equal),
            "!=" => Some(NotEqual),
            "<=" => Some(LessEqual),
            ">=" => Some(GreaterEqual),
            "<" => Some(Less),
            ">" => Some(Greater),
            "+" => Some(Plus),
            "-" => Some(Minus),
            "*" => Some(Times),
            "/" => Some(Divide),
            "(" => Some(LParen),
            ")" => Some(RParen),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Operator::*;
        match self {
            Assign => ":=",
            Equal => "==",
            NotEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Less => "<",
            Greater => ">",
            Plus => "+",
            Minus => "-",
            Times => "*",
            Divide => "/",
            LParen => "(",
            RParen => ")",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
