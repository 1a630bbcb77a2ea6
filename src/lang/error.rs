use super::LineNumber;

pub struct Error {
    code: u16,
    line_number: LineNumber,
    line: String,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            line: String::new(),
            message: "",
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn in_line_number(self, line_number: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number,
            ..self
        }
    }

    pub fn in_line(self, line: &str) -> Error {
        debug_assert!(self.line.is_empty());
        Error {
            line: line.to_string(),
            ..self
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        Error { message, ..self }
    }
}

pub enum ErrorCode {
    UnknownCommand = 1,
    UnknownVariable = 2,
    AlreadyDeclared = 3,
    NestingIf = 4,
    NestingWhile = 5,
    NestingRepeat = 6,
    NestingSelect = 7,
    NestingCase = 8,
    SyntaxError = 9,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "UNKNOWN COMMAND",
            2 => "UNKNOWN VARIABLE",
            3 => "ALREADY DECLARED",
            4 => "IF NESTING ERROR",
            5 => "WHILE NESTING ERROR",
            6 => "REPEAT NESTING ERROR",
            7 => "SELECT NESTING ERROR",
            8 => "CASE NESTING ERROR",
            9 => "SYNTAX ERROR",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN LINE {}", line_number));
        }
        if !self.line.is_empty() {
            suffix.push_str(&format!(": {}", self.line));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
