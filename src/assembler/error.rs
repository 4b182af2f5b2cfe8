//! Errors raised while assembling. Every error is fatal to the
//! compilation it occurred in.

/// The rule a source line violated.
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    #[error("malformed line: {0}")]
    LineSyntax(String),

    #[error("invalid arguments to `{mnemonic}`, expected {expected}")]
    ArgumentShape {
        mnemonic: String,
        expected: &'static str,
    },

    #[error("no instruction matches `{0}`")]
    UnknownInstruction(String),

    #[error("`{value}` is out of range (max {max})")]
    NumericRange { value: String, max: u32 },

    #[error("label `{name}` was already declared on line {first_line}")]
    DuplicateLabel { name: String, first_line: usize },

    #[error("label `{0}` has not been defined")]
    UndefinedLabel(String),
}

/// An error tied to the source line that triggered it.
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
#[error("line {line}: {kind}\n\t{}", .text.trim_end())]
pub struct AssemblyError {
    /// 1-based line number.
    pub line: usize,
    /// The line as it appeared in the source, comment included.
    pub text: String,
    pub kind: ErrorKind,
}

impl AssemblyError {
    pub fn new(line: usize, text: impl Into<String>, kind: ErrorKind) -> Self {
        AssemblyError { line, text: text.into(), kind }
    }
}
