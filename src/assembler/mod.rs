//! The Assembler module is in charge of taking a source
//! program and producing the bytes of a ROM image.
//!
//! It does this in two passes. The first pass validates and
//! encodes each line while binding labels to byte offsets; the
//! second resolves label references and renders the image.
use std::io::Read;

pub mod ast;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod table;

pub use error::{AssemblyError, ErrorKind};

/// Header line identifying the image format (Logisim raw).
pub const DEFAULT_HEADER: &str = "v2.0 raw";

/// Settings for a target machine variant.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// Names accepted wherever the grammar expects a register.
    pub registers: Vec<String>,
    /// First line of the emitted image.
    pub header: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registers: ["a", "b", "c", "d"].iter().map(|r| r.to_string()).collect(),
            header: DEFAULT_HEADER.to_owned(),
        }
    }
}

/// Assembles a complete program read from `reader`.
pub fn assemble_reader<R: Read>(reader: R, config: &Config) -> Result<Vec<u8>, AssemblyError> {
    parser::Parser::new(config).run(reader)?.resolve()
}

/// Assembles a complete program held in memory.
pub fn assemble(source: &str, config: &Config) -> Result<Vec<u8>, AssemblyError> {
    assemble_reader(source.as_bytes(), config)
}
