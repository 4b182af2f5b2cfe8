//! Data produced by the first pass and consumed by the resolver.
//!
//! Programs are line oriented. Each non-empty line is either a label
//! declaration or a single instruction:
//!
//! ```text
//! :start              // binds `start` to the offset of the next instruction
//! load rom a 0x10     // 2 bytes: opcode, immediate
//! mov a b             // 1 byte
//! jmp != start        // 3 bytes: opcode, offset high, offset low
//! ```
//!
//! An instruction occupies a fixed number of bytes determined by the
//! kind of operand it carries, see [`Operand::len`].

use std::collections::HashMap;
use std::fmt;

/// A single instruction line, split into its mnemonic and argument text.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceLine {
    /// 1-based line number.
    pub number: usize,
    /// The raw line, as read from the source.
    pub text: String,
    pub mnemonic: String,
    /// Arguments re-joined by single spaces.
    pub arguments: String,
}

impl SourceLine {
    /// The instruction text the encoder matches against.
    pub fn instruction(&self) -> String {
        if self.arguments.is_empty() {
            self.mnemonic.clone()
        } else {
            format!("{} {}", self.mnemonic, self.arguments)
        }
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.instruction())
    }
}

/// What a non-empty source line declares.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement {
    Label(String),
    Instruction(SourceLine),
}

/// A label bound during the first pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Label {
    pub name: String,
    pub offset: u16,
    /// Line the label was declared on.
    pub line: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    None,
    Number(u8),
    /// Reference to a label, resolved to a big-endian 16-bit offset.
    Label(String),
}

impl Operand {
    /// Number of bytes the operand adds after the opcode.
    pub fn len(&self) -> usize {
        match self {
            Operand::None      => 0,
            Operand::Number(_) => 1,
            Operand::Label(_)  => 2,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::None         => Ok(()),
            Operand::Number(n)    => write!(f, "0x{:02x}", n),
            Operand::Label(name)  => write!(f, "{}", name),
        }
    }
}

/// One encoded instruction awaiting label resolution.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EncodedUnit {
    pub source: SourceLine,
    /// Byte offset of the opcode within the image.
    pub offset: usize,
    pub opcode: u8,
    pub operand: Operand,
}

impl EncodedUnit {
    /// Total size in bytes: 1, 2 or 3.
    pub fn len(&self) -> usize {
        1 + self.operand.len()
    }
}

/// The result of the first pass.
#[derive(Clone, Default, Debug)]
pub struct Program {
    pub units: Vec<EncodedUnit>,
    pub labels: HashMap<String, Label>,
}

impl Program {
    /// Size of the image once resolved.
    pub fn len(&self) -> usize {
        self.units.iter().map(EncodedUnit::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(mnemonic: &str, arguments: &str) -> SourceLine {
        SourceLine {
            number: 1,
            text: format!("{} {}", mnemonic, arguments),
            mnemonic: mnemonic.to_owned(),
            arguments: arguments.to_owned(),
        }
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(line("nop", "").instruction(), "nop");
        assert_eq!(line("jmp", "!= loop").instruction(), "jmp != loop");
    }

    #[test]
    fn test_unit_len() {
        let mut unit = EncodedUnit { source: line("nop", ""), offset: 0, opcode: 0x00, operand: Operand::None };
        assert_eq!(unit.len(), 1);
        unit.operand = Operand::Number(0xFF);
        assert_eq!(unit.len(), 2);
        unit.operand = Operand::Label("start".to_owned());
        assert_eq!(unit.len(), 3);
    }
}
