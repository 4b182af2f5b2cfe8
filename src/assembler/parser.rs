//! The first pass. Reads the source line by line, binds labels to byte
//! offsets and encodes instructions, leaving label references unresolved.
use std::collections::hash_map::Entry;
use std::convert::TryFrom;
use std::io::{BufRead, BufReader, Read};

use super::ast::{EncodedUnit, Label, Operand, Program, SourceLine, Statement};
use super::encoder::encode;
use super::error::{AssemblyError, ErrorKind};
use super::grammar::Grammar;
use super::lexer::parse_line;
use super::table::InstructionTable;
use super::Config;

pub struct Parser {
    table: InstructionTable,
    grammar: Grammar,
}

/// State scoped to a single compilation.
#[derive(Default)]
struct Context {
    offset: usize,
    program: Program,
}

impl Context {
    fn declare(&mut self, name: String, line: usize) -> Result<(), ErrorKind> {
        let offset = u16::try_from(self.offset).map_err(|_| ErrorKind::NumericRange {
            value: self.offset.to_string(),
            max: u16::MAX.into(),
        })?;

        match self.program.labels.entry(name) {
            Entry::Occupied(existing) => Err(ErrorKind::DuplicateLabel {
                name: existing.key().clone(),
                first_line: existing.get().line,
            }),
            Entry::Vacant(slot) => {
                trace!("label `{}` bound to 0x{:04x}", slot.key(), offset);
                let name = slot.key().clone();
                slot.insert(Label { name, offset, line });
                Ok(())
            }
        }
    }

    fn push(&mut self, source: SourceLine, opcode: u8, operand: Operand) {
        debug!("0x{:04x}: {:<20} => 0x{:02x} {}", self.offset, source.instruction(), opcode, operand);
        let unit = EncodedUnit { source, offset: self.offset, opcode, operand };
        self.offset += unit.len();
        self.program.units.push(unit);
    }
}

impl Parser {
    pub fn new(config: &Config) -> Self {
        Parser {
            table: InstructionTable::new(),
            grammar: Grammar::new(&config.registers),
        }
    }

    /// Runs the first pass over `reader`, stopping at the first error.
    pub fn run<R: Read>(&self, reader: R) -> Result<Program, AssemblyError> {
        let mut context = Context::default();

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let number = index + 1;
            let raw = line.map_err(|err| {
                AssemblyError::new(number, "", ErrorKind::LineSyntax(format!("unable to read line: {}", err)))
            })?;

            self.statement(&mut context, number, &raw)
                .map_err(|kind| AssemblyError::new(number, raw.as_str(), kind))?;
        }

        Ok(context.program)
    }

    fn statement(&self, context: &mut Context, number: usize, raw: &str) -> Result<(), ErrorKind> {
        match parse_line(number, raw)? {
            None => Ok(()),
            Some(Statement::Label(name)) => context.declare(name, number),
            Some(Statement::Instruction(source)) => {
                self.grammar.validate(&source)?;
                let (opcode, operand) = encode(&self.table, &source.instruction())?;
                context.push(source, opcode, operand);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Result<Program, AssemblyError> {
        Parser::new(&Config::default()).run(source.as_bytes())
    }

    #[test]
    fn test_offsets() {
        let program = run("nop\nload rom a 1\njmp end\n:end\npause\n").unwrap();
        let offsets: Vec<usize> = program.units.iter().map(|u| u.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 6]);
        assert_eq!(program.len(), 7);
        assert_eq!(program.labels["end"].offset, 6);
    }

    #[test]
    fn test_label_binds_current_offset() {
        let program = run(":start\n:also_start\nmov a b\n// comment\n\n:after_mov\nnop\n").unwrap();
        assert_eq!(program.labels["start"].offset, 0);
        assert_eq!(program.labels["also_start"].offset, 0);
        assert_eq!(program.labels["after_mov"].offset, 1);
        assert_eq!(program.labels["after_mov"].line, 6);
    }

    #[test]
    fn test_source_lines_are_numbered_from_one() {
        let program = run("\n\nnop // third\n").unwrap();
        assert_eq!(program.units[0].source.number, 3);
        assert_eq!(program.units[0].source.text, "nop // third");
    }

    #[test]
    fn test_duplicate_label() {
        let err = run(":loop\nnop\n:loop\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.text, ":loop");
        assert_eq!(err.kind, ErrorKind::DuplicateLabel { name: "loop".to_owned(), first_line: 1 });
    }

    #[test]
    fn test_first_error_stops_the_pass() {
        let err = run("nop\nmov a a\nfoo\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ErrorKind::ArgumentShape { .. }));

        let err = run("nop\nfoo\nmov a a\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ErrorKind::UnknownInstruction("foo".to_owned()));
    }

    #[test]
    fn test_unread_line() {
        let err = Parser::new(&Config::default()).run(&b"nop\n\xff\xfe\n"[..]).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ErrorKind::LineSyntax(_)));
    }

    #[test]
    fn test_label_offset_must_fit_in_16_bits() {
        let mut source = "load rom a 1\n".repeat(0x8000);
        source.push_str(":too_far\n");
        let err = run(&source).unwrap_err();
        assert_eq!(err.line, 0x8001);
        assert_eq!(err.kind, ErrorKind::NumericRange { value: "65536".to_owned(), max: 0xFFFF });
        assert_eq!(err.to_string(), "line 32769: `65536` is out of range (max 65535)\n\t:too_far");
    }
}
