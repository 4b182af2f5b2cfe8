//! Maps instruction text onto an opcode and its operand.
use super::ast::Operand;
use super::error::ErrorKind;
use super::lexer::parse_number;
use super::table::{InstructionTable, Pattern};

/// Encodes a single, already validated, instruction.
///
/// Literal entries are tried first. Failing that the placeholder entries
/// are tried in declaration order and the first whose prefix and suffix
/// enclose a valid slot value wins.
pub fn encode(table: &InstructionTable, text: &str) -> Result<(u8, Operand), ErrorKind> {
    if let Some(opcode) = table.lookup_literal(text) {
        return Ok((opcode, Operand::None));
    }

    for spec in table.patterns() {
        let slot = match spec.pattern.capture(text) {
            Some(slot) => slot,
            None => continue,
        };

        match spec.pattern {
            Pattern::WithLabel { .. } if is_label(slot) => {
                return Ok((spec.opcode, Operand::Label(slot.to_owned())));
            }
            Pattern::WithNumber { .. } => {
                if let Some(value) = parse_number(slot)? {
                    return Ok((spec.opcode, Operand::Number(value)));
                }
            }
            _ => {}
        }
    }

    Err(ErrorKind::UnknownInstruction(text.to_owned()))
}

/// A label reference is any run of non-space characters.
fn is_label(slot: &str) -> bool {
    !slot.is_empty() && !slot.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_literal() {
        let table = InstructionTable::new();
        assert_eq!(encode(&table, "nop"), Ok((0x00, Operand::None)));
        assert_eq!(encode(&table, "cmp b b"), Ok((0x15, Operand::None)));
        assert_eq!(encode(&table, "opp cmp off"), Ok((0x41, Operand::None)));
        assert_eq!(encode(&table, "save a ram[current]"), Ok((0xD4, Operand::None)));
        assert_eq!(encode(&table, "out d"), Ok((0xF3, Operand::None)));
    }

    #[test]
    fn test_encode_label() {
        let table = InstructionTable::new();
        assert_eq!(encode(&table, "jmp start"), Ok((0x20, Operand::Label("start".to_owned()))));
        assert_eq!(encode(&table, "jmp != start"), Ok((0x22, Operand::Label("start".to_owned()))));
        assert_eq!(encode(&table, "jmp .>= end"), Ok((0x2A, Operand::Label("end".to_owned()))));
        // A label slot takes any token, digits included.
        assert_eq!(encode(&table, "jmp 12"), Ok((0x20, Operand::Label("12".to_owned()))));
    }

    #[test]
    fn test_encode_number() {
        let table = InstructionTable::new();
        assert_eq!(encode(&table, "jmpr 4"), Ok((0x30, Operand::Number(4))));
        assert_eq!(encode(&table, "jmpr .< 0b11"), Ok((0x37, Operand::Number(3))));
        assert_eq!(encode(&table, "load rom b 0xff"), Ok((0xC1, Operand::Number(0xFF))));
        assert_eq!(encode(&table, "load ram[255] d"), Ok((0xC7, Operand::Number(255))));
        assert_eq!(encode(&table, "save c ram[0x0a]"), Ok((0xDE, Operand::Number(10))));
    }

    #[test]
    fn test_encode_number_bases_agree() {
        let table = InstructionTable::new();
        let expected = Ok((0xC0, Operand::Number(16)));
        assert_eq!(encode(&table, "load rom a 0x10"), expected);
        assert_eq!(encode(&table, "load rom a 0b10000"), expected);
        assert_eq!(encode(&table, "load rom a 16"), expected);
    }

    #[test]
    fn test_encode_number_out_of_range() {
        let table = InstructionTable::new();
        assert_eq!(encode(&table, "load rom a 256"), Err(ErrorKind::NumericRange { value: "256".to_owned(), max: 255 }));
        assert_eq!(encode(&table, "jmpr 0x1ff"), Err(ErrorKind::NumericRange { value: "0x1ff".to_owned(), max: 255 }));
    }

    #[test]
    fn test_encode_unknown() {
        let table = InstructionTable::new();
        assert_eq!(encode(&table, "mov a a"), Err(ErrorKind::UnknownInstruction("mov a a".to_owned())));
        assert_eq!(encode(&table, "jmpr start"), Err(ErrorKind::UnknownInstruction("jmpr start".to_owned())));
        assert_eq!(encode(&table, "jmp"), Err(ErrorKind::UnknownInstruction("jmp".to_owned())));
        assert_eq!(encode(&table, "jmp .= x"), Err(ErrorKind::UnknownInstruction("jmp .= x".to_owned())));
        assert_eq!(encode(&table, "opp a^b"), Err(ErrorKind::UnknownInstruction("opp a^b".to_owned())));
        assert_eq!(encode(&table, "save b ram[a]"), Err(ErrorKind::UnknownInstruction("save b ram[a]".to_owned())));
    }

    #[test]
    fn test_placeholder_patterns_do_not_overlap() {
        let table = InstructionTable::new();
        let samples = [
            "jmp x", "jmp = x", "jmp != x", "jmp .< x", "jmp .>= x", "jmp 0x10",
            "jmpr 1", "jmpr = 1", "jmpr .<= 0b1", "jmpr >= 0x1",
            "load rom a 1", "load rom d 0x1", "load ram[1] a", "load ram[0b1] d",
            "save a ram[1]", "save d ram[0x1]",
        ];

        for sample in &samples {
            let matching = table
                .patterns()
                .filter(|spec| match (spec.pattern, spec.pattern.capture(sample)) {
                    (Pattern::WithLabel { .. }, Some(slot)) => is_label(slot),
                    (Pattern::WithNumber { .. }, Some(slot)) => matches!(parse_number(slot), Ok(Some(_))),
                    _ => false,
                })
                .count();
            assert_eq!(matching, 1, "`{}` matched {} patterns", sample, matching);
        }
    }
}
