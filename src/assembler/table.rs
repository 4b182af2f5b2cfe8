//! The fixed opcode table.
//!
//! Entries are written as templates: plain text for instructions without
//! operands, or text with a single `{number}` or `{label}` slot. They are
//! parsed into [`Pattern`]s once when the table is built. Declaration order
//! is significant: when matching an instruction against the placeholder
//! patterns the first matching entry wins.
use std::collections::HashMap;

const NUMBER_SLOT: &str = "{number}";
const LABEL_SLOT: &str = "{label}";

const OPCODES: &[(&str, u8)] = &[
    ("nop", 0x00),

    ("mov a b", 0x01),
    ("mov a c", 0x02),
    ("mov a d", 0x03),
    ("mov b a", 0x04),
    ("mov b c", 0x05),
    ("mov b d", 0x06),
    ("mov c a", 0x07),
    ("mov c b", 0x08),
    ("mov c d", 0x09),
    ("mov d a", 0x0A),
    ("mov d b", 0x0B),
    ("mov d c", 0x0C),

    ("cmp a a", 0x10),
    ("cmp a b", 0x11),
    ("cmp a c", 0x12),
    ("cmp a d", 0x13),
    ("cmp b a", 0x14),
    ("cmp b b", 0x15),
    ("cmp b c", 0x16),
    ("cmp b d", 0x17),
    ("cmp c a", 0x18),
    ("cmp c b", 0x19),
    ("cmp c c", 0x1A),
    ("cmp c d", 0x1B),
    ("cmp d a", 0x1C),
    ("cmp d b", 0x1D),
    ("cmp d c", 0x1E),
    ("cmp d d", 0x1F),

    ("jmp {label}", 0x20),
    ("jmp = {label}", 0x21),
    ("jmp != {label}", 0x22),
    ("jmp < {label}", 0x23),
    ("jmp <= {label}", 0x24),
    ("jmp > {label}", 0x25),
    ("jmp >= {label}", 0x26),
    ("jmp .< {label}", 0x27),
    ("jmp .<= {label}", 0x28),
    ("jmp .> {label}", 0x29),
    ("jmp .>= {label}", 0x2A),

    ("jmpr {number}", 0x30),
    ("jmpr = {number}", 0x31),
    ("jmpr != {number}", 0x32),
    ("jmpr < {number}", 0x33),
    ("jmpr <= {number}", 0x34),
    ("jmpr > {number}", 0x35),
    ("jmpr >= {number}", 0x36),
    ("jmpr .< {number}", 0x37),
    ("jmpr .<= {number}", 0x38),
    ("jmpr .> {number}", 0x39),
    ("jmpr .>= {number}", 0x3A),

    ("opp clr", 0x40),
    ("opp cmp off", 0x41),
    ("opp cmp on", 0x42),
    ("opp sign off", 0x43),
    ("opp sign on", 0x44),
    ("opp 0", 0x45),
    ("opp 1", 0x46),
    ("opp -1", 0x47),
    ("opp a", 0x48),
    ("opp b", 0x49),
    ("opp c", 0x4A),
    ("opp d", 0x4B),
    ("opp ~a", 0x4C),
    ("opp ~b", 0x4D),
    ("opp ~c", 0x4E),
    ("opp ~d", 0x4F),
    ("opp -a", 0x50),
    ("opp -b", 0x51),
    ("opp -c", 0x52),
    ("opp -d", 0x53),
    ("opp a+1", 0x54),
    ("opp b+1", 0x55),
    ("opp c+1", 0x56),
    ("opp d+1", 0x57),
    ("opp a-1", 0x58),
    ("opp b-1", 0x59),
    ("opp c-1", 0x5A),
    ("opp d-1", 0x5B),
    ("opp a+b", 0x5C),
    ("opp a+c", 0x5D),
    ("opp a+d", 0x5E),
    ("opp b+a", 0x5F),
    ("opp b+c", 0x60),
    ("opp b+d", 0x61),
    ("opp c+a", 0x62),
    ("opp c+b", 0x63),
    ("opp c+d", 0x64),
    ("opp d+a", 0x65),
    ("opp d+b", 0x66),
    ("opp d+c", 0x67),
    ("opp a-b", 0x68),
    ("opp a-c", 0x69),
    ("opp a-d", 0x6A),
    ("opp b-a", 0x6B),
    ("opp b-c", 0x6C),
    ("opp b-d", 0x6D),
    ("opp c-a", 0x6E),
    ("opp c-b", 0x6F),
    ("opp c-d", 0x70),
    ("opp d-a", 0x71),
    ("opp d-b", 0x72),
    ("opp d-c", 0x73),
    ("opp a*a", 0x74),
    ("opp a*b", 0x75),
    ("opp a*c", 0x76),
    ("opp a*d", 0x77),
    ("opp b*a", 0x78),
    ("opp b*b", 0x79),
    ("opp b*c", 0x7A),
    ("opp b*d", 0x7B),
    ("opp c*a", 0x7C),
    ("opp c*b", 0x7D),
    ("opp c*c", 0x7E),
    ("opp c*d", 0x7F),
    ("opp d*a", 0x80),
    ("opp d*b", 0x81),
    ("opp d*c", 0x82),
    ("opp d*d", 0x83),
    ("opp a.*a", 0x84),
    ("opp a.*b", 0x85),
    ("opp a.*c", 0x8D),
    ("opp c.*c", 0x8E),
    ("opp c.*d", 0x8F),
    ("opp d.*a", 0x90),
    ("opp d.*b", 0x91),
    ("opp d.*c", 0x92),
    ("opp d.*d", 0x93),
    ("opp a/b", 0x94),
    ("opp a/c", 0x95),
    ("opp a/d", 0x96),
    ("opp b/a", 0x97),
    ("opp b/c", 0x98),
    ("opp b/d", 0x99),
    ("opp c/a", 0x9A),
    ("opp c/b", 0x9B),
    ("opp c/d", 0x9C),
    ("opp d/a", 0x9D),
    ("opp d/b", 0x9E),
    ("opp d/c", 0x9F),
    ("opp a&b", 0xA0),
    ("opp a&c", 0xA1),
    ("opp a&d", 0xA2),
    ("opp b&c", 0xA3),
    ("opp b&d", 0xA4),
    ("opp c&d", 0xA5),
    ("opp a|b", 0xA6),
    ("opp a|c", 0xA7),
    ("opp a|d", 0xA8),
    ("opp b|c", 0xA9),
    ("opp b|d", 0xAA),
    ("opp c|d", 0xAB),

    ("load ram[a] a", 0xB0),
    ("load ram[a] b", 0xB1),
    ("load ram[a] c", 0xB2),
    ("load ram[a] d", 0xB3),
    ("load ram[b] a", 0xB4),
    ("load ram[b] b", 0xB5),
    ("load ram[b] c", 0xB6),
    ("load ram[b] d", 0xB7),
    ("load ram[c] a", 0xB8),
    ("load ram[c] b", 0xB9),
    ("load ram[c] c", 0xBA),
    ("load ram[c] d", 0xBB),
    ("load ram[d] a", 0xBC),
    ("load ram[d] b", 0xBD),
    ("load ram[d] c", 0xBE),
    ("load ram[d] d", 0xBF),
    ("load rom a {number}", 0xC0),
    ("load rom b {number}", 0xC1),
    ("load rom c {number}", 0xC2),
    ("load rom d {number}", 0xC3),
    ("load ram[{number}] a", 0xC4),
    ("load ram[{number}] b", 0xC5),
    ("load ram[{number}] c", 0xC6),
    ("load ram[{number}] d", 0xC7),

    ("set a rampage", 0xC8),
    ("set b rampage", 0xC9),
    ("set c rampage", 0xCA),
    ("set d rampage", 0xCB),

    ("save a mar", 0xD0),
    ("save b mar", 0xD1),
    ("save c mar", 0xD2),
    ("save d mar", 0xD3),
    ("save a ram[current]", 0xD4),
    ("save b ram[current]", 0xD5),
    ("save c ram[current]", 0xD6),
    ("save d ram[current]", 0xD7),
    ("save a ram[a]", 0xD8),
    ("save b ram[c]", 0xD9),
    ("save c ram[d]", 0xDA),
    ("save d ram[d]", 0xDB),
    ("save a ram[{number}]", 0xDC),
    ("save b ram[{number}]", 0xDD),
    ("save c ram[{number}]", 0xDE),
    ("save d ram[{number}]", 0xDF),

    ("in a", 0xE0),
    ("in b", 0xE1),
    ("in c", 0xE2),
    ("in d", 0xE3),

    ("out a", 0xF0),
    ("out b", 0xF1),
    ("out c", 0xF2),
    ("out d", 0xF3),

    ("pause", 0xFF),
];

/// The shape of an instruction table entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Pattern {
    Literal(&'static str),
    /// `prefix{number}suffix`, encoded as opcode + one byte.
    WithNumber { prefix: &'static str, suffix: &'static str },
    /// `prefix{label}suffix`, encoded as opcode + a 16-bit offset.
    WithLabel { prefix: &'static str, suffix: &'static str },
}

impl Pattern {
    fn from_template(template: &'static str) -> Self {
        if let Some(at) = template.find(NUMBER_SLOT) {
            Pattern::WithNumber {
                prefix: &template[..at],
                suffix: &template[at + NUMBER_SLOT.len()..],
            }
        } else if let Some(at) = template.find(LABEL_SLOT) {
            Pattern::WithLabel {
                prefix: &template[..at],
                suffix: &template[at + LABEL_SLOT.len()..],
            }
        } else {
            Pattern::Literal(template)
        }
    }

    /// Returns the text standing in the placeholder slot, if the whole of
    /// `text` has this pattern's prefix and suffix. Literal patterns never
    /// capture anything.
    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        match self {
            Pattern::Literal(_) => None,
            Pattern::WithNumber { prefix, suffix } |
            Pattern::WithLabel { prefix, suffix } => text
                .strip_prefix(*prefix)
                .and_then(|rest| rest.strip_suffix(*suffix)),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct InstructionSpec {
    pub pattern: Pattern,
    pub opcode: u8,
}

/// Read-only lookup over the opcode table.
pub struct InstructionTable {
    literals: HashMap<&'static str, u8>,
    specs: Vec<InstructionSpec>,
}

impl InstructionTable {
    pub fn new() -> Self {
        let specs: Vec<InstructionSpec> = OPCODES
            .iter()
            .map(|&(template, opcode)| InstructionSpec { pattern: Pattern::from_template(template), opcode })
            .collect();

        let literals = specs
            .iter()
            .filter_map(|spec| match spec.pattern {
                Pattern::Literal(text) => Some((text, spec.opcode)),
                _ => None,
            })
            .collect();

        InstructionTable { literals, specs }
    }

    /// Exact lookup of an instruction without operands.
    pub fn lookup_literal(&self, text: &str) -> Option<u8> {
        self.literals.get(text).copied()
    }

    /// Every placeholder-bearing entry, in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &InstructionSpec> {
        self.specs.iter().filter(|spec| !matches!(spec.pattern, Pattern::Literal(_)))
    }

    /// Every literal entry, in declaration order.
    pub fn literals(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.specs.iter().filter_map(|spec| match spec.pattern {
            Pattern::Literal(text) => Some((text, spec.opcode)),
            _ => None,
        })
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}
