//! Argument shapes accepted by each mnemonic.
//!
//! The grammar only checks that the arguments are well formed. Whether a
//! well formed line names an instruction that exists is decided by the
//! encoder against the opcode table.
use std::collections::HashMap;

use regex::Regex;

use super::ast::SourceLine;
use super::error::ErrorKind;

const NUMBER: &str = r"(?:0x[0-9a-fA-F]+|0b[01]+|[0-9]+)";
const CONDITION: &str = r"\.?(?:=|!=|<=|<|>=|>)";

struct Rule {
    /// Alternative shapes, any one of which accepts the arguments.
    shapes: Vec<Regex>,
    /// The first two captures must name different registers.
    distinct: bool,
    expected: &'static str,
}

impl Rule {
    fn new(shapes: &[String], expected: &'static str) -> Self {
        Rule {
            shapes: shapes
                .iter()
                .map(|shape| Regex::new(&format!("^{}$", shape)).expect("argument shapes are built from escaped text"))
                .collect(),
            distinct: false,
            expected,
        }
    }

    fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    fn accepts(&self, arguments: &str) -> bool {
        self.shapes.iter().any(|shape| match shape.captures(arguments) {
            Some(caps) if self.distinct => caps.get(1).map(|m| m.as_str()) != caps.get(2).map(|m| m.as_str()),
            Some(_) => true,
            None => false,
        })
    }
}

pub struct Grammar {
    rules: HashMap<&'static str, Rule>,
}

impl Grammar {
    /// Builds the grammar for a machine with the given register names.
    pub fn new(registers: &[String]) -> Self {
        let reg = format!(
            "({})",
            registers.iter().map(|r| regex::escape(r)).collect::<Vec<String>>().join("|")
        );

        let mut rules = HashMap::new();
        rules.insert("nop", Rule::new(&[String::new()], "no arguments"));
        rules.insert("pause", Rule::new(&[String::new()], "no arguments"));
        rules.insert(
            "mov",
            Rule::new(&[format!("{} {}", reg, reg)], "two different registers").distinct(),
        );
        rules.insert("cmp", Rule::new(&[format!("{} {}", reg, reg)], "two registers"));

        let jump = [format!(r"(?:{} )?\S+", CONDITION)];
        rules.insert("jmp", Rule::new(&jump, "an optional condition followed by a target"));
        rules.insert("jmpr", Rule::new(&jump, "an optional condition followed by a target"));

        rules.insert("opp", Rule::new(&[String::from(".+")], "an ALU operation"));
        rules.insert(
            "load",
            Rule::new(
                &[
                    format!(r"ram\[{}\] {}", reg, reg),
                    format!(r"ram\[{}\] {}", NUMBER, reg),
                    format!("rom {} {}", reg, NUMBER),
                ],
                "`ram[REG] REG`, `ram[NUMBER] REG` or `rom REG NUMBER`",
            ),
        );
        rules.insert("set", Rule::new(&[format!("{} rampage", reg)], "`REG rampage`"));
        rules.insert(
            "save",
            Rule::new(
                &[
                    format!("{} mar", reg),
                    format!(r"{} ram\[current\]", reg),
                    format!(r"{} ram\[{}\]", reg, reg),
                    format!(r"{} ram\[{}\]", reg, NUMBER),
                ],
                "`REG mar`, `REG ram[current]`, `REG ram[REG]` or `REG ram[NUMBER]`",
            ),
        );
        rules.insert("in", Rule::new(&[reg.clone()], "a single register"));
        rules.insert("out", Rule::new(&[reg], "a single register"));

        Grammar { rules }
    }

    /// Checks the arguments of `line` against the shapes its mnemonic accepts.
    pub fn validate(&self, line: &SourceLine) -> Result<(), ErrorKind> {
        let rule = self
            .rules
            .get(line.mnemonic.as_str())
            .ok_or_else(|| ErrorKind::UnknownInstruction(line.instruction()))?;

        if rule.accepts(&line.arguments) {
            Ok(())
        } else {
            Err(ErrorKind::ArgumentShape {
                mnemonic: line.mnemonic.clone(),
                expected: rule.expected,
            })
        }
    }
}
