//! Splits source lines into statements and parses numeric literals.
use super::ast::{SourceLine, Statement};
use super::error::ErrorKind;

const COMMENT: &str = "//";
const LABEL_MARK: char = ':';

/// Only a single statement is allowed per line. Returns `Ok(None)` for
/// lines that are blank once the comment is removed.
pub fn parse_line(number: usize, raw: &str) -> Result<Option<Statement>, ErrorKind> {
    let code = match raw.find(COMMENT) {
        Some(at) => &raw[..at],
        None => raw,
    };

    let mut words = code.split_whitespace();
    let first = match words.next() {
        Some(word) => word,
        None => return Ok(None),
    };

    if let Some(name) = first.strip_prefix(LABEL_MARK) {
        if name.is_empty() {
            return Err(ErrorKind::LineSyntax("label declaration without a name".to_owned()));
        }
        if let Some(extra) = words.next() {
            return Err(ErrorKind::LineSyntax(format!(
                "unexpected `{}` after declaration of label `{}`",
                extra, name
            )));
        }
        return Ok(Some(Statement::Label(name.to_owned())));
    }

    Ok(Some(Statement::Instruction(SourceLine {
        number,
        text: raw.to_owned(),
        mnemonic: first.to_owned(),
        arguments: words.collect::<Vec<&str>>().join(" "),
    })))
}

/// Parses a numeric literal in one of three forms: `0x` followed by hex
/// digits, `0b` followed by binary digits, or plain decimal digits.
///
/// `Ok(None)` means `text` is not a numeric literal at all. A well formed
/// literal whose value does not fit in a byte is a `NumericRange` error.
pub fn parse_number(text: &str) -> Result<Option<u8>, ErrorKind> {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b") {
        (bin, 2)
    } else {
        (text, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Ok(None);
    }

    // The digits are valid, so the only way left to fail is overflow.
    u8::from_str_radix(digits, radix)
        .map(Some)
        .map_err(|_| ErrorKind::NumericRange { value: text.to_owned(), max: u8::MAX.into() })
}
