//! The second pass: resolves label references and renders the ROM image.
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::ast::{EncodedUnit, Operand, Program};
use super::error::{AssemblyError, ErrorKind};

impl EncodedUnit {
    /// Appends the unit's bytes to `out`. Label offsets are written
    /// most significant byte first.
    pub fn resolve_into(&self, program: &Program, out: &mut Vec<u8>) -> Result<(), AssemblyError> {
        out.push(self.opcode);
        match &self.operand {
            Operand::None => {}
            Operand::Number(value) => out.push(*value),
            Operand::Label(name) => {
                let label = program.labels.get(name).ok_or_else(|| {
                    AssemblyError::new(
                        self.source.number,
                        self.source.text.as_str(),
                        ErrorKind::UndefinedLabel(name.clone()),
                    )
                })?;
                out.extend_from_slice(&label.offset.to_be_bytes());
            }
        }
        Ok(())
    }
}

impl Program {
    /// Resolves every unit in source order. Nothing is returned unless
    /// every label reference resolves.
    pub fn resolve(&self) -> Result<Vec<u8>, AssemblyError> {
        let mut bytes = Vec::with_capacity(self.len());
        for unit in self.units.iter() {
            unit.resolve_into(self, &mut bytes)?;
        }

        info!("resolved {} byte(s), {} label(s)", bytes.len(), self.labels.len());
        Ok(bytes)
    }
}

/// Renders the image: the header line followed by a single line of
/// space separated, lowercase, two digit hex bytes.
pub fn format_image(header: &str, bytes: &[u8]) -> String {
    let body: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}\n{}\n", header, body.join(" "))
}

/// Writes the image to `path`. The image goes to a sibling temporary file
/// first and is renamed into place, so `path` is never left half written.
pub fn write_image(path: &Path, header: &str, bytes: &[u8]) -> io::Result<()> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = Path::new(&staging);

    let written = fs::File::create(staging).and_then(|mut file| {
        file.write_all(format_image(header, bytes).as_bytes())?;
        file.sync_all()
    });

    match written.and_then(|_| fs::rename(staging, path)) {
        Ok(()) => Ok(()),
        Err(err) => {
            let _ = fs::remove_file(staging);
            Err(err)
        }
    }
}
