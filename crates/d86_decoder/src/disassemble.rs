use crate::errors::Result;
use crate::{decode_instruction, ByteSource, Decoded};
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Written before the first instruction of every listing.
pub const HEADER: &str = "bits 16\n\n";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisassemblySummary {
    /// Total number of bytes consumed from the input.
    pub bytes: usize,
    pub instructions: usize,
    pub unrecognized: usize,
}

/// Decodes `input` until it is exhausted and writes a NASM listing to `output`.
///
/// Lines written before an error are left in `output`.
pub fn disassemble(input: impl BufRead, output: &mut impl Write) -> Result<DisassemblySummary> {
    let mut source = ByteSource::new(input);
    let mut summary = DisassemblySummary::default();

    output.write_all(HEADER.as_bytes())?;

    loop {
        let offset = source.position();

        let decoded = match decode_instruction(&mut source)? {
            Some(decoded) => decoded,
            None => break,
        };

        match decoded {
            Decoded::Instruction(instruction) => {
                trace!("{:06X}  {}", offset, instruction);
                summary.instructions += 1;
            }
            Decoded::Unrecognized(op_code) => {
                debug!("Unrecognized op code ({:#04x}) at {:06X}", op_code, offset);
                summary.unrecognized += 1;
            }
        }

        writeln!(output, "{}", decoded)?;
    }

    summary.bytes = source.position();

    Ok(summary)
}

/// Disassembles an in-memory buffer into a listing.
pub fn disassemble_bytes(bytes: &[u8]) -> Result<String> {
    let mut output = Vec::new();
    disassemble(bytes, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
