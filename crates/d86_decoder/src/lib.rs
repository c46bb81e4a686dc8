//! Decodes a stream of 8086 machine code into [d86_instruction::Instruction]s and writes them
//! out as a NASM listing.

mod common;
mod decode;
mod disassemble;
mod errors;
mod mod_reg_rm;
mod source;
mod traits;

#[cfg(test)]
mod test;

pub use decode::{classify, decode_instruction, group_operation, Decoded, OpCodeClass};
pub use disassemble::{disassemble, disassemble_bytes, DisassemblySummary, HEADER};
pub use errors::{DecodeError, Result};
pub use mod_reg_rm::{ModRegRM, RegisterOrMemory};
pub use source::ByteSource;
pub use traits::{OpCodeExt, ReadExt};

use d86_instruction::{AddressingMode, RegisterEncoding};

/// Builds a value from the lowest 3 bits of an encoding. Higher bits are ignored.
trait FromLowBits {
    fn from_low_bits(bits: u8) -> Self;
}

impl FromLowBits for RegisterEncoding {
    fn from_low_bits(bits: u8) -> Self {
        RegisterEncoding::ALL[(bits & 0b111) as usize]
    }
}

impl FromLowBits for AddressingMode {
    fn from_low_bits(bits: u8) -> Self {
        AddressingMode::ALL[(bits & 0b111) as usize]
    }
}
