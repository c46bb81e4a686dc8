use crate::common::{
    immediate_to_accumulator, immediate_to_register, immediate_to_register_or_memory,
    memory_and_accumulator, register_or_memory_and_register,
};
use crate::errors::{DecodeError, Result};
use crate::traits::OpCodeExt;
use crate::ByteSource;
use d86_instruction::{Instruction, OperandSize, Operation};
use std::fmt::{Display, Formatter};
use std::io::BufRead;

/// The instruction family selected by the first byte of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpCodeClass {
    /// `100010dw` (mov), `000000dw` (add), `001010dw` (sub), `001110dw` (cmp)
    RegisterOrMemoryAndRegister(Operation),
    /// `1100011w`, the operation is in the `reg` field of the next byte.
    MoveImmediateToRegisterOrMemory,
    /// `100000sw`, the operation is in the `reg` field of the next byte.
    ArithmeticImmediateToRegisterOrMemory,
    /// `1011wreg`
    ImmediateToRegister,
    /// `101000dw`
    MemoryAndAccumulator,
    /// `0000010w` (add), `0010110w` (sub), `0011110w` (cmp)
    ImmediateToAccumulator(Operation),
    Unrecognized,
}

/// Matches the first byte of an instruction against the known bit patterns. The first match
/// wins.
pub fn classify(op_code: u8) -> OpCodeClass {
    use OpCodeClass::*;

    match op_code {
        b if b & 0b1111_1100 == 0b1000_1000 => RegisterOrMemoryAndRegister(Operation::MOV),
        b if b & 0b1111_1110 == 0b1100_0110 => MoveImmediateToRegisterOrMemory,
        b if b & 0b1111_0000 == 0b1011_0000 => ImmediateToRegister,
        b if b & 0b1111_1100 == 0b1010_0000 => MemoryAndAccumulator,
        b if b & 0b1111_1100 == 0b0000_0000 => RegisterOrMemoryAndRegister(Operation::ADD),
        b if b & 0b1111_1100 == 0b0010_1000 => RegisterOrMemoryAndRegister(Operation::SUB),
        b if b & 0b1111_1100 == 0b0011_1000 => RegisterOrMemoryAndRegister(Operation::CMP),
        b if b & 0b1111_1100 == 0b1000_0000 => ArithmeticImmediateToRegisterOrMemory,
        b if b & 0b1111_1110 == 0b0000_0100 => ImmediateToAccumulator(Operation::ADD),
        b if b & 0b1111_1110 == 0b0010_1100 => ImmediateToAccumulator(Operation::SUB),
        b if b & 0b1111_1110 == 0b0011_1100 => ImmediateToAccumulator(Operation::CMP),
        _ => Unrecognized,
    }
}

/// Selects the operation of a group encoding from the `reg` field of its mod reg r/m byte.
pub fn group_operation(class: OpCodeClass, mrrm_byte: u8) -> Option<Operation> {
    use OpCodeClass::*;

    match (class, (mrrm_byte >> 3) & 0b111) {
        (MoveImmediateToRegisterOrMemory, 0b000) => Some(Operation::MOV),
        (ArithmeticImmediateToRegisterOrMemory, 0b000) => Some(Operation::ADD),
        (ArithmeticImmediateToRegisterOrMemory, 0b101) => Some(Operation::SUB),
        (ArithmeticImmediateToRegisterOrMemory, 0b111) => Some(Operation::CMP),
        _ => None,
    }
}

/// The result of decoding one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    Instruction(Instruction),
    /// The op code that could not be decoded. Only this byte was consumed.
    Unrecognized(u8),
}

impl Display for Decoded {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Decoded::Instruction(instruction) => instruction.fmt(f),
            Decoded::Unrecognized(op_code) => write!(f, "; {:02x}", op_code),
        }
    }
}

/// Decodes the next instruction from the source. Returns `None` when the stream is exhausted
/// before a new instruction starts.
pub fn decode_instruction<R: BufRead>(it: &mut ByteSource<R>) -> Result<Option<Decoded>> {
    let op_code = match it.next_byte()? {
        Some(op_code) => op_code,
        None => return Ok(None),
    };

    let class = classify(op_code);

    let instruction = match class {
        OpCodeClass::RegisterOrMemoryAndRegister(operation) => {
            register_or_memory_and_register(operation, op_code, it)?
        }

        OpCodeClass::MoveImmediateToRegisterOrMemory
        | OpCodeClass::ArithmeticImmediateToRegisterOrMemory => {
            // Only peek, so an unknown `reg` field leaves the stream one byte further along.
            let mrrm_byte = match it.peek_byte()? {
                Some(byte) => byte,
                None => {
                    return Err(DecodeError::TruncatedStream {
                        offset: it.position(),
                    })
                }
            };

            let operation = match group_operation(class, mrrm_byte) {
                Some(operation) => operation,
                None => return Ok(Some(Decoded::Unrecognized(op_code))),
            };

            let data_size = match class {
                OpCodeClass::ArithmeticImmediateToRegisterOrMemory if op_code.sign_extends() => {
                    OperandSize::Byte
                }
                _ => op_code.operand_size(),
            };

            immediate_to_register_or_memory(operation, data_size, op_code, it)?
        }

        OpCodeClass::ImmediateToRegister => immediate_to_register(op_code, it)?,

        OpCodeClass::MemoryAndAccumulator => memory_and_accumulator(op_code, it)?,

        OpCodeClass::ImmediateToAccumulator(operation) => {
            immediate_to_accumulator(operation, op_code, it)?
        }

        OpCodeClass::Unrecognized => return Ok(Some(Decoded::Unrecognized(op_code))),
    };

    Ok(Some(Decoded::Instruction(instruction)))
}
