//! This crate holds the structs and constants to represent the subset of 8086 instructions the
//! disassembler understands, and renders them as NASM source lines.

mod instruction;
mod operand;
mod operation;
mod register;

pub use instruction::Instruction;
pub use operand::{AddressingMode, Displacement, Operand, OperandSize, EFFECTIVE_ADDRESSES};
pub use operation::Operation;
pub use register::{RegisterEncoding, SizedRegisterEncoding, REGISTER_NAMES};
