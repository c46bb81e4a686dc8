use crate::errors::Result;
use crate::traits::{OpCodeExt, ReadExt};
use crate::FromLowBits;
use d86_instruction::{
    Instruction, Operand, OperandSize, Operation, RegisterEncoding, SizedRegisterEncoding,
};

// x x x x x x d w | mod reg r/m | disp-lo | disp-hi
pub(crate) fn register_or_memory_and_register(
    operation: Operation,
    op_code: u8,
    it: &mut impl ReadExt,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();
    let mrrm = it.read_mrrm()?;

    let reg = Operand::Register(SizedRegisterEncoding(mrrm.register, operand_size));
    let reg_mem = mrrm.register_or_memory.into_operand(operand_size);

    Ok(Instruction::with_direction(
        operation,
        op_code.reg_is_destination(),
        reg,
        reg_mem,
    ))
}

// x x x x x x s w | mod op r/m | disp-lo | disp-hi | data | data if s:w = 01
//
// The operation was already selected from the `op` field by the caller. `data_size` is
// independent of the destination size: a byte of data may be sign-extended into a word.
pub(crate) fn immediate_to_register_or_memory(
    operation: Operation,
    data_size: OperandSize,
    op_code: u8,
    it: &mut impl ReadExt,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();
    let mrrm = it.read_mrrm()?;

    let destination = mrrm.register_or_memory.into_operand(operand_size);
    let source = Operand::Immediate(it.read_immediate(data_size)?);

    Ok(Instruction::new(operation, destination, source))
}

// 1 0 1 1 w reg | data | data if w = 1
pub(crate) fn immediate_to_register(op_code: u8, it: &mut impl ReadExt) -> Result<Instruction> {
    let operand_size = if op_code & 0b1000 == 0 {
        OperandSize::Byte
    } else {
        OperandSize::Word
    };

    let destination = Operand::Register(SizedRegisterEncoding(
        RegisterEncoding::from_low_bits(op_code),
        operand_size,
    ));
    let source = Operand::Immediate(it.read_immediate(operand_size)?);

    Ok(Instruction::new(Operation::MOV, destination, source))
}

// 1 0 1 0 0 0 d w | addr-lo | addr-hi
pub(crate) fn memory_and_accumulator(op_code: u8, it: &mut impl ReadExt) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    let accumulator = Operand::Register(SizedRegisterEncoding(RegisterEncoding::AlAx, operand_size));
    let memory = Operand::Direct(it.read_u16()?, operand_size);

    // d = 0 loads the accumulator, the opposite of the mod reg r/m forms.
    Ok(Instruction::with_direction(
        Operation::MOV,
        !op_code.reg_is_destination(),
        accumulator,
        memory,
    ))
}

// x x x x x x x w | data | data if w = 1
pub(crate) fn immediate_to_accumulator(
    operation: Operation,
    op_code: u8,
    it: &mut impl ReadExt,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    Ok(Instruction::new(
        operation,
        Operand::Register(SizedRegisterEncoding(RegisterEncoding::AlAx, operand_size)),
        Operand::Immediate(it.read_immediate(operand_size)?),
    ))
}
