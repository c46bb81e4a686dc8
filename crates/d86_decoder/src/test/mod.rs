use crate::{
    decode_instruction, disassemble, disassemble_bytes, ByteSource, DecodeError, Decoded,
    DisassemblySummary, HEADER,
};
use d86_instruction::{
    Instruction, Operand, OperandSize, Operation, RegisterEncoding, SizedRegisterEncoding,
};

fn reg(register: RegisterEncoding, operand_size: OperandSize) -> Operand {
    Operand::Register(SizedRegisterEncoding(register, operand_size))
}

fn decode(bytes: &[u8]) -> Decoded {
    let mut source = ByteSource::new(bytes);
    decode_instruction(&mut source).unwrap().unwrap()
}

macro_rules! test_listing {
    ([$($byte:expr),*], [$($line:expr),*]) => {{
        let bytes: &[u8] = &[$($byte),*];
        let mut expected = String::from(HEADER);
        $(
            expected.push_str($line);
            expected.push('\n');
        )*
        assert_eq!(disassemble_bytes(bytes).unwrap(), expected);
    }};
}

#[test]
fn test_00() {
    assert_eq!(
        decode(&[0x00, 0b11_000_011]),
        Decoded::Instruction(Instruction::new(
            Operation::ADD,
            reg(RegisterEncoding::BlBx, OperandSize::Byte),
            reg(RegisterEncoding::AlAx, OperandSize::Byte),
        ))
    );
}

#[test]
fn test_01() {
    assert_eq!(
        decode(&[0x01, 0b11_000_011]),
        Decoded::Instruction(Instruction::new(
            Operation::ADD,
            reg(RegisterEncoding::BlBx, OperandSize::Word),
            reg(RegisterEncoding::AlAx, OperandSize::Word),
        ))
    );
}

#[test]
fn test_02() {
    assert_eq!(
        decode(&[0x02, 0b11_000_011]),
        Decoded::Instruction(Instruction::new(
            Operation::ADD,
            reg(RegisterEncoding::AlAx, OperandSize::Byte),
            reg(RegisterEncoding::BlBx, OperandSize::Byte),
        ))
    );
}

#[test]
fn test_03() {
    assert_eq!(
        decode(&[0x03, 0b11_000_011]),
        Decoded::Instruction(Instruction::new(
            Operation::ADD,
            reg(RegisterEncoding::AlAx, OperandSize::Word),
            reg(RegisterEncoding::BlBx, OperandSize::Word),
        ))
    );
}

#[test]
fn empty_input_is_only_the_header() {
    assert_eq!(disassemble_bytes(&[]).unwrap(), "bits 16\n\n");
}

#[test]
fn mov_immediate_to_register() {
    test_listing!([0xB8, 0x05, 0x00], ["mov ax, 5"]);
    test_listing!([0xB1, 0x0C], ["mov cl, 12"]);
    test_listing!([0xB5, 0xF4], ["mov ch, -12"]);
    test_listing!([0xB9, 0xF4, 0xFF], ["mov cx, -12"]);
    test_listing!([0xBA, 0x6C, 0x0F], ["mov dx, 3948"]);
}

#[test]
fn register_to_register() {
    test_listing!([0x03, 0xC1], ["add ax, cx"]);
    test_listing!([0x89, 0xD8], ["mov ax, bx"]);
    test_listing!([0x8B, 0xD8], ["mov bx, ax"]);
    test_listing!([0x88, 0xE5], ["mov ch, ah"]);
    test_listing!([0x29, 0xD8], ["sub ax, bx"]);
    test_listing!([0x38, 0xC4], ["cmp ah, al"]);
}

#[test]
fn register_direct_never_brackets() {
    for mrrm in 0b11_000_000..=0b11_111_111u8 {
        for op_code in [0x88, 0x89, 0x8A, 0x8B] {
            let listing = disassemble_bytes(&[op_code, mrrm]).unwrap();
            assert!(!listing.contains('['), "{}", listing);
        }
    }
}

#[test]
fn memory_operands() {
    test_listing!([0x8A, 0x00], ["mov al, [bx + si]"]);
    test_listing!([0x8B, 0x1B], ["mov bx, [bp + di]"]);
    test_listing!([0x8B, 0x56, 0x00], ["mov dx, [bp]"]);
    test_listing!([0x8A, 0x60, 0x04], ["mov ah, [bx + si + 4]"]);
    test_listing!([0x8A, 0x80, 0x87, 0x13], ["mov al, [bx + si + 4999]"]);
    test_listing!([0x89, 0x09], ["mov [bx + di], cx"]);
    test_listing!([0x88, 0x6E, 0x00], ["mov [bp], ch"]);
    test_listing!([0x3B, 0x18], ["cmp bx, [bx + si]"]);
}

#[test]
fn negative_displacements() {
    test_listing!([0x8B, 0x41, 0xDB], ["mov ax, [bx + di - 37]"]);
    test_listing!([0x89, 0x8C, 0xD4, 0xFE], ["mov [si - 300], cx"]);
    test_listing!([0x8B, 0x57, 0xE0], ["mov dx, [bx - 32]"]);
}

#[test]
fn zero_displacement_has_no_offset_term() {
    test_listing!([0x8B, 0x87, 0x00, 0x00], ["mov ax, [bx]"]);
    test_listing!([0x8B, 0x47, 0x00], ["mov ax, [bx]"]);
}

#[test]
fn direct_address() {
    test_listing!([0x8B, 0x2E, 0x05, 0x00], ["mov bp, [5]"]);
    test_listing!([0x8B, 0x1E, 0x82, 0x0D], ["mov bx, [3458]"]);
    test_listing!([0x01, 0x06, 0xFF, 0xFF], ["add [65535], ax"]);
}

#[test]
fn mov_immediate_to_memory() {
    test_listing!([0xC6, 0x03, 0x07], ["mov byte [bp + di], 7"]);
    test_listing!(
        [0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01],
        ["mov word [di + 901], 347"]
    );
    test_listing!([0xC7, 0xC1, 0x0C, 0x00], ["mov cx, 12"]);
}

#[test]
fn memory_and_accumulator() {
    test_listing!([0xA1, 0xFB, 0x09], ["mov ax, [2555]"]);
    test_listing!([0xA0, 0x10, 0x00], ["mov al, [16]"]);
    test_listing!([0xA3, 0xFA, 0x09], ["mov [2554], ax"]);
    test_listing!([0xA2, 0x0F, 0x00], ["mov [15], al"]);
}

#[test]
fn arithmetic_immediate() {
    test_listing!([0x83, 0xC6, 0x02], ["add si, 2"]);
    test_listing!([0x83, 0xED, 0xFE], ["sub bp, -2"]);
    test_listing!([0x81, 0xC4, 0x88, 0x01], ["add sp, 392"]);
    test_listing!([0x80, 0x07, 0x22], ["add byte [bx], 34"]);
    test_listing!(
        [0x83, 0x82, 0xE8, 0x03, 0x1D],
        ["add word [bp + si + 1000], 29"]
    );
    test_listing!([0x80, 0x3E, 0xE2, 0x12, 0x22], ["cmp byte [4834], 34"]);
    test_listing!([0x83, 0x3F, 0x02], ["cmp word [bx], 2"]);
}

#[test]
fn sign_extended_immediate_differs_from_word_immediate() {
    test_listing!([0x83, 0xC0, 0xFF], ["add ax, -1"]);
    test_listing!([0x81, 0xC0, 0xFF, 0x00], ["add ax, 255"]);
    test_listing!([0x80, 0xC0, 0xFF], ["add al, -1"]);
}

#[test]
fn immediate_to_accumulator() {
    test_listing!([0x05, 0xE8, 0x03], ["add ax, 1000"]);
    test_listing!([0x04, 0xE2], ["add al, -30"]);
    test_listing!([0x2C, 0x09], ["sub al, 9"]);
    test_listing!([0x2D, 0x00, 0x80], ["sub ax, -32768"]);
    test_listing!([0x3D, 0xE8, 0x03], ["cmp ax, 1000"]);
    test_listing!([0x3C, 0xE2], ["cmp al, -30"]);
}

#[test]
fn unrecognized_op_code_advances_one_byte() {
    test_listing!([0xF4], ["; f4"]);
    test_listing!([0xF4, 0xB8, 0x05, 0x00], ["; f4", "mov ax, 5"]);
}

#[test]
fn unrecognized_group_encoding_advances_one_byte() {
    // 0x80 /1 is `or`, so the next byte is decoded as a new op code.
    test_listing!([0x80, 0x08, 0x90], ["; 80", "; 08", "; 90"]);
    // 0xC6 /5 has no meaning.
    test_listing!([0xC6, 0xE8, 0x04, 0x03], ["; c6", "; e8", "add al, 3"]);
}

#[test]
fn summary_counts() {
    let mut output = Vec::new();
    let summary = disassemble(&[0xF4u8, 0xB8, 0x05, 0x00, 0x03, 0xC1][..], &mut output).unwrap();

    assert_eq!(
        summary,
        DisassemblySummary {
            bytes: 6,
            instructions: 2,
            unrecognized: 1,
        }
    );
}

#[test]
fn truncated_stream_keeps_earlier_lines() {
    let mut output = Vec::new();
    let result = disassemble(&[0x89u8, 0xD8, 0xB8, 0x05][..], &mut output);

    assert!(matches!(
        result,
        Err(DecodeError::TruncatedStream { offset: 4 })
    ));
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "bits 16\n\nmov ax, bx\n"
    );
}

#[test]
fn truncated_group_encoding() {
    assert!(matches!(
        disassemble_bytes(&[0x83]),
        Err(DecodeError::TruncatedStream { offset: 1 })
    ));
}

#[test]
fn truncated_direct_address() {
    assert!(matches!(
        disassemble_bytes(&[0x8B, 0x2E, 0x05]),
        Err(DecodeError::TruncatedStream { offset: 3 })
    ));
}

#[test]
fn reads_from_buffered_reader() {
    let reader = std::io::BufReader::with_capacity(2, &[0x8Bu8, 0x41, 0xDB, 0xB1, 0x0C][..]);
    let mut output = Vec::new();
    disassemble(reader, &mut output).unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "bits 16\n\nmov ax, [bx + di - 37]\nmov cl, 12\n"
    );
}
