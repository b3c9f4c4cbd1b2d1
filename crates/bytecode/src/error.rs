use thiserror::Error;

#[derive(Error, Debug)]
pub enum BytecodeError {
    #[error("Unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
    #[error("Truncated operand for {mnemonic} at offset {offset}")]
    TruncatedOperand {
        mnemonic: &'static str,
        offset: usize,
    },
    #[error("Bad jump table bounds in {mnemonic} at offset {offset}")]
    BadSwitchBounds {
        mnemonic: &'static str,
        offset: usize,
    },
    #[error("Opcode 0x{opcode:02X} cannot follow the wide prefix at offset {offset}")]
    InvalidWideTarget { opcode: u8, offset: usize },
}
