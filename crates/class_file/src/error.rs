use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Invalid magic identifier: 0x{0:X}")]
    InvalidMagicIdentifier(u32),
    #[error("Truncated input while reading {0}")]
    TruncatedInput(&'static str),
    #[error("Invalid cp info tag: {0}")]
    InvalidCpInfoTag(u8),
    #[error("Invalid constant pool index: {0}")]
    InvalidPoolIndex(u16),
    #[error("Expected {0}, found {1:?}")]
    UnexpectedConstantPoolEntry(&'static str, constant_pool::CpInfo),
    #[error("Constant pool cannot grow past the 16-bit count domain")]
    ConstantPoolOverflow,
    #[error("Declared {field} of {length} bytes exceeds the allocation limit")]
    OversizedLength { field: &'static str, length: u32 },
    #[error("Two-slot constant overruns the declared pool count of {0}")]
    WideConstantOverrun(u16),
}
