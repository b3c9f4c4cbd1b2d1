use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    ClassFile(#[from] declass_class_file::ClassFileError),
    #[error(transparent)]
    Bytecode(#[from] declass_bytecode::BytecodeError),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
