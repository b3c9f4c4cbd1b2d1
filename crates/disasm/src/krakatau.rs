use std::io::Write;

use declass_bytecode::{decode, Instruction, OperandKind};
use declass_class_file::{
    attributes::CodeAttribute, AccessFlags, ClassFile, ClassFileError, ConstantPool, CpInfo,
    MethodInfo,
};

use crate::{Renderer, Result};

/// Krakatau-style assembly output: directives for the class shape, one
/// line per instruction with symbolic operands resolved through the pool.
pub struct KrakatauRenderer;

impl Renderer for KrakatauRenderer {
    fn render(&self, class_file: &ClassFile, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            ".class{} {}",
            keywords(class_file.access_flags),
            class_file.class_name()?
        )?;
        if let Some(super_class) = class_file.super_class()? {
            writeln!(w, ".super {}", super_class)?;
        }

        for method in &class_file.methods {
            self.render_method(class_file, method, w)?;
        }

        Ok(())
    }
}

impl KrakatauRenderer {
    fn render_method(
        &self,
        class_file: &ClassFile,
        method: &MethodInfo,
        w: &mut dyn Write,
    ) -> Result<()> {
        writeln!(w)?;
        writeln!(
            w,
            ".method{} {} : {}",
            keywords(method.access_flags),
            class_file.method_name(method)?,
            class_file.method_descriptor(method)?
        )?;

        if let Some(code) = method
            .attributes
            .code_attribute(&class_file.constant_pool)?
        {
            self.render_code(&code, &class_file.constant_pool, w)?;
        }

        writeln!(w, ".end method")?;
        Ok(())
    }

    fn render_code(
        &self,
        code: &CodeAttribute,
        constant_pool: &ConstantPool,
        w: &mut dyn Write,
    ) -> Result<()> {
        writeln!(w, "    .limit stack {}", code.max_stack)?;
        writeln!(w, "    .limit locals {}", code.max_locals)?;
        for entry in &code.exception_table {
            let catch_type = if entry.is_catch_all() {
                "all"
            } else {
                constant_pool.class_name(entry.catch_type)?
            };
            writeln!(
                w,
                "    .catch {} from L{} to L{} using L{}",
                catch_type, entry.start_pc, entry.end_pc, entry.handler_pc
            )?;
        }
        writeln!(w)?;

        for instruction in decode(&code.code)? {
            match operand_text(&instruction, constant_pool)? {
                Some(text) => writeln!(w, "    {} {}", instruction.opcode.mnemonic(), text)?,
                None => writeln!(w, "    {}", instruction.opcode.mnemonic())?,
            }
        }
        Ok(())
    }
}

fn keywords(access_flags: AccessFlags) -> String {
    let words = access_flags.keywords();
    if words.is_empty() {
        words
    } else {
        format!(" {}", words)
    }
}

/// Operand rendering, keyed by the operand shape of the opcode. Every
/// shape in the instruction set has a rule here; `None` means the opcode
/// takes no operand at all.
fn operand_text(instruction: &Instruction, constant_pool: &ConstantPool) -> Result<Option<String>> {
    let pool_index = instruction.operand_u16().unwrap_or_default();

    let text = match instruction.opcode.operand_kind() {
        OperandKind::None => return Ok(None),
        OperandKind::LocalIndex => instruction.operand_u8().unwrap_or_default().to_string(),
        OperandKind::SignedByte => instruction.operand_i8().unwrap_or_default().to_string(),
        OperandKind::SignedShort => instruction.operand_i16().unwrap_or_default().to_string(),
        OperandKind::ConstantNarrow => {
            constant_text(constant_pool, instruction.operand_u8().unwrap_or_default() as u16)?
        }
        OperandKind::Constant => constant_text(constant_pool, pool_index)?,
        OperandKind::FieldRef | OperandKind::MethodRef | OperandKind::InterfaceMethodRef => {
            let member = constant_pool.member_ref(pool_index)?;
            format!("{} {} {}", member.class_name, member.name, member.descriptor)
        }
        OperandKind::DynamicCallSite => match constant_pool.get(pool_index)? {
            CpInfo::InvokeDynamic(info) => {
                let (name, descriptor) = constant_pool.name_and_type(info.name_and_type_index)?;
                format!("{} {}", name, descriptor)
            }
            c => {
                return Err(ClassFileError::UnexpectedConstantPoolEntry(
                    "InvokeDynamic",
                    c.clone(),
                )
                .into())
            }
        },
        OperandKind::ClassRef => constant_pool.class_name(pool_index)?.to_owned(),
        OperandKind::MultiArray => format!(
            "{} {}",
            constant_pool.class_name(pool_index)?,
            instruction.operands.get(2).copied().unwrap_or_default()
        ),
        OperandKind::ArrayType => {
            array_type_name(instruction.operand_u8().unwrap_or_default()).to_owned()
        }
        OperandKind::LocalIndexAndConst => format!(
            "{} {}",
            instruction.operand_u8().unwrap_or_default(),
            instruction.operands.get(1).copied().unwrap_or_default() as i8
        ),
        OperandKind::Branch => branch_label(
            instruction.offset,
            instruction.operand_i16().unwrap_or_default() as i32,
        ),
        OperandKind::BranchWide => branch_label(
            instruction.offset,
            instruction.operand_i32().unwrap_or_default(),
        ),
        OperandKind::TableSwitch => table_switch_text(instruction),
        OperandKind::LookupSwitch => lookup_switch_text(instruction),
        OperandKind::Wide => wide_text(instruction),
    };

    Ok(Some(text))
}

/// ldc-family operands: the loadable constant behind the pool index.
fn constant_text(constant_pool: &ConstantPool, index: u16) -> Result<String> {
    Ok(match constant_pool.get(index)? {
        CpInfo::String { .. } => format!("{:?}", constant_pool.string_text(index)?),
        CpInfo::Integer(n) => n.to_string(),
        CpInfo::Float(n) => format!("{}f", n),
        CpInfo::Long(n) => format!("{}L", n),
        CpInfo::Double(n) => n.to_string(),
        CpInfo::Class(c) => constant_pool.get_utf8(c.name_index)?.to_owned(),
        c => c.to_string(),
    })
}

/// Branch operands encode an offset relative to the branching instruction.
fn branch_label(offset: usize, relative: i32) -> String {
    format!("L{}", offset as i64 + relative as i64)
}

fn table_switch_text(instruction: &Instruction) -> String {
    let Some(table) = instruction.range_table() else {
        return String::new();
    };

    let base = instruction.offset as i64;
    let mut text = table.low.to_string();
    for jump in &table.jumps {
        text.push_str(&format!("\n        L{}", base + *jump as i64));
    }
    text.push_str(&format!("\n        default : L{}", base + table.default as i64));
    text
}

fn lookup_switch_text(instruction: &Instruction) -> String {
    let Some(table) = instruction.lookup_table() else {
        return String::new();
    };

    let base = instruction.offset as i64;
    let mut text = table.match_offsets.len().to_string();
    for (value, jump) in &table.match_offsets {
        text.push_str(&format!("\n        {} : L{}", value, base + *jump as i64));
    }
    text.push_str(&format!("\n        default : L{}", base + table.default as i64));
    text
}

fn wide_text(instruction: &Instruction) -> String {
    let Some((target, index, constant)) = instruction.wide_target() else {
        return String::new();
    };

    match constant {
        Some(constant) => format!("{} {} {}", target.mnemonic(), index, constant),
        None => format!("{} {}", target.mnemonic(), index),
    }
}

fn array_type_name(code: u8) -> &'static str {
    match code {
        4 => "boolean",
        5 => "char",
        6 => "float",
        7 => "double",
        8 => "byte",
        9 => "short",
        10 => "int",
        11 => "long",
        _ => "unknown",
    }
}
