use std::io::Cursor;

use crate::{Attribute, Result};

use super::{parser::Parser, ConstantPool};

#[derive(Debug)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn find_by_name(&self, name: &str, constant_pool: &ConstantPool) -> Option<&Attribute> {
        for a in &self.0 {
            let Ok(s) = constant_pool.get_utf8(a.attribute_name_index) else {
                continue;
            };

            if s == name {
                return Some(a);
            }
        }

        None
    }

    /// Decodes the "Code" attribute, if present. The raw payload is only
    /// borrowed; the returned structure owns all of its buffers.
    pub fn code_attribute(&self, constant_pool: &ConstantPool) -> Result<Option<CodeAttribute>> {
        let Some(attribute) = self.find_by_name("Code", constant_pool) else {
            return Ok(None);
        };

        Parser::new(Cursor::new(&attribute.info))
            .parse_code_attribute()
            .map(Some)
    }
}

#[derive(Debug)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    pub catch_type: u16,
}
impl ExceptionTableEntry {
    /// A zero catch_type catches everything, as compilers emit for finally
    /// blocks.
    pub fn is_catch_all(&self) -> bool {
        self.catch_type == 0
    }
}

#[derive(Debug)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: Attributes,
}
