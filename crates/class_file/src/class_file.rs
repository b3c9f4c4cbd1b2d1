use std::io::Read;

use crate::{attributes::Attributes, parser::Parser, AccessFlags, ConstantPool, Result};

#[derive(Debug)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: impl Read) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn class_name(&self) -> Result<&str> {
        // The value of the this_class item must be a valid index into the constant_pool table.
        // The constant_pool entry at that index must be a CONSTANT_Class_info structure (§4.4.1)
        // representing the class or interface defined by this class file.
        self.constant_pool.class_name(self.this_class)
    }

    /// `None` for the class Object, the only class without a direct
    /// superclass; its super_class item is zero.
    pub fn super_class(&self) -> Result<Option<&str>> {
        if self.super_class == 0 {
            return Ok(None);
        }

        Ok(Some(self.constant_pool.class_name(self.super_class)?))
    }

    pub fn field_name(&self, field: &FieldInfo) -> Result<&str> {
        self.constant_pool.get_utf8(field.name_index)
    }

    pub fn field_descriptor(&self, field: &FieldInfo) -> Result<&str> {
        self.constant_pool.get_utf8(field.descriptor_index)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<&str> {
        self.constant_pool.get_utf8(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<&str> {
        self.constant_pool.get_utf8(method.descriptor_index)
    }
}

#[derive(Debug)]
pub struct FieldInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

#[derive(Debug)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
