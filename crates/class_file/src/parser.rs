use std::io::{self, BufReader, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    attributes::{Attributes, CodeAttribute, ExceptionTableEntry},
    class_file::{FieldInfo, MethodInfo},
};

use super::{constant_pool::CpInfo, *};

type Result<T, E = ClassFileError> = std::result::Result<T, E>;
type Endian = BigEndian;

/// Declared u32 lengths above this bound are treated as corrupt rather
/// than allocated.
const MAX_PAYLOAD_LENGTH: u32 = 16 * 1024 * 1024;

pub struct Parser<R> {
    r: BufReader<R>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16("access_flags")?);
        let this_class = self.read_u16("this_class")?;
        let super_class = self.read_u16("super_class")?;

        let interfaces_count = self.read_u16("interfaces_count")?;
        let interfaces = (0..interfaces_count)
            .map(|_| self.read_u16("interfaces"))
            .collect::<Result<Vec<_>>>()?;

        let fields_count = self.read_u16("fields_count")?;
        let fields = (0..fields_count)
            .map(|_| self.parse_field_info())
            .collect::<Result<Vec<_>>>()?;

        let methods_count = self.read_u16("methods_count")?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info())
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.read_u16("attributes_count")?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    fn parse_field_info(&mut self) -> Result<FieldInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16("field access_flags")?);
        let name_index = self.read_u16("field name_index")?;
        let descriptor_index = self.read_u16("field descriptor_index")?;
        let attributes_count = self.read_u16("field attributes_count")?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_method_info(&mut self) -> Result<MethodInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16("method access_flags")?);
        let name_index = self.read_u16("method name_index")?;
        let descriptor_index = self.read_u16("method descriptor_index")?;
        let attributes_count = self.read_u16("method attributes_count")?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.read_u32("magic")? {
            0xCAFEBABE => Ok(()),
            magic_identifier => Err(ClassFileError::InvalidMagicIdentifier(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.read_u16("minor_version")?;
        let major = self.read_u16("major_version")?;
        Ok((major, minor))
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.read_u16("constant_pool_count")?;

        let mut remaining = constant_pool_count.saturating_sub(1) as usize;
        let mut cp_infos = Vec::with_capacity(remaining);
        while remaining > 0 {
            let (cp_info, slot_size) = self.parse_cp_info()?;
            remaining = remaining
                .checked_sub(slot_size)
                .ok_or(ClassFileError::WideConstantOverrun(constant_pool_count))?;

            cp_infos.push(cp_info);
            (1..slot_size).for_each(|_| cp_infos.push(CpInfo::Unusable));
        }
        Ok(ConstantPool::new(cp_infos))
    }

    fn parse_cp_info(&mut self) -> Result<(CpInfo, usize)> {
        let tag = self.read_u8("cp info tag")?;
        let (cp_info, slot_size) = match tag {
            1 => (self.parse_utf8()?, 1),
            3 => (self.parse_integer()?, 1),
            4 => (self.parse_float()?, 1),
            5 => (self.parse_long()?, 2),
            6 => (self.parse_double()?, 2),
            7 => (self.parse_class_info()?, 1),
            8 => (self.parse_string()?, 1),
            9 => (self.parse_field_ref()?, 1),
            10 => (self.parse_method_ref()?, 1),
            11 => (self.parse_interface_method_ref()?, 1),
            12 => (self.parse_name_and_type_info()?, 1),
            15 => (self.parse_method_handle()?, 1),
            16 => (self.parse_method_type_info()?, 1),
            17 => (self.parse_dynamic_info()?, 1),
            18 => (self.parse_invoke_dynamic_info()?, 1),
            19 => (self.parse_module_info()?, 1),
            20 => (self.parse_package_info()?, 1),
            _ => return Err(ClassFileError::InvalidCpInfoTag(tag)),
        };

        Ok((cp_info, slot_size))
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16("Utf8 length")?;
        let bytes = self.read_bytes(length as u32, "Utf8 bytes")?;

        Ok(CpInfo::Utf8(String::from_utf8_lossy(&bytes).into()))
    }

    fn parse_integer(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::Integer(self.read_i32("Integer bytes")?))
    }

    fn parse_float(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::Float(f32::from_bits(self.read_u32("Float bytes")?)))
    }

    fn parse_long(&mut self) -> Result<CpInfo> {
        let high_bytes = self.read_u32("Long high_bytes")?;
        let low_bytes = self.read_u32("Long low_bytes")?;

        Ok(CpInfo::Long(((high_bytes as i64) << 32) | low_bytes as i64))
    }

    fn parse_double(&mut self) -> Result<CpInfo> {
        let high_bytes = self.read_u32("Double high_bytes")?;
        let low_bytes = self.read_u32("Double low_bytes")?;

        Ok(CpInfo::Double(f64::from_bits(
            ((high_bytes as u64) << 32) | low_bytes as u64,
        )))
    }

    fn parse_class_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16("Class name_index")?;

        Ok(CpInfo::Class(constant_pool::ClassInfo { name_index }))
    }

    fn parse_string(&mut self) -> Result<CpInfo> {
        let string_index = self.read_u16("String string_index")?;

        Ok(CpInfo::String { string_index })
    }

    fn parse_field_ref(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::FieldRef(self.parse_ref_info()?))
    }

    fn parse_method_ref(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::MethodRef(self.parse_ref_info()?))
    }

    fn parse_interface_method_ref(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::InterfaceMethodRef(self.parse_ref_info()?))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16("NameAndType name_index")?;
        let descriptor_index = self.read_u16("NameAndType descriptor_index")?;

        Ok(CpInfo::NameAndType(constant_pool::NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.read_u8("MethodHandle reference_kind")?;
        let reference_index = self.read_u16("MethodHandle reference_index")?;

        Ok(CpInfo::MethodHandle(constant_pool::MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_method_type_info(&mut self) -> Result<CpInfo> {
        let descriptor_index = self.read_u16("MethodType descriptor_index")?;

        Ok(CpInfo::MethodType(constant_pool::MethodTypeInfo {
            descriptor_index,
        }))
    }

    fn parse_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index = self.read_u16("Dynamic bootstrap_method_attr_index")?;
        let name_and_type_index = self.read_u16("Dynamic name_and_type_index")?;

        Ok(CpInfo::Dynamic(constant_pool::DynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_invoke_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index =
            self.read_u16("InvokeDynamic bootstrap_method_attr_index")?;
        let name_and_type_index = self.read_u16("InvokeDynamic name_and_type_index")?;

        Ok(CpInfo::InvokeDynamic(constant_pool::InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_module_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16("Module name_index")?;

        Ok(CpInfo::Module { name_index })
    }

    fn parse_package_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16("Package name_index")?;

        Ok(CpInfo::Package { name_index })
    }

    fn parse_ref_info(&mut self) -> Result<constant_pool::RefInfo> {
        let class_index = self.read_u16("ref class_index")?;
        let name_and_type_index = self.read_u16("ref name_and_type_index")?;

        Ok(constant_pool::RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.read_u16("attribute_name_index")?;
        let attribute_length = self.read_u32("attribute_length")?;
        let info = self.read_bytes(attribute_length, "attribute info")?;

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    pub fn parse_code_attribute(&mut self) -> Result<CodeAttribute> {
        let max_stack = self.read_u16("max_stack")?;
        let max_locals = self.read_u16("max_locals")?;
        let code_length = self.read_u32("code_length")?;
        let code = self.read_bytes(code_length, "code")?;
        let exception_table_length = self.read_u16("exception_table_length")?;
        let exception_table = (0..exception_table_length)
            .map(|_| self.parse_exception_table_entry())
            .collect::<Result<Vec<_>>>()?;
        let attributes_count = self.read_u16("code attributes_count")?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
            exception_table,
            attributes,
        })
    }

    fn parse_exception_table_entry(&mut self) -> Result<ExceptionTableEntry> {
        let start_pc = self.read_u16("exception start_pc")?;
        let end_pc = self.read_u16("exception end_pc")?;
        let handler_pc = self.read_u16("exception handler_pc")?;
        let catch_type = self.read_u16("exception catch_type")?;

        Ok(ExceptionTableEntry {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        })
    }

    fn parse_attributes(&mut self, attributes_count: u16) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    fn read_bytes(&mut self, length: u32, field: &'static str) -> Result<Vec<u8>> {
        if length > MAX_PAYLOAD_LENGTH {
            return Err(ClassFileError::OversizedLength { field, length });
        }

        let mut bytes = vec![0u8; length as usize];
        self.r
            .read_exact(&mut bytes)
            .map_err(|e| Self::truncated(e, field))?;
        Ok(bytes)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.r
            .read_u32::<Endian>()
            .map_err(|e| Self::truncated(e, field))
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.r
            .read_u16::<Endian>()
            .map_err(|e| Self::truncated(e, field))
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.r.read_u8().map_err(|e| Self::truncated(e, field))
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.r
            .read_i32::<Endian>()
            .map_err(|e| Self::truncated(e, field))
    }

    fn truncated(e: io::Error, field: &'static str) -> ClassFileError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ClassFileError::TruncatedInput(field)
        } else {
            ClassFileError::IOError(e)
        }
    }
}



#[cfg(test)]
mod read_bytes_tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn it_should_reject_lengths_above_the_allocation_limit() {
        assert!(matches!(
            Parser::new(Cursor::new([])).read_bytes(u32::MAX, "attribute info"),
            Err(ClassFileError::OversizedLength {
                field: "attribute info",
                length: u32::MAX,
            })
        ));
    }
}
