use std::io::{Cursor, Write};

use declass_bytecode::decode;
use declass_class_file::{ClassFile, Parser};

use crate::{Renderer, Result};

/// javap-style structural summary: header fields, per-method attribute
/// listing with decoded bytecode, and a full constant pool dump.
pub struct JavapRenderer;

impl Renderer for JavapRenderer {
    fn render(&self, class_file: &ClassFile, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "Java Class Version: {}.{}",
            class_file.major_version, class_file.minor_version
        )?;
        writeln!(w, "  flags: {}", class_file.access_flags.keywords())?;
        writeln!(w, "  this: #{}", class_file.this_class)?;
        writeln!(w, "  super: #{}", class_file.super_class)?;
        writeln!(w, "  interfaces: {}", class_file.interfaces.len())?;
        writeln!(w, "  fields: {}", class_file.fields.len())?;
        writeln!(w, "  methods: {}", class_file.methods.len())?;

        for method in &class_file.methods {
            writeln!(w, "    method #{}", method.name_index)?;
            for attribute in &method.attributes.0 {
                let name = class_file
                    .constant_pool
                    .get_utf8(attribute.attribute_name_index)?;
                writeln!(
                    w,
                    "      attribute #{} {}",
                    attribute.attribute_name_index, name
                )?;

                if name == "Code" {
                    let code = Parser::new(Cursor::new(&attribute.info)).parse_code_attribute()?;
                    writeln!(w, "      code:")?;
                    for instruction in decode(&code.code)? {
                        writeln!(w, "        {}", instruction)?;
                    }
                }
            }
        }

        writeln!(w, "  attributes: {}", class_file.attributes.0.len())?;
        writeln!(w, "  constant pool: {}", class_file.constant_pool.len())?;
        for (index, cp_info) in class_file.constant_pool.iter().enumerate() {
            writeln!(w, "    {} | {}", index + 1, cp_info)?;
        }

        Ok(())
    }
}
