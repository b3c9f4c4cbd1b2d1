use std::io::Cursor;

use byteorder::{BigEndian, WriteBytesExt};
use declass_class_file::{AccessFlags, ClassFile, ClassFileError, CpInfo, Parser, Result};

fn parse(bytes: Vec<u8>) -> Result<ClassFile> {
    Parser::new(Cursor::new(bytes)).parse()
}

fn header(constant_pool_count: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u32::<BigEndian>(0xCAFEBABE).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap(); // minor_version
    bytes.write_u16::<BigEndian>(52).unwrap(); // major_version
    bytes.write_u16::<BigEndian>(constant_pool_count).unwrap();
    bytes
}

fn write_utf8(bytes: &mut Vec<u8>, text: &str) {
    bytes.write_u8(1).unwrap();
    bytes.write_u16::<BigEndian>(text.len() as u16).unwrap();
    bytes.extend_from_slice(text.as_bytes());
}

fn write_class(bytes: &mut Vec<u8>, name_index: u16) {
    bytes.write_u8(7).unwrap();
    bytes.write_u16::<BigEndian>(name_index).unwrap();
}

/// Class "Foo" extending java/lang/Object with no interfaces, fields,
/// methods or attributes.
fn minimal_class() -> Vec<u8> {
    let mut bytes = header(5);
    write_utf8(&mut bytes, "Foo"); // 1
    write_class(&mut bytes, 1); // 2
    write_utf8(&mut bytes, "java/lang/Object"); // 3
    write_class(&mut bytes, 3); // 4
    bytes.write_u16::<BigEndian>(0x0021).unwrap(); // access_flags: public super
    bytes.write_u16::<BigEndian>(2).unwrap(); // this_class
    bytes.write_u16::<BigEndian>(4).unwrap(); // super_class
    bytes.write_u16::<BigEndian>(0).unwrap(); // interfaces_count
    bytes.write_u16::<BigEndian>(0).unwrap(); // fields_count
    bytes.write_u16::<BigEndian>(0).unwrap(); // methods_count
    bytes.write_u16::<BigEndian>(0).unwrap(); // attributes_count
    bytes
}

#[test]
fn test_invalid_magic() {
    assert!(matches!(
        parse(vec![0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0]),
        Err(ClassFileError::InvalidMagicIdentifier(0xDEADBEEF))
    ));
}

#[test]
fn test_class_name() {
    assert_eq!("Foo", parse(minimal_class()).unwrap().class_name().unwrap());
}

#[test]
fn test_super_class() {
    assert_eq!(
        Some("java/lang/Object"),
        parse(minimal_class()).unwrap().super_class().unwrap()
    );
}

#[test]
fn test_version() {
    let class_file = parse(minimal_class()).unwrap();
    assert_eq!(52, class_file.major_version);
    assert_eq!(0, class_file.minor_version);
}

#[test]
fn test_access_flags() {
    assert_eq!(
        AccessFlags::PUBLIC | AccessFlags::SUPER,
        parse(minimal_class()).unwrap().access_flags
    );
}

#[test]
fn test_truncated_input() {
    let mut bytes = minimal_class();
    bytes.truncate(bytes.len() - 9);
    assert!(matches!(
        parse(bytes),
        Err(ClassFileError::TruncatedInput(_))
    ));
}

#[test]
fn test_pool_index_bounds() {
    let class_file = parse(minimal_class()).unwrap();
    assert!(matches!(
        class_file.constant_pool.get(0),
        Err(ClassFileError::InvalidPoolIndex(0))
    ));
    assert!(matches!(
        class_file.constant_pool.get(40),
        Err(ClassFileError::InvalidPoolIndex(40))
    ));
}

#[test]
fn test_pool_kind_mismatch() {
    let class_file = parse(minimal_class()).unwrap();
    assert!(matches!(
        class_file.constant_pool.get_utf8(2),
        Err(ClassFileError::UnexpectedConstantPoolEntry("Utf8", _))
    ));
}

#[test]
fn test_long_entry_reserves_following_slot() {
    let mut bytes = header(8);
    write_utf8(&mut bytes, "Foo"); // 1
    write_class(&mut bytes, 1); // 2
    write_utf8(&mut bytes, "java/lang/Object"); // 3
    write_class(&mut bytes, 3); // 4
    bytes.write_u8(5).unwrap(); // 5: Long, shadows 6
    bytes.write_i64::<BigEndian>(-7).unwrap();
    write_utf8(&mut bytes, "tail"); // 7
    bytes.write_u16::<BigEndian>(0x0021).unwrap();
    bytes.write_u16::<BigEndian>(2).unwrap();
    bytes.write_u16::<BigEndian>(4).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();

    let class_file = parse(bytes).unwrap();
    assert!(matches!(
        class_file.constant_pool.get(5),
        Ok(CpInfo::Long(-7))
    ));
    assert!(matches!(
        class_file.constant_pool.get(6),
        Err(ClassFileError::InvalidPoolIndex(6))
    ));
    assert_eq!("tail", class_file.constant_pool.get_utf8(7).unwrap());
}

#[test]
fn test_empty_pool_parses() {
    let mut bytes = header(1);
    bytes.write_u16::<BigEndian>(0).unwrap(); // access_flags
    bytes.write_u16::<BigEndian>(0).unwrap(); // this_class
    bytes.write_u16::<BigEndian>(0).unwrap(); // super_class
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap();

    let class_file = parse(bytes).unwrap();
    assert!(class_file.constant_pool.is_empty());
    assert_eq!(None, class_file.super_class().unwrap());
}

fn code_attribute_info() -> Vec<u8> {
    let mut info = Vec::new();
    info.write_u16::<BigEndian>(2).unwrap(); // max_stack
    info.write_u16::<BigEndian>(1).unwrap(); // max_locals
    info.write_u32::<BigEndian>(1).unwrap(); // code_length
    info.write_u8(0xB1).unwrap(); // return
    info.write_u16::<BigEndian>(1).unwrap(); // exception_table_length
    info.write_u16::<BigEndian>(0).unwrap(); // start_pc
    info.write_u16::<BigEndian>(1).unwrap(); // end_pc
    info.write_u16::<BigEndian>(1).unwrap(); // handler_pc
    info.write_u16::<BigEndian>(0).unwrap(); // catch_type
    info.write_u16::<BigEndian>(0).unwrap(); // attributes_count
    info
}

fn class_with_method() -> Vec<u8> {
    let mut bytes = header(8);
    write_utf8(&mut bytes, "Foo"); // 1
    write_class(&mut bytes, 1); // 2
    write_utf8(&mut bytes, "java/lang/Object"); // 3
    write_class(&mut bytes, 3); // 4
    write_utf8(&mut bytes, "main"); // 5
    write_utf8(&mut bytes, "()V"); // 6
    write_utf8(&mut bytes, "Code"); // 7
    bytes.write_u16::<BigEndian>(0x0021).unwrap();
    bytes.write_u16::<BigEndian>(2).unwrap();
    bytes.write_u16::<BigEndian>(4).unwrap();
    bytes.write_u16::<BigEndian>(0).unwrap(); // interfaces_count
    bytes.write_u16::<BigEndian>(0).unwrap(); // fields_count
    bytes.write_u16::<BigEndian>(1).unwrap(); // methods_count
    bytes.write_u16::<BigEndian>(0x0009).unwrap(); // public static
    bytes.write_u16::<BigEndian>(5).unwrap(); // name_index
    bytes.write_u16::<BigEndian>(6).unwrap(); // descriptor_index
    bytes.write_u16::<BigEndian>(1).unwrap(); // attributes_count
    bytes.write_u16::<BigEndian>(7).unwrap(); // attribute_name_index
    let info = code_attribute_info();
    bytes.write_u32::<BigEndian>(info.len() as u32).unwrap();
    bytes.extend_from_slice(&info);
    bytes.write_u16::<BigEndian>(0).unwrap(); // class attributes_count
    bytes
}

#[test]
fn test_method_names_and_descriptors() {
    let class_file = parse(class_with_method()).unwrap();
    let method = &class_file.methods[0];
    assert_eq!("main", class_file.method_name(method).unwrap());
    assert_eq!("()V", class_file.method_descriptor(method).unwrap());
    assert_eq!(
        AccessFlags::PUBLIC | AccessFlags::STATIC,
        method.access_flags
    );
}

#[test]
fn test_code_attribute_decoding() {
    let class_file = parse(class_with_method()).unwrap();
    let code = class_file.methods[0]
        .attributes
        .code_attribute(&class_file.constant_pool)
        .unwrap()
        .expect("method should carry a Code attribute");

    assert_eq!(2, code.max_stack);
    assert_eq!(1, code.max_locals);
    assert_eq!(vec![0xB1], code.code);
    assert_eq!(1, code.exception_table.len());
    assert!(code.exception_table[0].is_catch_all());
}

#[test]
fn test_code_attribute_absent() {
    let class_file = parse(minimal_class()).unwrap();
    assert!(class_file
        .attributes
        .code_attribute(&class_file.constant_pool)
        .unwrap()
        .is_none());
}

#[test]
fn test_oversized_attribute_length_rejected() {
    let mut bytes = minimal_class();
    let last = bytes.len() - 2;
    bytes[last] = 0; // attributes_count = 1
    bytes[last + 1] = 1;
    bytes.write_u16::<BigEndian>(1).unwrap(); // attribute_name_index
    bytes.write_u32::<BigEndian>(u32::MAX).unwrap(); // attribute_length

    assert!(matches!(
        parse(bytes),
        Err(ClassFileError::OversizedLength {
            field: "attribute info",
            length: u32::MAX,
        })
    ));
}
