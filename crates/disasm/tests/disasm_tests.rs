use byteorder::{BigEndian, WriteBytesExt};
use declass_class_file::{
    attributes::Attributes, AccessFlags, Attribute, ClassFile, ClassInfo, ConstantPool, CpInfo,
    MethodInfo, NameAndTypeInfo, RefInfo,
};
use declass_disasm::{JavapRenderer, KrakatauRenderer, OutputFormat, Renderer};

fn code_attribute_info() -> Vec<u8> {
    let mut info = Vec::new();
    info.write_u16::<BigEndian>(2).unwrap(); // max_stack
    info.write_u16::<BigEndian>(1).unwrap(); // max_locals
    info.write_u32::<BigEndian>(4).unwrap(); // code_length
    info.extend_from_slice(&[0xB2, 0x00, 0x0A, 0xB1]); // getstatic #10; return
    info.write_u16::<BigEndian>(0).unwrap(); // exception_table_length
    info.write_u16::<BigEndian>(0).unwrap(); // attributes_count
    info
}

/// Class "Foo" with one static method whose body reads the field
/// Sys.out : Ljava/io/PrintStream; and returns.
fn sample_class() -> ClassFile {
    let mut pool = ConstantPool::default();
    pool.add(CpInfo::Utf8("Foo".into())).unwrap(); // 1
    pool.add(CpInfo::Class(ClassInfo { name_index: 1 })).unwrap(); // 2
    pool.add(CpInfo::Utf8("java/lang/Object".into())).unwrap(); // 3
    pool.add(CpInfo::Class(ClassInfo { name_index: 3 })).unwrap(); // 4
    pool.add(CpInfo::Utf8("Sys".into())).unwrap(); // 5
    pool.add(CpInfo::Class(ClassInfo { name_index: 5 })).unwrap(); // 6
    pool.add(CpInfo::Utf8("out".into())).unwrap(); // 7
    pool.add(CpInfo::Utf8("Ljava/io/PrintStream;".into())).unwrap(); // 8
    pool.add(CpInfo::NameAndType(NameAndTypeInfo {
        name_index: 7,
        descriptor_index: 8,
    }))
    .unwrap(); // 9
    pool.add(CpInfo::FieldRef(RefInfo {
        class_index: 6,
        name_and_type_index: 9,
    }))
    .unwrap(); // 10
    pool.add(CpInfo::Utf8("main".into())).unwrap(); // 11
    pool.add(CpInfo::Utf8("()V".into())).unwrap(); // 12
    pool.add(CpInfo::Utf8("Code".into())).unwrap(); // 13

    ClassFile {
        minor_version: 0,
        major_version: 52,
        constant_pool: pool,
        access_flags: AccessFlags::PUBLIC | AccessFlags::SUPER,
        this_class: 2,
        super_class: 4,
        interfaces: Vec::new(),
        fields: Vec::new(),
        methods: vec![MethodInfo {
            access_flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
            name_index: 11,
            descriptor_index: 12,
            attributes: Attributes(vec![Attribute {
                attribute_name_index: 13,
                info: code_attribute_info(),
            }]),
        }],
        attributes: Attributes(Vec::new()),
    }
}

fn render(renderer: &dyn Renderer, class_file: &ClassFile) -> String {
    let mut out = Vec::new();
    renderer.render(class_file, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_krakatau_class_header() {
    let text = render(&KrakatauRenderer, &sample_class());
    assert!(text.starts_with(".class public super Foo\n.super java/lang/Object\n"));
}

#[test]
fn test_krakatau_method_directives() {
    let text = render(&KrakatauRenderer, &sample_class());
    assert!(text.contains(".method public static main : ()V\n"));
    assert!(text.contains("    .limit stack 2\n"));
    assert!(text.contains("    .limit locals 1\n"));
    assert!(text.contains(".end method\n"));
}

#[test]
fn test_krakatau_resolves_field_refs() {
    let text = render(&KrakatauRenderer, &sample_class());
    assert!(text.contains("    getstatic Sys out Ljava/io/PrintStream;\n"));
    assert!(text.contains("    return\n"));
}

#[test]
fn test_javap_summary() {
    let text = render(&JavapRenderer, &sample_class());
    assert!(text.starts_with("Java Class Version: 52.0\n"));
    assert!(text.contains("  flags: public super\n"));
    assert!(text.contains("  this: #2\n"));
    assert!(text.contains("  super: #4\n"));
    assert!(text.contains("  methods: 1\n"));
    assert!(text.contains("      attribute #13 Code\n"));
    assert!(text.contains("        0: getstatic 00 0a\n"));
    assert!(text.contains("        3: return\n"));
    assert!(text.contains("  constant pool: 13\n"));
    assert!(text.contains("    10 | Field[class:#6, nameType:#9]\n"));
}

#[test]
fn test_rendering_is_idempotent() {
    let class_file = sample_class();
    assert_eq!(
        render(&KrakatauRenderer, &class_file),
        render(&KrakatauRenderer, &class_file)
    );
    assert_eq!(
        render(&JavapRenderer, &class_file),
        render(&JavapRenderer, &class_file)
    );
}

#[test]
fn test_resolution_failure_aborts_only_the_render() {
    let mut class_file = sample_class();
    class_file.this_class = 40;

    assert!(KrakatauRenderer
        .render(&class_file, &mut Vec::new())
        .is_err());
    // the model stays usable for a renderer that does not resolve this_class
    assert!(JavapRenderer.render(&class_file, &mut Vec::new()).is_ok());
}

#[test]
fn test_format_selection_defaults_to_javap() {
    assert_eq!(OutputFormat::Krakatau, OutputFormat::from_name("krakatau"));
    assert_eq!(OutputFormat::Javap, OutputFormat::from_name("javap"));
    assert_eq!(OutputFormat::Javap, OutputFormat::from_name("bogus"));
}
