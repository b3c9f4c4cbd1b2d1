use bitflags::bitflags;

bitflags! {
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

impl AccessFlags {
    /// Space-separated modifier keywords in declaration order.
    pub fn keywords(&self) -> String {
        [
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::PRIVATE, "private"),
            (AccessFlags::PROTECTED, "protected"),
            (AccessFlags::STATIC, "static"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::SUPER, "super"),
            (AccessFlags::NATIVE, "native"),
            (AccessFlags::INTERFACE, "interface"),
            (AccessFlags::ABSTRACT, "abstract"),
            (AccessFlags::SYNTHETIC, "synthetic"),
            (AccessFlags::ANNOTATION, "annotation"),
            (AccessFlags::ENUM, "enum"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, word)| *word)
        .collect::<Vec<_>>()
        .join(" ")
    }
}
