/// One row per opcode: enum variant, encoding byte, mnemonic and operand
/// shape. `from_byte`, `mnemonic` and `operand_kind` are all generated from
/// the same table so they cannot drift apart.
macro_rules! opcodes {
    ($($name:ident = $byte:literal, $mnemonic:literal, $kind:ident;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Opcode {
            $($name,)*
        }

        impl Opcode {
            pub fn from_byte(byte: u8) -> Option<Opcode> {
                match byte {
                    $($byte => Some(Opcode::$name),)*
                    _ => None,
                }
            }

            pub fn byte(self) -> u8 {
                match self {
                    $(Opcode::$name => $byte,)*
                }
            }

            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => $mnemonic,)*
                }
            }

            pub fn operand_kind(self) -> OperandKind {
                match self {
                    $(Opcode::$name => OperandKind::$kind,)*
                }
            }
        }
    };
}

opcodes! {
    Nop = 0x00, "nop", None;
    AconstNull = 0x01, "aconst_null", None;
    IconstM1 = 0x02, "iconst_m1", None;
    Iconst0 = 0x03, "iconst_0", None;
    Iconst1 = 0x04, "iconst_1", None;
    Iconst2 = 0x05, "iconst_2", None;
    Iconst3 = 0x06, "iconst_3", None;
    Iconst4 = 0x07, "iconst_4", None;
    Iconst5 = 0x08, "iconst_5", None;
    Lconst0 = 0x09, "lconst_0", None;
    Lconst1 = 0x0A, "lconst_1", None;
    Fconst0 = 0x0B, "fconst_0", None;
    Fconst1 = 0x0C, "fconst_1", None;
    Fconst2 = 0x0D, "fconst_2", None;
    Dconst0 = 0x0E, "dconst_0", None;
    Dconst1 = 0x0F, "dconst_1", None;
    Bipush = 0x10, "bipush", SignedByte;
    Sipush = 0x11, "sipush", SignedShort;
    Ldc = 0x12, "ldc", ConstantNarrow;
    LdcW = 0x13, "ldc_w", Constant;
    Ldc2W = 0x14, "ldc2_w", Constant;
    Iload = 0x15, "iload", LocalIndex;
    Lload = 0x16, "lload", LocalIndex;
    Fload = 0x17, "fload", LocalIndex;
    Dload = 0x18, "dload", LocalIndex;
    Aload = 0x19, "aload", LocalIndex;
    Iload0 = 0x1A, "iload_0", None;
    Iload1 = 0x1B, "iload_1", None;
    Iload2 = 0x1C, "iload_2", None;
    Iload3 = 0x1D, "iload_3", None;
    Lload0 = 0x1E, "lload_0", None;
    Lload1 = 0x1F, "lload_1", None;
    Lload2 = 0x20, "lload_2", None;
    Lload3 = 0x21, "lload_3", None;
    Fload0 = 0x22, "fload_0", None;
    Fload1 = 0x23, "fload_1", None;
    Fload2 = 0x24, "fload_2", None;
    Fload3 = 0x25, "fload_3", None;
    Dload0 = 0x26, "dload_0", None;
    Dload1 = 0x27, "dload_1", None;
    Dload2 = 0x28, "dload_2", None;
    Dload3 = 0x29, "dload_3", None;
    Aload0 = 0x2A, "aload_0", None;
    Aload1 = 0x2B, "aload_1", None;
    Aload2 = 0x2C, "aload_2", None;
    Aload3 = 0x2D, "aload_3", None;
    Iaload = 0x2E, "iaload", None;
    Laload = 0x2F, "laload", None;
    Faload = 0x30, "faload", None;
    Daload = 0x31, "daload", None;
    Aaload = 0x32, "aaload", None;
    Baload = 0x33, "baload", None;
    Caload = 0x34, "caload", None;
    Saload = 0x35, "saload", None;
    Istore = 0x36, "istore", LocalIndex;
    Lstore = 0x37, "lstore", LocalIndex;
    Fstore = 0x38, "fstore", LocalIndex;
    Dstore = 0x39, "dstore", LocalIndex;
    Astore = 0x3A, "astore", LocalIndex;
    Istore0 = 0x3B, "istore_0", None;
    Istore1 = 0x3C, "istore_1", None;
    Istore2 = 0x3D, "istore_2", None;
    Istore3 = 0x3E, "istore_3", None;
    Lstore0 = 0x3F, "lstore_0", None;
    Lstore1 = 0x40, "lstore_1", None;
    Lstore2 = 0x41, "lstore_2", None;
    Lstore3 = 0x42, "lstore_3", None;
    Fstore0 = 0x43, "fstore_0", None;
    Fstore1 = 0x44, "fstore_1", None;
    Fstore2 = 0x45, "fstore_2", None;
    Fstore3 = 0x46, "fstore_3", None;
    Dstore0 = 0x47, "dstore_0", None;
    Dstore1 = 0x48, "dstore_1", None;
    Dstore2 = 0x49, "dstore_2", None;
    Dstore3 = 0x4A, "dstore_3", None;
    Astore0 = 0x4B, "astore_0", None;
    Astore1 = 0x4C, "astore_1", None;
    Astore2 = 0x4D, "astore_2", None;
    Astore3 = 0x4E, "astore_3", None;
    Iastore = 0x4F, "iastore", None;
    Lastore = 0x50, "lastore", None;
    Fastore = 0x51, "fastore", None;
    Dastore = 0x52, "dastore", None;
    Aastore = 0x53, "aastore", None;
    Bastore = 0x54, "bastore", None;
    Castore = 0x55, "castore", None;
    Sastore = 0x56, "sastore", None;
    Pop = 0x57, "pop", None;
    Pop2 = 0x58, "pop2", None;
    Dup = 0x59, "dup", None;
    DupX1 = 0x5A, "dup_x1", None;
    DupX2 = 0x5B, "dup_x2", None;
    Dup2 = 0x5C, "dup2", None;
    Dup2X1 = 0x5D, "dup2_x1", None;
    Dup2X2 = 0x5E, "dup2_x2", None;
    Swap = 0x5F, "swap", None;
    Iadd = 0x60, "iadd", None;
    Ladd = 0x61, "ladd", None;
    Fadd = 0x62, "fadd", None;
    Dadd = 0x63, "dadd", None;
    Isub = 0x64, "isub", None;
    Lsub = 0x65, "lsub", None;
    Fsub = 0x66, "fsub", None;
    Dsub = 0x67, "dsub", None;
    Imul = 0x68, "imul", None;
    Lmul = 0x69, "lmul", None;
    Fmul = 0x6A, "fmul", None;
    Dmul = 0x6B, "dmul", None;
    Idiv = 0x6C, "idiv", None;
    Ldiv = 0x6D, "ldiv", None;
    Fdiv = 0x6E, "fdiv", None;
    Ddiv = 0x6F, "ddiv", None;
    Irem = 0x70, "irem", None;
    Lrem = 0x71, "lrem", None;
    Frem = 0x72, "frem", None;
    Drem = 0x73, "drem", None;
    Ineg = 0x74, "ineg", None;
    Lneg = 0x75, "lneg", None;
    Fneg = 0x76, "fneg", None;
    Dneg = 0x77, "dneg", None;
    Ishl = 0x78, "ishl", None;
    Lshl = 0x79, "lshl", None;
    Ishr = 0x7A, "ishr", None;
    Lshr = 0x7B, "lshr", None;
    Iushr = 0x7C, "iushr", None;
    Lushr = 0x7D, "lushr", None;
    Iand = 0x7E, "iand", None;
    Land = 0x7F, "land", None;
    Ior = 0x80, "ior", None;
    Lor = 0x81, "lor", None;
    Ixor = 0x82, "ixor", None;
    Lxor = 0x83, "lxor", None;
    Iinc = 0x84, "iinc", LocalIndexAndConst;
    I2l = 0x85, "i2l", None;
    I2f = 0x86, "i2f", None;
    I2d = 0x87, "i2d", None;
    L2i = 0x88, "l2i", None;
    L2f = 0x89, "l2f", None;
    L2d = 0x8A, "l2d", None;
    F2i = 0x8B, "f2i", None;
    F2l = 0x8C, "f2l", None;
    F2d = 0x8D, "f2d", None;
    D2i = 0x8E, "d2i", None;
    D2l = 0x8F, "d2l", None;
    D2f = 0x90, "d2f", None;
    I2b = 0x91, "i2b", None;
    I2c = 0x92, "i2c", None;
    I2s = 0x93, "i2s", None;
    Lcmp = 0x94, "lcmp", None;
    Fcmpl = 0x95, "fcmpl", None;
    Fcmpg = 0x96, "fcmpg", None;
    Dcmpl = 0x97, "dcmpl", None;
    Dcmpg = 0x98, "dcmpg", None;
    Ifeq = 0x99, "ifeq", Branch;
    Ifne = 0x9A, "ifne", Branch;
    Iflt = 0x9B, "iflt", Branch;
    Ifge = 0x9C, "ifge", Branch;
    Ifgt = 0x9D, "ifgt", Branch;
    Ifle = 0x9E, "ifle", Branch;
    IfIcmpeq = 0x9F, "if_icmpeq", Branch;
    IfIcmpne = 0xA0, "if_icmpne", Branch;
    IfIcmplt = 0xA1, "if_icmplt", Branch;
    IfIcmpge = 0xA2, "if_icmpge", Branch;
    IfIcmpgt = 0xA3, "if_icmpgt", Branch;
    IfIcmple = 0xA4, "if_icmple", Branch;
    IfAcmpeq = 0xA5, "if_acmpeq", Branch;
    IfAcmpne = 0xA6, "if_acmpne", Branch;
    Goto = 0xA7, "goto", Branch;
    Jsr = 0xA8, "jsr", Branch;
    Ret = 0xA9, "ret", LocalIndex;
    Tableswitch = 0xAA, "tableswitch", TableSwitch;
    Lookupswitch = 0xAB, "lookupswitch", LookupSwitch;
    Ireturn = 0xAC, "ireturn", None;
    Lreturn = 0xAD, "lreturn", None;
    Freturn = 0xAE, "freturn", None;
    Dreturn = 0xAF, "dreturn", None;
    Areturn = 0xB0, "areturn", None;
    Return = 0xB1, "return", None;
    Getstatic = 0xB2, "getstatic", FieldRef;
    Putstatic = 0xB3, "putstatic", FieldRef;
    Getfield = 0xB4, "getfield", FieldRef;
    Putfield = 0xB5, "putfield", FieldRef;
    Invokevirtual = 0xB6, "invokevirtual", MethodRef;
    Invokespecial = 0xB7, "invokespecial", MethodRef;
    Invokestatic = 0xB8, "invokestatic", MethodRef;
    Invokeinterface = 0xB9, "invokeinterface", InterfaceMethodRef;
    Invokedynamic = 0xBA, "invokedynamic", DynamicCallSite;
    New = 0xBB, "new", ClassRef;
    Newarray = 0xBC, "newarray", ArrayType;
    Anewarray = 0xBD, "anewarray", ClassRef;
    Arraylength = 0xBE, "arraylength", None;
    Athrow = 0xBF, "athrow", None;
    Checkcast = 0xC0, "checkcast", ClassRef;
    Instanceof = 0xC1, "instanceof", ClassRef;
    Monitorenter = 0xC2, "monitorenter", None;
    Monitorexit = 0xC3, "monitorexit", None;
    Wide = 0xC4, "wide", Wide;
    Multianewarray = 0xC5, "multianewarray", MultiArray;
    Ifnull = 0xC6, "ifnull", Branch;
    Ifnonnull = 0xC7, "ifnonnull", Branch;
    GotoW = 0xC8, "goto_w", BranchWide;
    JsrW = 0xC9, "jsr_w", BranchWide;
    Breakpoint = 0xCA, "breakpoint", None;
    Impdep1 = 0xFE, "impdep1", None;
    Impdep2 = 0xFF, "impdep2", None;
}

/// The operand shapes an opcode can declare. Everything except the switch
/// shapes and the wide prefix has a width known without looking at the
/// operand itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    None,
    /// One-byte local variable slot.
    LocalIndex,
    /// bipush immediate.
    SignedByte,
    /// sipush immediate.
    SignedShort,
    /// One-byte constant pool index (ldc).
    ConstantNarrow,
    /// Two-byte constant pool index to a loadable constant (ldc_w, ldc2_w).
    Constant,
    /// Two-byte pool index to a Fieldref.
    FieldRef,
    /// Two-byte pool index to a Methodref.
    MethodRef,
    /// Two-byte pool index to an InterfaceMethodref, a count byte and a
    /// zero byte.
    InterfaceMethodRef,
    /// Two-byte pool index to an InvokeDynamic entry and two zero bytes.
    DynamicCallSite,
    /// Two-byte pool index to a Class entry.
    ClassRef,
    /// Two-byte pool index to a Class entry and a dimensions byte.
    MultiArray,
    /// One-byte primitive array type code (newarray).
    ArrayType,
    /// iinc: local variable slot and a signed increment.
    LocalIndexAndConst,
    /// Two-byte signed branch offset, relative to the instruction.
    Branch,
    /// Four-byte signed branch offset (goto_w, jsr_w).
    BranchWide,
    TableSwitch,
    LookupSwitch,
    Wide,
}

impl OperandKind {
    /// Operand byte count, or `None` for the shapes whose width is only
    /// known once part of the operand has been read.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            OperandKind::None => Some(0),
            OperandKind::LocalIndex
            | OperandKind::SignedByte
            | OperandKind::ConstantNarrow
            | OperandKind::ArrayType => Some(1),
            OperandKind::SignedShort
            | OperandKind::Constant
            | OperandKind::FieldRef
            | OperandKind::MethodRef
            | OperandKind::ClassRef
            | OperandKind::LocalIndexAndConst
            | OperandKind::Branch => Some(2),
            OperandKind::MultiArray => Some(3),
            OperandKind::InterfaceMethodRef
            | OperandKind::DynamicCallSite
            | OperandKind::BranchWide => Some(4),
            OperandKind::TableSwitch | OperandKind::LookupSwitch | OperandKind::Wide => None,
        }
    }
}
