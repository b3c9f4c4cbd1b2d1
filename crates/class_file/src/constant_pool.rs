use std::fmt;

use crate::{ClassFileError, Result};

/// Matches a pool entry against one tuple-variant kind, resolving through
/// [`ConstantPool::get`] so reserved and out-of-range slots surface as
/// errors rather than stale data.
#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {
        match $cp.get($index)? {
            $crate::CpInfo::$i(ref n) => Ok(n),
            c => Err($crate::ClassFileError::UnexpectedConstantPoolEntry(
                stringify!($i),
                c.clone(),
            )),
        }
    };
}

#[derive(Debug, Default)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CpInfo> {
        self.cp_infos.iter()
    }

    /// Entries are indexed from 1; slot 0 is reserved by the format, and
    /// the shadow slot behind a Long or Double is unusable.
    pub fn get(&self, index: u16) -> Result<&CpInfo> {
        let cp_info = index
            .checked_sub(1)
            .and_then(|i| self.cp_infos.get(i as usize))
            .ok_or(ClassFileError::InvalidPoolIndex(index))?;

        match cp_info {
            CpInfo::Unusable => Err(ClassFileError::InvalidPoolIndex(index)),
            cp_info => Ok(cp_info),
        }
    }

    pub fn get_utf8(&self, index: u16) -> Result<&str> {
        matches_cp_info!(self, index, Utf8)
    }

    /// Class entry at `index`, resolved down to its Utf8 name.
    pub fn class_name(&self, index: u16) -> Result<&str> {
        let ClassInfo { name_index } = matches_cp_info!(self, index, Class)?;
        self.get_utf8(*name_index)
    }

    /// String entry at `index`, resolved down to its Utf8 text.
    pub fn string_text(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            CpInfo::String { string_index } => self.get_utf8(*string_index),
            c => Err(ClassFileError::UnexpectedConstantPoolEntry(
                "String",
                c.clone(),
            )),
        }
    }

    pub fn name_and_type(&self, index: u16) -> Result<(&str, &str)> {
        let NameAndTypeInfo {
            name_index,
            descriptor_index,
        } = matches_cp_info!(self, index, NameAndType)?;

        Ok((self.get_utf8(*name_index)?, self.get_utf8(*descriptor_index)?))
    }

    /// Walks a Fieldref, Methodref or InterfaceMethodref down to its three
    /// Utf8 leaves: owner class name, member name and descriptor.
    pub fn member_ref(&self, index: u16) -> Result<MemberRef> {
        let ref_info = match self.get(index)? {
            CpInfo::FieldRef(r) | CpInfo::MethodRef(r) | CpInfo::InterfaceMethodRef(r) => r,
            c => {
                return Err(ClassFileError::UnexpectedConstantPoolEntry(
                    "FieldRef, MethodRef or InterfaceMethodRef",
                    c.clone(),
                ))
            }
        };

        let (name, descriptor) = self.name_and_type(ref_info.name_and_type_index)?;

        Ok(MemberRef {
            class_name: self.class_name(ref_info.class_index)?,
            name,
            descriptor,
        })
    }

    /// Appends an entry, reserving the shadow slot behind two-slot kinds.
    /// Growth is bounded by the 16-bit declared-count domain.
    pub fn add(&mut self, cp_info: CpInfo) -> Result<u16> {
        if self.cp_infos.len() + cp_info.slot_size() > u16::MAX as usize - 1 {
            return Err(ClassFileError::ConstantPoolOverflow);
        }

        let index = self.cp_infos.len() as u16 + 1;
        let slot_size = cp_info.slot_size();
        self.cp_infos.push(cp_info);
        (1..slot_size).for_each(|_| self.cp_infos.push(CpInfo::Unusable));

        Ok(index)
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

/// A member reference resolved down to text, shared by every renderer.
#[derive(Debug, PartialEq, Eq)]
pub struct MemberRef<'a> {
    pub class_name: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    MethodRef(RefInfo),
    FieldRef(RefInfo),
    Float(f32),
    InterfaceMethodRef(RefInfo),
    Class(ClassInfo),
    NameAndType(NameAndTypeInfo),
    Utf8(String),
    String { string_index: u16 },
    InvokeDynamic(InvokeDynamicInfo),
    Integer(i32),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    Long(i64),
    Double(f64),
    Dynamic(DynamicInfo),
    Module { name_index: u16 },
    Package { name_index: u16 },
    Unusable,
}
impl CpInfo {
    /// Long and Double take two pool slots; everything else takes one.
    pub fn slot_size(&self) -> usize {
        match self {
            CpInfo::Long(_) | CpInfo::Double(_) => 2,
            _ => 1,
        }
    }
}
impl fmt::Display for CpInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpInfo::Utf8(s) => write!(f, "{}", s),
            CpInfo::Integer(n) => write!(f, "Integer[{}]", n),
            CpInfo::Float(n) => write!(f, "Float[{}]", n),
            CpInfo::Long(n) => write!(f, "Long[{}]", n),
            CpInfo::Double(n) => write!(f, "Double[{}]", n),
            CpInfo::Class(c) => write!(f, "Class[#{}]", c.name_index),
            CpInfo::String { string_index } => write!(f, "String[#{}]", string_index),
            CpInfo::FieldRef(r) => write!(
                f,
                "Field[class:#{}, nameType:#{}]",
                r.class_index, r.name_and_type_index
            ),
            CpInfo::MethodRef(r) => write!(
                f,
                "Method[class:#{}, nameType:#{}]",
                r.class_index, r.name_and_type_index
            ),
            CpInfo::InterfaceMethodRef(r) => write!(
                f,
                "InterfaceMethod[class:#{}, nameType:#{}]",
                r.class_index, r.name_and_type_index
            ),
            CpInfo::NameAndType(n) => write!(
                f,
                "NameType[name:#{}, descriptor:#{}]",
                n.name_index, n.descriptor_index
            ),
            CpInfo::MethodHandle(m) => write!(
                f,
                "MethodHandle[kind:{}, ref:#{}]",
                m.reference_kind, m.reference_index
            ),
            CpInfo::MethodType(m) => write!(f, "MethodType[descriptor:#{}]", m.descriptor_index),
            CpInfo::InvokeDynamic(i) => write!(
                f,
                "InvokeDynamic[bootstrap:{}, nameType:#{}]",
                i.bootstrap_method_attr_index, i.name_and_type_index
            ),
            CpInfo::Dynamic(d) => write!(
                f,
                "Dynamic[bootstrap:{}, nameType:#{}]",
                d.bootstrap_method_attr_index, d.name_and_type_index
            ),
            CpInfo::Module { name_index } => write!(f, "Module[#{}]", name_index),
            CpInfo::Package { name_index } => write!(f, "Package[#{}]", name_index),
            CpInfo::Unusable => write!(f, "(reserved)"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    // The value of the name_index item must be a valid index into the constant_pool table.
    // The constant_pool entry at that index must be a CONSTANT_Utf8_info structure (§4.4.7)
    // representing a valid binary class or interface name encoded in internal form (§4.2.1).
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvokeDynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}

#[cfg(test)]
mod constant_pool_tests {
    use super::*;

    fn sample_pool() -> ConstantPool {
        let mut pool = ConstantPool::default();
        pool.add(CpInfo::Utf8("Foo".into())).unwrap(); // 1
        pool.add(CpInfo::Class(ClassInfo { name_index: 1 })).unwrap(); // 2
        pool.add(CpInfo::Long(42)).unwrap(); // 3, shadows 4
        pool.add(CpInfo::Utf8("after".into())).unwrap(); // 5
        pool
    }

    #[test]
    fn it_should_reject_index_zero() {
        assert!(matches!(
            sample_pool().get(0),
            Err(ClassFileError::InvalidPoolIndex(0))
        ));
    }

    #[test]
    fn it_should_reject_out_of_range_indices() {
        assert!(matches!(
            sample_pool().get(6),
            Err(ClassFileError::InvalidPoolIndex(6))
        ));
    }

    #[test]
    fn it_should_reserve_the_slot_behind_a_long() {
        let pool = sample_pool();
        assert!(matches!(
            pool.get(4),
            Err(ClassFileError::InvalidPoolIndex(4))
        ));
        assert_eq!("after", pool.get_utf8(5).unwrap());
    }

    #[test]
    fn it_should_resolve_utf8_entries() {
        assert_eq!("Foo", sample_pool().get_utf8(1).unwrap());
    }

    #[test]
    fn it_should_report_kind_mismatches() {
        assert!(matches!(
            sample_pool().get_utf8(2),
            Err(ClassFileError::UnexpectedConstantPoolEntry("Utf8", _))
        ));
    }

    #[test]
    fn it_should_resolve_class_names() {
        assert_eq!("Foo", sample_pool().class_name(2).unwrap());
    }

    #[test]
    fn it_should_resolve_member_refs() {
        let mut pool = ConstantPool::default();
        pool.add(CpInfo::Utf8("Sys".into())).unwrap(); // 1
        pool.add(CpInfo::Class(ClassInfo { name_index: 1 })).unwrap(); // 2
        pool.add(CpInfo::Utf8("out".into())).unwrap(); // 3
        pool.add(CpInfo::Utf8("Ljava/io/PrintStream;".into())).unwrap(); // 4
        pool.add(CpInfo::NameAndType(NameAndTypeInfo {
            name_index: 3,
            descriptor_index: 4,
        }))
        .unwrap(); // 5
        let index = pool
            .add(CpInfo::FieldRef(RefInfo {
                class_index: 2,
                name_and_type_index: 5,
            }))
            .unwrap();

        assert_eq!(
            MemberRef {
                class_name: "Sys",
                name: "out",
                descriptor: "Ljava/io/PrintStream;",
            },
            pool.member_ref(index).unwrap()
        );
    }

    #[test]
    fn it_should_reject_growth_past_the_count_domain() {
        let mut pool = ConstantPool::default();
        while pool.add(CpInfo::Integer(0)).is_ok() {}
        assert_eq!(u16::MAX as usize - 1, pool.len());
        assert!(matches!(
            pool.add(CpInfo::Integer(0)),
            Err(ClassFileError::ConstantPoolOverflow)
        ));
    }
}
