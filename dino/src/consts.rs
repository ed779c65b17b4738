//! Header and section identifiers
//! 头部与段的标识符

/// Magic bytes; the low nibble of the last byte is the format major version
/// 魔数；末字节低 4 位为格式主版本
pub const MAGIC: [u8; 4] = [0xed, 0xab, 0xee, 0xf0];

/// Resolved 64-bit size/count that pointed outside the side table
/// 指向边表之外的 64 位大小/计数
pub const INVALID64: u64 = u64::MAX;

/// Size/count field that refers into the side table
/// 指向边表的大小/计数字段
pub const SIZE64_FLAG: u32 = 0x8000_0000;
pub const SIZE64_MASK: u32 = 0x7fff_ffff;

pub mod encoding {
  pub const LSB: u8 = 1;
  pub const MSB: u8 = 2;
  pub const ORDER_MASK: u8 = 0b11;
  /// 64-bit side table follows the section descriptors
  /// 段描述符后跟 64 位边表
  pub const SEC64: u8 = 1 << 2;
  pub const KNOWN: u8 = ORDER_MASK | SEC64;
}

pub mod sec_flag {
  pub const COMPRESSED: u8 = 1 << 0;
  pub const VARINT: u8 = 1 << 1;
}

/// Architecture tag, ELF `EM_*` numbering
/// 架构标记，使用 ELF `EM_*` 编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arch(pub u8);

impl Arch {
  pub const NONE: Self = Self(0);
  pub const SPARC: Self = Self(2);
  pub const X86: Self = Self(3);
  pub const MIPS: Self = Self(8);
  pub const PPC: Self = Self(20);
  pub const PPC64: Self = Self(21);
  pub const S390: Self = Self(22);
  pub const ARM: Self = Self(40);
  pub const ALPHA: Self = Self(41);
  pub const SH: Self = Self(42);
  pub const SPARCV9: Self = Self(43);
  pub const IA64: Self = Self(50);
  pub const MIPSX: Self = Self(51);
  pub const X86_64: Self = Self(62);
  pub const NDS32: Self = Self(167);
  pub const AARCH64: Self = Self(183);
  pub const RISCV: Self = Self(243);

  pub fn name(self) -> Option<&'static str> {
    Some(match self {
      Self::NONE => "none",
      Self::SPARC => "sparc",
      Self::X86 => "x86",
      Self::MIPS => "mips",
      Self::PPC => "ppc",
      Self::PPC64 => "ppc64",
      Self::S390 => "s390",
      Self::ARM => "arm",
      Self::ALPHA => "alpha",
      Self::SH => "sh",
      Self::SPARCV9 => "sparcv9",
      Self::IA64 => "ia64",
      Self::MIPSX => "mipsx",
      Self::X86_64 => "x86_64",
      Self::NDS32 => "nds32",
      Self::AARCH64 => "aarch64",
      Self::RISCV => "riscv",
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Objtype(pub u8);

impl Objtype {
  pub const UNKNOWN: Self = Self(0);
  pub const ARCHIVE: Self = Self(1);
  pub const COMPONENT: Self = Self(2);
  pub const DYNIMG: Self = Self(3);
  pub const APPLICATION: Self = Self(4);
  pub const DUMP: Self = Self(5);

  pub fn name(self) -> Option<&'static str> {
    Some(match self {
      Self::UNKNOWN => "unknown",
      Self::ARCHIVE => "archive",
      Self::COMPONENT => "component",
      Self::DYNIMG => "dynimg",
      Self::APPLICATION => "application",
      Self::DUMP => "dump",
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecType(pub u8);

impl SecType {
  pub const NULL: Self = Self(0x00);
  pub const BLOB: Self = Self(0x01);
  pub const INDEX: Self = Self(0x02);
  pub const STRTAB: Self = Self(0x03);
  pub const CSTRTAB: Self = Self(0x04);
  pub const NOTE: Self = Self(0x05);
  pub const PROVS: Self = Self(0x06);
  pub const DEPS: Self = Self(0x07);
  pub const FILESYS: Self = Self(0x08);
  pub const FILEDATA: Self = Self(0x10);
  pub const FILESTAT: Self = Self(0x11);
  pub const FILETREE: Self = Self(0x12);
  pub const FILEMETA: Self = Self(0x13);
  pub const RPMHDR: Self = Self(0x7f);

  pub const LOOS: u8 = 0x60;
  pub const HIOS: u8 = 0x6f;
  pub const LOCOMPAT: u8 = 0x70;
  pub const HICOMPAT: u8 = 0x7f;
  pub const LOUSER: u8 = 0x80;

  pub fn name(self) -> Option<&'static str> {
    Some(match self {
      Self::NULL => "null",
      Self::BLOB => "blob",
      Self::INDEX => "index",
      Self::STRTAB => "strtab",
      Self::CSTRTAB => "cstrtab",
      Self::NOTE => "note",
      Self::PROVS => "provs",
      Self::DEPS => "deps",
      Self::FILESYS => "filesys",
      Self::FILEDATA => "filedata",
      Self::FILESTAT => "filestat",
      Self::FILETREE => "filetree",
      Self::FILEMETA => "filemeta",
      Self::RPMHDR => "rpmhdr",
      Self(v) if (Self::LOOS..=Self::HIOS).contains(&v) => "os",
      Self(v) if (Self::LOCOMPAT..=Self::HICOMPAT).contains(&v) => "compat",
      Self(v) if v >= Self::LOUSER => "user",
      _ => return None,
    })
  }
}
