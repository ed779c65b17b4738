//! On-disk layouts in both byte orders
//! 两种字节序下的磁盘布局

use zerocopy::{FromBytes, IntoBytes};

use crate::{Error, Result};

/// Byte order named by the header's encoding byte
/// 头部编码字节指定的字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
  #[default]
  Little,
  Big,
}

impl Endian {
  pub fn name(self) -> &'static str {
    match self {
      Self::Little => "little-endian",
      Self::Big => "big-endian",
    }
  }
}

macro_rules! layout {
  ($order:ident) => {
    use zerocopy::{
      FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
      $order::{U16, U32, U64},
    };

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct Dhdr {
      pub magic: [u8; 4],
      pub version: u8,
      pub arch: u8,
      pub encoding: u8,
      pub objtype: u8,
      pub compress_id: u8,
      pub compress_opts: u8,
      pub reserved: u8,
      pub section_count: u8,
      pub sectab_size: U16,
      pub namtab_size: U16,
    }

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct Shdr {
      pub name: U16,
      pub sectype: u8,
      pub flags: u8,
      pub info: U32,
      pub size: U32,
      pub count: U32,
    }

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct Val32 {
      pub offset: U32,
      pub size: U32,
    }

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct ValUnc32 {
      pub offset: U32,
      pub size: U32,
      pub unc_size: U32,
    }

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct Val64 {
      pub offset: U64,
      pub size: U64,
    }

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    pub struct ValUnc64 {
      pub offset: U64,
      pub size: U64,
      pub unc_size: U64,
    }

    impl From<Dhdr> for crate::Dhdr {
      fn from(r: Dhdr) -> Self {
        Self {
          magic: r.magic,
          version: r.version,
          arch: crate::Arch(r.arch),
          encoding: r.encoding,
          objtype: crate::Objtype(r.objtype),
          compress_id: r.compress_id,
          compress_opts: r.compress_opts,
          reserved: r.reserved,
          section_count: r.section_count,
          sectab_size: r.sectab_size.get(),
          namtab_size: r.namtab_size.get(),
        }
      }
    }

    impl From<&crate::Dhdr> for Dhdr {
      fn from(d: &crate::Dhdr) -> Self {
        Self {
          magic: d.magic,
          version: d.version,
          arch: d.arch.0,
          encoding: d.encoding,
          objtype: d.objtype.0,
          compress_id: d.compress_id,
          compress_opts: d.compress_opts,
          reserved: d.reserved,
          section_count: d.section_count,
          sectab_size: d.sectab_size.into(),
          namtab_size: d.namtab_size.into(),
        }
      }
    }

    impl From<Shdr> for crate::Shdr {
      fn from(r: Shdr) -> Self {
        Self {
          name: r.name.get(),
          sectype: crate::SecType(r.sectype),
          flags: r.flags,
          info: r.info.get(),
          size: r.size.get(),
          count: r.count.get(),
        }
      }
    }

    impl From<&crate::Shdr> for Shdr {
      fn from(s: &crate::Shdr) -> Self {
        Self {
          name: s.name.into(),
          sectype: s.sectype.0,
          flags: s.flags,
          info: s.info.into(),
          size: s.size.into(),
          count: s.count.into(),
        }
      }
    }

    pub fn u32s(buf: &[u8]) -> Option<Vec<u32>> {
      let li = <[U32]>::ref_from_bytes(buf).ok()?;
      Some(li.iter().map(|v| v.get()).collect())
    }

    pub fn u64s(buf: &[u8]) -> Option<Vec<u64>> {
      let li = <[U64]>::ref_from_bytes(buf).ok()?;
      Some(li.iter().map(|v| v.get()).collect())
    }

    pub fn val(shape: crate::ValShape, b: &[u8]) -> Option<crate::Val> {
      use crate::{Val, ValShape};
      Some(match shape {
        ValShape::V32 => {
          let r = Val32::read_from_bytes(b).ok()?;
          Val::new(r.offset.get().into(), r.size.get().into())
        }
        ValShape::Unc32 => {
          let r = ValUnc32::read_from_bytes(b).ok()?;
          Val::new(r.offset.get().into(), r.size.get().into()).unc(r.unc_size.get().into())
        }
        ValShape::V64 => {
          let r = Val64::read_from_bytes(b).ok()?;
          Val::new(r.offset.get(), r.size.get())
        }
        ValShape::Unc64 => {
          let r = ValUnc64::read_from_bytes(b).ok()?;
          Val::new(r.offset.get(), r.size.get()).unc(r.unc_size.get())
        }
      })
    }

    pub fn put_val(shape: crate::ValShape, v: &crate::Val) -> crate::Result<Vec<u8>> {
      use crate::ValShape;
      let unc = v.unc_size.unwrap_or(v.size);
      Ok(match shape {
        ValShape::V32 => Val32 {
          offset: narrow(v.offset)?.into(),
          size: narrow(v.size)?.into(),
        }
        .as_bytes()
        .to_vec(),
        ValShape::Unc32 => ValUnc32 {
          offset: narrow(v.offset)?.into(),
          size: narrow(v.size)?.into(),
          unc_size: narrow(unc)?.into(),
        }
        .as_bytes()
        .to_vec(),
        ValShape::V64 => Val64 {
          offset: v.offset.into(),
          size: v.size.into(),
        }
        .as_bytes()
        .to_vec(),
        ValShape::Unc64 => ValUnc64 {
          offset: v.offset.into(),
          size: v.size.into(),
          unc_size: unc.into(),
        }
        .as_bytes()
        .to_vec(),
      })
    }

    fn narrow(v: u64) -> crate::Result<u32> {
      u32::try_from(v).map_err(|_| crate::Error::ValTooLarge(v))
    }
  };
}

pub mod le {
  layout!(little_endian);
}

pub mod be {
  layout!(big_endian);
}

pub const DHDR_SIZE: usize = size_of::<le::Dhdr>();
pub const SHDR_SIZE: usize = size_of::<le::Shdr>();

const _: () = assert!(DHDR_SIZE == 16 && SHDR_SIZE == 16);

impl Endian {
  pub(crate) fn dhdr(self, buf: &[u8]) -> Result<crate::Dhdr> {
    Ok(match self {
      Self::Little => le::Dhdr::read_from_bytes(buf).map_err(|_| Error::BadHeader)?.into(),
      Self::Big => be::Dhdr::read_from_bytes(buf).map_err(|_| Error::BadHeader)?.into(),
    })
  }

  pub(crate) fn shdrs(self, buf: &[u8]) -> Result<Vec<crate::Shdr>> {
    let li: Option<Vec<crate::Shdr>> = match self {
      Self::Little => <[le::Shdr]>::ref_from_bytes(buf)
        .map(|li| li.iter().map(|&s| s.into()).collect())
        .ok(),
      Self::Big => <[be::Shdr]>::ref_from_bytes(buf)
        .map(|li| li.iter().map(|&s| s.into()).collect())
        .ok(),
    };
    li.ok_or(Error::SectabSize {
      sectab_size: buf.len(),
      want: buf.len().next_multiple_of(SHDR_SIZE),
    })
  }

  pub fn u32s(self, buf: &[u8]) -> Option<Vec<u32>> {
    match self {
      Self::Little => le::u32s(buf),
      Self::Big => be::u32s(buf),
    }
  }

  pub fn u64s(self, buf: &[u8]) -> Option<Vec<u64>> {
    match self {
      Self::Little => le::u64s(buf),
      Self::Big => be::u64s(buf),
    }
  }

  /// Decode one index value
  /// 解码一个索引值
  pub fn val(self, shape: crate::ValShape, b: &[u8]) -> Option<crate::Val> {
    match self {
      Self::Little => le::val(shape, b),
      Self::Big => be::val(shape, b),
    }
  }

  /// Encode one index value, 32-bit shapes reject values past `u32::MAX`
  /// 编码一个索引值，32 位形态拒绝超过 `u32::MAX` 的值
  pub fn put_val(self, shape: crate::ValShape, v: &crate::Val) -> Result<Vec<u8>> {
    match self {
      Self::Little => le::put_val(shape, v),
      Self::Big => be::put_val(shape, v),
    }
  }

  /// Encode a header
  /// 编码头部
  pub fn put_dhdr(self, d: &crate::Dhdr) -> Vec<u8> {
    match self {
      Self::Little => le::Dhdr::from(d).as_bytes().to_vec(),
      Self::Big => be::Dhdr::from(d).as_bytes().to_vec(),
    }
  }

  /// Encode a section descriptor
  /// 编码段描述符
  pub fn put_shdr(self, s: &crate::Shdr) -> Vec<u8> {
    match self {
      Self::Little => le::Shdr::from(s).as_bytes().to_vec(),
      Self::Big => be::Shdr::from(s).as_bytes().to_vec(),
    }
  }

  /// Encode u32 values, as the fanout table is stored
  /// 按 fanout 表的存储方式编码 u32
  pub fn put_u32s(self, li: &[u32]) -> Vec<u8> {
    li.iter()
      .flat_map(|&v| match self {
        Self::Little => v.to_le_bytes(),
        Self::Big => v.to_be_bytes(),
      })
      .collect()
  }

  pub fn put_u64s(self, li: &[u64]) -> Vec<u8> {
    li.iter()
      .flat_map(|&v| match self {
        Self::Little => v.to_le_bytes(),
        Self::Big => v.to_be_bytes(),
      })
      .collect()
  }
}
