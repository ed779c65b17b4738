//! Index shape decoded from the section info word
//! 由段 info 字解码出的索引形态

use crate::{Error, Result};

pub mod flag {
  /// Fanout table absent on disk
  /// 磁盘上无 fanout 表
  pub const NOFANOUT: u8 = 1 << 0;
  pub const BIT64: u8 = 1 << 1;
  pub const UNC_SIZE: u8 = 1 << 2;
  pub const KNOWN: u8 = NOFANOUT | BIT64 | UNC_SIZE;
}

/// Entries in the fanout table
/// fanout 表项数
pub const FANOUT_LEN: usize = 256;
pub const FANOUT_SIZE: usize = FANOUT_LEN * 4;

/// Info word lanes, LSB first: keysize | othersec | flags | version
/// info 字从低到高：keysize | othersec | flags | version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
  pub keysize: u8,
  pub othersec: u8,
  pub flags: u8,
}

impl Shape {
  pub fn new(keysize: u8, othersec: u8, flags: u8) -> Result<Self> {
    if keysize == 0 {
      return Err(Error::ZeroKeySize);
    }
    if flags & !flag::KNOWN != 0 {
      return Err(Error::UnknownFlags(flags));
    }
    Ok(Self {
      keysize,
      othersec,
      flags,
    })
  }

  pub fn from_info(info: u32) -> Result<Self> {
    let [keysize, othersec, flags, version] = info.to_le_bytes();
    if version != 0 {
      return Err(Error::UnknownVersion(version));
    }
    Self::new(keysize, othersec, flags)
  }

  #[inline]
  pub fn to_info(&self) -> u32 {
    u32::from_le_bytes([self.keysize, self.othersec, self.flags, 0])
  }

  #[inline]
  pub fn nofanout(&self) -> bool {
    self.flags & flag::NOFANOUT != 0
  }

  #[inline]
  pub fn val_shape(&self) -> ValShape {
    ValShape::from_flags(self.flags)
  }

  #[inline]
  pub fn valsize(&self) -> usize {
    self.val_shape().size()
  }

  /// Payload bytes for `count` entries
  /// `count` 项所需的负载字节数
  pub fn payload_size(&self, count: u64) -> Option<u64> {
    let fanout = if self.nofanout() { 0 } else { FANOUT_SIZE as u64 };
    let item = (usize::from(self.keysize) + self.valsize()) as u64;
    count.checked_mul(item)?.checked_add(fanout)
  }
}

/// Value layout selected by `BIT64` and `UNC_SIZE`
/// 由 `BIT64` 与 `UNC_SIZE` 选择的值布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValShape {
  V32,
  Unc32,
  V64,
  Unc64,
}

impl ValShape {
  pub fn from_flags(flags: u8) -> Self {
    match (flags & flag::BIT64 != 0, flags & flag::UNC_SIZE != 0) {
      (false, false) => Self::V32,
      (false, true) => Self::Unc32,
      (true, false) => Self::V64,
      (true, true) => Self::Unc64,
    }
  }

  #[inline]
  pub fn size(self) -> usize {
    match self {
      Self::V32 => 8,
      Self::Unc32 => 12,
      Self::V64 => 16,
      Self::Unc64 => 24,
    }
  }

  #[inline]
  pub fn has_unc(self) -> bool {
    matches!(self, Self::Unc32 | Self::Unc64)
  }
}

/// Location of an indexed item inside the other section
/// 被索引项在关联段中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Val {
  pub offset: u64,
  pub size: u64,
  pub unc_size: Option<u64>,
}

impl Val {
  #[inline]
  pub fn new(offset: u64, size: u64) -> Self {
    Self {
      offset,
      size,
      unc_size: None,
    }
  }

  #[inline]
  pub fn unc(mut self, unc_size: u64) -> Self {
    self.unc_size = Some(unc_size);
    self
  }
}
