use crate::{Error, Result};

/// 压缩算法 Compression codec id, as stored in the container header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CompressId {
  #[default]
  None = 0,
  Zlib = 1,
  Lzma = 2,
  Lzo = 3,
  Xz = 4,
  Lz4 = 5,
  Zstd = 6,
}

impl CompressId {
  pub const ALL: [Self; 7] = [
    Self::None,
    Self::Zlib,
    Self::Lzma,
    Self::Lzo,
    Self::Xz,
    Self::Lz4,
    Self::Zstd,
  ];

  /// 从 u8 转换 Convert from u8
  #[inline]
  pub fn from_u8(v: u8) -> Result<Self> {
    Self::ALL
      .get(v as usize)
      .copied()
      .ok_or(Error::UnknownCodec(v))
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Zlib => "zlib",
      Self::Lzma => "lzma",
      Self::Lzo => "lzo",
      Self::Xz => "xz",
      Self::Lz4 => "lz4",
      Self::Zstd => "zstd",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|id| id.name() == name)
  }

  /// Built with a backend for this codec
  /// 是否有此算法的后端
  #[inline]
  pub fn avail(self) -> bool {
    matches!(self, Self::None | Self::Zstd)
  }
}

impl std::fmt::Display for CompressId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}
