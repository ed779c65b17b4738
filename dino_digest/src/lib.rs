#![cfg_attr(docsrs, feature(doc_cfg))]

//! Digest ids (OpenPGP numbering) and streaming hashers
//! 摘要 id（OpenPGP 编号）与流式哈希器

mod error;

pub use error::{Error, Result};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DigestId {
  Md5 = 1,
  Sha1 = 2,
  Ripemd160 = 3,
  Sha256 = 8,
  Sha384 = 9,
  Sha512 = 10,
  Sha224 = 11,
}

impl DigestId {
  /// Preferred first when guessing from a digest size
  /// 按长度猜测时优先者在前
  pub const ALL: [Self; 7] = [
    Self::Sha256,
    Self::Sha384,
    Self::Sha512,
    Self::Sha224,
    Self::Ripemd160,
    Self::Sha1,
    Self::Md5,
  ];

  pub fn from_u8(v: u8) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|id| *id as u8 == v)
      .ok_or(Error::UnknownDigest(v))
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|id| id.name() == name)
  }

  /// First non-deprecated digest with this output size
  /// 输出长度匹配的首个未弃用摘要
  pub fn by_size(size: usize) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|id| id.size() == size && !id.deprecated())
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Md5 => "md5",
      Self::Sha1 => "sha1",
      Self::Ripemd160 => "ripemd160",
      Self::Sha256 => "sha256",
      Self::Sha384 => "sha384",
      Self::Sha512 => "sha512",
      Self::Sha224 => "sha224",
    }
  }

  /// Output size in bytes
  /// 输出字节数
  pub fn size(self) -> usize {
    match self {
      Self::Md5 => 16,
      Self::Sha1 | Self::Ripemd160 => 20,
      Self::Sha224 => 28,
      Self::Sha256 => 32,
      Self::Sha384 => 48,
      Self::Sha512 => 64,
    }
  }

  /// Broken or insecure
  /// 已失效或不安全
  pub fn deprecated(self) -> bool {
    matches!(self, Self::Md5 | Self::Sha1)
  }

  #[inline]
  pub fn avail(self) -> bool {
    matches!(
      self,
      Self::Sha224 | Self::Sha256 | Self::Sha384 | Self::Sha512
    )
  }
}

impl std::fmt::Display for DigestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

/// Streaming hasher
/// 流式哈希器
#[derive(Clone)]
pub enum Hasher {
  Sha224(Sha224),
  Sha256(Sha256),
  Sha384(Sha384),
  Sha512(Sha512),
}

impl Hasher {
  pub fn new(id: DigestId) -> Result<Self> {
    Ok(match id {
      DigestId::Sha224 => Self::Sha224(Sha224::new()),
      DigestId::Sha256 => Self::Sha256(Sha256::new()),
      DigestId::Sha384 => Self::Sha384(Sha384::new()),
      DigestId::Sha512 => Self::Sha512(Sha512::new()),
      _ => return Err(Error::Unsupported(id)),
    })
  }

  pub fn id(&self) -> DigestId {
    match self {
      Self::Sha224(_) => DigestId::Sha224,
      Self::Sha256(_) => DigestId::Sha256,
      Self::Sha384(_) => DigestId::Sha384,
      Self::Sha512(_) => DigestId::Sha512,
    }
  }

  /// Discard anything hashed so far
  /// 丢弃已哈希的内容
  pub fn start(&mut self) {
    match self {
      Self::Sha224(h) => Digest::reset(h),
      Self::Sha256(h) => Digest::reset(h),
      Self::Sha384(h) => Digest::reset(h),
      Self::Sha512(h) => Digest::reset(h),
    }
  }

  pub fn update(&mut self, data: &[u8]) {
    match self {
      Self::Sha224(h) => h.update(data),
      Self::Sha256(h) => h.update(data),
      Self::Sha384(h) => h.update(data),
      Self::Sha512(h) => h.update(data),
    }
  }

  /// Digest of everything since `start`; the hasher is reset
  /// 自 `start` 以来的摘要，之后哈希器被重置
  pub fn finish(&mut self) -> Vec<u8> {
    match self {
      Self::Sha224(h) => h.finalize_reset().to_vec(),
      Self::Sha256(h) => h.finalize_reset().to_vec(),
      Self::Sha384(h) => h.finalize_reset().to_vec(),
      Self::Sha512(h) => h.finalize_reset().to_vec(),
    }
  }
}

/// One-shot digest
/// 一次性摘要
pub fn digest(id: DigestId, data: &[u8]) -> Result<Vec<u8>> {
  let mut h = Hasher::new(id)?;
  h.update(data);
  Ok(h.finish())
}
