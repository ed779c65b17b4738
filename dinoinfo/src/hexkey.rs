//! Hex key arguments
//! 十六进制键参数

use std::{fmt, str::FromStr};

/// Key bytes from a hex string; an odd trailing nibble is dropped
/// 由十六进制串得到的键；末尾单个半字节被丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexKey {
  pub bytes: Vec<u8>,
  pub odd: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadHex(pub String);

impl fmt::Display for BadHex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid hex key '{}'", self.0)
  }
}

impl std::error::Error for BadHex {}

impl FromStr for HexKey {
  type Err = BadHex;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
      return Err(BadHex(s.into()));
    }
    let even = s.len() & !1;
    let bytes = hex::decode(&s[..even]).map_err(|_| BadHex(s.into()))?;
    Ok(Self {
      bytes,
      odd: s.len() != even,
    })
  }
}

/// Lowercase hex, cut to `abbrev` characters when non-zero
/// 小写十六进制，`abbrev` 非 0 时截断到该字符数
pub fn abbrev(key: &[u8], abbrev: usize) -> String {
  let mut s = hex::encode(key);
  if abbrev > 0 {
    s.truncate(abbrev);
  }
  s
}
