//! Name table
//! 名字表

use dino_fs::{ReadAt, read_vec_at};
use memchr::memchr;

use crate::{Dhdr, Result};

/// NUL-terminated names packed back to back
/// 首尾相接、以 NUL 结尾的名字
#[derive(Debug, Clone, Default)]
pub struct Namtab {
  data: Vec<u8>,
}

/// One entry of the name table
/// 名字表中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name<'a> {
  pub off: usize,
  pub bytes: &'a [u8],
  /// Ended by a NUL rather than by the table end
  /// 以 NUL 结束而非表尾
  pub nul: bool,
}

impl Namtab {
  #[inline]
  pub fn new(data: Vec<u8>) -> Self {
    Self { data }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  /// Raw name bytes at `off`, without the NUL
  /// `off` 处的名字字节，不含 NUL
  pub fn entry(&self, off: usize) -> Option<Name<'_>> {
    let rest = self.data.get(off..).filter(|r| !r.is_empty())?;
    Some(match memchr(0, rest) {
      Some(end) => Name {
        off,
        bytes: &rest[..end],
        nul: true,
      },
      None => Name {
        off,
        bytes: rest,
        nul: false,
      },
    })
  }

  /// UTF-8 name at `off`; out of range or invalid gives `None`
  /// `off` 处的 UTF-8 名字；越界或非法返回 `None`
  #[inline]
  pub fn get(&self, off: usize) -> Option<&str> {
    std::str::from_utf8(self.entry(off)?.bytes).ok()
  }

  /// Offset of `name`, if present as a whole entry
  /// `name` 作为完整条目时的偏移
  pub fn find(&self, name: &str) -> Option<usize> {
    self.iter().find(|n| n.bytes == name.as_bytes()).map(|n| n.off)
  }

  #[inline]
  pub fn iter(&self) -> Names<'_> {
    Names { tab: self, off: 0 }
  }
}

pub struct Names<'a> {
  tab: &'a Namtab,
  off: usize,
}

impl<'a> Iterator for Names<'a> {
  type Item = Name<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    let name = self.tab.entry(self.off)?;
    self.off += name.bytes.len() + usize::from(name.nul);
    Some(name)
  }
}

/// Read `namtab_size` bytes after the section table
/// 读取段表之后的 `namtab_size` 字节
pub fn read_namtab<R: ReadAt + ?Sized>(file: &R, dhdr: &Dhdr) -> Result<Namtab> {
  let data = read_vec_at(file, dhdr.namtab_size.into(), dhdr.namtab_offset())?;
  Ok(Namtab::new(data))
}
