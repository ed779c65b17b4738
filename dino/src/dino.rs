//! Open container handle
//! 已打开的容器句柄

use std::{fs::File, path::Path};

use dino_fs::{ReadAt, read_vec_at};

use crate::{
  Dhdr, Endian, Error, Index, Result, Sec, Shdr,
  consts::INVALID64,
  default,
  head::read_dhdr,
  index::Shape,
  namtab::{Namtab, Names, read_namtab},
  sectab::read_sectab,
};

pub struct Dino<R> {
  file: R,
  dhdr: Dhdr,
  endian: Endian,
  secs: Vec<Sec>,
  namtab: Namtab,
}

impl Dino<File> {
  pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path).map_err(dino_fs::Error::from)?;
    Self::open(file)
  }
}

impl<R: ReadAt> Dino<R> {
  /// Header, section table, then name table; the first failure aborts
  /// 依次读取头部、段表、名字表，任一步失败即中止
  pub fn open(file: R) -> Result<Self> {
    let dhdr = read_dhdr(&file)?;
    let endian = dhdr.endian().ok_or(Error::BadEncoding(dhdr.encoding))?;
    let secs = read_sectab(&file, &dhdr)?;
    let namtab = read_namtab(&file, &dhdr)?;
    log::debug!(
      "open dino v{}: {} sections, {} name bytes",
      dhdr.format_version(),
      secs.len(),
      namtab.len()
    );
    Ok(Self {
      file,
      dhdr,
      endian,
      secs,
      namtab,
    })
  }

  #[inline]
  pub fn file(&self) -> &R {
    &self.file
  }

  #[inline]
  pub fn dhdr(&self) -> &Dhdr {
    &self.dhdr
  }

  #[inline]
  pub fn endian(&self) -> Endian {
    self.endian
  }

  #[inline]
  pub fn secs(&self) -> &[Sec] {
    &self.secs
  }

  #[inline]
  pub fn sec(&self, idx: usize) -> Option<&Sec> {
    self.secs.get(idx)
  }

  #[inline]
  pub fn shdr(&self, idx: usize) -> Option<&Shdr> {
    Some(&self.sec(idx)?.shdr)
  }

  pub fn secidx_by_name(&self, name: &str) -> Option<usize> {
    self
      .secs
      .iter()
      .position(|s| self.sec_name(s) == Some(name))
  }

  #[inline]
  pub fn sec_by_name(&self, name: &str) -> Option<&Sec> {
    self.sec(self.secidx_by_name(name)?)
  }

  #[inline]
  pub fn namtab(&self) -> &Namtab {
    &self.namtab
  }

  #[inline]
  pub fn name(&self, off: u16) -> Option<&str> {
    self.namtab.get(off.into())
  }

  #[inline]
  pub fn sec_name(&self, sec: &Sec) -> Option<&str> {
    self.name(sec.shdr.name)
  }

  #[inline]
  pub fn names(&self) -> Names<'_> {
    self.namtab.iter()
  }

  fn valid_sec(&self, idx: usize) -> Result<&Sec> {
    let sec = self.sec(idx).ok_or(Error::NoSection(idx))?;
    if !sec.is_valid() {
      return Err(Error::InvalidSize(idx));
    }
    Ok(sec)
  }

  /// Section bytes as stored
  /// 按存储原样读取段
  pub fn read_sec(&self, idx: usize) -> Result<Vec<u8>> {
    let sec = self.valid_sec(idx)?;
    let len = usize::try_from(sec.size).map_err(|_| Error::InvalidSize(idx))?;
    Ok(read_vec_at(&self.file, len, sec.offset)?)
  }

  /// Section bytes, decompressed when flagged `COMPRESSED`
  /// 段内容，标记为 `COMPRESSED` 时解压
  pub fn read_sec_plain(&self, idx: usize) -> Result<Vec<u8>> {
    let raw = self.read_sec(idx)?;
    if self.valid_sec(idx)?.is_compressed() {
      return Ok(dino_compress::dec(self.dhdr.compress()?, &raw)?);
    }
    Ok(raw)
  }

  /// `size` bytes at `offset` inside `sec`
  /// `sec` 内 `offset` 处的 `size` 字节
  pub fn read_range(&self, sec: &Sec, offset: u64, size: u64) -> Result<Vec<u8>> {
    let range = Error::Range {
      idx: sec.idx,
      offset,
      size,
    };
    if !sec.is_valid() {
      return Err(Error::InvalidSize(sec.idx));
    }
    match offset.checked_add(size) {
      Some(end) if end <= sec.size => {}
      _ => return Err(range),
    }
    let len = usize::try_from(size).map_err(|_| range)?;
    Ok(read_vec_at(&self.file, len, sec.offset + offset)?)
  }

  /// One indexed item of `sec`, decompressed when the section is compressed
  /// `sec` 中的一个索引项，段压缩时解压
  ///
  /// Output is capped at `unc_size`, or `default::ITEM_MAX` when the index
  /// records none.
  /// 输出上限为 `unc_size`，索引未记录时为 `default::ITEM_MAX`。
  pub fn read_item(&self, sec: &Sec, val: &crate::Val) -> Result<Vec<u8>> {
    let raw = self.read_range(sec, val.offset, val.size)?;
    if sec.is_compressed() {
      let limit = val.unc_size.unwrap_or(default::ITEM_MAX);
      let limit = usize::try_from(limit).unwrap_or(usize::MAX);
      return Ok(dino_compress::dec_max(
        self.dhdr.compress()?,
        &raw,
        limit,
      )?);
    }
    Ok(raw)
  }

  /// Build the in-memory index of section `idx`
  /// 构建段 `idx` 的内存索引
  pub fn load_index(&self, idx: usize) -> Result<Index> {
    let sec = self.valid_sec(idx)?;
    if !sec.is_index() {
      return Err(Error::NotIndex(idx));
    }
    let shape = Shape::from_info(sec.shdr.info)?;
    if sec.count == INVALID64 {
      return Err(Error::InvalidSize(idx));
    }
    let count = usize::try_from(sec.count).map_err(|_| Error::InvalidSize(idx))?;
    let want = shape
      .payload_size(sec.count)
      .ok_or(Error::InvalidSize(idx))?;

    if sec.is_compressed() {
      let raw = self.read_sec(idx)?;
      let limit = usize::try_from(want).map_err(|_| Error::InvalidSize(idx))?;
      let plain = dino_compress::dec_max(self.dhdr.compress()?, &raw, limit)?;
      let got = plain.len() as u64;
      if got != want {
        return Err(Error::IndexSize { idx, want, got });
      }
      return Index::load(&plain, 0, shape, count, self.endian);
    }
    if sec.size != want {
      return Err(Error::IndexSize {
        idx,
        want,
        got: sec.size,
      });
    }
    Index::load(&self.file, sec.offset, shape, count, self.endian)
  }

  /// Load every index section; returns how many were loaded
  /// 加载全部索引段，返回加载数量
  ///
  /// Sections with an unknown index version are skipped.
  /// 未知索引版本的段被跳过。
  pub fn load_indexes(&mut self) -> Result<usize> {
    let mut n = 0;
    for idx in 0..self.secs.len() {
      if !self.secs[idx].is_index() {
        continue;
      }
      match self.load_index(idx) {
        Ok(index) => {
          self.secs[idx].index = Some(index);
          n += 1;
        }
        Err(Error::UnknownVersion(v)) => {
          log::warn!("section {idx}: skip index version {v}");
        }
        Err(e) => return Err(e),
      }
    }
    Ok(n)
  }

  #[inline]
  pub fn index(&self, idx: usize) -> Option<&Index> {
    self.sec(idx)?.index()
  }

  #[inline]
  pub fn index_by_name(&self, name: &str) -> Option<&Index> {
    self.index(self.secidx_by_name(name)?)
  }

  /// Section the index at `idx` points into
  /// 段 `idx` 上的索引所指向的段
  #[inline]
  pub fn index_othersec(&self, idx: usize) -> Option<&Sec> {
    self.sec(self.index(idx)?.othersec())
  }
}
