#![cfg_attr(docsrs, feature(doc_cfg))]

//! Growable array of fixed-size opaque items
//! 定长不透明项的可增长数组
//!
//! Capacity grows by page fill, then doubling, then whole chunks, so small
//! arrays stay inside one page and huge ones never double past the cache.
//! 容量先填满一页，再倍增，最后按块追加：小数组占一页，大数组不会越过缓存倍增。

mod error;
mod geom;

use std::{cmp::Ordering, slice::ChunksExact};

use dino_bisect::{Stride, bisect};
use dino_fs::{ReadAt, read_exact_at};
pub use error::{Error, Result};
pub use geom::{GEOM, Geom, default};

/// Minimum items allocated on first growth
/// 首次增长的最少项数
pub const MIN_ITEMS: usize = 4;

#[derive(Debug, Clone)]
pub struct Array {
  item_size: usize,
  /// Capacity in items
  /// 以项计的容量
  cap: usize,
  /// Exactly `len * item_size` bytes
  buf: Vec<u8>,
  geom: Geom,
}

impl Array {
  /// Empty array sized by the process-wide geometry
  /// 使用进程级几何参数的空数组
  #[inline]
  pub fn new(item_size: usize) -> Result<Self> {
    Self::with_geom(item_size, *GEOM)
  }

  pub fn with_geom(item_size: usize, geom: Geom) -> Result<Self> {
    if item_size == 0 {
      return Err(Error::ZeroItemSize);
    }
    Ok(Self {
      item_size,
      cap: 0,
      buf: Vec::new(),
      geom,
    })
  }

  pub fn with_capacity(item_size: usize, cap: usize) -> Result<Self> {
    let mut a = Self::new(item_size)?;
    a.realloc(cap)?;
    Ok(a)
  }

  /// Wrap bytes already laid out as items
  /// 包装已按项排列的字节
  pub fn from_vec(item_size: usize, buf: Vec<u8>) -> Result<Self> {
    let mut a = Self::new(item_size)?;
    if buf.len() % item_size != 0 {
      return Err(Error::ItemSize {
        want: item_size,
        got: buf.len() % item_size,
      });
    }
    a.cap = buf.len() / item_size;
    a.buf = buf;
    Ok(a)
  }

  /// Read `count` items at `offset` into a new array
  /// 在 `offset` 读取 `count` 项到新数组
  pub fn read<R: ReadAt + ?Sized>(
    file: &R,
    offset: u64,
    item_size: usize,
    count: usize,
  ) -> Result<Self> {
    let mut a = Self::with_capacity(item_size, count)?;
    a.load(file, offset, count)?;
    Ok(a)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.buf.len() / self.item_size
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.buf.is_empty()
  }

  #[inline]
  pub fn cap(&self) -> usize {
    self.cap
  }

  #[inline]
  pub fn item_size(&self) -> usize {
    self.item_size
  }

  #[inline]
  pub fn geom(&self) -> Geom {
    self.geom
  }

  /// Set capacity to `items`, never below `len`; returns the new capacity
  /// 将容量设为 `items`，不低于 `len`；返回新容量
  fn realloc(&mut self, items: usize) -> Result<usize> {
    let items = items.max(self.len());
    let bytes = items
      .checked_mul(self.item_size)
      .ok_or(Error::OutOfMemory { items })?;
    if items > self.cap {
      self
        .buf
        .try_reserve_exact(bytes - self.buf.len())
        .map_err(|_| Error::OutOfMemory { items })?;
    } else {
      self.buf.shrink_to(bytes);
    }
    self.cap = items;
    Ok(items)
  }

  /// Grow one step: fill a page, then double, then add a chunk
  /// 增长一步：先填满一页，再倍增，再追加一块
  pub fn grow(&mut self) -> Result<usize> {
    let size = self.cap.saturating_mul(self.item_size);
    let Geom { page, chunk } = self.geom;
    let items = if size < page {
      (page / self.item_size).max(MIN_ITEMS)
    } else if size < chunk {
      self.cap.saturating_mul(2)
    } else {
      self.cap.saturating_add((chunk / self.item_size).max(1))
    };
    self.realloc(items.max(self.cap + 1))
  }

  /// Capacity becomes at least `max(n, len)`
  /// 容量至少为 `max(n, len)`
  pub fn reserve(&mut self, n: usize) -> Result<usize> {
    if n > self.cap {
      self.realloc(n)
    } else {
      Ok(self.cap)
    }
  }

  /// Drop spare capacity
  /// 释放多余容量
  pub fn shrink(&mut self) -> Result<usize> {
    self.realloc(self.len())
  }

  /// Remove all items and free the buffer
  /// 清空并释放缓冲区
  pub fn clear(&mut self) {
    self.buf = Vec::new();
    self.cap = 0;
  }

  #[inline]
  fn check(&self, item: &[u8]) -> Result<()> {
    if item.len() != self.item_size {
      return Err(Error::ItemSize {
        want: self.item_size,
        got: item.len(),
      });
    }
    Ok(())
  }

  /// Grow one step if no slot is free
  /// 无空位时增长一步
  #[inline]
  pub fn ensure_space(&mut self) -> Result<()> {
    if self.len() >= self.cap {
      self.grow()?;
    }
    Ok(())
  }

  /// Append, returning the new length
  /// 追加，返回新长度
  pub fn push(&mut self, item: &[u8]) -> Result<usize> {
    self.check(item)?;
    self.ensure_space()?;
    self.buf.extend_from_slice(item);
    Ok(self.len())
  }

  /// Insert at `idx`, shifting later items right; returns the new length
  /// 在 `idx` 插入并右移其后各项；返回新长度
  pub fn insert(&mut self, item: &[u8], idx: usize) -> Result<usize> {
    let len = self.len();
    if idx == len {
      return self.push(item);
    }
    if idx > len {
      return Err(Error::OutOfRange { idx, len });
    }
    self.check(item)?;
    self.ensure_space()?;
    let at = idx * self.item_size;
    self.buf.splice(at..at, item.iter().copied());
    Ok(self.len())
  }

  /// Overwrite item `idx`
  /// 覆盖第 `idx` 项
  pub fn set(&mut self, item: &[u8], idx: usize) -> Result<()> {
    let len = self.len();
    if idx >= len {
      return Err(Error::OutOfRange { idx, len });
    }
    self.check(item)?;
    let at = idx * self.item_size;
    self.buf[at..at + self.item_size].copy_from_slice(item);
    Ok(())
  }

  /// Insert keeping `[base, base+num)` sorted; returns the insertion index
  /// 保持 `[base, base+num)` 有序插入；返回插入下标
  pub fn insort_range(&mut self, item: &[u8], base: usize, num: usize) -> Result<usize> {
    self.check(item)?;
    let len = self.len();
    if base > len {
      return Err(Error::OutOfRange { idx: base, len });
    }
    let idx = if num == 0 {
      base
    } else {
      bisect(item, &self.stride(), base, base.saturating_add(num), self.item_size)
    };
    self.insert(item, idx)?;
    Ok(idx)
  }

  #[inline]
  pub fn insort(&mut self, item: &[u8]) -> Result<usize> {
    self.insort_range(item, 0, self.len())
  }

  /// Sort items as raw bytes
  /// 按原始字节排序
  pub fn sort(&mut self) {
    self.sort_by(|a, b| a.cmp(b));
  }

  pub fn sort_by<F>(&mut self, mut cmp: F)
  where
    F: FnMut(&[u8], &[u8]) -> Ordering,
  {
    let sorted = {
      let mut items: Vec<&[u8]> = self.buf.chunks_exact(self.item_size).collect();
      items.sort_by(|a, b| cmp(*a, *b));
      items.concat()
    };
    self.buf.copy_from_slice(&sorted);
  }

  /// Replace contents with `count` items read at `offset`
  /// 用在 `offset` 读取的 `count` 项替换内容
  ///
  /// A short read leaves the array empty.
  /// 读不满时数组置空。
  pub fn load<R: ReadAt + ?Sized>(&mut self, file: &R, offset: u64, count: usize) -> Result<()> {
    self.buf.clear();
    let bytes = count
      .checked_mul(self.item_size)
      .ok_or(Error::OutOfMemory { items: count })?;
    self.reserve(count)?;
    self.buf.resize(bytes, 0);
    if let Err(e) = read_exact_at(file, &mut self.buf, offset) {
      self.buf.clear();
      return Err(e.into());
    }
    log::trace!("load {count}x{} at {offset}", self.item_size);
    Ok(())
  }

  #[inline]
  pub fn get(&self, idx: usize) -> Option<&[u8]> {
    let at = idx.checked_mul(self.item_size)?;
    self.buf.get(at..at.checked_add(self.item_size)?)
  }

  /// Item `idx` or `OutOfRange`
  /// 第 `idx` 项，越界报 `OutOfRange`
  pub fn item(&self, idx: usize) -> Result<&[u8]> {
    self.get(idx).ok_or(Error::OutOfRange {
      idx,
      len: self.len(),
    })
  }

  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.buf
  }

  #[inline]
  pub fn iter(&self) -> ChunksExact<'_, u8> {
    self.buf.chunks_exact(self.item_size)
  }

  /// Sorted-search view over the items
  /// 供有序查找的视图
  #[inline]
  pub fn stride(&self) -> Stride<'_> {
    Stride::new(&self.buf, self.item_size)
  }
}

impl<'a> IntoIterator for &'a Array {
  type Item = &'a [u8];
  type IntoIter = ChunksExact<'a, u8>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
