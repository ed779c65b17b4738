//! Fanout-bucketed sorted key/value index
//! fanout 分桶的有序键值索引
//!
//! Keys sit in one array sorted by raw bytes, values in a parallel array in
//! the container's byte order. `fanout[b]` counts the keys whose first byte
//! is `<= b`, so a lookup only searches the bucket of its first byte.
//! 键按原始字节有序存于一个数组，值以容器字节序存于平行数组。
//! `fanout[b]` 为首字节 `<= b` 的键数，查找只在首字节所在桶内进行。

mod shape;

use dino_array::Array;
use dino_bisect::{KeyRange, Search, prefix_range, search};
use dino_fs::{ReadAt, read_vec_at};
pub use shape::{FANOUT_LEN, FANOUT_SIZE, Shape, Val, ValShape, flag};

use crate::{Endian, Error, Result};

/// How the entries got there
/// 条目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
  /// Bulk-read from a section
  /// 从段中整体读入
  Loaded,
  /// Filled by `add`
  /// 由 `add` 填充
  Building,
}

/// Prefix lookup result
/// 前缀查找结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
  /// No key matches; carries the insertion point
  /// 无匹配，携带插入点
  None(usize),
  /// Exactly one key matches
  /// 恰好一个键匹配
  One(usize),
  Many(KeyRange),
}

impl Match {
  fn from_range(r: KeyRange) -> Self {
    if r.is_empty() {
      Self::None(r.hi)
    } else if r.is_unique() {
      Self::One(r.lo)
    } else {
      Self::Many(r)
    }
  }

  /// Matching indices, empty for `None`
  /// 匹配下标，`None` 时为空
  pub fn indices(&self) -> std::ops::Range<usize> {
    match *self {
      Self::None(at) => at..at,
      Self::One(i) => i..i + 1,
      Self::Many(r) => r.indices(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct Index {
  shape: Shape,
  endian: Endian,
  state: IndexState,
  fanout: Box<[u32; FANOUT_LEN]>,
  keys: Array,
  vals: Array,
}

impl Index {
  /// Empty index with little-endian values
  /// 空索引，值为小端
  #[inline]
  pub fn new(shape: Shape) -> Result<Self> {
    Self::new_in(shape, Endian::Little)
  }

  pub fn new_in(shape: Shape, endian: Endian) -> Result<Self> {
    Ok(Self {
      shape,
      endian,
      state: IndexState::Building,
      fanout: Box::new([0; FANOUT_LEN]),
      keys: Array::new(shape.keysize.into())?,
      vals: Array::new(shape.valsize())?,
    })
  }

  #[inline]
  pub fn from_info(info: u32) -> Result<Self> {
    Self::new(Shape::from_info(info)?)
  }

  pub fn with_capacity(shape: Shape, cap: usize) -> Result<Self> {
    let mut idx = Self::new(shape)?;
    idx.keys.reserve(cap)?;
    idx.vals.reserve(cap)?;
    Ok(idx)
  }

  /// Read `count` entries laid out as fanout | keys | values from `pos`
  /// 从 `pos` 读取按 fanout | keys | values 排列的 `count` 项
  pub fn load<R: ReadAt + ?Sized>(
    file: &R,
    pos: u64,
    shape: Shape,
    count: usize,
    endian: Endian,
  ) -> Result<Self> {
    let mut pos = pos;
    let fanout = if shape.nofanout() {
      None
    } else {
      let buf = read_vec_at(file, FANOUT_SIZE, pos)?;
      pos += FANOUT_SIZE as u64;
      Some(endian.u32s(&buf).ok_or(Error::InvalidFanout { bucket: 0 })?)
    };

    let keysize = usize::from(shape.keysize);
    let keys = Array::read(file, pos, keysize, count)?;
    pos += keys.as_bytes().len() as u64;
    let vals = Array::read(file, pos, shape.valsize(), count)?;

    let mut idx = Self {
      shape,
      endian,
      state: IndexState::Loaded,
      fanout: Box::new([0; FANOUT_LEN]),
      keys,
      vals,
    };
    match fanout {
      Some(li) => {
        idx.fanout.copy_from_slice(&li);
        idx.check_fanout()?;
      }
      None => idx.rebuild_fanout(),
    }
    log::debug!(
      "index load {count} keys, keysize {keysize}, {:?}",
      shape.val_shape()
    );
    Ok(idx)
  }

  /// Non-decreasing and ending at `count`
  /// 单调不减且末项等于 `count`
  fn check_fanout(&self) -> Result<()> {
    let mut prev = 0;
    for (bucket, &n) in self.fanout.iter().enumerate() {
      if n < prev {
        return Err(Error::InvalidFanout { bucket });
      }
      prev = n;
    }
    if prev as usize != self.count() {
      return Err(Error::InvalidFanout {
        bucket: FANOUT_LEN - 1,
      });
    }
    Ok(())
  }

  /// Recount the fanout table from the keys
  /// 根据键重新统计 fanout 表
  pub fn rebuild_fanout(&mut self) {
    let mut fanout = [0u32; FANOUT_LEN];
    for key in &self.keys {
      fanout[usize::from(key[0])] += 1;
    }
    let mut sum = 0;
    for n in fanout.iter_mut() {
      sum += *n;
      *n = sum;
    }
    *self.fanout = fanout;
  }

  /// `[base, base+num)` of keys starting with `b`
  /// 首字节为 `b` 的键区间 `[base, base+num)`
  #[inline]
  fn bucket(&self, b: u8) -> (usize, usize) {
    let b = usize::from(b);
    let base = if b == 0 { 0 } else { self.fanout[b - 1] as usize };
    let end = self.fanout[b] as usize;
    (base, end.saturating_sub(base))
  }

  /// Exact lookup; a key of any other length than `keysize` is never found
  /// 精确查找；长度不等于 `keysize` 的键一律查不到
  pub fn find(&self, key: &[u8]) -> Search {
    if key.len() != self.keysize() {
      return Search::NotFound(0);
    }
    let Some(&b) = key.first() else {
      return Search::NotFound(0);
    };
    let (base, num) = self.bucket(b);
    search(key, &self.keys.stride(), base, num, self.keysize())
  }

  #[inline]
  pub fn search(&self, key: &[u8]) -> Option<Val> {
    self.get_val(self.find(key).found()?)
  }

  /// Encoded value for `key`
  /// `key` 对应的编码值
  #[inline]
  pub fn search_raw(&self, key: &[u8]) -> Option<&[u8]> {
    self.get_val_raw(self.find(key).found()?)
  }

  /// Keys starting with `prefix`; an empty prefix matches all
  /// 以 `prefix` 开头的键；空前缀匹配全部
  pub fn prefix_match(&self, prefix: &[u8]) -> Match {
    let Some(&b) = prefix.first() else {
      return match self.count() {
        0 => Match::None(0),
        n => Match::from_range(KeyRange { lo: 0, hi: n - 1 }),
      };
    };
    let (base, num) = self.bucket(b);
    Match::from_range(prefix_range(
      prefix,
      &self.keys.stride(),
      base,
      num,
      self.keysize(),
    ))
  }

  /// Insert or overwrite; returns the entry's position
  /// 插入或覆盖；返回条目位置
  pub fn add(&mut self, key: &[u8], val: &Val) -> Result<usize> {
    let raw = self.endian.put_val(self.shape.val_shape(), val)?;
    self.add_raw(key, &raw)
  }

  /// `add` with a value already in the index's encoding
  /// 值已按索引编码的 `add`
  pub fn add_raw(&mut self, key: &[u8], raw: &[u8]) -> Result<usize> {
    if key.len() != self.keysize() {
      return Err(Error::KeySize {
        want: self.keysize(),
        got: key.len(),
      });
    }
    if raw.len() != self.shape.valsize() {
      return Err(
        dino_array::Error::ItemSize {
          want: self.shape.valsize(),
          got: raw.len(),
        }
        .into(),
      );
    }
    match self.find(key) {
      Search::Found(i) => {
        self.vals.set(raw, i)?;
        Ok(i)
      }
      Search::NotFound(i) => {
        // Both arrays get room first so they stay parallel
        self.keys.ensure_space()?;
        self.vals.ensure_space()?;
        self.keys.insert(key, i)?;
        self.vals.insert(raw, i)?;
        for n in &mut self.fanout[usize::from(key[0])..] {
          *n += 1;
        }
        Ok(i)
      }
    }
  }

  #[inline]
  pub fn get_key(&self, i: usize) -> Option<&[u8]> {
    self.keys.get(i)
  }

  #[inline]
  pub fn get_val(&self, i: usize) -> Option<Val> {
    self.endian.val(self.shape.val_shape(), self.vals.get(i)?)
  }

  #[inline]
  pub fn get_val_raw(&self, i: usize) -> Option<&[u8]> {
    self.vals.get(i)
  }

  #[inline]
  pub fn count(&self) -> usize {
    self.keys.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  #[inline]
  pub fn keysize(&self) -> usize {
    self.shape.keysize.into()
  }

  #[inline]
  pub fn othersec(&self) -> usize {
    self.shape.othersec.into()
  }

  #[inline]
  pub fn shape(&self) -> Shape {
    self.shape
  }

  #[inline]
  pub fn endian(&self) -> Endian {
    self.endian
  }

  #[inline]
  pub fn state(&self) -> IndexState {
    self.state
  }

  #[inline]
  pub fn fanout(&self) -> &[u32; FANOUT_LEN] {
    &self.fanout
  }

  /// Keys in order with their values
  /// 按序遍历键与值
  pub fn iter(&self) -> impl Iterator<Item = (&[u8], Val)> + '_ {
    let shape = self.shape.val_shape();
    self
      .keys
      .iter()
      .zip(self.vals.iter())
      .filter_map(move |(k, v)| Some((k, self.endian.val(shape, v)?)))
  }
}
