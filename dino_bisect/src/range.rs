//! Search results
//! 查找结果

/// Outcome of an indexed search
/// 带下标查找的结果
///
/// `NotFound(n)` carries the insertion point: `arr[n-1] < key < arr[n]`
/// where those neighbours exist.
/// `NotFound(n)` 携带插入点：相邻项存在时 `arr[n-1] < key < arr[n]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
  Found(usize),
  NotFound(usize),
}

impl Search {
  #[inline]
  pub fn is_found(&self) -> bool {
    matches!(self, Self::Found(_))
  }

  #[inline]
  pub fn found(self) -> Option<usize> {
    match self {
      Self::Found(i) => Some(i),
      Self::NotFound(_) => None,
    }
  }

  /// Match index or insertion point
  /// 匹配下标或插入点
  #[inline]
  pub fn idx(self) -> usize {
    match self {
      Self::Found(i) | Self::NotFound(i) => i,
    }
  }
}

/// Inclusive index range `[lo, hi]`, empty when `lo > hi`
/// 闭区间 `[lo, hi]`，`lo > hi` 时为空
///
/// An empty range keeps the insertion point in `hi`.
/// 空区间的 `hi` 即插入点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
  pub lo: usize,
  pub hi: usize,
}

impl KeyRange {
  #[inline]
  pub fn empty(at: usize) -> Self {
    Self { lo: at + 1, hi: at }
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.lo > self.hi
  }

  #[inline]
  pub fn len(&self) -> usize {
    if self.is_empty() {
      0
    } else {
      self.hi - self.lo + 1
    }
  }

  #[inline]
  pub fn is_unique(&self) -> bool {
    self.lo == self.hi
  }

  /// Half-open form for iteration
  /// 用于迭代的半开区间
  #[inline]
  pub fn indices(&self) -> std::ops::Range<usize> {
    if self.is_empty() {
      self.lo..self.lo
    } else {
      self.lo..self.hi + 1
    }
  }
}
