//! Fixed-stride view over a byte slice
//! 字节切片的定长视图

/// Sorted items of `stride` bytes packed back to back
/// 首尾相接、每项 `stride` 字节的有序数组
#[derive(Debug, Clone, Copy)]
pub struct Stride<'a> {
  data: &'a [u8],
  stride: usize,
}

impl<'a> Stride<'a> {
  /// `stride` must be non-zero; trailing partial item is ignored
  /// `stride` 必须非零，末尾不完整的项被忽略
  #[inline]
  pub fn new(data: &'a [u8], stride: usize) -> Self {
    debug_assert!(stride > 0);
    Self {
      data,
      stride: stride.max(1),
    }
  }

  #[inline]
  pub fn stride(&self) -> usize {
    self.stride
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.data.len() / self.stride
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Item `i`, panics past `len()`
  /// 第 `i` 项，越界 panic
  #[inline]
  pub fn item(&self, i: usize) -> &'a [u8] {
    let off = i * self.stride;
    &self.data[off..off + self.stride]
  }

  #[inline]
  pub fn get(&self, i: usize) -> Option<&'a [u8]> {
    (i < self.len()).then(|| self.item(i))
  }

  /// Clamp `[base, base+num)` to the items present
  /// 将 `[base, base+num)` 收敛到实际存在的项
  #[inline]
  pub(crate) fn clamp(&self, base: usize, num: usize) -> usize {
    num.min(self.len().saturating_sub(base))
  }
}
