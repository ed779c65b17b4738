//! Cursors over caller-owned buffers
//! 调用方缓冲区上的游标

/// Input cursor, `src[pos..]` is unread
/// 输入游标，`src[pos..]` 尚未读取
#[derive(Debug)]
pub struct InBuf<'a> {
  pub src: &'a [u8],
  pub pos: usize,
}

impl<'a> InBuf<'a> {
  #[inline]
  pub fn new(src: &'a [u8]) -> Self {
    Self { src, pos: 0 }
  }

  #[inline]
  pub fn rest(&self) -> &'a [u8] {
    &self.src[self.pos..]
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.pos >= self.src.len()
  }
}

/// Output cursor, `dst[..pos]` is written
/// 输出游标，`dst[..pos]` 已写入
#[derive(Debug)]
pub struct OutBuf<'a> {
  pub dst: &'a mut [u8],
  pub pos: usize,
}

impl<'a> OutBuf<'a> {
  #[inline]
  pub fn new(dst: &'a mut [u8]) -> Self {
    Self { dst, pos: 0 }
  }

  #[inline]
  pub fn rest_mut(&mut self) -> &mut [u8] {
    &mut self.dst[self.pos..]
  }

  #[inline]
  pub fn is_full(&self) -> bool {
    self.pos >= self.dst.len()
  }

  #[inline]
  pub fn written(&self) -> &[u8] {
    &self.dst[..self.pos]
  }
}
