#![cfg_attr(docsrs, feature(doc_cfg))]

//! Positioned reads with interrupt retry
//! 带中断重试的定位读取

mod error;
mod os;

use std::io::ErrorKind;

pub use error::{Error, Result};

pub mod default {
  /// Bytes filled per step by `read_vec_at`
  /// `read_vec_at` 每步填充的字节数
  pub const READ_STEP: usize = 1 << 20;
}

/// Positioned read source
/// 定位读取源
///
/// Reads never move a shared cursor, so one source can serve many readers.
/// 读取不移动共享游标，一个源可服务多个读者。
pub trait ReadAt {
  /// Single positioned read, may return fewer bytes than asked
  /// 单次定位读取，可能少于请求字节数
  fn read_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize>;

  /// Read until `buf` is full or EOF, retrying on interrupt
  /// 读到 `buf` 填满或 EOF，被中断时重试
  fn read_full_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
      match self.read_at(&mut buf[total..], pos + total as u64) {
        Ok(0) => break,
        Ok(n) => total += n,
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => return Err(e),
      }
    }
    Ok(total)
  }
}

impl ReadAt for std::fs::File {
  #[inline]
  fn read_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    os::pread(self, buf, pos)
  }
}

impl ReadAt for [u8] {
  fn read_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    let Ok(pos) = usize::try_from(pos) else {
      return Ok(0);
    };
    if pos >= self.len() {
      return Ok(0);
    }
    let n = buf.len().min(self.len() - pos);
    buf[..n].copy_from_slice(&self[pos..pos + n]);
    Ok(n)
  }
}

impl ReadAt for Vec<u8> {
  #[inline]
  fn read_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    self.as_slice().read_at(buf, pos)
  }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
  #[inline]
  fn read_at(&self, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    (**self).read_at(buf, pos)
  }
}

/// Fill `buf` from `pos`, a short read is an error
/// 从 `pos` 填满 `buf`，读不满即报错
pub fn read_exact_at<R: ReadAt + ?Sized>(file: &R, buf: &mut [u8], pos: u64) -> Result<()> {
  let got = file.read_full_at(buf, pos)?;
  if got < buf.len() {
    log::debug!("short read at {pos}: {got}/{}", buf.len());
    return Err(Error::ShortRead {
      pos,
      want: buf.len(),
      got,
    });
  }
  Ok(())
}

/// Read `len` bytes at `pos` into a new buffer
/// 在 `pos` 读取 `len` 字节到新缓冲区
///
/// The buffer grows one step at a time, so a `len` larger than the source
/// fails with `ShortRead` after touching no more than the source holds.
/// 缓冲区逐步增长，`len` 超过源长度时以 `ShortRead` 失败，占用内存不超过源的实际数据。
pub fn read_vec_at<R: ReadAt + ?Sized>(file: &R, len: usize, pos: u64) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  while buf.len() < len {
    let have = buf.len();
    let step = (len - have).min(default::READ_STEP);
    buf
      .try_reserve(step)
      .map_err(|_| Error::OutOfMemory { len })?;
    buf.resize(have + step, 0);
    let got = file.read_full_at(&mut buf[have..], pos.saturating_add(have as u64))?;
    if got < step {
      log::debug!("short read at {pos}: {}/{len}", have + got);
      return Err(Error::ShortRead {
        pos,
        want: len,
        got: have + got,
      });
    }
  }
  Ok(buf)
}
