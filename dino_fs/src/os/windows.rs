//! Windows seek_read
//!
//! seek_read moves the file cursor; callers never rely on it.
//! seek_read 会移动文件游标，调用方不依赖游标。

use std::{fs::File, os::windows::fs::FileExt};

#[inline]
pub fn pread(file: &File, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
  file.seek_read(buf, pos)
}
