//! Unix pread

use std::{fs::File, os::unix::fs::FileExt};

#[inline]
pub fn pread(file: &File, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
  file.read_at(buf, pos)
}
