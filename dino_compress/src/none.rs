//! Passthrough backend for uncompressed sections
//! 未压缩段的直通后端

use crate::{Compress, Decompress, InBuf, Opts, OutBuf, Result};

#[derive(Debug, Default)]
pub struct Passthrough;

impl Passthrough {
  /// Copy as much as fits; returns input bytes left
  /// 尽量复制；返回剩余输入字节数
  fn copy(input: &mut InBuf, output: &mut OutBuf) -> usize {
    let src = input.rest();
    let dst = output.rest_mut();
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
    input.pos += n;
    output.pos += n;
    src.len() - n
  }
}

impl Compress for Passthrough {
  fn setup(&mut self, _opts: &Opts) -> Result<()> {
    Ok(())
  }

  fn compress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize> {
    Ok(Self::copy(input, output))
  }

  fn flush(&mut self, _output: &mut OutBuf) -> Result<usize> {
    Ok(0)
  }

  fn end(&mut self, _output: &mut OutBuf) -> Result<usize> {
    Ok(0)
  }
}

impl Decompress for Passthrough {
  fn setup(&mut self) -> Result<()> {
    Ok(())
  }

  fn decompress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize> {
    Ok(Self::copy(input, output))
  }
}
