#![cfg_attr(docsrs, feature(doc_cfg))]

//! Compression backends keyed by codec id
//! 按算法 id 选择的压缩后端
//!
//! Each backend streams between caller-owned buffers through `InBuf`/`OutBuf`
//! cursors; `enc`/`dec` wrap a whole-buffer round on top.
//! 每个后端通过 `InBuf`/`OutBuf` 游标在调用方缓冲区间流式处理；`enc`/`dec` 在其上做整块处理。

mod buf;
mod error;
mod id;
mod none;
mod zstd_stream;

pub use buf::{InBuf, OutBuf};
pub use error::{Error, Result};
pub use id::CompressId;
pub use none::Passthrough;
pub use zstd_stream::{ZstdDec, ZstdEnc};

/// Encoder options
/// 编码选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opts {
  pub level: i32,
}

pub mod default {
  pub const LEVEL: i32 = 3;
  /// Growth step of one-shot output buffers
  /// 整块输出缓冲区的增长步长
  pub const OUT_STEP: usize = 1 << 16;
}

impl Default for Opts {
  fn default() -> Self {
    Self {
      level: default::LEVEL,
    }
  }
}

/// Streaming compressor
/// 流式压缩器
pub trait Compress {
  fn setup(&mut self, opts: &Opts) -> Result<()>;

  /// Consume input, returns a hint (non-zero while more input is wanted)
  /// 消耗输入，返回提示值（仍需输入时非零）
  fn compress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize>;

  /// Returns bytes still buffered inside the encoder
  /// 返回编码器内仍缓存的字节数
  fn flush(&mut self, output: &mut OutBuf) -> Result<usize>;

  /// Finish the frame; call until it returns 0
  /// 结束帧，直到返回 0
  fn end(&mut self, output: &mut OutBuf) -> Result<usize>;
}

/// Streaming decompressor
/// 流式解压器
pub trait Decompress {
  fn setup(&mut self) -> Result<()>;

  /// Returns 0 once a frame is complete and flushed
  /// 帧完整且已输出时返回 0
  fn decompress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize>;
}

pub fn encoder(id: CompressId) -> Result<Box<dyn Compress>> {
  Ok(match id {
    CompressId::None => Box::new(Passthrough),
    CompressId::Zstd => Box::new(ZstdEnc::new()?),
    _ => return Err(Error::Unsupported(id)),
  })
}

pub fn decoder(id: CompressId) -> Result<Box<dyn Decompress>> {
  Ok(match id {
    CompressId::None => Box::new(Passthrough),
    CompressId::Zstd => Box::new(ZstdDec::new()?),
    _ => return Err(Error::Unsupported(id)),
  })
}

/// Make sure `out[pos..]` has room, never growing past `cap`
/// 确保 `out[pos..]` 有剩余空间，长度不超过 `cap`
#[inline]
fn room(out: &mut Vec<u8>, pos: usize, cap: usize) {
  if out.len() - pos < default::OUT_STEP / 4 {
    out.resize(out.len().saturating_add(default::OUT_STEP).min(cap), 0);
  }
}

/// 压缩 Compress
pub fn enc(id: CompressId, src: &[u8], opts: &Opts) -> Result<Vec<u8>> {
  let mut c = encoder(id)?;
  c.setup(opts)?;
  let mut out = vec![0u8; src.len() / 2];
  let mut input = InBuf::new(src);
  let mut pos = 0;
  while !input.is_empty() {
    room(&mut out, pos, usize::MAX);
    let mut output = OutBuf { dst: &mut out, pos };
    c.compress(&mut input, &mut output)?;
    pos = output.pos;
  }
  loop {
    room(&mut out, pos, usize::MAX);
    let mut output = OutBuf { dst: &mut out, pos };
    let left = c.end(&mut output)?;
    pos = output.pos;
    if left == 0 {
      break;
    }
  }
  out.truncate(pos);
  log::trace!("{id} enc {} -> {pos}", src.len());
  Ok(out)
}

/// 解压 Decompress
#[inline]
pub fn dec(id: CompressId, src: &[u8]) -> Result<Vec<u8>> {
  dec_max(id, src, usize::MAX)
}

/// Decompress, failing with `TooLarge` once output passes `limit` bytes
/// 解压，输出超过 `limit` 字节即以 `TooLarge` 失败
pub fn dec_max(id: CompressId, src: &[u8], limit: usize) -> Result<Vec<u8>> {
  let mut d = decoder(id)?;
  d.setup()?;
  let cap = limit.saturating_add(1);
  let mut out = vec![0u8; src.len().saturating_mul(2).min(cap)];
  let mut input = InBuf::new(src);
  let mut pos = 0;
  loop {
    room(&mut out, pos, cap);
    let mut output = OutBuf { dst: &mut out, pos };
    let hint = d.decompress(&mut input, &mut output)?;
    let full = output.is_full();
    pos = output.pos;
    if pos > limit {
      log::debug!("{id} dec {} past limit {limit}", src.len());
      return Err(Error::TooLarge { limit });
    }
    if input.is_empty() {
      if hint == 0 {
        break;
      }
      if !full {
        return Err(Error::Truncated);
      }
    }
  }
  out.truncate(pos);
  log::trace!("{id} dec {} -> {pos}", src.len());
  Ok(out)
}
