//! Error types for dino
//! dino 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("fs: {0}")]
  Fs(#[from] dino_fs::Error),

  #[error("array: {0}")]
  Array(#[from] dino_array::Error),

  #[error("compress: {0}")]
  Compress(#[from] dino_compress::Error),

  #[error("bad magic {0:02x?}")]
  BadMagic([u8; 4]),

  #[error("bad header")]
  BadHeader,

  #[error("bad encoding byte {0:#04x}")]
  BadEncoding(u8),

  #[error("reserved header byte is {0:#04x}, must be 0")]
  Reserved(u8),

  #[error("section table is {sectab_size} bytes, descriptors need {want}")]
  SectabSize { sectab_size: usize, want: usize },

  #[error("64-bit side table is {0} bytes, not a multiple of 8")]
  Sec64Size(usize),

  #[error("index key size is 0")]
  ZeroKeySize,

  #[error("unknown index version {0}")]
  UnknownVersion(u8),

  #[error("unknown index flags {0:#04x}")]
  UnknownFlags(u8),

  #[error("fanout table inconsistent at bucket {bucket}")]
  InvalidFanout { bucket: usize },

  #[error("index section {idx} holds {got} bytes, layout needs {want}")]
  IndexSize { idx: usize, want: u64, got: u64 },

  #[error("key is {got} bytes, index keys are {want}")]
  KeySize { want: usize, got: usize },

  #[error("value {0} does not fit a 32-bit index")]
  ValTooLarge(u64),

  #[error("no section {0}")]
  NoSection(usize),

  #[error("section {0} is not an index")]
  NotIndex(usize),

  #[error("section {0} has no valid 64-bit size or offset")]
  InvalidSize(usize),

  #[error("range {offset}+{size} outside section {idx}")]
  Range { idx: usize, offset: u64, size: u64 },
}
