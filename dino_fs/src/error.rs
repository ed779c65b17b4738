//! Error types for dino_fs
//! dino_fs 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("short read at {pos}: want {want} bytes, got {got}")]
  ShortRead { pos: u64, want: usize, got: usize },

  #[error("out of memory reading {len} bytes")]
  OutOfMemory { len: usize },
}
