//! Error types for dino_array
//! dino_array 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("item size must be non-zero")]
  ZeroItemSize,

  #[error("item is {got} bytes, array holds {want}-byte items")]
  ItemSize { want: usize, got: usize },

  #[error("out of memory growing to {items} items")]
  OutOfMemory { items: usize },

  #[error("index {idx} out of range (len {len})")]
  OutOfRange { idx: usize, len: usize },

  #[error("fs: {0}")]
  Fs(#[from] dino_fs::Error),
}
