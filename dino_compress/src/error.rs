use thiserror::Error;

use crate::CompressId;

pub type Result<T> = std::result::Result<T, Error>;

/// 压缩错误 Compression error
#[derive(Error, Debug)]
pub enum Error {
  #[error("zstd: {0}")]
  Zstd(#[from] std::io::Error),

  #[error("unknown codec: {0}")]
  UnknownCodec(u8),

  #[error("codec {} not supported", .0.name())]
  Unsupported(CompressId),

  #[error("compressed stream truncated")]
  Truncated,

  #[error("decompressed output exceeds {limit} bytes")]
  TooLarge { limit: usize },
}
