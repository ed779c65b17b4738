//! Error types for dinoinfo
//! dinoinfo 错误类型

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("can't open '{}': {source}", path.display())]
  Open {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed reading '{}': {source}", path.display())]
  Read { path: PathBuf, source: dino::Error },

  #[error("{bad} of {total} items failed verification")]
  Verify { bad: usize, total: usize },

  #[error("digest: {0}")]
  Digest(#[from] dino_digest::Error),

  #[error("output: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Process exit status
  /// 进程退出码
  pub fn code(&self) -> u8 {
    match self {
      Self::Open { .. } => 1,
      Self::Read { .. } | Self::Digest(_) | Self::Io(_) => 2,
      Self::Verify { .. } => 3,
    }
  }
}
