use thiserror::Error;

use crate::DigestId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("unknown digest id: {0}")]
  UnknownDigest(u8),

  #[error("digest {} not supported", .0.name())]
  Unsupported(DigestId),
}
