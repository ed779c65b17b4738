#![cfg_attr(docsrs, feature(doc_cfg))]

//! DINO container reader and index engine
//! DINO 容器读取与索引引擎
//!
//! A file is a 16-byte header, a section table, a name table, then the
//! section payloads back to back. Index sections map fixed-size keys to byte
//! ranges in another section.
//! 文件由 16 字节头部、段表、名字表及首尾相接的段负载组成。
//! 索引段把定长键映射到另一段中的字节区间。

mod consts;
mod dino;
mod error;
mod head;
pub mod index;
mod namtab;
mod raw;
mod sectab;

pub use consts::{
  Arch, INVALID64, MAGIC, Objtype, SIZE64_FLAG, SIZE64_MASK, SecType, encoding, sec_flag,
};
pub use dino::Dino;
pub use dino_bisect::{KeyRange, Search};
pub use dino_compress::CompressId;
pub use error::{Error, Result};
pub use head::{Dhdr, read_dhdr};
pub use index::{Index, IndexState, Match, Shape, Val, ValShape};
pub use namtab::{Name, Names, Namtab, read_namtab};
pub use raw::Endian;
pub use sectab::{Sec, Shdr, read_sectab, resolve};

pub mod default {
  /// Decompressed size cap for items whose index records no `unc_size`
  /// 索引未记录 `unc_size` 时单项解压的大小上限
  pub const ITEM_MAX: u64 = 1 << 32;
}
