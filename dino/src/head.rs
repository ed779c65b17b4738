//! Container header
//! 容器头部

use dino_compress::CompressId;
use dino_fs::{ReadAt, read_exact_at};

use crate::{
  Arch, Endian, Error, Objtype, Result,
  consts::{MAGIC, encoding},
  raw::DHDR_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dhdr {
  pub magic: [u8; 4],
  pub version: u8,
  pub arch: Arch,
  pub encoding: u8,
  pub objtype: Objtype,
  pub compress_id: u8,
  /// Section holding extra compressor options
  /// 存放压缩器额外选项的段
  pub compress_opts: u8,
  pub reserved: u8,
  pub section_count: u8,
  pub sectab_size: u16,
  pub namtab_size: u16,
}

impl Dhdr {
  pub const SIZE: usize = DHDR_SIZE;

  /// Empty little-endian archive header
  /// 空的小端归档头
  pub fn new() -> Self {
    Self {
      magic: MAGIC,
      version: 0,
      arch: Arch::NONE,
      encoding: encoding::LSB,
      objtype: Objtype::ARCHIVE,
      compress_id: CompressId::None as u8,
      compress_opts: 0,
      reserved: 0,
      section_count: 0,
      sectab_size: 0,
      namtab_size: 0,
    }
  }

  /// Format major version from the magic's low nibble
  /// 魔数低 4 位给出的格式主版本
  #[inline]
  pub fn format_version(&self) -> u8 {
    self.magic[3] & 0x0f
  }

  /// `None` for the invalid orders 0 and 3
  /// 字节序 0 与 3 无效，返回 `None`
  #[inline]
  pub fn endian(&self) -> Option<Endian> {
    endian_of(self.encoding)
  }

  #[inline]
  pub fn sec64(&self) -> bool {
    self.encoding & encoding::SEC64 != 0
  }

  #[inline]
  pub fn compress(&self) -> dino_compress::Result<CompressId> {
    CompressId::from_u8(self.compress_id)
  }

  #[inline]
  pub fn sectab_offset(&self) -> u64 {
    Self::SIZE as u64
  }

  #[inline]
  pub fn namtab_offset(&self) -> u64 {
    self.sectab_offset() + u64::from(self.sectab_size)
  }

  /// Where section 0 starts
  /// 段 0 的起点
  #[inline]
  pub fn data_offset(&self) -> u64 {
    self.namtab_offset() + u64::from(self.namtab_size)
  }

  /// Encode in the header's own byte order
  /// 按头部自身字节序编码
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    let endian = self.endian().ok_or(Error::BadEncoding(self.encoding))?;
    Ok(endian.put_dhdr(self))
  }
}

impl Default for Dhdr {
  fn default() -> Self {
    Self::new()
  }
}

fn endian_of(enc: u8) -> Option<Endian> {
  match enc & encoding::ORDER_MASK {
    encoding::LSB => Some(Endian::Little),
    encoding::MSB => Some(Endian::Big),
    _ => None,
  }
}

/// Read and validate the header at offset 0
/// 读取并校验偏移 0 处的头部
pub fn read_dhdr<R: ReadAt + ?Sized>(file: &R) -> Result<Dhdr> {
  let mut buf = [0u8; DHDR_SIZE];
  read_exact_at(file, &mut buf, 0)?;

  let magic = [buf[0], buf[1], buf[2], buf[3]];
  if magic[..3] != MAGIC[..3] || magic[3] & 0xf0 != MAGIC[3] & 0xf0 {
    return Err(Error::BadMagic(magic));
  }
  let enc = buf[6];
  if enc & !encoding::KNOWN != 0 {
    return Err(Error::BadEncoding(enc));
  }
  let endian = endian_of(enc).ok_or(Error::BadEncoding(enc))?;
  let dhdr = endian.dhdr(&buf)?;
  if dhdr.reserved != 0 {
    return Err(Error::Reserved(dhdr.reserved));
  }
  log::trace!("{dhdr:?}");
  Ok(dhdr)
}
