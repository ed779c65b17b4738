//! Section table
//! 段表

use dino_fs::{ReadAt, read_vec_at};

use crate::{
  Dhdr, Error, Index, Result, SecType,
  consts::{INVALID64, SIZE64_FLAG, SIZE64_MASK, sec_flag},
  raw::SHDR_SIZE,
};

/// Section descriptor as stored
/// 磁盘上的段描述符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shdr {
  /// Offset into the name table
  /// 名字表中的偏移
  pub name: u16,
  pub sectype: SecType,
  pub flags: u8,
  pub info: u32,
  pub size: u32,
  pub count: u32,
}

impl Shdr {
  pub const SIZE: usize = SHDR_SIZE;
}

/// Loaded section: descriptor plus resolved size, count and offset
/// 已加载的段：描述符及解析后的大小、计数与偏移
#[derive(Debug)]
pub struct Sec {
  pub idx: usize,
  pub shdr: Shdr,
  pub size: u64,
  pub count: u64,
  pub offset: u64,
  pub(crate) index: Option<Index>,
}

impl Sec {
  #[inline]
  pub fn sectype(&self) -> SecType {
    self.shdr.sectype
  }

  #[inline]
  pub fn is_index(&self) -> bool {
    self.shdr.sectype == SecType::INDEX
  }

  #[inline]
  pub fn is_compressed(&self) -> bool {
    self.shdr.flags & sec_flag::COMPRESSED != 0
  }

  #[inline]
  pub fn is_varint(&self) -> bool {
    self.shdr.flags & sec_flag::VARINT != 0
  }

  /// Size and offset both resolved
  /// 大小与偏移均已解析
  #[inline]
  pub fn is_valid(&self) -> bool {
    self.size != INVALID64 && self.offset != INVALID64
  }

  /// End offset, `INVALID64` once either part is unknown
  /// 结束偏移，任一部分未知则为 `INVALID64`
  #[inline]
  pub fn end(&self) -> u64 {
    if self.is_valid() {
      self.offset.checked_add(self.size).unwrap_or(INVALID64)
    } else {
      INVALID64
    }
  }

  #[inline]
  pub fn index(&self) -> Option<&Index> {
    self.index.as_ref()
  }
}

/// Literal value, or a side table entry when the MSB is set
/// 字面值；最高位置位时为边表下标
#[inline]
pub fn resolve(v: u32, sec64: &[u64]) -> u64 {
  if v & SIZE64_FLAG == 0 {
    return v.into();
  }
  sec64
    .get((v & SIZE64_MASK) as usize)
    .copied()
    .unwrap_or(INVALID64)
}

/// Read descriptors and the optional side table, then lay sections out
/// 读取描述符及可选边表，再计算各段位置
pub fn read_sectab<R: ReadAt + ?Sized>(file: &R, dhdr: &Dhdr) -> Result<Vec<Sec>> {
  let endian = dhdr.endian().ok_or(Error::BadEncoding(dhdr.encoding))?;
  let count = usize::from(dhdr.section_count);
  let shdrsize = count * SHDR_SIZE;
  let sectab_size = usize::from(dhdr.sectab_size);
  if sectab_size < shdrsize {
    return Err(Error::SectabSize {
      sectab_size,
      want: shdrsize,
    });
  }

  let buf = read_vec_at(file, shdrsize, dhdr.sectab_offset())?;
  let shdrs = endian.shdrs(&buf)?;

  let on64 = dhdr.sec64();
  let sec64 = if on64 {
    let extra = sectab_size - shdrsize;
    if extra % 8 != 0 {
      return Err(Error::Sec64Size(extra));
    }
    let buf = read_vec_at(file, extra, dhdr.sectab_offset() + shdrsize as u64)?;
    endian.u64s(&buf).ok_or(Error::Sec64Size(extra))?
  } else {
    Vec::new()
  };

  let mut offset = dhdr.data_offset();
  let secs = shdrs
    .into_iter()
    .enumerate()
    .map(|(idx, shdr)| {
      let (size, count) = if on64 {
        (resolve(shdr.size, &sec64), resolve(shdr.count, &sec64))
      } else {
        (shdr.size.into(), shdr.count.into())
      };
      let sec = Sec {
        idx,
        shdr,
        size,
        count,
        offset,
        index: None,
      };
      offset = sec.end();
      sec
    })
    .collect();
  Ok(secs)
}
