//! Human-readable dumps
//! 人类可读的输出

use std::{fs::File, io::Write, ops::Range};

use dino::{Dhdr, Dino, Endian, Index, sec_flag};

use crate::{Args, Result, hexkey::abbrev};

pub fn file_header<W: Write>(out: &mut W, d: &Dhdr, verbose: bool) -> Result<()> {
  writeln!(out, "DINO v{} Object Header:", d.format_version())?;
  writeln!(
    out,
    "  type: 0x{:02x} ({}), version {}, arch 0x{:02x} ({})",
    d.objtype.0,
    d.objtype.name().unwrap_or("unknown"),
    d.version,
    d.arch.0,
    d.arch.name().unwrap_or("unknown"),
  )?;
  writeln!(
    out,
    "  encoding: {}, {}-bit section offsets",
    d.endian().map_or("undefined byte order", Endian::name),
    if d.sec64() { 64 } else { 32 },
  )?;
  writeln!(
    out,
    "  sectab: offset {:04x} size {:04x} count {}",
    d.sectab_offset(),
    d.sectab_size,
    d.section_count
  )?;
  writeln!(
    out,
    "  namtab: offset {:04x} size {:04x}",
    d.namtab_offset(),
    d.namtab_size
  )?;
  writeln!(
    out,
    "  compression format: {}",
    d.compress().map_or("unknown", |c| c.name())
  )?;
  if verbose {
    writeln!(
      out,
      "  compression options: section {}, data offset {:04x}",
      d.compress_opts,
      d.data_offset()
    )?;
  }
  Ok(())
}

pub fn section_headers<W: Write>(out: &mut W, dino: &Dino<File>, args: &Args) -> Result<()> {
  writeln!(out, "\nSection Headers:")?;
  writeln!(
    out,
    "  {:>3} {:<4} {:<16} {:<8} {:>8} {:>16}",
    "idx", "type", "name", "size", "flags", "info"
  )?;
  for sec in dino.secs() {
    let name = dino.sec_name(sec);
    if !args.wants(name) {
      continue;
    }
    let flags = sec.shdr.flags;
    writeln!(
      out,
      "  {:>3}   {:02x} {:<16} {:08x} ------{}{} {:016x}",
      sec.idx,
      sec.shdr.sectype.0,
      name.unwrap_or("?"),
      sec.size,
      if flags & sec_flag::VARINT != 0 { 'v' } else { '-' },
      if flags & sec_flag::COMPRESSED != 0 { 'c' } else { '-' },
      sec.shdr.info,
    )?;
    if args.verbose {
      if sec.is_valid() {
        writeln!(
          out,
          "        {} offset {:08x} count {}",
          sec.sectype().name().unwrap_or("unknown"),
          sec.offset,
          sec.count
        )?;
      } else {
        writeln!(out, "        size or offset unresolved")?;
      }
    }
  }
  Ok(())
}

pub fn nametable<W: Write>(out: &mut W, dino: &Dino<File>) -> Result<()> {
  writeln!(out, "\nNametable:")?;
  for name in dino.names() {
    writeln!(
      out,
      "  {:04x}-{:04x} \"{}{}\"",
      name.off,
      name.off + name.bytes.len(),
      name.bytes.escape_ascii(),
      if name.nul { "\\0" } else { "" }
    )?;
  }
  Ok(())
}

/// Entries picked by `--key` / `--key-exact`, all otherwise
/// 由 `--key` / `--key-exact` 选出的条目，未指定时为全部
pub fn select(args: &Args, idx: &Index) -> Range<usize> {
  if let Some(key) = &args.key_exact {
    if key.bytes.len() != idx.keysize() {
      return 0..0;
    }
    return idx.prefix_match(&key.bytes).indices();
  }
  match &args.key {
    Some(key) => idx.prefix_match(&key.bytes).indices(),
    None => 0..idx.count(),
  }
}

pub fn indexes<W: Write>(out: &mut W, dino: &Dino<File>, args: &Args) -> Result<()> {
  writeln!(out, "\nIndexes:")?;
  for sec in dino.secs() {
    let Some(idx) = sec.index() else {
      continue;
    };
    let name = dino.sec_name(sec);
    if !args.wants(name) {
      continue;
    }
    let other = dino
      .index_othersec(sec.idx)
      .and_then(|s| dino.sec_name(s));
    writeln!(
      out,
      "  Index section {} -> {}, {} keys, keysize {}",
      name.unwrap_or("?"),
      other.unwrap_or("?"),
      idx.count(),
      idx.keysize()
    )?;
    if args.verbose {
      let shape = idx.shape();
      writeln!(
        out,
        "    flags {:02x}, {}-byte values, othersec {}",
        shape.flags,
        shape.valsize(),
        shape.othersec
      )?;
    }
    for i in select(args, idx) {
      let (Some(key), Some(val)) = (idx.get_key(i), idx.get_val(i)) else {
        continue;
      };
      write!(
        out,
        "    key {} size {:08x} offset {:08x}",
        abbrev(key, args.abbrev()),
        val.size,
        val.offset
      )?;
      match val.unc_size {
        Some(unc) if args.verbose => writeln!(out, " unc_size {unc:08x}")?,
        _ => writeln!(out)?,
      }
    }
    writeln!(out)?;
  }
  Ok(())
}
