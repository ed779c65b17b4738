#![cfg_attr(docsrs, feature(doc_cfg))]

//! Inspect DINO containers
//! 查看 DINO 容器

mod args;
mod error;
mod hexkey;
pub mod show;
pub mod verify;

use std::{fs::File, io::Write};

pub use args::{Args, default};
use dino::Dino;
pub use error::{Error, Result};
pub use hexkey::{BadHex, HexKey, abbrev};
pub use verify::Report;

/// Print what `args` asks for about `args.file`
/// 按 `args` 打印 `args.file` 的信息
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
  let file = File::open(&args.file).map_err(|source| Error::Open {
    path: args.file.clone(),
    source,
  })?;
  let read = |source: dino::Error| Error::Read {
    path: args.file.clone(),
    source,
  };
  let mut dino = Dino::open(file).map_err(read)?;

  for key in [&args.key, &args.key_exact].into_iter().flatten() {
    if key.odd {
      log::warn!("odd hex key length, last nibble ignored");
    }
  }

  if args.show_file() {
    show::file_header(out, dino.dhdr(), args.verbose)?;
  }
  if args.show_sections() {
    show::section_headers(out, &dino, args)?;
  }
  if args.show_names() {
    show::nametable(out, &dino)?;
  }

  if !(args.show_indexes() || args.verify) {
    return Ok(());
  }
  let loaded = dino.load_indexes().map_err(read)?;
  log::debug!("{loaded} indexes loaded from {}", args.file.display());

  if args.show_indexes() {
    show::indexes(out, &dino, args)?;
  }
  if args.verify {
    let Report { total, bad } = verify::verify(out, &dino, args)?;
    if bad > 0 {
      return Err(Error::Verify { bad, total });
    }
  }
  Ok(())
}
