//! Re-hash indexed items against their keys
//! 重新计算被索引项的摘要并与键比对

use std::{fs::File, io::Write};

use dino::Dino;
use dino_digest::{DigestId, Hasher};

use crate::{Args, Error, Result, hexkey::abbrev, show::select};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
  pub total: usize,
  pub bad: usize,
}

pub fn verify<W: Write>(out: &mut W, dino: &Dino<File>, args: &Args) -> Result<Report> {
  let mut report = Report::default();
  writeln!(out, "\nVerify:")?;
  for sec in dino.secs() {
    let Some(idx) = sec.index() else {
      continue;
    };
    let name = dino.sec_name(sec);
    if !args.wants(name) {
      continue;
    }
    let name = name.unwrap_or("?");
    let Some(id) = DigestId::by_size(idx.keysize()).filter(|id| id.avail()) else {
      log::warn!("{name}: no digest makes {}-byte keys", idx.keysize());
      writeln!(out, "  {name}: keysize {} has no digest, skipped", idx.keysize())?;
      continue;
    };
    let Some(other) = dino.index_othersec(sec.idx) else {
      log::warn!("{name}: other section {} missing", idx.othersec());
      writeln!(out, "  {name}: other section {} missing, skipped", idx.othersec())?;
      continue;
    };

    let mut hasher = Hasher::new(id)?;
    let (mut total, mut bad) = (0, 0);
    for i in select(args, idx) {
      let (Some(key), Some(val)) = (idx.get_key(i), idx.get_val(i)) else {
        continue;
      };
      let item = dino.read_item(other, &val).map_err(|source| Error::Read {
        path: args.file.clone(),
        source,
      })?;
      hasher.start();
      hasher.update(&item);
      let sum = hasher.finish();
      total += 1;
      if sum != key {
        bad += 1;
        writeln!(
          out,
          "    key {} MISMATCH {}",
          hex::encode(key),
          hex::encode(&sum)
        )?;
      } else if args.verbose {
        writeln!(out, "    key {} ok", abbrev(key, args.abbrev()))?;
      }
    }
    writeln!(out, "  {name}: {total} items, {id}, {bad} bad")?;
    report.total += total;
    report.bad += bad;
  }
  Ok(report)
}
