use std::io::{self, Write};

use aok::{OK, Void};
use clap::Parser;
use dino::{
  CompressId, Dhdr, Endian, SecType, Shape, Shdr, Val, encoding, index::FANOUT_LEN, sec_flag,
};
use dino_digest::DigestId;
use dinoinfo::{Args, Error, HexKey, abbrev, run};
use log::info;
use tempfile::NamedTempFile;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const ITEMS: [&[u8]; 3] = [b"alpha", b"beta", b"gamma"];

fn key(item: &[u8]) -> io::Result<Vec<u8>> {
  dino_digest::digest(DigestId::Sha256, item).map_err(io::Error::other)
}

/// "data" blob of the items and "data.idx" keyed by their SHA-256
fn fixture(compress: bool, corrupt: bool) -> io::Result<NamedTempFile> {
  let endian = Endian::Little;
  let opts = dino_compress::Opts::default();

  let mut blob = Vec::new();
  let mut entries = Vec::new();
  for item in ITEMS {
    let stored = if compress {
      dino_compress::enc(CompressId::Zstd, item, &opts).map_err(io::Error::other)?
    } else {
      item.to_vec()
    };
    entries.push((key(item)?, Val::new(blob.len() as u64, stored.len() as u64)));
    blob.extend(stored);
  }
  if corrupt {
    blob[0] ^= 0x20;
  }
  entries.sort_by(|a, b| a.0.cmp(&b.0));

  let shape = Shape::new(32, 0, 0).map_err(io::Error::other)?;
  let mut fanout = [0u32; FANOUT_LEN];
  for (k, _) in &entries {
    for n in &mut fanout[usize::from(k[0])..] {
      *n += 1;
    }
  }
  let mut idx = endian.put_u32s(&fanout);
  for (k, _) in &entries {
    idx.extend_from_slice(k);
  }
  for (_, v) in &entries {
    idx.extend(endian.put_val(shape.val_shape(), v).map_err(io::Error::other)?);
  }

  let namtab = b"data\0data.idx\0";
  let shdrs = [
    Shdr {
      name: 0,
      sectype: SecType::BLOB,
      flags: if compress { sec_flag::COMPRESSED } else { 0 },
      info: 0,
      size: blob.len() as u32,
      count: 0,
    },
    Shdr {
      name: 5,
      sectype: SecType::INDEX,
      flags: 0,
      info: shape.to_info(),
      size: idx.len() as u32,
      count: entries.len() as u32,
    },
  ];
  let dhdr = Dhdr {
    encoding: encoding::LSB,
    compress_id: (if compress { CompressId::Zstd } else { CompressId::None }) as u8,
    section_count: 2,
    sectab_size: (shdrs.len() * Shdr::SIZE) as u16,
    namtab_size: namtab.len() as u16,
    ..Dhdr::new()
  };

  let mut tmp = NamedTempFile::new()?;
  tmp.write_all(&dhdr.to_bytes().map_err(io::Error::other)?)?;
  for s in &shdrs {
    tmp.write_all(&endian.put_shdr(s))?;
  }
  tmp.write_all(namtab)?;
  tmp.write_all(&blob)?;
  tmp.write_all(&idx)?;
  tmp.flush()?;
  Ok(tmp)
}

fn parse(tmp: &NamedTempFile, flags: &[&str]) -> Args {
  let path = tmp.path().to_string_lossy().into_owned();
  let mut argv = vec!["dinoinfo".to_owned()];
  argv.extend(flags.iter().map(|s| s.to_string()));
  argv.push(path);
  Args::parse_from(argv)
}

fn output(tmp: &NamedTempFile, flags: &[&str]) -> io::Result<String> {
  let mut out = Vec::new();
  run(&parse(tmp, flags), &mut out).map_err(io::Error::other)?;
  let out = String::from_utf8(out).map_err(io::Error::other)?;
  info!("dinoinfo {flags:?}\n{out}");
  Ok(out)
}

#[test]
fn test_file_header() -> Void {
  let tmp = fixture(false, false)?;
  let out = output(&tmp, &["-f"])?;
  let want = "DINO v0 Object Header:
  type: 0x01 (archive), version 0, arch 0x00 (none)
  encoding: little-endian, 32-bit section offsets
  sectab: offset 0010 size 0020 count 2
  namtab: offset 0030 size 000e
  compression format: none
";
  assert_eq!(out, want);
  OK
}

#[test]
fn test_section_headers() -> Void {
  let tmp = fixture(true, false)?;
  let out = output(&tmp, &["-s", "-v"])?;
  assert!(out.starts_with("\nSection Headers:\n"));
  let lines: Vec<_> = out.lines().collect();
  assert_eq!(lines.len(), 3 + 2 * 2);
  assert!(lines[3].starts_with("    0   01 data "));
  assert!(lines[3].contains("-------c 0000000000000000"));
  assert!(lines[4].contains("blob offset"));
  assert!(lines[5].starts_with("    1   02 data.idx "));
  assert!(lines[5].ends_with("-------- 0000000000000020"));

  let out = output(&tmp, &["--sectab", "-j", "data.idx"])?;
  assert!(!out.contains(" data "));
  assert!(out.contains(" data.idx "));
  OK
}

#[test]
fn test_nametable() -> Void {
  let tmp = fixture(false, false)?;
  let out = output(&tmp, &["-n"])?;
  assert_eq!(
    out,
    "\nNametable:\n  0000-0004 \"data\\0\"\n  0005-000d \"data.idx\\0\"\n"
  );
  OK
}

#[test]
fn test_indexes() -> Void {
  let tmp = fixture(false, false)?;
  let out = output(&tmp, &["-i"])?;
  assert!(out.contains("  Index section data.idx -> data, 3 keys, keysize 32\n"));
  let alpha = key(b"alpha")?;
  let line = format!(
    "    key {} size 00000005 offset 00000000\n",
    &hex::encode(&alpha)[..8]
  );
  assert!(out.contains(&line), "{line}");
  assert_eq!(out.matches("    key ").count(), 3);

  // prefix filter
  let prefix = hex::encode(&alpha[..4]);
  let out = output(&tmp, &["-i", "-k", &prefix])?;
  assert_eq!(out.matches("    key ").count(), 1);
  assert!(out.contains(&line));

  // exact key, full width
  let beta = hex::encode(key(b"beta")?);
  let out = output(&tmp, &["-i", "--no-abbrev-key", "-K", &beta])?;
  assert_eq!(out.matches("    key ").count(), 1);
  assert!(out.contains(&format!("    key {beta} size 00000004 offset 00000005\n")));

  // an exact key must be full width
  let out = output(&tmp, &["-i", "-K", &prefix])?;
  assert_eq!(out.matches("    key ").count(), 0);

  let out = output(&tmp, &["-i", "--abbrev-key", "2"])?;
  assert!(out.contains(&format!("    key {} size", &hex::encode(&alpha)[..2])));

  let out = output(&tmp, &["-a", "-j", "data"])?;
  assert!(out.contains("DINO v0 Object Header:"));
  assert!(!out.contains("Index section"));
  OK
}

#[test]
fn test_verify() -> Void {
  for compress in [false, true] {
    let tmp = fixture(compress, false)?;
    let out = output(&tmp, &["--verify", "-v"])?;
    assert!(out.contains("  data.idx: 3 items, sha256, 0 bad\n"));
    assert_eq!(out.matches(" ok\n").count(), 3);
  }

  let tmp = fixture(false, true)?;
  let mut out = Vec::new();
  let err = run(&parse(&tmp, &["--verify"]), &mut out);
  let Err(err) = err else {
    panic!("corrupt item passed verification");
  };
  assert!(matches!(err, Error::Verify { bad: 1, total: 3 }));
  assert_eq!(err.code(), 3);
  let out = String::from_utf8(out)?;
  let alpha = hex::encode(key(b"alpha")?);
  assert!(out.contains(&format!("    key {alpha} MISMATCH ")));
  OK
}

#[test]
fn test_exit_codes() -> Void {
  let tmp = fixture(false, false)?;
  let mut args = parse(&tmp, &["-f"]);
  args.file = tmp.path().with_extension("missing");
  let mut out = Vec::new();
  let err = run(&args, &mut out).err();
  assert!(matches!(err, Some(Error::Open { .. })));
  assert_eq!(err.map(|e| e.code()), Some(1));

  let mut junk = NamedTempFile::new()?;
  junk.write_all(b"not a dino file at all")?;
  junk.flush()?;
  let err = run(&parse(&junk, &["-f"]), &mut out).err();
  assert!(matches!(
    err,
    Some(Error::Read {
      source: dino::Error::BadMagic(_),
      ..
    })
  ));
  assert_eq!(err.map(|e| e.code()), Some(2));
  OK
}

#[test]
fn test_args() -> Void {
  let path = "x.dino";
  assert!(Args::try_parse_from(["dinoinfo", path]).is_err());
  assert!(Args::try_parse_from(["dinoinfo", "-f"]).is_err());
  assert!(Args::try_parse_from(["dinoinfo", "-i", "-k", "zz", path]).is_err());
  assert!(Args::try_parse_from(["dinoinfo", "-i", "--abbrev-key", "257", path]).is_err());
  assert!(Args::try_parse_from(["dinoinfo", "-i", "-k", "00", "-K", "00", path]).is_err());

  let args = Args::try_parse_from(["dinoinfo", "-a", "--abbrev-key", "256", path])?;
  assert!(args.show_file() && args.show_sections() && args.show_names() && args.show_indexes());
  assert_eq!(args.abbrev(), 256);
  let args = Args::try_parse_from(["dinoinfo", "-i", "--no-abbrev-key", path])?;
  assert_eq!(args.abbrev(), 0);
  assert!(!args.show_file());

  let args = Args::try_parse_from(["dinoinfo", "-i", "-k", "ABc", path])?;
  assert_eq!(
    args.key,
    Some(HexKey {
      bytes: vec![0xab],
      odd: true
    })
  );
  assert!("".parse::<HexKey>().is_err());
  assert!("0g".parse::<HexKey>().is_err());

  assert_eq!(abbrev(&[0xde, 0xad, 0xbe, 0xef], 3), "dea");
  assert_eq!(abbrev(&[0xde, 0xad], 0), "dead");
  assert_eq!(abbrev(&[0xde, 0xad], 100), "dead");
  OK
}

#[test]
fn test_bad_index_tables_only() -> Void {
  let tmp = fixture(false, false)?;
  let mut bytes = std::fs::read(tmp.path())?;
  // data.idx descriptor claims one key more than its payload holds
  bytes[44..48].copy_from_slice(&4u32.to_le_bytes());
  let mut bad = NamedTempFile::new()?;
  bad.write_all(&bytes)?;
  bad.flush()?;

  assert!(output(&bad, &["-f"])?.starts_with("DINO v0 Object Header:"));
  assert!(output(&bad, &["-s", "-n"])?.contains("\nNametable:\n"));

  for flags in [["-i"], ["--verify"]] {
    let err = run(&parse(&bad, &flags), &mut Vec::new()).err();
    assert!(
      matches!(
        err,
        Some(Error::Read {
          source: dino::Error::IndexSize { idx: 1, .. },
          ..
        })
      ),
      "{flags:?} {err:?}"
    );
    assert_eq!(err.map(|e| e.code()), Some(2));
  }
  OK
}
