use aok::{OK, Void};
use dino_compress::{
  CompressId, Error, InBuf, Opts, OutBuf, dec, dec_max, decoder, enc, encoder,
};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const CHUNK: usize = 64;
const BLOCK: usize = CHUNK * 16;

/// One random chunk repeated to fill a block
/// 随机块重复填满整块
fn block() -> Vec<u8> {
  let chunk: Vec<u8> = (0..CHUNK).map(|_| fastrand::u8(..)).collect();
  chunk.repeat(BLOCK / CHUNK)
}

#[test]
fn test_id() -> Void {
  assert_eq!(CompressId::from_u8(6)?, CompressId::Zstd);
  assert!(matches!(CompressId::from_u8(7), Err(Error::UnknownCodec(7))));
  assert_eq!(CompressId::from_name("zstd"), Some(CompressId::Zstd));
  assert_eq!(CompressId::from_name("FUNK"), None);
  for id in CompressId::ALL {
    assert_eq!(CompressId::from_u8(id as u8)?, id);
    assert_eq!(CompressId::from_name(id.name()), Some(id));
  }
  assert!(CompressId::None.avail());
  assert!(CompressId::Zstd.avail());
  assert!(!CompressId::Xz.avail());
  OK
}

#[test]
fn test_unsupported() -> Void {
  assert!(matches!(
    encoder(CompressId::Xz),
    Err(Error::Unsupported(CompressId::Xz))
  ));
  assert!(matches!(
    decoder(CompressId::Lz4),
    Err(Error::Unsupported(CompressId::Lz4))
  ));
  OK
}

#[test]
fn test_passthrough_stream() -> Void {
  let src = block();
  let mut c = encoder(CompressId::None)?;
  c.setup(&Opts::default())?;
  let mut dst = vec![0u8; BLOCK];
  let mut input = InBuf::new(&src);
  let mut output = OutBuf::new(&mut dst);
  assert_eq!(c.compress(&mut input, &mut output)?, 0);
  assert_eq!(c.end(&mut output)?, 0);
  assert_eq!(input.pos, BLOCK);
  assert_eq!(output.written(), &src[..]);
  OK
}

#[test]
fn test_zstd_stream() -> Void {
  let src = block();
  let mut c = encoder(CompressId::Zstd)?;
  c.setup(&Opts { level: 3 })?;
  let mut packed = vec![0u8; BLOCK * 2];
  let mut input = InBuf::new(&src);
  let mut output = OutBuf::new(&mut packed);
  c.compress(&mut input, &mut output)?;
  assert_eq!(c.end(&mut output)?, 0);
  assert_eq!(input.pos, BLOCK);
  let n = output.pos;
  assert!(n > 0);
  assert!(n < BLOCK);
  info!("zstd {BLOCK} -> {n}");

  let mut d = decoder(CompressId::Zstd)?;
  d.setup()?;
  let mut plain = vec![0u8; BLOCK + CHUNK];
  let mut input = InBuf::new(&packed[..n]);
  let mut output = OutBuf::new(&mut plain);
  assert_eq!(d.decompress(&mut input, &mut output)?, 0);
  assert_eq!(output.pos, BLOCK);
  assert_eq!(&plain[..BLOCK], &src[..]);
  OK
}

#[test]
fn test_zstd_small_out() -> Void {
  // Output cursor smaller than the frame forces several steps
  // 输出小于帧时需多步完成
  let src = block();
  let packed = enc(CompressId::Zstd, &src, &Opts::default())?;
  let mut d = decoder(CompressId::Zstd)?;
  d.setup()?;
  let mut plain = Vec::new();
  let mut input = InBuf::new(&packed);
  loop {
    let mut small = [0u8; 100];
    let mut output = OutBuf::new(&mut small);
    let hint = d.decompress(&mut input, &mut output)?;
    plain.extend_from_slice(output.written());
    if hint == 0 {
      break;
    }
  }
  assert_eq!(plain, src);
  OK
}

#[test]
fn test_one_shot() -> Void {
  for id in [CompressId::None, CompressId::Zstd] {
    for len in [0usize, 1, 100, 70_000, 300_000] {
      let src: Vec<u8> = (0..len).map(|i| (i % 251) as u8 ^ fastrand::u8(0..2)).collect();
      let packed = enc(id, &src, &Opts::default())?;
      assert_eq!(dec(id, &packed)?, src, "{id} {len}");
    }
  }
  OK
}

#[test]
fn test_truncated() -> Void {
  let src = block();
  let packed = enc(CompressId::Zstd, &src, &Opts::default())?;
  let r = dec(CompressId::Zstd, &packed[..packed.len() - 4]);
  assert!(r.is_err());
  OK
}

#[test]
fn test_dec_max() -> Void {
  // a few bytes of zstd that expand to 1 MiB
  let src = vec![0u8; 1 << 20];
  for id in [CompressId::None, CompressId::Zstd] {
    let packed = enc(id, &src, &Opts::default())?;
    info!("{id} {} -> {}", src.len(), packed.len());
    assert_eq!(dec_max(id, &packed, src.len())?, src);
    for limit in [0, 100, src.len() - 1] {
      assert!(
        matches!(dec_max(id, &packed, limit), Err(Error::TooLarge { limit: l }) if l == limit),
        "{id} {limit}"
      );
    }
  }
  assert!(dec_max(CompressId::Zstd, &enc(CompressId::Zstd, b"", &Opts::default())?, 0)?.is_empty());
  OK
}
