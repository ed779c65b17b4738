use aok::{OK, Void};
use dino_digest::{DigestId, Error, Hasher, digest};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const ABC_SHA224: &str = "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7";

#[test]
fn test_ids() -> Void {
  assert_eq!(DigestId::from_u8(8)?, DigestId::Sha256);
  assert!(matches!(DigestId::from_u8(4), Err(Error::UnknownDigest(4))));
  assert!(matches!(DigestId::from_u8(0), Err(Error::UnknownDigest(0))));
  assert_eq!(DigestId::from_name("sha512"), Some(DigestId::Sha512));
  assert_eq!(DigestId::Sha384.size(), 48);
  assert!(DigestId::Sha1.deprecated());
  assert_eq!(DigestId::by_size(32), Some(DigestId::Sha256));
  assert_eq!(DigestId::by_size(28), Some(DigestId::Sha224));
  assert_eq!(DigestId::by_size(20), Some(DigestId::Ripemd160));
  assert_eq!(DigestId::by_size(16), None);
  OK
}

#[test]
fn test_hasher() -> Void {
  let mut h = Hasher::new(DigestId::Sha256)?;
  h.update(b"a");
  h.update(b"bc");
  assert_eq!(hex::encode(h.finish()), ABC_SHA256);

  // finish resets 完成后重置
  h.update(b"abc");
  assert_eq!(hex::encode(h.finish()), ABC_SHA256);

  h.update(b"junk");
  h.start();
  h.update(b"abc");
  assert_eq!(hex::encode(h.finish()), ABC_SHA256);

  assert_eq!(hex::encode(digest(DigestId::Sha224, b"abc")?), ABC_SHA224);
  OK
}

#[test]
fn test_sizes_match() -> Void {
  for id in DigestId::ALL.into_iter().filter(|id| id.avail()) {
    assert_eq!(digest(id, b"")?.len(), id.size());
    assert_eq!(Hasher::new(id)?.id(), id);
  }
  assert!(matches!(
    Hasher::new(DigestId::Md5),
    Err(Error::Unsupported(DigestId::Md5))
  ));
  OK
}
