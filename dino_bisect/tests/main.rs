use aok::{OK, Void};
use dino_bisect::{KeyRange, Search, Stride, bisect, exact, prefix_range, prefix_range_by, search};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const INTDATA: [u32; 7] = [0, 5, 9, 42, 2903, 31337, 77777];

/// Big-endian so memcmp order equals numeric order
/// 大端序使 memcmp 顺序等于数值顺序
fn int_bytes() -> Vec<u8> {
  INTDATA.iter().flat_map(|v| v.to_be_bytes()).collect()
}

const BINDATA: [u8; 35] = [
  0x00, 0x00, 0x00, 0x00, 0xff, //
  0x00, 0x00, 0x00, 0x29, 0x03, //
  0x00, 0x00, 0x01, 0xde, 0xad, //
  0x00, 0x00, 0x01, 0xde, 0xad, //
  0x00, 0x00, 0x02, 0x01, 0x00, //
  0x00, 0x00, 0x03, 0x07, 0x00, //
  0x00, 0x00, 0x10, 0x00, 0x00, //
];

/// Random sorted array of `num` items, `size` bytes each, values in a small alphabet
/// 随机有序数组，字节取自小字母表以制造重复与共享前缀
fn rand_sorted(num: usize, size: usize) -> Vec<u8> {
  let mut items: Vec<Vec<u8>> = (0..num)
    .map(|_| (0..size).map(|_| fastrand::u8(0..4)).collect())
    .collect();
  items.sort();
  items.concat()
}

#[test]
fn test_selftest() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  assert_eq!(arr.len(), 7);
  for i in 0..arr.len() - 1 {
    assert!(arr.item(i) <= arr.item(i + 1));
  }
  assert!(arr.get(7).is_none());
  OK
}

#[test]
fn test_search_trivial() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  assert_eq!(search(arr.item(1), &arr, 0, 7, 5), Search::Found(1));
  OK
}

#[test]
fn test_search_first_last() -> Void {
  let data = int_bytes();
  let arr = Stride::new(&data, 4);
  assert_eq!(search(&0u32.to_be_bytes(), &arr, 0, 7, 4), Search::Found(0));
  assert_eq!(search(&77777u32.to_be_bytes(), &arr, 0, 7, 4), Search::Found(6));
  OK
}

#[test]
fn test_search_not_found() -> Void {
  let data = int_bytes();
  let arr = Stride::new(&data, 4);
  assert_eq!(search(&2904u32.to_be_bytes(), &arr, 0, 7, 4), Search::NotFound(5));
  assert_eq!(search(&2902u32.to_be_bytes(), &arr, 0, 7, 4), Search::NotFound(4));
  assert_eq!(search(&99999u32.to_be_bytes(), &arr, 0, 7, 4), Search::NotFound(7));
  assert_eq!(search(&1u32.to_be_bytes(), &arr, 0, 0, 4), Search::NotFound(0));
  OK
}

#[test]
fn test_search_duplicate() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  let r = search(arr.item(2), &arr, 0, 7, 5);
  assert!(matches!(r, Search::Found(2) | Search::Found(3)));
  OK
}

#[test]
fn test_search_clamps_window() -> Void {
  let data = int_bytes();
  let arr = Stride::new(&data, 4);
  assert_eq!(search(&77777u32.to_be_bytes(), &arr, 5, 100, 4), Search::Found(6));
  OK
}

#[test]
fn test_exact() -> Void {
  let data = int_bytes();
  let arr = Stride::new(&data, 4);
  assert!(exact(&666u32.to_be_bytes(), &arr, 7, 4).is_none());
  let arr = Stride::new(&BINDATA, 5);
  let key = &BINDATA[20..25];
  assert_eq!(exact(key, &arr, 7, 5), Some(key));
  OK
}

#[test]
fn test_partial_size_compare() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  // Only the first 3 bytes count, [00 00 01] hits item 2 or 3
  // 只比较前 3 字节
  let r = search(&[0x00, 0x00, 0x01, 0x99, 0x99], &arr, 0, 7, 3);
  assert!(matches!(r, Search::Found(2) | Search::Found(3)));
  OK
}

#[test]
fn test_bisect_leftmost() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  assert_eq!(bisect(arr.item(2), &arr, 0, 7, 5), 2);
  assert_eq!(bisect(&[0xff; 5], &arr, 0, 7, 5), 7);
  assert_eq!(bisect(&[0x00; 5], &arr, 0, 7, 5), 0);
  assert_eq!(bisect(&[0x00; 5], &arr, 3, 7, 5), 3);
  OK
}

#[test]
fn test_bisect_partition_property() -> Void {
  for _ in 0..200 {
    let size = fastrand::usize(1..4);
    let num = fastrand::usize(0..40);
    let data = rand_sorted(num, size);
    let arr = Stride::new(&data, size);
    let key: Vec<u8> = (0..size).map(|_| fastrand::u8(0..4)).collect();
    let lo = bisect(&key, &arr, 0, num, size);
    for i in 0..lo {
      assert!(arr.item(i) < key.as_slice());
    }
    for i in lo..num {
      assert!(arr.item(i) >= key.as_slice());
    }
  }
  OK
}

#[test]
fn test_search_matches_bisect() -> Void {
  for _ in 0..200 {
    let size = fastrand::usize(1..4);
    let num = fastrand::usize(0..40);
    let data = rand_sorted(num, size);
    let arr = Stride::new(&data, size);
    let key: Vec<u8> = (0..size).map(|_| fastrand::u8(0..4)).collect();
    match search(&key, &arr, 0, num, size) {
      Search::Found(i) => assert_eq!(arr.item(i), key.as_slice()),
      Search::NotFound(n) => {
        assert_eq!(n, bisect(&key, &arr, 0, num, size));
        if n > 0 {
          assert!(arr.item(n - 1) < key.as_slice());
        }
        if n < num {
          assert!(arr.item(n) > key.as_slice());
        }
      }
    }
  }
  OK
}

#[test]
fn test_search_unique_index() -> Void {
  let num = 300;
  let mut vals: Vec<u32> = (0..num).map(|_| fastrand::u32(..)).collect();
  vals.sort_unstable();
  vals.dedup();
  let data: Vec<u8> = vals.iter().flat_map(|v| v.to_be_bytes()).collect();
  let arr = Stride::new(&data, 4);
  for (i, v) in vals.iter().enumerate() {
    assert_eq!(search(&v.to_be_bytes(), &arr, 0, vals.len(), 4), Search::Found(i));
  }
  OK
}

#[test]
fn test_prefix_range_bindata() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  let r = prefix_range(&[0x00, 0x00, 0x01], &arr, 0, 7, 5);
  assert_eq!(r, KeyRange { lo: 2, hi: 3 });
  let r = prefix_range(&[0x00, 0x00], &arr, 0, 7, 5);
  assert_eq!(r, KeyRange { lo: 0, hi: 6 });
  let r = prefix_range(&[0x00, 0x00, 0x02], &arr, 0, 7, 5);
  assert!(r.is_unique());
  assert_eq!(r.lo, 4);
  let r = prefix_range(&[0x00, 0x00, 0x04], &arr, 0, 7, 5);
  assert!(r.is_empty());
  assert_eq!(r.hi, 6);
  assert_eq!(r.len(), 0);
  OK
}

#[test]
fn test_prefix_range_full_key() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  let r = prefix_range(&BINDATA[10..15], &arr, 0, 7, 5);
  assert_eq!(r, KeyRange { lo: 2, hi: 3 });
  let r = prefix_range(&BINDATA[30..35], &arr, 0, 7, 5);
  assert_eq!(r, KeyRange { lo: 6, hi: 6 });
  OK
}

#[test]
fn test_prefix_range_empty_prefix() -> Void {
  let arr = Stride::new(&BINDATA, 5);
  assert_eq!(prefix_range(&[], &arr, 0, 7, 5), KeyRange { lo: 0, hi: 6 });
  assert!(prefix_range(&[], &arr, 0, 0, 5).is_empty());
  OK
}

#[test]
fn test_prefix_range_property() -> Void {
  for round in 0..300 {
    let size = fastrand::usize(2..5);
    let num = fastrand::usize(0..50);
    let data = rand_sorted(num, size);
    let arr = Stride::new(&data, size);
    let plen = fastrand::usize(1..size);
    let prefix: Vec<u8> = (0..plen).map(|_| fastrand::u8(0..4)).collect();
    let r = prefix_range(&prefix, &arr, 0, num, size);
    let want: Vec<usize> = (0..num).filter(|&i| arr.item(i)[..plen] == prefix[..]).collect();
    if want.is_empty() {
      assert!(r.is_empty(), "round {round}: {r:?}");
      assert_eq!(r.hi, bisect(&prefix, &arr, 0, num, plen));
    } else {
      assert_eq!(r.indices().collect::<Vec<_>>(), want, "round {round}");
    }
  }
  info!("prefix_range property ok");
  OK
}

#[test]
fn test_prefix_range_by_reverse() -> Void {
  // Descending data searched with a reversed comparator
  // 降序数据配合反向比较器
  let data: Vec<u8> = [9u8, 7, 7, 5, 1].to_vec();
  let arr = Stride::new(&data, 1);
  let r = prefix_range_by(&[7], &arr, 0, 5, 1, |a, b| b.cmp(a));
  assert_eq!(r, KeyRange { lo: 1, hi: 2 });
  OK
}

#[test]
fn test_key_range_indices() -> Void {
  assert_eq!(KeyRange { lo: 2, hi: 4 }.indices(), 2..5);
  assert_eq!(KeyRange::empty(3).indices().len(), 0);
  assert_eq!(KeyRange::empty(3).hi, 3);
  OK
}
