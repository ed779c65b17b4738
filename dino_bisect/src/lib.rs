#![cfg_attr(docsrs, feature(doc_cfg))]

//! Binary search family over fixed-stride byte arrays
//! 定长字节数组上的二分查找族
//!
//! Every search compares only the first `size` bytes of an item, so partial
//! keys can be searched without walking past the item.
//! 每次比较只看项的前 `size` 字节，部分键查找不会越过项边界。

mod range;
mod stride;

use std::cmp::Ordering::{self, Equal, Greater, Less};

pub use range::{KeyRange, Search};
pub use stride::Stride;

/// memcmp over the first `size` bytes
/// 比较前 `size` 字节
#[inline]
pub fn cmp_n(a: &[u8], b: &[u8], size: usize) -> Ordering {
  a[..size.min(a.len())].cmp(&b[..size.min(b.len())])
}

/// Find any item equal to `key`
/// 查找任一等于 `key` 的项
pub fn exact_by<'a, F>(key: &[u8], arr: &Stride<'a>, num: usize, cmp: F) -> Option<&'a [u8]>
where
  F: Fn(&[u8], &[u8]) -> Ordering,
{
  let mut base = 0;
  let mut num = arr.clamp(0, num);
  while num > 0 {
    let item = arr.item(base + (num >> 1));
    match cmp(key, item) {
      Equal => return Some(item),
      Greater => {
        base += (num >> 1) + 1;
        num -= 1;
      }
      Less => {}
    }
    num >>= 1;
  }
  None
}

#[inline]
pub fn exact<'a>(key: &[u8], arr: &Stride<'a>, num: usize, size: usize) -> Option<&'a [u8]> {
  exact_by(key, arr, num, |a, b| cmp_n(a, b, size))
}

/// Search `[base, base+num)` for `key`
/// 在 `[base, base+num)` 中查找 `key`
///
/// With duplicates any matching index may come back.
/// 有重复键时返回任一匹配下标。
pub fn search_by<F>(key: &[u8], arr: &Stride, base: usize, num: usize, cmp: F) -> Search
where
  F: Fn(&[u8], &[u8]) -> Ordering,
{
  let mut base = base;
  let mut num = arr.clamp(base, num);
  while num > 0 {
    let idx = base + (num >> 1);
    match cmp(key, arr.item(idx)) {
      Equal => return Search::Found(idx),
      Greater => {
        base = idx + 1;
        num -= 1;
      }
      Less => {}
    }
    num >>= 1;
  }
  Search::NotFound(base)
}

#[inline]
pub fn search(key: &[u8], arr: &Stride, base: usize, num: usize, size: usize) -> Search {
  search_by(key, arr, base, num, |a, b| cmp_n(a, b, size))
}

/// Leftmost index in `[lo, hi]` where `key` keeps the order
/// `[lo, hi]` 中保持有序的最左插入点
pub fn bisect_by<F>(key: &[u8], arr: &Stride, lo: usize, hi: usize, cmp: F) -> usize
where
  F: Fn(&[u8], &[u8]) -> Ordering,
{
  let mut lo = lo;
  let mut hi = hi.min(arr.len());
  while lo < hi {
    let mid = lo + ((hi - lo) >> 1);
    if cmp(key, arr.item(mid)) == Greater {
      lo = mid + 1;
    } else {
      hi = mid;
    }
  }
  lo
}

#[inline]
pub fn bisect(key: &[u8], arr: &Stride, lo: usize, hi: usize, size: usize) -> usize {
  bisect_by(key, arr, lo, hi, |a, b| cmp_n(a, b, size))
}

/// All items in `[base, base+num)` whose first `prefix.len()` bytes equal `prefix`
/// `[base, base+num)` 中前 `prefix.len()` 字节等于 `prefix` 的全部项
///
/// Brackets the prefix with a zero-padded and a 0xFF-padded key, halves the
/// window until an item sits between both, then walks outward linearly.
/// Matching runs are short, so the walk beats two more binary searches.
/// 用补 0 与补 0xFF 的两个键夹住前缀，二分到某项落在两者之间，再线性向两侧扩展。
/// 匹配段通常很短，线性扩展比再做两次二分更快。
///
/// No match gives `KeyRange::empty(n)` with `n` the insertion point.
/// 无匹配时返回 `KeyRange::empty(n)`，`n` 为插入点。
pub fn prefix_range_by<F>(
  prefix: &[u8],
  arr: &Stride,
  base: usize,
  num: usize,
  size: usize,
  cmp: F,
) -> KeyRange
where
  F: Fn(&[u8], &[u8]) -> Ordering,
{
  let plen = prefix.len().min(size);
  let prefix = &prefix[..plen];

  let mut lokey = vec![0x00u8; size];
  lokey[..plen].copy_from_slice(prefix);
  let mut hikey = vec![0xffu8; size];
  hikey[..plen].copy_from_slice(prefix);

  let hit = |i: usize| cmp(prefix, &arr.item(i)[..plen]) == Equal;

  let mut base = base;
  let mut num = arr.clamp(base, num);
  while num > 0 {
    let idx = base + (num >> 1);
    let item = arr.item(idx);
    let lr = cmp(&lokey, item);
    let hr = cmp(&hikey, item);
    if lr != Greater && hr != Less {
      // lokey <= item <= hikey; every match lies in [base, base+num)
      let last = base + num - 1;
      let mut lo = idx;
      while lo > base && hit(lo - 1) {
        lo -= 1;
      }
      let mut hi = idx;
      while hi < last && hit(hi + 1) {
        hi += 1;
      }
      return KeyRange { lo, hi };
    }
    if lr == Greater {
      base = idx + 1;
      num -= 1;
    }
    num >>= 1;
  }
  KeyRange::empty(base)
}

#[inline]
pub fn prefix_range(prefix: &[u8], arr: &Stride, base: usize, num: usize, size: usize) -> KeyRange {
  prefix_range_by(prefix, arr, base, num, size, |a, b| cmp_n(a, b, size))
}
