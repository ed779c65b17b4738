//! Memory geometry that drives array growth
//! 驱动数组增长的内存几何参数

/// Page size and growth chunk, in bytes
/// 页大小与增长块大小（字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geom {
  pub page: usize,
  pub chunk: usize,
}

pub mod default {
  pub const PAGE: usize = 4096;
  /// 4 MiB
  pub const CHUNK: usize = PAGE << 10;
}

impl Default for Geom {
  fn default() -> Self {
    Self {
      page: default::PAGE,
      chunk: default::CHUNK,
    }
  }
}

impl Geom {
  /// Query the OS, keeping defaults for anything it can't tell
  /// 向系统查询，查不到的项保持默认
  pub fn detect() -> Self {
    let mut geom = Self::default();
    if let Some(page) = page_size() {
      geom.page = page;
    }
    if let Some(chunk) = l3_cache_size() {
      geom.chunk = chunk;
    }
    log::trace!("geom {geom:?}");
    geom
  }
}

#[cfg(unix)]
fn sysconf(name: libc::c_int) -> Option<usize> {
  let v = unsafe { libc::sysconf(name) };
  (v > 0).then_some(v as usize)
}

#[cfg(unix)]
fn page_size() -> Option<usize> {
  sysconf(libc::_SC_PAGESIZE)
}

#[cfg(not(unix))]
fn page_size() -> Option<usize> {
  None
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn l3_cache_size() -> Option<usize> {
  sysconf(libc::_SC_LEVEL3_CACHE_SIZE)
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn l3_cache_size() -> Option<usize> {
  None
}

/// Detected once at process start
/// 进程启动时探测一次
#[static_init::dynamic]
pub static GEOM: Geom = Geom::detect();
