//! Command line
//! 命令行

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::HexKey;

pub mod default {
  /// Hex characters shown per key
  /// 每个键显示的十六进制字符数
  pub const ABBREV_KEY: u16 = 8;
  pub const ABBREV_KEY_MAX: i64 = 256;
}

#[derive(Parser, Debug, Clone)]
#[command(
  version,
  about = "Print information from DINO file in human-readable form.",
  group(
    ArgGroup::new("show")
      .required(true)
      .multiple(true)
      .args(["file_headers", "section_headers", "nametable", "indexes", "all", "verify"])
  )
)]
pub struct Args {
  /// Show the contents of the overall file header
  #[arg(short = 'f', long)]
  pub file_headers: bool,

  /// Show the contents of the section header table
  #[arg(short = 's', long, alias = "sectab")]
  pub section_headers: bool,

  /// Show the contents of the object nametable
  #[arg(short = 'n', long, alias = "namtab")]
  pub nametable: bool,

  /// Show the contents of index sections
  #[arg(short = 'i', long)]
  pub indexes: bool,

  /// Show the contents of all headers and indexes
  #[arg(short = 'a', long = "all-headers")]
  pub all: bool,

  /// Abbreviate keys to N characters
  #[arg(
    long,
    value_name = "N",
    default_value_t = default::ABBREV_KEY,
    value_parser = clap::value_parser!(u16).range(0..=default::ABBREV_KEY_MAX)
  )]
  pub abbrev_key: u16,

  /// Show full hexadecimal keys
  #[arg(long)]
  pub no_abbrev_key: bool,

  /// Produce verbose output
  #[arg(short, long)]
  pub verbose: bool,

  /// Only show info for section NAME
  #[arg(short = 'j', long = "section", value_name = "NAME")]
  pub section: Option<String>,

  /// Show index info for keys starting with KEY
  #[arg(short = 'k', long = "key", value_name = "KEY", conflicts_with = "key_exact")]
  pub key: Option<HexKey>,

  /// Show index info for FULLKEY
  #[arg(short = 'K', long = "key-exact", value_name = "FULLKEY")]
  pub key_exact: Option<HexKey>,

  /// Re-hash every indexed item and compare it with its key
  #[arg(long)]
  pub verify: bool,

  pub file: PathBuf,
}

impl Args {
  #[inline]
  pub fn show_file(&self) -> bool {
    self.all || self.file_headers
  }

  #[inline]
  pub fn show_sections(&self) -> bool {
    self.all || self.section_headers
  }

  #[inline]
  pub fn show_names(&self) -> bool {
    self.all || self.nametable
  }

  #[inline]
  pub fn show_indexes(&self) -> bool {
    self.all || self.indexes
  }

  /// Hex characters per key, 0 for the full key
  /// 每个键的十六进制字符数，0 表示完整显示
  #[inline]
  pub fn abbrev(&self) -> usize {
    if self.no_abbrev_key {
      0
    } else {
      self.abbrev_key.into()
    }
  }

  /// Whether a section named `name` passes `--section`
  /// 名为 `name` 的段是否通过 `--section` 过滤
  pub fn wants(&self, name: Option<&str>) -> bool {
    match &self.section {
      Some(want) => name == Some(want.as_str()),
      None => true,
    }
  }
}
