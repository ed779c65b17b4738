//! zstd backend over the raw streaming API
//! 基于 zstd 原始流接口的后端

use zstd::stream::raw::{Decoder, Encoder, InBuffer, Operation, OutBuffer};

use crate::{Compress, Decompress, InBuf, Opts, OutBuf, Result};

/// Run one streaming step and advance both cursors
/// 执行一步流操作并推进两个游标
fn step<O: Operation>(op: &mut O, input: &mut InBuf, output: &mut OutBuf) -> Result<usize> {
  let (hint, ipos, opos) = {
    let mut i = InBuffer::around(input.rest());
    let mut o = OutBuffer::around(output.rest_mut());
    let hint = op.run(&mut i, &mut o)?;
    (hint, i.pos(), o.pos())
  };
  input.pos += ipos;
  output.pos += opos;
  Ok(hint)
}

pub struct ZstdEnc {
  enc: Encoder<'static>,
}

impl ZstdEnc {
  pub fn new() -> Result<Self> {
    Ok(Self {
      enc: Encoder::new(Opts::default().level)?,
    })
  }
}

impl Compress for ZstdEnc {
  fn setup(&mut self, opts: &Opts) -> Result<()> {
    self.enc = Encoder::new(opts.level)?;
    Ok(())
  }

  fn compress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize> {
    step(&mut self.enc, input, output)
  }

  fn flush(&mut self, output: &mut OutBuf) -> Result<usize> {
    let (left, opos) = {
      let mut o = OutBuffer::around(output.rest_mut());
      let left = self.enc.flush(&mut o)?;
      (left, o.pos())
    };
    output.pos += opos;
    Ok(left)
  }

  fn end(&mut self, output: &mut OutBuf) -> Result<usize> {
    let (left, opos) = {
      let mut o = OutBuffer::around(output.rest_mut());
      let left = self.enc.finish(&mut o, true)?;
      (left, o.pos())
    };
    output.pos += opos;
    Ok(left)
  }
}

pub struct ZstdDec {
  dec: Decoder<'static>,
}

impl ZstdDec {
  pub fn new() -> Result<Self> {
    Ok(Self { dec: Decoder::new()? })
  }
}

impl Decompress for ZstdDec {
  fn setup(&mut self) -> Result<()> {
    self.dec.reinit()?;
    Ok(())
  }

  fn decompress(&mut self, input: &mut InBuf, output: &mut OutBuf) -> Result<usize> {
    step(&mut self.dec, input, output)
  }
}
