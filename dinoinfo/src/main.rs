use std::{io::Write, process::ExitCode};

use clap::Parser;
use dinoinfo::{Args, run};

fn main() -> ExitCode {
  log_init::init();
  let args = Args::parse();
  let mut out = std::io::stdout().lock();
  let r = run(&args, &mut out);
  let _ = out.flush();
  match r {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("dinoinfo: {e}");
      ExitCode::from(e.code())
    }
  }
}
