use clap::Parser;

use cli::{Cli, run};

fn main() {
  tracing_subscriber::fmt::init();

  if let Err(e) = run(Cli::parse()) {
    tracing::error!("{e}");
    std::process::exit(1);
  }
}
