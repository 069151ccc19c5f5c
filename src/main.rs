//! # Litiaina GF(2^8)
//!
//! ## Usage
//!
//! ### Field arithmetic
//!
//! ```bash
//! cargo run --release -- field --op mul 0x53 0xca
//! cargo run --release -- field --op inv 0x53
//! ```
//!
//! ### Checking the field laws
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- verify
//! ```
//!
//! ### Inspecting bit arrays
//!
//! ```bash
//! cargo run --release -- bits --pattern 1011
//! cargo run --release -- bits --input shard_00.dat shard_01.dat --preview 32
//! ```

mod cli;
mod io;

use crate::{
    cli::commands::{Cli, Commands},
    io::{
        bits::handle_bits,
        field::{handle_field, handle_inverse_table, handle_verify},
        matrix::handle_invert,
    },
};
use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;


#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    let start_time = Instant::now();

    let result = match cli.command {
        Commands::Field { .. } => handle_field(cli.command).await,
        Commands::InverseTable { .. } => handle_inverse_table(cli.command).await,
        Commands::Verify => handle_verify(cli.command).await,
        Commands::Bits { .. } => handle_bits(cli.command).await,
        Commands::Invert { .. } => handle_invert(cli.command).await,
    };

    if let Err(e) = &result {
        error!("Operation failed: {:?}", e);
    }

    info!("Total execution time: {:.2?}", start_time.elapsed());

    result
}
