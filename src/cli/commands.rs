use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about,
    long_about = "Litiaina GF(2^8) field and bit array toolkit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    Add,
    Sub,
    Mul,
    Div,
    Inv,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Apply one field operation to byte operands (decimal or 0x-prefixed hex).
    Field {
        #[arg(short, long, value_enum)]
        op: FieldOp,

        #[arg(value_parser = parse_byte)]
        a: u8,

        #[arg(value_parser = parse_byte)]
        b: Option<u8>,
    },
    /// Dump the multiplicative inverse table as JSON.
    InverseTable {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Exhaustively check the field laws over every pair of bytes.
    Verify,
    /// Load bit arrays from files or a 0/1 pattern and report on them.
    Bits {
        #[arg(short, long, num_args = 1.., conflicts_with = "pattern")]
        input: Vec<PathBuf>,

        #[arg(short, long)]
        pattern: Option<String>,

        /// Number of leading bits to print per array.
        #[arg(long, default_value_t = 64)]
        preview: usize,
    },
    /// Invert a square byte matrix stored as a JSON array of rows.
    Invert {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn parse_byte(s: &str) -> Result<u8> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid hex byte: {:?}", s)),
        None => s
            .parse()
            .with_context(|| format!("Invalid byte: {:?}", s)),
    }
}
