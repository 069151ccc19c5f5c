use anyhow::{Context, Result, anyhow};
use futures_util::future::join_all;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::cli::commands::Commands;
use litiaina_gf::BitArray;

#[derive(Serialize, Debug)]
pub struct BitReport {
    pub source: String,
    pub bits: usize,
    pub bytes: usize,
    pub ones: usize,
    pub preview: String,
}

impl BitReport {
    pub fn new(source: String, bits: &BitArray, preview: usize) -> Self {
        Self {
            source,
            bits: bits.len(),
            bytes: bits.as_bytes().len(),
            ones: bits.count_ones(),
            preview: bits
                .iter()
                .take(preview)
                .map(|b| if b { '1' } else { '0' })
                .collect(),
        }
    }
}

#[instrument(skip(args))]
pub async fn handle_bits(args: Commands) -> Result<()> {
    let (inputs, pattern, preview) = match args {
        Commands::Bits {
            input,
            pattern,
            preview,
        } => (input, pattern, preview),
        _ => unreachable!(),
    };

    let reports = match pattern {
        Some(p) => {
            let bits = BitArray::from_bit_str(&p);
            debug!("Parsed pattern into {} bits", bits.len());
            vec![BitReport::new("pattern".to_string(), &bits, preview)]
        }
        None if inputs.is_empty() => {
            return Err(anyhow!("Either --input or --pattern is required"));
        }
        None => {
            info!("Reading {} input file(s)", inputs.len());
            let mut read_handles = Vec::with_capacity(inputs.len());
            for path in inputs {
                read_handles.push(tokio::spawn(async move {
                    let data = fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read input file: {:?}", path))?;
                    let bits = BitArray::from_bytes(data);
                    Ok::<_, anyhow::Error>(BitReport::new(
                        path.display().to_string(),
                        &bits,
                        preview,
                    ))
                }));
            }

            let mut reports = Vec::with_capacity(read_handles.len());
            for result in join_all(read_handles).await {
                reports.push(result.context("Join error in file read task")??);
            }
            reports
        }
    };

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_pattern() {
        let bits = BitArray::from_bit_str("1011000011");
        let report = BitReport::new("pattern".to_string(), &bits, 4);
        assert_eq!(report.bits, 10);
        assert_eq!(report.bytes, 2);
        assert_eq!(report.ones, 5);
        assert_eq!(report.preview, "1011");
    }

    #[test]
    fn test_report_preview_longer_than_array() {
        let bits = BitArray::from_bytes(vec![0x01]);
        let report = BitReport::new("bytes".to_string(), &bits, 64);
        assert_eq!(report.bits, 8);
        assert_eq!(report.preview, "10000000");
    }
}
