use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, instrument};

use crate::cli::commands::Commands;
use litiaina_gf::{
    Gf256,
    codec::matrix::{Matrix, invert_matrix},
};

#[instrument(skip(args))]
pub async fn handle_invert(args: Commands) -> Result<()> {
    let (input_path, output_path) = match args {
        Commands::Invert { input, output } => (input, output),
        _ => unreachable!(),
    };

    info!("Reading matrix from: {:?}", input_path);
    let raw = fs::read_to_string(&input_path)
        .await
        .with_context(|| format!("Failed to read matrix file: {:?}", input_path))?;
    let matrix: Matrix = serde_json::from_str(&raw)
        .context("Matrix file must be a JSON array of byte rows")?;

    let gf = Gf256::new();
    let inverse = invert_matrix(&gf, &matrix)
        .with_context(|| format!("Failed to invert {}x{} matrix", matrix.len(), matrix.len()))?;
    let json = serde_json::to_string(&inverse)?;

    match output_path {
        Some(path) => {
            fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write inverse: {:?}", path))?;
            info!("✅ Inverse written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
