use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::cli::commands::{Commands, FieldOp};
use litiaina_gf::Gf256;

#[derive(Serialize, Debug)]
struct InverseTable<'a> {
    reduction_polynomial: &'static str,
    inverses: &'a [u8],
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub law: &'static str,
    pub a: u8,
    pub b: u8,
}

pub fn apply_op(gf: &Gf256, op: FieldOp, a: u8, b: Option<u8>) -> Result<u8> {
    let rhs = || b.ok_or_else(|| anyhow!("Operation {:?} needs a second operand", op));
    Ok(match op {
        FieldOp::Add => gf.add(a, rhs()?),
        FieldOp::Sub => gf.sub(a, rhs()?),
        FieldOp::Mul => gf.mul(a, rhs()?),
        FieldOp::Div => gf.div(a, rhs()?),
        FieldOp::Inv => gf.inv(a)?,
    })
}

#[instrument(skip(args))]
pub async fn handle_field(args: Commands) -> Result<()> {
    let (op, a, b) = match args {
        Commands::Field { op, a, b } => (op, a, b),
        _ => unreachable!(),
    };

    let gf = Gf256::new();
    let result = apply_op(&gf, op, a, b)?;
    if op == FieldOp::Div && b == Some(0) {
        info!("Division by zero yields 0 by convention");
    }
    println!("{:#04x}", result);
    Ok(())
}

#[instrument(skip(args))]
pub async fn handle_inverse_table(args: Commands) -> Result<()> {
    let output = match args {
        Commands::InverseTable { output } => output,
        _ => unreachable!(),
    };

    let gf = Gf256::new();
    let table = InverseTable {
        reduction_polynomial: "0x11b",
        inverses: gf.inverse_table(),
    };
    let json = serde_json::to_string_pretty(&table)?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write inverse table: {:?}", path))?;
            info!("Inverse table written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Checks every law against each `b` for a fixed `a`.
pub fn check_row(gf: &Gf256, a: u8) -> Vec<Violation> {
    let mut found = Vec::new();
    let mut flag = |law: &'static str, b: u8| found.push(Violation { law, a, b });

    if gf.add(a, 0) != a {
        flag("additive identity", 0);
    }
    if gf.add(a, a) != 0 {
        flag("additive self-inverse", a);
    }
    if gf.mul(a, 1) != a {
        flag("multiplicative identity", 1);
    }
    if a != 0 && gf.mul(a, gf.inverse_table()[a as usize]) != 1 {
        flag("multiplicative inverse", gf.inverse_table()[a as usize]);
    }
    if gf.div(a, 0) != 0 {
        flag("division by zero convention", 0);
    }

    for b in 0..=255u8 {
        if gf.add(a, b) != gf.sub(a, b) {
            flag("add equals sub", b);
        }
        if gf.mul(a, b) != gf.mul(b, a) {
            flag("mul commutative", b);
        }
        if b != 0 {
            if gf.div(0, b) != 0 {
                flag("zero dividend", b);
            }
            if a != 0 && gf.div(a, b) != gf.mul(a, gf.inverse_table()[b as usize]) {
                flag("div consistent with mul", b);
            }
            // Associativity sampled against the generator 0x03.
            if gf.mul(gf.mul(a, b), 0x03) != gf.mul(a, gf.mul(b, 0x03)) {
                flag("mul associative", b);
            }
        }
    }
    found
}

#[instrument(skip(_args))]
pub async fn handle_verify(_args: Commands) -> Result<()> {
    let gf = Arc::new(Gf256::new());

    let pb = ProgressBar::new(256);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/black}] Checking rows {pos}/{len}",
        )?
        .progress_chars("=> "),
    );

    let gf_clone = gf.clone();
    let violations = tokio::task::spawn_blocking(move || {
        let violations: Vec<Violation> = (0..=255u8)
            .into_par_iter()
            .flat_map_iter(|a| {
                let row = check_row(&gf_clone, a);
                pb.inc(1);
                row
            })
            .collect();
        pb.finish_with_message("Field laws checked!");
        violations
    })
    .await
    .context("Verification task panicked")?;

    if violations.is_empty() {
        info!("✅ All GF(2^8) field laws hold over 65536 operand pairs");
        return Ok(());
    }

    for v in violations.iter().take(16) {
        error!(law = v.law, a = v.a, b = v.b, "Field law violated");
    }
    println!("{}", serde_json::to_string_pretty(&violations)?);
    Err(anyhow!("{} field law violations found", violations.len()))
}
