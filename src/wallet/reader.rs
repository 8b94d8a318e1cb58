use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, WalletError};
use crate::wallet::Holding;

/// Load holdings from a comma-separated file with a `symbol,quantity,price`
/// header row. Rows that do not split into exactly three fields are skipped;
/// a field that fails numeric parsing aborts the whole read. An unreadable
/// source is a hard error.
pub fn read_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut holdings = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 {
            // header
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            debug!(
                "Skipping malformed row {}: expected 3 fields, got {}",
                line_no + 1,
                fields.len()
            );
            continue;
        }

        holdings.push(Holding {
            symbol: fields[0].trim().to_string(),
            quantity: parse_field(fields[1], line_no + 1, "quantity")?,
            cost_basis: parse_field(fields[2], line_no + 1, "price")?,
        });
    }

    info!("Loaded {} holdings from {}", holdings.len(), path.display());
    Ok(holdings)
}

fn parse_field(raw: &str, line_no: usize, name: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|e| {
        WalletError::parse(format!(
            "line {}: invalid {} {:?}: {}",
            line_no, name, trimmed, e
        ))
    })
}
