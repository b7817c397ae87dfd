//! CSV deliverable writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::errors::Result;
use crate::scoring::ScoredWallet;

/// Persists the final (wallet, score) rows. Failure is fatal for the
/// run, unlike per-wallet fetch errors.
pub trait ResultSink {
    fn write(&self, rows: &[ScoredWallet]) -> Result<()>;
}

/// Writes `wallet_id,score` rows to a file, one per input wallet, in
/// input order.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvFileSink {
    fn write(&self, rows: &[ScoredWallet]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "wallet_id,score")?;
        for row in rows {
            writeln!(out, "{},{}", row.wallet, row.score)?;
        }
        out.flush()?;
        info!(path = %self.path.display(), rows = rows.len(), "wrote score deliverable");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");

        let rows = vec![
            ScoredWallet { wallet: "0xbbb".to_string(), score: 594 },
            ScoredWallet { wallet: "0xaaa".to_string(), score: 742 },
        ];
        CsvFileSink::new(&path).write(&rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "wallet_id,score\n0xbbb,594\n0xaaa,742\n");
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let sink = CsvFileSink::new("/nonexistent-dir/scores.csv");
        let err = sink.write(&[]).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
