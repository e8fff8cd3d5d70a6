use super::rules::RuleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Cut points for one rule. Which side is favourable comes from the rule's
/// direction, never from the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub ok: f64,
    pub watch: f64,
}

impl Band {
    pub const fn new(ok: f64, watch: f64) -> Self {
        Self { ok, watch }
    }
}

/// Versioned, immutable set of bands keyed by rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    version: String,
    bands: BTreeMap<RuleId, Band>,
}

pub const STANDARD_VERSION: &str = "2025.1";

impl ThresholdTable {
    pub fn new(version: impl Into<String>, bands: BTreeMap<RuleId, Band>) -> Self {
        Self {
            version: version.into(),
            bands,
        }
    }

    /// Built-in cut points.
    pub fn standard() -> Self {
        use RuleId::*;

        let bands = [
            (LoePerBoe, Band::new(8.0, 12.0)),
            (GptPerBoe, Band::new(2.5, 4.0)),
            (GnaPerBoe, Band::new(3.0, 5.0)),
            (CashNetbackMargin, Band::new(0.50, 0.30)),
            (EbitdaMargin, Band::new(0.40, 0.25)),
            (RoicMinusWacc, Band::new(0.0, -0.02)),
            (RecycleRatio, Band::new(2.0, 1.5)),
            (ReinvestmentRate, Band::new(0.60, 0.80)),
            (CapexPerBoe, Band::new(15.0, 25.0)),
            (ReserveReplacementRatio, Band::new(1.0, 0.8)),
            (ProductionEfficiency, Band::new(0.85, 0.75)),
            (NetDebtToEbitda, Band::new(1.5, 2.5)),
            (DividendYield, Band::new(0.03, 0.015)),
            (DividendPersistence, Band::new(5.0, 2.0)),
            (PayoutRatio, Band::new(0.50, 0.80)),
            (BuybackYield, Band::new(0.02, 0.005)),
            (FcfYield, Band::new(0.08, 0.04)),
            (NapkinValueUpside, Band::new(0.20, 0.0)),
        ];

        Self::new(STANDARD_VERSION, bands.into_iter().collect())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ThresholdError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ThresholdError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ThresholdError> {
        let table: Self = serde_json::from_reader(reader)?;
        if table.version.trim().is_empty() {
            return Err(ThresholdError::MissingVersion);
        }
        Ok(table)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn band(&self, id: RuleId) -> Option<Band> {
        self.bands.get(&id).copied()
    }

    pub fn bands(&self) -> impl Iterator<Item = (RuleId, Band)> + '_ {
        self.bands.iter().map(|(id, band)| (*id, *band))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    #[error("failed to read threshold table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid threshold table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("threshold table must carry a version")]
    MissingVersion,
}
