use super::catalog;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// How a metric value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricQuality {
    Present,
    Estimated,
    Missing,
}

impl MetricQuality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Estimated => "Estimated",
            Self::Missing => "Missing",
        }
    }
}

/// A cited snippet supporting a metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvidenceRecord")]
pub struct Evidence {
    text: String,
    source: String,
    snippet_hash: String,
}

impl Evidence {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        let text = text.into();
        let snippet_hash = snippet_hash(&text);
        Self {
            text,
            source: source.into(),
            snippet_hash,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn snippet_hash(&self) -> &str {
        &self.snippet_hash
    }
}

#[derive(Deserialize)]
struct EvidenceRecord {
    text: String,
    #[serde(default)]
    source: String,
}

impl From<EvidenceRecord> for Evidence {
    fn from(record: EvidenceRecord) -> Self {
        Evidence::new(record.text, record.source)
    }
}

fn snippet_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A single named figure with its provenance.
///
/// `value` is `None` exactly when `quality` is [`MetricQuality::Missing`];
/// constructors and deserialization both enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetricRecord", into = "MetricRecord")]
pub struct Metric {
    name: String,
    value: Option<f64>,
    quality: MetricQuality,
    evidence: Vec<Evidence>,
}

impl Metric {
    pub fn present(name: impl Into<String>, value: f64) -> Result<Self, MetricError> {
        Self::with_value(name.into(), value, MetricQuality::Present)
    }

    pub fn estimated(name: impl Into<String>, value: f64) -> Result<Self, MetricError> {
        Self::with_value(name.into(), value, MetricQuality::Estimated)
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            quality: MetricQuality::Missing,
            evidence: Vec::new(),
        }
    }

    fn with_value(name: String, value: f64, quality: MetricQuality) -> Result<Self, MetricError> {
        if !value.is_finite() {
            return Err(MetricError::NonFinite { name });
        }
        Ok(Self {
            name,
            value: Some(value),
            quality,
            evidence: Vec::new(),
        })
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn quality(&self) -> MetricQuality {
        self.quality
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn is_missing(&self) -> bool {
        self.quality == MetricQuality::Missing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MetricRecord {
    #[serde(default)]
    name: String,
    value: Option<f64>,
    quality: MetricQuality,
    #[serde(default)]
    evidence: Vec<Evidence>,
}

impl TryFrom<MetricRecord> for Metric {
    type Error = MetricError;

    fn try_from(record: MetricRecord) -> Result<Self, Self::Error> {
        let MetricRecord {
            name,
            value,
            quality,
            evidence,
        } = record;

        let mut metric = match (value, quality) {
            (None, MetricQuality::Missing) => Metric::missing(name),
            (Some(value), MetricQuality::Present | MetricQuality::Estimated) => {
                Metric::with_value(name, value, quality)?
            }
            (_, quality) => return Err(MetricError::QualityMismatch { name, quality }),
        };
        metric.evidence = evidence;
        Ok(metric)
    }
}

impl From<Metric> for MetricRecord {
    fn from(metric: Metric) -> Self {
        Self {
            name: metric.name,
            value: metric.value,
            quality: metric.quality,
            evidence: metric.evidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("metric '{name}' has a non-finite value")]
    NonFinite { name: String },
    #[error("metric '{name}' is marked {quality:?} but its value disagrees")]
    QualityMismatch {
        name: String,
        quality: MetricQuality,
    },
    #[error("metric keyed '{key}' is named '{name}'")]
    NameMismatch { key: String, name: String },
}

/// Normalized facts for one ticker. Every catalog metric is present as a
/// key; names nobody supplied are recorded as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct Ledger {
    ticker: String,
    metrics: BTreeMap<String, Metric>,
}

impl Ledger {
    /// Builds a ledger from the supplied metrics. Later entries replace
    /// earlier ones with the same name.
    pub fn new(ticker: impl Into<String>, metrics: impl IntoIterator<Item = Metric>) -> Self {
        let mut map: BTreeMap<String, Metric> = metrics
            .into_iter()
            .map(|metric| (metric.name.clone(), metric))
            .collect();

        for name in catalog::names() {
            map.entry(name.to_string())
                .or_insert_with(|| Metric::missing(name));
        }

        Self {
            ticker: ticker.into(),
            metrics: map,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    /// Value of a metric that is present or estimated.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).and_then(Metric::value)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    /// Names from `names` whose metric is missing or absent, in input order.
    pub fn missing_of<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .copied()
            .filter(|name| self.value(name).is_none())
            .collect()
    }

    /// Evidence attached to the given metrics, in the order requested.
    pub fn evidence_for(&self, names: &[&str]) -> Vec<Evidence> {
        names
            .iter()
            .filter_map(|name| self.metrics.get(*name))
            .flat_map(|metric| metric.evidence.iter().cloned())
            .collect()
    }

    pub fn into_metrics(self) -> impl Iterator<Item = Metric> {
        self.metrics.into_values()
    }

    pub fn count_by_quality(&self, quality: MetricQuality) -> usize {
        self.metrics
            .values()
            .filter(|metric| metric.quality == quality)
            .count()
    }
}

#[derive(Deserialize)]
struct LedgerRecord {
    ticker: String,
    #[serde(default)]
    metrics: BTreeMap<String, MetricRecord>,
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = MetricError;

    fn try_from(record: LedgerRecord) -> Result<Self, Self::Error> {
        let mut metrics = Vec::with_capacity(record.metrics.len());
        for (key, mut entry) in record.metrics {
            if entry.name.is_empty() {
                entry.name = key.clone();
            } else if entry.name != key {
                return Err(MetricError::NameMismatch {
                    key,
                    name: entry.name,
                });
            }
            metrics.push(Metric::try_from(entry)?);
        }
        Ok(Ledger::new(record.ticker, metrics))
    }
}
