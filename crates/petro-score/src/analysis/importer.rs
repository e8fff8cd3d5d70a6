use crate::scoring::catalog;
use crate::scoring::{Evidence, Metric, MetricError, MetricQuality};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidQuality { metric: String, quality: String },
    DuplicateMetric(String),
    Metric(MetricError),
}

impl std::fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read ledger extract: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid ledger CSV data: {}", err),
            LedgerImportError::InvalidQuality { metric, quality } => {
                write!(f, "metric '{}' has unknown quality '{}'", metric, quality)
            }
            LedgerImportError::DuplicateMetric(metric) => {
                write!(f, "metric '{}' appears more than once", metric)
            }
            LedgerImportError::Metric(err) => write!(f, "invalid metric: {}", err),
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
            LedgerImportError::Metric(err) => Some(err),
            LedgerImportError::InvalidQuality { .. }
            | LedgerImportError::DuplicateMetric(_) => None,
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<MetricError> for LedgerImportError {
    fn from(err: MetricError) -> Self {
        Self::Metric(err)
    }
}

/// Row name carrying the issuer's industry classification as text.
pub const INDUSTRY_ROW: &str = "industry";

/// Metrics read from one extract, plus the industry the filing declares.
#[derive(Debug, Clone, Default)]
pub struct LedgerExtract {
    pub industry: Option<String>,
    pub metrics: Vec<Metric>,
}

/// Reads `metric,value,quality,source,snippet` extracts produced by the
/// filing and market-data collectors.
pub struct LedgerImporter;

impl LedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LedgerExtract, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LedgerExtract, LedgerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut seen: HashSet<String> = HashSet::new();
        let mut extract = LedgerExtract::default();

        for record in csv_reader.deserialize::<LedgerRow>() {
            let row = record?;
            let name = row.metric.trim().to_ascii_lowercase();

            if name == INDUSTRY_ROW {
                extract.industry = row.value.or(row.snippet);
                continue;
            }
            if !catalog::is_known(&name) {
                warn!(metric = %row.metric, "skipping metric outside the catalog");
                continue;
            }
            if !seen.insert(name.clone()) {
                return Err(LedgerImportError::DuplicateMetric(name));
            }

            extract.metrics.push(row.into_metric(name)?);
        }

        Ok(extract)
    }
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    metric: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    quality: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    snippet: Option<String>,
}

impl LedgerRow {
    fn into_metric(self, name: String) -> Result<Metric, LedgerImportError> {
        let quality = match self.quality.as_deref() {
            Some(raw) => Some(parse_quality(raw).ok_or_else(|| {
                LedgerImportError::InvalidQuality {
                    metric: name.clone(),
                    quality: raw.to_string(),
                }
            })?),
            None => None,
        };

        let value = match self.value.as_deref() {
            Some(raw) => match parse_amount(raw) {
                Some(value) => Some(value),
                None => {
                    // Placeholders such as "-", "n/a" or "NM" leave the metric undetermined.
                    warn!(metric = %name, value = raw, "unreadable value recorded as missing");
                    return Ok(with_snippet(
                        Metric::missing(name),
                        self.source,
                        self.snippet,
                    ));
                }
            },
            None => None,
        };

        let quality = match quality {
            Some(quality) => quality,
            None if value.is_some() => MetricQuality::Present,
            None => MetricQuality::Missing,
        };

        let metric = match (value, quality) {
            (Some(value), MetricQuality::Present) => Metric::present(name, value)?,
            (Some(value), MetricQuality::Estimated) => Metric::estimated(name, value)?,
            (None, MetricQuality::Missing) => Metric::missing(name),
            (_, quality) => return Err(MetricError::QualityMismatch { name, quality }.into()),
        };

        Ok(with_snippet(metric, self.source, self.snippet))
    }
}

fn with_snippet(metric: Metric, source: Option<String>, snippet: Option<String>) -> Metric {
    match snippet {
        Some(snippet) => metric.with_evidence(Evidence::new(snippet, source.unwrap_or_default())),
        None => metric,
    }
}

/// Parses figures as they appear in filings: `$1,234.5`, `(250)` for
/// negatives, `4.2%` for fractions.
fn parse_amount(raw: &str) -> Option<f64> {
    let mut text: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
        .collect();

    let negative = text.starts_with('(') && text.ends_with(')');
    if negative {
        text = text[1..text.len() - 1].to_string();
    }

    let percent = text.ends_with('%');
    if percent {
        text.pop();
    }

    let mut value = text.parse::<f64>().ok()?;
    if percent {
        value /= 100.0;
    }
    if negative {
        value = -value;
    }
    Some(value)
}

fn parse_quality(raw: &str) -> Option<MetricQuality> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "present" | "reported" => Some(MetricQuality::Present),
        "estimated" | "estimate" => Some(MetricQuality::Estimated),
        "missing" | "n/a" => Some(MetricQuality::Missing),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
