//! Labeled historical-IPO CSV read/write.
//!
//! The calibration workflow consumes a flat CSV with one row per historical
//! deal plus a binary `label` column (1 = realized high risk). Design goals:
//!
//! - **Strict schema** for required columns (clear error, exit code 5)
//! - **Row-level validation**: bad rows are skipped but reported, so one
//!   corrupt deal does not sink a thousand-row dataset
//! - **Deterministic behavior**: rows are used in file order

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DealTerms, FinancialSnapshot, IpoInput};
use crate::error::AppError;
use crate::validate::validate_ipo_input;

/// Column order for dataset CSV files (reads are header-driven, writes use
/// exactly this order).
const COLUMNS: &[&str] = &[
    "ticker",
    "company_name",
    "country",
    "sector",
    "price_low",
    "price_high",
    "offer_shares",
    "free_float_pct",
    "lockup_days",
    "revenue_ttm",
    "gross_margin",
    "net_margin",
    "growth_yoy",
    "underwriter_tier",
    "auditor_is_big4",
    "sector_cyclicality",
    "region_risk_tier",
    "sector_ps_multiple",
    "label",
];

/// Columns that may be empty or absent per row.
const OPTIONAL_COLUMNS: &[&str] = &[
    "ticker",
    "company_name",
    "country",
    "sector",
    "sector_ps_multiple",
];

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the CSV (header is line 1).
    pub line: usize,
    pub ticker: Option<String>,
    pub message: String,
}

/// Summary stats about the rows actually used.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub rows_read: usize,
    pub rows_used: usize,
    pub label_positive: usize,
    pub label_negative: usize,
}

/// Ingest output: usable observations plus what was skipped.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    pub ipos: Vec<IpoInput>,
    pub targets: Vec<u8>,
    pub row_errors: Vec<RowError>,
    pub stats: DatasetStats,
}

/// Load a labeled IPO dataset from CSV.
pub fn load_dataset_csv(path: &Path) -> Result<LabeledDataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(5, format!("Failed to open dataset CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(5, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for &col in COLUMNS {
        if OPTIONAL_COLUMNS.contains(&col) {
            continue;
        }
        if !header_map.contains_key(col) {
            return Err(AppError::new(
                5,
                format!("Dataset CSV is missing required column '{col}'"),
            ));
        }
    }

    let mut ipos = Vec::new();
    let mut targets = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, record) in reader.records().enumerate() {
        // Header occupies line 1; data starts on line 2.
        let line = idx + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    ticker: None,
                    message: format!("Unreadable CSV record: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok((ipo, label)) => {
                ipos.push(ipo);
                targets.push(label);
            }
            Err(message) => {
                let ticker = field(&record, &header_map, "ticker").map(str::to_string);
                row_errors.push(RowError {
                    line,
                    ticker,
                    message,
                });
            }
        }
    }

    if ipos.is_empty() {
        return Err(AppError::new(
            5,
            format!(
                "Dataset CSV '{}' contains no usable rows ({} skipped)",
                path.display(),
                row_errors.len()
            ),
        ));
    }

    let label_positive = targets.iter().filter(|&&t| t == 1).count();
    let stats = DatasetStats {
        rows_read,
        rows_used: ipos.len(),
        label_positive,
        label_negative: ipos.len() - label_positive,
    };

    Ok(LabeledDataset {
        ipos,
        targets,
        row_errors,
        stats,
    })
}

/// Write a labeled dataset as CSV (the format `load_dataset_csv` reads).
pub fn write_dataset_csv(path: &Path, ipos: &[IpoInput], targets: &[u8]) -> Result<(), AppError> {
    if ipos.len() != targets.len() {
        return Err(AppError::new(
            4,
            "Dataset export requires one label per IPO.",
        ));
    }

    let mut file = File::create(path).map_err(|e| {
        AppError::new(5, format!("Failed to create dataset CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "{}", COLUMNS.join(","))
        .map_err(|e| AppError::new(5, format!("Failed to write dataset CSV header: {e}")))?;

    for (ipo, &label) in ipos.iter().zip(targets) {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            ipo.ticker.as_deref().unwrap_or(""),
            ipo.company_name.as_deref().unwrap_or(""),
            ipo.country.as_deref().unwrap_or(""),
            ipo.sector.as_deref().unwrap_or(""),
            ipo.deal_terms.price_low,
            ipo.deal_terms.price_high,
            ipo.deal_terms.offer_shares,
            ipo.deal_terms.free_float_pct,
            ipo.deal_terms.lockup_days,
            ipo.financials.revenue_ttm,
            ipo.financials.gross_margin,
            ipo.financials.net_margin,
            ipo.financials.growth_yoy,
            ipo.underwriter_tier,
            ipo.auditor_is_big4,
            ipo.sector_cyclicality,
            ipo.region_risk_tier,
            ipo.sector_ps_multiple
                .map(|v| v.to_string())
                .unwrap_or_default(),
            label,
        )
        .map_err(|e| AppError::new(5, format!("Failed to write dataset CSV row: {e}")))?;
    }

    Ok(())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase(), i))
        .collect()
}

fn field<'r>(
    record: &'r StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    header_map
        .get(name)
        .and_then(|&i| record.get(i))
        .filter(|s| !s.is_empty())
}

fn required_parse<T: std::str::FromStr>(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<T, String> {
    let raw = field(record, header_map, name).ok_or_else(|| format!("missing value for '{name}'"))?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid value for '{name}': '{raw}'"))
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<(IpoInput, u8), String> {
    let auditor_raw: String = required_parse::<String>(record, header_map, "auditor_is_big4")?;
    let auditor_is_big4 = match auditor_raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        other => return Err(format!("invalid value for 'auditor_is_big4': '{other}'")),
    };

    let sector_ps_multiple = match field(record, header_map, "sector_ps_multiple") {
        Some(raw) => Some(
            raw.parse::<f64>()
                .map_err(|_| format!("invalid value for 'sector_ps_multiple': '{raw}'"))?,
        ),
        None => None,
    };

    let label: u8 = required_parse(record, header_map, "label")?;
    if label > 1 {
        return Err(format!("label must be 0 or 1, got {label}"));
    }

    let ipo = IpoInput {
        ticker: field(record, header_map, "ticker").map(str::to_string),
        company_name: field(record, header_map, "company_name").map(str::to_string),
        country: field(record, header_map, "country").map(str::to_string),
        sector: field(record, header_map, "sector").map(str::to_string),
        deal_terms: DealTerms {
            price_low: required_parse(record, header_map, "price_low")?,
            price_high: required_parse(record, header_map, "price_high")?,
            offer_shares: required_parse(record, header_map, "offer_shares")?,
            free_float_pct: required_parse(record, header_map, "free_float_pct")?,
            lockup_days: required_parse(record, header_map, "lockup_days")?,
        },
        financials: FinancialSnapshot {
            revenue_ttm: required_parse(record, header_map, "revenue_ttm")?,
            gross_margin: required_parse(record, header_map, "gross_margin")?,
            net_margin: required_parse(record, header_map, "net_margin")?,
            growth_yoy: required_parse(record, header_map, "growth_yoy")?,
        },
        underwriter_tier: required_parse(record, header_map, "underwriter_tier")?,
        auditor_is_big4,
        sector_cyclicality: required_parse(record, header_map, "sector_cyclicality")?,
        region_risk_tier: required_parse(record, header_map, "region_risk_tier")?,
        sector_ps_multiple,
        prospectus_text: None,
    };

    // Domain validation decides row usability, same rules as scoring.
    validate_ipo_input(&ipo).map_err(|e| e.to_string())?;

    Ok((ipo, label))
}
