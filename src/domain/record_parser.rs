//! Record parser: delimited uploads and manual form rows.
//!
//! Turns raw text into [`Holding`] candidates. Malformed numerics and
//! bad column shapes abort the whole batch with a [`ParseError`];
//! business-rule violations (non-positive values, bad dates) are left
//! for the validator to accumulate per row.

use crate::domain::error::ParseError;
use crate::domain::holding::Holding;

/// Column names a header-bearing upload must declare (case-insensitive).
pub const REQUIRED_COLUMNS: [&str; 4] = ["ticker", "quantity", "price", "date"];

/// Parse a header-bearing delimited upload.
///
/// The first line names the columns; any order is accepted, extra
/// columns are ignored. Each produced candidate gets a fresh id.
pub fn parse_csv(text: &str) -> Result<Vec<Holding>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ParseError::Malformed {
            row: 0,
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns { columns: missing });
    }

    // Presence checked above.
    let index_of = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let ticker_idx = index_of("ticker");
    let quantity_idx = index_of("quantity");
    let price_idx = index_of("price");
    let date_idx = index_of("date");

    let mut holdings = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| ParseError::Malformed {
            row,
            message: e.to_string(),
        })?;

        if record.len() != headers.len() {
            return Err(ParseError::ColumnCount {
                row,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let ticker = record.get(ticker_idx).unwrap_or("");
        let quantity = parse_number(row, "quantity", record.get(quantity_idx).unwrap_or(""))?;
        let price = parse_number(row, "price", record.get(price_idx).unwrap_or(""))?;
        let date = record.get(date_idx).unwrap_or("");

        holdings.push(Holding::new(ticker, quantity, price, date));
    }

    Ok(holdings)
}

/// Parse headerless manual-entry rows: `ticker,quantity,price,date`.
pub fn parse_manual_rows(text: &str) -> Result<Vec<Holding>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut holdings = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| ParseError::Malformed {
            row,
            message: e.to_string(),
        })?;

        if record.len() != REQUIRED_COLUMNS.len() {
            return Err(ParseError::ColumnCount {
                row,
                expected: REQUIRED_COLUMNS.len(),
                found: record.len(),
            });
        }

        let quantity = parse_number(row, "quantity", record.get(1).unwrap_or(""))?;
        let price = parse_number(row, "price", record.get(2).unwrap_or(""))?;

        holdings.push(Holding::new(
            record.get(0).unwrap_or(""),
            quantity,
            price,
            record.get(3).unwrap_or(""),
        ));
    }

    Ok(holdings)
}

/// Render holdings back to the upload format, header line included.
pub fn generate_csv(holdings: &[Holding]) -> String {
    let mut lines = vec![REQUIRED_COLUMNS.join(",")];
    for holding in holdings {
        lines.push(format!(
            "{},{},{},{}",
            holding.ticker, holding.quantity, holding.purchase_price, holding.purchase_date
        ));
    }
    lines.join("\n")
}

fn parse_number(row: usize, field: &str, value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
