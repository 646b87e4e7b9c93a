//! Batch results table
//!
//! Re-reads the uploaded CSV and appends the backend's predictions as two
//! new columns, keeping the original row order.

use super::backend::BatchPrediction;

pub const PREDICTION_COLUMN: &str = "Prediction";
pub const PROBABILITY_COLUMN: &str = "Probability";

pub const COUNT_MISMATCH: &str = "Prediction count does not match input records";

/// A CSV table held as display strings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(data: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.map(|record| record.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }
}

/// Append `Prediction` and `Probability` columns. Fails instead of
/// misaligning when the backend returned a different number of results.
pub fn merge_predictions(mut table: CsvTable, batch: &BatchPrediction) -> Result<CsvTable, &'static str> {
    if batch.predictions.len() != table.rows.len() || batch.probabilities.len() != table.rows.len() {
        log::warn!(
            "Batch result mismatch: {} rows, {} predictions, {} probabilities",
            table.rows.len(),
            batch.predictions.len(),
            batch.probabilities.len()
        );
        return Err(COUNT_MISMATCH);
    }

    table.headers.push(PREDICTION_COLUMN.to_string());
    table.headers.push(PROBABILITY_COLUMN.to_string());

    for ((row, prediction), probability) in table
        .rows
        .iter_mut()
        .zip(&batch.predictions)
        .zip(&batch.probabilities)
    {
        row.push(prediction.to_string());
        row.push(probability.to_string());
    }

    Ok(table)
}
