// ============================================================
// CSV DECODER
// ============================================================
// Decode delimited text with encoding fallback and delimiter detection

use std::borrow::Cow;

use csv::{ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, RawTable};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV decoder; every record is data, including the first
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvDecoder;

impl CsvDecoder {
    pub fn decode(&self, bytes: &[u8]) -> Result<RawTable> {
        let content = decode_text(bytes);
        let delimiter = Self::detect_delimiter(&content);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::Decode(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(cell_from_field).collect::<Vec<_>>());
        }

        if rows.is_empty() {
            return Err(AppError::Decode(
                "No columns to parse from file".to_string(),
            ));
        }

        Ok(RawTable::from_rows(rows))
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(10)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Boolean literals count as 1/0, the same as boolean workbook cells
fn cell_from_field(field: &str) -> Cell {
    match field {
        "True" | "TRUE" | "true" => Cell::Number(1.0),
        "False" | "FALSE" | "false" => Cell::Number(0.0),
        _ => Cell::from_token(field),
    }
}

/// UTF-8 (BOM stripped) with a Windows-1252 fallback for legacy spreadsheet exports
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}
