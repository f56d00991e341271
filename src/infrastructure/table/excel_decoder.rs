// ============================================================
// EXCEL DECODER
// ============================================================
// Read the first worksheet of an in-memory workbook

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, RawTable};

/// Decode the first worksheet; the workbook kind is sniffed from the bytes
pub fn decode_workbook(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::Decode(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Decode("No worksheet found".to_string()))?
        .map_err(|e| AppError::Decode(format!("Failed to read Excel range: {}", e)))?;

    Ok(range_to_raw_table(&range))
}

pub fn range_to_raw_table(range: &Range<Data>) -> RawTable {
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    RawTable::from_rows(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) => Cell::Number(*value),
        Data::Bool(value) => Cell::Number(if *value { 1.0 } else { 0.0 }),
        Data::String(value) => Cell::from_token(value),
        Data::Empty | Data::Error(_) => Cell::Empty,
        // Dates and durations are labels here, never counts
        other => Cell::Text(other.to_string()),
    }
}

/// Minimal OOXML workbooks for tests
#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Hoja1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

    /// Build an `.xlsx` whose first sheet holds `rows`. Numeric tokens are
    /// written as number cells, anything else as shared strings, "" is skipped.
    pub fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut strings: Vec<&str> = Vec::new();
        let mut sheet_rows = String::new();
        for (i, row) in rows.iter().enumerate() {
            sheet_rows.push_str(&format!("<row r=\"{}\">", i + 1));
            for (j, token) in row.iter().enumerate() {
                if token.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", (b'A' + j as u8) as char, i + 1);
                if token.parse::<f64>().is_ok() {
                    sheet_rows.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", reference, token));
                } else {
                    sheet_rows.push_str(&format!(
                        "<c r=\"{}\" t=\"s\"><v>{}</v></c>",
                        reference,
                        strings.len()
                    ));
                    strings.push(token);
                }
            }
            sheet_rows.push_str("</row>");
        }

        let sheet = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            sheet_rows
        );
        let shared_strings = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{n}" uniqueCount="{n}">{items}</sst>"#,
            n = strings.len(),
            items = strings
                .iter()
                .map(|text| format!("<si><t>{}</t></si>", text))
                .collect::<String>()
        );

        let parts: [(&str, &str); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/sharedStrings.xml", &shared_strings),
            ("xl/worksheets/sheet1.xml", &sheet),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}
