// ============================================================
// TABLE DECODING INFRASTRUCTURE
// ============================================================
// Turn uploaded bytes into a RawTable, dispatching on TableFormat

mod csv_decoder;
mod excel_decoder;

pub use csv_decoder::CsvDecoder;
pub use excel_decoder::{decode_workbook, range_to_raw_table};

#[cfg(test)]
pub(crate) use excel_decoder::fixtures;

use crate::domain::error::Result;
use crate::domain::table::{RawTable, TableFormat};

/// Decode `bytes` as `format` with no header interpretation
pub fn decode_table(format: TableFormat, bytes: &[u8]) -> Result<RawTable> {
    match format {
        TableFormat::Csv => CsvDecoder.decode(bytes),
        TableFormat::Excel => decode_workbook(bytes),
    }
}
