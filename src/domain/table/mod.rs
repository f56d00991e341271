// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Value types for decoded uploads and cleaned contingency tables
// No I/O, no async

mod cell;
mod contingency_table;
mod format;
mod raw_table;

pub use cell::{parse_numeric, Cell};
pub use contingency_table::{CleaningSummary, ContingencyTable};
pub use format::TableFormat;
pub use raw_table::RawTable;
