pub mod config;
pub mod error;
pub mod test_result;

// Decoded uploads and contingency tables
pub mod table;
