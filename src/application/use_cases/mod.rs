pub mod chi_square;
pub mod table_cleaner;
pub mod table_validator;
