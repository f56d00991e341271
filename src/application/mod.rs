pub mod use_cases;

pub use use_cases::chi_square::{ChiSquareUseCase, UploadAnalysis};
