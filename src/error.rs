use thiserror::Error;

pub type FillResult<T> = Result<T, FillError>;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel import error: {0}")]
    Import(String),

    #[error("Excel export error: {0}")]
    Export(String),

    #[error("Column resolution error: {0}")]
    Column(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
