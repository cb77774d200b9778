use thiserror::Error;

#[derive(Error, Debug)]
pub enum FakeUaError {
    #[error("The browser dataset is empty")]
    EmptyDataset,
    #[error("browser dataset not found - {path:?}")]
    DatasetNotFound { path: String },
    #[error("browser dataset parse error at line {line} - {e}")]
    DatasetParseError { line: usize, e: serde_json::Error },
    #[error("invalid browser record at line {line} - {message:?}")]
    InvalidRecord { line: usize, message: String },
    #[error("invalid browser record at index {index} - {message:?}")]
    InvalidRecordEntry { index: usize, message: String },
    #[error("invalid configuration - {message:?}")]
    InvalidConfiguration { message: String },
    #[error("configuration type error - {e}")]
    ConfigurationTypeError { e: serde_json::Error },
    #[error("unknown browser(s) {names:?} not present in the dataset")]
    UnknownBrowsers { names: Vec<String> },
    #[error("standard I/O error - {e}")]
    StdIoError { e: std::io::Error },
    #[error("JSON serialization error - {e}")]
    JsonError { e: serde_json::Error },
    #[error("CLI argument error - {message:?}")]
    CliArgumentError { message: String },
    #[error("CLI argument error ({e})")]
    ClapError { e: clap::Error },
}

impl From<std::io::Error> for FakeUaError {
    fn from(e: std::io::Error) -> Self {
        FakeUaError::StdIoError { e }
    }
}

impl From<serde_json::Error> for FakeUaError {
    fn from(e: serde_json::Error) -> Self {
        FakeUaError::JsonError { e }
    }
}

impl From<clap::Error> for FakeUaError {
    fn from(e: clap::Error) -> Self {
        FakeUaError::ClapError { e }
    }
}
