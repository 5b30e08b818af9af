use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("Failed to read coverage report at {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Element <{element}> at byte {position} is missing the '{attribute}' attribute")]
    MissingAttributeError {
        element: String,
        attribute: String,
        position: usize,
    },

    #[error("Malformed coverage report: {message}")]
    MalformedReportError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Output,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 輸入或資料問題，修正後重跑即可
    High,
    /// 組態錯誤
    Medium,
    /// 系統層級 I/O 錯誤
    Critical,
}

impl CoverageError {
    pub fn malformed(message: impl Into<String>) -> Self {
        CoverageError::MalformedReportError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CoverageError::ReadError { .. } => ErrorCategory::Input,
            CoverageError::XmlError(_)
            | CoverageError::MissingAttributeError { .. }
            | CoverageError::MalformedReportError { .. } => ErrorCategory::Parse,
            CoverageError::WriteError { .. }
            | CoverageError::CsvError(_)
            | CoverageError::SerializationError(_) => ErrorCategory::Output,
            CoverageError::ConfigError { .. }
            | CoverageError::ConfigValidationError { .. }
            | CoverageError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            CoverageError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Output | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 所有錯誤都是致命的，退出碼永遠不為 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CoverageError::ReadError { path, .. } => {
                format!("Cannot read coverage report '{}'", path)
            }
            CoverageError::WriteError { path, .. } => {
                format!("Cannot write output file '{}'", path)
            }
            CoverageError::XmlError(_) => "The coverage report is not well-formed XML".to_string(),
            CoverageError::MissingAttributeError {
                element, attribute, ..
            } => format!(
                "The coverage report has a <{}> element without a '{}' attribute",
                element, attribute
            ),
            CoverageError::MalformedReportError { message } => {
                format!("The coverage report is malformed: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Run the tests with the JaCoCo plugin first (e.g. `mvn test jacoco:report`) or pass --report"
            }
            ErrorCategory::Parse => "Regenerate the JaCoCo XML report; the file may be truncated or not a JaCoCo report",
            ErrorCategory::Output => "Check that the output location exists and is writable, or pass --output",
            ErrorCategory::Config => "Check the command-line flags and the TOML configuration file",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoverageError>;
