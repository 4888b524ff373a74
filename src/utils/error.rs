use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed record at {path}: {message}")]
    MalformedRecord { path: String, message: String },

    #[error("Standalone module {module} has no assignment for study program {program}")]
    MissingProgramAssignment { module: String, program: String },

    #[error("Module ids are not unique: {distinct} distinct ids for {entries} modules")]
    DuplicateModuleIds { distinct: usize, entries: usize },
}

/// 錯誤分類，用於日誌與退出碼判斷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Storage,
    Consistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CurriculumError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } | Self::UrlError(_) => {
                ErrorCategory::Network
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_)
            | Self::MalformedRecord { .. }
            | Self::MissingProgramAssignment { .. } => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::DuplicateModuleIds { .. } => ErrorCategory::Consistency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Consistency => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the base URL and network connectivity, then retry",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Data => {
                "The source data changed shape; inspect the record and adjust the mapping"
            }
            ErrorCategory::Storage => "Make sure the output directory is writable",
            ErrorCategory::Consistency => {
                "A pipeline stage produced duplicate modules; no artifacts were written"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) => format!("Could not reach the curriculum source: {}", e),
            Self::HttpStatusError { url, status } => {
                format!("The curriculum source answered {} for {}", status, url)
            }
            Self::DuplicateModuleIds { .. } => {
                format!("Inconsistent module table, aborting: {}", self)
            }
            other => other.to_string(),
        }
    }

    /// 是否為單一模組詳細資料可忽略的錯誤（傳輸或格式問題）
    pub fn is_recoverable_for_detail(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_)
                | Self::HttpStatusError { .. }
                | Self::UrlError(_)
                | Self::SerializationError(_)
                | Self::MalformedRecord { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CurriculumError>;
