use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Postcode not found: {postcode}")]
    PostcodeNotFound { postcode: String },

    #[error("Postcode lookup failed for {postcode}: {reason}")]
    LookupFailed { postcode: String, reason: String },

    #[error("No coordinates available for {postcode}")]
    OriginUnavailable { postcode: String },

    #[error("Invalid UK postcode: {postcode}")]
    InvalidPostcode { postcode: String },

    #[error("Coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl LocatorError {
    /// True for every outcome that means "no coordinates for this postcode".
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            LocatorError::PostcodeNotFound { .. }
                | LocatorError::LookupFailed { .. }
                | LocatorError::OriginUnavailable { .. }
        )
    }

    /// Message for end users. Not-found and lookup failures read the same.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LocatorError::PostcodeNotFound { postcode }
            | LocatorError::LookupFailed { postcode, .. }
            | LocatorError::OriginUnavailable { postcode } => {
                format!("We couldn't find a location for '{}'", postcode)
            }
            LocatorError::InvalidPostcode { postcode } => {
                format!("'{}' is not a valid UK postcode", postcode)
            }
            LocatorError::ConfigError { .. }
            | LocatorError::ConfigValidationError { .. }
            | LocatorError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
