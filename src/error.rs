use thiserror::Error;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("Dataset is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("Invalid accommodation cost `{value}` for {destination}")]
    InvalidCost { destination: String, value: String },

    #[error("Invalid price range `{0}`")]
    InvalidPriceRange(String),

    #[error("Invalid trip dates: {0}")]
    InvalidDates(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

impl TripError {
    /// Stable code used when reporting failures from the CLI
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::Http(_) => "HTTP_ERROR",
            TripError::Api { .. } => "API_ERROR",
            TripError::Serialization(_) => "SERIALIZATION_ERROR",
            TripError::Validation(_) => "VALIDATION_ERROR",
            TripError::Dataset(_) => "DATASET_ERROR",
            TripError::MissingColumn(_) => "DATASET_COLUMN_MISSING",
            TripError::InvalidCost { .. } => "INVALID_COST",
            TripError::InvalidPriceRange(_) => "INVALID_PRICE_RANGE",
            TripError::InvalidDates(_) => "INVALID_DATES",
        }
    }
}
