/// Error types for translation resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// No translation exists for the key in any configured catalog
    /// (only raised when hard failure is enabled)
    MissingTranslation(String),
    /// The configuration cannot be used as given
    InvalidConfig(String),
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::MissingTranslation(key) => {
                write!(f, "Could not find translation for \"{}\"", key)
            }
            TranslationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TranslationError {}

/// Result type for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;
