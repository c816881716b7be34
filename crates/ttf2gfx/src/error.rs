use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("woff error: {0}")]
    Woff(String),
    #[error("outline error: {0}")]
    Outline(String),
    #[error("unsupported font format: {0}")]
    UnsupportedFormat(&'static str),
    #[error("archive contains no font file")]
    EmptyArchive,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font conversion failed: {0}")]
    Conversion(#[source] Box<FontError>),
}

impl From<skrifa::raw::ReadError> for FontError {
    fn from(err: skrifa::raw::ReadError) -> Self {
        FontError::Parse(err.to_string())
    }
}

impl FontError {
    /// Wraps a load failure with the conversion prefix. Already wrapped errors
    /// are returned as is.
    pub fn conversion(self) -> Self {
        match self {
            FontError::Conversion(_) => self,
            other => FontError::Conversion(Box::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, FontError>;
