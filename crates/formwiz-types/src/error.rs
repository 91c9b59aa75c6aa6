use thiserror::Error;

/// Errors raised while compiling a form schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The source table has fewer than the four header rows the compiler needs.
    #[error("malformed schema: expected at least 4 rows, found {rows}")]
    Malformed { rows: usize },
}

/// Errors from the external sources feeding the compiler and the dashboard.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not configured: {0}")]
    NotConfigured(&'static str),

    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected content type: '{0}'")]
    UnexpectedContentType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
