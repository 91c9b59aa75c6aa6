//! Source implementations for the schema compiler and the dashboard.

pub mod file;
pub mod records;
pub mod sheet;

pub use file::FileSchemaSource;
pub use records::HttpRecordSource;
pub use sheet::HttpSchemaSource;

use std::time::Duration;

/// Build the shared HTTP client used by the sources.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("formwiz/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
