use thiserror::Error;

pub type Result<T, E = NotifyError> = std::result::Result<T, E>;

/// Failures that abort a notification run.
///
/// Problems reading the release notes file are not errors here: they are
/// logged and replaced with placeholder text by the card builder.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required key is missing or malformed. Raised before any network call.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// GitHub could not be reached, rejected the request, or did not have the
    /// requested resource.
    #[error("failed to fetch {what} from GitHub")]
    UpstreamFetch {
        what: String,
        #[source]
        source: anyhow::Error,
    },
    /// The webhook could not be reached or rejected the card.
    #[error("failed to deliver notification")]
    Delivery(#[source] anyhow::Error),
}

impl NotifyError {
    pub fn config(message: impl Into<String>) -> Self { Self::Configuration(message.into()) }

    pub fn upstream(what: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::UpstreamFetch { what: what.into(), source: source.into() }
    }

    pub fn delivery(source: impl Into<anyhow::Error>) -> Self { Self::Delivery(source.into()) }
}
