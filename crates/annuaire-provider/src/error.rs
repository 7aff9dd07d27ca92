use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from an external source. Not retried.
    #[error("cannot fetch {kind} page ({status} status code)")]
    Status { kind: &'static str, status: u16 },

    /// A fetched document had an empty or inconsistent field sequence.
    #[error("cannot extract {0} candidates")]
    Candidates(&'static str),

    /// Every registry candidate was rejected by the matcher.
    #[error("cannot extract business")]
    NoBusiness,

    /// Every directory candidate was rejected by the matcher, or the
    /// matching entry carried no usable digits.
    #[error("cannot extract phone")]
    NoPhone,
}
