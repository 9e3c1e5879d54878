use thiserror::Error;

/// Failure modes of a single reachability probe.
///
/// A probe that runs to completion and simply gets no reply is not an
/// error; it yields an unreachable verdict. These variants cover the
/// cases where no verdict could be produced at all.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe mechanism itself is missing or cannot be opened,
    /// e.g. no `ping` binary in PATH or a raw socket was refused.
    #[error("probe unavailable: {0}")]
    Unavailable(String),

    /// The probe ran but produced nothing the classifier can read.
    #[error("probe inconclusive: {0}")]
    Inconclusive(String),
}
