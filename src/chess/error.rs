use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort a batch run.
///
/// Per-game shape problems are not represented here: the normalizer skips
/// those games and reports them through [`super::normalize::SkippedGame`].
#[derive(Debug)]
pub enum Error {
    /// Transport failure (connect, TLS, read) or a missing replay file.
    Fetch { tournament: String, message: String },
    /// The API answered with a non-2xx status.
    Http { tournament: String, status: u16 },
    /// The fetched body is not valid JSON.
    Parse { tournament: String, message: String },
    /// The JSON document does not have the expected envelope.
    Shape { context: String },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch {
                tournament,
                message,
            } => write!(f, "failed to fetch tournament '{tournament}': {message}"),
            Self::Http { tournament, status } => {
                write!(f, "tournament '{tournament}' returned HTTP status {status}")
            }
            Self::Parse {
                tournament,
                message,
            } => write!(f, "invalid JSON for tournament '{tournament}': {message}"),
            Self::Shape { context } => write!(f, "unexpected document shape: {context}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(msg);
            }
            None => {
                self.0 = Some(msg.to_string());
            }
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
