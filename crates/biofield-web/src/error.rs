use std::fmt;

/// Failures the bridge can hit while binding to the page.
///
/// None of these are thrown to JavaScript; each export logs the error and
/// degrades to a no-op.
#[derive(Debug)]
pub enum BridgeError {
    /// No global `window` (not running in a browser main thread).
    MissingWindow,
    /// No `<canvas>` element with this id.
    MissingCanvas(String),
    /// The canvas refused a 2D context.
    ContextUnavailable,
    /// A configuration JSON string failed to parse.
    Config(serde_json::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingCanvas(id) => write!(f, "no canvas element with id '{id}'"),
            Self::ContextUnavailable => write!(f, "canvas 2d context unavailable"),
            Self::Config(e) => write!(f, "invalid backdrop config: {e}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}
