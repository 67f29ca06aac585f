//! Source labels (the experimental arm that produced a record)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation strategy label.
///
/// Nonce files are always tagged `Quantum` or `Classical` by the merger.
/// Metrics files carry the label as text; anything other than the two known
/// arms is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Source {
    /// Nonces drawn from the quantum random number generator
    Quantum,
    /// Nonces drawn from the classical pseudo-random generator
    Classical,
    /// Any other label found in a metrics file
    Other(String),
}

impl Source {
    /// Label text, as written in the input files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Quantum => "Quantum",
            Self::Classical => "Classical",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Source {
    fn from(label: &str) -> Self {
        match label {
            "Quantum" => Self::Quantum,
            "Classical" => Self::Classical,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Source {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Quantum" => Self::Quantum,
            "Classical" => Self::Classical,
            _ => Self::Other(label),
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}
