//! Verdict model
//!
//! Output of a single upstream check and of the aggregate decision.

use serde::{Deserialize, Serialize};

/// Status reported by one checking adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Safe,
    /// Only the heuristic check reports this
    Suspicious,
    Dangerous,
    /// The check could not be completed
    Error,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Safe => "SAFE",
            VerdictStatus::Suspicious => "SUSPICIOUS",
            VerdictStatus::Dangerous => "DANGEROUS",
            VerdictStatus::Error => "ERROR",
        }
    }

    /// Map an upstream label onto a status.
    ///
    /// Accepts the English labels and their Indonesian equivalents
    /// (`AMAN`, `MENCURIGAKAN`, `BERBAHAYA`).
    /// `ERROR` is not a label an upstream may return.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "SAFE" | "AMAN" => Some(VerdictStatus::Safe),
            "SUSPICIOUS" | "MENCURIGAKAN" => Some(VerdictStatus::Suspicious),
            "DANGEROUS" | "BERBAHAYA" => Some(VerdictStatus::Dangerous),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single adapter result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub reason: String,
}

impl Verdict {
    pub fn new(status: VerdictStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn safe(reason: impl Into<String>) -> Self {
        Self::new(VerdictStatus::Safe, reason)
    }

    pub fn dangerous(reason: impl Into<String>) -> Self {
        Self::new(VerdictStatus::Dangerous, reason)
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(VerdictStatus::Error, reason)
    }

    pub fn is(&self, status: VerdictStatus) -> bool {
        self.status == status
    }
}

/// Merged status shown to the user. `ERROR` is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalStatus {
    Safe,
    Suspicious,
    Dangerous,
}

impl FinalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Safe => "SAFE",
            FinalStatus::Suspicious => "SUSPICIOUS",
            FinalStatus::Dangerous => "DANGEROUS",
        }
    }
}

impl std::fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
