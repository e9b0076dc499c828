use serde::Serialize;
use std::fmt;

/// Answer of the compatibility evaluator for one (inbound, outbound) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Compatible,
    Incompatible,
    Unknown,
}

impl Verdict {
    /// Whether this verdict still allows the outbound license to be proposed
    pub fn permits(self) -> bool {
        !matches!(self, Verdict::Incompatible)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Compatible => write!(f, "compatible"),
            Verdict::Incompatible => write!(f, "incompatible"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Can code under `inbound` be distributed under `outbound`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairVerdict {
    pub inbound: String,
    pub outbound: String,
    pub verdict: Verdict,
}

/// A license every inbound license may be relicensed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundCandidate {
    pub license: String,
    /// True when at least one justifying verdict was `unknown`
    pub has_unknown: bool,
    pub verdicts: Vec<PairVerdict>,
}

/// Result of outbound resolution: the inbound licenses, the proposed
/// candidates (sorted by identifier) and every evaluated pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutboundReport {
    pub licenses: Vec<String>,
    pub candidates: Vec<OutboundCandidate>,
    pub matrix: Vec<PairVerdict>,
}

impl OutboundReport {
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }
}
