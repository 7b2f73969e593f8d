//! The verdict record printed on stdout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Final call on a receipt's legitimacy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum VerificationStatus {
    /// The receipt looks completely legitimate.
    #[serde(rename = "APPROVED")]
    Approved,
    /// Something is suspicious, a human should look at it.
    #[serde(rename = "FLAGGED")]
    Flagged,
    /// The receipt is clearly fake.
    #[serde(rename = "REJECTED")]
    Rejected,
}

/// The structured result of one verification run. Every exit path prints
/// exactly one of these (or the raw model mapping) as a single JSON document.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Verdict {
    /// Fields the model read off the receipt (reference number, amount, date).
    /// Empty on fallback verdicts.
    #[serde(default)]
    pub extracted_info: Map<String, Value>,
    /// The legitimacy decision.
    pub verification_status: VerificationStatus,
    /// Brief explanation for the decision.
    pub reasoning: String,
}

impl Verdict {
    /// Synthesizes the FLAGGED verdict used whenever a pipeline step fails.
    pub fn fallback(reason: &str) -> Self {
        Self {
            extracted_info: Map::new(),
            verification_status: VerificationStatus::Flagged,
            reasoning: format!("Verifier error: {reason}"),
        }
    }

    /// Serializes the verdict for stdout. Serialization of this shape can't
    /// realistically fail, but the fallback literal keeps stdout valid JSON
    /// even if it somehow does.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"extracted_info":{},"verification_status":"FLAGGED","reasoning":"Verifier error: could not serialize verdict."}"#.to_string()
        })
    }
}
