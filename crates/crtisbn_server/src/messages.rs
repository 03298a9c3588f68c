//! Request and response messages.
//!
//! All messages are plain serde types; the transport decides how they
//! travel (JSON bodies in the reference deployment).

use serde::{Deserialize, Serialize};

fn default_region() -> u8 {
    3
}

fn default_publisher() -> u8 {
    16
}

fn default_true() -> bool {
    true
}

/// Request to generate one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Single-digit region code.
    #[serde(default = "default_region")]
    pub region: u8,
    /// Two-digit publisher code.
    #[serde(default = "default_publisher")]
    pub publisher: u8,
    /// Whether to try multiples of the previous suffix first.
    #[serde(default = "default_true")]
    pub use_multiples: bool,
}

/// A freshly issued identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The 13-digit identifier.
    pub isbn: String,
    /// Result of the post-issuance validity check.
    pub valid: bool,
    /// The publisher code the identifier was issued under.
    pub publisher: u8,
    /// The region digit of the prefix.
    pub region: u8,
    /// The 7-digit suffix, zero-padded.
    pub suffix: String,
}

/// Request to generate several identifiers under one prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGenerateRequest {
    /// Single-digit region code.
    #[serde(default = "default_region")]
    pub region: u8,
    /// Two-digit publisher code.
    #[serde(default = "default_publisher")]
    pub publisher: u8,
    /// How many identifiers to mint.
    pub count: usize,
    /// Whether to try multiples of the previous suffix first.
    #[serde(default = "default_true")]
    pub use_multiples: bool,
}

/// The identifiers a batch request produced.
///
/// `generated` can fall short of `requested` when the prefix runs out of
/// capacity part-way through; that is a partial success, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGenerateResponse {
    /// The count the caller asked for.
    pub requested: usize,
    /// The count actually issued.
    pub generated: usize,
    /// The issued identifiers, in issuance order.
    pub isbns: Vec<String>,
}

/// Request to validate one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The candidate identifier.
    pub isbn: String,
}

/// Outcome of a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// The identifier that was checked.
    pub isbn: String,
    /// Whether the congruence rule holds.
    pub valid: bool,
    /// The embedded publisher code.
    pub publisher: u8,
    /// The publisher code's residues modulo 3, 5 and 7.
    pub expected: [u64; 3],
    /// The full number's residues modulo 3, 5 and 7.
    pub actual: [u64; 3],
    /// Whether this store issued the identifier.
    pub in_storage: bool,
    /// A valid identifier with the same prefix, present when `valid` is
    /// false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<String>,
}

/// Total issued identifiers across all publisher codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The total.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_defaults() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.region, 3);
        assert_eq!(request.publisher, 16);
        assert!(request.use_multiples);
    }

    #[test]
    fn batch_request_requires_count() {
        assert!(serde_json::from_str::<BatchGenerateRequest>("{}").is_err());

        let request: BatchGenerateRequest =
            serde_json::from_str(r#"{"count": 5, "publisher": 42}"#).unwrap();
        assert_eq!(request.count, 5);
        assert_eq!(request.publisher, 42);
    }

    #[test]
    fn corrected_field_is_omitted_when_absent() {
        let response = ValidateResponse {
            isbn: "9783160001071".into(),
            valid: true,
            publisher: 16,
            expected: [1, 1, 2],
            actual: [1, 1, 2],
            in_storage: false,
            corrected: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("corrected"));
    }
}
