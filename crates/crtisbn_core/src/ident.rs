//! Identifier and prefix types.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The fixed 3-digit domain tag conventionally used for new prefixes.
///
/// The engine itself never enforces it; only the [`Prefix::from_parts`]
/// constructor bakes it in.
pub const DOMAIN_TAG: &str = "978";

/// The congruence moduli. Pairwise coprime (prime, in fact).
pub const MODULI: [u64; 3] = [3, 5, 7];

/// Product of [`MODULI`]: the period of the offset search.
pub const COMBINED_MODULUS: u64 = 105;

/// Number of distinct 7-digit suffixes: `10^7`.
pub const SUFFIX_SPAN: u64 = 10_000_000;

/// Residues of `n` modulo 3, 5 and 7, in that order.
#[must_use]
pub fn residues(n: u64) -> [u64; 3] {
    [n % 3, n % 5, n % 7]
}

/// A validated 13-digit identifier.
///
/// Layout: `[domain:3][region:1][publisher:2][suffix:7]`. The full
/// numeric value is computed once at parse time; 13 decimal digits fit
/// comfortably in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Isbn {
    text: String,
    #[serde(skip)]
    value: u64,
}

impl Isbn {
    /// Parses a 13-digit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedInput`] unless the input is exactly
    /// 13 decimal digits.
    pub fn parse(input: &str) -> CoreResult<Self> {
        if input.len() != 13 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::malformed(
                "identifier must be exactly 13 decimal digits",
            ));
        }
        let value = input
            .parse()
            .map_err(|_| CoreError::malformed("identifier is not a decimal number"))?;
        Ok(Self {
            text: input.to_string(),
            value,
        })
    }

    /// The identifier as a digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The full 13-digit numeric value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The first 6 digits.
    #[must_use]
    pub fn prefix(&self) -> Prefix {
        Prefix {
            text: self.text[..6].to_string(),
        }
    }

    /// The embedded 2-digit publisher code, from positions 4 and 5.
    #[must_use]
    pub fn publisher_code(&self) -> u8 {
        // Two ASCII digits always parse into a u8.
        self.text[4..6].parse().unwrap_or(0)
    }

    /// The trailing 7-digit suffix as an integer.
    #[must_use]
    pub fn suffix(&self) -> u32 {
        self.text[6..].parse().unwrap_or(0)
    }

    /// The identifier grouped for display: `978-3-16-0001071`.
    #[must_use]
    pub fn hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            &self.text[..3],
            &self.text[3..4],
            &self.text[4..6],
            &self.text[6..]
        )
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Isbn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A validated 6-digit identifier prefix.
///
/// Layout: `[domain:3][region:1][publisher:2]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Prefix {
    text: String,
}

impl Prefix {
    /// Parses a 6-digit prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedInput`] unless the input is exactly
    /// 6 decimal digits.
    pub fn parse(input: &str) -> CoreResult<Self> {
        if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::malformed(
                "prefix must be exactly 6 decimal digits",
            ));
        }
        Ok(Self {
            text: input.to_string(),
        })
    }

    /// Builds a prefix under the fixed [`DOMAIN_TAG`] from a region digit
    /// and a publisher code.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] if `region > 9` or
    /// `publisher > 99`.
    pub fn from_parts(region: u8, publisher: u8) -> CoreResult<Self> {
        if region > 9 {
            return Err(CoreError::invalid_parameter(
                "region code must be a single digit (0-9)",
            ));
        }
        if publisher > 99 {
            return Err(CoreError::invalid_parameter(
                "publisher code must be two digits (0-99)",
            ));
        }
        Ok(Self {
            text: format!("{DOMAIN_TAG}{region}{publisher:02}"),
        })
    }

    /// The prefix as a digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The 6-digit numeric value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.text.parse().unwrap_or(0)
    }

    /// The embedded 2-digit publisher code.
    #[must_use]
    pub fn publisher_code(&self) -> u8 {
        self.text[4..6].parse().unwrap_or(0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Prefix {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
