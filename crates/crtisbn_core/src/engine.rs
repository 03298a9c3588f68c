//! Identifier generation and validation.

use crate::error::CoreResult;
use crate::ident::{residues, Isbn, Prefix, COMBINED_MODULUS, MODULI, SUFFIX_SPAN};
use crate::modmath::crt_solve;
use crtisbn_store::IdentifierStore;
use serde::Serialize;
use tracing::debug;

/// Options controlling a single `generate` call.
///
/// # Example
///
/// ```rust
/// use crtisbn_core::GenerateOptions;
///
/// let options = GenerateOptions::new().use_multiples(false).max_attempts(10);
/// assert_eq!(options.max_attempts, 10);
/// ```
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Hard cap on search iterations (multiplier trials in step one,
    /// offset trials in step two).
    pub max_attempts: u32,

    /// Whether to try multiples of the previous suffix before the offset
    /// search.
    pub use_multiples: bool,

    /// Starting offset for the offset search. `None` resumes from the
    /// store's recorded position for the prefix.
    pub offset: Option<u32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_attempts: 105,
            use_multiples: true,
            offset: None,
        }
    }
}

impl GenerateOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration cap.
    #[must_use]
    pub const fn max_attempts(mut self, value: u32) -> Self {
        self.max_attempts = value;
        self
    }

    /// Enables or disables the multiplicative first step.
    #[must_use]
    pub const fn use_multiples(mut self, value: bool) -> Self {
        self.use_multiples = value;
        self
    }

    /// Forces a specific starting offset.
    #[must_use]
    pub const fn offset(mut self, value: u32) -> Self {
        self.offset = Some(value);
        self
    }
}

/// Outcome of validating one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    /// Whether the congruence rule holds.
    pub valid: bool,

    /// The embedded 2-digit publisher code.
    pub publisher_code: u8,

    /// The publisher code's residues modulo 3, 5 and 7.
    pub expected: [u64; 3],

    /// The full number's residues modulo 3, 5 and 7.
    pub actual: [u64; 3],

    /// Whether the identifier was issued by this store. Only meaningful
    /// when `valid` is true.
    pub in_storage: bool,

    /// For an invalid identifier: a valid identifier with the same
    /// 6-digit prefix.
    pub corrected: Option<Isbn>,
}

/// The identifier engine.
///
/// Bound to one injected store; one engine instance per store instance.
/// All generation goes through [`Engine::generate`], which commits every
/// issued identifier to the store before returning it.
#[derive(Debug)]
pub struct Engine<S> {
    store: S,
}

impl<S: IdentifierStore> Engine<S> {
    /// Creates an engine over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Generates a fresh identifier for `prefix`.
    ///
    /// Two strategies, in order:
    ///
    /// 1. **Multiples** (when enabled and the store holds a prior suffix
    ///    for this exact prefix): try `last * m mod 10^7` for `m` in
    ///    `2..=max_attempts + 1`, accepting the first unissued candidate
    ///    that satisfies the congruence. Exhaustion here is not an error;
    ///    the search falls through to step two.
    /// 2. **CRT offsets**: solve for the base suffix `B0` satisfying the
    ///    congruence, then walk candidates `B0 + offset * 105` over the
    ///    105-slot offset cycle, resuming from the store's last position.
    ///
    /// Returns `Ok(None)` when the iteration cap is hit or all 105
    /// offsets are exhausted without an unissued match - for one prefix
    /// the offset scheme can reach at most 105 distinct suffixes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to persist the issued
    /// identifier.
    pub fn generate(
        &mut self,
        prefix: &Prefix,
        options: &GenerateOptions,
    ) -> CoreResult<Option<Isbn>> {
        let targets = residues(u64::from(prefix.publisher_code()));

        if options.use_multiples {
            if let Some(last) = self.store.last_suffix(prefix.as_str()) {
                if let Some(isbn) = self.try_multiples(prefix, last, targets, options)? {
                    return Ok(Some(isbn));
                }
                debug!(prefix = %prefix, "no usable multiple, falling back to offset search");
            }
        }

        self.offset_search(prefix, targets, options)
    }

    /// Validates an identifier against the congruence rule.
    ///
    /// For an invalid identifier the result carries a corrected one built
    /// from the same prefix.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::MalformedInput`] unless `input` is
    /// exactly 13 decimal digits.
    pub fn validate(&self, input: &str) -> CoreResult<Validation> {
        let isbn = Isbn::parse(input)?;
        let publisher_code = isbn.publisher_code();
        let expected = residues(u64::from(publisher_code));
        let actual = residues(isbn.value());
        let valid = expected == actual;

        let in_storage = valid && self.store.contains(isbn.as_str());

        let corrected = if valid {
            None
        } else {
            let prefix = isbn.prefix();
            let mut suffix = self.suffix_base(&prefix, expected)? as i64;
            // The CRT base is already in [0, 105); these adjustments only
            // fire if an upstream computation went wrong.
            while suffix >= SUFFIX_SPAN as i64 {
                suffix -= COMBINED_MODULUS as i64;
            }
            while suffix < 0 {
                suffix += COMBINED_MODULUS as i64;
            }
            Some(Isbn::parse(&format!("{}{suffix:07}", prefix.as_str()))?)
        };

        Ok(Validation {
            valid,
            publisher_code,
            expected,
            actual,
            in_storage,
            corrected,
        })
    }

    fn try_multiples(
        &mut self,
        prefix: &Prefix,
        last: u32,
        targets: [u64; 3],
        options: &GenerateOptions,
    ) -> CoreResult<Option<Isbn>> {
        // m = 1 would reproduce the previous identifier, so start at 2.
        for multiplier in 2..=u64::from(options.max_attempts) + 1 {
            let suffix = (u64::from(last) * multiplier) % SUFFIX_SPAN;
            let candidate = format!("{}{suffix:07}", prefix.as_str());

            if self.store.contains(&candidate) {
                continue;
            }

            let isbn = Isbn::parse(&candidate)?;
            if residues(isbn.value()) == targets {
                self.store.commit(
                    prefix.publisher_code(),
                    isbn.as_str(),
                    prefix.as_str(),
                    options.offset.unwrap_or(0),
                )?;
                debug!(multiplier, isbn = %isbn, "issued identifier from suffix multiple");
                return Ok(Some(isbn));
            }
        }

        Ok(None)
    }

    fn offset_search(
        &mut self,
        prefix: &Prefix,
        targets: [u64; 3],
        options: &GenerateOptions,
    ) -> CoreResult<Option<Isbn>> {
        let base = self.suffix_base(prefix, targets)?;
        let cycle = COMBINED_MODULUS as u32;

        let mut offset = options
            .offset
            .map(|o| o % cycle)
            .unwrap_or_else(|| self.store.next_offset(prefix.as_str()));

        let mut tried = [false; COMBINED_MODULUS as usize];
        let mut tried_count = 0u32;
        let mut attempts = 0u32;

        while attempts < options.max_attempts && tried_count < cycle {
            let slot = offset as usize;
            if tried[slot] {
                offset = (offset + 1) % cycle;
                continue;
            }
            tried[slot] = true;
            tried_count += 1;

            let suffix = (base + u64::from(offset) * COMBINED_MODULUS) % SUFFIX_SPAN;
            let candidate = format!("{}{suffix:07}", prefix.as_str());

            if !self.store.contains(&candidate) {
                let isbn = Isbn::parse(&candidate)?;
                // The CRT construction guarantees this; kept as a safety
                // assertion on the arithmetic.
                if residues(isbn.value()) == targets {
                    self.store.commit(
                        prefix.publisher_code(),
                        isbn.as_str(),
                        prefix.as_str(),
                        offset,
                    )?;
                    return Ok(Some(isbn));
                }
            }

            offset = (offset + 1) % cycle;
            attempts += 1;
        }

        debug!(
            prefix = %prefix,
            attempts,
            tried = tried_count,
            "offset search exhausted without an unissued identifier"
        );
        Ok(None)
    }

    /// Smallest non-negative suffix `B0` with `prefix * 10^7 + B0`
    /// congruent to `targets` modulo each of 3, 5 and 7.
    fn suffix_base(&self, prefix: &Prefix, targets: [u64; 3]) -> CoreResult<u64> {
        let shift = prefix.value() * SUFFIX_SPAN;

        let mut needed = [0i64; 3];
        let mut moduli = [0i64; 3];
        for (i, &m) in MODULI.iter().enumerate() {
            let target = targets[i] as i64;
            let shifted = (shift % m) as i64;
            needed[i] = (target - shifted).rem_euclid(m as i64);
            moduli[i] = m as i64;
        }

        let base = crt_solve(&needed, &moduli)?;
        Ok(base as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use crtisbn_store::{InMemoryBackend, Ledger};

    fn engine() -> Engine<Ledger<InMemoryBackend>> {
        Engine::new(Ledger::open(InMemoryBackend::new()))
    }

    fn prefix_978316() -> Prefix {
        Prefix::parse("978316").unwrap()
    }

    #[test]
    fn offset_search_is_deterministic_for_fresh_store() {
        // Publisher 16: residues (1, 1, 2). The base solution for prefix
        // 978316 is 21, so the first issued identifier is fixed.
        let options = GenerateOptions::new().use_multiples(false);

        for _ in 0..3 {
            let mut engine = engine();
            let isbn = engine.generate(&prefix_978316(), &options).unwrap().unwrap();
            assert_eq!(isbn.as_str(), "9783160000021");
        }
    }

    #[test]
    fn generated_identifier_satisfies_congruence() {
        let mut engine = engine();
        let isbn = engine
            .generate(&prefix_978316(), &GenerateOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(residues(isbn.value()), residues(16));
    }

    #[test]
    fn second_generation_uses_suffix_multiple() {
        let mut engine = engine();
        let options = GenerateOptions::default();

        let first = engine.generate(&prefix_978316(), &options).unwrap().unwrap();
        assert_eq!(first.suffix(), 21);

        // 21 * 6 = 126 is the first multiple congruent to 21 mod 105.
        let second = engine.generate(&prefix_978316(), &options).unwrap().unwrap();
        assert_eq!(second.suffix(), 126);
        assert!(engine.validate(second.as_str()).unwrap().valid);
    }

    #[test]
    fn multiples_disabled_advances_by_offset() {
        let mut engine = engine();
        let options = GenerateOptions::new().use_multiples(false);

        let first = engine.generate(&prefix_978316(), &options).unwrap().unwrap();
        let second = engine.generate(&prefix_978316(), &options).unwrap().unwrap();

        assert_eq!(first.suffix(), 21);
        assert_eq!(second.suffix(), 21 + 105);
    }

    #[test]
    fn explicit_offset_overrides_store_position() {
        let mut engine = engine();
        let options = GenerateOptions::new().use_multiples(false).offset(10);

        let isbn = engine.generate(&prefix_978316(), &options).unwrap().unwrap();
        assert_eq!(isbn.suffix(), 21 + 10 * 105);
    }

    #[test]
    fn validate_known_valid_identifier() {
        let engine = engine();
        let report = engine.validate("9783160001071").unwrap();

        // Direct arithmetic: publisher 16 -> (1, 1, 2) and the full
        // number has the same residues.
        assert_eq!(report.publisher_code, 16);
        assert_eq!(report.expected, [1, 1, 2]);
        assert_eq!(report.actual, [1, 1, 2]);
        assert!(report.valid);
        assert!(!report.in_storage);
        assert!(report.corrected.is_none());
    }

    #[test]
    fn validate_invalid_identifier_suggests_correction() {
        let engine = engine();
        // Ends in 2 so the residue mod 5 is off.
        let report = engine.validate("9783160000022").unwrap();

        assert!(!report.valid);
        assert!(!report.in_storage);
        let corrected = report.corrected.unwrap();
        assert_eq!(corrected.as_str(), "9783160000021");
        assert!(engine.validate(corrected.as_str()).unwrap().valid);
    }

    #[test]
    fn validate_rejects_malformed_input() {
        let engine = engine();
        assert!(matches!(
            engine.validate("123"),
            Err(CoreError::MalformedInput { .. })
        ));
        assert!(engine.validate("978316000107x").is_err());
    }

    #[test]
    fn round_trip_reports_in_storage() {
        let mut engine = engine();
        let isbn = engine
            .generate(&prefix_978316(), &GenerateOptions::default())
            .unwrap()
            .unwrap();

        let report = engine.validate(isbn.as_str()).unwrap();
        assert!(report.valid);
        assert!(report.in_storage);
    }

    #[test]
    fn exhaustion_returns_none_after_105_issues() {
        let mut engine = engine();
        let options = GenerateOptions::new().use_multiples(false);
        let prefix = prefix_978316();

        for _ in 0..105 {
            let isbn = engine.generate(&prefix, &options).unwrap();
            assert!(isbn.is_some());
        }
        assert_eq!(engine.store().count(), 105);

        let exhausted = engine.generate(&prefix, &options).unwrap();
        assert!(exhausted.is_none());
        assert_eq!(engine.store().count(), 105);
    }

    #[test]
    fn generated_identifiers_are_globally_unique() {
        let mut engine = engine();
        let options = GenerateOptions::default();
        let prefix = prefix_978316();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let isbn = engine.generate(&prefix, &options).unwrap().unwrap();
            assert!(seen.insert(isbn.as_str().to_string()), "duplicate issued");
        }
    }

    #[test]
    fn max_attempts_caps_the_search() {
        let mut engine = engine();
        let options = GenerateOptions::new().use_multiples(false).max_attempts(3);
        let prefix = prefix_978316();

        for _ in 0..3 {
            assert!(engine.generate(&prefix, &options).unwrap().is_some());
        }
        // The next three offsets in line are all issued, and the cap
        // forbids looking further.
        let options = options.offset(0);
        assert!(engine.generate(&prefix, &options).unwrap().is_none());
    }
}
