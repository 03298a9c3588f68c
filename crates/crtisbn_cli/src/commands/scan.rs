//! Scan command implementation.
//!
//! Reads a line-oriented text file, extracts every identifier printed in
//! the batch layout (`<n>. <13 digits> (Format: ...)`) and validates each
//! one against the congruence rule.

use crtisbn_core::Engine;
use crtisbn_store::IdentifierStore;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Summary of one scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Identifiers found in the file.
    pub found: usize,
    /// Identifiers that failed the congruence check.
    pub invalid: usize,
}

/// Runs the scan command.
pub fn run<S: IdentifierStore>(
    engine: &Engine<S>,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking identifiers in {}", file.display());

    let text = fs::read_to_string(file)?;
    let isbns = extract_identifiers(&text)?;

    let mut report = ScanReport {
        found: isbns.len(),
        invalid: 0,
    };
    println!("Found {} identifiers", report.found);

    for (index, isbn) in isbns.iter().enumerate() {
        let result = engine.validate(isbn)?;
        if !result.valid {
            report.invalid += 1;
            println!("#{} is INVALID: {isbn}", index + 1);
            println!("  Publisher:  {}", result.publisher_code);
            println!("  Expected:   {:?}", result.expected);
            println!("  Actual:     {:?}", result.actual);
        }
    }

    if report.invalid == 0 {
        println!("All {} identifiers satisfy the congruence rule.", report.found);
    } else {
        println!("{} of {} identifiers are invalid.", report.invalid, report.found);
    }

    Ok(())
}

/// Pulls every identifier out of the batch-layout lines of `text`.
fn extract_identifiers(text: &str) -> Result<Vec<String>, regex::Error> {
    let pattern = Regex::new(r"^\d+\.\s+(\d{13})\s+\(Format:")?;
    Ok(text
        .lines()
        .filter_map(|line| pattern.captures(line))
        .map(|captures| captures[1].to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_batch_layout_lines() {
        let text = "\
1. 9783160001071 (Format: 978-3-16-0001071)
some unrelated line
2. 9783160000021 (Format: 978-3-16-0000021)
3 9783160000126 (Format: missing dot, skipped)
9783160000126 (Format: no index, skipped)
";
        let isbns = extract_identifiers(text).unwrap();
        assert_eq!(isbns, ["9783160001071", "9783160000021"]);
    }

    #[test]
    fn ignores_wrong_length_numbers() {
        let text = "1. 978316000107 (Format: too short)\n2. 97831600010711 (Format: too long)\n";
        assert!(extract_identifiers(text).unwrap().is_empty());
    }

    #[test]
    fn empty_input_finds_nothing() {
        assert!(extract_identifiers("").unwrap().is_empty());
    }
}
