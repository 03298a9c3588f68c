//! Batch generate command implementation.

use crtisbn_core::{Engine, GenerateOptions, Prefix};
use crtisbn_store::IdentifierStore;

/// Runs the batch command.
///
/// Prints the minted identifiers in the same numbered layout the scan
/// command parses back.
pub fn run<S: IdentifierStore>(
    engine: &mut Engine<S>,
    region: u8,
    publisher: u8,
    count: usize,
    use_multiples: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if count == 0 {
        return Err("count must be at least 1".into());
    }

    let prefix = Prefix::from_parts(region, publisher)?;
    let options = GenerateOptions::new().use_multiples(use_multiples);

    let mut minted = 0usize;
    for line in 1..=count {
        match engine.generate(&prefix, &options)? {
            Some(isbn) => {
                println!("{line}. {isbn} (Format: {})", isbn.hyphenated());
                minted += 1;
            }
            None => break,
        }
    }

    if minted == 0 {
        return Err(format!("no unique identifier available for prefix {prefix}").into());
    }
    if minted < count {
        println!();
        println!("Prefix exhausted after {minted} of {count} identifiers.");
    }

    Ok(())
}
