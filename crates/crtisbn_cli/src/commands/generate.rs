//! Generate command implementation.

use crtisbn_core::{Engine, GenerateOptions, Prefix};
use crtisbn_store::IdentifierStore;

/// Runs the generate command.
pub fn run<S: IdentifierStore>(
    engine: &mut Engine<S>,
    region: u8,
    publisher: u8,
    use_multiples: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = Prefix::from_parts(region, publisher)?;
    let options = GenerateOptions::new().use_multiples(use_multiples);

    let Some(isbn) = engine.generate(&prefix, &options)? else {
        return Err(format!("no unique identifier available for prefix {prefix}").into());
    };

    match format {
        "json" => {
            let report = engine.validate(isbn.as_str())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("{} (Format: {})", isbn, isbn.hyphenated());
        }
    }

    Ok(())
}
