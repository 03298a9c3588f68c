//! Validate command implementation.

use crtisbn_core::Engine;
use crtisbn_store::IdentifierStore;

/// Runs the validate command.
pub fn run<S: IdentifierStore>(
    engine: &Engine<S>,
    isbn: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = engine.validate(isbn)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Identifier:    {isbn}");
    println!("Publisher:     {}", report.publisher_code);
    println!("Expected mod (3, 5, 7): {:?}", report.expected);
    println!("Actual mod   (3, 5, 7): {:?}", report.actual);

    if report.valid {
        println!("Valid: yes");
        if report.in_storage {
            println!("Issued by this store: yes");
        } else {
            println!("Issued by this store: no");
        }
    } else {
        println!("Valid: no");
        if let Some(corrected) = &report.corrected {
            println!("A valid identifier with this prefix: {corrected}");
        }
    }

    Ok(())
}
