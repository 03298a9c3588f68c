//! List command implementation.

use crtisbn_core::{Engine, Isbn};
use crtisbn_store::{IdentifierStore, Ledger, SnapshotBackend};

/// Runs the list command over a ledger-backed engine.
pub fn run<B: SnapshotBackend>(engine: &Engine<Ledger<B>>, publisher: Option<u8>) {
    let ledger = engine.store();

    if let Some(code) = publisher {
        print_bucket(&code.to_string(), ledger.issued_for_publisher(code));
        return;
    }

    if ledger.count() == 0 {
        println!("No identifiers have been issued yet.");
        return;
    }

    for (code, isbns) in &ledger.record().isbns {
        print_bucket(code, isbns);
    }
    println!();
    println!("Total: {}", ledger.count());
}

fn print_bucket(code: &str, isbns: &[String]) {
    println!("Publisher code {code} ({} identifiers):", isbns.len());
    for (index, isbn) in isbns.iter().enumerate() {
        // Hyphenate for readability; pass malformed entries through as-is.
        let formatted = Isbn::parse(isbn)
            .map(|parsed| parsed.hyphenated())
            .unwrap_or_else(|_| isbn.clone());
        println!("  {}. {formatted}", index + 1);
    }
}
