//! # crtisbn Core
//!
//! Identifier engine for 13-digit, ISBN-13-shaped numbers governed by a
//! congruence rule: a number is valid when its residues modulo 3, 5 and 7
//! equal the residues of its embedded 2-digit publisher code.
//!
//! This crate provides:
//! - Validated [`Isbn`] and [`Prefix`] types
//! - Modular arithmetic (extended GCD, modular inverse, CRT solve)
//! - [`Engine`] - generation with collision avoidance and a deterministic,
//!   restartable search order, plus validation with correction
//!
//! The engine is bound to one injected [`crtisbn_store::IdentifierStore`];
//! it holds no ambient global state.
//!
//! ## Example
//!
//! ```rust
//! use crtisbn_core::{Engine, GenerateOptions, Prefix};
//! use crtisbn_store::{InMemoryBackend, Ledger};
//!
//! let mut engine = Engine::new(Ledger::open(InMemoryBackend::new()));
//! let prefix = Prefix::parse("978316").unwrap();
//! let isbn = engine
//!     .generate(&prefix, &GenerateOptions::default())
//!     .unwrap()
//!     .expect("fresh prefix has capacity");
//! assert!(engine.validate(isbn.as_str()).unwrap().valid);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod ident;
pub mod modmath;

pub use engine::{Engine, GenerateOptions, Validation};
pub use error::{CoreError, CoreResult};
pub use ident::{residues, Isbn, Prefix, COMBINED_MODULUS, DOMAIN_TAG, MODULI, SUFFIX_SPAN};
