//! # crtisbn Server
//!
//! Transport-agnostic request handling for the identifier engine.
//!
//! This crate turns engine operations into typed request/response
//! messages with structured failure signaling, so an HTTP (or any other)
//! front end only has to decode a body, call one handler, and encode the
//! result.
//!
//! The handler owns the engine behind a mutex: the engine and store
//! assume a single logical writer, and serializing requests here is what
//! upholds that assumption.
//!
//! ## Example
//!
//! ```rust
//! use crtisbn_core::Engine;
//! use crtisbn_server::{ApiServer, GenerateRequest, ServerConfig};
//! use crtisbn_store::{InMemoryBackend, Ledger};
//!
//! let engine = Engine::new(Ledger::open(InMemoryBackend::new()));
//! let server = ApiServer::new(ServerConfig::default(), engine);
//!
//! let response = server
//!     .handle_generate(GenerateRequest { region: 3, publisher: 16, use_multiples: true })
//!     .unwrap();
//! assert_eq!(response.isbn.len(), 13);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod messages;
mod server;

pub use config::ServerConfig;
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use messages::{
    BatchGenerateRequest, BatchGenerateResponse, CountResponse, GenerateRequest, GenerateResponse,
    ValidateRequest, ValidateResponse,
};
pub use server::ApiServer;
