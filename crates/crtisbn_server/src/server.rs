//! The request handler.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::messages::{
    BatchGenerateRequest, BatchGenerateResponse, CountResponse, GenerateRequest, GenerateResponse,
    ValidateRequest, ValidateResponse,
};
use crtisbn_core::{Engine, GenerateOptions, Prefix};
use crtisbn_store::IdentifierStore;
use parking_lot::Mutex;
use tracing::info;

/// The API server.
///
/// Wraps one [`Engine`] and exposes its operations as request handlers.
/// A transport layer (HTTP, local IPC) decodes bodies into the message
/// types, calls the matching handler, and encodes the result or the
/// [`crate::ErrorResponse`] derived from the error.
///
/// The mutex serializes all engine access: the engine and its store
/// assume a single logical writer.
pub struct ApiServer<S> {
    engine: Mutex<Engine<S>>,
    config: ServerConfig,
}

impl<S: IdentifierStore> ApiServer<S> {
    /// Creates a server over the given engine.
    pub fn new(config: ServerConfig, engine: Engine<S>) -> Self {
        Self {
            engine: Mutex::new(engine),
            config,
        }
    }

    /// Handles a generate-one request.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for out-of-range codes, `Exhausted` when the
    /// prefix has no unissued identifier left, `Storage` when the ledger
    /// cannot persist.
    pub fn handle_generate(&self, request: GenerateRequest) -> ServerResult<GenerateResponse> {
        let prefix = Prefix::from_parts(request.region, request.publisher)?;
        let options = GenerateOptions::new().use_multiples(request.use_multiples);

        let mut engine = self.engine.lock();
        let isbn = engine
            .generate(&prefix, &options)?
            .ok_or_else(|| ServerError::Exhausted {
                prefix: prefix.as_str().to_string(),
            })?;

        // The engine only commits identifiers that satisfy the rule, but
        // the response reports the check explicitly.
        let valid = engine.validate(isbn.as_str())?.valid;

        info!(isbn = %isbn, "issued identifier");
        Ok(GenerateResponse {
            suffix: isbn.as_str()[6..].to_string(),
            isbn: isbn.as_str().to_string(),
            valid,
            publisher: request.publisher,
            region: request.region,
        })
    }

    /// Handles a generate-batch request.
    ///
    /// Stops early when the prefix runs out of capacity; a partial batch
    /// is a success. An immediately exhausted prefix is `Exhausted`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for out-of-range codes or counts outside
    /// `1..=max_batch`.
    pub fn handle_batch_generate(
        &self,
        request: BatchGenerateRequest,
    ) -> ServerResult<BatchGenerateResponse> {
        if request.count == 0 || request.count > self.config.max_batch {
            return Err(ServerError::InvalidRequest(format!(
                "count must be between 1 and {}",
                self.config.max_batch
            )));
        }

        let prefix = Prefix::from_parts(request.region, request.publisher)?;
        let options = GenerateOptions::new().use_multiples(request.use_multiples);

        let mut engine = self.engine.lock();
        let mut isbns = Vec::with_capacity(request.count);
        for _ in 0..request.count {
            match engine.generate(&prefix, &options)? {
                Some(isbn) => isbns.push(isbn.as_str().to_string()),
                None => break,
            }
        }

        if isbns.is_empty() {
            return Err(ServerError::Exhausted {
                prefix: prefix.as_str().to_string(),
            });
        }

        info!(
            prefix = prefix.as_str(),
            requested = request.count,
            generated = isbns.len(),
            "issued identifier batch"
        );
        Ok(BatchGenerateResponse {
            requested: request.count,
            generated: isbns.len(),
            isbns,
        })
    }

    /// Handles a validate-one request.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the input is not 13 decimal digits.
    pub fn handle_validate(&self, request: ValidateRequest) -> ServerResult<ValidateResponse> {
        let engine = self.engine.lock();
        let report = engine.validate(&request.isbn)?;

        Ok(ValidateResponse {
            isbn: request.isbn,
            valid: report.valid,
            publisher: report.publisher_code,
            expected: report.expected,
            actual: report.actual,
            in_storage: report.in_storage,
            corrected: report.corrected.map(|isbn| isbn.as_str().to_string()),
        })
    }

    /// Handles a count-issued request.
    pub fn handle_count(&self) -> CountResponse {
        CountResponse {
            count: self.engine.lock().store().count(),
        }
    }
}
