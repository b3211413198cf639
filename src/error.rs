//! Error types for the pick-route optimizer.

use thiserror::Error;

/// Errors surfaced by a single optimization call.
///
/// Hitting the 2-opt pass cap is deliberately not represented here: the
/// solver returns the best tour found so far and logs a diagnostic instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// A bin location or start location string failed the `Z-A-S[L|R]`
    /// grammar. The whole call aborts; no partial route is produced.
    #[error("malformed bin location `{raw}`")]
    MalformedLocation { raw: String },

    /// A geometry or timing field was unusable when the optimization ran.
    /// Configuration updates themselves are not validated, so a bad value
    /// only surfaces once a call actually depends on it.
    #[error("invalid warehouse configuration: {reason}")]
    InvalidConfig { reason: String },
}
