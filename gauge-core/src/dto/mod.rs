//! Descriptor and wire types exchanged with the evaluation provider

pub mod eval;
pub mod run;

use thiserror::Error;

/// Descriptor field validation failure, raised once at load time so
/// downstream components receive already-validated data
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("`{field}` {reason}")]
    Field {
        field: &'static str,
        reason: &'static str,
    },
}
