use texbake_image::{ExportError, PackError};
use texbake_util::thiserror;

/// Renderer-side bake failure, opaque to the bake runner.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Precondition failures, reported before anything has been mutated.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("object not found in scene")]
    MissingObject,
    #[error("no material on the object has a Principled BSDF")]
    MissingPrincipledMaterial,
    #[error("object has no UV map")]
    MissingUvLayer,
    #[error("UV map `{0}` not found on the object")]
    UnknownUvLayer(String),
    #[error("reference image not found in project")]
    MissingReferenceImage,
}

/// Everything a bake run can fail with, surfaced as one message.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("bake failed: {0}")]
    BakeInvocation(#[from] BackendError),
    #[error(transparent)]
    DimensionMismatch(#[from] PackError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
