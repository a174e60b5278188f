use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollegeError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot delete {entity}: still referenced by {}", .dependents.join(", "))]
    ReferentialConflict {
        entity: &'static str,
        dependents: Vec<&'static str>,
    },

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CollegeError {
    /// Stable machine-readable tag, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::ReferentialConflict { .. } => "referential_conflict",
            Self::Store(_) => "store",
            Self::Internal(_) => "internal",
        }
    }
}

pub type CollegeResult<T> = Result<T, CollegeError>;
