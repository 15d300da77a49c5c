use std::time::Duration;

use thiserror::Error;

/// Coarse classification used by callers to pick an externally visible status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any store access
    Validation,
    /// Operation invoked against a resource in the wrong state
    Conflict,
    /// Credentials did not match a known user
    Authentication,
    /// Store or transaction failure, not actionable by the caller
    Infrastructure,
}

/// Errors produced by the reception/product lifecycle and its collaborators
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("incorrect city")]
    IncorrectCity,

    #[error("incorrect product type")]
    IncorrectProductType,

    #[error("incorrect user role")]
    IncorrectUserRole,

    #[error("incorrect email: {0}")]
    IncorrectEmail(String),

    #[error("user with this email already exists")]
    EmailAlreadyInUse,

    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("reception not found")]
    ReceptionNotFound,

    #[error("reception closed")]
    ReceptionClosed,

    #[error("previous reception not closed")]
    ReceptionNotClosed,

    #[error("reception is empty")]
    EmptyReception,

    #[error("credential processing failed: {0}")]
    Credential(String),

    #[error("transaction timed out after {0:?}")]
    Timeout(Duration),

    /// The store aborted a statement that ran past the transaction deadline
    #[error("statement cancelled by the store deadline")]
    QueryCancelled,

    #[error("transaction rollback failed: {0}")]
    RollbackFailed(String),

    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    /// Returns the classification of this error
    ///
    /// # Example
    /// ```
    /// use pvz_api::domain::errors::{DomainError, ErrorKind};
    ///
    /// assert_eq!(DomainError::ReceptionClosed.kind(), ErrorKind::Conflict);
    /// assert_eq!(DomainError::IncorrectCity.kind(), ErrorKind::Validation);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        use DomainError::*;
        match self {
            IncorrectCity | IncorrectProductType | IncorrectUserRole | IncorrectEmail(_) => {
                ErrorKind::Validation
            }
            EmailAlreadyInUse | ReceptionNotFound | ReceptionClosed | ReceptionNotClosed
            | EmptyReception => ErrorKind::Conflict,
            UserNotFound | WrongPassword => ErrorKind::Authentication,
            Credential(_) | Timeout(_) | QueryCancelled | RollbackFailed(_) | Store(_) => {
                ErrorKind::Infrastructure
            }
        }
    }

    /// Wraps any displayable store failure
    pub fn store(err: impl std::fmt::Display) -> Self {
        DomainError::Store(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
