//! Error types for Plenum operations.
//!
//! This module provides the main error type [`PlenumError`]. Not-found
//! conditions and rejected shifts are ordinary return values
//! (`Option`, [`ShiftOutcome`](crate::ShiftOutcome)); only genuinely
//! exceptional failures travel as `PlenumError`.

use std::io;

use thiserror::Error;

use plenum_core::{error::ModelError, identifier::ObjectId};

/// The main error type for Plenum operations.
#[derive(Debug, Error)]
pub enum PlenumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed drawing: primary hooks form a cycle through {0}")]
    HookCycle(ObjectId),

    #[error("Object {0} not found")]
    NotFound(ObjectId),

    #[error("No unused object id left in the drawing")]
    IdsExhausted,

    #[error("Invalid edit: {0}")]
    Model(#[from] ModelError),

    #[error("Collaborator error: {0}")]
    Collaborator(Box<dyn std::error::Error + Send + Sync>),
}

impl PlenumError {
    /// Wraps a failure raised by an external collaborator.
    pub fn collaborator(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Collaborator(err.into())
    }
}
