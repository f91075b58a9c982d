//! Error types for threshold identification.
//!
//! A function that is *not* a threshold function is an ordinary result
//! ([`Identification::NotThreshold`][crate::threshold::Identification]),
//! never an error. The variants below are faults: the call could not be
//! completed and no linear form is available.

use thiserror::Error;

/// The main error type of the crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The solver could not allocate a model with the requested number of columns.
    #[error("unable to create a model with {columns} columns: {reason}")]
    ModelAllocation {
        /// Requested number of columns.
        columns: usize,
        /// Why the solver refused.
        reason: String,
    },

    /// A constraint row could not be attached to the model.
    #[error("unable to add constraint row {row}: {reason}")]
    Constraint {
        /// Index of the rejected row (0-based, in insertion order).
        row: usize,
        /// Why the solver refused.
        reason: String,
    },

    /// The objective function could not be attached to the model.
    #[error("unable to set objective function: {reason}")]
    Objective {
        /// Why the solver refused.
        reason: String,
    },

    /// The solver reported a feasible status but the solution could not be read back.
    #[error("unable to read solution: {reason}")]
    Solution {
        /// What went wrong.
        reason: String,
    },

    /// A textual truth table could not be parsed.
    #[error("invalid truth table {input:?}: {reason}")]
    Parse {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
