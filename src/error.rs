//! Failure modes of truth particle classification
//!
//! Classification logic is total over well-formed input. All the errors below
//! are precondition violations: the input event is missing data, or its decay
//! graph is malformed. It is up to the caller to decide whether that should
//! abort the whole job or only skip the offending event.

use thiserror::Error;

/// Precondition violations detected while classifying an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The event source could not provide a required collection
    #[error("{operation}: cannot access {collection} (probably not saved in input sample)")]
    MissingCollection {
        /// Operation that needed the collection
        operation: &'static str,
        /// Name of the missing collection
        collection: String,
    },

    /// A particle link points outside of the particle container
    #[error("{operation}: particle link {index} is dangling, the container only holds {len} particles")]
    DanglingLink {
        /// Operation that followed the link
        operation: &'static str,
        /// Target of the link
        index: usize,
        /// Number of particles in the container
        len: usize,
    },

    /// A walk through the decay graph exceeded the maximal depth
    #[error("{operation}: decay graph walk from barcode {barcode} exceeded {max_depth} steps, is the decay graph cyclic?")]
    AncestryTooDeep {
        /// Operation that walked the decay graph
        operation: &'static str,
        /// Barcode of the particle that the walk started from
        barcode: i32,
        /// Maximal number of steps that the walk was allowed to take
        max_depth: usize,
    },
}

/// Result type of fallible classification operations
pub type Result<T> = std::result::Result<T, ClassifyError>;
