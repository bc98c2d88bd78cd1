//! `humidor-ai`
//!
//! **Responsibility:** guided auto-fill of a cigar form from an external field
//! lookup (e.g. an AI suggestion service).
//!
//! - The lookup service is an opaque collaborator behind [`FieldLookup`].
//! - Responses are validated against a [`FieldSchema`] before anything is merged.
//! - Merging never overwrites a field the user already filled in.

pub mod lookup;
pub mod merge;
pub mod record;
pub mod result;
pub mod schema;

pub use lookup::{AutoFill, AutoFillOutcome, FieldLookup, LookupTicket};
pub use merge::{MergeOutcome, merge};
pub use record::{CandidateRecord, DraftRecord, FieldValue, Record};
pub use result::AiError;
pub use schema::{FieldKind, FieldSchema, RejectReason, RejectedField, ValidatedCandidate};
