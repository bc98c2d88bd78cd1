//! Field-level merge of a candidate record into the user's draft.

use crate::record::{CandidateRecord, DraftRecord};

/// Updated draft plus the fields that were filled from the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub updated_draft: DraftRecord,
    /// Keys that were overwritten, in the order the candidate lists them.
    pub changed_fields: Vec<String>,
}

impl MergeOutcome {
    pub fn has_changes(&self) -> bool {
        !self.changed_fields.is_empty()
    }

    /// Human-readable note for the form, e.g. `Auto-filled: brand, country`.
    pub fn summary(&self) -> Option<String> {
        if self.changed_fields.is_empty() {
            return None;
        }
        Some(format!("Auto-filled: {}", self.changed_fields.join(", ")))
    }
}

/// Fill the draft's empty fields from the candidate.
///
/// A candidate field is applied iff the draft's field is empty and the
/// candidate's value is not. Neither input is modified.
pub fn merge(draft: &DraftRecord, candidate: &CandidateRecord) -> MergeOutcome {
    let mut updated_draft = draft.clone();
    let mut changed_fields = Vec::new();

    for (key, value) in candidate.iter() {
        if value.is_empty() || !updated_draft.is_field_empty(key) {
            continue;
        }
        updated_draft.set(key.to_string(), value.clone());
        changed_fields.push(key.to_string());
    }

    MergeOutcome {
        updated_draft,
        changed_fields,
    }
}
