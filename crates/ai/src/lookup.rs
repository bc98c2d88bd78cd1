use std::sync::atomic::{AtomicU64, Ordering};

use crate::merge::{MergeOutcome, merge};
use crate::record::DraftRecord;
use crate::result::AiError;
use crate::schema::FieldSchema;

/// External field-lookup collaborator (e.g. an AI suggestion service).
///
/// Given a cigar name and the expected output schema, returns the raw response
/// body. Transport, prompting and retries are the implementor's business.
pub trait FieldLookup: Send + Sync {
    fn lookup(&self, name: &str, schema: &FieldSchema) -> Result<String, AiError>;
}

impl<F> FieldLookup for F
where
    F: Fn(&str, &FieldSchema) -> Result<String, AiError> + Send + Sync,
{
    fn lookup(&self, name: &str, schema: &FieldSchema) -> Result<String, AiError> {
        self(name, schema)
    }
}

/// Handle for one in-flight lookup.
///
/// `target` identifies the draft the lookup was started for (item id, form
/// instance, ...). A result is only merged while its ticket is the newest one
/// and the draft still has the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    generation: u64,
    target: String,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

#[derive(Debug)]
pub enum AutoFillOutcome {
    /// At least one empty field was filled.
    Filled(MergeOutcome),
    /// The lookup succeeded but every field it returned was already filled (or empty).
    NothingNew,
    /// The lookup failed or returned something unusable; no merge was done.
    NotFound(AiError),
    /// A newer lookup was started, or the draft changed identity; the result was discarded.
    Superseded,
}

/// Coordinates lookups for one form so that at most one result is honored.
#[derive(Debug)]
pub struct AutoFill {
    schema: FieldSchema,
    latest: AtomicU64,
}

impl AutoFill {
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            latest: AtomicU64::new(0),
        }
    }

    pub fn cigar() -> Self {
        Self::new(FieldSchema::cigar())
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Start a lookup for `target`, superseding any earlier ticket.
    pub fn begin(&self, target: impl Into<String>) -> LookupTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LookupTicket {
            generation,
            target: target.into(),
        }
    }

    pub fn is_current(&self, ticket: &LookupTicket, current_target: &str) -> bool {
        ticket.generation == self.latest.load(Ordering::SeqCst) && ticket.target == current_target
    }

    /// Resolve a finished lookup against the draft as it is now.
    pub fn complete(
        &self,
        ticket: &LookupTicket,
        current_target: &str,
        draft: &DraftRecord,
        response: Result<String, AiError>,
    ) -> AutoFillOutcome {
        if !self.is_current(ticket, current_target) {
            tracing::debug!(
                generation = ticket.generation,
                draft = %ticket.target,
                "discarding superseded lookup result"
            );
            return AutoFillOutcome::Superseded;
        }

        let candidate = match response.and_then(|raw| self.schema.validate(&raw)) {
            Ok(validated) => validated.record,
            Err(error) => {
                tracing::warn!(%error, draft = %ticket.target, "field lookup failed");
                return AutoFillOutcome::NotFound(error);
            }
        };

        let outcome = merge(draft, &candidate);
        if outcome.has_changes() {
            tracing::info!(
                draft = %ticket.target,
                changed = ?outcome.changed_fields,
                "auto-filled draft"
            );
            AutoFillOutcome::Filled(outcome)
        } else {
            AutoFillOutcome::NothingNew
        }
    }

    /// Begin, look up `name` and complete in one call.
    ///
    /// A blank name is rejected up front and leaves any in-flight lookup current.
    pub fn run<L>(&self, target: &str, name: &str, draft: &DraftRecord, lookup: &L) -> AutoFillOutcome
    where
        L: FieldLookup + ?Sized,
    {
        let name = name.trim();
        if name.is_empty() {
            return AutoFillOutcome::NotFound(AiError::InvalidInput(
                "a name is required to look up a cigar".to_string(),
            ));
        }
        let ticket = self.begin(target);
        let response = lookup.lookup(name, &self.schema);
        self.complete(&ticket, target, draft, response)
    }
}
