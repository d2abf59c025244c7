//! RecordInteractionHandler - Counts dashboard interactions.

use super::PreferenceWriter;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preference::{InteractionKind, InteractionPatterns};

pub struct RecordInteractionHandler {
    writer: PreferenceWriter,
}

impl RecordInteractionHandler {
    pub fn new(writer: PreferenceWriter) -> Self {
        Self { writer }
    }

    pub async fn handle(
        &self,
        user_id: &UserId,
        kind: InteractionKind,
    ) -> Result<InteractionPatterns, DomainError> {
        let (preference, ()) = self
            .writer
            .update(user_id, |preference, now| preference.record_interaction(kind, now))
            .await?;
        Ok(preference.interaction_patterns().clone())
    }
}
