//! GetPreferencesHandler - Returns the user's adaptive preference, creating
//! the default one on first access.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preference::AdaptivePreference;

use super::PreferenceWriter;

pub struct GetPreferencesHandler {
    writer: PreferenceWriter,
}

impl GetPreferencesHandler {
    pub fn new(writer: PreferenceWriter) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<AdaptivePreference, DomainError> {
        let preference = self.writer.load(user_id).await?;
        if preference.version() > 0 {
            return Ok(preference);
        }
        // Version 0 means never stored; a racing creator wins and we re-read.
        let (created, ()) = self.writer.update(user_id, |_, _| ()).await?;
        Ok(created)
    }
}
