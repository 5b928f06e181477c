use async_trait::async_trait;
use formsmith_application::{AppliedCommand, FormDocumentRepository};
use formsmith_core::AppResult;
use formsmith_domain::{FormCommand, FormDocument};
use tokio::sync::RwLock;
use tracing::debug;


/// In-memory repository holding the single document being edited.
#[derive(Debug, Default)]
pub struct InMemoryFormDocumentRepository {
    document: RwLock<FormDocument>,
}

impl InMemoryFormDocumentRepository {
    /// Creates a repository holding an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with an existing document.
    #[must_use]
    pub fn with_document(document: FormDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl FormDocumentRepository for InMemoryFormDocumentRepository {
    async fn load(&self) -> AppResult<FormDocument> {
        Ok(self.document.read().await.clone())
    }

    async fn apply(&self, command: FormCommand) -> AppResult<AppliedCommand> {
        let command_name = command.name();
        let mut document = self.document.write().await;
        let outcome = document.apply(command);

        debug!(
            command = command_name,
            changed = outcome.changed,
            field_count = document.fields().len(),
            "applied form command"
        );

        Ok(AppliedCommand {
            document: document.clone(),
            outcome,
        })
    }
}
