//! Ports for form document persistence.

use async_trait::async_trait;

use formsmith_core::AppResult;
use formsmith_domain::{CommandOutcome, FormCommand, FormDocument};

/// Repository port holding the single form document being edited.
#[async_trait]
pub trait FormDocumentRepository: Send + Sync {
    /// Returns a snapshot of the current document.
    async fn load(&self) -> AppResult<FormDocument>;

    /// Applies one command atomically and returns the resulting snapshot.
    ///
    /// Concurrent readers observe either the state before the command or
    /// the state after it, never an intermediate one.
    async fn apply(&self, command: FormCommand) -> AppResult<AppliedCommand>;
}

/// Snapshot and outcome produced by one applied command.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCommand {
    /// Document state after the command.
    pub document: FormDocument,
    /// What the command did.
    pub outcome: CommandOutcome,
}
