use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VarixError {
    #[error("failed to load seed from {path}: {reason}")]
    SeedLoad { path: PathBuf, reason: String },

    #[error("invalid seed: {0}")]
    SeedInvalid(String),

    #[error("no ruleset named '{0}'")]
    UnknownRuleset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-correctable validation failures raised by the edit session. Every
/// variant blocks its transition synchronously and leaves the triggering
/// state unchanged so the caller can correct the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Please complete all required fields before saving.")]
    IncompleteRule,

    #[error("Please complete all required fields in the existing rules before adding a new rule.")]
    IncompleteExistingRule,

    #[error("A ruleset with this name already exists. Please choose a different name.")]
    DuplicateName { name: String },

    #[error("Ruleset name must not be empty.")]
    EmptyName,

    #[error("no ruleset is selected")]
    NoActiveRuleset,

    #[error("rules can only be changed in edit mode")]
    NotEditing,

    #[error("another rule is already being edited")]
    DraftInProgress,

    #[error("reordering is temporarily disabled")]
    ReorderLocked,
}
