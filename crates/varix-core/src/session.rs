use crate::error::EditError;
use crate::model::{Comparator, Rule, RuleId, RulePatch, RulesetId};
use crate::store::RulesetStore;
use crate::validate::{has_incomplete_rule, is_duplicate_name, is_rule_complete};
use tracing::debug;

/// Yes/no prompt shown before destructive transitions. The host supplies
/// the real modal; tests substitute canned answers.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel your changes?";
pub const DELETE_RULESET_PROMPT: &str = "Are you sure you want to delete this ruleset?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    View,
    Edit,
}

/// What the single in-flight draft stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftKind {
    /// An existing rule opened for inline edit; the store copy stays
    /// untouched until the row is saved.
    Editing(RuleId),
    /// A synthesized rule that has not reached the store yet.
    PendingNew,
}

#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub kind: DraftKind,
    pub rule: Rule,
}

/// Transient edit state layered over one active ruleset at a time. Tracks
/// the view/edit mode, at most one draft rule, and the validation-error
/// flag. Every commit path runs through [`crate::validate`] before it is
/// allowed to reach the store; the store handle is passed in per call.
#[derive(Debug, Default)]
pub struct RuleEditSession {
    mode: Mode,
    draft: Option<RuleDraft>,
    show_validation_errors: bool,
    drag_locked: bool,
}

impl RuleEditSession {
    pub fn new() -> RuleEditSession {
        RuleEditSession::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft(&self) -> Option<&RuleDraft> {
        self.draft.as_ref()
    }

    /// Id of the uncommitted pending-new rule, if one exists.
    pub fn pending_new_id(&self) -> Option<&RuleId> {
        match &self.draft {
            Some(draft) if draft.kind == DraftKind::PendingNew => Some(&draft.rule.id),
            _ => None,
        }
    }

    pub fn show_validation_errors(&self) -> bool {
        self.show_validation_errors
    }

    pub fn drag_locked(&self) -> bool {
        self.drag_locked
    }

    /// `view -> edit`. Needs no validation, only something to edit.
    pub fn begin_edit(&mut self, store: &RulesetStore) -> Result<(), EditError> {
        if store.active_ruleset().is_none() {
            return Err(EditError::NoActiveRuleset);
        }
        self.mode = Mode::Edit;
        Ok(())
    }

    /// Open an existing rule for inline edit, buffering a copy as the
    /// draft. Only one row may be in draft state at a time; a missing rule
    /// id is a silent no-op.
    pub fn start_row_edit(
        &mut self,
        store: &RulesetStore,
        rule_id: &RuleId,
    ) -> Result<(), EditError> {
        if self.mode != Mode::Edit {
            return Err(EditError::NotEditing);
        }
        if self.draft.is_some() {
            return Err(EditError::DraftInProgress);
        }
        let active = store.active_ruleset().ok_or(EditError::NoActiveRuleset)?;
        if let Some(rule) = active.rule(rule_id) {
            self.draft = Some(RuleDraft {
                kind: DraftKind::Editing(rule_id.clone()),
                rule: rule.clone(),
            });
        }
        Ok(())
    }

    /// Merge field edits into the draft only; the committed rule is
    /// untouched until the row is saved. No-op without a draft.
    pub fn update_draft(&mut self, patch: RulePatch) {
        if let Some(draft) = self.draft.as_mut() {
            patch.apply_to(&mut draft.rule);
        }
    }

    /// Comparator change on the draft, with the atomic value/unit reset.
    pub fn set_draft_comparator(&mut self, comparator: Comparator) {
        if let Some(draft) = self.draft.as_mut() {
            draft.rule.set_comparator(comparator);
        }
    }

    /// Validate and commit the draft row. An incomplete draft is rejected
    /// and kept (no data loss); field error highlighting is signalled via
    /// the validation flag. On success an `Editing` draft merges into its
    /// committed rule and a `PendingNew` draft is appended to the store
    /// with its id preserved.
    pub fn save_row_edit(&mut self, store: &mut RulesetStore) -> Result<(), EditError> {
        let draft = match self.draft.take() {
            Some(draft) => draft,
            None => return Ok(()),
        };
        if !is_rule_complete(&draft.rule) {
            self.show_validation_errors = true;
            self.draft = Some(draft);
            return Err(EditError::IncompleteRule);
        }
        let active_id = match store.active_id().cloned() {
            Some(id) => id,
            None => {
                self.draft = Some(draft);
                return Err(EditError::NoActiveRuleset);
            }
        };
        match &draft.kind {
            DraftKind::Editing(rule_id) => {
                debug!(rule = %rule_id, "commit row edit");
                store.edit_rule(&active_id, rule_id, RulePatch::from(&draft.rule));
            }
            DraftKind::PendingNew => {
                debug!(rule = %draft.rule.id, "commit pending-new rule");
                store.add_rule(&active_id, RulePatch::from(&draft.rule));
                self.show_validation_errors = false;
            }
        }
        Ok(())
    }

    /// Discard the draft without committing. A pending-new rule vanishes
    /// entirely; it never existed in the store.
    pub fn cancel_row_edit(&mut self) {
        self.draft = None;
    }

    /// Synthesize a defaulted rule as the pending-new draft, opened in
    /// inline edit. Gated: rejected while another draft is open or while
    /// any committed rule is still incomplete.
    pub fn add_new_rule(&mut self, store: &RulesetStore) -> Result<RuleId, EditError> {
        if self.mode != Mode::Edit {
            return Err(EditError::NotEditing);
        }
        let active = store.active_ruleset().ok_or(EditError::NoActiveRuleset)?;
        if self.draft.is_some() {
            return Err(EditError::DraftInProgress);
        }
        if has_incomplete_rule(&active.rules, None) {
            return Err(EditError::IncompleteExistingRule);
        }
        let rule = Rule::new();
        let id = rule.id.clone();
        debug!(rule = %id, "synthesize pending-new rule");
        self.draft = Some(RuleDraft {
            kind: DraftKind::PendingNew,
            rule,
        });
        Ok(id)
    }

    /// Row deletion. The pending-new row is simply discarded; committed
    /// rows are deleted from the store immediately, with no confirmation.
    /// Deliberately asymmetric with ruleset deletion, which does confirm.
    pub fn delete_row(&mut self, store: &mut RulesetStore, rule_id: &RuleId) {
        if self.mode != Mode::Edit {
            return;
        }
        if self.pending_new_id() == Some(rule_id) {
            self.draft = None;
            return;
        }
        if let Some(active_id) = store.active_id().cloned() {
            store.delete_rule(&active_id, rule_id);
        }
    }

    /// Live rename of the active ruleset; uniqueness is enforced at
    /// [`RuleEditSession::save_changes`], not per keystroke.
    pub fn rename_active(&mut self, store: &mut RulesetStore, name: &str) -> Result<(), EditError> {
        if self.mode != Mode::Edit {
            return Err(EditError::NotEditing);
        }
        let active_id = store.active_id().cloned().ok_or(EditError::NoActiveRuleset)?;
        store.rename_ruleset(&active_id, name);
        Ok(())
    }

    /// Whole-session save, `edit -> view`. Gates, in order: every committed
    /// rule and any pending-new draft must be complete, and the ruleset
    /// name must not collide case-insensitively with another ruleset. On
    /// success a pending-new draft is committed; an in-flight row edit is
    /// dropped uncommitted.
    pub fn save_changes(&mut self, store: &mut RulesetStore) -> Result<(), EditError> {
        if self.mode != Mode::Edit {
            return Err(EditError::NotEditing);
        }
        let active = store.active_ruleset().ok_or(EditError::NoActiveRuleset)?;
        let pending = self
            .draft
            .as_ref()
            .filter(|draft| draft.kind == DraftKind::PendingNew)
            .map(|draft| &draft.rule);
        if has_incomplete_rule(&active.rules, pending) {
            self.show_validation_errors = true;
            return Err(EditError::IncompleteRule);
        }
        if is_duplicate_name(&active.name, store.rulesets(), Some(&active.id)) {
            return Err(EditError::DuplicateName {
                name: active.name.trim().to_string(),
            });
        }
        let active_id = active.id.clone();
        if let Some(draft) = self.draft.take() {
            if draft.kind == DraftKind::PendingNew {
                store.add_rule(&active_id, RulePatch::from(&draft.rule));
            }
        }
        debug!(ruleset = %active_id, "save changes");
        self.mode = Mode::View;
        self.show_validation_errors = false;
        Ok(())
    }

    /// Whole-session cancel, `edit -> view`, behind a confirmation. The
    /// draft is discarded; row edits already saved earlier in the session
    /// stay committed. Returns whether the cancel was applied.
    pub fn cancel_changes(&mut self, prompt: &dyn ConfirmPrompt) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        if !prompt.confirm(CANCEL_PROMPT) {
            return false;
        }
        debug!("cancel changes");
        self.mode = Mode::View;
        self.draft = None;
        self.show_validation_errors = false;
        true
    }

    /// Delete the active ruleset behind a confirmation and force the
    /// session back to `view` with all transient state cleared, whatever
    /// sub-state it was in. Returns whether the delete was applied.
    pub fn delete_active_ruleset(
        &mut self,
        store: &mut RulesetStore,
        prompt: &dyn ConfirmPrompt,
    ) -> bool {
        let active_id = match store.active_id().cloned() {
            Some(id) => id,
            None => return false,
        };
        if !prompt.confirm(DELETE_RULESET_PROMPT) {
            return false;
        }
        debug!(ruleset = %active_id, "delete ruleset");
        store.delete_ruleset(&active_id);
        self.mode = Mode::View;
        self.draft = None;
        self.show_validation_errors = false;
        self.drag_locked = false;
        true
    }

    /// Copy the active ruleset and engage the post-copy reorder lock; the
    /// host releases it once the duplicated list has settled.
    pub fn copy_active(&mut self, store: &mut RulesetStore) -> Option<RulesetId> {
        let active_id = store.active_id().cloned()?;
        let new_id = store.copy_ruleset(&active_id)?;
        self.drag_locked = true;
        Some(new_id)
    }

    /// End the post-copy reorder exclusion window.
    pub fn release_drag_lock(&mut self) {
        self.drag_locked = false;
    }

    /// Forward a settled drag intent to the store. Disabled in `view`
    /// mode, while any row is mid-inline-edit, and during the post-copy
    /// lock window.
    pub fn reorder(
        &mut self,
        store: &mut RulesetStore,
        from: usize,
        to: usize,
    ) -> Result<(), EditError> {
        if self.mode != Mode::Edit {
            return Err(EditError::NotEditing);
        }
        if self.draft.is_some() {
            return Err(EditError::DraftInProgress);
        }
        if self.drag_locked {
            return Err(EditError::ReorderLocked);
        }
        let active_id = store.active_id().cloned().ok_or(EditError::NoActiveRuleset)?;
        if from != to {
            store.reorder_rules(&active_id, from, to);
        }
        Ok(())
    }

    /// Render projection: committed rules with the `Editing` draft
    /// substituted in place, and a `PendingNew` draft appended at the end.
    pub fn visible_rules(&self, store: &RulesetStore) -> Vec<Rule> {
        let Some(active) = store.active_ruleset() else {
            return Vec::new();
        };
        let mut rules: Vec<Rule> = active
            .rules
            .iter()
            .map(|rule| match &self.draft {
                Some(draft)
                    if matches!(&draft.kind, DraftKind::Editing(id) if id == &rule.id) =>
                {
                    draft.rule.clone()
                }
                _ => rule.clone(),
            })
            .collect();
        if let Some(draft) = &self.draft {
            if draft.kind == DraftKind::PendingNew {
                rules.push(draft.rule.clone());
            }
        }
        rules
    }
}
