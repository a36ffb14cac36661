use crate::model::{Rule, RuleId, RulePatch, Ruleset, RulesetId};
use tracing::debug;

/// Single source of truth: owns every ruleset and the identifier of the
/// active one. Callers hold an explicit handle; there is no ambient access.
///
/// Every operation is synchronous and either fully applies or has no
/// effect. Lookups that miss are silent no-ops, never errors; name
/// uniqueness and completeness gates live with the callers (see
/// [`crate::validate`] and [`crate::session`]).
#[derive(Debug, Clone, Default)]
pub struct RulesetStore {
    rulesets: Vec<Ruleset>,
    active_id: Option<RulesetId>,
}

impl RulesetStore {
    pub fn new() -> RulesetStore {
        RulesetStore::default()
    }

    /// Build a store from imported rulesets; the first one starts active.
    pub fn from_rulesets(rulesets: Vec<Ruleset>) -> RulesetStore {
        let active_id = rulesets.first().map(|rs| rs.id.clone());
        RulesetStore {
            rulesets,
            active_id,
        }
    }

    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    pub fn active_id(&self) -> Option<&RulesetId> {
        self.active_id.as_ref()
    }

    pub fn active_ruleset(&self) -> Option<&Ruleset> {
        self.active_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &RulesetId) -> Option<&Ruleset> {
        self.rulesets.iter().find(|rs| &rs.id == id)
    }

    fn get_mut(&mut self, id: &RulesetId) -> Option<&mut Ruleset> {
        self.rulesets.iter_mut().find(|rs| &rs.id == id)
    }

    /// Exact-match lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Ruleset> {
        self.rulesets.iter().find(|rs| rs.name == name)
    }

    /// Append a new empty ruleset and make it active. Duplicate names are
    /// not rejected here; that gate belongs to the name-entry caller.
    pub fn create_ruleset(&mut self, name: impl Into<String>) -> RulesetId {
        let ruleset = Ruleset::new(name);
        let id = ruleset.id.clone();
        debug!(name = %ruleset.name, "create ruleset");
        self.rulesets.push(ruleset);
        self.active_id = Some(id.clone());
        id
    }

    /// In-place rename with no uniqueness check; enforcement happens at the
    /// caller's commit time, not per keystroke.
    pub fn rename_ruleset(&mut self, id: &RulesetId, new_name: &str) {
        if let Some(ruleset) = self.get_mut(id) {
            ruleset.name = new_name.to_string();
        }
    }

    /// Remove a ruleset. If it was active, the first remaining ruleset
    /// becomes active, or none if the collection is now empty.
    pub fn delete_ruleset(&mut self, id: &RulesetId) {
        self.rulesets.retain(|rs| &rs.id != id);
        if self.active_id.as_ref() == Some(id) {
            self.active_id = self.rulesets.first().map(|rs| rs.id.clone());
        }
    }

    /// Deep-clone a ruleset under a generated `name_(n)` and make the copy
    /// active. Every rule gets a freshly minted id; nothing shares identity
    /// with the source. Returns `None` if the source is missing.
    pub fn copy_ruleset(&mut self, id: &RulesetId) -> Option<RulesetId> {
        let source = self.get(id)?;
        let copy = Ruleset {
            id: RulesetId::mint(),
            name: self.copy_name(&source.name),
            rules: source
                .rules
                .iter()
                .map(|rule| Rule {
                    id: RuleId::mint(),
                    ..rule.clone()
                })
                .collect(),
        };
        let new_id = copy.id.clone();
        debug!(source = %id, copy = %new_id, name = %copy.name, "copy ruleset");
        self.rulesets.push(copy);
        self.active_id = Some(new_id.clone());
        Some(new_id)
    }

    /// First `base_(n)` with no exact-match among existing names. The check
    /// is case-sensitive, unlike the rename/create collision check; the
    /// asymmetry is inherited behavior and kept as-is.
    fn copy_name(&self, base: &str) -> String {
        let mut count = 1;
        loop {
            let candidate = format!("{base}_({count})");
            if !self.rulesets.iter().any(|rs| rs.name == candidate) {
                return candidate;
            }
            count += 1;
        }
    }

    /// Select the active ruleset; unknown ids are ignored so the active id
    /// always refers to an existing ruleset (or none).
    pub fn set_active_ruleset(&mut self, id: &RulesetId) {
        if self.get(id).is_some() {
            self.active_id = Some(id.clone());
        }
    }

    /// Append a rule, filling omitted fields with the new-rule defaults.
    /// A supplied id is preserved (the pending-new commit path), otherwise
    /// one is minted.
    pub fn add_rule(&mut self, ruleset_id: &RulesetId, patch: RulePatch) {
        if let Some(ruleset) = self.get_mut(ruleset_id) {
            let rule = patch.into_rule();
            debug!(ruleset = %ruleset_id, rule = %rule.id, "add rule");
            ruleset.rules.push(rule);
        }
    }

    /// Merge set fields into an existing rule in place.
    pub fn edit_rule(&mut self, ruleset_id: &RulesetId, rule_id: &RuleId, patch: RulePatch) {
        if let Some(rule) = self
            .get_mut(ruleset_id)
            .and_then(|ruleset| ruleset.rule_mut(rule_id))
        {
            patch.apply_to(rule);
        }
    }

    pub fn delete_rule(&mut self, ruleset_id: &RulesetId, rule_id: &RuleId) {
        if let Some(ruleset) = self.get_mut(ruleset_id) {
            ruleset.rules.retain(|rule| &rule.id != rule_id);
        }
    }

    /// Standard list move: remove the rule at `from` and reinsert it at
    /// `to`. No-op when the indices are equal or out of bounds.
    pub fn reorder_rules(&mut self, ruleset_id: &RulesetId, from: usize, to: usize) {
        if let Some(ruleset) = self.get_mut(ruleset_id) {
            if from == to || from >= ruleset.rules.len() || to >= ruleset.rules.len() {
                return;
            }
            let rule = ruleset.rules.remove(from);
            ruleset.rules.insert(to, rule);
            debug!(ruleset = %ruleset_id, from, to, "reorder rules");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comparator, RuleAction, NOT_PRESENT};

    fn store_with(names: &[&str]) -> RulesetStore {
        let mut store = RulesetStore::new();
        for name in names {
            store.create_ruleset(*name);
        }
        store
    }

    fn rule_patch(measurement: &str) -> RulePatch {
        RulePatch {
            measurement: Some(measurement.to_string()),
            finding_name: Some(format!("{measurement} finding")),
            action: Some(RuleAction::Normal),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sets_active() {
        let mut store = RulesetStore::new();
        let id = store.create_ruleset("Default");
        assert_eq!(store.active_id(), Some(&id));
        assert_eq!(store.rulesets().len(), 1);
        assert!(store.active_ruleset().unwrap().rules.is_empty());
    }

    #[test]
    fn test_rename_in_place() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        store.rename_ruleset(&id, "Renamed");
        assert_eq!(store.get(&id).unwrap().name, "Renamed");
    }

    #[test]
    fn test_rename_missing_is_noop() {
        let mut store = store_with(&["Default"]);
        store.rename_ruleset(&RulesetId::from("missing"), "X");
        assert_eq!(store.rulesets()[0].name, "Default");
    }

    #[test]
    fn test_delete_active_selects_first_remaining() {
        let mut store = store_with(&["A", "B", "C"]);
        let c = store.active_id().unwrap().clone();
        store.delete_ruleset(&c);
        // Active falls back to the first remaining by current order.
        assert_eq!(store.active_ruleset().unwrap().name, "A");
        assert_eq!(store.rulesets().len(), 2);
    }

    #[test]
    fn test_delete_non_active_keeps_active() {
        let mut store = store_with(&["A", "B"]);
        let b = store.active_id().unwrap().clone();
        let a = store.rulesets()[0].id.clone();
        store.delete_ruleset(&a);
        assert_eq!(store.active_id(), Some(&b));
    }

    #[test]
    fn test_delete_last_leaves_no_active() {
        let mut store = store_with(&["Only"]);
        let id = store.active_id().unwrap().clone();
        store.delete_ruleset(&id);
        assert!(store.is_empty());
        assert!(store.active_id().is_none());
    }

    #[test]
    fn test_copy_clones_rules_with_fresh_ids() {
        let mut store = store_with(&["Default"]);
        let source = store.active_id().unwrap().clone();
        store.add_rule(&source, rule_patch("Reflux Time"));
        store.add_rule(&source, rule_patch("Vein Diameter"));

        let copy_id = store.copy_ruleset(&source).unwrap();
        assert_eq!(store.active_id(), Some(&copy_id));

        let original = store.get(&source).unwrap();
        let copy = store.get(&copy_id).unwrap();
        assert_eq!(copy.name, "Default_(1)");
        assert_eq!(copy.rules.len(), 2);
        assert_eq!(copy.rules[0].measurement, "Reflux Time");
        for (a, b) in original.rules.iter().zip(&copy.rules) {
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_copy_name_increments_past_taken_suffixes() {
        let mut store = store_with(&["Default", "Default_(1)", "Default_(2)"]);
        let source = store.rulesets()[0].id.clone();
        let copy_id = store.copy_ruleset(&source).unwrap();
        assert_eq!(store.get(&copy_id).unwrap().name, "Default_(3)");
    }

    #[test]
    fn test_copy_name_check_is_case_sensitive() {
        // "default_(1)" differs in case, so the exact-match check ignores it
        // and the copy still lands on "Default_(1)".
        let mut store = store_with(&["Default", "default_(1)"]);
        let source = store.rulesets()[0].id.clone();
        let copy_id = store.copy_ruleset(&source).unwrap();
        assert_eq!(store.get(&copy_id).unwrap().name, "Default_(1)");
    }

    #[test]
    fn test_copy_missing_returns_none() {
        let mut store = store_with(&["Default"]);
        assert!(store.copy_ruleset(&RulesetId::from("missing")).is_none());
        assert_eq!(store.rulesets().len(), 1);
    }

    #[test]
    fn test_set_active_ignores_unknown_id() {
        let mut store = store_with(&["A", "B"]);
        let b = store.active_id().unwrap().clone();
        store.set_active_ruleset(&RulesetId::from("missing"));
        assert_eq!(store.active_id(), Some(&b));

        let a = store.rulesets()[0].id.clone();
        store.set_active_ruleset(&a);
        assert_eq!(store.active_id(), Some(&a));
    }

    #[test]
    fn test_add_rule_fills_defaults() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        store.add_rule(&id, RulePatch::default());

        let rule = &store.get(&id).unwrap().rules[0];
        assert_eq!(rule.comparator, Comparator::Is);
        assert_eq!(rule.compared_value, NOT_PRESENT);
        assert!(rule.unit_name.is_empty());
        assert!(rule.finding_name.is_empty());
        assert!(rule.action.is_none());
    }

    #[test]
    fn test_edit_rule_merges_partial_fields() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        store.add_rule(&id, rule_patch("Reflux Time"));
        let rule_id = store.get(&id).unwrap().rules[0].id.clone();

        store.edit_rule(
            &id,
            &rule_id,
            RulePatch {
                finding_name: Some("SSV Reflux".to_string()),
                ..Default::default()
            },
        );

        let rule = &store.get(&id).unwrap().rules[0];
        assert_eq!(rule.finding_name, "SSV Reflux");
        assert_eq!(rule.measurement, "Reflux Time");
    }

    #[test]
    fn test_edit_and_delete_missing_are_noops() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        store.add_rule(&id, rule_patch("Reflux Time"));

        store.edit_rule(&id, &RuleId::from("missing"), rule_patch("X"));
        store.delete_rule(&id, &RuleId::from("missing"));
        store.edit_rule(&RulesetId::from("missing"), &RuleId::from("r"), rule_patch("X"));

        let ruleset = store.get(&id).unwrap();
        assert_eq!(ruleset.rules.len(), 1);
        assert_eq!(ruleset.rules[0].measurement, "Reflux Time");
    }

    #[test]
    fn test_delete_rule_by_id() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        store.add_rule(&id, rule_patch("A"));
        store.add_rule(&id, rule_patch("B"));
        let first = store.get(&id).unwrap().rules[0].id.clone();

        store.delete_rule(&id, &first);
        let rules = &store.get(&id).unwrap().rules;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].measurement, "B");
    }

    fn measurements(store: &RulesetStore, id: &RulesetId) -> Vec<String> {
        store
            .get(id)
            .unwrap()
            .rules
            .iter()
            .map(|r| r.measurement.clone())
            .collect()
    }

    #[test]
    fn test_reorder_is_a_list_move() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        for m in ["A", "B", "C", "D"] {
            store.add_rule(&id, rule_patch(m));
        }

        store.reorder_rules(&id, 0, 2);
        assert_eq!(measurements(&store, &id), ["B", "C", "A", "D"]);

        store.reorder_rules(&id, 3, 0);
        assert_eq!(measurements(&store, &id), ["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_forward_then_back_restores_order() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        for m in ["A", "B", "C", "D", "E"] {
            store.add_rule(&id, rule_patch(m));
        }
        let before = measurements(&store, &id);

        store.reorder_rules(&id, 1, 4);
        store.reorder_rules(&id, 4, 1);
        assert_eq!(measurements(&store, &id), before);
    }

    #[test]
    fn test_reorder_noop_on_equal_or_out_of_bounds() {
        let mut store = store_with(&["Default"]);
        let id = store.active_id().unwrap().clone();
        for m in ["A", "B"] {
            store.add_rule(&id, rule_patch(m));
        }

        store.reorder_rules(&id, 1, 1);
        store.reorder_rules(&id, 5, 0);
        store.reorder_rules(&id, 0, 5);
        assert_eq!(measurements(&store, &id), ["A", "B"]);
    }
}
