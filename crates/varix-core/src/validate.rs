use crate::error::EditError;
use crate::model::{Comparator, Rule, Ruleset, RulesetId};
use crate::store::RulesetStore;

/// A rule can be committed once every required field is filled in:
/// measurement, finding and action, plus a unit for the numeric
/// comparators. The compared value is exempt because `is` locks it to the
/// sentinel and a comparator change pre-fills it.
pub fn is_rule_complete(rule: &Rule) -> bool {
    let has_required = !rule.measurement.trim().is_empty()
        && !rule.finding_name.trim().is_empty()
        && rule.action.is_some();

    if rule.comparator != Comparator::Is {
        return has_required && !rule.unit_name.trim().is_empty();
    }

    has_required
}

/// Save/add gate: true if any committed rule, or the in-flight draft when
/// one is supplied, is incomplete.
pub fn has_incomplete_rule(rules: &[Rule], draft: Option<&Rule>) -> bool {
    rules.iter().chain(draft).any(|rule| !is_rule_complete(rule))
}

/// Case-insensitive name collision check. The candidate is trimmed first;
/// `exclude` skips one ruleset so a rename never collides with itself.
pub fn is_duplicate_name(
    candidate: &str,
    rulesets: &[Ruleset],
    exclude: Option<&RulesetId>,
) -> bool {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return false;
    }
    rulesets
        .iter()
        .filter(|rs| exclude.map_or(true, |ex| ex != &rs.id))
        .any(|rs| rs.name.to_lowercase() == candidate)
}

/// Name-entry gate for new rulesets: trims the input, rejects empty names
/// and case-insensitive duplicates, and returns the accepted name.
pub fn validate_new_name(input: &str, store: &RulesetStore) -> Result<String, EditError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(EditError::EmptyName);
    }
    if is_duplicate_name(name, store.rulesets(), None) {
        return Err(EditError::DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}
