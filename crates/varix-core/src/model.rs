use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sentinel compared value for presence/absence rules.
pub const NOT_PRESENT: &str = "Not Present";

/// Placeholder threshold filled in when a rule switches to a numeric comparator.
pub const DEFAULT_THRESHOLD: &str = "500";

/// Default unit filled in when a rule switches to a numeric comparator.
pub const DEFAULT_UNIT: &str = "ms";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesetId(String);

impl RulesetId {
    /// Mint a fresh identifier. Ids are never reused.
    pub fn mint() -> RulesetId {
        RulesetId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RulesetId {
    fn from(s: &str) -> RulesetId {
        RulesetId(s.to_string())
    }
}

impl From<String> for RulesetId {
    fn from(s: String) -> RulesetId {
        RulesetId(s)
    }
}

impl fmt::Display for RulesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn mint() -> RuleId {
        RuleId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> RuleId {
        RuleId(s.to_string())
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> RuleId {
        RuleId(s)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Presence/absence test, meaning "not present".
    #[serde(rename = "is")]
    #[default]
    Is,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
}

impl Comparator {
    /// Accepts the external "not present" spelling alongside the canonical ones.
    pub fn from_str_loose(s: &str) -> Option<Comparator> {
        match s.trim().to_lowercase().as_str() {
            "is" | "not present" => Some(Comparator::Is),
            ">=" => Some(Comparator::Gte),
            "<" => Some(Comparator::Lt),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Comparator::Is)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Is => write!(f, "is"),
            Comparator::Gte => write!(f, ">="),
            Comparator::Lt => write!(f, "<"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAction {
    Normal,
    Reflux,
}

impl RuleAction {
    pub fn from_str_loose(s: &str) -> Option<RuleAction> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(RuleAction::Normal),
            "reflux" => Some(RuleAction::Reflux),
            _ => None,
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Normal => write!(f, "Normal"),
            RuleAction::Reflux => write!(f, "Reflux"),
        }
    }
}

/// A single conditional statement: "measurement X is/>=/< value unit
/// implies finding F leads to action A". Pure data; completeness checks
/// live in [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub measurement: String,
    pub comparator: Comparator,
    pub compared_value: String,
    pub unit_name: String,
    pub finding_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
}

impl Rule {
    /// A blank rule with the defaults every new row starts from.
    pub fn new() -> Rule {
        Rule {
            id: RuleId::mint(),
            measurement: String::new(),
            comparator: Comparator::Is,
            compared_value: NOT_PRESENT.to_string(),
            unit_name: String::new(),
            finding_name: String::new(),
            action: None,
        }
    }

    /// Change the comparator and reset the dependent fields in the same step.
    /// `is` locks the compared value to the sentinel and clears the unit; the
    /// numeric comparators get the placeholder threshold and default unit.
    pub fn set_comparator(&mut self, comparator: Comparator) {
        self.comparator = comparator;
        match comparator {
            Comparator::Is => {
                self.compared_value = NOT_PRESENT.to_string();
                self.unit_name.clear();
            }
            Comparator::Gte | Comparator::Lt => {
                self.compared_value = DEFAULT_THRESHOLD.to_string();
                self.unit_name = DEFAULT_UNIT.to_string();
            }
        }
    }

    /// Condition column text, e.g. "Reflux Time >= 500 ms" or
    /// "Thrombus is Not Present".
    pub fn condition_text(&self) -> String {
        match self.comparator {
            Comparator::Is => format!("{} is {}", self.measurement, self.compared_value),
            Comparator::Gte | Comparator::Lt => format!(
                "{} {} {} {}",
                self.measurement, self.comparator, self.compared_value, self.unit_name
            ),
        }
    }
}

impl Default for Rule {
    fn default() -> Rule {
        Rule::new()
    }
}

/// Field-wise partial update for a rule. Used by the store both to fill
/// defaults on add and to merge edits in place; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub id: Option<RuleId>,
    pub measurement: Option<String>,
    pub comparator: Option<Comparator>,
    pub compared_value: Option<String>,
    pub unit_name: Option<String>,
    pub finding_name: Option<String>,
    pub action: Option<RuleAction>,
}

impl RulePatch {
    /// Merge the set fields into an existing rule. The id is never changed.
    /// A bare comparator merge does not reset dependent fields; callers that
    /// want the atomic reset go through [`Rule::set_comparator`].
    pub fn apply_to(&self, rule: &mut Rule) {
        if let Some(ref measurement) = self.measurement {
            rule.measurement = measurement.clone();
        }
        if let Some(comparator) = self.comparator {
            rule.comparator = comparator;
        }
        if let Some(ref compared_value) = self.compared_value {
            rule.compared_value = compared_value.clone();
        }
        if let Some(ref unit_name) = self.unit_name {
            rule.unit_name = unit_name.clone();
        }
        if let Some(ref finding_name) = self.finding_name {
            rule.finding_name = finding_name.clone();
        }
        if let Some(action) = self.action {
            rule.action = Some(action);
        }
    }

    /// Build a full rule, filling omitted fields with the defaults a new
    /// rule starts from. A supplied id is preserved, otherwise one is minted.
    pub fn into_rule(self) -> Rule {
        Rule {
            id: self.id.unwrap_or_else(RuleId::mint),
            measurement: self.measurement.unwrap_or_default(),
            comparator: self.comparator.unwrap_or_default(),
            compared_value: self
                .compared_value
                .unwrap_or_else(|| NOT_PRESENT.to_string()),
            unit_name: self.unit_name.unwrap_or_default(),
            finding_name: self.finding_name.unwrap_or_default(),
            action: self.action,
        }
    }
}

impl From<&Rule> for RulePatch {
    fn from(rule: &Rule) -> RulePatch {
        RulePatch {
            id: Some(rule.id.clone()),
            measurement: Some(rule.measurement.clone()),
            comparator: Some(rule.comparator),
            compared_value: Some(rule.compared_value.clone()),
            unit_name: Some(rule.unit_name.clone()),
            finding_name: Some(rule.finding_name.clone()),
            action: rule.action,
        }
    }
}

/// Named ordered sequence of rules. Order is evaluation/display priority
/// and changes only through an explicit reorder operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruleset {
    pub id: RulesetId,
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Ruleset {
    pub fn new(name: impl Into<String>) -> Ruleset {
        Ruleset {
            id: RulesetId::mint(),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub fn rule_mut(&mut self, id: &RuleId) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| &r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rule_defaults() {
        let rule = Rule::new();
        assert_eq!(rule.comparator, Comparator::Is);
        assert_eq!(rule.compared_value, NOT_PRESENT);
        assert!(rule.measurement.is_empty());
        assert!(rule.unit_name.is_empty());
        assert!(rule.finding_name.is_empty());
        assert!(rule.action.is_none());
    }

    #[test]
    fn test_switch_to_is_resets_value_and_unit() {
        let mut rule = Rule::new();
        rule.set_comparator(Comparator::Gte);
        rule.compared_value = "750".to_string();
        rule.unit_name = "mm".to_string();

        rule.set_comparator(Comparator::Is);
        assert_eq!(rule.compared_value, NOT_PRESENT);
        assert_eq!(rule.unit_name, "");
    }

    #[test]
    fn test_switch_to_numeric_fills_placeholder_defaults() {
        let mut rule = Rule::new();
        rule.set_comparator(Comparator::Lt);
        assert_eq!(rule.compared_value, DEFAULT_THRESHOLD);
        assert_eq!(rule.unit_name, DEFAULT_UNIT);

        rule.set_comparator(Comparator::Is);
        rule.set_comparator(Comparator::Gte);
        assert_eq!(rule.compared_value, DEFAULT_THRESHOLD);
        assert_eq!(rule.unit_name, DEFAULT_UNIT);
    }

    #[test]
    fn test_comparator_from_str_loose() {
        assert_eq!(Comparator::from_str_loose("is"), Some(Comparator::Is));
        assert_eq!(
            Comparator::from_str_loose("Not Present"),
            Some(Comparator::Is)
        );
        assert_eq!(Comparator::from_str_loose(">="), Some(Comparator::Gte));
        assert_eq!(Comparator::from_str_loose(" < "), Some(Comparator::Lt));
        assert_eq!(Comparator::from_str_loose("=="), None);
    }

    #[test]
    fn test_comparator_serde_spellings() {
        let json = serde_json::to_string(&Comparator::Gte).unwrap();
        assert_eq!(json, "\">=\"");
        let back: Comparator = serde_json::from_str("\"is\"").unwrap();
        assert_eq!(back, Comparator::Is);
    }

    #[test]
    fn test_patch_merge_leaves_unset_fields() {
        let mut rule = Rule::new();
        rule.measurement = "Reflux Time".to_string();
        let patch = RulePatch {
            finding_name: Some("GSV Reflux".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut rule);
        assert_eq!(rule.measurement, "Reflux Time");
        assert_eq!(rule.finding_name, "GSV Reflux");
        assert_eq!(rule.compared_value, NOT_PRESENT);
    }

    #[test]
    fn test_patch_into_rule_fills_defaults() {
        let rule = RulePatch {
            measurement: Some("Reflux Time".to_string()),
            ..Default::default()
        }
        .into_rule();
        assert_eq!(rule.comparator, Comparator::Is);
        assert_eq!(rule.compared_value, NOT_PRESENT);
        assert!(rule.action.is_none());
    }

    #[test]
    fn test_patch_into_rule_preserves_supplied_id() {
        let rule = RulePatch {
            id: Some(RuleId::from("r1")),
            ..Default::default()
        }
        .into_rule();
        assert_eq!(rule.id, RuleId::from("r1"));
    }

    #[test]
    fn test_condition_text() {
        let mut rule = Rule::new();
        rule.measurement = "Thrombus".to_string();
        assert_eq!(rule.condition_text(), "Thrombus is Not Present");

        rule.set_comparator(Comparator::Gte);
        rule.measurement = "Reflux Time".to_string();
        assert_eq!(rule.condition_text(), "Reflux Time >= 500 ms");
    }
}
