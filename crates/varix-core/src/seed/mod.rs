pub mod builtin;
pub mod schema;

use crate::error::VarixError;
use crate::model::{Comparator, Rule, RuleAction, RuleId, Ruleset, RulesetId, NOT_PRESENT};
use crate::store::RulesetStore;
use schema::{SeedFile, SeedRule};
use std::path::Path;

/// Load a seed from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<SeedFile, VarixError> {
    let content = std::fs::read_to_string(path).map_err(|e| VarixError::SeedLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let seed: SeedFile = serde_json::from_str(&content).map_err(|e| VarixError::SeedLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_seed(&seed)?;
    Ok(seed)
}

/// Parse a seed from a JSON string (no file path context).
pub fn parse_seed_str(json: &str) -> Result<SeedFile, VarixError> {
    let seed: SeedFile = serde_json::from_str(json).map_err(VarixError::Json)?;
    validate_seed(&seed)?;
    Ok(seed)
}

/// Validate that a seed is well-formed: non-empty ruleset names, known
/// comparator spellings, known action labels.
pub fn validate_seed(seed: &SeedFile) -> Result<(), VarixError> {
    for ruleset in &seed.rule_sets {
        if ruleset.name.trim().is_empty() {
            return Err(VarixError::SeedInvalid(
                "ruleset name must not be empty".into(),
            ));
        }

        for rule in &ruleset.rules {
            if Comparator::from_str_loose(&rule.comparator).is_none() {
                return Err(VarixError::SeedInvalid(format!(
                    "ruleset '{}' has unknown comparator '{}' (expected 'is', 'not present', '>=' or '<')",
                    ruleset.name, rule.comparator
                )));
            }

            if let Some(ref action) = rule.action {
                if RuleAction::from_str_loose(action).is_none() {
                    return Err(VarixError::SeedInvalid(format!(
                        "ruleset '{}' has unknown action '{}' (expected 'Normal' or 'Reflux')",
                        ruleset.name, action
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Import a validated seed into a store. Comparator spellings and compared
/// values are normalized on the way in; the first ruleset becomes active.
pub fn into_store(seed: SeedFile) -> RulesetStore {
    let rulesets = seed
        .rule_sets
        .iter()
        .map(|rs| Ruleset {
            id: RulesetId::from(rs.id.as_text()),
            name: rs.name.clone(),
            rules: rs.rules.iter().map(import_rule).collect(),
        })
        .collect();
    RulesetStore::from_rulesets(rulesets)
}

fn import_rule(rule: &SeedRule) -> Rule {
    let comparator = Comparator::from_str_loose(&rule.comparator).unwrap_or_default();
    let compared_value = match comparator {
        // The external "not present" spelling carries no usable value.
        Comparator::Is => NOT_PRESENT.to_string(),
        Comparator::Gte | Comparator::Lt => rule
            .compared_value
            .as_ref()
            .map(|v| v.as_text())
            .unwrap_or_default(),
    };
    Rule {
        id: RuleId::from(rule.id.as_text()),
        measurement: rule.measurement.clone(),
        comparator,
        compared_value,
        unit_name: rule.unit_name.clone(),
        finding_name: rule.finding_name.clone(),
        action: rule.action.as_deref().and_then(RuleAction::from_str_loose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "rule_sets": [
            {
                "id": 1,
                "name": "Default",
                "rules": [
                    {
                        "id": 1,
                        "measurement": "Reflux Time",
                        "comparator": ">=",
                        "comparedValue": 500,
                        "unitName": "ms",
                        "findingName": "GSV Reflux",
                        "action": "Reflux"
                    },
                    {
                        "id": 2,
                        "measurement": "Thrombus",
                        "comparator": "not present",
                        "comparedValue": "",
                        "findingName": "No DVT",
                        "action": "Normal"
                    }
                ]
            },
            { "id": 2, "name": "Screening", "rules": [] }
        ]
    }"#;

    #[test]
    fn test_parse_valid_seed() {
        let seed = parse_seed_str(SAMPLE).unwrap();
        assert_eq!(seed.rule_sets.len(), 2);
        assert_eq!(seed.rule_sets[0].name, "Default");
        assert_eq!(seed.rule_sets[0].rules.len(), 2);
    }

    #[test]
    fn test_import_normalizes_not_present() {
        let store = into_store(parse_seed_str(SAMPLE).unwrap());
        let rules = &store.rulesets()[0].rules;
        assert_eq!(rules[1].comparator, Comparator::Is);
        assert_eq!(rules[1].compared_value, NOT_PRESENT);
        assert_eq!(rules[1].unit_name, "");
    }

    #[test]
    fn test_import_coerces_numeric_values_to_text() {
        let store = into_store(parse_seed_str(SAMPLE).unwrap());
        let rules = &store.rulesets()[0].rules;
        assert_eq!(rules[0].compared_value, "500");
        assert_eq!(rules[0].id, RuleId::from("1"));
    }

    #[test]
    fn test_import_first_ruleset_is_active() {
        let store = into_store(parse_seed_str(SAMPLE).unwrap());
        assert_eq!(store.active_ruleset().unwrap().name, "Default");
    }

    #[test]
    fn test_unknown_comparator_rejected() {
        let json = r#"{
            "rule_sets": [
                {
                    "id": 1,
                    "name": "Bad",
                    "rules": [
                        { "id": 1, "measurement": "X", "comparator": "==", "findingName": "F" }
                    ]
                }
            ]
        }"#;
        assert!(parse_seed_str(json).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{
            "rule_sets": [
                {
                    "id": 1,
                    "name": "Bad",
                    "rules": [
                        { "id": 1, "measurement": "X", "comparator": "is", "findingName": "F", "action": "Escalate" }
                    ]
                }
            ]
        }"#;
        assert!(parse_seed_str(json).is_err());
    }

    #[test]
    fn test_empty_ruleset_name_rejected() {
        let json = r#"{ "rule_sets": [ { "id": 1, "name": "  ", "rules": [] } ] }"#;
        assert!(parse_seed_str(json).is_err());
    }

    #[test]
    fn test_load_seed_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let seed = load_seed_file(file.path()).unwrap();
        assert_eq!(seed.rule_sets.len(), 2);
    }

    #[test]
    fn test_load_seed_file_missing_path() {
        let err = load_seed_file(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, VarixError::SeedLoad { .. }));
    }
}
