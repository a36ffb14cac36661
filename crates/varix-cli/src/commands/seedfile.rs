use std::path::Path;
use varix_core::error::VarixError;
use varix_core::validate::{is_duplicate_name, is_rule_complete};

pub fn validate(file: &Path) -> Result<(), VarixError> {
    let seed = varix_core::seed::load_seed_file(file)?;

    println!("Seed '{}' is valid.", file.display());
    println!("  Rulesets: {}", seed.rule_sets.len());
    let rule_count: usize = seed.rule_sets.iter().map(|rs| rs.rules.len()).sum();
    println!("  Rules: {rule_count}");

    // Check for potential issues (warnings, not errors)
    let store = varix_core::seed::into_store(seed);
    let mut warnings = Vec::new();
    for ruleset in store.rulesets() {
        if is_duplicate_name(&ruleset.name, store.rulesets(), Some(&ruleset.id)) {
            warnings.push(format!(
                "ruleset name '{}' collides with another ruleset (case-insensitive)",
                ruleset.name
            ));
        }
        for (idx, rule) in ruleset.rules.iter().enumerate() {
            if !is_rule_complete(rule) {
                warnings.push(format!(
                    "ruleset '{}' rule #{} is incomplete (missing measurement, finding, action or unit)",
                    ruleset.name,
                    idx + 1
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

pub fn schema() -> Result<(), VarixError> {
    print!(
        r#"JSON Seed Schema
================

A seed file supplies the rulesets the tool starts with. Each ruleset is a
named, ordered list of conditional rules; order is evaluation/display
priority.

Top-level fields:
  rule_sets     (array, required)   List of rulesets (see below)

Each ruleset in the "rule_sets" array:
  id            (string|number, required)  Opaque identifier
  name          (string, required)  Display name. Names must be unique
                                    (checked case-insensitively when editing).
  rules         (array, required)   List of rules (see below)

Each rule in the "rules" array:
  id            (string|number, required)  Opaque identifier
  measurement   (string, required)  Name of the measured quantity
  comparator    (string, required)  "is", "not present", ">=" or "<".
                                    "not present" is normalized to "is".
  comparedValue (string|number)     Threshold for ">="/"<" rules. Ignored
                                    for "is" rules, which always read
                                    "Not Present".
  unitName      (string)            Unit for ">="/"<" rules (e.g. "ms").
                                    Empty for "is" rules.
  findingName   (string, required)  Finding the rule maps to
  action        (string, optional)  "Normal" or "Reflux"

Example:
{{
  "rule_sets": [
    {{
      "id": 1,
      "name": "Default",
      "rules": [
        {{
          "id": 1,
          "measurement": "Reflux Time",
          "comparator": ">=",
          "comparedValue": 500,
          "unitName": "ms",
          "findingName": "GSV Reflux",
          "action": "Reflux"
        }},
        {{
          "id": 2,
          "measurement": "Thrombus",
          "comparator": "not present",
          "findingName": "No DVT",
          "action": "Normal"
        }}
      ]
    }}
  ]
}}

Run `varix validate <file>` to check a seed file; incomplete rules are
reported as warnings and can be finished later in the editor.
"#
    );
    Ok(())
}
