use std::path::Path;
use varix_core::error::VarixError;

pub fn run(seed: Option<&Path>) -> Result<(), VarixError> {
    let store = super::load_store(seed)?;

    if store.is_empty() {
        println!("No rulesets available.");
        return Ok(());
    }

    println!("Rulesets:\n");
    for ruleset in store.rulesets() {
        let active_marker = if store.active_id() == Some(&ruleset.id) {
            " (active)"
        } else {
            ""
        };
        let count = ruleset.rules.len();
        let noun = if count == 1 { "rule" } else { "rules" };
        println!("  {:<24} {} {}{}", ruleset.name, count, noun, active_marker);
    }
    println!();

    Ok(())
}
