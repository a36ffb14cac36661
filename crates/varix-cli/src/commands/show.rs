use std::path::Path;
use varix_core::error::VarixError;

use crate::output;

pub fn run(seed: Option<&Path>, ruleset_name: &str, output_format: &str) -> Result<(), VarixError> {
    let store = super::load_store(seed)?;
    let ruleset = store
        .find_by_name(ruleset_name)
        .ok_or_else(|| VarixError::UnknownRuleset(ruleset_name.to_string()))?;

    match output_format {
        "json" => output::json::print(ruleset)?,
        _ => output::table::print_ruleset(ruleset),
    }

    Ok(())
}
