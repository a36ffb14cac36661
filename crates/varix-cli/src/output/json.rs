use varix_core::error::VarixError;
use varix_core::model::Ruleset;

pub fn print(ruleset: &Ruleset) -> Result<(), VarixError> {
    let json = serde_json::to_string_pretty(ruleset)?;
    println!("{json}");
    Ok(())
}
