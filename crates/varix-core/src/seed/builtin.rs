use crate::error::VarixError;
use crate::seed::schema::SeedFile;

const DEFAULT_SEED_JSON: &str = include_str!("../../../../seed/default.json");

/// The seed the tool ships with when no seed file is given.
pub fn load_default() -> Result<SeedFile, VarixError> {
    let seed: SeedFile = serde_json::from_str(DEFAULT_SEED_JSON)?;
    Ok(seed)
}
