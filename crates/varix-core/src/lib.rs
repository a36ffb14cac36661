pub mod drag;
pub mod error;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;
pub mod validate;

use error::VarixError;
use std::path::Path;
use store::RulesetStore;

/// Main API entry point: build a ready-to-use store from the built-in seed.
pub fn load_default_store() -> Result<RulesetStore, VarixError> {
    let seed = seed::builtin::load_default()?;
    Ok(seed::into_store(seed))
}

/// Build a store from a seed file on disk.
pub fn load_store_from(path: &Path) -> Result<RulesetStore, VarixError> {
    let seed = seed::load_seed_file(path)?;
    Ok(seed::into_store(seed))
}
