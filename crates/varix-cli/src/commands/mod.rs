pub mod list;
pub mod seedfile;
pub mod show;

use std::path::Path;
use varix_core::error::VarixError;
use varix_core::store::RulesetStore;

/// Build the store from the given seed file, or the built-in seed.
pub fn load_store(seed: Option<&Path>) -> Result<RulesetStore, VarixError> {
    match seed {
        Some(path) => varix_core::load_store_from(path),
        None => varix_core::load_default_store(),
    }
}
