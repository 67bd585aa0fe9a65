//! Command implementations.

pub mod completions;
pub mod history;
pub mod info;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result, bail};
use patchlog_core::StateDb;
use patchlog_core::paths::db_path_in;

/// Pick the identity to query.
///
/// An explicit name is used as-is. Otherwise the installation must have
/// exactly one registered identity.
pub fn resolve_identity(home: &Path, requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        return Ok(name.to_string());
    }

    let path = db_path_in(home);
    if !path.exists() {
        bail!("No installation state found at {}", path.display());
    }
    let db = StateDb::open_read_only(&path).context("Failed to open state database")?;
    let identities = db.list_identities()?;

    match identities.as_slice() {
        [] => bail!("No identities are installed under {}", home.display()),
        [only] => {
            tracing::debug!("Defaulting to identity '{}'", only.name);
            Ok(only.name.clone())
        }
        many => {
            let names: Vec<_> = many.iter().map(|i| i.name.as_str()).collect();
            bail!(
                "Several identities are installed ({}); pass --identity",
                names.join(", ")
            )
        }
    }
}
