//! List command

use std::path::Path;

use anyhow::{Context, Result};
use patchlog_core::StateDb;
use patchlog_core::paths::db_path_in;

use crate::ui::render::{self, IdentityRow};

/// List installed identities with their current cumulative patch.
pub fn list(home: &Path) -> Result<()> {
    let path = db_path_in(home);
    if !path.exists() {
        println!();
        println!("  No installation state at {}.", path.display());
        return Ok(());
    }

    let db = StateDb::open_read_only(&path).context("Failed to open state database")?;
    let identities = db.list_identities()?;
    if identities.is_empty() {
        println!();
        println!("  No identities installed.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(identities.len());
    for identity in identities {
        let info = db
            .load_target_info(&identity.name)
            .with_context(|| format!("Failed to load patch info for '{}'", identity.name))?;
        rows.push(IdentityRow {
            name: identity.name,
            version: identity.version,
            cumulative_patch_id: info.cumulative_patch_id,
            one_offs: info.patch_ids.len(),
        });
    }

    render::print_identities(&rows);
    Ok(())
}
