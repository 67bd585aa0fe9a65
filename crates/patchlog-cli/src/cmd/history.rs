//! History command

use std::path::Path;

use anyhow::Result;
use patchlog_core::{InstalledIdentity, read_installation};

use crate::ui::render;

/// List every patch applied to an identity, most recent first.
pub fn history(home: &Path, identity: Option<&str>, json: bool) -> Result<()> {
    let name = super::resolve_identity(home, identity)?;
    let summary = read_installation(&InstalledIdentity::in_home(name, home))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.history)?);
        return Ok(());
    }

    if summary.history.is_empty() {
        println!();
        println!("  No patches applied to '{}'.", summary.identity_name);
        return Ok(());
    }

    render::print_history(&summary.identity_name, &summary.history);
    Ok(())
}
