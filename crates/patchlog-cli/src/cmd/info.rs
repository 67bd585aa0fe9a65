//! Info command
//!
//! Dispatches between a single-patch query and a full read of the
//! installation, depending on whether a patch id was given.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use patchlog_core::{InstalledIdentity, Query, QueryOutcome, execute, read_installation};
use patchlog_schema::QueryResult;
use serde::Serialize;

use crate::EXIT_PATCH_NOT_FOUND;
use crate::ui::render;

/// Operation response printed in `--json` mode for single-patch queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Response<'a> {
    /// `success` or `failed`.
    pub outcome: &'static str,
    /// Projected patch, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a QueryResult>,
    /// Why there is no result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_description: Option<String>,
}

impl<'a> From<&'a QueryOutcome> for Response<'a> {
    fn from(outcome: &'a QueryOutcome) -> Self {
        Self {
            outcome: if outcome.is_found() { "success" } else { "failed" },
            result: outcome.result(),
            failure_description: outcome.failure_description(),
        }
    }
}

/// Show one patch, or the whole patching state when `patch_id` is `None`.
pub fn info(
    home: &Path,
    identity: Option<&str>,
    patch_id: Option<String>,
    verbose: bool,
    json: bool,
) -> Result<ExitCode> {
    let name = super::resolve_identity(home, identity)?;
    let provider = InstalledIdentity::in_home(name, home);

    let query = match Query::from_request(patch_id, verbose) {
        Query::FullRead => {
            let summary = read_installation(&provider)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                render::print_summary(&summary);
            }
            return Ok(ExitCode::SUCCESS);
        }
        query @ Query::ByPatchId { .. } => query,
    };

    let outcome = execute(&provider, &query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&Response::from(&outcome))?);
    } else {
        match &outcome {
            QueryOutcome::Found(result) => render::print_patch(result),
            QueryOutcome::NotFound { .. } => {
                if let Some(description) = outcome.failure_description() {
                    render::print_failure(&description);
                }
            }
        }
    }

    if outcome.is_found() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PATCH_NOT_FOUND))
    }
}
