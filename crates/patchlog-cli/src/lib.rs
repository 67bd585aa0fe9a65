//! patchlog - inspect the patch history of an installation
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! The CLI is the request dispatcher in front of `patchlog-core`: `info`
//! with a patch id runs a single-patch query, `info` without one (and
//! `history`) performs a full read of the installation.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.patchlog/        # or $PATCHLOG_HOME, or --home
//! └── state.db        # SQLite database
//! ```

pub mod cmd;
pub mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use patchlog_core::paths::{HOME_ENV, try_patchlog_home};

/// Exit status when the requested patch is not in the history.
pub const EXIT_PATCH_NOT_FOUND: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "patchlog")]
#[command(author, version, about = "patchlog - inspect the patch history of an installation")]
pub struct Cli {
    /// Installation state directory
    #[arg(long, global = true, env = HOME_ENV)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve the state directory: `--home`, then `PATCHLOG_HOME`, then `~/.patchlog`.
    pub fn home(&self) -> Result<PathBuf> {
        self.home
            .clone()
            .or_else(try_patchlog_home)
            .context("Could not determine home directory. Set PATCHLOG_HOME to override.")
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one patch, or the whole patching state when no patch id is given
    Info {
        /// Patch id to look up
        patch_id: Option<String>,
        /// Installed identity (defaults to the only registered one)
        #[arg(long, short = 'i')]
        identity: Option<String>,
        /// Include per-element details
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List applied patches, most recent first
    History {
        /// Installed identity (defaults to the only registered one)
        #[arg(long, short = 'i')]
        identity: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List installed identities
    List,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
