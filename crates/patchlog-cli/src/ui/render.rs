//! Text rendering for query results, summaries and listings.

use crossterm::style::Stylize;
use patchlog_core::summary::{HistoryItem, InstallationSummary};
use patchlog_schema::{ElementInfo, QueryResult};

use super::theme::Theme;

/// Row of `patchlog list`.
#[derive(Debug, Clone)]
pub struct IdentityRow {
    /// Identity name
    pub name: String,
    /// Installed version
    pub version: String,
    /// Current cumulative patch id
    pub cumulative_patch_id: String,
    /// Number of active one-off patches
    pub one_offs: usize,
}

/// Format a unix timestamp (seconds) in local time.
pub fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .unwrap_or_default()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Print a single projected patch.
pub fn print_patch(result: &QueryResult) {
    let theme = Theme::default();
    let lw = theme.layout.label_width;

    println!();
    println!(
        "  {} {}",
        result.patch_id.as_str().with(theme.colors.primary).bold(),
        result.patch_type.as_str().with(theme.colors.secondary)
    );
    if !result.description.is_empty() {
        println!("  {}", result.description);
    }
    println!();
    println!(
        "  {:<lw$}{} {}",
        "identity",
        result.identity_name,
        result.identity_version.as_str().with(theme.colors.version)
    );
    if let Some(link) = &result.link {
        println!("  {:<lw$}{link}", "link");
    }

    if let Some(elements) = &result.elements {
        println!();
        if elements.is_empty() {
            println!("  {}", "no elements".with(theme.colors.secondary));
        }
        for element in elements {
            print_element(&theme, element);
        }
    }
    println!();
}

fn print_element(theme: &Theme, element: &ElementInfo) {
    let color = if element.kind == "add-on" {
        theme.colors.add_on
    } else {
        theme.colors.secondary
    };
    let kind = format!("{:<width$}", element.kind, width = theme.layout.type_width);
    let name = format!("{:<width$}", element.name, width = theme.layout.id_width);
    println!(
        "  {} {} {}",
        kind.with(color),
        name.with(theme.colors.primary),
        element.id.as_str().with(theme.colors.secondary)
    );
    if !element.description.is_empty() {
        println!("    {}", element.description);
    }
}

/// Print the recoverable "not found" description.
pub fn print_failure(description: &str) {
    let theme = Theme::default();
    eprintln!();
    eprintln!("  {}", description.with(theme.colors.warning));
}

/// Print the full patching state of an identity.
pub fn print_summary(summary: &InstallationSummary) {
    let theme = Theme::default();
    let lw = theme.layout.label_width;

    println!();
    println!(
        "  {} {}",
        summary
            .identity_name
            .as_str()
            .with(theme.colors.primary)
            .bold(),
        summary.identity_version.as_str().with(theme.colors.version)
    );
    println!();
    println!("  {:<lw$}{}", "cumulative", summary.cumulative_patch_id);
    if summary.patches.is_empty() {
        println!("  {:<lw$}{}", "one-offs", "none".with(theme.colors.secondary));
    } else {
        println!("  {:<lw$}{}", "one-offs", summary.patches.join(", "));
    }

    if summary.history.is_empty() {
        println!();
    } else {
        print_history(&summary.identity_name, &summary.history);
    }
}

/// Print the history table, most recent first.
pub fn print_history(identity: &str, history: &[HistoryItem]) {
    let theme = Theme::default();
    let iw = theme.layout.id_width;
    let tw = theme.layout.type_width;

    println!();
    println!(
        "  {}",
        format!("History for '{identity}'").with(theme.colors.secondary)
    );
    let header = format!("  {:<iw$} {:<tw$} {}", "patch-id", "type", "applied");
    println!("{}", header.dark_grey());

    for item in history {
        let id = format!("{:<iw$}", item.patch_id);
        let ty = format!("{:<tw$}", item.patch_type);
        let ty = if item.patch_type == "cumulative" {
            ty.with(theme.colors.cumulative)
        } else {
            ty.with(theme.colors.version)
        };
        println!(
            "  {} {} {}",
            id.with(theme.colors.primary),
            ty,
            format_timestamp(item.applied_at).with(theme.colors.secondary)
        );
    }
    println!();
}

/// Print the installed identities.
pub fn print_identities(rows: &[IdentityRow]) {
    let theme = Theme::default();
    let iw = theme.layout.id_width;
    let tw = theme.layout.type_width;

    println!();
    let header = format!(
        "  {:<iw$} {:<tw$} {:<iw$} {}",
        "identity", "version", "cumulative", "one-offs"
    );
    println!("{}", header.dark_grey());

    for row in rows {
        let name = format!("{:<iw$}", row.name);
        let version = format!("{:<tw$}", row.version);
        let cumulative = format!("{:<iw$}", row.cumulative_patch_id);
        println!(
            "  {} {} {} {}",
            name.with(theme.colors.primary),
            version.with(theme.colors.version),
            cumulative.with(theme.colors.cumulative),
            row.one_offs
        );
    }
    println!();
}
