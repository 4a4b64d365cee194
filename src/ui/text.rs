//! Plain text rendering of entries for non-interactive output.

use crate::feed::Entry;
use console::style;
use std::io::{self, Write};

pub const HEADER: &str = "Feedbin Latest Entries";
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_entries<W: Write>(out: &mut W, entries: &[Entry]) -> io::Result<()> {
    writeln!(out, "{}", style(format!(" {HEADER} ")).bold().reverse())?;
    writeln!(out)?;

    if entries.is_empty() {
        writeln!(out, "{}", style("No entries to show.").dim())?;
        return Ok(());
    }

    for entry in entries {
        writeln!(out, "{}", style(entry.display_title()).bold().cyan())?;
        writeln!(out, "{} Author: {}", style("INFO").blue(), entry.author)?;
        writeln!(
            out,
            "{} Published: {}",
            style("INFO").blue(),
            entry.published_at.format(TIME_FORMAT)
        )?;
        writeln!(out, "{} URL: {}", style("INFO").blue(), entry.url)?;
        if !entry.summary.trim().is_empty() {
            writeln!(out, "{}", entry.summary.trim())?;
        }
        writeln!(out)?;
    }

    out.flush()
}
