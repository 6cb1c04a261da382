// Text rendering of the visible problem list

use crate::config::Config;
use crate::store::ListStore;
use colored::Colorize;
use eyre::Result;
use std::io::Write;

const DELETE_MARKER: &str = "[x]";

/// Draw the title, the visible rows and, while filtering, a search summary
///
/// Rows are numbered from 1; the number is what `:del` takes.
pub fn render_list<W: Write>(store: &ListStore, config: &Config, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", paint(&config.title, config.color, |s| s.blue().bold()))?;

    if store.is_filtering() {
        writeln!(
            out,
            "Search: {:?} (showing {} of {})",
            store.query(),
            store.visible_len(),
            store.len()
        )?;
    }

    let visible = store.visible();
    if visible.is_empty() {
        writeln!(out, "  {}", paint(&config.placeholder, config.color, |s| s.dimmed()))?;
        return Ok(());
    }

    let width = visible.len().to_string().len();
    for (i, entry) in visible.iter().enumerate() {
        writeln!(
            out,
            "  {:>width$}. {}  {}",
            i + 1,
            entry,
            paint(DELETE_MARKER, config.color, |s| s.red()),
            width = width
        )?;
    }

    Ok(())
}

/// Apply `style` only when color output is enabled
fn paint<F>(text: &str, color: bool, style: F) -> String
where
    F: Fn(&str) -> colored::ColoredString,
{
    if color { style(text).to_string() } else { text.to_string() }
}
