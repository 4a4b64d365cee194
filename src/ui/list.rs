//! Full-screen interactive entry list.
//!
//! `ListView` holds the navigation state and produces the lines to draw, the
//! terminal loop in `run_interactive` only feeds it keys.

use super::text::{render_entries, HEADER, TIME_FORMAT};
use crate::feed::Entry;
use console::{style, truncate_str, Key, Term};
use std::io::{self, Write};

/// Lines used by each list item: title, description, spacer.
const ITEM_HEIGHT: usize = 3;
/// Header, blank line, and footer.
const CHROME_HEIGHT: usize = 3;
const FOOTER: &str = "↑/k up • ↓/j down • enter details • q quit";
const DETAIL_FOOTER: &str = "enter/esc back • q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct ListView<'a> {
    entries: &'a [Entry],
    selected: usize,
    offset: usize,
    page: usize,
    detail: bool,
}

impl<'a> ListView<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self {
            entries,
            selected: 0,
            offset: 0,
            page: 1,
            detail: false,
        }
    }

    pub fn selected(&self) -> Option<&'a Entry> {
        self.entries.get(self.selected)
    }

    pub fn showing_detail(&self) -> bool {
        self.detail
    }

    pub fn handle_key(&mut self, key: &Key) -> ListAction {
        match key {
            Key::Char('q') => return ListAction::Quit,
            Key::Escape if !self.detail => return ListAction::Quit,
            Key::Enter | Key::Escape | Key::Backspace if self.detail => self.detail = false,
            Key::Enter if !self.entries.is_empty() => self.detail = true,
            _ if self.detail => {}
            Key::ArrowUp | Key::Char('k') => self.move_by(-1),
            Key::ArrowDown | Key::Char('j') => self.move_by(1),
            Key::PageUp => self.move_by(-(self.page as isize)),
            Key::PageDown => self.move_by(self.page as isize),
            Key::Home | Key::Char('g') => self.selected = 0,
            Key::End | Key::Char('G') => self.selected = self.entries.len().saturating_sub(1),
            _ => {}
        }
        ListAction::Continue
    }

    fn move_by(&mut self, delta: isize) {
        let last = self.entries.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Lines to draw for a terminal of `height` rows and `width` columns.
    pub fn lines(&mut self, height: usize, width: usize) -> Vec<String> {
        let mut lines = vec![
            style(format!(" {HEADER} ")).bold().reverse().to_string(),
            String::new(),
        ];

        if self.detail {
            if let Some(entry) = self.selected() {
                lines.extend(detail_lines(entry, width));
            }
            lines.push(String::new());
            lines.push(style(DETAIL_FOOTER).dim().to_string());
            return lines;
        }

        self.page = (height.saturating_sub(CHROME_HEIGHT) / ITEM_HEIGHT).max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.page {
            self.offset = self.selected + 1 - self.page;
        }

        if self.entries.is_empty() {
            lines.push(style("No entries to show.").dim().to_string());
        }

        let visible = self.entries.iter().enumerate().skip(self.offset).take(self.page);
        for (index, entry) in visible {
            let title = truncate_str(entry.display_title(), width.saturating_sub(2), "…");
            let url = truncate_str(&entry.url, width.saturating_sub(2), "…");
            if index == self.selected {
                let bar = style("│").magenta();
                lines.push(format!("{bar} {}", style(title).magenta().bold()));
                lines.push(format!("{bar} {}", style(url).magenta()));
            } else {
                lines.push(format!("  {title}"));
                lines.push(format!("  {}", style(url).dim()));
            }
            lines.push(String::new());
        }

        lines.push(style(FOOTER).dim().to_string());
        lines
    }
}

fn detail_lines(entry: &Entry, width: usize) -> Vec<String> {
    let mut lines = vec![
        style(entry.display_title()).bold().cyan().to_string(),
        format!("Author: {}", entry.author),
        format!("Published: {}", entry.published_at.format(TIME_FORMAT)),
        format!("URL: {}", entry.url),
        String::new(),
    ];
    lines.extend(wrap(entry.summary.trim(), width.max(20)));
    lines
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Browse `entries` until the user quits. Falls back to plain text output
/// when stdout is not a terminal.
pub fn run_interactive(entries: &[Entry]) -> io::Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        let mut out = io::stdout().lock();
        return render_entries(&mut out, entries);
    }

    let mut view = ListView::new(entries);
    term.hide_cursor()?;
    let result = event_loop(&term, &mut view);
    term.clear_screen()?;
    term.show_cursor()?;
    result
}

fn event_loop(term: &Term, view: &mut ListView<'_>) -> io::Result<()> {
    loop {
        let (rows, cols) = term.size();
        let lines = view.lines(rows as usize, cols as usize);
        term.clear_screen()?;
        let mut out = term.clone();
        write!(out, "{}", lines.join("\n"))?;
        out.flush()?;

        let key = match term.read_key() {
            Ok(key) => key,
            // Ctrl+C while the terminal is in raw mode.
            Err(err) if err.kind() == io::ErrorKind::Interrupted => return Ok(()),
            Err(err) => return Err(err),
        };
        if view.handle_key(&key) == ListAction::Quit {
            return Ok(());
        }
    }
}
