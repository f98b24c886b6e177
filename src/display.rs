//! Display rendering
//!
//! Screen layout, top to bottom: the text area (gutter plus content), one
//! status line, and one line for messages and prompts.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::buffer::{Mark, TextBuffer};
use crate::editor::Session;
use crate::error::Result;
use crate::line::{cell_width, Line};
use crate::syntax::Style;
use crate::terminal::Terminal;

/// Rows left for text once the status and message lines are drawn
pub fn text_rows(rows: u16) -> usize {
    (rows as usize).saturating_sub(2).max(1)
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
}

impl Display {
    pub fn new() -> Self {
        Self { needs_redraw: true }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, session: &Session) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        let height = text_rows(rows);

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        self.render_text(terminal, session, height, cols)?;
        self.render_status_line(terminal, session, height as u16, cols)?;
        self.render_minibuffer(terminal, session, rows.saturating_sub(1), cols)?;

        if self.position_cursor(terminal, session, height, cols)? {
            terminal.set_cursor_visible(true)?;
        }
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Render the gutter and content rows
    fn render_text(
        &self,
        terminal: &mut Terminal,
        session: &Session,
        height: usize,
        cols: usize,
    ) -> Result<()> {
        let base = session.config.base_style();
        let gutter_top = session.scroll.gutter().top_line();
        let content_top = session.scroll.content().top_line();
        let gutter_width = session.mirror.width().min(cols);
        let text_cols = cols.saturating_sub(gutter_width);

        let mut labels = session.mirror.labels(gutter_top);

        for row in 0..height {
            terminal.move_cursor(row as u16, 0)?;

            if session.mirror.visible {
                let label = labels.next().unwrap_or_else(|| " ".repeat(gutter_width));
                terminal.apply_style(&base)?;
                terminal.set_dim(true)?;
                terminal.write_str(&truncate_to_width(&label, gutter_width))?;
                terminal.set_dim(false)?;
            }

            let line_no = content_top + row + 1;
            match session.buffer.line(line_no) {
                Some(line) => {
                    let styles = line_styles(session, line_no, line.char_len());
                    self.render_line(terminal, line, &styles, text_cols, session.config.tab_width)?;
                }
                None => {
                    // Empty line indicator (like vim's ~)
                    terminal.apply_style(&base)?;
                    terminal.set_dim(true)?;
                    terminal.write_str("~")?;
                    terminal.set_dim(false)?;
                }
            }

            // paint the rest of the row in the theme background
            terminal.apply_style(&base)?;
            terminal.clear_to_eol()?;
        }

        terminal.reset_attributes()?;
        Ok(())
    }

    /// Render one line, one terminal write per run of equal style
    fn render_line(
        &self,
        terminal: &mut Terminal,
        line: &Line,
        styles: &[Style],
        max_cols: usize,
        tab_width: usize,
    ) -> Result<()> {
        let mut at = 0;
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for (ch, &style) in line.text().chars().zip(styles) {
            let width = cell_width(ch, at, tab_width);
            if at + width > max_cols {
                break;
            }
            if run_style != Some(style) {
                if let Some(prev) = run_style {
                    terminal.apply_style(&prev)?;
                    terminal.write_str(&run)?;
                    run.clear();
                }
                run_style = Some(style);
            }
            match ch {
                '\t' => run.push_str(&" ".repeat(width)),
                ch if ch.is_control() => run.push('?'),
                ch => run.push(ch),
            }
            at += width;
        }

        if let Some(style) = run_style {
            terminal.apply_style(&style)?;
            terminal.write_str(&run)?;
        }
        Ok(())
    }

    /// Render the status line: file name, modified flag, cursor location
    fn render_status_line(
        &self,
        terminal: &mut Terminal,
        session: &Session,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;
        terminal.write_str(&status_text(session, cols))?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Render the minibuffer (prompt or message)
    fn render_minibuffer(
        &self,
        terminal: &mut Terminal,
        session: &Session,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;

        let text = session.prompt_line().or_else(|| session.message.clone());
        if let Some(text) = text {
            terminal.write_str(&truncate_to_width(&text, cols))?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Place the hardware cursor. Returns false when it is off screen.
    fn position_cursor(
        &self,
        terminal: &mut Terminal,
        session: &Session,
        height: usize,
        cols: usize,
    ) -> Result<bool> {
        let last_col = cols.saturating_sub(1);

        if let Some(prompt) = session.prompt_line() {
            let col = prompt.width().min(last_col);
            terminal.move_cursor(height as u16 + 1, col as u16)?;
            return Ok(true);
        }

        let pos = session.buffer.index_of(Mark::Insert);
        let Some(row) = session.scroll.content().line_to_row(pos.line - 1) else {
            return Ok(false);
        };
        let display_col = session
            .buffer
            .line(pos.line)
            .map(|line| line.col_to_display(pos.column, session.config.tab_width))
            .unwrap_or(0);
        let col = (session.mirror.width() + display_col).min(last_col);

        terminal.move_cursor(row as u16, col as u16)?;
        Ok(true)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Style of every character on a line: the theme base with each tag's
/// style layered on in priority order, so matches end up on top
fn line_styles(session: &Session, line: usize, len: usize) -> Vec<Style> {
    let mut styles = vec![session.config.base_style(); len];
    let mut tags = session.buffer.tags_on_line(line);
    tags.sort_by_key(|(_, tag)| tag.priority());

    for (span, tag) in tags {
        let top = session.config.style_for(tag);
        let end = span.end.min(len);
        for style in styles.iter_mut().take(end).skip(span.start) {
            *style = style.layer(top);
        }
    }
    styles
}

/// Status line text, padded to the screen width
fn status_text(session: &Session, cols: usize) -> String {
    let modified = if session.buffer.is_modified() { " [+]" } else { "" };
    let left = format!(" {}{}", session.buffer.name(), modified);
    let right = session
        .cursor_info()
        .map(|info| format!("{} ", info.status()))
        .unwrap_or_default();

    let used = left.width() + right.width();
    if used >= cols {
        return truncate_to_width(&format!("{} {}", left, right), cols);
    }
    format!("{}{}{}", left, " ".repeat(cols - used), right)
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}
