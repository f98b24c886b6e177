//! Viewport - a vertically scrollable view onto a run of lines
//!
//! Both the content area and the line-number gutter are viewports. The
//! scroll position is the first visible line; its fractional form
//! (`top / total`) is what gets shared between the two.

/// A scrollable view
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    top_line: usize,
    /// Number of visible rows
    height: usize,
    /// Number of lines being viewed
    total: usize,
}

impl Viewport {
    /// Create a viewport of the given height over `total` lines
    pub fn new(height: usize, total: usize) -> Self {
        Self {
            top_line: 0,
            height,
            total,
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Get viewport height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Largest top line that still fills the view
    fn max_top(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    /// Set the top line, clamped
    pub fn set_top_line(&mut self, line: usize) {
        self.top_line = line.min(self.max_top());
    }

    /// Resize the view
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.set_top_line(self.top_line);
    }

    /// Update the number of lines viewed
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.set_top_line(self.top_line);
    }

    /// Scroll offset as a fraction of the document in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.top_line as f64 / self.total as f64
        }
    }

    /// Scroll so the given fraction of the document is at the top
    pub fn move_to(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.set_top_line((fraction * self.total as f64).floor() as usize);
    }

    /// Scroll by a number of lines (negative = up)
    pub fn scroll_by(&mut self, lines: isize) {
        let top = self.top_line.saturating_add_signed(lines);
        self.set_top_line(top);
    }

    /// Check if a line is visible
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.top_line + self.height
    }

    /// Scroll the minimum amount needed to show a line
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.top_line {
            self.top_line = line;
        } else if self.height > 0 && line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
    }

    /// Get the view row for a line (None if not visible)
    pub fn line_to_row(&self, line: usize) -> Option<usize> {
        self.is_line_visible(line).then(|| line - self.top_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_fraction() {
        let mut view = Viewport::new(10, 100);
        view.move_to(0.5);
        assert_eq!(view.top_line(), 50);
        assert_eq!(view.fraction(), 0.5);

        view.move_to(1.0);
        assert_eq!(view.top_line(), 90);
        view.move_to(-3.0);
        assert_eq!(view.top_line(), 0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut view = Viewport::new(10, 25);
        view.scroll_by(-3);
        assert_eq!(view.top_line(), 0);
        view.scroll_by(100);
        assert_eq!(view.top_line(), 15);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut view = Viewport::new(10, 4);
        view.scroll_by(3);
        view.move_to(0.9);
        assert_eq!(view.top_line(), 0);
        assert_eq!(Viewport::new(5, 0).fraction(), 0.0);
    }

    #[test]
    fn test_ensure_visible() {
        let mut view = Viewport::new(5, 50);
        view.ensure_visible(12);
        assert_eq!(view.top_line(), 8);
        assert_eq!(view.line_to_row(12), Some(4));
        view.ensure_visible(3);
        assert_eq!(view.top_line(), 3);
        assert_eq!(view.line_to_row(2), None);
    }

    #[test]
    fn test_shrinking_total_pulls_top_back() {
        let mut view = Viewport::new(10, 100);
        view.set_top_line(80);
        view.set_total(20);
        assert_eq!(view.top_line(), 10);
    }
}
