//! Line-number gutter and scroll synchronisation
//!
//! The gutter holds one number per document line and scrolls with the
//! content. Every scroll goes through `ScrollSync`, which moves both views
//! in the same call so they are never out of step.

use tracing::trace;

use crate::window::Viewport;

/// Line-number text kept in step with the document
#[derive(Debug, Clone)]
pub struct LineNumberMirror {
    text: String,
    line_count: usize,
    /// Whether the gutter is drawn
    pub visible: bool,
}

impl LineNumberMirror {
    pub fn new(visible: bool) -> Self {
        let mut mirror = Self {
            text: String::new(),
            line_count: 0,
            visible,
        };
        mirror.regenerate(1);
        mirror
    }

    /// Rebuild the numbers for a document of `line_count` lines
    pub fn regenerate(&mut self, line_count: usize) {
        let mut text = String::with_capacity(line_count * 4);
        for n in 1..=line_count {
            text.push_str(&n.to_string());
            text.push('\n');
        }
        self.text = text;
        self.line_count = line_count;
    }

    /// The full gutter text, one number per line
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Gutter width including the separator space (0 when hidden)
    pub fn width(&self) -> usize {
        if !self.visible {
            return 0;
        }
        let digits = self.line_count.max(1).to_string().len();
        digits.max(3) + 1
    }

    /// Right-aligned gutter labels, starting at a 0-indexed line
    pub fn labels(&self, top: usize) -> impl Iterator<Item = String> + '_ {
        let width = self.width().saturating_sub(1);
        self.text
            .lines()
            .skip(top)
            .map(move |number| format!("{:>width$} ", number))
    }

    /// Toggle visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// A scroll request from the scrollbar, the wheel or the keyboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Absolute position from a scrollbar drag, in `[0, 1]`
    Scrollbar(f64),
    /// Wheel delta in platform units (120 per notch, positive = up)
    Wheel { delta: i32 },
    /// X11 wheel up
    Button4,
    /// X11 wheel down
    Button5,
    /// Relative move in lines (positive = down)
    Units(isize),
}

impl ScrollEvent {
    /// Line delta for relative events. A wheel moves `-delta / 120` units,
    /// except that a non-zero delta under one notch still moves one unit
    /// instead of truncating to zero.
    pub fn units(&self) -> Option<isize> {
        match *self {
            ScrollEvent::Scrollbar(_) => None,
            ScrollEvent::Wheel { delta } => {
                let notches = -(delta / 120) as isize;
                if notches == 0 && delta != 0 {
                    Some(-(delta.signum() as isize))
                } else {
                    Some(notches)
                }
            }
            ScrollEvent::Button4 => Some(-1),
            ScrollEvent::Button5 => Some(1),
            ScrollEvent::Units(n) => Some(n),
        }
    }
}

/// Content view and gutter view, scrolled together
#[derive(Debug, Clone)]
pub struct ScrollSync {
    content: Viewport,
    gutter: Viewport,
}

impl ScrollSync {
    pub fn new(height: usize, total: usize) -> Self {
        Self {
            content: Viewport::new(height, total),
            gutter: Viewport::new(height, total),
        }
    }

    pub fn content(&self) -> &Viewport {
        &self.content
    }

    pub fn gutter(&self) -> &Viewport {
        &self.gutter
    }

    /// Apply a scroll to both views, returning the shared fraction
    pub fn apply(&mut self, event: ScrollEvent) -> f64 {
        match event.units() {
            None => {
                if let ScrollEvent::Scrollbar(fraction) = event {
                    self.content.move_to(fraction);
                }
            }
            Some(lines) => self.content.scroll_by(lines),
        }
        self.align();
        debug_assert!(self.is_aligned());
        trace!(?event, top = self.content.top_line(), "scrolled");
        self.content.fraction()
    }

    /// Keep a 0-indexed line on screen
    pub fn follow_cursor(&mut self, line: usize) {
        self.content.ensure_visible(line);
        self.align();
    }

    /// Update the document length
    pub fn set_total(&mut self, total: usize) {
        self.content.set_total(total);
        self.align();
    }

    /// Update the view height
    pub fn resize(&mut self, height: usize) {
        self.content.set_height(height);
        self.align();
    }

    /// Whether both views show the same offset
    pub fn is_aligned(&self) -> bool {
        self.content == self.gutter
    }

    fn align(&mut self) {
        self.gutter = self.content.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regenerate() {
        let mut mirror = LineNumberMirror::new(true);
        assert_eq!(mirror.text(), "1\n");
        mirror.regenerate(3);
        assert_eq!(mirror.text(), "1\n2\n3\n");
    }

    #[test]
    fn test_width_and_labels() {
        let mut mirror = LineNumberMirror::new(true);
        mirror.regenerate(12);
        assert_eq!(mirror.width(), 4);
        let labels: Vec<String> = mirror.labels(10).collect();
        assert_eq!(labels, vec![" 11 ", " 12 "]);
        assert_eq!(mirror.labels(0).next().as_deref(), Some("  1 "));
        assert_eq!(mirror.labels(12).next(), None);

        mirror.regenerate(12345);
        assert_eq!(mirror.width(), 6);

        mirror.toggle();
        assert_eq!(mirror.width(), 0);
        // still regenerated while hidden
        mirror.regenerate(2);
        assert_eq!(mirror.text(), "1\n2\n");
    }

    #[test]
    fn test_wheel_units() {
        assert_eq!(ScrollEvent::Wheel { delta: 360 }.units(), Some(-3));
        assert_eq!(ScrollEvent::Wheel { delta: -360 }.units(), Some(3));
        assert_eq!(ScrollEvent::Wheel { delta: 30 }.units(), Some(-1));
        assert_eq!(ScrollEvent::Wheel { delta: 0 }.units(), Some(0));
        assert_eq!(ScrollEvent::Button4.units(), Some(-1));
        assert_eq!(ScrollEvent::Button5.units(), Some(1));
        assert_eq!(ScrollEvent::Scrollbar(0.2).units(), None);
    }

    #[test]
    fn test_scrollbar_keeps_views_aligned() {
        let mut sync = ScrollSync::new(10, 200);
        let fraction = sync.apply(ScrollEvent::Scrollbar(0.5));
        assert_eq!(fraction, 0.5);
        assert!(sync.is_aligned());
        assert_eq!(sync.gutter().fraction(), sync.content().fraction());
    }

    #[test]
    fn test_wheel_keeps_views_aligned() {
        let mut sync = ScrollSync::new(10, 200);
        sync.apply(ScrollEvent::Units(3));
        assert_eq!(sync.content().top_line(), 3);
        assert_eq!(sync.gutter().top_line(), 3);

        sync.apply(ScrollEvent::Units(-3));
        assert_eq!(sync.gutter().top_line(), 0);

        sync.apply(ScrollEvent::Wheel { delta: -360 });
        assert_eq!(sync.gutter().top_line(), 3);
        assert!(sync.is_aligned());
    }

    #[test]
    fn test_resize_and_follow_stay_aligned() {
        let mut sync = ScrollSync::new(10, 200);
        sync.follow_cursor(50);
        assert_eq!(sync.content().top_line(), 41);
        sync.resize(20);
        sync.set_total(30);
        assert_eq!(sync.content().top_line(), 10);
        assert!(sync.is_aligned());
    }
}
