/// Horizontal scroll geometry of a scrollable element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the leading edge.
    pub scroll_left: f32,
    /// Total width of the scrollable content.
    pub scroll_width: f32,
    /// Visible width of the viewport.
    pub client_width: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_left: f32, scroll_width: f32, client_width: f32) -> Self {
        Self {
            scroll_left,
            scroll_width,
            client_width,
        }
    }

    /// Largest valid `scroll_left`.
    pub fn max_scroll_left(&self) -> f32 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Return a copy scrolled to `left`, clamped to the valid range.
    pub fn scrolled_to(self, left: f32) -> Self {
        Self {
            scroll_left: left.clamp(0.0, self.max_scroll_left()),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolled_to_clamps() {
        let m = ScrollMetrics::new(0.0, 500.0, 200.0);
        assert_eq!(m.scrolled_to(-10.0).scroll_left, 0.0);
        assert_eq!(m.scrolled_to(120.0).scroll_left, 120.0);
        assert_eq!(m.scrolled_to(900.0).scroll_left, 300.0);
    }

    #[test]
    fn test_no_overflow_means_no_scroll() {
        let m = ScrollMetrics::new(0.0, 100.0, 200.0);
        assert_eq!(m.max_scroll_left(), 0.0);
    }
}
