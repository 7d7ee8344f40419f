use weft_dom::ScrollMetrics;

/// Rounding slack when comparing against the maximum scroll distance.
const SCROLL_TOLERANCE: f32 = 1.0;

/// Whether edge shadows should be drawn around a horizontally scrolling table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollShadow {
    /// Scrolled away from the leading edge.
    pub is_scrolled: bool,
    /// More content exists past the trailing edge.
    pub has_right_scroll: bool,
}

impl ScrollShadow {
    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        let max_scroll = metrics.scroll_width - metrics.client_width;
        Self {
            is_scrolled: metrics.scroll_left > 0.0,
            has_right_scroll: metrics.scroll_left < max_scroll - SCROLL_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_leading_edge() {
        let shadow = ScrollShadow::from_metrics(&ScrollMetrics::new(0.0, 800.0, 300.0));
        assert!(!shadow.is_scrolled);
        assert!(shadow.has_right_scroll);
    }

    #[test]
    fn test_within_tolerance_of_trailing_edge() {
        let shadow = ScrollShadow::from_metrics(&ScrollMetrics::new(499.5, 800.0, 300.0));
        assert!(shadow.is_scrolled);
        assert!(!shadow.has_right_scroll);
    }

    #[test]
    fn test_no_overflow() {
        let shadow = ScrollShadow::from_metrics(&ScrollMetrics::new(0.0, 200.0, 300.0));
        assert_eq!(shadow, ScrollShadow::default());
    }
}
