//! Dropdown placement heuristic
//!
//! Decides whether the dropdown panel opens below the tag panel at its
//! natural position, flips above it, or gets a capped height so it scrolls
//! internally. Preference order: no scrolling, then upward if it fits, then a
//! constrained height.
//!
//! Offsets are relative to the panel's natural (downward) position, matching
//! how the host applies them as `top` / `max-height` overrides.

use crate::config::ComboboxMetrics;

/// Measurements taken when the dropdown is about to open
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlacementInput {
    /// Rows in the dropdown menu (search row, boundary marker and entries)
    pub rows: usize,
    /// Viewport height
    pub viewport_height: f32,
    /// Top of the mount point in viewport coordinates
    pub anchor_top: f32,
    /// Rendered height of the tag panel
    pub anchor_height: f32,
}

impl PlacementInput {
    /// Unconstrained panel height for this many rows
    pub fn candidate_height(&self, metrics: &ComboboxMetrics) -> f32 {
        self.rows as f32 * metrics.row_height - metrics.overlap_adjustment
    }

    /// Space between the bottom of the tag panel and the viewport bottom
    pub fn space_below(&self) -> f32 {
        self.viewport_height - self.anchor_top - self.anchor_height
    }

    /// Space between the viewport top and the anchor
    pub fn space_above(&self) -> f32 {
        self.anchor_top
    }
}

/// Where the dropdown panel renders
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Below the anchor with no overrides
    Natural,
    /// Flipped above the anchor at full height
    Upward { top: f32 },
    /// Flipped above the anchor, shrunk to the space available there
    UpwardCapped { top: f32, max_height: f32 },
    /// Below the anchor with a capped height (scrolls internally)
    DownwardCapped { max_height: f32 },
}

impl Placement {
    /// `top` override, `None` meaning the natural position
    pub fn top(&self) -> Option<f32> {
        match self {
            Placement::Upward { top } | Placement::UpwardCapped { top, .. } => Some(*top),
            Placement::Natural | Placement::DownwardCapped { .. } => None,
        }
    }

    /// `max-height` override, `None` meaning unconstrained
    pub fn max_height(&self) -> Option<f32> {
        match self {
            Placement::UpwardCapped { max_height, .. }
            | Placement::DownwardCapped { max_height } => Some(*max_height),
            Placement::Natural | Placement::Upward { .. } => None,
        }
    }

    pub fn opens_upward(&self) -> bool {
        matches!(
            self,
            Placement::Upward { .. } | Placement::UpwardCapped { .. }
        )
    }
}

/// Compute the dropdown placement for the given measurements
pub fn compute_placement(input: &PlacementInput, metrics: &ComboboxMetrics) -> Placement {
    let height = input.candidate_height(metrics);
    let below = input.space_below();
    let above = input.space_above();

    let placement = if height <= below {
        Placement::Natural
    } else if above >= height {
        Placement::Upward {
            top: -(height + input.anchor_height) - metrics.upward_gap,
        }
    } else if above > below && above > metrics.upward_threshold {
        let shrunk = above - input.anchor_height;
        Placement::UpwardCapped {
            top: -(shrunk + input.anchor_height) - metrics.upward_gap,
            max_height: shrunk,
        }
    } else {
        Placement::DownwardCapped {
            max_height: (below - metrics.downward_reserve).max(metrics.downward_floor),
        }
    };

    tracing::debug!(
        rows = input.rows,
        height,
        below,
        above,
        ?placement,
        "computed dropdown placement"
    );
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rows: usize, viewport_height: f32, anchor_top: f32) -> PlacementInput {
        PlacementInput {
            rows,
            viewport_height,
            anchor_top,
            anchor_height: 40.0,
        }
    }

    fn place(input: PlacementInput) -> Placement {
        compute_placement(&input, &ComboboxMetrics::default())
    }

    #[test]
    fn test_candidate_height() {
        let metrics = ComboboxMetrics::default();
        assert_eq!(input(5, 800.0, 0.0).candidate_height(&metrics), 156.0);
    }

    #[test]
    fn test_fits_below() {
        // 5 rows = 156px, 660px below
        assert_eq!(place(input(5, 800.0, 100.0)), Placement::Natural);
    }

    #[test]
    fn test_exact_fit_below_is_natural() {
        // 10 rows = 326px, below = 800 - 434 - 40 = 326
        assert_eq!(place(input(10, 800.0, 434.0)), Placement::Natural);
    }

    #[test]
    fn test_flips_up_when_above_fits() {
        // 10 rows = 326px, 160px below, 600px above
        let placement = place(input(10, 800.0, 600.0));
        assert_eq!(placement, Placement::Upward { top: -376.0 });
        assert!(placement.opens_upward());
        assert_eq!(placement.max_height(), None);
    }

    #[test]
    fn test_shrinks_upward_when_above_is_larger_and_roomy() {
        // 30 rows = 1006px, 260px below, 700px above
        let placement = place(input(30, 1000.0, 700.0));
        assert_eq!(
            placement,
            Placement::UpwardCapped {
                top: -710.0,
                max_height: 660.0
            }
        );
        assert_eq!(placement.top(), Some(-710.0));
    }

    #[test]
    fn test_caps_downward_when_above_is_small() {
        // 30 rows = 1006px, 510px below, 350px above (<= 400 threshold)
        let placement = place(input(30, 900.0, 350.0));
        assert_eq!(placement, Placement::DownwardCapped { max_height: 400.0 });
        assert_eq!(placement.top(), None);
    }

    #[test]
    fn test_downward_cap_uses_reserve_above_floor() {
        // 30 rows = 1006px, 660px below, 300px above
        let placement = place(input(30, 1000.0, 300.0));
        assert_eq!(placement, Placement::DownwardCapped { max_height: 460.0 });
    }

    #[test]
    fn test_roomy_above_but_smaller_than_below_stays_down() {
        // 60 rows = 2026px, 960px below, 500px above
        let placement = place(input(60, 1500.0, 500.0));
        assert_eq!(placement, Placement::DownwardCapped { max_height: 760.0 });
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // above == 400 exactly: not above the threshold
        let placement = place(input(40, 500.0, 400.0));
        assert_eq!(placement, Placement::DownwardCapped { max_height: 400.0 });
    }

    #[test]
    fn test_custom_metrics() {
        let metrics = ComboboxMetrics {
            row_height: 20.0,
            overlap_adjustment: 0.0,
            ..ComboboxMetrics::default()
        };
        // 10 rows = 200px, 100px below, 300px above
        let placement = compute_placement(&input(10, 440.0, 300.0), &metrics);
        assert_eq!(placement, Placement::Upward { top: -250.0 });
    }
}
