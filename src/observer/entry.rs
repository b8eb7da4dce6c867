use ratatui::layout::Rect;

use crate::constants::DEFAULT_THRESHOLD;
use crate::error::{ScrollError, ScrollResult};

/// One observation record for a single target.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
    /// Visible fraction of the target, 0.0..=1.0
    pub intersection_ratio: f32,
    /// Target bounds, `None` once the target has left the page
    pub bounding_rect: Option<Rect>,
    pub intersection_rect: Rect,
    pub root_bounds: Rect,
    /// Frame on which the record was produced
    pub frame: u64,
}

impl<T> IntersectionEntry<T> {
    pub fn new(target: T, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
            bounding_rect: None,
            intersection_rect: Rect::default(),
            root_bounds: Rect::default(),
            frame: 0,
        }
    }
}

/// Grow the root on each side before testing intersection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootMargin {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl RootMargin {
    pub fn uniform(value: u16) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn expand(&self, root: Rect) -> Rect {
        let x = root.x.saturating_sub(self.left);
        let y = root.y.saturating_sub(self.top);
        let right = root.right().saturating_add(self.right);
        let bottom = root.bottom().saturating_add(self.bottom);
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// Observer configuration. The root is always the page viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    thresholds: Vec<f32>,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![DEFAULT_THRESHOLD],
            root_margin: RootMargin::default(),
        }
    }
}

impl ObserverOptions {
    /// Thresholds must lie in 0.0..=1.0; they are sorted and deduplicated.
    /// An empty list means the default single zero threshold.
    pub fn with_thresholds(mut thresholds: Vec<f32>) -> ScrollResult<Self> {
        if let Some(bad) = thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(ScrollError::InvalidInput(format!(
                "threshold {} is outside 0.0..=1.0",
                bad
            )));
        }
        if thresholds.is_empty() {
            thresholds.push(DEFAULT_THRESHOLD);
        }
        thresholds.sort_by(|a, b| a.total_cmp(b));
        thresholds.dedup();
        Ok(Self {
            thresholds,
            root_margin: RootMargin::default(),
        })
    }

    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Index of the first threshold above `ratio`, or the threshold count.
    /// Non-intersecting targets always sit at index 0.
    pub fn threshold_index(&self, is_intersecting: bool, ratio: f32) -> usize {
        if !is_intersecting {
            return 0;
        }
        self.thresholds
            .iter()
            .position(|t| *t > ratio)
            .unwrap_or(self.thresholds.len())
    }
}

/// Outcome of testing one target against the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    pub ratio: f32,
    pub rect: Rect,
}

fn area(rect: Rect) -> u32 {
    u32::from(rect.width) * u32::from(rect.height)
}

/// Zero-area targets intersect when they lie inside the root, edges included.
pub fn compute_intersection(target: Rect, root: Rect) -> Intersection {
    let target_area = area(target);

    if target_area == 0 {
        let inside = target.x >= root.x
            && target.right() <= root.right()
            && target.y >= root.y
            && target.bottom() <= root.bottom();
        return Intersection {
            is_intersecting: inside,
            ratio: if inside { 1.0 } else { 0.0 },
            rect: if inside { target } else { Rect::default() },
        };
    }

    let overlap = target.intersection(root);
    let overlap_area = area(overlap);
    if overlap_area == 0 {
        return Intersection {
            is_intersecting: false,
            ratio: 0.0,
            rect: Rect::default(),
        };
    }

    Intersection {
        is_intersecting: true,
        ratio: overlap_area as f32 / target_area as f32,
        rect: overlap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ObserverOptions::default();
        assert_eq!(options.thresholds(), &[0.0]);
        assert_eq!(options.root_margin, RootMargin::default());
    }

    #[test]
    fn test_thresholds_sorted_and_validated() {
        let options = ObserverOptions::with_thresholds(vec![1.0, 0.5, 0.5, 0.0]).unwrap();
        assert_eq!(options.thresholds(), &[0.0, 0.5, 1.0]);
        assert!(ObserverOptions::with_thresholds(vec![1.5]).is_err());
        assert!(ObserverOptions::with_thresholds(vec![-0.1]).is_err());
        assert_eq!(ObserverOptions::with_thresholds(vec![]).unwrap().thresholds(), &[0.0]);
    }

    #[test]
    fn test_threshold_index() {
        let options = ObserverOptions::with_thresholds(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(options.threshold_index(false, 0.0), 0);
        assert_eq!(options.threshold_index(true, 0.1), 1);
        assert_eq!(options.threshold_index(true, 0.5), 2);
        assert_eq!(options.threshold_index(true, 1.0), 3);
    }

    #[test]
    fn test_partial_overlap_ratio() {
        let target = Rect::new(0, 8, 10, 4);
        let root = Rect::new(0, 0, 10, 10);
        let hit = compute_intersection(target, root);
        assert!(hit.is_intersecting);
        assert_eq!(hit.rect, Rect::new(0, 8, 10, 2));
        assert!((hit.ratio - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_adjacent_rects_do_not_intersect() {
        let target = Rect::new(0, 10, 10, 1);
        let root = Rect::new(0, 0, 10, 10);
        assert!(!compute_intersection(target, root).is_intersecting);
    }

    #[test]
    fn test_zero_area_target_on_edge() {
        let root = Rect::new(0, 0, 10, 10);
        assert!(compute_intersection(Rect::new(0, 10, 10, 0), root).is_intersecting);
        assert!(!compute_intersection(Rect::new(0, 11, 10, 0), root).is_intersecting);
    }

    #[test]
    fn test_root_margin_expands() {
        let root = Rect::new(5, 5, 10, 10);
        let grown = RootMargin { top: 2, right: 1, bottom: 3, left: 10 }.expand(root);
        assert_eq!(grown, Rect::new(0, 3, 16, 15));
        assert_eq!(RootMargin::uniform(0).expand(root), root);
    }
}
