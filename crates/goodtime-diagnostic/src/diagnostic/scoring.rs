use std::cmp::Ordering;

use super::domain::{Area, ScoreBundle, Segment};

/// Inclusive upper bounds evaluated top-down; anything above the last bound is a machine.
const SEGMENT_THRESHOLDS: [(i32, Segment); 2] =
    [(18, Segment::Artisanal), (32, Segment::Transition)];

/// Classify a total score. Out-of-range totals fall through the same comparisons.
pub fn classify(total: i32) -> Segment {
    SEGMENT_THRESHOLDS
        .iter()
        .find(|(upper_bound, _)| total <= *upper_bound)
        .map(|(_, segment)| *segment)
        .unwrap_or(Segment::Machine)
}

/// Percent of the area maximum, rounded half away from zero.
pub fn percentage(score: i32, area: Area) -> i32 {
    (f64::from(score) / f64::from(area.max_score()) * 100.0).round() as i32
}

/// Compare `a/max_a` with `b/max_b` without going through floating point.
fn compare_ratios(a: i32, a_area: Area, b: i32, b_area: Area) -> Ordering {
    let lhs = i64::from(a) * i64::from(b_area.max_score());
    let rhs = i64::from(b) * i64::from(a_area.max_score());
    lhs.cmp(&rhs)
}

/// Area with the lowest share of its maximum. Exact ties keep the earlier area in
/// `Area::ALL` (structure, then acquisition, then value).
pub fn weakest_area(scores: &ScoreBundle) -> Area {
    let mut weakest = Area::Structure;
    for area in Area::ALL.into_iter().skip(1) {
        let ordering = compare_ratios(
            scores.score_for(area),
            area,
            scores.score_for(weakest),
            weakest,
        );
        if ordering == Ordering::Less {
            weakest = area;
        }
    }
    weakest
}

/// Qualitative health of one area, picked from its percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaStatus {
    Fragile,
    Consolidating,
    Solid,
}

impl AreaStatus {
    pub fn from_percentage(percentage: i32) -> Self {
        if percentage >= 70 {
            Self::Solid
        } else if percentage >= 40 {
            Self::Consolidating
        } else {
            Self::Fragile
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fragile => "Fragile",
            Self::Consolidating => "À consolider",
            Self::Solid => "Solide",
        }
    }
}

/// Everything the narrative needs to know about the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreProfile {
    pub scores: ScoreBundle,
    pub segment: Segment,
    pub weakest: Area,
}

impl ScoreProfile {
    pub fn from_scores(scores: ScoreBundle) -> Self {
        Self {
            scores,
            segment: classify(scores.total),
            weakest: weakest_area(&scores),
        }
    }

    pub fn percentage(&self, area: Area) -> i32 {
        percentage(self.scores.score_for(area), area)
    }

    pub fn status(&self, area: Area) -> AreaStatus {
        AreaStatus::from_percentage(self.percentage(area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(total: i32, structure: i32, acquisition: i32, value: i32) -> ScoreBundle {
        ScoreBundle {
            total,
            structure,
            acquisition,
            value,
        }
    }

    #[test]
    fn classify_respects_segment_boundaries() {
        assert_eq!(classify(0), Segment::Artisanal);
        assert_eq!(classify(18), Segment::Artisanal);
        assert_eq!(classify(19), Segment::Transition);
        assert_eq!(classify(32), Segment::Transition);
        assert_eq!(classify(33), Segment::Machine);
        assert_eq!(classify(44), Segment::Machine);
    }

    #[test]
    fn classify_is_total_over_out_of_range_values() {
        assert_eq!(classify(-5), Segment::Artisanal);
        assert_eq!(classify(i32::MIN), Segment::Artisanal);
        assert_eq!(classify(120), Segment::Machine);
        assert_eq!(classify(i32::MAX), Segment::Machine);
    }

    #[test]
    fn every_total_maps_to_its_range() {
        for total in -10..=60 {
            let expected = if total <= 18 {
                Segment::Artisanal
            } else if total <= 32 {
                Segment::Transition
            } else {
                Segment::Machine
            };
            assert_eq!(classify(total), expected, "total {total}");
        }
    }

    #[test]
    fn percentages_round_to_nearest() {
        assert_eq!(percentage(10, Area::Structure), 50);
        assert_eq!(percentage(9, Area::Acquisition), 50);
        assert_eq!(percentage(3, Area::Value), 50);
        assert_eq!(percentage(5, Area::Acquisition), 28);
        assert_eq!(percentage(1, Area::Value), 17);
        assert_eq!(percentage(20, Area::Structure), 100);
    }

    #[test]
    fn exact_ties_prefer_structure_then_acquisition() {
        assert_eq!(weakest_area(&scores(22, 10, 9, 3)), Area::Structure);
        assert_eq!(weakest_area(&scores(0, 0, 0, 0)), Area::Structure);
        assert_eq!(weakest_area(&scores(24, 16, 6, 2)), Area::Acquisition);
    }

    #[test]
    fn weakest_uses_exact_ratios() {
        // 7/18 = 38.9% sits below 8/20 = 40%.
        assert_eq!(weakest_area(&scores(20, 8, 7, 5)), Area::Acquisition);
        assert_eq!(weakest_area(&scores(25, 14, 10, 1)), Area::Value);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(AreaStatus::from_percentage(0), AreaStatus::Fragile);
        assert_eq!(AreaStatus::from_percentage(39), AreaStatus::Fragile);
        assert_eq!(AreaStatus::from_percentage(40), AreaStatus::Consolidating);
        assert_eq!(AreaStatus::from_percentage(69), AreaStatus::Consolidating);
        assert_eq!(AreaStatus::from_percentage(70), AreaStatus::Solid);
    }
}
