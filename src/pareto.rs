use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dataset cannot be turned into a Pareto front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("dataset is empty")]
    Empty,
    #[error("column '{0}' not found")]
    UnknownColumn(String),
    #[error("row {row}: column '{column}' has no value")]
    Missing { row: usize, column: String },
    #[error("row {row}: column '{column}' value '{value}' is not numeric")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: column '{column}' is not a finite number")]
    NonFinite { row: usize, column: String },
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Optimization sense of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Minimize, Direction::Maximize];

    /// Map a value onto the "lower is better" scale.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        }
    }

    #[cfg(test)]
    fn flipped(self) -> Self {
        match self {
            Direction::Minimize => Direction::Maximize,
            Direction::Maximize => Direction::Minimize,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minimize => write!(f, "minimize"),
            Direction::Maximize => write!(f, "maximize"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record / ParetoSet
// ---------------------------------------------------------------------------

/// One row of the selected two-column numeric view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Row index in the source table.
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

impl Record {
    pub fn new(row: usize, x: f64, y: f64) -> Self {
        Self { row, x, y }
    }
}

/// The non-dominated subset of a record set, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParetoSet {
    records: Vec<Record>,
    rows: BTreeSet<usize>,
}

impl ParetoSet {
    fn from_records(records: Vec<Record>) -> Self {
        let rows = records.iter().map(|r| r.row).collect();
        Self { records, rows }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Whether the record originating from `row` is on the front.
    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }
}

// ---------------------------------------------------------------------------
// Dominance
// ---------------------------------------------------------------------------

/// `true` when `a` is at least as good as `b` on both axes and strictly better
/// on one.
pub fn dominates(a: &Record, b: &Record, dx: Direction, dy: Direction) -> bool {
    let (ax, ay) = (dx.normalize(a.x), dy.normalize(a.y));
    let (bx, by) = (dx.normalize(b.x), dy.normalize(b.y));
    ax <= bx && ay <= by && (ax < bx || ay < by)
}

/// Compute the non-dominated subset of `records`.
///
/// Sorts by normalized x (then y) and sweeps groups of equal x, keeping the
/// minimum-y members of a group when that minimum beats every strictly
/// smaller x. Runs in O(n log n).
pub fn compute_pareto_front(
    records: &[Record],
    direction_x: Direction,
    direction_y: Direction,
) -> Result<ParetoSet, InvalidInput> {
    if records.is_empty() {
        return Err(InvalidInput::Empty);
    }
    if let Some(bad) = records
        .iter()
        .find(|r| !r.x.is_finite() || !r.y.is_finite())
    {
        let column = if bad.x.is_finite() { "y" } else { "x" };
        return Err(InvalidInput::NonFinite {
            row: bad.row,
            column: column.to_string(),
        });
    }

    let normalized: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (direction_x.normalize(r.x), direction_y.normalize(r.y)))
        .collect();

    // Values are finite here, so partial_cmp always succeeds and treats
    // -0.0 and 0.0 as equal.
    let cmp = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&i, &j| {
        let (xi, yi) = normalized[i];
        let (xj, yj) = normalized[j];
        cmp(xi, xj).then_with(|| cmp(yi, yj))
    });

    let mut keep = vec![false; records.len()];
    let mut best_y = f64::INFINITY;
    let mut start = 0;
    while start < order.len() {
        let group_x = normalized[order[start]].0;
        let group_min_y = normalized[order[start]].1;
        let mut end = start;
        while end < order.len() && normalized[order[end]].0 == group_x {
            end += 1;
        }

        if group_min_y < best_y {
            for &idx in &order[start..end] {
                if normalized[idx].1 == group_min_y {
                    keep[idx] = true;
                }
            }
            best_y = group_min_y;
        }
        start = end;
    }

    let front: Vec<Record> = records
        .iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(*r))
        .collect();

    log::debug!(
        "Pareto front: {} of {} records ({direction_x} x, {direction_y} y)",
        front.len(),
        records.len()
    );
    let front = ParetoSet::from_records(front);
    debug_assert!(!front.is_empty());
    debug_assert!(front
        .iter()
        .all(|kept| !records.iter().any(|r| dominates(r, kept, direction_x, direction_y))));
    Ok(front)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records(points: &[(f64, f64)]) -> Vec<Record> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Record::new(i, x, y))
            .collect()
    }

    fn points(set: &ParetoSet) -> Vec<(f64, f64)> {
        set.iter().map(|r| (r.x, r.y)).collect()
    }

    fn naive_front(records: &[Record], dx: Direction, dy: Direction) -> Vec<Record> {
        records
            .iter()
            .filter(|b| {
                !records
                    .iter()
                    .any(|a| a.row != b.row && dominates(a, b, dx, dy))
            })
            .copied()
            .collect()
    }

    #[test]
    fn minimize_both_scenario() {
        let input = records(&[(1.0, 5.0), (2.0, 3.0), (3.0, 3.0), (4.0, 1.0), (5.0, 4.0)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap();
        assert_eq!(points(&front), vec![(1.0, 5.0), (2.0, 3.0), (4.0, 1.0)]);
        assert!(front.contains(0));
        assert!(!front.contains(2));
        assert!(!front.contains(4));
    }

    #[test]
    fn single_record_is_its_own_front() {
        let input = records(&[(7.0, 7.0)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap();
        assert_eq!(points(&front), vec![(7.0, 7.0)]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = compute_pareto_front(&[], Direction::Minimize, Direction::Maximize).unwrap_err();
        assert_eq!(err, InvalidInput::Empty);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let input = records(&[(1.0, 2.0), (f64::NAN, 1.0)]);
        let err = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::NonFinite {
                row: 1,
                column: "x".into()
            }
        );

        let input = records(&[(1.0, f64::INFINITY)]);
        assert!(matches!(
            compute_pareto_front(&input, Direction::Minimize, Direction::Minimize),
            Err(InvalidInput::NonFinite { row: 0, .. })
        ));
    }

    #[test]
    fn duplicates_are_all_retained() {
        let input = records(&[(1.0, 1.0), (1.0, 1.0), (2.0, 2.0)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap();
        assert_eq!(front.len(), 2);
        assert!(front.contains(0) && front.contains(1));
    }

    #[test]
    fn equal_x_keeps_only_lowest_y() {
        let input = records(&[(1.0, 3.0), (1.0, 2.0), (0.5, 9.0)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap();
        assert_eq!(points(&front), vec![(1.0, 2.0), (0.5, 9.0)]);
    }

    #[test]
    fn equal_y_with_larger_x_is_dominated() {
        let input = records(&[(1.0, 2.0), (3.0, 2.0)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Minimize).unwrap();
        assert_eq!(points(&front), vec![(1.0, 2.0)]);
    }

    #[test]
    fn maximize_both() {
        let input = records(&[(1.0, 5.0), (2.0, 3.0), (3.0, 3.0), (4.0, 1.0), (5.0, 4.0)]);
        let front = compute_pareto_front(&input, Direction::Maximize, Direction::Maximize).unwrap();
        assert_eq!(points(&front), vec![(1.0, 5.0), (5.0, 4.0)]);
    }

    #[test]
    fn mixed_directions() {
        // Minimize cost (x), maximize rating (y).
        let input = records(&[(10.0, 0.2), (12.0, 0.9), (15.0, 0.5), (8.0, 0.1)]);
        let front = compute_pareto_front(&input, Direction::Minimize, Direction::Maximize).unwrap();
        assert_eq!(points(&front), vec![(10.0, 0.2), (12.0, 0.9), (8.0, 0.1)]);
    }

    #[test]
    fn signed_zero_counts_as_a_tie() {
        let input = records(&[(0.0, 1.0), (-0.0, 1.0)]);
        let front = compute_pareto_front(&input, Direction::Maximize, Direction::Minimize).unwrap();
        assert_eq!(front.len(), 2);
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Maximize.normalize(3.0), -3.0);
        assert_eq!(Direction::Minimize.normalize(3.0), 3.0);
        assert_eq!(Direction::Minimize.flipped(), Direction::Maximize);
        assert_eq!(Direction::Maximize.to_string(), "maximize");
        let parsed: Direction = serde_json::from_str("\"maximize\"").unwrap();
        assert_eq!(parsed, Direction::Maximize);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Minimize), Just(Direction::Maximize)]
    }

    // Small integer grid so ties and duplicates show up often.
    fn point_set() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec((-5i32..5, -5i32..5), 1..40).prop_map(|pts| {
            pts.into_iter()
                .enumerate()
                .map(|(i, (x, y))| Record::new(i, x as f64, y as f64))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn front_is_sound(input in point_set(), dx in direction(), dy in direction()) {
            let front = compute_pareto_front(&input, dx, dy).unwrap();
            for kept in front.iter() {
                prop_assert!(!input.iter().any(|other| dominates(other, kept, dx, dy)));
            }
        }

        #[test]
        fn front_is_complete(input in point_set(), dx in direction(), dy in direction()) {
            let front = compute_pareto_front(&input, dx, dy).unwrap();
            prop_assert!(!front.is_empty());
            for dropped in input.iter().filter(|r| !front.contains(r.row)) {
                prop_assert!(front.iter().any(|kept| dominates(kept, dropped, dx, dy)));
            }
        }

        #[test]
        fn sweep_matches_pairwise(input in point_set(), dx in direction(), dy in direction()) {
            let front = compute_pareto_front(&input, dx, dy).unwrap();
            let expected = naive_front(&input, dx, dy);
            prop_assert_eq!(front.records(), expected.as_slice());
        }

        #[test]
        fn recomputation_is_identical(input in point_set(), dx in direction(), dy in direction()) {
            let first = compute_pareto_front(&input, dx, dy).unwrap();
            let second = compute_pareto_front(&input, dx, dy).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn flipping_an_axis_and_its_values(input in point_set(), dx in direction(), dy in direction()) {
            let original = compute_pareto_front(&input, dx, dy).unwrap();
            let negated_x: Vec<Record> = input
                .iter()
                .map(|r| Record::new(r.row, -r.x, r.y))
                .collect();
            let flipped = compute_pareto_front(&negated_x, dx.flipped(), dy).unwrap();
            let rows = |s: &ParetoSet| s.iter().map(|r| r.row).collect::<Vec<_>>();
            prop_assert_eq!(rows(&original), rows(&flipped));
        }
    }
}
