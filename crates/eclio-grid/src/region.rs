//! FIPNUM region index over active cells and well completions.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::GridError;
use crate::grid::EclipseGrid;
use crate::properties::GridProperties;
use crate::schedule::Schedule;

/// Keyword holding the region id of every cell.
const REGION_KEYWORD: &str = "FIPNUM";

/// Region id → completions and active cells, built once.
///
/// Completions are listed per region as `(well name, active index)` in
/// schedule order: wells in declaration order, and each well's cells in
/// the order they first appear in its completion history. A cell is
/// listed once per well even if several declarations repeat it.
/// Inactive completed cells are skipped.
///
/// The cache is a snapshot. It does not observe later schedule changes;
/// build a new one instead.
///
/// # Examples
///
/// ```
/// use eclio_grid::{
///     CompletionSpec, EclipseGrid, GridProperties, Phase, RegionCache, Schedule, ScheduleWell,
/// };
///
/// let grid = EclipseGrid::from_cartesian([2, 1, 1], &[1.0; 2], &[1.0], &[1.0], &[0.0; 2]).unwrap();
/// let mut props = GridProperties::new(2);
/// props.insert_int("FIPNUM", vec![1, 2]).unwrap();
///
/// let mut well = ScheduleWell::new("P", "G", [1, 0], Phase::Oil, 0);
/// well.set_completions(0, [CompletionSpec::open(1, 0, 0)]).unwrap();
/// let mut schedule = Schedule::default();
/// schedule.add_well(well).unwrap();
///
/// let cache = RegionCache::new(&props, &grid, &schedule).unwrap();
/// assert_eq!(cache.completions(2), &[("P".to_string(), 1)]);
/// assert!(cache.completions(1).is_empty());
/// assert!(cache.completions(99).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RegionCache {
    completions: HashMap<i32, Vec<(String, usize)>>,
    cells: HashMap<i32, Vec<usize>>,
    region_ids: Vec<i32>,
}

impl RegionCache {
    /// Build the index from FIPNUM (default region 1), the grid and the schedule.
    ///
    /// Fails with [`GridError::CellOutOfBounds`] if a completion lies
    /// outside the grid, or [`GridError::SizeMismatch`] if the property
    /// set does not cover the grid.
    pub fn new(
        properties: &GridProperties,
        grid: &EclipseGrid,
        schedule: &Schedule,
    ) -> Result<Self, GridError> {
        if properties.cartesian_size() != grid.cartesian_size() {
            return Err(GridError::SizeMismatch {
                name: REGION_KEYWORD.to_string(),
                expected: grid.cartesian_size(),
                found: properties.cartesian_size(),
            });
        }
        let fipnum = properties
            .int_or_default(REGION_KEYWORD)
            .unwrap_or_else(|| vec![1; grid.cartesian_size()].into());

        let mut completions: HashMap<i32, Vec<(String, usize)>> = HashMap::new();
        for well in schedule.wells() {
            let mut seen = HashSet::new();
            for (_, specs) in well.history() {
                for spec in specs {
                    let global = grid.global_index(spec.i, spec.j, spec.k)?;
                    let Some(active) = grid.active_index_of(global) else {
                        continue;
                    };
                    if seen.insert(active) {
                        completions
                            .entry(fipnum[global])
                            .or_default()
                            .push((well.name().to_string(), active));
                    }
                }
            }
        }

        let mut cells: HashMap<i32, Vec<usize>> = HashMap::new();
        for (active, &global) in grid.active_cells().iter().enumerate() {
            cells.entry(fipnum[global]).or_default().push(active);
        }

        let region_ids: BTreeSet<i32> = cells.keys().chain(completions.keys()).copied().collect();

        Ok(Self {
            completions,
            cells,
            region_ids: region_ids.into_iter().collect(),
        })
    }

    /// Completions in a region; empty for unknown regions or regions without wells.
    pub fn completions(&self, region_id: i32) -> &[(String, usize)] {
        self.completions
            .get(&region_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Active cells in a region, ascending.
    pub fn cells(&self, region_id: i32) -> &[usize] {
        self.cells.get(&region_id).map_or(&[], Vec::as_slice)
    }

    /// Region ids holding at least one active cell, ascending.
    pub fn regions(&self) -> impl Iterator<Item = i32> + '_ {
        self.region_ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CompletionSpec, Phase, ScheduleWell};

    fn grid_3x1x2() -> EclipseGrid {
        EclipseGrid::from_cartesian([3, 1, 2], &[1.0; 3], &[1.0], &[1.0, 1.0], &[0.0; 3]).unwrap()
    }

    fn well(name: &str, history: &[(usize, &[(usize, usize, usize)])]) -> ScheduleWell {
        let mut w = ScheduleWell::new(name, "G", [0, 0], Phase::Oil, 0);
        for (step, cells) in history {
            w.set_completions(*step, cells.iter().map(|&(i, j, k)| CompletionSpec::open(i, j, k)))
                .unwrap();
        }
        w
    }

    #[test]
    fn default_region_holds_everything() {
        let grid = grid_3x1x2();
        let props = GridProperties::new(6);
        let mut schedule = Schedule::default();
        schedule.add_well(well("A", &[(0, &[(0, 0, 0), (0, 0, 1)])])).unwrap();

        let cache = RegionCache::new(&props, &grid, &schedule).unwrap();
        assert_eq!(cache.regions().collect::<Vec<_>>(), [1]);
        assert_eq!(cache.cells(1), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(
            cache.completions(1),
            &[("A".to_string(), 0), ("A".to_string(), 3)]
        );
    }

    #[test]
    fn repeated_completions_listed_once_per_well() {
        let grid = grid_3x1x2();
        let props = GridProperties::new(6);
        let mut schedule = Schedule::default();
        schedule
            .add_well(well("A", &[(0, &[(1, 0, 0)]), (2, &[(1, 0, 0), (2, 0, 0)])]))
            .unwrap();
        schedule.add_well(well("B", &[(1, &[(1, 0, 0)])])).unwrap();

        let cache = RegionCache::new(&props, &grid, &schedule).unwrap();
        assert_eq!(
            cache.completions(1),
            &[
                ("A".to_string(), 1),
                ("A".to_string(), 2),
                ("B".to_string(), 1)
            ]
        );
    }

    #[test]
    fn inactive_completions_skipped() {
        let grid = grid_3x1x2().with_actnum(vec![0, 1, 1, 1, 1, 1]).unwrap();
        let props = GridProperties::new(6);
        let mut schedule = Schedule::default();
        schedule.add_well(well("A", &[(0, &[(0, 0, 0), (1, 0, 0)])])).unwrap();

        let cache = RegionCache::new(&props, &grid, &schedule).unwrap();
        assert_eq!(cache.completions(1), &[("A".to_string(), 0)]);
        assert_eq!(cache.cells(1).len(), 5);
    }

    #[test]
    fn out_of_bounds_completion_fails() {
        let grid = grid_3x1x2();
        let props = GridProperties::new(6);
        let mut schedule = Schedule::default();
        schedule.add_well(well("A", &[(0, &[(3, 0, 0)])])).unwrap();

        let err = RegionCache::new(&props, &grid, &schedule).unwrap_err();
        assert!(matches!(err, GridError::CellOutOfBounds { ijk: [3, 0, 0], .. }));
    }

    #[test]
    fn property_size_must_match_grid() {
        let grid = grid_3x1x2();
        let props = GridProperties::new(5);
        let err = RegionCache::new(&props, &grid, &Schedule::default()).unwrap_err();
        assert!(matches!(err, GridError::SizeMismatch { expected: 6, found: 5, .. }));
    }

    #[test]
    fn regions_are_sorted() {
        let grid = grid_3x1x2();
        let mut props = GridProperties::new(6);
        props.insert_int("FIPNUM", vec![7, 3, 3, 5, 7, 3]).unwrap();
        let cache = RegionCache::new(&props, &grid, &Schedule::default()).unwrap();
        assert_eq!(cache.regions().collect::<Vec<_>>(), [3, 5, 7]);
        assert_eq!(cache.cells(3), &[1, 2, 5]);
        assert!(cache.completions(3).is_empty());
    }
}
