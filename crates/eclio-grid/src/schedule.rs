//! Wells, completions over time, and the report-step time map.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::GridError;

/// Preferred phase of a well (`WELSPECS` item 6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Oil producer or injector.
    Oil,
    /// Water well.
    Water,
    /// Gas well.
    Gas,
}

impl Phase {
    /// Eclipse well-type code used in `IWEL` (1 oil, 2 water, 3 gas).
    pub fn eclipse_code(self) -> i32 {
        match self {
            Self::Oil => 1,
            Self::Water => 2,
            Self::Gas => 3,
        }
    }
}

/// A completed cell, zero-based `(i, j, k)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompletionSpec {
    /// Cell I index.
    pub i: usize,
    /// Cell J index.
    pub j: usize,
    /// Cell K index.
    pub k: usize,
    /// Whether the connection is open.
    pub open: bool,
}

impl CompletionSpec {
    /// An open completion in `(i, j, k)`.
    pub fn open(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k, open: true }
    }
}

type CompletionSet = SmallVec<[CompletionSpec; 4]>;

/// One well as declared in the schedule.
///
/// Completions are recorded as snapshots: [`set_completions`](Self::set_completions)
/// at step `s` defines the full completion list from `s` until the next
/// declaration.
#[derive(Clone, Debug)]
pub struct ScheduleWell {
    name: String,
    group: String,
    head: [usize; 2],
    phase: Phase,
    open_step: usize,
    history: Vec<(usize, CompletionSet)>,
}

impl ScheduleWell {
    /// Declare a well whose head is at `(head_i, head_j)`, opened at `open_step`.
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        head: [usize; 2],
        phase: Phase,
        open_step: usize,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            head,
            phase,
            open_step,
            history: Vec::new(),
        }
    }

    /// Well name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Zero-based wellhead `(i, j)`.
    pub fn head(&self) -> [usize; 2] {
        self.head
    }

    /// Preferred phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the well exists at `step`.
    pub fn is_open_at(&self, step: usize) -> bool {
        step >= self.open_step
    }

    /// Declare the completion list in effect from `step` on.
    ///
    /// Steps must be non-decreasing; redeclaring the latest step replaces it.
    pub fn set_completions(
        &mut self,
        step: usize,
        completions: impl IntoIterator<Item = CompletionSpec>,
    ) -> Result<(), GridError> {
        let set: CompletionSet = completions.into_iter().collect();
        if let Some((last, current)) = self.history.last_mut() {
            if step < *last {
                return Err(GridError::StepOutOfOrder {
                    well: self.name.clone(),
                    step,
                    last: *last,
                });
            }
            if step == *last {
                *current = set;
                return Ok(());
            }
        }
        self.history.push((step, set));
        Ok(())
    }

    /// Completions in effect at `step` (empty before the first declaration).
    pub fn completions_at(&self, step: usize) -> &[CompletionSpec] {
        self.history
            .iter()
            .rev()
            .find(|(s, _)| *s <= step)
            .map(|(_, set)| set.as_slice())
            .unwrap_or(&[])
    }

    /// Every declaration, `(step, completions)`, in step order.
    pub fn history(&self) -> impl Iterator<Item = (usize, &[CompletionSpec])> {
        self.history.iter().map(|(s, set)| (*s, set.as_slice()))
    }
}

/// Report-step calendar: a start date plus the length of every step.
///
/// The default calendar starts at the Unix epoch with no steps.
#[derive(Clone, Debug, Default)]
pub struct TimeMap {
    start: NaiveDateTime,
    step_lengths: Vec<f64>,
}

impl TimeMap {
    /// Calendar starting at midnight of `start` with the given step lengths (seconds).
    pub fn new(start: NaiveDate, step_lengths: Vec<f64>) -> Self {
        Self {
            start: start.and_time(NaiveTime::default()),
            step_lengths,
        }
    }

    /// Simulation start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Number of report steps, counting the initial step 0.
    pub fn num_steps(&self) -> usize {
        self.step_lengths.len() + 1
    }

    /// Seconds from the start to the beginning of report step `step`.
    pub fn elapsed_seconds(&self, step: usize) -> f64 {
        self.step_lengths.iter().take(step).sum()
    }

    /// Calendar time `seconds` after the start, or `None` when `seconds`
    /// is not finite or the date falls outside the representable range.
    pub fn date_after(&self, seconds: f64) -> Option<NaiveDateTime> {
        if !seconds.is_finite() {
            return None;
        }
        let delta = Duration::try_milliseconds((seconds * 1000.0).round() as i64)?;
        self.start.checked_add_signed(delta)
    }
}

/// The well schedule: wells in declaration order plus the time map.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    time_map: TimeMap,
    wells: IndexMap<String, ScheduleWell>,
}

impl Schedule {
    /// Empty schedule over `time_map`.
    pub fn new(time_map: TimeMap) -> Self {
        Self {
            time_map,
            wells: IndexMap::new(),
        }
    }

    /// The report-step calendar.
    pub fn time_map(&self) -> &TimeMap {
        &self.time_map
    }

    /// Add a well; names must be unique.
    pub fn add_well(&mut self, well: ScheduleWell) -> Result<(), GridError> {
        if self.wells.contains_key(well.name()) {
            return Err(GridError::DuplicateWell {
                name: well.name().to_string(),
            });
        }
        self.wells.insert(well.name().to_string(), well);
        Ok(())
    }

    /// Mutable access to a declared well.
    pub fn well_mut(&mut self, name: &str) -> Option<&mut ScheduleWell> {
        self.wells.get_mut(name)
    }

    /// A declared well.
    pub fn well(&self, name: &str) -> Option<&ScheduleWell> {
        self.wells.get(name)
    }

    /// All wells in declaration order.
    pub fn wells(&self) -> impl Iterator<Item = &ScheduleWell> {
        self.wells.values()
    }

    /// Wells that exist at `step`, in declaration order.
    pub fn wells_at(&self, step: usize) -> impl Iterator<Item = &ScheduleWell> {
        self.wells().filter(move |w| w.is_open_at(step))
    }

    /// Number of declared wells.
    pub fn num_wells(&self) -> usize {
        self.wells.len()
    }
}
