//! Maps due dates onto a sprint's horizontal timeline.
//!
//! Positions are percentages of the timeline width. They are deliberately
//! left unclamped: a task due before the sprint starts gets a negative
//! position and one due after it ends gets a position above 100, which is
//! how the renderer tells off-timeline tasks apart.

use chrono::{Duration, NaiveDate};

use super::task::Task;

/// Width of a task bar, as a percentage of the timeline.
pub const BAR_WIDTH_PERCENT: f64 = 30.0;

/// Bars are centred on their due date, so they start half a bar earlier.
pub const BAR_HALF_WIDTH_PERCENT: f64 = BAR_WIDTH_PERCENT / 2.0;

/// The date range a timeline spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Where a date falls relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    Within,
    After,
}

/// Horizontal extent of a dependency arrow, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Right edge of the upstream bar.
    pub start_x: f64,
    /// Left edge of the downstream bar.
    pub end_x: f64,
}

/// A drawable dependency edge: `to` depends on `from`.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyArrow {
    pub from: String,
    pub to: String,
    pub connector: Connector,
}

impl SprintWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole days between start and end. Zero for a single-day window and
    /// negative if the window is reversed.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Divisor for position math; never less than one.
    pub fn total_days(&self) -> i64 {
        self.span_days().max(1)
    }

    /// Number of day columns drawn on the timeline, both ends included.
    pub fn day_count(&self) -> i64 {
        self.span_days().max(0) + 1
    }

    /// Position of `date` as a percentage of the timeline width.
    pub fn day_position(&self, date: NaiveDate) -> f64 {
        let days_from_start = (date - self.start).num_days();
        days_from_start as f64 / self.total_days() as f64 * 100.0
    }

    pub fn placement(&self, date: NaiveDate) -> Placement {
        let position = self.day_position(date);
        if position < 0.0 {
            Placement::Before
        } else if position > 100.0 {
            Placement::After
        } else {
            Placement::Within
        }
    }

    /// The date `offset` days after the start, if representable.
    pub fn date_for_offset(&self, offset: i64) -> Option<NaiveDate> {
        Duration::try_days(offset).and_then(|d| self.start.checked_add_signed(d))
    }

    /// Day column under a horizontal fraction of the timeline width.
    pub fn column_at(&self, fraction: f64) -> Option<i64> {
        if !(0.0..1.0).contains(&fraction) {
            return None;
        }
        Some((fraction * self.day_count() as f64).floor() as i64)
    }

    /// Dates of every day column, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.day_count()).filter_map(move |offset| self.date_for_offset(offset))
    }

    pub fn task_position(&self, task: &Task) -> f64 {
        self.day_position(task.due_date)
    }

    /// Arrow from the right edge of `dependency`'s bar to the left edge of
    /// `task`'s bar. Only the lower bound is clamped.
    pub fn connector(&self, dependency: &Task, task: &Task) -> Connector {
        let dependency_position = self.task_position(dependency);
        let task_position = self.task_position(task);
        Connector {
            start_x: bar_left(dependency_position) + BAR_HALF_WIDTH_PERCENT,
            end_x: bar_left(task_position),
        }
    }

    /// Every drawable dependency arrow, in task order. References to tasks
    /// missing from `tasks` and self-references are skipped.
    pub fn arrows(&self, tasks: &[Task]) -> Vec<DependencyArrow> {
        let mut arrows = Vec::new();
        for task in tasks {
            for dep_id in &task.dependencies {
                if *dep_id == task.id {
                    continue;
                }
                let Some(dependency) = tasks.iter().find(|t| t.id == *dep_id) else {
                    continue;
                };
                arrows.push(DependencyArrow {
                    from: dependency.id.clone(),
                    to: task.id.clone(),
                    connector: self.connector(dependency, task),
                });
            }
        }
        arrows
    }
}

/// Left edge of a bar centred on `position`, clamped at the timeline start.
pub fn bar_left(position: f64) -> f64 {
    (position - BAR_HALF_WIDTH_PERCENT).max(0.0)
}
