//! Time-bucketed message counts.
//!
//! Months are sparse: only `(year, month, participant)` combinations that
//! occur are reported. Hours and weekdays are dense grids over every
//! participant, zero-filled, because heatmaps need every cell.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::Record;

/// Weekday labels, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Messages a participant sent in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub participant: String,
    pub count: usize,
}

/// Messages a participant sent in one hour of the day (0-23).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub participant: String,
    pub count: usize,
}

/// Messages a participant sent on one weekday (0 = Monday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: u32,
    pub participant: String,
    pub count: usize,
}

impl WeekdayCount {
    /// Human-readable weekday name.
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[self.weekday as usize % 7]
    }
}

/// Accumulates bucket counts during the aggregation pass.
#[derive(Debug, Default)]
pub(crate) struct BucketTally {
    months: BTreeMap<(i32, u32, String), usize>,
    hours: HashMap<(u32, String), usize>,
    weekdays: HashMap<(u32, String), usize>,
}

impl BucketTally {
    pub(crate) fn observe(&mut self, record: &Record) {
        let (year, month) = record.year_month();
        let participant = &record.participant;

        *self
            .months
            .entry((year, month, participant.clone()))
            .or_default() += 1;
        *self
            .hours
            .entry((record.hour(), participant.clone()))
            .or_default() += 1;
        *self
            .weekdays
            .entry((record.weekday(), participant.clone()))
            .or_default() += 1;
    }

    pub(crate) fn months(&self) -> Vec<MonthCount> {
        // BTreeMap keys are already in (year, month, participant) order
        self.months
            .iter()
            .map(|((year, month, participant), &count)| MonthCount {
                year: *year,
                month: *month,
                participant: participant.clone(),
                count,
            })
            .collect()
    }

    /// Dense hour grid; `participants` must be sorted.
    pub(crate) fn hours(&self, participants: &[String]) -> Vec<HourCount> {
        dense_grid(&self.hours, 0..24, participants)
            .map(|(hour, participant, count)| HourCount {
                hour,
                participant,
                count,
            })
            .collect()
    }

    /// Dense weekday grid; `participants` must be sorted.
    pub(crate) fn weekdays(&self, participants: &[String]) -> Vec<WeekdayCount> {
        dense_grid(&self.weekdays, 0..7, participants)
            .map(|(weekday, participant, count)| WeekdayCount {
                weekday,
                participant,
                count,
            })
            .collect()
    }
}

/// Every `bucket x participant` cell in `(bucket, participant)` order.
fn dense_grid<'a>(
    counts: &'a HashMap<(u32, String), usize>,
    buckets: std::ops::Range<u32>,
    participants: &'a [String],
) -> impl Iterator<Item = (u32, String, usize)> + 'a {
    buckets.flat_map(move |bucket| {
        participants.iter().map(move |participant| {
            let count = counts
                .get(&(bucket, participant.clone()))
                .copied()
                .unwrap_or(0);
            (bucket, participant.clone(), count)
        })
    })
}
