use chrono::{NaiveDateTime, Timelike};
use chrono_tz::Tz;

use crate::core::Interval;
use crate::core::time::{DateTime, InvalidTimezone, absolute_hours, localize, parse_timezone};

use super::{GridShape, TimeGrid, hour_label};

#[derive(Debug, Clone, Copy)]
pub struct GridBuilder {
    shape: GridShape,
}

impl GridBuilder {
    pub fn new(shape: GridShape) -> Self {
        Self { shape }
    }

    /// Maps `events` onto the hours following `reference`.
    ///
    /// Rows are labelled in `target_tz`. Bucket boundaries are computed in `override_tz`,
    /// which falls back to `target_tz` when unset or unknown. Only an unknown `target_tz`
    /// fails the build.
    pub fn build(
        &self,
        events: &[Interval],
        reference: DateTime,
        target_tz: &str,
        override_tz: Option<&str>,
        name: &str,
    ) -> Result<TimeGrid, InvalidTimezone> {
        let target = parse_timezone(target_tz)?;
        let bucket_zone = resolve_override(override_tz, target);

        let local = reference.in_zone(&target);
        let hour_wall = truncate_to_hour(local.naive_local());

        let labels = (0..self.shape.rows())
            .map(|i| {
                let row_start = localize(&target, hour_wall) + chrono::Duration::hours(i as i64);
                hour_label(row_start.hour())
            })
            .collect();

        let window = BucketWindow::new(self.shape, &bucket_zone, hour_wall);
        let now_for_block: DateTime = localize(&bucket_zone, truncate_to_second(local.naive_local())).into();

        let mut occupied_now = false;
        let mut cells = vec![false; self.shape.cells()];

        for event in events {
            if event.strictly_contains(now_for_block) {
                occupied_now = true;
            }

            if let Some(buckets) = window.buckets(event) {
                for bucket in buckets {
                    cells[bucket] = true;
                }
            }
        }

        tracing::debug!(
            "Built grid for {} from {} events, window starting {} ({})",
            name,
            events.len(),
            window.start,
            bucket_zone
        );

        Ok(TimeGrid::new(
            name.to_owned(),
            local.format("%d.%m.%Y").to_string(),
            occupied_now,
            self.shape,
            labels,
            cells,
        ))
    }
}

fn resolve_override(override_tz: Option<&str>, target: Tz) -> Tz {
    match override_tz.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => parse_timezone(name).unwrap_or_else(|e| {
            tracing::warn!("{}, computing occupancy in {} instead", e, target);
            target
        }),
        None => target,
    }
}

struct BucketWindow {
    zone: Tz,
    start: DateTime,
    end: DateTime,
    origin_hours: i64,
    columns: i64,
    total: i64,
}

impl BucketWindow {
    // One hour wider than the visible rows so events ending just past the last row still overlap.
    fn new(shape: GridShape, zone: &Tz, hour_wall: NaiveDateTime) -> Self {
        let start = localize(zone, hour_wall);
        let end = start + chrono::Duration::hours(shape.rows() as i64 + 1);

        Self {
            zone: *zone,
            start: start.into(),
            end: end.into(),
            origin_hours: absolute_hours(&start.naive_local()),
            columns: shape.columns() as i64,
            total: shape.cells() as i64,
        }
    }

    fn bucket(&self, at: DateTime) -> i64 {
        let wall = at.in_zone(&self.zone).naive_local();
        (absolute_hours(&wall) - self.origin_hours) * self.columns + (wall.minute() as i64 * self.columns) / 60
    }

    /// Half-open range of cell indexes covered by `event`, `None` if it misses the window.
    fn buckets(&self, event: &Interval) -> Option<std::ops::Range<usize>> {
        if !event.overlaps(self.start, self.end) {
            return None;
        }

        let first = self.bucket(event.start).max(0);
        let last = self.bucket(event.end).min(self.total);

        if first >= last {
            return None;
        }

        Some(first as usize..last as usize)
    }
}

fn truncate_to_hour(wall: NaiveDateTime) -> NaiveDateTime {
    wall.date().and_hms_opt(wall.hour(), 0, 0).unwrap_or(wall)
}

fn truncate_to_second(wall: NaiveDateTime) -> NaiveDateTime {
    wall.with_nanosecond(0).unwrap_or(wall)
}
