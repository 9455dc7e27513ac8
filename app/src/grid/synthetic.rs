use chrono::Timelike;
use chrono_tz::Tz;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::core::time::DateTime;

use super::{GridShape, TimeGrid, hour_label};

pub const SYNTHETIC_NAME: &str = "Random Room";

const INITIALLY_OCCUPIED_ABOVE: f32 = 0.5;
const FLIP_ABOVE: f32 = 0.95;

/// Fake schedule for displays without a calendar. The cell pattern depends only on
/// `seed` and `shape`, `reference` only provides labels and the date.
pub fn generate(seed: u64, shape: GridShape, reference: DateTime, tz: &Tz) -> TimeGrid {
    let mut rng = StdRng::seed_from_u64(seed);

    let occupied_now = rng.r#gen::<f32>() > INITIALLY_OCCUPIED_ABOVE;
    let mut occupied = occupied_now;
    let cells = (0..shape.cells())
        .map(|_| {
            if rng.r#gen::<f32>() > FLIP_ABOVE {
                occupied = !occupied;
            }
            occupied
        })
        .collect();

    let local = reference.in_zone(tz);
    let labels = (0..shape.rows())
        .map(|i| hour_label((local.hour() + i as u32) % 24))
        .collect();

    TimeGrid::new(
        SYNTHETIC_NAME.to_owned(),
        local.format("%d.%m.%Y").to_string(),
        occupied_now,
        shape,
        labels,
        cells,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime {
        DateTime::from_iso("2024-05-01T22:10:00Z").unwrap()
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = generate(7, GridShape::default(), reference(), &chrono_tz::UTC);
        let b = generate(7, GridShape::default(), reference(), &chrono_tz::UTC);

        assert_eq!(a, b);
    }

    #[test]
    fn test_pattern_ignores_reference_time() {
        let a = generate(3, GridShape::default(), reference(), &chrono_tz::UTC);
        let b = generate(
            3,
            GridShape::default(),
            DateTime::from_iso("2025-01-15T06:00:00Z").unwrap(),
            &chrono_tz::UTC,
        );

        assert_eq!(a.occupied_now(), b.occupied_now());
        let cells = |g: &TimeGrid| g.rows().iter().map(|r| r.cells().to_vec()).collect::<Vec<_>>();
        assert_eq!(cells(&a), cells(&b));
    }

    #[test]
    fn test_shape_and_metadata() {
        let shape = GridShape::new(4, 24).unwrap();
        let grid = generate(11, shape, reference(), &chrono_tz::UTC);

        assert_eq!(grid.name(), SYNTHETIC_NAME);
        assert_eq!(grid.date(), "01.05.2024");
        assert_eq!(grid.shape(), shape);
        assert_eq!(grid.rows().len(), 4);
        assert!(grid.rows().iter().all(|r| r.cells().len() == 24));
    }

    #[test]
    fn test_labels_wrap_at_midnight() {
        let grid = generate(1, GridShape::default(), reference(), &chrono_tz::UTC);

        let labels: Vec<&str> = grid.rows().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["22:00", "23:00", "00:00", "01:00"]);
    }

    #[test]
    fn test_labels_use_zone() {
        let grid = generate(1, GridShape::default(), reference(), &chrono_tz::Europe::Zurich);

        assert_eq!(grid.rows()[0].label(), "00:00");
        assert_eq!(grid.date(), "02.05.2024");
    }
}
