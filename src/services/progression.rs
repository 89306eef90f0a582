//! Week-over-week progressive overload rules for a training block.
//!
//! A mesocycle is seven weeks: six overload weeks followed by one deload
//! week. Weight climbs 2.5% per overload week and every prescription is
//! rounded to the nearest plate increment. The deload week drops intensity
//! to 60% and halves the set count.

/// Total weeks in a generated block, deload included.
pub const MESOCYCLE_WEEKS: i16 = 7;
/// The deload is always the final week.
pub const DELOAD_WEEK: i16 = MESOCYCLE_WEEKS;
/// Smallest weight step the gym's plates allow.
pub const WEIGHT_INCREMENT: f64 = 2.5;

const WEEKLY_OVERLOAD_PCT: f64 = 0.025;
const DELOAD_WEIGHT_PCT: f64 = 0.60;

/// What one exercise looks like on one day of a given week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prescription {
    pub sets: i16,
    pub reps: i16,
    pub weight: f64,
}

/// Round a weight to the nearest multiple of [`WEIGHT_INCREMENT`], half-up.
pub fn round_to_increment(weight: f64) -> f64 {
    (weight / WEIGHT_INCREMENT).round() * WEIGHT_INCREMENT
}

/// Compute the prescription for `week` (1-based) from the plan's baseline.
///
/// Weeks 1-6 scale weight up 2.5% per week and add a rep from week 4.
/// Week 7 is the deload: 60% weight, baseline reps, half the sets.
/// Bodyweight exercises (baseline weight 0) stay at 0 throughout.
pub fn prescribe(base_sets: i16, base_reps: i16, base_weight: f64, week: i16) -> Prescription {
    debug_assert!((1..=MESOCYCLE_WEEKS).contains(&week));

    if week == DELOAD_WEEK {
        return Prescription {
            sets: ((base_sets + 1) / 2).max(1),
            reps: base_reps,
            weight: deload_weight(base_weight),
        };
    }

    let scaled = base_weight * (1.0 + WEEKLY_OVERLOAD_PCT * f64::from(week - 1));
    Prescription {
        sets: base_sets,
        reps: base_reps + (week - 1) / 3,
        weight: round_to_increment(scaled),
    }
}

fn deload_weight(base_weight: f64) -> f64 {
    if base_weight == 0.0 {
        return 0.0;
    }
    // A loaded bar never deloads below one increment.
    round_to_increment(base_weight * DELOAD_WEIGHT_PCT).max(WEIGHT_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn week_one_matches_the_baseline() {
        let p = prescribe(3, 8, 135.0, 1);
        assert_eq!(
            p,
            Prescription {
                sets: 3,
                reps: 8,
                weight: 135.0
            }
        );
    }

    #[test]
    fn weight_climbs_each_overload_week() {
        let weights: Vec<f64> = (1..DELOAD_WEEK)
            .map(|week| prescribe(3, 8, 200.0, week).weight)
            .collect();
        // 2.5% of 200 is a clean increment, so each week steps by 5.0
        assert_eq!(weights, vec![200.0, 205.0, 210.0, 215.0, 220.0, 225.0]);
    }

    #[test]
    fn progression_weight_is_rounded_to_nearest_increment() {
        // 100 * 1.025 = 102.5 exactly; 100 * 1.05 = 105.0; but
        // 67.5 * 1.025 = 69.1875 which must round to 70.0
        assert_eq!(prescribe(3, 8, 67.5, 2).weight, 70.0);
        // 52.5 * 1.075 = 56.4375 rounds up to 57.5
        assert_eq!(prescribe(3, 8, 52.5, 4).weight, 57.5);
    }

    #[test]
    fn extra_rep_arrives_at_week_four() {
        assert_eq!(prescribe(3, 8, 100.0, 3).reps, 8);
        assert_eq!(prescribe(3, 8, 100.0, 4).reps, 9);
        assert_eq!(prescribe(3, 8, 100.0, 6).reps, 9);
    }

    #[test]
    fn deload_week_reduces_volume_and_intensity() {
        let base = prescribe(4, 8, 200.0, 1);
        let deload = prescribe(4, 8, 200.0, DELOAD_WEEK);

        assert_eq!(deload.sets, 2);
        assert_eq!(deload.reps, 8);
        assert_eq!(deload.weight, 120.0);
        assert!(deload.sets < base.sets);
        assert!(deload.weight < base.weight);
    }

    #[test]
    fn deload_set_count_rounds_up_and_never_hits_zero() {
        assert_eq!(prescribe(5, 8, 100.0, DELOAD_WEEK).sets, 3);
        assert_eq!(prescribe(1, 8, 100.0, DELOAD_WEEK).sets, 1);
    }

    #[test]
    fn deload_weight_floors_at_one_increment() {
        // 60% of 2.5 rounds to 2.5, not 0
        assert_eq!(prescribe(3, 12, 2.5, DELOAD_WEEK).weight, 2.5);
    }

    #[test]
    fn bodyweight_exercises_stay_unweighted() {
        for week in 1..=MESOCYCLE_WEEKS {
            assert_eq!(prescribe(3, 12, 0.0, week).weight, 0.0);
        }
    }

    proptest! {
        #[test]
        fn prescribed_weight_is_always_a_non_negative_increment_multiple(
            base_weight in 0.0f64..1000.0,
            base_sets in 1i16..=10,
            base_reps in 1i16..=50,
            week in 1i16..=MESOCYCLE_WEEKS,
        ) {
            let p = prescribe(base_sets, base_reps, base_weight, week);
            prop_assert!(p.weight >= 0.0);
            prop_assert!(p.sets >= 1);
            let remainder = (p.weight / WEIGHT_INCREMENT).fract().abs();
            prop_assert!(remainder < 1e-9 || (1.0 - remainder) < 1e-9);
        }
    }
}
