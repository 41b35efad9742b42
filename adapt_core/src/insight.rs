//! Biometric insight engine.
//!
//! Turns a wearable snapshot into an [`InsightVector`]:
//! - A weighted 0-100 recovery score (HRV, resting HR, sleep, stress, blood pressure)
//! - Categorical statuses read off threshold ladders
//! - Training readiness and energy level
//! - Flags telling the synthesizer which parts of training need adjusting

use crate::ladder::ThresholdLadder;
use crate::{
    BloodPressure, EnergyLevel, InsightVector, StatusLevel, StressLevel, TrainingReadiness,
    WearableSnapshot,
};

pub const HRV_LADDER: ThresholdLadder<StatusLevel> = ThresholdLadder::at_least(
    &[
        (70.0, StatusLevel::Optimal),
        (60.0, StatusLevel::Good),
        (50.0, StatusLevel::Fair),
        (40.0, StatusLevel::Poor),
    ],
    StatusLevel::Critical,
);

pub const SLEEP_LADDER: ThresholdLadder<StatusLevel> = ThresholdLadder::at_least(
    &[
        (85.0, StatusLevel::Optimal),
        (75.0, StatusLevel::Good),
        (60.0, StatusLevel::Fair),
        (45.0, StatusLevel::Poor),
    ],
    StatusLevel::Critical,
);

pub const STRESS_LADDER: ThresholdLadder<StressLevel> = ThresholdLadder::at_most(
    &[
        (30.0, StressLevel::Low),
        (50.0, StressLevel::Moderate),
        (75.0, StressLevel::High),
    ],
    StressLevel::Extreme,
);

pub const RECOVERY_LADDER: ThresholdLadder<StatusLevel> = ThresholdLadder::at_least(
    &[
        (85.0, StatusLevel::Optimal),
        (70.0, StatusLevel::Good),
        (50.0, StatusLevel::Fair),
        (30.0, StatusLevel::Poor),
    ],
    StatusLevel::Critical,
);

pub const ENERGY_LADDER: ThresholdLadder<EnergyLevel> = ThresholdLadder::at_least(
    &[
        (80.0, EnergyLevel::High),
        (65.0, EnergyLevel::Moderate),
        (50.0, EnergyLevel::Low),
    ],
    EnergyLevel::VeryLow,
);

/// HRV (ms) that earns the full HRV share of the recovery score
const HRV_REFERENCE_MS: f64 = 70.0;
/// Resting heart rate above which the RHR share starts shrinking
const RHR_REFERENCE_BPM: f64 = 60.0;

/// Recovery score at or above which the athlete may train hard
const READY_SCORE: u8 = 75;
/// Recovery score below which the athlete should rest
const REST_SCORE: u8 = 50;

const RPE_ADJUST_BELOW: u8 = 60;
const VOLUME_ADJUST_BELOW: u8 = 55;
const INTENSITY_ADJUST_BELOW: u8 = 65;
/// Glucose time in range (%) below which nutrition needs attention
pub const GLUCOSE_TIME_IN_RANGE_MIN: f64 = 70.0;
/// Hydration level (%) below which nutrition needs attention
pub const HYDRATION_LEVEL_MIN: f64 = 75.0;

/// Derives categorical insights from wearable snapshots
#[derive(Clone, Debug)]
pub struct BiometricInsightEngine {
    hrv: ThresholdLadder<StatusLevel>,
    sleep: ThresholdLadder<StatusLevel>,
    stress: ThresholdLadder<StressLevel>,
    recovery: ThresholdLadder<StatusLevel>,
    energy: ThresholdLadder<EnergyLevel>,
}

impl Default for BiometricInsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BiometricInsightEngine {
    pub fn new() -> Self {
        Self {
            hrv: HRV_LADDER,
            sleep: SLEEP_LADDER,
            stress: STRESS_LADDER,
            recovery: RECOVERY_LADDER,
            energy: ENERGY_LADDER,
        }
    }

    /// Summarize a snapshot as an insight vector
    pub fn analyze(&self, snapshot: &WearableSnapshot) -> InsightVector {
        let score = self.calculate_recovery_score(snapshot);
        let sleep_pct = snapshot.sleep.quality;
        let stress_pct = snapshot.recovery.stress;

        let hrv_status = self.hrv.classify(snapshot.recovery.hrv);
        let sleep_quality = self.sleep.classify(sleep_pct);
        let stress_level = self.stress.classify(stress_pct);
        let recovery_status = self.recovery.classify(f64::from(score));
        let training_readiness = readiness(score, stress_level, sleep_quality);

        let energy_avg = (f64::from(score) + sleep_pct + (100.0 - stress_pct)) / 3.0;
        let energy_level = self.energy.classify(energy_avg);

        let vitals = &snapshot.vitals;
        let insights = InsightVector {
            recovery_score: score,
            hrv_status,
            sleep_quality,
            recovery_status,
            stress_level,
            training_readiness,
            energy_level,
            rpe_adjustment_needed: score < RPE_ADJUST_BELOW,
            volume_adjustment_needed: score < VOLUME_ADJUST_BELOW,
            intensity_adjustment_needed: score < INTENSITY_ADJUST_BELOW
                || stress_level.is_elevated(),
            rest_adjustment_needed: sleep_quality.is_compromised() || stress_level.is_elevated(),
            nutrition_adjustment_needed: vitals.glucose.time_in_range < GLUCOSE_TIME_IN_RANGE_MIN
                || vitals.hydration.level < HYDRATION_LEVEL_MIN,
        };

        tracing::debug!(
            "Analyzed snapshot: score {}, readiness {:?}, energy {:?}",
            score,
            training_readiness,
            energy_level
        );

        insights
    }

    /// Weighted recovery composite in [0, 100]
    ///
    /// | Component | Max | Formula |
    /// |-----------|-----|---------|
    /// | HRV       | 30  | `hrv / 70 * 30` |
    /// | RHR       | 20  | `20 - max(0, rhr - 60) * 0.5` |
    /// | Sleep     | 25  | `quality / 100 * 25` |
    /// | Stress    | 15  | `15 - stress / 100 * 15` |
    /// | BP        | 10  | 10 under 120/80, 5 under 140/90 |
    pub fn calculate_recovery_score(&self, snapshot: &WearableSnapshot) -> u8 {
        let recovery = &snapshot.recovery;

        let hrv_score = (recovery.hrv / HRV_REFERENCE_MS * 30.0).min(100.0);
        let rhr_score =
            (20.0 - (recovery.resting_heart_rate - RHR_REFERENCE_BPM).max(0.0) * 0.5).max(0.0);
        let sleep_score = snapshot.sleep.quality / 100.0 * 25.0;
        let stress_score = 15.0 - recovery.stress / 100.0 * 15.0;
        let bp_score = blood_pressure_score(&snapshot.vitals.blood_pressure);

        let total = hrv_score + rhr_score + sleep_score + stress_score + bp_score;
        if total.is_nan() {
            tracing::warn!("Recovery score inputs produced NaN, scoring as 0");
            return 0;
        }
        total.round().clamp(0.0, 100.0) as u8
    }
}

fn blood_pressure_score(bp: &BloodPressure) -> f64 {
    if bp.systolic < 120.0 && bp.diastolic < 80.0 {
        10.0
    } else if bp.systolic < 140.0 && bp.diastolic < 90.0 {
        5.0
    } else {
        0.0
    }
}

fn readiness(score: u8, stress: StressLevel, sleep: StatusLevel) -> TrainingReadiness {
    if score >= READY_SCORE && stress == StressLevel::Low && !sleep.is_compromised() {
        TrainingReadiness::Ready
    } else if score < REST_SCORE || stress == StressLevel::Extreme {
        TrainingReadiness::Rest
    } else {
        TrainingReadiness::Caution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::rested_snapshot;

    fn snapshot(hrv: f64, rhr: f64, sleep: f64, stress: f64) -> WearableSnapshot {
        let mut s = rested_snapshot();
        s.recovery.hrv = hrv;
        s.recovery.resting_heart_rate = rhr;
        s.sleep.quality = sleep;
        s.recovery.stress = stress;
        s
    }

    #[test]
    fn test_moderate_snapshot_scores_between_80_and_90() {
        let engine = BiometricInsightEngine::new();
        let s = snapshot(65.0, 58.0, 85.0, 45.0);

        let score = engine.calculate_recovery_score(&s);
        assert!(score > 80 && score < 90, "score was {}", score);
        assert_eq!(score, 87);

        let insights = engine.analyze(&s);
        assert_eq!(insights.recovery_score, 87);
        assert_eq!(insights.recovery_status, StatusLevel::Optimal);
        assert_eq!(insights.stress_level, StressLevel::Moderate);
        assert_eq!(insights.training_readiness, TrainingReadiness::Caution);
    }

    #[test]
    fn test_low_hrv_is_critical() {
        let engine = BiometricInsightEngine::new();
        let mut s = rested_snapshot();
        s.recovery.hrv = 35.0;

        assert_eq!(engine.analyze(&s).hrv_status, StatusLevel::Critical);
    }

    #[test]
    fn test_extreme_stress_forces_intensity_adjustment() {
        let engine = BiometricInsightEngine::new();
        let mut s = rested_snapshot();
        s.recovery.stress = 85.0;

        let insights = engine.analyze(&s);
        assert_eq!(insights.stress_level, StressLevel::Extreme);
        assert!(insights.intensity_adjustment_needed);
        assert!(insights.rest_adjustment_needed);
        assert_eq!(insights.training_readiness, TrainingReadiness::Rest);
    }

    #[test]
    fn test_rested_athlete_is_ready() {
        let engine = BiometricInsightEngine::new();
        let insights = engine.analyze(&rested_snapshot());

        assert_eq!(insights.recovery_score, 97);
        assert_eq!(insights.training_readiness, TrainingReadiness::Ready);
        assert_eq!(insights.energy_level, EnergyLevel::High);
        assert!(!insights.rpe_adjustment_needed);
        assert!(!insights.volume_adjustment_needed);
        assert!(!insights.intensity_adjustment_needed);
        assert!(!insights.rest_adjustment_needed);
        assert!(!insights.nutrition_adjustment_needed);
    }

    #[test]
    fn test_hrv_ladder_boundaries() {
        assert_eq!(HRV_LADDER.classify(70.0), StatusLevel::Optimal);
        assert_eq!(HRV_LADDER.classify(69.0), StatusLevel::Good);
        assert_eq!(HRV_LADDER.classify(60.0), StatusLevel::Good);
        assert_eq!(HRV_LADDER.classify(59.0), StatusLevel::Fair);
        assert_eq!(HRV_LADDER.classify(50.0), StatusLevel::Fair);
        assert_eq!(HRV_LADDER.classify(49.0), StatusLevel::Poor);
        assert_eq!(HRV_LADDER.classify(40.0), StatusLevel::Poor);
        assert_eq!(HRV_LADDER.classify(39.0), StatusLevel::Critical);
    }

    #[test]
    fn test_sleep_and_stress_ladder_boundaries() {
        assert_eq!(SLEEP_LADDER.classify(85.0), StatusLevel::Optimal);
        assert_eq!(SLEEP_LADDER.classify(84.0), StatusLevel::Good);
        assert_eq!(SLEEP_LADDER.classify(74.0), StatusLevel::Fair);
        assert_eq!(SLEEP_LADDER.classify(59.0), StatusLevel::Poor);
        assert_eq!(SLEEP_LADDER.classify(44.0), StatusLevel::Critical);

        assert_eq!(STRESS_LADDER.classify(30.0), StressLevel::Low);
        assert_eq!(STRESS_LADDER.classify(31.0), StressLevel::Moderate);
        assert_eq!(STRESS_LADDER.classify(50.0), StressLevel::Moderate);
        assert_eq!(STRESS_LADDER.classify(51.0), StressLevel::High);
        assert_eq!(STRESS_LADDER.classify(75.0), StressLevel::High);
        assert_eq!(STRESS_LADDER.classify(76.0), StressLevel::Extreme);
    }

    #[test]
    fn test_recovery_and_energy_ladder_boundaries() {
        assert_eq!(RECOVERY_LADDER.classify(85.0), StatusLevel::Optimal);
        assert_eq!(RECOVERY_LADDER.classify(84.0), StatusLevel::Good);
        assert_eq!(RECOVERY_LADDER.classify(70.0), StatusLevel::Good);
        assert_eq!(RECOVERY_LADDER.classify(69.0), StatusLevel::Fair);
        assert_eq!(RECOVERY_LADDER.classify(50.0), StatusLevel::Fair);
        assert_eq!(RECOVERY_LADDER.classify(49.0), StatusLevel::Poor);
        assert_eq!(RECOVERY_LADDER.classify(30.0), StatusLevel::Poor);
        assert_eq!(RECOVERY_LADDER.classify(29.0), StatusLevel::Critical);

        assert_eq!(ENERGY_LADDER.classify(80.0), EnergyLevel::High);
        assert_eq!(ENERGY_LADDER.classify(79.9), EnergyLevel::Moderate);
        assert_eq!(ENERGY_LADDER.classify(65.0), EnergyLevel::Moderate);
        assert_eq!(ENERGY_LADDER.classify(64.9), EnergyLevel::Low);
        assert_eq!(ENERGY_LADDER.classify(50.0), EnergyLevel::Low);
        assert_eq!(ENERGY_LADDER.classify(49.9), EnergyLevel::VeryLow);
    }

    #[test]
    fn test_poor_sleep_blocks_ready() {
        let engine = BiometricInsightEngine::new();
        // 42.86 + 20 + 12.5 + 12 + 10 = 97.36
        let insights = engine.analyze(&snapshot(100.0, 52.0, 50.0, 20.0));

        assert_eq!(insights.recovery_score, 97);
        assert_eq!(insights.stress_level, StressLevel::Low);
        assert_eq!(insights.sleep_quality, StatusLevel::Poor);
        assert_eq!(insights.training_readiness, TrainingReadiness::Caution);

        let insights = engine.analyze(&snapshot(100.0, 52.0, 40.0, 20.0));
        assert_eq!(insights.sleep_quality, StatusLevel::Critical);
        assert_eq!(insights.training_readiness, TrainingReadiness::Caution);
    }

    #[test]
    fn test_low_score_alone_forces_rest() {
        let engine = BiometricInsightEngine::new();
        // 4.5 + 0 + 22.5 + 12 + 10 = 49
        let insights = engine.analyze(&snapshot(10.5, 100.0, 90.0, 20.0));

        assert_eq!(insights.recovery_score, 49);
        assert_eq!(insights.stress_level, StressLevel::Low);
        assert_eq!(insights.sleep_quality, StatusLevel::Optimal);
        assert_eq!(insights.training_readiness, TrainingReadiness::Rest);

        // 5.5 + 0 + 22.5 + 12 + 10 = 50
        let insights = engine.analyze(&snapshot(70.0 * 5.5 / 30.0, 100.0, 90.0, 20.0));
        assert_eq!(insights.recovery_score, 50);
        assert_eq!(insights.training_readiness, TrainingReadiness::Caution);
    }

    #[test]
    fn test_every_integer_maps_to_one_category() {
        for ladder in [HRV_LADDER, SLEEP_LADDER, RECOVERY_LADDER] {
            assert!(ladder.is_sorted());
            let mut previous = ladder.classify(0.0);
            for value in 0..=100 {
                let current = ladder.classify(f64::from(value));
                // Categories only ever improve as the reading rises
                assert!(current as u8 <= previous as u8);
                previous = current;
            }
        }
        assert!(STRESS_LADDER.is_sorted());
        assert!(ENERGY_LADDER.is_sorted());
    }

    #[test]
    fn test_recovery_score_stays_in_range() {
        let engine = BiometricInsightEngine::new();
        for hrv in [0.0, 20.0, 70.0, 150.0, 400.0] {
            for rhr in [35.0, 60.0, 90.0, 140.0] {
                for pct in [0.0, 50.0, 100.0] {
                    let s = snapshot(hrv, rhr, pct, 100.0 - pct);
                    let score = engine.calculate_recovery_score(&s);
                    assert!(score <= 100);
                }
            }
        }

        let mut s = snapshot(0.0, 200.0, 0.0, 100.0);
        s.vitals.blood_pressure = BloodPressure {
            systolic: 160.0,
            diastolic: 100.0,
        };
        assert_eq!(engine.calculate_recovery_score(&s), 0);
    }

    #[test]
    fn test_blood_pressure_bands() {
        let bp = |systolic, diastolic| BloodPressure {
            systolic,
            diastolic,
        };
        assert_eq!(blood_pressure_score(&bp(115.0, 75.0)), 10.0);
        assert_eq!(blood_pressure_score(&bp(120.0, 75.0)), 5.0);
        assert_eq!(blood_pressure_score(&bp(135.0, 85.0)), 5.0);
        assert_eq!(blood_pressure_score(&bp(135.0, 90.0)), 0.0);
    }

    #[test]
    fn test_low_score_sets_progressive_flags() {
        let engine = BiometricInsightEngine::new();
        // 12.86 + 20 + 13.75 + 9.75 + 10 = 66.36
        let s = snapshot(30.0, 55.0, 55.0, 35.0);
        let insights = engine.analyze(&s);

        assert_eq!(insights.recovery_score, 66);
        assert!(!insights.rpe_adjustment_needed);
        assert!(!insights.volume_adjustment_needed);
        assert!(!insights.intensity_adjustment_needed);
        assert!(insights.rest_adjustment_needed); // poor sleep

        // 8.57 + 20 + 12.5 + 9.75 + 10 = 60.82
        let s = snapshot(20.0, 55.0, 50.0, 35.0);
        let insights = engine.analyze(&s);
        assert_eq!(insights.recovery_score, 61);
        assert!(insights.intensity_adjustment_needed);
        assert!(!insights.rpe_adjustment_needed);

        // 4.29 + 20 + 12.5 + 9.75 + 10 = 56.54
        let s = snapshot(10.0, 55.0, 50.0, 35.0);
        let insights = engine.analyze(&s);
        assert_eq!(insights.recovery_score, 57);
        assert!(insights.rpe_adjustment_needed);
        assert!(!insights.volume_adjustment_needed);

        // 0 + 20 + 12.5 + 9.75 + 10 = 52.25
        let s = snapshot(0.0, 55.0, 50.0, 35.0);
        let insights = engine.analyze(&s);
        assert_eq!(insights.recovery_score, 52);
        assert!(insights.volume_adjustment_needed);
        assert_eq!(insights.training_readiness, TrainingReadiness::Caution);
    }

    #[test]
    fn test_nutrition_flag_from_vitals() {
        let engine = BiometricInsightEngine::new();
        let mut s = rested_snapshot();
        s.vitals.glucose.time_in_range = 65.0;
        assert!(engine.analyze(&s).nutrition_adjustment_needed);

        let mut s = rested_snapshot();
        s.vitals.hydration.level = 70.0;
        assert!(engine.analyze(&s).nutrition_adjustment_needed);
    }

    #[test]
    fn test_energy_level_from_average() {
        let engine = BiometricInsightEngine::new();
        // score 87, sleep 85, stress 45: (87 + 85 + 55) / 3 = 75.67
        let insights = engine.analyze(&snapshot(65.0, 58.0, 85.0, 45.0));
        assert_eq!(insights.energy_level, EnergyLevel::Moderate);

        // score 0, sleep 0, stress 100
        let insights = engine.analyze(&snapshot(0.0, 200.0, 0.0, 100.0));
        assert_eq!(insights.energy_level, EnergyLevel::VeryLow);
    }
}
