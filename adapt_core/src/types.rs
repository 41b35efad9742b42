//! Core domain types for the adaptive training engine.
//!
//! This module defines the plain data the engine consumes and produces:
//! - Workout plans, days and exercises
//! - Modification requests and progression adjustments
//! - Wearable snapshots and the insight vector derived from them
//! - The caller context handed to the recommendation synthesizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Workout Plan Types
// ============================================================================

/// A single exercise prescription within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Rep range, e.g. "8-12"
    pub reps: String,
    /// Rest between sets, in seconds
    pub rest: u32,
    #[serde(default)]
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    /// Append a sentence to the exercise notes, keeping earlier notes intact
    pub fn append_note(&mut self, note: &str) {
        let updated = match self.notes.take() {
            Some(existing) if !existing.trim().is_empty() => format!("{}. {}", existing, note),
            _ => note.to_string(),
        };
        self.notes = Some(updated);
    }
}

/// One training day of a plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub focus: String,
    pub exercises: Vec<Exercise>,
}

/// A structured workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub focus: Vec<String>,
    pub days: Vec<DayPlan>,
    /// Session duration in minutes
    #[serde(default)]
    pub duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl WorkoutPlan {
    /// Total number of exercises across all days
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    /// Iterate over every exercise in day order
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.days.iter().flat_map(|d| d.exercises.iter())
    }

    /// Iterate mutably over every exercise in day order
    pub fn exercises_mut(&mut self) -> impl Iterator<Item = &mut Exercise> {
        self.days.iter_mut().flat_map(|d| d.exercises.iter_mut())
    }
}

// ============================================================================
// Modification Requests
// ============================================================================

/// Kind of change a request asks for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    ExerciseChange,
    LoadReduction,
    LoadIncrease,
    IntensityChange,
    VolumeChange,
    /// No change. Unknown kinds deserialize here.
    #[default]
    #[serde(other)]
    None,
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ExerciseChange => "exercise_change",
            Self::LoadReduction => "load_reduction",
            Self::LoadIncrease => "load_increase",
            Self::IntensityChange => "intensity_change",
            Self::VolumeChange => "volume_change",
            Self::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// Position of an exercise inside a plan (day index, exercise index)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExerciseTarget {
    pub day: usize,
    pub exercise: usize,
}

/// A typed intent to change a workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ModificationRequest {
    #[serde(rename = "type", default)]
    pub kind: ModificationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    /// Signed percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Exercise to swap for `exercise_change`; first exercise of the first day when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ExerciseTarget>,
}

impl ModificationRequest {
    pub fn new(kind: ModificationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A request that changes nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_exercise_name(mut self, name: impl Into<String>) -> Self {
        self.exercise_name = Some(name.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_target(mut self, target: ExerciseTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn is_none(&self) -> bool {
        self.kind == ModificationKind::None
    }
}

// ============================================================================
// Progression Adjustments
// ============================================================================

/// What a recorded adjustment changed
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Weight,
    Volume,
    Intensity,
    Deload,
}

/// One change applied to one exercise by a mutation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionAdjustment {
    pub exercise_name: String,
    pub adjustment_type: AdjustmentType,
    /// Signed percentage
    pub value: i32,
    pub reason: String,
    /// In [0, 1]
    pub confidence: f64,
    pub applied: bool,
}

/// Cross-module consequences of a mutation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ImpactAnalysis {
    pub affected_exercises: Vec<String>,
    pub ecosystem_impact: Vec<String>,
    pub coherence_maintained: bool,
}

// ============================================================================
// Wearable Snapshot
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SleepData {
    /// Hours asleep
    pub duration: f64,
    /// 0-100
    pub quality: f64,
    pub deep_sleep: Option<f64>,
    pub rem_sleep: Option<f64>,
    pub efficiency: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ActivityData {
    pub steps: u32,
    pub active_minutes: u32,
    pub calories_burned: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RecoveryData {
    /// Milliseconds (RMSSD)
    pub hrv: f64,
    pub resting_heart_rate: f64,
    /// 0-100
    pub stress: f64,
    /// Device-reported score; the engine computes its own
    pub recovery_score: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GlucoseData {
    pub current: f64,
    /// Percentage of the day inside the target range
    pub time_in_range: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct HydrationData {
    /// 0-100
    pub level: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct VitalsData {
    pub blood_pressure: BloodPressure,
    pub glucose: GlucoseData,
    pub hydration: HydrationData,
    pub body_temperature: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PerformanceData {
    pub vo2_max: Option<f64>,
    pub training_load: Option<f64>,
}

/// A point-in-time reading from a wearable device
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct WearableSnapshot {
    pub recorded_at: Option<DateTime<Utc>>,
    pub sleep: SleepData,
    pub activity: ActivityData,
    pub recovery: RecoveryData,
    pub vitals: VitalsData,
    pub performance: PerformanceData,
}

// ============================================================================
// Insight Vector
// ============================================================================

/// Five-step status scale shared by HRV, sleep and recovery
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Optimal,
    Good,
    Fair,
    Poor,
    Critical,
}

impl StatusLevel {
    /// Optimal or good
    pub fn is_favourable(self) -> bool {
        matches!(self, Self::Optimal | Self::Good)
    }

    /// Poor or critical
    pub fn is_compromised(self) -> bool {
        matches!(self, Self::Poor | Self::Critical)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl StressLevel {
    /// High or extreme
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::High | Self::Extreme)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrainingReadiness {
    Ready,
    Caution,
    Rest,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    High,
    Moderate,
    Low,
    VeryLow,
}

/// Categorical summary of a wearable snapshot
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InsightVector {
    pub recovery_score: u8,
    pub hrv_status: StatusLevel,
    pub sleep_quality: StatusLevel,
    pub recovery_status: StatusLevel,
    pub stress_level: StressLevel,
    pub training_readiness: TrainingReadiness,
    pub energy_level: EnergyLevel,
    pub rpe_adjustment_needed: bool,
    pub volume_adjustment_needed: bool,
    pub intensity_adjustment_needed: bool,
    pub rest_adjustment_needed: bool,
    pub nutrition_adjustment_needed: bool,
}

// ============================================================================
// Caller Context
// ============================================================================

/// Data the caller hands to the recommendation synthesizer
///
/// Collaborator-owned records (progression plans, nutrition data) are kept
/// opaque and passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrainingContext {
    pub active_workout: Option<WorkoutPlan>,
    pub recovery_status: Option<serde_json::Value>,
    pub progression_plans: Vec<serde_json::Value>,
    pub nutrition_data: Option<serde_json::Value>,
    pub user_habits: Vec<String>,
}

impl TrainingContext {
    pub fn with_active_workout(plan: WorkoutPlan) -> Self {
        Self {
            active_workout: Some(plan),
            ..Self::default()
        }
    }
}
