//! Plan mutation engine.
//!
//! Applies a [`ModificationRequest`] to a workout plan and reports what
//! changed. The caller's plan is never touched: every call works on a clone
//! and hands back the modified copy together with one adjustment record per
//! affected exercise and an impact analysis.
//!
//! Mutations never fail. An incoherent result (a plan without days, or a
//! day without exercises) is still returned, flagged through
//! `ImpactAnalysis::coherence_maintained`.

use crate::intent::{
    DEFAULT_INTENSITY_DECREASE, DEFAULT_LOAD_INCREASE, DEFAULT_LOAD_REDUCTION,
    DEFAULT_VOLUME_DECREASE,
};
use crate::{
    AdjustmentType, ExerciseTarget, ImpactAnalysis, ModificationKind, ModificationRequest,
    ProgressionAdjustment, WorkoutPlan,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note appended to every swapped exercise
pub const REALTIME_NOTE: &str = "Modificado en tiempo real";

const EXERCISE_CHANGE_CONFIDENCE: f64 = 0.9;
const LOAD_CONFIDENCE: f64 = 0.85;
const INTENSITY_CONFIDENCE: f64 = 0.8;
const VOLUME_CONFIDENCE: f64 = 0.85;

/// Result of applying one request to a plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub modified_plan: WorkoutPlan,
    pub adjustments: Vec<ProgressionAdjustment>,
    pub impact_analysis: ImpactAnalysis,
}

/// Applies modification requests to workout plans
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanMutationEngine;

impl PlanMutationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply `request` to a copy of `plan`, stamping `updated_at` with now
    pub fn mutate(&self, plan: &WorkoutPlan, request: &ModificationRequest) -> MutationOutcome {
        self.mutate_at(plan, request, Utc::now())
    }

    /// Apply `request` to a copy of `plan`, stamping `updated_at` with `now`
    pub fn mutate_at(
        &self,
        plan: &WorkoutPlan,
        request: &ModificationRequest,
        now: DateTime<Utc>,
    ) -> MutationOutcome {
        let mut modified = plan.clone();

        let (adjustments, net_change) = match request.kind {
            ModificationKind::ExerciseChange => {
                let target = request.target.unwrap_or_default();
                (change_exercise(&mut modified, request, target), 0)
            }
            ModificationKind::LoadReduction => {
                let pct = -request
                    .value
                    .map(i32::saturating_abs)
                    .unwrap_or(DEFAULT_LOAD_REDUCTION);
                (annotate_load(&mut modified, pct, request), pct)
            }
            ModificationKind::LoadIncrease => {
                let pct = request
                    .value
                    .map(i32::saturating_abs)
                    .unwrap_or(DEFAULT_LOAD_INCREASE);
                (annotate_load(&mut modified, pct, request), pct)
            }
            ModificationKind::IntensityChange => {
                let pct = request.value.unwrap_or(DEFAULT_INTENSITY_DECREASE);
                (annotate_intensity(&mut modified, pct, request), pct)
            }
            ModificationKind::VolumeChange => {
                let pct = request.value.unwrap_or(DEFAULT_VOLUME_DECREASE);
                (scale_volume(&mut modified, pct, request), pct)
            }
            ModificationKind::None => (Vec::new(), 0),
        };

        let coherence_maintained = ensure_global_coherence(&mut modified, plan, now);
        let impact_analysis =
            analyze_impact(request.kind, net_change, &adjustments, coherence_maintained);

        if coherence_maintained {
            tracing::info!(
                "Applied {} to plan {}: {} adjustments",
                request.kind,
                plan.id,
                adjustments.len()
            );
        } else {
            tracing::warn!(
                "Applied {} to plan {} but the result is incoherent",
                request.kind,
                plan.id
            );
        }

        MutationOutcome {
            modified_plan: modified,
            adjustments,
            impact_analysis,
        }
    }
}

fn reason_for(request: &ModificationRequest, fallback: String) -> String {
    request
        .details
        .as_ref()
        .filter(|d| !d.trim().is_empty())
        .cloned()
        .unwrap_or(fallback)
}

/// Swap a single exercise; other exercises are left alone
fn change_exercise(
    plan: &mut WorkoutPlan,
    request: &ModificationRequest,
    target: ExerciseTarget,
) -> Vec<ProgressionAdjustment> {
    let Some(exercise) = plan
        .days
        .get_mut(target.day)
        .and_then(|day| day.exercises.get_mut(target.exercise))
    else {
        tracing::warn!(
            "Exercise change target (day {}, exercise {}) not found in plan {}",
            target.day,
            target.exercise,
            plan.id
        );
        return Vec::new();
    };

    let previous = exercise.name.clone();
    let replacement = request
        .exercise_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Variación de {}", previous));

    exercise.name = replacement.clone();
    exercise.append_note(&format!("{}: sustituye a {}", REALTIME_NOTE, previous));

    tracing::debug!("Swapped exercise {} -> {}", previous, replacement);

    vec![ProgressionAdjustment {
        exercise_name: replacement.clone(),
        adjustment_type: AdjustmentType::Volume,
        value: 0,
        reason: reason_for(
            request,
            format!("Sustitución de {} por {}", previous, replacement),
        ),
        confidence: EXERCISE_CHANGE_CONFIDENCE,
        applied: true,
    }]
}

/// Annotate every exercise with a signed change and record it
fn annotate_all(
    plan: &mut WorkoutPlan,
    adjustment_type: AdjustmentType,
    pct: i32,
    label: &str,
    confidence: f64,
    request: &ModificationRequest,
) -> Vec<ProgressionAdjustment> {
    let reason = reason_for(request, format!("{} {:+}% solicitado", label, pct));

    plan.exercises_mut()
        .map(|exercise| {
            exercise.append_note(&format!("{} {:+}% (ajuste en tiempo real)", label, pct));
            tracing::debug!("{} {:+}% on {}", label, pct, exercise.name);

            ProgressionAdjustment {
                exercise_name: exercise.name.clone(),
                adjustment_type,
                value: pct,
                reason: reason.clone(),
                confidence,
                applied: true,
            }
        })
        .collect()
}

fn annotate_load(
    plan: &mut WorkoutPlan,
    pct: i32,
    request: &ModificationRequest,
) -> Vec<ProgressionAdjustment> {
    annotate_all(plan, AdjustmentType::Weight, pct, "Carga", LOAD_CONFIDENCE, request)
}

fn annotate_intensity(
    plan: &mut WorkoutPlan,
    pct: i32,
    request: &ModificationRequest,
) -> Vec<ProgressionAdjustment> {
    annotate_all(
        plan,
        AdjustmentType::Intensity,
        pct,
        "Intensidad",
        INTENSITY_CONFIDENCE,
        request,
    )
}

/// New set count after scaling by `pct`; never below one set
pub fn scaled_sets(sets: u32, pct: i32) -> u32 {
    let scaled = (f64::from(sets) * (1.0 + f64::from(pct) / 100.0)).round();
    scaled.max(1.0) as u32
}

fn scale_volume(
    plan: &mut WorkoutPlan,
    pct: i32,
    request: &ModificationRequest,
) -> Vec<ProgressionAdjustment> {
    let reason = reason_for(request, format!("Volumen {:+}% solicitado", pct));

    plan.exercises_mut()
        .map(|exercise| {
            let before = exercise.sets;
            let after = scaled_sets(before, pct);
            exercise.sets = after;
            exercise.append_note(&format!("Series {} → {} ({:+}%)", before, after, pct));
            tracing::debug!("Volume {:+}% on {}: {} -> {} sets", pct, exercise.name, before, after);

            ProgressionAdjustment {
                exercise_name: exercise.name.clone(),
                adjustment_type: AdjustmentType::Volume,
                value: pct,
                reason: reason.clone(),
                confidence: VOLUME_CONFIDENCE,
                applied: true,
            }
        })
        .collect()
}

/// Check structural coherence and backfill scalar fields from `original`
///
/// Returns false when the plan has no days or a day has no exercises. The
/// plan is returned either way; removed days or exercises are never
/// fabricated back. `updated_at` is always refreshed to `now`.
pub fn ensure_global_coherence(
    modified: &mut WorkoutPlan,
    original: &WorkoutPlan,
    now: DateTime<Utc>,
) -> bool {
    let coherent =
        !modified.days.is_empty() && modified.days.iter().all(|day| !day.exercises.is_empty());

    if modified.focus.is_empty() {
        modified.focus = original.focus.clone();
    }
    if modified.equipment.is_empty() {
        modified.equipment = original.equipment.clone();
    }
    if modified.duration == 0 {
        modified.duration = original.duration;
    }
    modified.updated_at = now;

    coherent
}

fn analyze_impact(
    kind: ModificationKind,
    net_change: i32,
    adjustments: &[ProgressionAdjustment],
    coherence_maintained: bool,
) -> ImpactAnalysis {
    let mut ecosystem_impact =
        vec!["El módulo de progresión se resincronizará con el plan modificado".to_string()];

    let scales_load = matches!(
        kind,
        ModificationKind::LoadReduction
            | ModificationKind::LoadIncrease
            | ModificationKind::IntensityChange
            | ModificationKind::VolumeChange
    );

    if scales_load && net_change > 0 {
        ecosystem_impact.push(format!(
            "Se requiere tiempo de recuperación adicional tras el aumento de {:+}%",
            net_change
        ));
        ecosystem_impact
            .push("Aumenta la necesidad calórica: revisar el plan de nutrición".to_string());
    }
    if scales_load && net_change < 0 {
        ecosystem_impact.push(format!(
            "La recuperación debería ser más sencilla tras la reducción de {}%",
            net_change.saturating_abs()
        ));
    }

    ecosystem_impact.push(
        "Las lecturas del wearable se reinterpretarán según la nueva carga de entrenamiento"
            .to_string(),
    );

    ImpactAnalysis {
        affected_exercises: adjustments.iter().map(|a| a.exercise_name.clone()).collect(),
        ecosystem_impact,
        coherence_maintained,
    }
}
