//! Recommendation synthesizer.
//!
//! Turns an [`InsightVector`] into advice and concrete actions:
//! - Recommendations in four independent buckets
//! - A risk assessment over three horizons
//! - One synthetic [`ModificationRequest`], realized against the active plan
//! - An [`ActionBundle`] of numeric rest/volume/intensity/nutrition/RPE decisions
//!
//! Every rule in the recommendation and risk tables fires on its own, so
//! several messages can land in the same bucket.

use crate::config::SynthesisConfig;
use crate::insight::{BiometricInsightEngine, GLUCOSE_TIME_IN_RANGE_MIN, HYDRATION_LEVEL_MIN};
use crate::mutation::{MutationOutcome, PlanMutationEngine};
use crate::{
    EnergyLevel, InsightVector, ModificationKind, ModificationRequest, StatusLevel, StressLevel,
    TrainingContext, TrainingReadiness, WearableSnapshot,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Output types
// ============================================================================

/// Advice grouped by area
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Recommendations {
    pub training: Vec<String>,
    pub recovery: Vec<String>,
    pub nutrition: Vec<String>,
    pub lifestyle: Vec<String>,
}

/// Risks grouped by horizon
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct RiskAssessment {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// The synthetic request and whatever it produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdjustmentPlan {
    pub request: ModificationRequest,
    /// Present when the context had an active plan and the request was not `none`
    pub workout: Option<MutationOutcome>,
    /// Caller nutrition data, passed through when nutrition needs adjusting
    pub nutrition: Option<serde_json::Value>,
    /// Caller progression plans, passed through when RPE needs adjusting
    pub progression: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RestRecommendation {
    pub should_rest: bool,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PercentageAdjustment {
    pub should_adjust: bool,
    /// Signed percentage
    pub percentage: i32,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutritionAdjustment {
    pub increase_carbohydrates: bool,
    pub increase_hydration: bool,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RpeModification {
    pub target_rpe: u8,
    pub reason: String,
}

/// Concrete decisions for one user derived from one snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionBundle {
    pub user_id: String,
    pub insights: InsightVector,
    pub rest_recommendation: RestRecommendation,
    pub volume_adjustment: PercentageAdjustment,
    pub intensity_adjustment: PercentageAdjustment,
    pub nutrition_adjustment: NutritionAdjustment,
    pub rpe_modification: RpeModification,
    pub workout: Option<MutationOutcome>,
}

/// Everything the synthesizer knows about one snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WellnessReport {
    pub insights: InsightVector,
    pub recommendations: Recommendations,
    pub risks: RiskAssessment,
    pub adjustments: AdjustmentPlan,
}

// ============================================================================
// Rule tables
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Training,
    Recovery,
    Nutrition,
    Lifestyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizon {
    Immediate,
    ShortTerm,
    LongTerm,
}

pub struct RecommendationRule {
    pub area: Area,
    pub applies: fn(&InsightVector, &TrainingContext) -> bool,
    pub message: &'static str,
}

pub struct RiskRule {
    pub horizon: Horizon,
    pub applies: fn(&InsightVector) -> bool,
    pub message: &'static str,
}

pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        area: Area::Training,
        applies: |i, _| i.training_readiness == TrainingReadiness::Rest,
        message: "Take a rest day: recovery markers do not support training today",
    },
    RecommendationRule {
        area: Area::Training,
        applies: |i, _| i.training_readiness == TrainingReadiness::Caution,
        message: "Train with caution: keep the session moderate and leave 2-3 reps in reserve",
    },
    RecommendationRule {
        area: Area::Training,
        applies: |i, _| i.training_readiness == TrainingReadiness::Ready,
        message: "You are ready to train: a demanding session is appropriate today",
    },
    RecommendationRule {
        area: Area::Training,
        applies: |i, _| i.volume_adjustment_needed,
        message: "Reduce training volume: drop one or two sets per exercise",
    },
    RecommendationRule {
        area: Area::Training,
        applies: |i, _| i.intensity_adjustment_needed,
        message: "Lower training intensity and cap effort around RPE 7",
    },
    RecommendationRule {
        area: Area::Recovery,
        applies: |i, _| !i.sleep_quality.is_favourable(),
        message: "Prioritise sleep: aim for 8 or more hours tonight",
    },
    RecommendationRule {
        area: Area::Recovery,
        applies: |i, _| i.hrv_status.is_compromised(),
        message: "HRV is depressed: favour active recovery such as walking or mobility work",
    },
    RecommendationRule {
        area: Area::Recovery,
        applies: |i, _| i.rest_adjustment_needed,
        message: "Extend rest periods between sets by 30-60 seconds",
    },
    RecommendationRule {
        area: Area::Recovery,
        applies: |i, _| i.recovery_status.is_compromised(),
        message: "Schedule an extra recovery day this week",
    },
    RecommendationRule {
        area: Area::Nutrition,
        applies: |i, _| i.nutrition_adjustment_needed,
        message: "Review carbohydrate timing and hydration around training",
    },
    RecommendationRule {
        area: Area::Nutrition,
        applies: |i, ctx| i.nutrition_adjustment_needed && ctx.nutrition_data.is_none(),
        message: "Log today's meals so fuelling can be matched to training",
    },
    RecommendationRule {
        area: Area::Nutrition,
        applies: |i, _| matches!(i.energy_level, EnergyLevel::Low | EnergyLevel::VeryLow),
        message: "Increase energy intake, especially carbohydrates before training",
    },
    RecommendationRule {
        area: Area::Nutrition,
        applies: |i, _| i.recovery_status.is_compromised(),
        message: "Prioritise protein intake to support tissue repair",
    },
    RecommendationRule {
        area: Area::Lifestyle,
        applies: |i, _| i.stress_level.is_elevated(),
        message: "Schedule stress-management time: breathing work, meditation or a walk outdoors",
    },
    RecommendationRule {
        area: Area::Lifestyle,
        applies: |i, _| i.sleep_quality.is_compromised(),
        message: "Keep a consistent bedtime and limit screens in the hour before sleep",
    },
    RecommendationRule {
        area: Area::Lifestyle,
        applies: |i, _| i.energy_level == EnergyLevel::VeryLow,
        message: "Keep the rest of today's activity light",
    },
];

pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        horizon: Horizon::Immediate,
        applies: |i| i.training_readiness == TrainingReadiness::Rest,
        message: "Overtraining risk: hard training today could tip you into overreaching",
    },
    RiskRule {
        horizon: Horizon::Immediate,
        applies: |i| i.hrv_status == StatusLevel::Critical,
        message: "Critically low HRV: elevated risk of illness or injury under heavy load",
    },
    RiskRule {
        horizon: Horizon::Immediate,
        applies: |i| i.stress_level == StressLevel::Extreme,
        message: "Extreme stress: coordination and focus are impaired, raising injury risk",
    },
    RiskRule {
        horizon: Horizon::ShortTerm,
        applies: |i| i.recovery_status.is_compromised(),
        message: "Accumulating fatigue: performance is likely to drop over the next few days",
    },
    RiskRule {
        horizon: Horizon::ShortTerm,
        applies: |i| i.sleep_quality.is_compromised(),
        message: "Sleep debt: recovery and adaptation will be blunted this week",
    },
    RiskRule {
        horizon: Horizon::ShortTerm,
        applies: |i| i.nutrition_adjustment_needed,
        message: "Under-fuelling or dehydration may impair the next sessions",
    },
    RiskRule {
        horizon: Horizon::LongTerm,
        applies: |i| i.stress_level.is_elevated(),
        message: "Burnout risk from sustained high stress",
    },
    RiskRule {
        horizon: Horizon::LongTerm,
        applies: |i| i.volume_adjustment_needed && i.intensity_adjustment_needed,
        message: "Non-functional overreaching if training load is not reduced",
    },
    RiskRule {
        horizon: Horizon::LongTerm,
        applies: |i| i.hrv_status.is_compromised() && i.sleep_quality.is_compromised(),
        message: "Chronic under-recovery: review training load and sleep habits together",
    },
];

// ============================================================================
// Synthesizer
// ============================================================================

/// Builds recommendations, risks and actions from insights
#[derive(Clone, Debug)]
pub struct RecommendationSynthesizer {
    insight_engine: BiometricInsightEngine,
    mutation_engine: PlanMutationEngine,
    config: SynthesisConfig,
}

impl Default for RecommendationSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisConfig::default())
    }
}

impl RecommendationSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self::with_engines(BiometricInsightEngine::new(), PlanMutationEngine::new(), config)
    }

    pub fn with_engines(
        insight_engine: BiometricInsightEngine,
        mutation_engine: PlanMutationEngine,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            insight_engine,
            mutation_engine,
            config,
        }
    }

    /// Run every recommendation rule against the insights
    pub fn generate_recommendations(
        &self,
        insights: &InsightVector,
        context: &TrainingContext,
    ) -> Recommendations {
        let mut recommendations = Recommendations::default();

        for rule in RECOMMENDATION_RULES {
            if !(rule.applies)(insights, context) {
                continue;
            }
            let bucket = match rule.area {
                Area::Training => &mut recommendations.training,
                Area::Recovery => &mut recommendations.recovery,
                Area::Nutrition => &mut recommendations.nutrition,
                Area::Lifestyle => &mut recommendations.lifestyle,
            };
            bucket.push(rule.message.to_string());
        }

        recommendations
    }

    /// The single plan change the insights call for
    pub fn synthetic_request(&self, insights: &InsightVector) -> ModificationRequest {
        let details = format!(
            "Ajuste automático por biometría (recuperación {})",
            insights.recovery_score
        );

        match (
            insights.intensity_adjustment_needed,
            insights.volume_adjustment_needed,
        ) {
            (true, true) => ModificationRequest::new(ModificationKind::IntensityChange)
                .with_value(self.config.combined_intensity_pct)
                .with_details(details),
            (true, false) => ModificationRequest::new(ModificationKind::IntensityChange)
                .with_value(self.config.intensity_only_pct)
                .with_details(details),
            (false, true) => ModificationRequest::new(ModificationKind::VolumeChange)
                .with_value(self.config.volume_only_pct)
                .with_details(details),
            (false, false) => ModificationRequest::none(),
        }
    }

    /// Build the synthetic request and realize it against the active plan
    pub fn generate_adjustments(
        &self,
        insights: &InsightVector,
        context: &TrainingContext,
    ) -> AdjustmentPlan {
        let request = self.synthetic_request(insights);

        let workout = match &context.active_workout {
            Some(plan) if !request.is_none() => Some(self.mutation_engine.mutate(plan, &request)),
            _ => None,
        };

        let nutrition = if insights.nutrition_adjustment_needed {
            context.nutrition_data.clone()
        } else {
            None
        };

        let progression = if insights.rpe_adjustment_needed {
            context.progression_plans.clone()
        } else {
            Vec::new()
        };

        AdjustmentPlan {
            request,
            workout,
            nutrition,
            progression,
        }
    }

    /// Run every risk rule against the insights
    pub fn assess_risks(&self, insights: &InsightVector) -> RiskAssessment {
        let mut risks = RiskAssessment::default();

        for rule in RISK_RULES.iter().filter(|rule| (rule.applies)(insights)) {
            let bucket = match rule.horizon {
                Horizon::Immediate => &mut risks.immediate,
                Horizon::ShortTerm => &mut risks.short_term,
                Horizon::LongTerm => &mut risks.long_term,
            };
            bucket.push(rule.message.to_string());
        }

        risks
    }

    /// Analyze a snapshot and decide concrete actions for `user_id`
    pub fn translate_to_actions(
        &self,
        user_id: &str,
        snapshot: &WearableSnapshot,
        context: &TrainingContext,
    ) -> ActionBundle {
        let insights = self.insight_engine.analyze(snapshot);
        let cfg = &self.config;

        let rest_recommendation = RestRecommendation {
            should_rest: insights.training_readiness == TrainingReadiness::Rest,
            reason: rest_reason(&insights).to_string(),
        };

        let volume_adjustment = PercentageAdjustment {
            should_adjust: insights.volume_adjustment_needed,
            percentage: if insights.volume_adjustment_needed {
                cfg.volume_only_pct
            } else {
                0
            },
            reason: if insights.volume_adjustment_needed {
                format!(
                    "Recovery score {} is too low to sustain planned volume",
                    insights.recovery_score
                )
            } else {
                "Recovery supports the planned volume".to_string()
            },
        };

        let high_stress = insights.stress_level.is_elevated();
        let intensity_adjustment = PercentageAdjustment {
            should_adjust: insights.intensity_adjustment_needed,
            percentage: if high_stress {
                cfg.high_stress_intensity_pct
            } else {
                cfg.intensity_only_pct
            },
            reason: match (insights.intensity_adjustment_needed, high_stress) {
                (true, true) => "High stress calls for a larger intensity reduction".to_string(),
                (true, false) => format!(
                    "Recovery score {} calls for lighter intensity",
                    insights.recovery_score
                ),
                (false, _) => "Intensity can stay as planned".to_string(),
            },
        };

        let vitals = &snapshot.vitals;
        let increase_carbohydrates = vitals.glucose.time_in_range < GLUCOSE_TIME_IN_RANGE_MIN;
        let increase_hydration = vitals.hydration.level < HYDRATION_LEVEL_MIN;
        let nutrition_adjustment = NutritionAdjustment {
            increase_carbohydrates,
            increase_hydration,
            reason: match (increase_carbohydrates, increase_hydration) {
                (true, true) => "Glucose time in range and hydration are both low",
                (true, false) => "Glucose time in range is low",
                (false, true) => "Hydration is low",
                (false, false) => "Glucose and hydration are within range",
            }
            .to_string(),
        };

        let rpe_modification = if insights.rpe_adjustment_needed {
            RpeModification {
                target_rpe: cfg.fatigued_target_rpe,
                reason: "Reduced recovery: keep perceived effort moderate".to_string(),
            }
        } else {
            RpeModification {
                target_rpe: cfg.default_target_rpe,
                reason: "Standard target effort".to_string(),
            }
        };

        let workout = self.generate_adjustments(&insights, context).workout;

        tracing::info!(
            "Actions for {}: rest={}, volume={}%, intensity={}%, target RPE {}",
            user_id,
            rest_recommendation.should_rest,
            volume_adjustment.percentage,
            intensity_adjustment.percentage,
            rpe_modification.target_rpe
        );

        ActionBundle {
            user_id: user_id.to_string(),
            insights,
            rest_recommendation,
            volume_adjustment,
            intensity_adjustment,
            nutrition_adjustment,
            rpe_modification,
            workout,
        }
    }

    /// Insights, recommendations, risks and adjustments for one snapshot
    pub fn report(&self, snapshot: &WearableSnapshot, context: &TrainingContext) -> WellnessReport {
        let insights = self.insight_engine.analyze(snapshot);
        WellnessReport {
            recommendations: self.generate_recommendations(&insights, context),
            risks: self.assess_risks(&insights),
            adjustments: self.generate_adjustments(&insights, context),
            insights,
        }
    }
}

/// First matching reason wins
fn rest_reason(insights: &InsightVector) -> &'static str {
    if insights.energy_level == EnergyLevel::VeryLow {
        "Extremely low energy levels"
    } else if insights.hrv_status == StatusLevel::Critical {
        "Critically low HRV"
    } else if insights.stress_level == StressLevel::Extreme {
        "Extreme stress levels"
    } else if insights.sleep_quality == StatusLevel::Critical {
        "Critically low sleep quality"
    } else if insights.training_readiness == TrainingReadiness::Rest {
        "Overall recovery is too low for training"
    } else {
        "Recovery markers support training"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{rested_snapshot, sample_plan};
    use crate::AdjustmentType;
    use serde_json::json;

    fn good_insights() -> InsightVector {
        InsightVector {
            recovery_score: 90,
            hrv_status: StatusLevel::Optimal,
            sleep_quality: StatusLevel::Good,
            recovery_status: StatusLevel::Optimal,
            stress_level: StressLevel::Low,
            training_readiness: TrainingReadiness::Ready,
            energy_level: EnergyLevel::High,
            rpe_adjustment_needed: false,
            volume_adjustment_needed: false,
            intensity_adjustment_needed: false,
            rest_adjustment_needed: false,
            nutrition_adjustment_needed: false,
        }
    }

    fn synthesizer() -> RecommendationSynthesizer {
        RecommendationSynthesizer::default()
    }

    #[test]
    fn test_ready_athlete_gets_single_training_message() {
        let recs = synthesizer().generate_recommendations(&good_insights(), &TrainingContext::default());

        assert_eq!(recs.training.len(), 1);
        assert!(recs.training[0].starts_with("You are ready"));
        assert!(recs.recovery.is_empty());
        assert!(recs.nutrition.is_empty());
        assert!(recs.lifestyle.is_empty());
    }

    #[test]
    fn test_rest_day_and_sleep_rules_fire_together() {
        let mut insights = good_insights();
        insights.training_readiness = TrainingReadiness::Rest;
        insights.sleep_quality = StatusLevel::Fair;

        let recs = synthesizer().generate_recommendations(&insights, &TrainingContext::default());
        assert!(recs.training.iter().any(|m| m.starts_with("Take a rest day")));
        assert!(recs.recovery.iter().any(|m| m.starts_with("Prioritise sleep")));
    }

    #[test]
    fn test_nutrition_logging_prompt_depends_on_context() {
        let mut insights = good_insights();
        insights.nutrition_adjustment_needed = true;

        let without = synthesizer().generate_recommendations(&insights, &TrainingContext::default());
        assert_eq!(without.nutrition.len(), 2);

        let context = TrainingContext {
            nutrition_data: Some(json!({"calories": 2400})),
            ..TrainingContext::default()
        };
        let with = synthesizer().generate_recommendations(&insights, &context);
        assert_eq!(with.nutrition.len(), 1);
    }

    #[test]
    fn test_synthetic_request_priority() {
        let s = synthesizer();
        let mut insights = good_insights();
        assert!(s.synthetic_request(&insights).is_none());

        insights.volume_adjustment_needed = true;
        let request = s.synthetic_request(&insights);
        assert_eq!(request.kind, ModificationKind::VolumeChange);
        assert_eq!(request.value, Some(-20));

        insights.intensity_adjustment_needed = true;
        let request = s.synthetic_request(&insights);
        assert_eq!(request.kind, ModificationKind::IntensityChange);
        assert_eq!(request.value, Some(-15));

        insights.volume_adjustment_needed = false;
        let request = s.synthetic_request(&insights);
        assert_eq!(request.kind, ModificationKind::IntensityChange);
        assert_eq!(request.value, Some(-10));
    }

    #[test]
    fn test_adjustments_mutate_active_plan() {
        let mut insights = good_insights();
        insights.volume_adjustment_needed = true;
        let context = TrainingContext::with_active_workout(sample_plan());

        let plan = synthesizer().generate_adjustments(&insights, &context);
        let workout = plan.workout.expect("active plan should be mutated");

        assert_eq!(workout.adjustments.len(), 5);
        assert!(workout
            .adjustments
            .iter()
            .all(|a| a.adjustment_type == AdjustmentType::Volume && a.value == -20));
        // 5 sets * 0.8
        assert_eq!(workout.modified_plan.days[1].exercises[0].sets, 4);
    }

    #[test]
    fn test_adjustments_without_plan_or_need() {
        let mut insights = good_insights();
        insights.intensity_adjustment_needed = true;
        let plan = synthesizer().generate_adjustments(&insights, &TrainingContext::default());
        assert!(plan.workout.is_none());
        assert_eq!(plan.request.kind, ModificationKind::IntensityChange);

        let context = TrainingContext::with_active_workout(sample_plan());
        let plan = synthesizer().generate_adjustments(&good_insights(), &context);
        assert!(plan.workout.is_none());
        assert!(plan.request.is_none());
    }

    #[test]
    fn test_context_data_passes_through_when_flagged() {
        let context = TrainingContext {
            nutrition_data: Some(json!({"carbs_g": 300})),
            progression_plans: vec![json!({"exercise": "Back Squat", "step": 2.5})],
            ..TrainingContext::default()
        };

        let quiet = synthesizer().generate_adjustments(&good_insights(), &context);
        assert!(quiet.nutrition.is_none());
        assert!(quiet.progression.is_empty());

        let mut insights = good_insights();
        insights.nutrition_adjustment_needed = true;
        insights.rpe_adjustment_needed = true;
        let flagged = synthesizer().generate_adjustments(&insights, &context);
        assert_eq!(flagged.nutrition, context.nutrition_data);
        assert_eq!(flagged.progression, context.progression_plans);
    }

    #[test]
    fn test_risk_buckets_are_independent() {
        let s = synthesizer();
        assert_eq!(s.assess_risks(&good_insights()), RiskAssessment::default());

        let mut insights = good_insights();
        insights.training_readiness = TrainingReadiness::Rest;
        let risks = s.assess_risks(&insights);
        assert_eq!(risks.immediate.len(), 1);
        assert!(risks.immediate[0].starts_with("Overtraining"));
        assert!(risks.long_term.is_empty());

        let mut insights = good_insights();
        insights.stress_level = StressLevel::High;
        let risks = s.assess_risks(&insights);
        assert!(risks.immediate.is_empty());
        assert_eq!(risks.long_term, vec!["Burnout risk from sustained high stress"]);
    }

    #[test]
    fn test_depleted_snapshot_fills_every_horizon() {
        let mut snapshot = rested_snapshot();
        snapshot.recovery.hrv = 20.0;
        snapshot.recovery.stress = 90.0;
        snapshot.sleep.quality = 30.0;
        snapshot.vitals.hydration.level = 60.0;

        let report = synthesizer().report(&snapshot, &TrainingContext::default());
        assert!(!report.risks.immediate.is_empty());
        assert!(!report.risks.short_term.is_empty());
        assert!(!report.risks.long_term.is_empty());
        assert!(!report.recommendations.lifestyle.is_empty());
    }

    #[test]
    fn test_rest_reason_priority() {
        let s = synthesizer();
        let ctx = TrainingContext::default();

        let mut depleted = rested_snapshot();
        depleted.recovery.hrv = 0.0;
        depleted.recovery.resting_heart_rate = 200.0;
        depleted.sleep.quality = 0.0;
        depleted.recovery.stress = 100.0;
        let actions = s.translate_to_actions("u1", &depleted, &ctx);
        assert!(actions.rest_recommendation.should_rest);
        assert_eq!(actions.rest_recommendation.reason, "Extremely low energy levels");

        let mut low_hrv = rested_snapshot();
        low_hrv.recovery.hrv = 35.0;
        let actions = s.translate_to_actions("u1", &low_hrv, &ctx);
        assert!(!actions.rest_recommendation.should_rest);
        assert_eq!(actions.rest_recommendation.reason, "Critically low HRV");

        let mut stressed = rested_snapshot();
        stressed.recovery.stress = 85.0;
        let actions = s.translate_to_actions("u1", &stressed, &ctx);
        assert!(actions.rest_recommendation.should_rest);
        assert_eq!(actions.rest_recommendation.reason, "Extreme stress levels");

        let mut poor_sleep = rested_snapshot();
        poor_sleep.sleep.quality = 40.0;
        let actions = s.translate_to_actions("u1", &poor_sleep, &ctx);
        assert_eq!(actions.rest_recommendation.reason, "Critically low sleep quality");
    }

    #[test]
    fn test_actions_for_rested_athlete() {
        let actions =
            synthesizer().translate_to_actions("athlete-7", &rested_snapshot(), &TrainingContext::default());

        assert_eq!(actions.user_id, "athlete-7");
        assert!(!actions.rest_recommendation.should_rest);
        assert!(!actions.volume_adjustment.should_adjust);
        assert_eq!(actions.volume_adjustment.percentage, 0);
        assert!(!actions.intensity_adjustment.should_adjust);
        assert_eq!(actions.intensity_adjustment.percentage, -10);
        assert!(!actions.nutrition_adjustment.increase_carbohydrates);
        assert!(!actions.nutrition_adjustment.increase_hydration);
        assert_eq!(actions.rpe_modification.target_rpe, 7);
        assert!(actions.workout.is_none());
    }

    #[test]
    fn test_actions_for_stressed_under_recovered_athlete() {
        let mut snapshot = rested_snapshot();
        snapshot.recovery.hrv = 0.0;
        snapshot.recovery.stress = 80.0;
        snapshot.vitals.glucose.time_in_range = 60.0;
        snapshot.vitals.hydration.level = 70.0;
        // 0 + 20 + 22.5 + 3 + 10 = 55.5
        let context = TrainingContext::with_active_workout(sample_plan());

        let actions = synthesizer().translate_to_actions("u2", &snapshot, &context);

        assert_eq!(actions.insights.recovery_score, 56);
        assert!(actions.intensity_adjustment.should_adjust);
        assert_eq!(actions.intensity_adjustment.percentage, -15);
        assert!(!actions.volume_adjustment.should_adjust);
        assert_eq!(actions.rpe_modification.target_rpe, 6);
        assert!(actions.nutrition_adjustment.increase_carbohydrates);
        assert!(actions.nutrition_adjustment.increase_hydration);

        let workout = actions.workout.expect("active plan should be adjusted");
        assert!(workout
            .adjustments
            .iter()
            .all(|a| a.adjustment_type == AdjustmentType::Intensity && a.value == -10));
    }
}
