//! Orchestration of the two adaptation entry paths.
//!
//! 1. Free text → intent parser → mutation engine
//! 2. Wearable snapshot → insights → synthesizer → mutation engine
//!
//! Both paths hand coherent, non-empty results to the [`PlanStore`].
//! Incoherent plans are returned to the caller but never written.

use crate::intent::IntentParser;
use crate::mutation::{MutationOutcome, PlanMutationEngine};
use crate::store::{AdjustmentSource, PlanStore, ProgressionEntry};
use crate::synthesis::{ActionBundle, RecommendationSynthesizer};
use crate::{Config, ModificationRequest, Result, TrainingContext, WearableSnapshot, WorkoutPlan};
use serde::{Deserialize, Serialize};

/// What a user request turned into
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppliedChange {
    pub request: ModificationRequest,
    pub outcome: MutationOutcome,
    /// Whether the modified plan was written to the store
    pub persisted: bool,
}

pub struct AdaptiveTrainingService<S: PlanStore> {
    parser: IntentParser,
    mutation_engine: PlanMutationEngine,
    synthesizer: RecommendationSynthesizer,
    store: S,
}

impl<S: PlanStore> AdaptiveTrainingService<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            parser: IntentParser::new(),
            mutation_engine: PlanMutationEngine::new(),
            synthesizer: RecommendationSynthesizer::new(config.synthesis.clone()),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse `text`, apply it to `plan` and persist the result
    pub fn apply_user_request(&mut self, plan: &WorkoutPlan, text: &str) -> Result<AppliedChange> {
        let request = self.parser.classify(text);
        let outcome = self.mutation_engine.mutate(plan, &request);
        let persisted = self.persist(&outcome, AdjustmentSource::UserRequest)?;

        Ok(AppliedChange {
            request,
            outcome,
            persisted,
        })
    }

    /// Translate a snapshot into actions and persist any plan change
    pub fn apply_wearable_snapshot(
        &mut self,
        user_id: &str,
        snapshot: &WearableSnapshot,
        context: &TrainingContext,
    ) -> Result<ActionBundle> {
        let actions = self
            .synthesizer
            .translate_to_actions(user_id, snapshot, context);

        if let Some(outcome) = &actions.workout {
            self.persist(outcome, AdjustmentSource::Wearable)?;
        }

        Ok(actions)
    }

    fn persist(&mut self, outcome: &MutationOutcome, source: AdjustmentSource) -> Result<bool> {
        if outcome.adjustments.is_empty() {
            tracing::debug!("No adjustments to persist for plan {}", outcome.modified_plan.id);
            return Ok(false);
        }

        let plan = &outcome.modified_plan;
        if !outcome.impact_analysis.coherence_maintained {
            tracing::warn!("Plan {} is incoherent after mutation; not persisting", plan.id);
            return Ok(false);
        }

        self.store.update_workout_plan(&plan.id, plan)?;
        self.store.add_progression_plan(&ProgressionEntry::new(
            plan.id.clone(),
            source,
            outcome.adjustments.clone(),
        ))?;
        Ok(true)
    }
}
