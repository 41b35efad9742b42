#![forbid(unsafe_code)]

//! Core domain model and rule engine for adaptive training adjustments.
//!
//! This crate provides:
//! - Domain types (plans, modification requests, wearable snapshots, insights)
//! - Intent parsing of free-text requests
//! - Biometric insight derivation
//! - Plan mutation with coherence checking
//! - Recommendation, risk and action synthesis
//! - A persistence port with a JSON file adapter

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod ladder;
pub mod intent;
pub mod insight;
pub mod mutation;
pub mod synthesis;
pub mod store;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, SynthesisConfig};
pub use intent::IntentParser;
pub use insight::BiometricInsightEngine;
pub use mutation::{MutationOutcome, PlanMutationEngine};
pub use synthesis::{ActionBundle, RecommendationSynthesizer, WellnessReport};
pub use store::{JsonFileStore, PlanStore, ProgressionEntry};
pub use service::AdaptiveTrainingService;
