use adapt_core::service::AppliedChange;
use adapt_core::*;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "adapt")]
#[command(about = "Adaptive training adjustment engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a free-text modification request
    Classify {
        /// Request text, e.g. "reducir 10 la carga"
        text: String,
    },

    /// Apply a free-text request to a workout plan
    Modify {
        /// Workout plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Request text
        #[arg(long)]
        request: String,

        /// Persist the modified plan and progression entry to the data directory
        #[arg(long)]
        write: bool,
    },

    /// Analyze a wearable snapshot: insights, recommendations and risks
    Analyze {
        /// Wearable snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Active workout plan JSON file
        #[arg(long)]
        plan: Option<PathBuf>,
    },

    /// Translate a wearable snapshot into concrete training actions
    Actions {
        /// Wearable snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Active workout plan JSON file
        #[arg(long)]
        plan: Option<PathBuf>,

        /// User the actions are for
        #[arg(long, default_value = "local")]
        user: String,

        /// Persist any plan adjustment to the data directory
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    adapt_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Classify { text } => cmd_classify(&text),
        Commands::Modify {
            plan,
            request,
            write,
        } => cmd_modify(&plan, &request, write, &data_dir, &config),
        Commands::Analyze { snapshot, plan } => cmd_analyze(&snapshot, plan.as_deref(), &config),
        Commands::Actions {
            snapshot,
            plan,
            user,
            write,
        } => cmd_actions(&snapshot, plan.as_deref(), &user, write, &data_dir, &config),
    }
}

fn cmd_classify(text: &str) -> Result<()> {
    let request = IntentParser::new().classify(text);
    print_json(&request)
}

fn cmd_modify(
    plan_path: &Path,
    text: &str,
    write: bool,
    data_dir: &Path,
    config: &Config,
) -> Result<()> {
    let plan: WorkoutPlan = read_json(plan_path)?;

    let change = if write {
        let mut service = AdaptiveTrainingService::new(JsonFileStore::new(data_dir), config);
        let change = service.apply_user_request(&plan, text)?;
        if !change.persisted {
            eprintln!("Plan not written: no coherent adjustments to persist.");
        }
        change
    } else {
        let request = IntentParser::new().classify(text);
        let outcome = PlanMutationEngine::new().mutate(&plan, &request);
        AppliedChange {
            request,
            outcome,
            persisted: false,
        }
    };

    print_json(&change)
}

fn cmd_analyze(snapshot_path: &Path, plan_path: Option<&Path>, config: &Config) -> Result<()> {
    let snapshot: WearableSnapshot = read_json(snapshot_path)?;
    let context = load_context(plan_path)?;

    let report = RecommendationSynthesizer::new(config.synthesis.clone()).report(&snapshot, &context);
    print_json(&report)
}

fn cmd_actions(
    snapshot_path: &Path,
    plan_path: Option<&Path>,
    user: &str,
    write: bool,
    data_dir: &Path,
    config: &Config,
) -> Result<()> {
    let snapshot: WearableSnapshot = read_json(snapshot_path)?;
    let context = load_context(plan_path)?;

    let actions = if write {
        let mut service = AdaptiveTrainingService::new(JsonFileStore::new(data_dir), config);
        service.apply_wearable_snapshot(user, &snapshot, &context)?
    } else {
        RecommendationSynthesizer::new(config.synthesis.clone())
            .translate_to_actions(user, &snapshot, &context)
    };

    print_json(&actions)
}

fn load_context(plan_path: Option<&Path>) -> Result<TrainingContext> {
    match plan_path {
        Some(path) => Ok(TrainingContext::with_active_workout(read_json(path)?)),
        None => Ok(TrainingContext::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&contents)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
