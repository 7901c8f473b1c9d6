mod console;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use flexify_client::FlexifyClient;
use flexify_core::{Config, ExercisePayload};
use flexify_sync::{
    AccountService, CatalogSync, ExerciseSync, Notifier, ProfileForm, RegistrationForm, SetField,
    SetSync, Stopwatch, SyncContext, TracingNotifier, WorkoutSync,
};
use session_manager::{Route, RouteGuard, SessionManager};
use storage_manager::FileKeyValueStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use console::{print_exercises, print_sets, print_workouts, ConsoleNotifier};

#[derive(Parser)]
#[command(name = "flexify")]
#[command(about = "Terminal client for the Flexify fitness backend")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides config and FLEXIFY_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Session storage file
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login { email: String, password: String },
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
        age: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Edit the profile; omitted fields stay unchanged
    Profile {
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
        #[arg(long, default_value = "")]
        age: String,
    },
    /// Delete the signed-in account
    DeleteAccount,
    /// List workouts
    Workouts {
        /// Only the signed-in user's workouts
        #[arg(long)]
        mine: bool,
        #[arg(long, default_value = "")]
        search: String,
    },
    AddWorkout { name: String },
    RenameWorkout { id: String, name: String },
    DeleteWorkout { id: String },
    /// List the exercises of a workout
    Exercises {
        workout_id: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Browse the exercise catalog
    Catalog {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add catalog exercises (by id) to a workout
    AddExercises {
        workout_id: String,
        #[arg(required = true)]
        catalog_ids: Vec<String>,
    },
    UpdateExercise {
        workout_id: String,
        id: String,
        name: String,
        muscle: String,
    },
    DeleteExercise { workout_id: String, id: String },
    /// List the sets of an exercise
    Sets { exercise_id: String },
    /// Append a set and save every set of the exercise
    AddSet {
        exercise_id: String,
        #[arg(long, default_value = "0")]
        reps: String,
        #[arg(long, default_value = "0")]
        kg: String,
    },
    /// Delete the set at a 1-based position
    DeleteSet { exercise_id: String, position: usize },
    /// Run the workout stopwatch for a number of seconds
    Timer {
        #[arg(long, default_value = "10")]
        seconds: u64,
    },
}

impl Commands {
    /// Screen the command stands for, as far as the route guard is concerned.
    fn route(&self) -> Route {
        match self {
            Commands::Login { .. } => Route::Login,
            Commands::Register { .. } => Route::Register,
            Commands::Logout | Commands::Whoami | Commands::Profile { .. } => Route::Profile,
            Commands::DeleteAccount => Route::Profile,
            Commands::Workouts { .. }
            | Commands::AddWorkout { .. }
            | Commands::RenameWorkout { .. }
            | Commands::DeleteWorkout { .. } => Route::Workouts,
            Commands::Exercises { .. }
            | Commands::Catalog { .. }
            | Commands::AddExercises { .. }
            | Commands::UpdateExercise { .. }
            | Commands::DeleteExercise { .. }
            | Commands::Timer { .. } => Route::Exercise,
            Commands::Sets { .. } | Commands::AddSet { .. } | Commands::DeleteSet { .. } => {
                Route::Sets
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let mut config = Config::load();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(storage) = cli.storage {
        config.storage_path = Some(storage);
    }
    tracing::debug!(api_base = %config.base_url(), "configuration loaded");

    let store = Arc::new(FileKeyValueStore::new(config.resolved_storage_path()));
    let session = Arc::new(SessionManager::new(store.clone()));
    let client = FlexifyClient::new(&config, store)?;
    // Piped output gets notifications as log records instead of coloured lines.
    let notifier: Arc<dyn Notifier> = if std::io::stdout().is_terminal() {
        Arc::new(ConsoleNotifier)
    } else {
        Arc::new(TracingNotifier)
    };
    let ctx = SyncContext::new(Arc::new(client), session.clone(), notifier);

    let restored = session.restore().await;
    let route = cli.command.route();
    let mut guard = RouteGuard::new(route);
    guard.session_restored(restored.is_some());
    if let Some(redirect) = guard.router_ready() {
        if redirect.to == Route::LOGIN {
            bail!("Please log in first ({} requires a session)", route.path());
        }
        let name = restored.map(|s| s.display_name).unwrap_or_default();
        println!("{}", format!("Already signed in as {name}").yellow());
        return Ok(());
    }

    run(cli.command, ctx).await
}

async fn run(command: Commands, ctx: SyncContext) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let session = AccountService::new(ctx).login(&email, &password).await?;
            println!("Signed in as {} ({})", session.display_name.bold(), session.role);
        }
        Commands::Register {
            username,
            email,
            password,
            age,
        } => {
            let form = RegistrationForm {
                username,
                email,
                password,
                age,
            };
            let next = AccountService::new(ctx).register(&form).await?;
            println!("{}", format!("Next: flexify login ({})", next.path()).dimmed());
        }
        Commands::Logout => AccountService::new(ctx).logout().await?,
        Commands::Whoami => {
            let session = ctx.session.require_session()?;
            let role = if session.role.is_admin() {
                session.role.to_string().yellow().bold()
            } else {
                session.role.to_string().normal()
            };
            println!(
                "{} ({}) id {}",
                session.display_name.bold(),
                role,
                session.subject_id
            );
        }
        Commands::Profile {
            username,
            email,
            password,
            confirm_password,
            age,
        } => {
            let form = ProfileForm {
                username,
                email,
                password,
                confirm_password,
                age,
            };
            let sent = AccountService::new(ctx).update_profile(&form).await?;
            if sent.is_empty() {
                println!("{}", "Nothing to update".dimmed());
            }
        }
        Commands::DeleteAccount => AccountService::new(ctx).delete_account().await?,
        Commands::Workouts { mine, search } => {
            let mut workouts = WorkoutSync::new(ctx);
            if mine {
                workouts.list_mine().await?;
            } else {
                workouts.list().await?;
            }
            workouts.set_query(search);
            print_workouts(&workouts.filtered());
        }
        Commands::AddWorkout { name } => {
            let mut workouts = WorkoutSync::new(ctx);
            workouts.create(&name).await?;
            print_workouts(&workouts.filtered());
        }
        Commands::RenameWorkout { id, name } => {
            let mut workouts = WorkoutSync::new(ctx);
            workouts.list().await?;
            workouts.update(&id, &name).await?;
            print_workouts(&workouts.filtered());
        }
        Commands::DeleteWorkout { id } => {
            let mut workouts = WorkoutSync::new(ctx);
            workouts.delete(&id).await?;
            print_workouts(&workouts.filtered());
        }
        Commands::Exercises { workout_id, search } => {
            let mut exercises = ExerciseSync::new(ctx, workout_id);
            exercises.list().await?;
            exercises.set_query(search);
            print_exercises(&exercises.filtered());
        }
        Commands::Catalog { search } => {
            let mut catalog = CatalogSync::new(ctx);
            catalog.list().await?;
            catalog.set_query(search);
            print_exercises(&catalog.filtered());
        }
        Commands::AddExercises {
            workout_id,
            catalog_ids,
        } => {
            let mut catalog = CatalogSync::new(ctx.clone());
            catalog.list().await?;
            for id in &catalog_ids {
                let template = catalog
                    .templates()
                    .iter()
                    .find(|t| &t.id == id)
                    .cloned()
                    .ok_or_else(|| anyhow!("No catalog exercise with id {id}"))?;
                catalog.toggle_select(&template);
            }
            let mut exercises = ExerciseSync::new(ctx, workout_id);
            exercises.add_selected(&catalog.take_selection()).await?;
            print_exercises(&exercises.filtered());
        }
        Commands::UpdateExercise {
            workout_id,
            id,
            name,
            muscle,
        } => {
            let mut exercises = ExerciseSync::new(ctx, workout_id);
            exercises.list().await?;
            let payload = ExercisePayload {
                name,
                muscle_group: muscle,
            };
            exercises.update(&id, &payload).await?;
            print_exercises(&exercises.filtered());
        }
        Commands::DeleteExercise { workout_id, id } => {
            let mut exercises = ExerciseSync::new(ctx, workout_id);
            exercises.delete(&id).await?;
            print_exercises(&exercises.filtered());
        }
        Commands::Sets { exercise_id } => {
            let mut sets = SetSync::new(ctx, exercise_id);
            sets.list().await?;
            print_sets(sets.sets());
        }
        Commands::AddSet {
            exercise_id,
            reps,
            kg,
        } => {
            let mut sets = SetSync::new(ctx, exercise_id);
            sets.list().await?;
            let serie = sets.add_local();
            let position = sets
                .sets()
                .iter()
                .position(|s| s.serie_index == serie && !s.is_persisted())
                .ok_or_else(|| anyhow!("new set went missing"))?;
            sets.set_field(position, SetField::Reps, &reps)?;
            sets.set_field(position, SetField::Kg, &kg)?;
            let report = sets.save_all().await?;
            tracing::debug!(saved = report.saved.len(), "sets saved");
            print_sets(sets.sets());
        }
        Commands::DeleteSet {
            exercise_id,
            position,
        } => {
            if position == 0 {
                bail!("Positions start at 1");
            }
            let mut sets = SetSync::new(ctx, exercise_id);
            sets.list().await?;
            sets.delete(position - 1).await?;
            print_sets(sets.sets());
        }
        Commands::Timer { seconds } => run_timer(seconds).await,
    }
    Ok(())
}

async fn run_timer(seconds: u64) {
    let mut watch = Stopwatch::new();
    watch.toggle();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;
    for _ in 0..seconds {
        interval.tick().await;
        watch.tick();
        print!("\r⏱  {}", watch.format_elapsed());
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }
    watch.toggle();
    println!();
}
