use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use storage::{
    Database,
    models::{Discipline, Gender, NewAttempt},
    repository::attempt::AttemptRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Loads one sample attempt per race category", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://ski_race.db")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

struct SampleAttempt {
    name: &'static str,
    age: u32,
    gender: Gender,
    discipline: Discipline,
    run_name: &'static str,
    date: (i32, u32, u32),
    time_seconds: f64,
}

const SAMPLES: &[SampleAttempt] = &[
    SampleAttempt {
        name: "Alice Girl",
        age: 12,
        gender: Gender::Female,
        discipline: Discipline::Ski,
        run_name: "Main course",
        date: (2026, 1, 10),
        time_seconds: 75.50,
    },
    SampleAttempt {
        name: "Bobby Boy",
        age: 15,
        gender: Gender::Male,
        discipline: Discipline::Ski,
        run_name: "Main course",
        date: (2026, 1, 11),
        time_seconds: 72.40,
    },
    SampleAttempt {
        name: "Wendy Woman",
        age: 35,
        gender: Gender::Female,
        discipline: Discipline::Ski,
        run_name: "GS",
        date: (2026, 1, 12),
        time_seconds: 68.20,
    },
    SampleAttempt {
        name: "Mark Man",
        age: 28,
        gender: Gender::Male,
        discipline: Discipline::Ski,
        run_name: "GS",
        date: (2026, 1, 12),
        time_seconds: 63.10,
    },
    SampleAttempt {
        name: "Paula Senior",
        age: 55,
        gender: Gender::Female,
        discipline: Discipline::Ski,
        run_name: "Slalom",
        date: (2026, 1, 13),
        time_seconds: 82.90,
    },
    SampleAttempt {
        name: "Carl Senior",
        age: 60,
        gender: Gender::Male,
        discipline: Discipline::Ski,
        run_name: "Slalom",
        date: (2026, 1, 13),
        time_seconds: 85.75,
    },
    SampleAttempt {
        name: "Sally Snow",
        age: 22,
        gender: Gender::Female,
        discipline: Discipline::Snowboard,
        run_name: "SB Course",
        date: (2026, 1, 14),
        time_seconds: 90.00,
    },
    SampleAttempt {
        name: "Sam Snow",
        age: 30,
        gender: Gender::Male,
        discipline: Discipline::Snowboard,
        run_name: "SB Course",
        date: (2026, 1, 14),
        time_seconds: 88.50,
    },
];

impl SampleAttempt {
    fn to_new_attempt(&self) -> anyhow::Result<NewAttempt> {
        let (year, month, day) = self.date;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("Invalid sample date for {}", self.name))?;

        Ok(NewAttempt::new(
            self.name,
            self.age,
            self.gender,
            self.discipline,
            date,
            self.time_seconds,
        )
        .with_run_name(Some(self.run_name))
        .with_notes(Some("Test run")))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("seed={},skirace_storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::new(&cli.database_url)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let repo = AttemptRepository::new(db.pool());

    for sample in SAMPLES {
        let attempt = repo.insert(&sample.to_new_attempt()?).await?;
        tracing::info!(
            "  ✓ {} ({}) {:.2}s",
            attempt.name,
            attempt.category,
            attempt.time_seconds
        );
    }

    tracing::info!("Loaded {} sample attempts", SAMPLES.len());
    db.close().await;

    Ok(())
}
