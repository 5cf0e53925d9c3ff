mod core;
mod seed;
mod crown;

use std::{collections::HashSet, sync::Arc};

use clap::{Arg, Command};
use tokio::{signal, time::Duration};
use tracing_subscriber::EnvFilter;

use common::{
    database::{DbPool, manager::ConnectionManager},
    utils::{config::Config, error::{ApiError, Result}},
};

use crate::core::{Job, JobError, JobScheduler};
use crate::crown::CrownJob;
use crate::seed::SeedJob;

const JOB_DESCRIPTIONS: &[(&str, &str)] = &[
    ("seed", "Fill an empty directory with starter sections, teachers and staff"),
    ("crown", "Recompute and store the winners of every period"),
];

fn split_job_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn parse_disabled_jobs(matches: &clap::ArgMatches) -> HashSet<String> {
    let mut disabled = HashSet::with_capacity(JOB_DESCRIPTIONS.len());

    if let Some(disabled_str) = matches.get_one::<String>("disable") {
        disabled.extend(split_job_list(disabled_str));
    }

    if let Ok(env_disabled) = std::env::var("DISABLE_JOBS") {
        disabled.extend(split_job_list(&env_disabled));
    }

    disabled
}

fn env_flag(key: &str) -> bool {
    std::env::var(key).unwrap_or_default().to_lowercase() == "true"
}

async fn create_shared_pool(config: &Config) -> Result<Arc<DbPool>> {
    let pool = ConnectionManager::get_shared_pool(config).await?;
    Ok(Arc::new(pool))
}

fn create_job(job_type: &str) -> Option<Arc<dyn Job>> {
    match job_type {
        "seed" => Some(Arc::new(SeedJob::new())),
        "crown" => Some(Arc::new(CrownJob::new())),
        _ => None,
    }
}

async fn run_jobs_sequential(job_types: &[String], pool: Arc<DbPool>) -> std::result::Result<(), JobError> {
    let mut scheduler = JobScheduler::new(pool);

    for job_type in job_types {
        let job = create_job(job_type).ok_or_else(|| {
            let valid: Vec<&str> = JOB_DESCRIPTIONS.iter().map(|(name, _)| *name).collect();
            JobError::Other(format!(
                "Invalid job type: {job_type}. Valid options: {}",
                valid.join(", ")
            ))
        })?;
        scheduler.add_job(job);
    }

    tracing::info!("Running jobs: {}", job_types.join(", "));
    scheduler.run_all_sequential().await
}

fn cli() -> Command {
    Command::new("steward")
        .about("Kindness Wall background jobs")
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .value_name("JOB_TYPES")
                .help("Run specific jobs once and exit (comma-separated: seed,crown)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List all available jobs and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("disable")
                .long("disable")
                .value_name("JOB_TYPES")
                .help("Disable recurring jobs (comma-separated: crown)")
                .action(clap::ArgAction::Set),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install crypto provider");

    let matches = cli().get_matches();

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if matches.get_flag("list") {
        println!("Available jobs:");
        for (name, desc) in JOB_DESCRIPTIONS {
            println!("  {:<8} - {}", name, desc);
        }
        return Ok(());
    }

    let config = Config::from_env()?;
    let disabled_jobs = parse_disabled_jobs(&matches);

    tracing::info!("Running database migrations");
    let pool = create_shared_pool(&config).await?;
    common::database::connection::run_migrations(&pool).await?;

    if let Some(job_types_str) = matches.get_one::<String>("jobs") {
        let job_types: Vec<String> = split_job_list(job_types_str).collect();
        let outcome = run_jobs_sequential(&job_types, Arc::clone(&pool)).await;
        ConnectionManager::clear_shared_pool().await;
        return outcome.map_err(|e| ApiError::Internal(e.to_string()));
    }

    if env_flag("MIGRATE_ONLY") {
        tracing::info!("MIGRATE_ONLY=true detected - migrations complete, exiting");
        ConnectionManager::clear_shared_pool().await;
        return Ok(());
    }

    let seed_needed = SeedJob::is_needed(&pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;
    if seed_needed && !disabled_jobs.contains("seed") {
        tracing::info!("Directory is empty - seeding starter data");
        run_jobs_sequential(&["seed".to_owned()], Arc::clone(&pool))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    } else {
        tracing::info!("Directory already populated - skipping seed job");
    }

    if disabled_jobs.contains("crown") {
        tracing::warn!("All recurring jobs are disabled, exiting");
        ConnectionManager::clear_shared_pool().await;
        return Ok(());
    }

    let interval = Duration::from_secs(config.crown_interval_seconds.max(1));
    let scheduler = JobScheduler::new(Arc::clone(&pool));
    let crown_job: Arc<dyn Job> = Arc::new(CrownJob::new());
    let handle = tokio::spawn(async move { scheduler.run_recurring(crown_job, interval).await });

    tracing::info!(interval_secs = interval.as_secs(), "Crown scheduler started. Waiting for shutdown signal...");

    signal::ctrl_c().await?;

    tracing::info!("Shutdown signal received, terminating jobs...");
    handle.abort();
    ConnectionManager::clear_shared_pool().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_job_can_be_created() {
        for (name, _) in JOB_DESCRIPTIONS {
            let job = create_job(name).unwrap();
            assert_eq!(job.name(), *name);
        }
        assert!(create_job("nightly").is_none());
    }

    #[test]
    fn disabled_jobs_are_trimmed() {
        let matches = cli().get_matches_from(["steward", "--disable", " crown , ,seed"]);
        let disabled = parse_disabled_jobs(&matches);
        assert!(disabled.contains("crown"));
        assert!(disabled.contains("seed"));
        assert!(!disabled.contains(""));
    }
}
