use std::{process, sync::Arc, time::Duration};

use feedcache::{
    application::{
        content::CachedContentService,
        error::AppError,
        source::{ContentQuery, ContentSource},
    },
    cache::{ContentCache, Sweeper},
    config::{self, Command, QueryArgs},
    domain::content::ContentRecord,
    infra::{json_source::JsonFileSource, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    match cli_args.command {
        Command::Query(args) => run_query(settings, args).await,
    }
}

async fn run_query(settings: config::Settings, args: QueryArgs) -> Result<(), AppError> {
    if args.repeat == 0 {
        return Err(AppError::validation("--repeat must be at least 1"));
    }

    let source: Arc<dyn ContentSource> =
        Arc::new(JsonFileSource::load(&settings.source.path).await?);
    let cache = Arc::new(ContentCache::with_system_clock(&settings.cache));
    let sweeper = Sweeper::from_config(cache.clone(), &settings.cache);
    let service = CachedContentService::new(source, cache);

    let query = match args.niche {
        Some(niche) => ContentQuery::ByNiche {
            niche,
            limit: args.limit,
        },
        None => ContentQuery::Latest { limit: args.limit },
    };

    let result = run_repeated(
        &service,
        &query,
        args.repeat,
        Duration::from_millis(args.interval_ms),
    )
    .await;

    if let Some(sweeper) = sweeper {
        sweeper.stop().await;
    }

    let records = result?;
    let rendered = serde_json::to_string_pretty(&records)
        .map_err(|err| AppError::unexpected(format!("failed to encode records: {err}")))?;
    println!("{rendered}");

    Ok(())
}

async fn run_repeated(
    service: &CachedContentService,
    query: &ContentQuery,
    repeat: u32,
    interval: Duration,
) -> Result<Vec<ContentRecord>, AppError> {
    let mut records = Vec::new();

    for round in 1..=repeat {
        if round > 1 {
            tokio::time::sleep(interval).await;
        }

        records = service.fetch(query).await?;
        info!(
            target = "feedcache::query",
            round,
            key = %query.cache_key(),
            records = records.len(),
            cached_entries = service.cache().len(),
            "query served"
        );
    }

    Ok(records)
}
