use std::path::PathBuf;

use anyhow::{bail, Result};
use serde_json::{json, Value};
use shared::database::redact_database_url;
use shared::{create_connection_pool, run_sql, run_sql_file, Settings};
use tracing::info;

pub fn config_json(settings: &Settings) -> Result<Value> {
    let mut value = serde_json::to_value(settings)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("db_url".to_string(), json!(redact_database_url(&settings.db_url)));
        fields.insert("ticker_list".to_string(), json!(settings.ticker_list()));
        fields.insert("resolved_end_date".to_string(), json!(settings.end_date_or_today()));
    }
    Ok(value)
}

pub fn show_config(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config_json(settings)?)?);
    Ok(())
}

pub fn show_tickers(settings: &Settings) {
    for ticker in settings.ticker_list() {
        println!("{}", ticker);
    }
}

pub async fn run(settings: &Settings, files: &[PathBuf], sql: Option<&str>) -> Result<()> {
    if files.is_empty() && sql.is_none() {
        bail!("Nothing to run: pass one or more SQL files or --sql");
    }

    let pool = create_connection_pool(&settings.db_url)?;

    for file in files {
        run_sql_file(&pool, file).await?;
    }
    if let Some(sql) = sql {
        run_sql(&pool, sql).await?;
    }

    info!(
        "Applied {} file(s){}",
        files.len(),
        if sql.is_some() { " and inline SQL" } else { "" }
    );
    pool.close().await;
    Ok(())
}

pub async fn ping(settings: &Settings) -> Result<()> {
    let pool = create_connection_pool(&settings.db_url)?;
    shared::ping(&pool).await?;
    println!("ok: {}", redact_database_url(&settings.db_url));
    pool.close().await;
    Ok(())
}

pub fn version_info() -> String {
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let git_branch = option_env!("GIT_BRANCH").unwrap_or("unknown");
    let git_tag = option_env!("GIT_TAG").unwrap_or("unknown");

    let build_time_raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    let build_time = match build_time_raw.parse::<i64>() {
        Ok(epoch) => {
            use chrono::{TimeZone, Utc};
            match Utc.timestamp_opt(epoch, 0).single() {
                Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                None => build_time_raw.to_string(),
            }
        }
        Err(_) => build_time_raw.to_string(),
    };

    format!(
        "cfa {}\nBranch: {}\nTag: {}\nCommit: {}\nBuild time: {}\nOS: {}",
        env!("CARGO_PKG_VERSION"),
        git_branch,
        git_tag,
        git_hash,
        build_time,
        option_env!("TARGET_OS").unwrap_or("unknown")
    )
}
