use anyhow::{Result, ensure};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let worker_server = super::config_model::WorkerServer {
        port: std::env::var("SERVER_PORT_WORKER")
            .expect("SERVER_PORT_WORKER is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let jobs = super::config_model::Jobs {
        interval_secs: std::env::var("JOB_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()?,
        page_size: std::env::var("JOB_PAGE_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse()?,
        halt_on_error: std::env::var("JOB_HALT_ON_ERROR")
            .unwrap_or_else(|_| "false".to_string())
            .parse()?,
        cutoff_hour: std::env::var("BATCH_CUTOFF_HOUR")
            .unwrap_or_else(|_| "16".to_string())
            .parse()?,
    };
    ensure!(jobs.cutoff_hour < 24, "BATCH_CUTOFF_HOUR is invalid");

    Ok(DotEnvyConfig {
        worker_server,
        database,
        jobs,
    })
}
