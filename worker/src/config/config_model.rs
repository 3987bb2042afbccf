#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub worker_server: WorkerServer,
    pub database: Database,
    pub jobs: Jobs,
}

#[derive(Debug, Clone)]
pub struct WorkerServer {
    pub port: u16,
    pub timeout: u64,
    pub body_limit: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Jobs {
    /// Seconds between pipeline runs. The loop stands in for external
    /// cron; overlapping runs are safe because every job is idempotent.
    pub interval_secs: u64,
    pub page_size: i64,
    /// When true a failed unit aborts the whole run instead of being
    /// logged and skipped.
    pub halt_on_error: bool,
    /// UTC hour of the delivery date at which batches stop accepting
    /// orders.
    pub cutoff_hour: u32,
}
