use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// 初始化日志
pub fn init_log(log: Option<PathBuf>) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tutor_desk=info,tower_http=info"));
    let subscriber_builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true);
    let (non_blocking, guard) = if let Some(log) = log {
        // output to file, daily rotate, non-blocking
        if !log.is_dir() {
            anyhow::bail!("log path {} is not a directory", log.display());
        }
        let file_appender = tracing_appender::rolling::daily(log, "tutor_desk.log");
        tracing_appender::non_blocking(file_appender)
    } else {
        // output to stdout
        tracing_appender::non_blocking(std::io::stdout())
    };
    tracing::subscriber::set_global_default(
        subscriber_builder.with_writer(non_blocking).finish(),
    )?;
    Ok(guard)
}
