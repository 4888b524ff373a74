use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先；否則只顯示本 crate 的訊息
fn crawler_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "curriculum_etl=debug,info"
    } else {
        "curriculum_etl=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

fn plain_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crawler_filter(verbose))
        .with(plain_layer().compact())
        .init();
}

/// JSON 行格式，方便在 CI 中收集資料品質警告
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crawler_filter(verbose))
        .with(plain_layer().json())
        .init();
}
