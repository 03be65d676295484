use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the CLI subscriber. Logs go to stderr so stdout carries only the report.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between warn and debug.
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "fixed_patch=debug"
    } else {
        "fixed_patch=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
