use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber for the command-line tool.
///
/// `RUST_LOG` takes precedence over `verbose`. Output goes to stderr so that
/// stdout stays usable for data (e.g. `draft load`).
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "rpa_receipt=debug,info"
    } else {
        "rpa_receipt=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
