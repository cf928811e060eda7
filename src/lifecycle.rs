//! Process setup for the command-line binary.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Initialize logging with tracing_subscriber.
///
/// `log` records are bridged into tracing. `RUST_LOG` directives are applied
/// last and take precedence over the defaults.
pub fn init_logging(verbose: bool) {
    let crate_level = if verbose { "seo_scorer=trace" } else { "seo_scorer=debug" };
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    let filter = ["info", "reqwest=warn", "hyper=warn", crate_level]
        .into_iter()
        .chain(env.split(','))
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::new(""), |filter, directive| filter.add_directive(directive));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if installed.is_err() {
        log::debug!("Logging already initialized");
    }
}
