use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, writing compact lines to stderr so stdout
/// stays clean for command output.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "boll_cli=debug,boll_core=debug,warn"
    } else {
        "boll_cli=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // a second init (tests) is not an error
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}
