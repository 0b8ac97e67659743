use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Log to stderr. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "shuangpin_core=debug,shuangpin_cli=debug"
        } else {
            "shuangpin_core=info,shuangpin_cli=info"
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    });
}
