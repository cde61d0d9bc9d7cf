//! Console logging for the `scru64` binary.
//!
//! Log lines go to stderr so that stdout only carries command output and can
//! be piped. The level is taken from `RUST_LOG` and defaults to `info`, e.g.
//!
//! ```bash
//! RUST_LOG=scru64=trace scru64 --node-spec 42/8 generate -n 3
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .with_target(false)
                .with_file(true),
        )
        .try_init()?;
    Ok(())
}
