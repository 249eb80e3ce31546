use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MOCKIFY_LOG";

/// Install the process-wide subscriber. Events go to stderr so stdout stays
/// reserved for generated records.
pub fn init_logging(json: bool) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = if json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    result.map_err(|err| CliError::Logging(err.to_string()))
}
