pub mod config;
pub mod error;
pub mod inspect;
pub mod mapping;
pub mod schema;
pub mod table;

pub use config::Config;
pub use error::LoadError;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber used by every binary. `RUST_LOG` wins over
/// `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();
}
