use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load `.env` and install the tracing subscriber.
///
/// `RUST_LOG` overrides the default `complaintbot_ops=info` filter. Log lines
/// go to stderr so that tool output on stdout stays clean.
pub fn init() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "complaintbot_ops=info,complaintbot_notify=info,complaintbot_db=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
