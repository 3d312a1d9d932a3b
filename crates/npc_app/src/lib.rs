pub mod actions;
#[cfg(feature = "egui-desktop")]
pub mod app;
pub mod driver;
pub mod error;
pub mod prefs;
pub mod script;
pub mod state;

#[cfg(feature = "egui-desktop")]
pub use app::launch;

/// Installs the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "npc_core=info,npc_app=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
