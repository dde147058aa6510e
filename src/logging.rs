/// Install the global tracing subscriber.
///
/// Native builds log to stderr filtered by `RUST_LOG` (default `info`);
/// wasm builds go through the Dioxus logger so output lands in the browser
/// console.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init() {
    let _ = dioxus::logger::init(tracing::Level::INFO);
}
