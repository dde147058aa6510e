fn main() {
    // A local .env (desktop dev) takes precedence over the bundled config.
    #[cfg(not(target_arch = "wasm32"))]
    let _ = dotenvy::dotenv();

    taskmind::logging::init();
    dioxus::launch(taskmind::ui::App);
}
