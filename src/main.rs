use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod utils;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const MATERIAL_ICONS: &str = "https://fonts.googleapis.com/icon?family=Material+Icons";

fn main() {
    configure_logging();
    dioxus::launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(target_arch = "wasm32")]
fn configure_logging() {
    // Falls back to the launcher's default logger when already set.
    let _ = dioxus::logger::init(tracing::Level::INFO);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#18181b" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "RustyMPD" }

        document::Stylesheet { href: MATERIAL_ICONS }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
