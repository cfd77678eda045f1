use dioxus::prelude::*;

/// Material icon rendered from its font ligature, e.g. `volume_up`.
#[component]
pub fn Icon(name: String, class: String) -> Element {
    rsx! {
        span { class: "mi {class}", aria_hidden: "true", "{name}" }
    }
}
