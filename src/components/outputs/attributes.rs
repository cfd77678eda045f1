use super::{set_output_attributes, OutputButton};
use crate::api::MympdClient;
use crate::components::Icon;
use crate::db::ClientSettings;
use dioxus::prelude::*;
use std::collections::BTreeMap;

/// Dialog listing an output's attributes; editable when it has any.
#[component]
pub fn OutputAttributesModal(output: OutputButton, on_close: EventHandler<()>) -> Element {
    let client_settings = use_context::<Signal<ClientSettings>>();
    let initial = output.attributes.clone();
    let mut values = use_signal(move || initial);
    let output_id = output.id;

    let on_save = move |_| {
        let attributes: BTreeMap<String, String> = values.peek().clone();
        let request = set_output_attributes(output_id, &attributes);
        let server = client_settings.peek().server();
        spawn(async move {
            MympdClient::new(server).dispatch(request).await;
        });
        on_close.call(());
    };

    let entries: Vec<(String, String)> = values().into_iter().collect();
    let has_attributes = !entries.is_empty();

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/60",
            div { class: "w-full max-w-md bg-zinc-900 border border-zinc-700/50 rounded-2xl p-6 space-y-4",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-lg font-semibold text-white", "{output.name}" }
                    button {
                        r#type: "button",
                        class: "p-1 text-zinc-400 hover:text-white",
                        onclick: move |_| on_close.call(()),
                        Icon { name: "close".to_string(), class: "".to_string() }
                    }
                }
                p { class: "text-xs text-zinc-500", "{output.title}" }
                if has_attributes {
                    div { class: "space-y-2",
                        for (key, value) in entries {
                            {
                                let field = key.clone();
                                rsx! {
                                    label { key: "{key}", class: "flex items-center gap-3 text-sm",
                                        span { class: "w-40 text-zinc-400 truncate", "{key}" }
                                        input {
                                            class: "flex-1 px-2 py-1 rounded bg-zinc-800 text-white",
                                            value: "{value}",
                                            oninput: move |e: Event<FormData>| {
                                                let field = field.clone();
                                                values.with_mut(|map| {
                                                    map.insert(field, e.value());
                                                });
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "flex justify-end",
                        button {
                            r#type: "button",
                            class: "px-4 py-2 rounded-xl bg-emerald-600 hover:bg-emerald-500 text-white",
                            onclick: on_save,
                            "Save"
                        }
                    }
                } else {
                    p { class: "text-sm text-zinc-400", "No attributes" }
                }
            }
        }
    }
}
