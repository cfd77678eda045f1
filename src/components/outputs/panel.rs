use super::{
    dropup_max_height, flip_output, parse_outputs, toggle_output, OutputAttributesModal,
    OutputButton, OutputsPanelState, VolumeControl, VolumeSignal,
};
use crate::api::{MympdClient, PartitionSettings};
use crate::components::Icon;
use crate::db::ClientSettings;
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::debug;

/// Volume dropup with the output toggles. Opening it reloads the outputs.
#[component]
pub fn OutputsPanel() -> Element {
    let client_settings = use_context::<Signal<ClientSettings>>();
    let partition = use_context::<Signal<PartitionSettings>>();
    let volume = use_context::<VolumeSignal>().0;
    let mut outputs = use_signal(OutputsPanelState::default);
    let mut open = use_signal(|| false);
    let mut max_height = use_signal(|| "none".to_string());
    let mut menu = use_signal(|| None::<Rc<MountedData>>);
    let mut list = use_signal(|| None::<Rc<MountedData>>);
    let mut editing = use_signal(|| None::<OutputButton>);

    let refresh = move || {
        spawn(async move {
            let response = MympdClient::new(client_settings.peek().server())
                .list_outputs()
                .await;
            let ligatures = partition.peek().webui.output_ligatures.clone();
            outputs.set(parse_outputs(response, &ligatures));
        });
    };

    // Measure after each render of a new output list.
    use_effect(move || {
        let _ = outputs();
        spawn(async move {
            let (Some(menu), Some(list)) = (menu.peek().clone(), list.peek().clone()) else {
                return;
            };
            let (Ok(menu_rect), Ok(list_rect)) =
                (menu.get_client_rect().await, list.get_client_rect().await)
            else {
                return;
            };
            max_height.set(dropup_max_height(list_rect.size.height, menu_rect.origin.y));
        });
    });

    let on_toggle_menu = move |_| {
        let opening = !open();
        open.set(opening);
        if opening {
            debug!(target: "outputs", "dropdown opened, refreshing outputs");
            refresh();
        }
    };

    let state = volume();

    rsx! {
        div { class: "relative",
            button {
                id: "volumeMenu",
                r#type: "button",
                class: "flex flex-col items-center px-3 py-1 text-zinc-300 hover:text-white transition-colors",
                onclick: on_toggle_menu,
                Icon { name: state.icon().to_string(), class: "text-2xl".to_string() }
                span { class: "text-[10px] text-zinc-500", "{state.menu_label()}" }
            }
            if open() {
                div {
                    id: "outputsDropdown",
                    class: "absolute bottom-full right-0 mb-2 w-72 bg-zinc-900 border border-zinc-700/50 rounded-xl shadow-xl overflow-hidden",
                    onmounted: move |evt| menu.set(Some(evt.data())),
                    VolumeControl {}
                    div {
                        id: "outputs",
                        class: "flex flex-col gap-1 p-2 overflow-y-auto",
                        style: "max-height: {max_height}",
                        onmounted: move |evt| list.set(Some(evt.data())),
                        {
                            match outputs() {
                                OutputsPanelState::Loading => rsx! {
                                    div { class: "flex justify-center py-4",
                                        Icon { name: "hourglass_empty".to_string(), class: "text-zinc-500".to_string() }
                                    }
                                },
                                OutputsPanelState::Error(message) => rsx! {
                                    div { class: "list-group-item alert alert-danger", "{message}" }
                                },
                                OutputsPanelState::Empty => rsx! {
                                    div { class: "list-group-item alert alert-secondary", "No outputs found" }
                                },
                                OutputsPanelState::Outputs(buttons) => rsx! {
                                    for output in buttons {
                                        OutputToggle {
                                            key: "{output.id}",
                                            output: output.clone(),
                                            on_toggle: move |output: OutputButton| {
                                                let request = toggle_output(&output);
                                                let server = client_settings.peek().server();
                                                spawn(async move {
                                                    MympdClient::new(server).dispatch(request).await;
                                                });
                                                outputs.with_mut(|state| flip_output(state, output.id));
                                            },
                                            on_settings: move |output: OutputButton| {
                                                open.set(false);
                                                editing.set(Some(output));
                                            },
                                        }
                                    }
                                },
                            }
                        }
                    }
                }
            }
            if let Some(output) = editing() {
                OutputAttributesModal {
                    output: output,
                    on_close: move |_| editing.set(None),
                }
            }
        }
    }
}

/// One output button. The settings icon and the button body have their own
/// handlers; the icon stops the click from reaching the body.
#[component]
fn OutputToggle(
    output: OutputButton,
    on_toggle: EventHandler<OutputButton>,
    on_settings: EventHandler<OutputButton>,
) -> Element {
    let for_toggle = output.clone();
    let for_settings = output.clone();

    rsx! {
        button {
            id: "btnOutput{output.id}",
            r#type: "button",
            title: "{output.title}",
            class: if output.active { "btn btn-secondary active flex justify-between items-center px-3 py-2 rounded-lg bg-emerald-500/20 text-emerald-300" } else { "btn btn-secondary flex justify-between items-center px-3 py-2 rounded-lg bg-zinc-800/60 text-zinc-300 hover:bg-zinc-700/60" },
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                on_toggle.call(for_toggle.clone());
            },
            Icon { name: output.icon.clone(), class: "self-center".to_string() }
            span { class: "mx-2 self-center truncate flex-1 text-left", "{output.name}" }
            a {
                class: "mi self-center text-zinc-500 hover:text-white cursor-pointer",
                title: "{output.settings_title}",
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    evt.stop_propagation();
                    on_settings.call(for_settings.clone());
                },
                "settings"
            }
        }
    }
}
