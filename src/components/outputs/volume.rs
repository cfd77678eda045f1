use super::{parse_volume, set_volume, volume_step, VolumeDirection, VolumeState};
use crate::api::{ApiRequest, MympdClient, PartitionSettings, ServerConfig};
use crate::components::Icon;
use crate::db::ClientSettings;
use crate::utils::sleep_ms;
use dioxus::prelude::*;
use tracing::warn;

const VOLUME_POLL_MS: u32 = 2000;

/// Shared volume state, read by the dropdown toggle and the slider.
#[derive(Clone, Copy)]
pub struct VolumeSignal(pub Signal<VolumeState>);

async fn refresh_volume(server: ServerConfig, mut volume: Signal<VolumeState>) {
    match MympdClient::new(server).get_volume().await {
        Ok(result) => volume.set(parse_volume(result.volume)),
        Err(err) => warn!(target: "outputs", error = %err, "volume refresh failed"),
    }
}

/// Polls the daemon so the volume stays current while the page is open.
pub fn use_volume_refresh(client_settings: Signal<ClientSettings>, volume: Signal<VolumeState>) {
    use_future(move || async move {
        loop {
            let server = client_settings.peek().server();
            refresh_volume(server, volume).await;
            sleep_ms(VOLUME_POLL_MS).await;
        }
    });
}

fn send_volume_request(server: ServerConfig, request: ApiRequest, volume: Signal<VolumeState>) {
    spawn(async move {
        MympdClient::new(server.clone()).dispatch(request).await;
        refresh_volume(server, volume).await;
    });
}

#[component]
pub fn VolumeControl() -> Element {
    let client_settings = use_context::<Signal<ClientSettings>>();
    let partition = use_context::<Signal<PartitionSettings>>();
    let volume = use_context::<VolumeSignal>().0;
    let state = volume();

    let on_change = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<i32>() {
            send_volume_request(client_settings.peek().server(), set_volume(value), volume);
        }
    };

    let on_step = move |direction: VolumeDirection| {
        let step = partition.peek().volume_step;
        send_volume_request(
            client_settings.peek().server(),
            volume_step(direction, step),
            volume,
        );
    };

    rsx! {
        div { class: "px-3 py-2 space-y-2 border-b border-zinc-800/60",
            div {
                id: "volumeControl",
                class: if state.slider_visible() { "flex items-center gap-2" } else { "hidden" },
                button {
                    r#type: "button",
                    title: "Volume down",
                    class: "p-1 text-zinc-400 hover:text-white transition-colors",
                    onclick: move |_| on_step(VolumeDirection::Down),
                    Icon { name: "volume_down".to_string(), class: "text-lg".to_string() }
                }
                input {
                    id: "volumeBar",
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: state.slider_value(),
                    class: "flex-1 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-emerald-500",
                    onchange: on_change,
                }
                button {
                    r#type: "button",
                    title: "Volume up",
                    class: "p-1 text-zinc-400 hover:text-white transition-colors",
                    onclick: move |_| on_step(VolumeDirection::Up),
                    Icon { name: "volume_up".to_string(), class: "text-lg".to_string() }
                }
            }
            p { id: "volumePrct", class: "text-xs text-zinc-400 text-center", "{state.label()}" }
        }
    }
}
