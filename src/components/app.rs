use crate::api::{MympdClient, PartitionSettings};
use crate::components::jukebox::{JukeboxView, QueueJukeboxAlbum, QueueJukeboxSong};
use crate::components::outputs::{use_volume_refresh, VolumeState};
use crate::components::views::SettingsView;
use crate::components::{jukebox_view_for, view_label, AppView, Icon, Navigation, Sidebar, VolumeSignal};
use crate::db::{initialize_database, load_settings, ClientSettings};
use dioxus::prelude::*;
use tracing::{info, warn};

const BACK_SWIPE_THRESHOLD: f64 = 100.0;

#[component]
pub fn AppShell() -> Element {
    let mut client_settings = use_signal(ClientSettings::default);
    let mut partition = use_signal(PartitionSettings::default);
    let volume = use_signal(|| VolumeState::Unknown);
    let mut current_view = use_signal(AppView::default);
    let navigation_stack = use_signal(Vec::<AppView>::new);
    let navigation = Navigation::new(current_view, navigation_stack);
    let mut settings_loaded = use_signal(|| false);
    let sidebar_open = use_signal(|| false);
    let swipe_start = use_signal(|| None::<f64>);

    // Provide state via context
    use_context_provider(|| client_settings);
    use_context_provider(|| partition);
    use_context_provider(|| VolumeSignal(volume));
    use_context_provider(|| current_view);
    use_context_provider(|| navigation);

    // Load the stored client settings once on mount
    use_effect(move || {
        spawn(async move {
            if let Err(err) = initialize_database().await {
                warn!(target: "settings", error = %err, "could not initialize settings storage");
            }
            match load_settings().await {
                Ok(settings) => client_settings.set(settings),
                Err(err) => warn!(target: "settings", error = %err, "using default client settings"),
            }
            settings_loaded.set(true);
        });
    });

    // Refetch the partition settings whenever the server or partition changes
    let server = use_memo(move || client_settings().server());
    use_effect(move || {
        if !settings_loaded() {
            return;
        }
        let server = server();
        spawn(async move {
            match MympdClient::new(server.clone()).get_settings().await {
                Ok(settings) => {
                    info!(
                        target: "settings",
                        url = %server.url,
                        partition = %server.partition,
                        jukebox_mode = ?settings.jukebox_mode(),
                        "partition settings loaded"
                    );
                    let view = *current_view.peek();
                    if matches!(view, AppView::QueueJukebox(_)) {
                        current_view.set(jukebox_view_for(settings.jukebox_mode()));
                    }
                    partition.set(settings);
                }
                Err(err) => {
                    warn!(target: "settings", error = %err, "could not load partition settings")
                }
            }
        });
    });

    use_volume_refresh(client_settings, volume);

    let on_pointer_down = {
        let mut swipe_start = swipe_start;
        move |evt: PointerEvent| {
            swipe_start.set(Some(evt.client_coordinates().x));
        }
    };

    let on_pointer_move = {
        let mut swipe_start = swipe_start;
        move |evt: PointerEvent| {
            if let Some(start) = swipe_start() {
                let delta = evt.client_coordinates().x - start;
                if delta > BACK_SWIPE_THRESHOLD && navigation.can_go_back() {
                    navigation.go_back();
                    swipe_start.set(None);
                }
            }
        }
    };

    let on_pointer_end = {
        let mut swipe_start = swipe_start;
        move |_| {
            swipe_start.set(None);
        }
    };

    let view = current_view();
    let can_go_back = navigation.can_go_back();

    rsx! {
        div { class: "app-container flex min-h-screen text-white overflow-hidden",
            if sidebar_open() {
                div {
                    class: "fixed inset-0 bg-black/60 backdrop-blur-sm z-30 2xl:hidden",
                    onclick: {
                        let mut sidebar_open = sidebar_open;
                        move |_| sidebar_open.set(false)
                    },
                }
            }

            Sidebar { sidebar_open: sidebar_open }

            // Main content area
            div { class: "flex-1 flex flex-col overflow-hidden",
                header { class: "mobile-safe-top 2xl:hidden border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur-xl",
                    div { class: "flex items-center justify-between px-4 py-3",
                        if can_go_back {
                            button {
                                class: "p-2 rounded-lg text-zinc-300 hover:text-white hover:bg-zinc-800/60 transition-colors",
                                aria_label: "Go back",
                                onclick: move |_| {
                                    let _ = navigation.go_back();
                                },
                                Icon { name: "arrow_back".to_string(), class: "text-xl".to_string() }
                            }
                        } else {
                            button {
                                class: "p-2 rounded-lg text-zinc-300 hover:text-white hover:bg-zinc-800/60 transition-colors",
                                aria_label: "Open menu",
                                onclick: {
                                    let mut sidebar_open = sidebar_open;
                                    move |_| sidebar_open.set(true)
                                },
                                Icon { name: "menu".to_string(), class: "text-xl".to_string() }
                            }
                        }
                        div { class: "flex flex-col items-center text-center",
                            span { class: "text-xs uppercase tracking-widest text-zinc-500",
                                "RustyMPD"
                            }
                            span { class: "text-sm font-semibold text-white", "{view_label(&view)}" }
                        }
                        button {
                            class: "p-2 rounded-lg text-zinc-300 hover:text-white hover:bg-zinc-800/60 transition-colors",
                            aria_label: "Open settings",
                            onclick: move |_| navigation.navigate_to(AppView::Settings),
                            Icon { name: "settings".to_string(), class: "text-xl".to_string() }
                        }
                    }
                }

                main {
                    class: "flex-1 overflow-y-auto main-scroll",
                    onpointerdown: on_pointer_down,
                    onpointermove: on_pointer_move,
                    onpointerup: on_pointer_end,
                    onpointerleave: on_pointer_end,
                    div { class: "page-shell",
                        {
                            match view {
                                AppView::QueueJukebox(JukeboxView::Song) => rsx! { QueueJukeboxSong {} },
                                AppView::QueueJukebox(JukeboxView::Album) => rsx! { QueueJukeboxAlbum {} },
                                AppView::Settings => rsx! { SettingsView {} },
                            }
                        }
                    }
                }
            }
        }
    }
}
