use crate::api::PartitionSettings;
use crate::components::jukebox::JukeboxView;
use crate::components::{AppView, Icon, Navigation, OutputsPanel};
use crate::db::ClientSettings;
use dioxus::prelude::*;

#[component]
pub fn Sidebar(sidebar_open: Signal<bool>) -> Element {
    let client_settings = use_context::<Signal<ClientSettings>>();
    let partition = use_context::<Signal<PartitionSettings>>();
    let navigation = use_context::<Navigation>();
    let current_view = use_context::<Signal<AppView>>();
    let mut sidebar_open = sidebar_open;
    let view = current_view();
    let settings = client_settings();

    let panel_class = if sidebar_open() {
        "translate-x-0"
    } else {
        "-translate-x-full 2xl:translate-x-0"
    };

    rsx! {
        aside { class: "fixed 2xl:static inset-y-0 left-0 z-40 w-64 bg-zinc-950/50 border-r border-zinc-800/50 flex flex-col h-full backdrop-blur-xl transition-transform {panel_class}",
            // Logo
            div { class: "p-6 border-b border-zinc-800/50",
                div { class: "flex items-center gap-3",
                    div { class: "w-10 h-10 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center text-white font-bold text-lg shadow-lg shadow-emerald-500/20",
                        "M"
                    }
                    div { class: "min-w-0",
                        h1 { class: "text-lg font-bold text-white", "RustyMPD" }
                        p { class: "text-xs text-zinc-500 truncate", "{settings.partition} @ {settings.server_url}" }
                    }
                }
            }

            nav { class: "flex-1 overflow-y-auto p-4 space-y-1",
                div { class: "mb-6",
                    p { class: "text-xs font-semibold text-zinc-500 uppercase tracking-wider mb-3 px-3",
                        "Queue"
                    }
                    NavItem {
                        icon: "queue_music",
                        label: "Jukebox",
                        active: matches!(view, AppView::QueueJukebox(_)),
                        onclick: move |_| {
                            navigation.goto_jukebox(partition.peek().jukebox_mode());
                            sidebar_open.set(false);
                        },
                    }
                    NavItem {
                        icon: "music_note",
                        label: "Songs",
                        active: view == AppView::QueueJukebox(JukeboxView::Song),
                        onclick: move |_| {
                            navigation.navigate_to(AppView::QueueJukebox(JukeboxView::Song));
                            sidebar_open.set(false);
                        },
                    }
                    NavItem {
                        icon: "album",
                        label: "Albums",
                        active: view == AppView::QueueJukebox(JukeboxView::Album),
                        onclick: move |_| {
                            navigation.navigate_to(AppView::QueueJukebox(JukeboxView::Album));
                            sidebar_open.set(false);
                        },
                    }
                }
            }

            div { class: "p-4 border-t border-zinc-800/50 flex items-center justify-between gap-2",
                NavItem {
                    icon: "settings",
                    label: "Settings",
                    active: view == AppView::Settings,
                    onclick: move |_| {
                        navigation.navigate_to(AppView::Settings);
                        sidebar_open.set(false);
                    },
                }
                OutputsPanel {}
            }
        }
    }
}

#[component]
fn NavItem(icon: String, label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let base_class = "flex items-center gap-3 px-3 py-2.5 rounded-xl text-sm font-medium transition-all duration-200 cursor-pointer";
    let active_class = if active {
        "bg-gradient-to-r from-emerald-500/20 to-teal-500/10 text-emerald-400 shadow-sm"
    } else {
        "text-zinc-400 hover:text-white hover:bg-zinc-800/50"
    };

    rsx! {
        button {
            class: "{base_class} {active_class} w-full",
            onclick: move |e| onclick.call(e),
            Icon { name: icon.clone(), class: "text-xl".to_string() }
            span { "{label}" }
        }
    }
}
