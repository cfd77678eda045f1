use crate::api::{ClickAction, JukeboxMode, MympdClient, PartitionSettings};
use crate::components::jukebox::JukeboxView;
use crate::components::Icon;
use crate::db::{save_settings, ClientSettings, ViewLayout};
use crate::utils::parse_field_list;
use dioxus::prelude::*;
use tracing::{info, warn};

/// Editable copy of the client settings, as typed into the form.
#[derive(Debug, Clone, PartialEq)]
struct SettingsForm {
    server_url: String,
    partition: String,
    page_size: String,
    song_fields: String,
    album_fields: String,
}

impl SettingsForm {
    fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            server_url: settings.server_url.clone(),
            partition: settings.partition.clone(),
            page_size: settings.page_size.to_string(),
            song_fields: settings.jukebox_song.fields.join(", "),
            album_fields: settings.jukebox_album.fields.join(", "),
        }
    }

    fn apply(&self, base: &ClientSettings) -> Result<ClientSettings, String> {
        let server_url = self.server_url.trim();
        if server_url.is_empty() {
            return Err("Server URL must not be empty".to_string());
        }
        let page_size = match self.page_size.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => return Err("Page size must be a positive number".to_string()),
        };
        let song_fields = parse_field_list(&self.song_fields);
        let album_fields = parse_field_list(&self.album_fields);
        if song_fields.is_empty() || album_fields.is_empty() {
            return Err("Each view needs at least one field".to_string());
        }

        let mut settings = base.clone();
        settings.server_url = server_url.to_string();
        settings.partition = self.partition.trim().to_string();
        settings.page_size = page_size;
        settings.jukebox_song.fields = song_fields;
        settings.jukebox_album.fields = album_fields;
        Ok(settings)
    }
}

fn jukebox_mode_label(mode: JukeboxMode) -> &'static str {
    match mode {
        JukeboxMode::Off => "Off",
        JukeboxMode::Song => "Song",
        JukeboxMode::Album => "Album",
    }
}

fn click_action_label(action: ClickAction) -> &'static str {
    action.label().unwrap_or("Not available in this client")
}

#[component]
pub fn SettingsView() -> Element {
    let mut client_settings = use_context::<Signal<ClientSettings>>();
    let mut partition = use_context::<Signal<PartitionSettings>>();
    let mut form = use_signal(|| SettingsForm::from_settings(&client_settings.peek()));
    let mut save_status = use_signal(|| None::<Result<String, String>>);
    let mut is_reloading = use_signal(|| false);

    let on_save = move |_| {
        let updated = match form.peek().apply(&client_settings.peek()) {
            Ok(updated) => updated,
            Err(message) => {
                save_status.set(Some(Err(message)));
                return;
            }
        };
        client_settings.set(updated.clone());
        spawn(async move {
            match save_settings(updated).await {
                Ok(()) => {
                    info!(target: "settings", "client settings saved");
                    save_status.set(Some(Ok("Settings saved".to_string())));
                }
                Err(err) => {
                    warn!(target: "settings", error = %err, "could not save client settings");
                    save_status.set(Some(Err(err.to_string())));
                }
            }
        });
    };

    let on_reset = move |_| {
        form.set(SettingsForm::from_settings(&client_settings.peek()));
        save_status.set(None);
    };

    let on_reload = move |_| {
        if is_reloading() {
            return;
        }
        is_reloading.set(true);
        let server = client_settings.peek().server();
        spawn(async move {
            match MympdClient::new(server).get_settings().await {
                Ok(settings) => {
                    partition.set(settings);
                    save_status.set(Some(Ok("Server settings reloaded".to_string())));
                }
                Err(err) => save_status.set(Some(Err(err.to_string()))),
            }
            is_reloading.set(false);
        });
    };

    let mut on_layout = move |view: JukeboxView, layout: ViewLayout| {
        let updated = {
            let mut settings = client_settings.write();
            view.settings_mut(&mut settings).layout = layout;
            settings.clone()
        };
        spawn(async move {
            if let Err(err) = save_settings(updated).await {
                warn!(target: "settings", error = %err, "could not save view layout");
            }
        });
    };

    let status_banner = match save_status() {
        Some(Ok(message)) => rsx! {
            div { class: "px-4 py-2 bg-emerald-500/20 border border-emerald-500/50 rounded-lg text-emerald-400 text-sm",
                "{message}"
            }
        },
        Some(Err(message)) => rsx! {
            div { class: "alert alert-danger px-4 py-2 bg-red-500/20 border border-red-500/50 rounded-lg text-red-300 text-sm",
                "{message}"
            }
        },
        None => rsx! {},
    };

    let values = form();
    let settings = client_settings();
    let server_settings = partition();

    rsx! {
        div { class: "space-y-8",
            header { class: "page-header",
                h1 { class: "page-title", "Settings" }
                p { class: "page-subtitle", "Connection and list preferences" }
            }

            {status_banner}

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                h2 { class: "text-lg font-semibold text-white mb-6", "Connection" }
                div { class: "space-y-4",
                    SettingsInput {
                        label: "Server URL",
                        value: values.server_url.clone(),
                        oninput: move |value: String| form.with_mut(|f| f.server_url = value),
                    }
                    SettingsInput {
                        label: "Partition",
                        value: values.partition.clone(),
                        oninput: move |value: String| form.with_mut(|f| f.partition = value),
                    }
                }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                h2 { class: "text-lg font-semibold text-white mb-6", "Jukebox lists" }
                div { class: "space-y-4",
                    SettingsInput {
                        label: "Entries per page",
                        value: values.page_size.clone(),
                        oninput: move |value: String| form.with_mut(|f| f.page_size = value),
                    }
                    SettingsInput {
                        label: "Song columns",
                        value: values.song_fields.clone(),
                        oninput: move |value: String| form.with_mut(|f| f.song_fields = value),
                    }
                    LayoutSelect {
                        label: "Song layout",
                        layout: settings.jukebox_song.layout,
                        onchange: move |layout| on_layout(JukeboxView::Song, layout),
                    }
                    SettingsInput {
                        label: "Album columns",
                        value: values.album_fields.clone(),
                        oninput: move |value: String| form.with_mut(|f| f.album_fields = value),
                    }
                    LayoutSelect {
                        label: "Album layout",
                        layout: settings.jukebox_album.layout,
                        onchange: move |layout| on_layout(JukeboxView::Album, layout),
                    }
                }
                div { class: "flex justify-end gap-2 mt-6",
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded-xl bg-zinc-800 hover:bg-zinc-700 text-zinc-300",
                        onclick: on_reset,
                        "Reset"
                    }
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded-xl bg-emerald-600 hover:bg-emerald-500 text-white",
                        onclick: on_save,
                        "Save"
                    }
                }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                div { class: "flex items-center justify-between mb-6",
                    h2 { class: "text-lg font-semibold text-white", "Server settings" }
                    button {
                        r#type: "button",
                        disabled: is_reloading(),
                        class: "px-3 py-2 rounded-xl bg-zinc-800 hover:bg-zinc-700 text-zinc-300 flex items-center gap-2 disabled:opacity-40",
                        onclick: on_reload,
                        Icon { name: "refresh".to_string(), class: "".to_string() }
                        "Reload"
                    }
                }
                dl { class: "grid grid-cols-2 gap-y-3 text-sm",
                    dt { class: "text-zinc-400", "Jukebox mode" }
                    dd { class: "text-white", "{jukebox_mode_label(server_settings.jukebox_mode())}" }
                    dt { class: "text-zinc-400", "Volume step" }
                    dd { class: "text-white", "{server_settings.volume_step} %" }
                    dt { class: "text-zinc-400", "Click on song" }
                    dd { class: "text-white", "{click_action_label(server_settings.webui.click_song)}" }
                    dt { class: "text-zinc-400", "Quick play" }
                    dd { class: "text-white", "{click_action_label(server_settings.webui.click_quick_play)}" }
                }
            }
        }
    }
}

#[component]
fn SettingsInput(label: String, value: String, oninput: EventHandler<String>) -> Element {
    rsx! {
        label { class: "block",
            span { class: "block text-sm font-medium text-zinc-400 mb-2", "{label}" }
            input {
                class: "w-full px-4 py-2 rounded-xl bg-zinc-900/60 border border-zinc-700/50 text-white focus:outline-none focus:border-emerald-500/60",
                value: "{value}",
                oninput: move |e: Event<FormData>| oninput.call(e.value()),
            }
        }
    }
}

#[component]
fn LayoutSelect(label: String, layout: ViewLayout, onchange: EventHandler<ViewLayout>) -> Element {
    rsx! {
        label { class: "flex items-center justify-between",
            span { class: "text-sm font-medium text-zinc-400", "{label}" }
            select {
                class: "px-3 py-1.5 rounded-lg bg-zinc-800 text-zinc-200 text-sm",
                value: if layout == ViewLayout::Grid { "grid" } else { "table" },
                onchange: move |e: Event<FormData>| {
                    let layout = if e.value() == "grid" { ViewLayout::Grid } else { ViewLayout::Table };
                    onchange.call(layout);
                },
                option { value: "table", "Table" }
                option { value: "grid", "Grid" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_round_trips_current_settings() {
        let settings = ClientSettings::default();
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.apply(&settings), Ok(settings.clone()));
    }

    #[test]
    fn form_trims_and_parses_fields() {
        let base = ClientSettings::default();
        let form = SettingsForm {
            server_url: " http://music.local:8080/ ".to_string(),
            partition: "kitchen".to_string(),
            page_size: "25".to_string(),
            song_fields: "Pos, Title ,Duration".to_string(),
            album_fields: "Pos,Album".to_string(),
        };
        let updated = form.apply(&base).unwrap();
        assert_eq!(updated.server_url, "http://music.local:8080/");
        assert_eq!(updated.partition, "kitchen");
        assert_eq!(updated.page_size, 25);
        assert_eq!(updated.jukebox_song.fields, vec!["Pos", "Title", "Duration"]);
        assert_eq!(updated.jukebox_song.layout, base.jukebox_song.layout);
    }

    #[test]
    fn invalid_page_size_is_rejected() {
        let base = ClientSettings::default();
        let mut form = SettingsForm::from_settings(&base);
        form.page_size = "0".to_string();
        assert!(form.apply(&base).is_err());
        form.page_size = "many".to_string();
        assert!(form.apply(&base).is_err());
    }

    #[test]
    fn empty_url_or_fields_are_rejected() {
        let base = ClientSettings::default();
        let mut form = SettingsForm::from_settings(&base);
        form.server_url = "   ".to_string();
        assert!(form.apply(&base).is_err());

        let mut form = SettingsForm::from_settings(&base);
        form.album_fields = " , ".to_string();
        assert!(form.apply(&base).is_err());
    }

    #[test]
    fn unsupported_click_action_has_placeholder_label() {
        assert_eq!(
            click_action_label(ClickAction::Unsupported),
            "Not available in this client"
        );
        assert_eq!(click_action_label(ClickAction::Replace), "Replace queue");
    }
}
