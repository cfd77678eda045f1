use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub partition: String,
}

impl ServerConfig {
    pub fn new(url: String, partition: String) -> Self {
        let partition = partition.trim().to_string();
        Self {
            url: url.trim_end_matches('/').to_string(),
            partition: if partition.is_empty() {
                DEFAULT_PARTITION.to_string()
            } else {
                partition
            },
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/{}", self.url, self.partition)
    }
}

pub const DEFAULT_PARTITION: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Output {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub plugin: String,
    #[serde(default)]
    pub state: u8,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Output {
    pub fn is_enabled(&self) -> bool {
        self.state == 1
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct OutputList {
    #[serde(default, alias = "numOutputs")]
    pub num_outputs: u32,
    #[serde(default)]
    pub data: Vec<Output>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VolumeResult {
    pub volume: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Album,
    /// Also taken by types this client does not know.
    #[default]
    #[serde(other)]
    Song,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Album => "album",
        }
    }
}

/// One row of the jukebox queue. Tags beyond uri/Title/Type/Pos are kept in
/// `tags` so tables can show whatever fields were fetched.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct JukeboxEntry {
    #[serde(default)]
    pub uri: String,
    #[serde(default, rename = "Title")]
    pub title: String,
    #[serde(default, rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default, rename = "Pos")]
    pub pos: u32,
    #[serde(flatten)]
    pub tags: Map<String, Value>,
}

impl JukeboxEntry {
    /// Display text for a fetched field.
    pub fn column(&self, field: &str) -> String {
        match field {
            "uri" => self.uri.clone(),
            "Title" => self.title.clone(),
            "Type" => self.entry_type.as_str().to_string(),
            "Pos" => (self.pos + 1).to_string(),
            "Duration" => self
                .tags
                .get(field)
                .and_then(Value::as_f64)
                .map(|secs| format_duration(secs.max(0.0) as u32))
                .unwrap_or_default(),
            _ => self.tags.get(field).map(tag_text).unwrap_or_default(),
        }
    }
}

fn tag_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(values) => values
            .iter()
            .map(tag_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct JukeboxList {
    #[serde(default, alias = "totalEntities")]
    pub total_entities: i64,
    #[serde(default, alias = "returnedEntities")]
    pub returned_entities: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub data: Vec<JukeboxEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JukeboxMode {
    #[default]
    Off,
    Song,
    Album,
}

/// What happens when a song or album row is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ClickAction {
    #[default]
    Append,
    AppendPlay,
    InsertAfterCurrent,
    InsertPlayAfterCurrent,
    Replace,
    ReplacePlay,
    /// Actions this client does not offer (song details, context menu).
    #[serde(other)]
    Unsupported,
}

impl ClickAction {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Append => Some("Append to queue"),
            Self::AppendPlay => Some("Append to queue and play"),
            Self::InsertAfterCurrent => Some("Insert after current playing song"),
            Self::InsertPlayAfterCurrent => Some("Insert after current playing song and play"),
            Self::Replace => Some("Replace queue"),
            Self::ReplacePlay => Some("Replace queue and play"),
            Self::Unsupported => None,
        }
    }

    pub fn plays(self) -> bool {
        matches!(
            self,
            Self::AppendPlay | Self::InsertPlayAfterCurrent | Self::ReplacePlay
        )
    }
}

/// Settings the daemon reports for the active partition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartitionSettings {
    #[serde(default = "default_volume_step", alias = "volumeStep")]
    pub volume_step: u32,
    #[serde(default)]
    pub partition: PartitionState,
    #[serde(default, alias = "webuiSettings")]
    pub webui: WebuiSettings,
}

fn default_volume_step() -> u32 {
    5
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            volume_step: default_volume_step(),
            partition: PartitionState::default(),
            webui: WebuiSettings::default(),
        }
    }
}

impl PartitionSettings {
    pub fn jukebox_mode(&self) -> JukeboxMode {
        self.partition.jukebox_mode
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PartitionState {
    #[serde(default, alias = "jukeboxMode")]
    pub jukebox_mode: JukeboxMode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebuiSettings {
    #[serde(default, alias = "clickSong")]
    pub click_song: ClickAction,
    #[serde(default = "default_click_quick_play", alias = "clickQuickPlay")]
    pub click_quick_play: ClickAction,
    #[serde(default = "default_output_ligatures", alias = "outputLigatures")]
    pub output_ligatures: BTreeMap<String, String>,
}

fn default_click_quick_play() -> ClickAction {
    ClickAction::Replace
}

pub fn default_output_ligatures() -> BTreeMap<String, String> {
    [
        ("alsa", "speaker"),
        ("default", "volume_up"),
        ("fifo", "waves"),
        ("httpd", "stream"),
        ("pipewire", "speaker"),
        ("pulse", "speaker"),
        ("snapcast", "cast"),
    ]
    .into_iter()
    .map(|(plugin, icon)| (plugin.to_string(), icon.to_string()))
    .collect()
}

impl Default for WebuiSettings {
    fn default() -> Self {
        Self {
            click_song: ClickAction::default(),
            click_quick_play: default_click_quick_play(),
            output_ligatures: default_output_ligatures(),
        }
    }
}

pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_config_trims_url_and_defaults_partition() {
        let server = ServerConfig::new("http://mympd.local/".to_string(), " ".to_string());
        assert_eq!(server.api_url(), "http://mympd.local/api/default");
    }

    #[test]
    fn jukebox_entry_keeps_extra_tags() {
        let entry: JukeboxEntry = serde_json::from_value(json!({
            "uri": "music/a.flac",
            "Title": "Song A",
            "Type": "song",
            "Pos": 2,
            "Artist": ["First", "Second"],
            "Duration": 185.2
        }))
        .unwrap();

        assert_eq!(entry.pos, 2);
        assert_eq!(entry.column("Pos"), "3");
        assert_eq!(entry.column("Artist"), "First, Second");
        assert_eq!(entry.column("Duration"), "3:05");
        assert_eq!(entry.column("Genre"), "");
    }

    #[test]
    fn unknown_entry_type_reads_as_song() {
        let list: JukeboxList = serde_json::from_value(json!({
            "totalEntities": 2,
            "data": [
                { "uri": "stream.m3u", "Title": "Radio", "Type": "stream", "Pos": 0 },
                { "uri": "album-1", "Title": "Blue", "Type": "album", "Pos": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(list.data[0].entry_type, EntryType::Song);
        assert_eq!(list.data[1].entry_type, EntryType::Album);
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings: PartitionSettings = serde_json::from_value(json!({
            "partition": { "jukeboxMode": "album" },
            "webuiSettings": { "clickSong": "view" }
        }))
        .unwrap();

        assert_eq!(settings.volume_step, 5);
        assert_eq!(settings.jukebox_mode(), JukeboxMode::Album);
        assert_eq!(settings.webui.click_song, ClickAction::Unsupported);
        assert_eq!(settings.webui.click_quick_play, ClickAction::Replace);
        assert_eq!(settings.webui.output_ligatures["default"], "volume_up");
    }

    #[test]
    fn format_duration_pads_seconds() {
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(0), "0:00");
    }
}
