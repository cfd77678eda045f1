use crate::api::models::{ServerConfig, DEFAULT_PARTITION};
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

/// Error type for settings storage on native platforms
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "rustympd.client_settings";

/// How a jukebox view lays out its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewLayout {
    #[default]
    Table,
    Grid,
}

/// Layout and fetched tags for one list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub layout: ViewLayout,
    pub fields: Vec<String>,
}

impl ViewSettings {
    fn with_fields(fields: &[&str]) -> Self {
        Self {
            layout: ViewLayout::Table,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Client-side settings stored in the browser or the local database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    #[serde(default = "default_partition")]
    pub partition: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_jukebox_song_view")]
    pub jukebox_song: ViewSettings,
    #[serde(default = "default_jukebox_album_view")]
    pub jukebox_album: ViewSettings,
}

fn default_partition() -> String {
    DEFAULT_PARTITION.to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_jukebox_song_view() -> ViewSettings {
    ViewSettings::with_fields(&["Pos", "Title", "Artist", "Album", "Duration"])
}

fn default_jukebox_album_view() -> ViewSettings {
    ViewSettings::with_fields(&["Pos", "Album", "AlbumArtist"])
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            partition: default_partition(),
            page_size: default_page_size(),
            jukebox_song: default_jukebox_song_view(),
            jukebox_album: default_jukebox_album_view(),
        }
    }
}

impl ClientSettings {
    pub fn server(&self) -> ServerConfig {
        ServerConfig::new(self.server_url.clone(), self.partition.clone())
    }
}

#[cfg(target_arch = "wasm32")]
fn default_server_url() -> String {
    // Served by the daemon itself unless configured otherwise.
    web_origin().unwrap_or_else(|| "http://localhost".to_string())
}

#[cfg(target_arch = "wasm32")]
fn web_origin() -> Option<String> {
    let location = web_sys::window()?.location();
    location.origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_server_url() -> String {
    "http://localhost".to_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: ClientSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    write_settings(&conn, &settings)
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: ClientSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<ClientSettings, DbError> {
    let conn = get_db_connection()?;
    read_settings(&conn)
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<ClientSettings, StorageError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(ClientSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;
    create_tables(&conn)
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), StorageError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn create_tables(conn: &rusqlite::Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn write_settings(conn: &rusqlite::Connection, settings: &ClientSettings) -> Result<(), DbError> {
    let settings_json = serde_json::to_string(settings)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('client_settings', ?1)",
        [&settings_json],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_settings(conn: &rusqlite::Connection) -> Result<ClientSettings, DbError> {
    use rusqlite::OptionalExtension;

    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = 'client_settings'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match stored {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(ClientSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("rustympd"))
        .unwrap_or_else(|| std::path::PathBuf::from(".rustympd"));
    if let Err(err) = std::fs::create_dir_all(&data_dir) {
        tracing::warn!(target: "settings", path = %data_dir.display(), error = %err, "could not create data dir");
    }
    Ok(rusqlite::Connection::open(data_dir.join("rustympd.db"))?)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn memory_db() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn missing_settings_load_defaults() {
        let conn = memory_db();
        let settings = read_settings(&conn).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.page_size, 100);
        assert_eq!(settings.jukebox_album.fields, vec!["Pos", "Album", "AlbumArtist"]);
    }

    #[test]
    fn saved_settings_are_read_back() {
        let conn = memory_db();
        let mut settings = ClientSettings::default();
        settings.server_url = "http://music.lan:8080".to_string();
        settings.partition = "kitchen".to_string();
        settings.jukebox_song.layout = ViewLayout::Grid;

        write_settings(&conn, &settings).unwrap();
        write_settings(&conn, &settings).unwrap();

        let loaded = read_settings(&conn).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.server().api_url(), "http://music.lan:8080/api/kitchen");
    }

    #[test]
    fn older_settings_get_new_fields_defaulted() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES ('client_settings', ?1)",
            [r#"{"server_url":"http://old"}"#],
        )
        .unwrap();

        let loaded = read_settings(&conn).unwrap();
        assert_eq!(loaded.server_url, "http://old");
        assert_eq!(loaded.partition, "default");
        assert_eq!(loaded.jukebox_song.layout, ViewLayout::Table);
    }
}
