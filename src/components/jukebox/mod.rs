//! Jukebox queue view: the songs or albums the daemon will append next.

mod view;

pub use view::{QueueJukeboxAlbum, QueueJukeboxSong};

use crate::api::{
    ApiError, ApiRequest, ClickAction, EntryType, JukeboxList, JukeboxMode, Method, WebuiSettings,
};
use crate::db::{ClientSettings, ViewLayout, ViewSettings};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JukeboxView {
    Song,
    Album,
}

impl JukeboxView {
    /// The view that matches what the jukebox currently queues.
    pub fn for_mode(mode: JukeboxMode) -> Self {
        match mode {
            JukeboxMode::Album => Self::Album,
            JukeboxMode::Song | JukeboxMode::Off => Self::Song,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Song => "QueueJukeboxSong",
            Self::Album => "QueueJukeboxAlbum",
        }
    }

    pub fn list_id(self) -> String {
        format!("{}List", self.id())
    }

    pub fn disabled_id(self) -> String {
        format!("{}Disabled", self.id())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Song => "Song",
            Self::Album => "Album",
        }
    }

    pub fn settings(self, client: &ClientSettings) -> &ViewSettings {
        match self {
            Self::Song => &client.jukebox_song,
            Self::Album => &client.jukebox_album,
        }
    }

    pub fn settings_mut(self, client: &mut ClientSettings) -> &mut ViewSettings {
        match self {
            Self::Song => &mut client.jukebox_song,
            Self::Album => &mut client.jukebox_album,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub offset: u32,
    pub limit: u32,
}

impl Paging {
    pub fn first(limit: u32) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
        }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    /// Same page for an unchanged limit, otherwise the first page.
    pub fn resized(self, limit: u32) -> Self {
        if self.limit == limit.max(1) {
            self
        } else {
            Self::first(limit)
        }
    }

    pub fn has_previous(self) -> bool {
        self.offset > 0
    }

    pub fn has_next(self, total_entities: i64) -> bool {
        i64::from(self.offset) + i64::from(self.limit) < total_entities
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JukeboxFetch {
    /// Jukebox is off: show the placeholder and skip the request.
    Disabled,
    Fetch(ApiRequest),
}

pub fn get_jukebox_list(
    mode: JukeboxMode,
    paging: Paging,
    fields: &[String],
    expression: &str,
) -> JukeboxFetch {
    if mode == JukeboxMode::Off {
        return JukeboxFetch::Disabled;
    }
    JukeboxFetch::Fetch(ApiRequest::new(
        Method::JukeboxList,
        json!({
            "offset": paging.offset,
            "limit": paging.limit,
            "fields": fields,
            "expression": expression,
        }),
    ))
}

/// A rendered table row or grid card.
#[derive(Debug, Clone, PartialEq)]
pub struct JukeboxRow {
    pub uri: String,
    pub name: String,
    pub entry_type: EntryType,
    pub pos: u32,
    pub title: Option<&'static str>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JukeboxLayout {
    Table {
        columns: Vec<String>,
        rows: Vec<JukeboxRow>,
        footer: Option<String>,
    },
    Grid {
        cards: Vec<JukeboxRow>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JukeboxRender {
    Failed(String),
    Ready {
        view: JukeboxView,
        total_entities: i64,
        layout: JukeboxLayout,
    },
}

/// Shared result check for list refreshes: a failed call stops rendering.
pub fn check_result(response: Result<JukeboxList, ApiError>) -> Result<JukeboxList, String> {
    response.map_err(|err| err.to_string())
}

/// Hover text for rows, naming what a click will do in this mode.
pub fn row_title(mode: JukeboxMode, clicks: &WebuiSettings) -> Option<&'static str> {
    match mode {
        JukeboxMode::Song => clicks.click_song.label(),
        JukeboxMode::Album | JukeboxMode::Off => clicks.click_quick_play.label(),
    }
}

pub fn footer_text(total_entities: i64) -> Option<String> {
    (total_entities > 0).then(|| format!("Num entries: {total_entities}"))
}

/// Renders a list response into `view`, the page on screen. Columns and
/// table/grid come from that view's settings; `mode` only picks row titles.
pub fn parse_jukebox_list(
    response: Result<JukeboxList, ApiError>,
    view: JukeboxView,
    mode: JukeboxMode,
    client: &ClientSettings,
    clicks: &WebuiSettings,
) -> JukeboxRender {
    let list = match check_result(response) {
        Ok(list) => list,
        Err(message) => return JukeboxRender::Failed(message),
    };
    let view_settings = view.settings(client);
    let columns = view_settings.fields.clone();
    let title = match view_settings.layout {
        ViewLayout::Table => row_title(mode, clicks),
        ViewLayout::Grid => None,
    };

    let rows: Vec<JukeboxRow> = list
        .data
        .iter()
        .map(|entry| JukeboxRow {
            uri: entry.uri.clone(),
            name: entry.title.clone(),
            entry_type: entry.entry_type,
            pos: entry.pos,
            title,
            cells: columns.iter().map(|field| entry.column(field)).collect(),
        })
        .collect();

    let layout = match view_settings.layout {
        ViewLayout::Table => JukeboxLayout::Table {
            columns,
            rows,
            footer: footer_text(list.total_entities),
        },
        ViewLayout::Grid => JukeboxLayout::Grid { cards: rows },
    };

    JukeboxRender::Ready {
        view,
        total_entities: list.total_entities,
        layout,
    }
}

/// What a click on a jukebox row resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum RowClick {
    PlaySong {
        uri: String,
        action: ClickAction,
    },
    QuickPlay {
        entry_type: EntryType,
        uri: String,
        action: ClickAction,
    },
}

pub fn view_queue_jukebox_list_click_handler(
    mode: JukeboxMode,
    row: &JukeboxRow,
    clicks: &WebuiSettings,
) -> Option<RowClick> {
    match mode {
        JukeboxMode::Song => Some(RowClick::PlaySong {
            uri: row.uri.clone(),
            action: clicks.click_song,
        }),
        JukeboxMode::Album => Some(RowClick::QuickPlay {
            entry_type: row.entry_type,
            uri: row.uri.clone(),
            action: clicks.click_quick_play,
        }),
        JukeboxMode::Off => None,
    }
}

impl RowClick {
    /// Queue request for the click, or `None` for actions this client lacks.
    pub fn to_request(&self) -> Option<ApiRequest> {
        match self {
            Self::PlaySong { uri, action } => queue_request(*action, EntryType::Song, uri),
            Self::QuickPlay {
                entry_type,
                uri,
                action,
            } => queue_request(*action, *entry_type, uri),
        }
    }
}

fn queue_request(action: ClickAction, entry_type: EntryType, id: &str) -> Option<ApiRequest> {
    let (append, insert, replace, key) = match entry_type {
        EntryType::Song => (
            Method::QueueAppendUris,
            Method::QueueInsertUris,
            Method::QueueReplaceUris,
            "uris",
        ),
        EntryType::Album => (
            Method::QueueAppendAlbums,
            Method::QueueInsertAlbums,
            Method::QueueReplaceAlbums,
            "albumids",
        ),
    };
    let play = action.plays();

    let request = match action {
        ClickAction::Append | ClickAction::AppendPlay => {
            ApiRequest::new(append, json!({ key: [id], "play": play }))
        }
        // whence 1: relative to the current song
        ClickAction::InsertAfterCurrent | ClickAction::InsertPlayAfterCurrent => ApiRequest::new(
            insert,
            json!({ key: [id], "to": 0, "whence": 1, "play": play }),
        ),
        ClickAction::Replace | ClickAction::ReplacePlay => {
            ApiRequest::new(replace, json!({ key: [id], "play": play }))
        }
        ClickAction::Unsupported => return None,
    };
    Some(request)
}

pub fn clear_jukebox_queue() -> ApiRequest {
    ApiRequest::empty(Method::JukeboxClear)
}

pub fn del_queue_jukebox_entries(positions: &[u32]) -> ApiRequest {
    ApiRequest::new(Method::JukeboxRm, json!({ "positions": positions }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JukeboxEntry;
    use serde_json::Value;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn entry(pos: u32, entry_type: EntryType) -> JukeboxEntry {
        JukeboxEntry {
            uri: format!("music/{pos}.flac"),
            title: format!("Track {pos}"),
            entry_type,
            pos,
            tags: serde_json::Map::new(),
        }
    }

    fn list(total: i64, entries: Vec<JukeboxEntry>) -> JukeboxList {
        JukeboxList {
            total_entities: total,
            returned_entities: entries.len() as u32,
            offset: 0,
            limit: 100,
            data: entries,
        }
    }

    fn table(render: JukeboxRender) -> (Vec<JukeboxRow>, Option<String>) {
        match render {
            JukeboxRender::Ready {
                layout: JukeboxLayout::Table { rows, footer, .. },
                ..
            } => (rows, footer),
            other => panic!("expected a table, got {other:?}"),
        }
    }

    #[test]
    fn disabled_mode_issues_no_request() {
        let fetch = get_jukebox_list(
            JukeboxMode::Off,
            Paging::first(100),
            &fields(&["Title"]),
            "",
        );
        assert_eq!(fetch, JukeboxFetch::Disabled);
    }

    #[test]
    fn enabled_mode_requests_page_fields_and_expression() {
        let paging = Paging::first(25).next();
        let fetch = get_jukebox_list(
            JukeboxMode::Song,
            paging,
            &fields(&["Pos", "Title"]),
            "((any contains 'x'))",
        );
        let JukeboxFetch::Fetch(request) = fetch else {
            panic!("expected a fetch");
        };
        assert_eq!(request.method, Method::JukeboxList);
        assert_eq!(
            request.params,
            json!({
                "offset": 25,
                "limit": 25,
                "fields": ["Pos", "Title"],
                "expression": "((any contains 'x'))"
            })
        );
    }

    #[test]
    fn empty_table_has_no_footer() {
        let render = parse_jukebox_list(
            Ok(list(0, Vec::new())),
            JukeboxView::Song,
            JukeboxMode::Song,
            &ClientSettings::default(),
            &WebuiSettings::default(),
        );
        let (rows, footer) = table(render);
        assert!(rows.is_empty());
        assert_eq!(footer, None);
    }

    #[test]
    fn table_footer_shows_total_entities() {
        let entries = (0..12).map(|pos| entry(pos, EntryType::Song)).collect();
        let render = parse_jukebox_list(
            Ok(list(12, entries)),
            JukeboxView::Song,
            JukeboxMode::Song,
            &ClientSettings::default(),
            &WebuiSettings::default(),
        );
        let (rows, footer) = table(render);
        assert_eq!(rows.len(), 12);
        let footer = footer.unwrap();
        assert!(footer.contains("12"));
        assert_eq!(footer, "Num entries: 12");
    }

    #[test]
    fn rows_are_tagged_and_titled_by_click_action() {
        let mut clicks = WebuiSettings::default();
        clicks.click_song = ClickAction::ReplacePlay;
        let render = parse_jukebox_list(
            Ok(list(1, vec![entry(3, EntryType::Song)])),
            JukeboxView::Song,
            JukeboxMode::Song,
            &ClientSettings::default(),
            &clicks,
        );
        let (rows, _) = table(render);
        let row = &rows[0];
        assert_eq!(row.uri, "music/3.flac");
        assert_eq!(row.name, "Track 3");
        assert_eq!(row.pos, 3);
        assert_eq!(row.entry_type, EntryType::Song);
        assert_eq!(row.title, Some("Replace queue and play"));
        assert_eq!(row.cells[0], "4");
        assert_eq!(row.cells[1], "Track 3");
    }

    #[test]
    fn album_mode_targets_album_view_and_quick_play_title() {
        let render = parse_jukebox_list(
            Ok(list(1, vec![entry(0, EntryType::Album)])),
            JukeboxView::Album,
            JukeboxMode::Album,
            &ClientSettings::default(),
            &WebuiSettings::default(),
        );
        match render {
            JukeboxRender::Ready {
                view,
                layout: JukeboxLayout::Table { rows, columns, .. },
                ..
            } => {
                assert_eq!(view, JukeboxView::Album);
                assert_eq!(columns, fields(&["Pos", "Album", "AlbumArtist"]));
                assert_eq!(rows[0].title, Some("Replace queue"));
            }
            other => panic!("unexpected render {other:?}"),
        }
    }

    #[test]
    fn displayed_view_decides_columns_and_layout() {
        let mut client = ClientSettings::default();
        client.jukebox_album.layout = ViewLayout::Grid;
        let fetch = get_jukebox_list(
            JukeboxMode::Album,
            Paging::first(100),
            &JukeboxView::Song.settings(&client).fields,
            "",
        );
        let JukeboxFetch::Fetch(request) = fetch else {
            panic!("expected a fetch");
        };
        assert_eq!(
            request.params["fields"],
            json!(["Pos", "Title", "Artist", "Album", "Duration"])
        );

        let render = parse_jukebox_list(
            Ok(list(1, vec![entry(0, EntryType::Album)])),
            JukeboxView::Song,
            JukeboxMode::Album,
            &client,
            &WebuiSettings::default(),
        );
        match render {
            JukeboxRender::Ready {
                view,
                layout: JukeboxLayout::Table { columns, rows, .. },
                ..
            } => {
                assert_eq!(view, JukeboxView::Song);
                assert_eq!(columns, fields(&["Pos", "Title", "Artist", "Album", "Duration"]));
                assert_eq!(rows[0].cells[1], "Track 0");
                assert_eq!(rows[0].title, Some("Replace queue"));
            }
            other => panic!("unexpected render {other:?}"),
        }
    }

    #[test]
    fn grid_layout_has_cards_without_footer() {
        let mut client = ClientSettings::default();
        client.jukebox_song.layout = ViewLayout::Grid;
        let render = parse_jukebox_list(
            Ok(list(5, vec![entry(0, EntryType::Song)])),
            JukeboxView::Song,
            JukeboxMode::Song,
            &client,
            &WebuiSettings::default(),
        );
        match render {
            JukeboxRender::Ready {
                layout: JukeboxLayout::Grid { cards },
                ..
            } => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].uri, "music/0.flac");
                assert_eq!(cards[0].title, None);
            }
            other => panic!("unexpected render {other:?}"),
        }
    }

    #[test]
    fn failed_response_aborts_rendering() {
        let render = parse_jukebox_list(
            Err(ApiError::MissingResult),
            JukeboxView::Song,
            JukeboxMode::Song,
            &ClientSettings::default(),
            &WebuiSettings::default(),
        );
        assert_eq!(
            render,
            JukeboxRender::Failed("Response contained no result".to_string())
        );
    }

    #[test]
    fn song_mode_click_takes_song_path() {
        let row = table(parse_jukebox_list(
            Ok(list(1, vec![entry(1, EntryType::Song)])),
            JukeboxView::Song,
            JukeboxMode::Song,
            &ClientSettings::default(),
            &WebuiSettings::default(),
        ))
        .0
        .remove(0);

        let click =
            view_queue_jukebox_list_click_handler(JukeboxMode::Song, &row, &WebuiSettings::default());
        assert_eq!(
            click,
            Some(RowClick::PlaySong {
                uri: "music/1.flac".to_string(),
                action: ClickAction::Append,
            })
        );
        let request = click.unwrap().to_request().unwrap();
        assert_eq!(request.method, Method::QueueAppendUris);
        assert_eq!(request.params, json!({ "uris": ["music/1.flac"], "play": false }));
    }

    #[test]
    fn album_mode_click_takes_quick_play_path() {
        let row = JukeboxRow {
            uri: "album-id-7".to_string(),
            name: "Blue".to_string(),
            entry_type: EntryType::Album,
            pos: 0,
            title: None,
            cells: Vec::new(),
        };
        let click = view_queue_jukebox_list_click_handler(
            JukeboxMode::Album,
            &row,
            &WebuiSettings::default(),
        )
        .unwrap();
        assert!(matches!(click, RowClick::QuickPlay { .. }));

        let request = click.to_request().unwrap();
        assert_eq!(request.method, Method::QueueReplaceAlbums);
        assert_eq!(request.params["albumids"], json!(["album-id-7"]));
        assert_eq!(request.params["play"], Value::Bool(false));
    }

    #[test]
    fn insert_actions_target_position_after_current() {
        let click = RowClick::PlaySong {
            uri: "a.mp3".to_string(),
            action: ClickAction::InsertPlayAfterCurrent,
        };
        let request = click.to_request().unwrap();
        assert_eq!(request.method, Method::QueueInsertUris);
        assert_eq!(
            request.params,
            json!({ "uris": ["a.mp3"], "to": 0, "whence": 1, "play": true })
        );
    }

    #[test]
    fn unsupported_click_action_sends_nothing() {
        let click = RowClick::PlaySong {
            uri: "a.mp3".to_string(),
            action: ClickAction::Unsupported,
        };
        assert_eq!(click.to_request(), None);
    }

    #[test]
    fn off_mode_click_does_nothing() {
        let row = JukeboxRow {
            uri: "a.mp3".to_string(),
            name: String::new(),
            entry_type: EntryType::Song,
            pos: 0,
            title: None,
            cells: Vec::new(),
        };
        assert_eq!(
            view_queue_jukebox_list_click_handler(JukeboxMode::Off, &row, &WebuiSettings::default()),
            None
        );
    }

    #[test]
    fn clear_and_remove_requests() {
        assert_eq!(clear_jukebox_queue().method, Method::JukeboxClear);
        let remove = del_queue_jukebox_entries(&[0, 4]);
        assert_eq!(remove.method, Method::JukeboxRm);
        assert_eq!(remove.params, json!({ "positions": [0, 4] }));
    }

    #[test]
    fn paging_moves_by_limit() {
        let page = Paging::first(10);
        assert!(!page.has_previous());
        assert!(page.has_next(25));
        let last = page.next().next();
        assert_eq!(last.offset, 20);
        assert!(!last.has_next(25));
        assert_eq!(last.previous().offset, 10);
        assert_eq!(Paging::first(0).limit, 1);
    }

    #[test]
    fn paging_survives_writes_that_keep_page_size() {
        let mut client = ClientSettings::default();
        let page = Paging::first(client.page_size).next();
        client.jukebox_song.layout = ViewLayout::Grid;
        assert_eq!(page.resized(client.page_size), page);

        client.page_size = 50;
        assert_eq!(page.resized(client.page_size), Paging::first(50));
    }

    #[test]
    fn view_ids_follow_mode() {
        assert_eq!(JukeboxView::for_mode(JukeboxMode::Album).list_id(), "QueueJukeboxAlbumList");
        assert_eq!(JukeboxView::for_mode(JukeboxMode::Song).disabled_id(), "QueueJukeboxSongDisabled");
        assert_eq!(JukeboxView::for_mode(JukeboxMode::Off), JukeboxView::Song);
    }
}
