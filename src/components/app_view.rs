//! Defines the shared application view state.

use crate::api::JukeboxMode;
use crate::components::jukebox::JukeboxView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    QueueJukebox(JukeboxView),
    Settings,
}

impl Default for AppView {
    fn default() -> Self {
        Self::QueueJukebox(JukeboxView::Song)
    }
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::QueueJukebox(JukeboxView::Song) => "Jukebox songs",
        AppView::QueueJukebox(JukeboxView::Album) => "Jukebox albums",
        AppView::Settings => "Settings",
    }
}

/// The jukebox view that matches the partition's jukebox mode.
pub fn jukebox_view_for(mode: JukeboxMode) -> AppView {
    AppView::QueueJukebox(JukeboxView::for_mode(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_mode_opens_album_view() {
        assert_eq!(
            jukebox_view_for(JukeboxMode::Album),
            AppView::QueueJukebox(JukeboxView::Album)
        );
    }

    #[test]
    fn song_and_off_modes_open_song_view() {
        assert_eq!(jukebox_view_for(JukeboxMode::Song), AppView::default());
        assert_eq!(jukebox_view_for(JukeboxMode::Off), AppView::default());
    }
}
