use dioxus::prelude::*;

use crate::api::JukeboxMode;
use crate::components::app_view::{jukebox_view_for, AppView};

const NAV_HISTORY_LIMIT: usize = 64;

#[derive(Clone, Copy)]
pub struct Navigation {
    current_view: Signal<AppView>,
    history: Signal<Vec<AppView>>,
}

fn push_history(stack: &mut Vec<AppView>, previous: AppView) {
    stack.push(previous);
    if stack.len() > NAV_HISTORY_LIMIT {
        stack.remove(0);
    }
}

impl Navigation {
    pub fn new(current_view: Signal<AppView>, history: Signal<Vec<AppView>>) -> Self {
        Self {
            current_view,
            history,
        }
    }

    pub fn navigate_to(&self, target: AppView) {
        let mut current_view = self.current_view;
        let previous = *current_view.peek();
        if previous == target {
            return;
        }

        let mut history = self.history;
        history.with_mut(|stack| push_history(stack, previous));
        current_view.set(target);
    }

    /// Opens the jukebox list for the given mode.
    pub fn goto_jukebox(&self, mode: JukeboxMode) {
        self.navigate_to(jukebox_view_for(mode));
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.read().is_empty()
    }

    pub fn go_back(&self) -> Option<AppView> {
        let mut history = self.history;
        let mut current_view = self.current_view;
        let prev = history.with_mut(|stack| stack.pop())?;
        current_view.set(prev);
        Some(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::jukebox::JukeboxView;

    #[test]
    fn history_is_capped() {
        let mut stack = Vec::new();
        for _ in 0..NAV_HISTORY_LIMIT {
            push_history(&mut stack, AppView::Settings);
        }
        push_history(&mut stack, AppView::QueueJukebox(JukeboxView::Album));
        assert_eq!(stack.len(), NAV_HISTORY_LIMIT);
        assert_eq!(
            stack.last(),
            Some(&AppView::QueueJukebox(JukeboxView::Album))
        );
    }
}
