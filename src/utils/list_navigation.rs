//! List navigation utilities for the site list.
//!
//! Extension methods over `ListState` for the navigation patterns the
//! picker uses: move up/down with clamping, jump to first/last, and
//! cursor initialization.

use ratatui::widgets::ListState;

/// Extension trait for `ListState` with bounds-aware navigation.
pub trait ListStateExt {
    /// Move selection up by one item. Stays at the first item.
    fn move_up(&mut self, total_items: usize);

    /// Move selection down by one item. Stays at the last item.
    fn move_down(&mut self, total_items: usize);

    /// Move to the first item in the list.
    fn select_first_item(&mut self, total_items: usize);

    /// Move to the last item in the list.
    fn select_last_item(&mut self, total_items: usize);

    /// Get the currently selected index, initializing to 0 if none selected.
    fn selected_or_first(&mut self, total_items: usize) -> Option<usize>;
}

impl ListStateExt for ListState {
    fn move_up(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        self.select(Some(current.saturating_sub(1)));
    }

    fn move_down(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        let new_index = (current + 1).min(total_items.saturating_sub(1));
        self.select(Some(new_index));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(total_items - 1));
        }
    }

    fn selected_or_first(&mut self, total_items: usize) -> Option<usize> {
        if total_items == 0 {
            return None;
        }
        if self.selected().is_none() {
            self.select(Some(0));
        }
        self.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_down_clamps_at_end() {
        let mut state = ListState::default();
        state.select(Some(2));
        state.move_down(3);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn move_up_clamps_at_start() {
        let mut state = ListState::default();
        state.select(Some(0));
        state.move_up(3);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn navigation_is_noop_on_empty_list() {
        let mut state = ListState::default();
        state.move_down(0);
        state.move_up(0);
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_or_first(0), None);
    }

    #[test]
    fn selected_or_first_initializes_cursor() {
        let mut state = ListState::default();
        assert_eq!(state.selected_or_first(3), Some(0));
    }
}
