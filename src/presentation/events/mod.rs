//! Keyboard input mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    /// Exit application.
    Quit,
    /// Switch between light and dark theme.
    ToggleTheme,
    /// Move selection one row up.
    Up,
    /// Move selection one row down.
    Down,
    /// Move selection one card left.
    Left,
    /// Move selection one card right.
    Right,
    /// Move selection one screen down.
    PageDown,
    /// Move selection one screen up.
    PageUp,
    /// Jump to the first photo.
    First,
    /// Jump to the last loaded photo.
    Last,
    /// Open the selected photo.
    Select,
    /// Retry the current page.
    Retry,
}

/// Terminal event handler.
pub struct EventHandler;

impl EventHandler {
    /// Maps a key event to a gallery action.
    #[must_use]
    pub fn action_for(key: &KeyEvent) -> Option<GalleryAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if Self::is_quit_event(key) {
            return Some(GalleryAction::Quit);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }

        let action = match key.code {
            KeyCode::Char('t') => GalleryAction::ToggleTheme,
            KeyCode::Char('r') => GalleryAction::Retry,
            KeyCode::Up | KeyCode::Char('k') => GalleryAction::Up,
            KeyCode::Down | KeyCode::Char('j') => GalleryAction::Down,
            KeyCode::Left | KeyCode::Char('h') => GalleryAction::Left,
            KeyCode::Right | KeyCode::Char('l') => GalleryAction::Right,
            KeyCode::PageDown => GalleryAction::PageDown,
            KeyCode::PageUp => GalleryAction::PageUp,
            KeyCode::Home | KeyCode::Char('g') => GalleryAction::First,
            KeyCode::End | KeyCode::Char('G') => GalleryAction::Last,
            KeyCode::Enter => GalleryAction::Select,
            _ => return None,
        };
        Some(action)
    }

    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } | KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test_case(KeyCode::Char('t'), GalleryAction::ToggleTheme ; "t toggles theme")]
    #[test_case(KeyCode::Char('r'), GalleryAction::Retry ; "r retries")]
    #[test_case(KeyCode::Down, GalleryAction::Down ; "arrow down")]
    #[test_case(KeyCode::Char('j'), GalleryAction::Down ; "vim down")]
    #[test_case(KeyCode::Char('k'), GalleryAction::Up ; "vim up")]
    #[test_case(KeyCode::Left, GalleryAction::Left ; "arrow left")]
    #[test_case(KeyCode::Char('l'), GalleryAction::Right ; "vim right")]
    #[test_case(KeyCode::End, GalleryAction::Last ; "end")]
    #[test_case(KeyCode::Enter, GalleryAction::Select ; "enter selects")]
    #[test_case(KeyCode::Esc, GalleryAction::Quit ; "escape quits")]
    fn test_action_for(code: KeyCode, expected: GalleryAction) {
        let key = make_key_event(code, KeyModifiers::NONE);
        assert_eq!(EventHandler::action_for(&key), Some(expected));
    }

    #[test]
    fn test_unmapped_and_modified_keys() {
        assert_eq!(
            EventHandler::action_for(&make_key_event(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            EventHandler::action_for(&make_key_event(KeyCode::Char('t'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            EventHandler::action_for(&make_key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GalleryAction::Quit)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('t'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(EventHandler::action_for(&key), None);
    }
}
