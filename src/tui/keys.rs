//! Key classification shared by every section and the root controller.

use super::messages::Section;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Scrolling and selection keys, mapped the same way in every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    PageUp,
    PageDown,
    HalfUp,
    HalfDown,
    Top,
    Bottom,
    Activate,
}

impl NavKey {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let nav = match key.code {
            KeyCode::Char('u') if ctrl => NavKey::HalfUp,
            KeyCode::Char('d') if ctrl => NavKey::HalfDown,
            _ if ctrl => return None,
            KeyCode::Char('k') | KeyCode::Up => NavKey::Up,
            KeyCode::Char('j') | KeyCode::Down => NavKey::Down,
            KeyCode::PageUp => NavKey::PageUp,
            KeyCode::PageDown => NavKey::PageDown,
            KeyCode::Char('g') | KeyCode::Home => NavKey::Top,
            KeyCode::Char('G') | KeyCode::End => NavKey::Bottom,
            KeyCode::Enter => NavKey::Activate,
            _ => return None,
        };
        Some(nav)
    }
}

/// Keys the root controller handles before any section sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    Quit,
    Help,
    Palette,
    Next,
    Prev,
    Jump(Section),
}

impl GlobalKey {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let global = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GlobalKey::Quit,
            _ if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Char('q') => GlobalKey::Quit,
            KeyCode::Char('?') => GlobalKey::Help,
            KeyCode::Char(':') => GlobalKey::Palette,
            KeyCode::Tab | KeyCode::Right => GlobalKey::Next,
            KeyCode::BackTab | KeyCode::Left => GlobalKey::Prev,
            KeyCode::Char(c @ '1'..='4') => {
                let ordinal = c as usize - '1' as usize;
                GlobalKey::Jump(Section::from_ordinal(ordinal)?)
            }
            _ => return None,
        };
        Some(global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn vim_and_arrow_keys_agree() {
        assert_eq!(NavKey::from_key(&key(KeyCode::Char('j'))), Some(NavKey::Down));
        assert_eq!(NavKey::from_key(&key(KeyCode::Down)), Some(NavKey::Down));
        assert_eq!(NavKey::from_key(&key(KeyCode::Char('k'))), Some(NavKey::Up));
        assert_eq!(NavKey::from_key(&key(KeyCode::Char('G'))), Some(NavKey::Bottom));
        assert_eq!(NavKey::from_key(&key(KeyCode::Home)), Some(NavKey::Top));
    }

    #[test]
    fn ctrl_keys_scroll_half_pages() {
        assert_eq!(NavKey::from_key(&ctrl('u')), Some(NavKey::HalfUp));
        assert_eq!(NavKey::from_key(&ctrl('d')), Some(NavKey::HalfDown));
        assert_eq!(NavKey::from_key(&ctrl('j')), None);
    }

    #[test]
    fn global_keys() {
        assert_eq!(GlobalKey::from_key(&key(KeyCode::Char('q'))), Some(GlobalKey::Quit));
        assert_eq!(GlobalKey::from_key(&ctrl('c')), Some(GlobalKey::Quit));
        assert_eq!(GlobalKey::from_key(&key(KeyCode::BackTab)), Some(GlobalKey::Prev));
        assert_eq!(
            GlobalKey::from_key(&key(KeyCode::Char('3'))),
            Some(GlobalKey::Jump(Section::Cv))
        );
        assert_eq!(GlobalKey::from_key(&key(KeyCode::Char('5'))), None);
        assert_eq!(GlobalKey::from_key(&key(KeyCode::Char('j'))), None);
    }
}
