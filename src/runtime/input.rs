//! Input mapping
//!
//! Translates winit keyboard and wheel events into messages. Pointer
//! position events go straight to `PointerMsg`; hit testing happens in
//! the update layer where the layout lives.

use winit::event::MouseScrollDelta;
use winit::keyboard::{Key, NamedKey};

use msaboard::messages::{AppMsg, Msg, PanelMsg, SessionMsg};
use msaboard::model::layout::WHEEL_LINE_HEIGHT;
use msaboard::model::PanelId;

/// Modifier keys relevant to shortcuts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub logo: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS
    fn command(&self) -> bool {
        self.ctrl || self.logo
    }
}

/// Map a key press to a message.
///
/// `hovered` is the panel under the pointer, the target of panel-level
/// shortcuts.
pub fn shortcut(key: &Key, mods: Modifiers, hovered: Option<PanelId>) -> Option<Msg> {
    match key {
        Key::Character(c) if mods.command() => match c.to_lowercase().as_str() {
            "z" if mods.shift => Some(Msg::Session(SessionMsg::Redo)),
            "z" => Some(Msg::Session(SessionMsg::Undo)),
            "y" => Some(Msg::Session(SessionMsg::Redo)),
            "o" => Some(Msg::App(AppMsg::OpenFileDialog)),
            "q" => Some(Msg::App(AppMsg::Quit)),
            _ => None,
        },
        Key::Character(c) if c.eq_ignore_ascii_case("s") => {
            hovered.map(|id| Msg::Panel(PanelMsg::CycleScheme(id)))
        }
        Key::Named(NamedKey::Escape) => Some(Msg::App(AppMsg::FocusLost)),
        _ => None,
    }
}

/// Convert a wheel event into a pixel delta `(dx, dy)`.
///
/// Positive values scroll content towards the end. Shift turns vertical
/// wheel motion into horizontal scrolling.
pub fn wheel_delta(delta: MouseScrollDelta, scale_factor: f64, shift: bool) -> (f64, f64) {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (
            -(x as f64) * WHEEL_LINE_HEIGHT,
            -(y as f64) * WHEEL_LINE_HEIGHT,
        ),
        MouseScrollDelta::PixelDelta(pos) => (-pos.x / scale_factor, -pos.y / scale_factor),
    };
    if shift && dx == 0.0 {
        (dy, 0.0)
    } else {
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn ch(s: &str) -> Key {
        Key::Character(s.into())
    }

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        logo: false,
    };

    #[test]
    fn test_undo_redo_shortcuts() {
        assert!(matches!(
            shortcut(&ch("z"), CTRL, None),
            Some(Msg::Session(SessionMsg::Undo))
        ));
        let ctrl_shift = Modifiers { shift: true, ..CTRL };
        assert!(matches!(
            shortcut(&ch("Z"), ctrl_shift, None),
            Some(Msg::Session(SessionMsg::Redo))
        ));
        assert!(matches!(
            shortcut(&ch("y"), CTRL, None),
            Some(Msg::Session(SessionMsg::Redo))
        ));
    }

    #[test]
    fn test_scheme_shortcut_needs_hovered_panel() {
        assert!(shortcut(&ch("s"), Modifiers::default(), None).is_none());
        assert!(matches!(
            shortcut(&ch("s"), Modifiers::default(), Some(PanelId(3))),
            Some(Msg::Panel(PanelMsg::CycleScheme(PanelId(3))))
        ));
    }

    #[test]
    fn test_plain_letters_do_nothing() {
        assert!(shortcut(&ch("z"), Modifiers::default(), None).is_none());
    }

    #[test]
    fn test_line_wheel_scrolls_down() {
        let (dx, dy) = wheel_delta(MouseScrollDelta::LineDelta(0.0, -1.0), 1.0, false);
        assert_eq!((dx, dy), (0.0, WHEEL_LINE_HEIGHT));
    }

    #[test]
    fn test_shift_wheel_scrolls_horizontally() {
        let (dx, dy) = wheel_delta(MouseScrollDelta::LineDelta(0.0, -1.0), 1.0, true);
        assert_eq!((dx, dy), (WHEEL_LINE_HEIGHT, 0.0));
    }

    #[test]
    fn test_pixel_delta_is_logical() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0));
        assert_eq!(wheel_delta(delta, 2.0, false), (0.0, 20.0));
    }
}
