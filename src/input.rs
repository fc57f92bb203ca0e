use egui::Key;

/// What happened to a key in one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

/// Whether the frame loop keeps going after the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Close,
}

impl KeyEvent {
    pub fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub fn press(key: Key) -> Self {
        Self::new(key, KeyAction::Press)
    }

    pub fn from_egui(event: &egui::Event) -> Option<Self> {
        match *event {
            egui::Event::Key {
                key,
                pressed,
                repeat,
                ..
            } => {
                let action = match (pressed, repeat) {
                    (false, _) => KeyAction::Release,
                    (true, true) => KeyAction::Repeat,
                    (true, false) => KeyAction::Press,
                };
                Some(Self { key, action })
            }
            _ => None,
        }
    }

    /// Arrow keys and movement keys react to both presses and auto-repeat.
    pub fn is_held(&self) -> bool {
        matches!(self.action, KeyAction::Press | KeyAction::Repeat)
    }

    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Press
    }

    pub fn frame_control(&self) -> FrameControl {
        if self.key == Key::Escape && self.is_press() {
            FrameControl::Close
        } else {
            FrameControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn maps_press_repeat_release() {
        let press = KeyEvent::from_egui(&key_event(Key::ArrowLeft, true, false)).unwrap();
        assert_eq!(press.action, KeyAction::Press);
        let repeat = KeyEvent::from_egui(&key_event(Key::ArrowLeft, true, true)).unwrap();
        assert_eq!(repeat.action, KeyAction::Repeat);
        let release = KeyEvent::from_egui(&key_event(Key::ArrowLeft, false, false)).unwrap();
        assert_eq!(release.action, KeyAction::Release);
        assert!(!release.is_held());
    }

    #[test]
    fn ignores_non_key_events() {
        assert!(KeyEvent::from_egui(&egui::Event::Text("r".into())).is_none());
    }

    #[test]
    fn escape_press_closes() {
        assert_eq!(KeyEvent::press(Key::Escape).frame_control(), FrameControl::Close);
        assert_eq!(
            KeyEvent::new(Key::Escape, KeyAction::Release).frame_control(),
            FrameControl::Continue
        );
        assert_eq!(KeyEvent::press(Key::R).frame_control(), FrameControl::Continue);
    }
}
