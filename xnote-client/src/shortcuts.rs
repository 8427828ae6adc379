//! Keyboard shortcuts of the daily view

/// A key press with its modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Key name as reported by the UI (`"n"`, `"F5"`, `"Escape"`)
    pub key: String,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: false, meta: false }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: true, meta: false }
    }

    pub fn meta(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: false, meta: true }
    }
}

/// Action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewMeal,
    NewEvent,
    NewDrink,
    RefreshDefaultRange,
    CloseModal,
}

impl Shortcut {
    pub fn from_key(input: &KeyInput) -> Option<Self> {
        let command = input.ctrl || input.meta;
        match input.key.as_str() {
            "F5" => Some(Self::RefreshDefaultRange),
            "Escape" => Some(Self::CloseModal),
            key if command => match key.to_lowercase().as_str() {
                "n" => Some(Self::NewMeal),
                "e" => Some(Self::NewEvent),
                "d" => Some(Self::NewDrink),
                "r" => Some(Self::RefreshDefaultRange),
                _ => None,
            },
            _ => None,
        }
    }
}
