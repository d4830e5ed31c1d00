//! Input Method Editor (IME) composition tracking.
//!
//! Languages such as Chinese, Japanese and Korean, as well as dead-key
//! accents, are entered through an input method that stages *marked* text
//! before committing it:
//!
//! 1. The input method is enabled when the control gains focus
//! 2. Preedit events carry the marked text as the user types
//! 3. A commit event delivers the final text and clears the marked text
//! 4. The input method is disabled when the control loses focus
//!
//! [`CompositionState`] follows this sequence and tells the owning control
//! what to do with each event. While it reports marked text, a text view
//! with `wait_until_commit` set leaves the control's string alone.

use winit::event::Ime;

/// An input method event, independent of the windowing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImeEvent {
    /// The input method was enabled for the control.
    Enabled,
    /// Marked text changed. An empty string clears it. The cursor is a byte
    /// range inside the marked text.
    Preedit(String, Option<(usize, usize)>),
    /// Text was committed and should be inserted.
    Commit(String),
    /// The input method was disabled.
    Disabled,
}

impl From<&Ime> for ImeEvent {
    fn from(ime: &Ime) -> Self {
        match ime {
            Ime::Enabled => Self::Enabled,
            Ime::Preedit(text, cursor) => Self::Preedit(text.clone(), *cursor),
            Ime::Commit(text) => Self::Commit(text.clone()),
            Ime::Disabled => Self::Disabled,
        }
    }
}

/// What the control must do after applying an [`ImeEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionUpdate {
    /// Nothing visible changed.
    None,
    /// Display this marked text in place of the previous one.
    Preedit(String),
    /// Remove any displayed marked text.
    ClearPreedit,
    /// Remove marked text and insert this committed text.
    Commit(String),
}

/// Current composition state of a control.
#[derive(Debug, Clone, Default)]
pub struct CompositionState {
    enabled: bool,
    preedit_text: Option<String>,
    preedit_cursor: Option<(usize, usize)>,
}

impl CompositionState {
    /// Create a new state with the input method disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the input method is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the current marked text, if any.
    pub fn preedit_text(&self) -> Option<&str> {
        self.preedit_text.as_deref()
    }

    /// Get the cursor position within the marked text.
    pub fn preedit_cursor(&self) -> Option<(usize, usize)> {
        self.preedit_cursor
    }

    /// Check if there is an active composition.
    pub fn has_preedit(&self) -> bool {
        self.preedit_text.is_some()
    }

    /// Drop any active composition without committing it.
    pub fn clear(&mut self) {
        self.preedit_text = None;
        self.preedit_cursor = None;
    }

    /// Apply an event and return the resulting change for the control.
    pub fn apply(&mut self, event: &ImeEvent) -> CompositionUpdate {
        match event {
            ImeEvent::Enabled => {
                self.enabled = true;
                CompositionUpdate::None
            }
            ImeEvent::Preedit(text, cursor) => {
                if text.is_empty() {
                    let had_preedit = self.has_preedit();
                    self.clear();
                    if had_preedit {
                        CompositionUpdate::ClearPreedit
                    } else {
                        CompositionUpdate::None
                    }
                } else {
                    self.preedit_text = Some(text.clone());
                    self.preedit_cursor = *cursor;
                    CompositionUpdate::Preedit(text.clone())
                }
            }
            ImeEvent::Commit(text) => {
                self.clear();
                CompositionUpdate::Commit(text.clone())
            }
            ImeEvent::Disabled => {
                let had_preedit = self.has_preedit();
                self.enabled = false;
                self.clear();
                if had_preedit {
                    CompositionUpdate::ClearPreedit
                } else {
                    CompositionUpdate::None
                }
            }
        }
    }
}
