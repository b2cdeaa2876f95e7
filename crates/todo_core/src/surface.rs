//! Presentation surface contract.
//!
//! # Responsibility
//! - Name the mount points and input hooks the controller drives.
//! - Provide a headless implementation that records the latest output.
//!
//! # Invariants
//! - `replace_list` discards every previous row, including an open inline
//!   editor.

use crate::model::task::TaskId;

/// Mount points and input hooks of a page-like surface.
pub trait Surface {
    /// Replaces the list container content.
    fn replace_list(&mut self, html: String);
    /// Replaces the active/total counter text.
    fn set_summary(&mut self, text: String);
    /// Current value of the add-task field.
    fn input_value(&self) -> String;
    fn set_input_value(&mut self, value: String);
    fn focus_input(&mut self);
    /// Swaps the static text of row `id` for an editable field holding
    /// `current_text`, focused.
    fn open_editor(&mut self, id: &TaskId, current_text: &str);
}

/// Inline editor currently shown by a `HeadlessSurface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEditor {
    pub id: TaskId,
    pub value: String,
}

/// In-memory surface used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub list_html: String,
    pub summary: String,
    pub input: String,
    pub input_focused: bool,
    pub editor: Option<OpenEditor>,
    /// Number of full list replacements so far.
    pub renders: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates typing into the add-task field.
    pub fn type_input(&mut self, value: &str) {
        self.input = value.to_string();
    }
}

impl Surface for HeadlessSurface {
    fn replace_list(&mut self, html: String) {
        self.list_html = html;
        self.editor = None;
        self.renders += 1;
    }

    fn set_summary(&mut self, text: String) {
        self.summary = text;
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: String) {
        self.input = value;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn open_editor(&mut self, id: &TaskId, current_text: &str) {
        self.input_focused = false;
        self.editor = Some(OpenEditor {
            id: id.clone(),
            value: current_text.to_string(),
        });
    }
}
