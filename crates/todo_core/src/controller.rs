//! Interaction controller: user events in, store calls and re-renders out.
//!
//! # Responsibility
//! - Route submit, list click/double-click, edit and clear events to
//!   `TaskStore` operations.
//! - Re-render the whole view after every state-affecting event.
//! - Track the inline edit session.
//!
//! # Invariants
//! - The controller never touches the collection except through the store.
//! - A list click fires at most one row action.
//! - An edit session finishes at most once: the first of blur, Enter or
//!   Escape takes the session, later finish events are ignored.
//! - Store failures are logged and never end the session.

use crate::model::task::TaskId;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::{StoreResult, TaskStore};
use crate::surface::Surface;
use crate::view::{render_into, View};
use log::{debug, error};

/// Prompt text shown before clearing every task.
pub const CLEAR_ALL_PROMPT: &str = "Clear all tasks? This cannot be undone.";

/// Blocking yes/no prompt.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Role of one element on a click target's ancestry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// A task row; carries the row's task id.
    Row,
    /// The completion checkbox or the label wrapping it.
    Toggle,
    /// The static task text.
    Text,
    /// The delete button or its icon.
    Delete,
    Other,
}

/// One element on a click target's ancestry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub role: NodeRole,
    pub task_id: Option<TaskId>,
}

impl Node {
    pub fn row(id: impl Into<TaskId>) -> Self {
        Self {
            role: NodeRole::Row,
            task_id: Some(id.into()),
        }
    }

    pub fn of(role: NodeRole) -> Self {
        Self {
            role,
            task_id: None,
        }
    }
}

/// Keys the inline editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Other,
}

/// Input events delivered by the surface.
///
/// Click paths list the target element first and its ancestors after it,
/// up to the list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit,
    InputBlur,
    ListClick { path: Vec<Node> },
    ListDoubleClick { path: Vec<Node> },
    EditKey { key: EditKey, value: String },
    EditBlur { value: String },
    ClearCompleted,
    ClearAll,
}

/// What handling an event did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The view was rebuilt.
    Rendered,
    /// An inline editor was opened.
    EditStarted,
    /// Nothing was rendered.
    Unchanged,
}

/// Row action resolved from a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Delete,
}

/// Finds the nearest row on `path` and the actionable control below it.
///
/// Toggle wins over delete when both appear, so one click yields one action.
pub fn locate_row_action(path: &[Node]) -> Option<(TaskId, RowAction)> {
    let (id, inner) = nearest_row(path)?;
    let action = if inner.iter().any(|node| node.role == NodeRole::Toggle) {
        RowAction::Toggle
    } else if inner.iter().any(|node| node.role == NodeRole::Delete) {
        RowAction::Delete
    } else {
        return None;
    };
    Some((id, action))
}

/// Finds the row whose text region was hit, if any.
pub fn locate_text_row(path: &[Node]) -> Option<TaskId> {
    let (id, inner) = nearest_row(path)?;
    inner
        .iter()
        .any(|node| node.role == NodeRole::Text)
        .then_some(id)
}

fn nearest_row(path: &[Node]) -> Option<(TaskId, &[Node])> {
    let index = path.iter().position(|node| node.role == NodeRole::Row)?;
    let id = path[index].task_id.clone()?;
    Some((id, &path[..index]))
}

#[derive(Debug)]
struct EditSession {
    id: TaskId,
}

/// Binds a store, a surface and a confirmation prompt.
pub struct Controller<R: TaskRepository, S: Surface, C: Confirm> {
    store: TaskStore<R>,
    surface: S,
    confirm: C,
    edit: Option<EditSession>,
}

impl<R: TaskRepository, S: Surface, C: Confirm> Controller<R, S, C> {
    pub fn new(store: TaskStore<R>, surface: S, confirm: C) -> Self {
        Self {
            store,
            surface,
            confirm,
            edit: None,
        }
    }

    /// Performs the initial render.
    pub fn start(&mut self) -> View {
        self.render()
    }

    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Task currently open in the inline editor.
    pub fn editing(&self) -> Option<&TaskId> {
        self.edit.as_ref().map(|session| &session.id)
    }

    pub fn into_parts(self) -> (TaskStore<R>, S) {
        (self.store, self.surface)
    }

    pub fn handle(&mut self, event: UiEvent) -> Outcome {
        match event {
            UiEvent::Submit => self.submit(),
            UiEvent::InputBlur => self.trim_input_start(),
            UiEvent::ListClick { path } => self.click(&path),
            UiEvent::ListDoubleClick { path } => self.begin_edit(&path),
            UiEvent::EditBlur { value } => self.finish_edit(Some(&value)),
            UiEvent::EditKey {
                key: EditKey::Enter,
                value,
            } => self.finish_edit(Some(&value)),
            UiEvent::EditKey {
                key: EditKey::Escape,
                ..
            } => self.finish_edit(None),
            UiEvent::EditKey {
                key: EditKey::Other,
                ..
            } => Outcome::Unchanged,
            UiEvent::ClearCompleted => {
                let result = self.store.clear_completed();
                self.log_failure("tasks_clear_completed", result);
                self.rendered()
            }
            UiEvent::ClearAll => self.clear_all(),
        }
    }

    fn submit(&mut self) -> Outcome {
        let value = self.surface.input_value();
        let result = self.store.add(&value);
        match self.log_failure("task_add", result) {
            Some(Some(_)) => {
                self.surface.set_input_value(String::new());
                self.surface.focus_input();
                self.rendered()
            }
            // Persisting failed but the task is in memory; show it.
            None => self.rendered(),
            Some(None) => Outcome::Unchanged,
        }
    }

    fn trim_input_start(&mut self) -> Outcome {
        let value = self.surface.input_value();
        let trimmed = value.trim_start();
        if trimmed.len() != value.len() {
            self.surface.set_input_value(trimmed.to_string());
        }
        Outcome::Unchanged
    }

    fn click(&mut self, path: &[Node]) -> Outcome {
        let Some((id, action)) = locate_row_action(path) else {
            return Outcome::Unchanged;
        };
        match action {
            RowAction::Toggle => {
                let result = self.store.toggle(&id);
                self.log_failure("task_toggle", result);
            }
            RowAction::Delete => {
                let result = self.store.remove(&id);
                self.log_failure("task_remove", result);
            }
        }
        self.rendered()
    }

    fn begin_edit(&mut self, path: &[Node]) -> Outcome {
        let Some(id) = locate_text_row(path) else {
            return Outcome::Unchanged;
        };
        let Some(task) = self.store.get(&id) else {
            return Outcome::Unchanged;
        };
        if let Some(previous) = self.edit.take() {
            debug!(
                "event=edit_replaced module=controller previous_id={}",
                previous.id
            );
        }
        self.surface.open_editor(&id, &task.text);
        debug!("event=edit_start module=controller id={id}");
        self.edit = Some(EditSession { id });
        Outcome::EditStarted
    }

    /// Single exit of an edit session; `None` discards the edit.
    fn finish_edit(&mut self, commit: Option<&str>) -> Outcome {
        let Some(session) = self.edit.take() else {
            return Outcome::Unchanged;
        };
        match commit {
            Some(value) => {
                let result = self.store.set_text(&session.id, value);
                self.log_failure("task_edit", result);
                debug!("event=edit_finish module=controller id={} mode=commit", session.id);
            }
            None => {
                debug!("event=edit_finish module=controller id={} mode=discard", session.id);
            }
        }
        self.rendered()
    }

    fn clear_all(&mut self) -> Outcome {
        if !self.confirm.confirm(CLEAR_ALL_PROMPT) {
            debug!("event=tasks_clear_all module=controller status=declined");
            return Outcome::Unchanged;
        }
        let result = self.store.clear_all();
        self.log_failure("tasks_clear_all", result);
        self.rendered()
    }

    fn render(&mut self) -> View {
        // A rebuilt list has no editor in it.
        self.edit = None;
        render_into(self.store.tasks(), &mut self.surface)
    }

    fn rendered(&mut self) -> Outcome {
        self.render();
        Outcome::Rendered
    }

    fn log_failure<T>(&self, event: &str, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                error!("event={event} module=controller status=error error={err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{locate_row_action, locate_text_row, Node, NodeRole, RowAction};
    use crate::model::task::TaskId;

    #[test]
    fn checkbox_inside_label_resolves_to_toggle() {
        let path = vec![
            Node::of(NodeRole::Toggle),
            Node::of(NodeRole::Toggle),
            Node::of(NodeRole::Other),
            Node::row("t1"),
        ];
        assert_eq!(
            locate_row_action(&path),
            Some((TaskId::new("t1"), RowAction::Toggle))
        );
    }

    #[test]
    fn delete_icon_resolves_to_delete() {
        let path = vec![
            Node::of(NodeRole::Other),
            Node::of(NodeRole::Delete),
            Node::row("t2"),
        ];
        assert_eq!(
            locate_row_action(&path),
            Some((TaskId::new("t2"), RowAction::Delete))
        );
    }

    #[test]
    fn click_on_text_or_outside_rows_is_ignored() {
        let on_text = vec![Node::of(NodeRole::Text), Node::row("t3")];
        assert_eq!(locate_row_action(&on_text), None);

        let outside = vec![Node::of(NodeRole::Delete)];
        assert_eq!(locate_row_action(&outside), None);
    }

    #[test]
    fn controls_above_the_row_do_not_count() {
        let path = vec![Node::row("t4"), Node::of(NodeRole::Toggle)];
        assert_eq!(locate_row_action(&path), None);
    }

    #[test]
    fn text_row_requires_text_node() {
        let path = vec![Node::of(NodeRole::Text), Node::row("t5")];
        assert_eq!(locate_text_row(&path), Some(TaskId::new("t5")));
        let path = vec![Node::of(NodeRole::Toggle), Node::row("t5")];
        assert_eq!(locate_text_row(&path), None);
    }
}
