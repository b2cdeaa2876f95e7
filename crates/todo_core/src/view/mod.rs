//! Projection of the task collection into a renderable view.
//!
//! # Responsibility
//! - Describe the desired list and summary as plain data (`View`).
//! - Produce list markup with every piece of task text escaped.
//! - Replace a surface's previous output wholesale on each render.
//!
//! # Invariants
//! - Rows follow collection order.
//! - Task text never reaches markup unescaped.

mod html;

pub use html::escape_html;

use crate::model::task::{Task, TaskId};
use crate::service::task_store::TaskSummary;
use crate::surface::Surface;

/// Hint shown in place of the list when there are no tasks.
pub const EMPTY_HINT: &str = "No tasks yet. Add your first task!";

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    /// Raw task text; escaping happens when markup is produced.
    pub text: String,
    pub completed: bool,
}

/// Content of the list mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { hint: &'static str },
    Rows(Vec<RowView>),
}

/// Full description of what the surface should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub summary: TaskSummary,
    pub list: ListView,
}

impl View {
    /// Summary line, e.g. `2 active / 3 total`.
    pub fn summary_text(&self) -> String {
        self.summary.to_string()
    }

    /// Markup for the list container.
    pub fn list_html(&self) -> String {
        match &self.list {
            ListView::Empty { hint } => html::hint(hint),
            ListView::Rows(rows) => rows.iter().map(html::row).collect(),
        }
    }
}

/// Builds the view for `tasks`.
pub fn render(tasks: &[Task]) -> View {
    let list = if tasks.is_empty() {
        ListView::Empty { hint: EMPTY_HINT }
    } else {
        ListView::Rows(
            tasks
                .iter()
                .map(|task| RowView {
                    id: task.id.clone(),
                    text: task.text.clone(),
                    completed: task.completed,
                })
                .collect(),
        )
    };

    View {
        summary: TaskSummary::of(tasks),
        list,
    }
}

/// Renders `tasks` onto `surface`, replacing whatever it showed before.
pub fn render_into<S: Surface + ?Sized>(tasks: &[Task], surface: &mut S) -> View {
    let view = render(tasks);
    surface.replace_list(view.list_html());
    surface.set_summary(view.summary_text());
    view
}
