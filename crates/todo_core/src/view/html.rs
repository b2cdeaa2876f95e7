//! Markup templates for list rows.

use super::RowView;

const CHECK_ICON: &str = r#"<svg viewBox="0 0 24 24" width="14" height="14" aria-hidden="true"><path fill="currentColor" d="M20.285 6.708L9 18 3.714 12.707l1.571-1.571L9 14.858l9.714-9.714z"></path></svg>"#;
const DELETE_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24"><path fill="currentColor" d="M9 3h6l1 2h5v2H3V5h5l1-2zM6 8h12l-1 12H7L6 8z"/></svg>"#;

/// Neutralizes characters that markup would interpret.
///
/// Covers `&`, `<` and `>` for element content plus both quote characters,
/// since text is also written into attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(super) fn hint(text: &str) -> String {
    format!(r#"<p class="hint">{}</p>"#, escape_html(text))
}

pub(super) fn row(row: &RowView) -> String {
    let text = escape_html(&row.text);
    format!(
        concat!(
            r#"<li class="task-item{completed_class}" data-id="{id}">"#,
            r#"<div class="task-left">"#,
            r#"<label class="checkbox" title="Toggle complete">"#,
            r#"<input type="checkbox"{checked} aria-label="Mark task complete">{check_icon}"#,
            r#"</label>"#,
            r#"<div class="task-text" title="{text}">{text}</div>"#,
            r#"</div>"#,
            r#"<div class="task-actions">"#,
            r#"<button class="icon-btn btn-delete" title="Delete task" aria-label="Delete task">{delete_icon}</button>"#,
            r#"</div>"#,
            r#"</li>"#,
        ),
        completed_class = if row.completed { " completed" } else { "" },
        id = escape_html(row.id.as_str()),
        checked = if row.completed { " checked" } else { "" },
        check_icon = CHECK_ICON,
        text = text,
        delete_icon = DELETE_ICON,
    )
}
