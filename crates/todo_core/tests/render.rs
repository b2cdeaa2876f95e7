use todo_core::view::{render_into, EMPTY_HINT};
use todo_core::{escape_html, render, HeadlessSurface, ListView, Task, TaskId};

#[test]
fn markup_in_task_text_is_shown_literally() {
    let task = Task::with_id(TaskId::new("t1"), "<b>hi</b>").unwrap();

    let html = render(&[task]).list_html();
    assert!(!html.contains("<b>"));
    assert!(html.contains(">&lt;b&gt;hi&lt;/b&gt;</div>"));
    assert!(html.contains(r#"title="&lt;b&gt;hi&lt;/b&gt;""#));
}

#[test]
fn quotes_cannot_break_out_of_attributes() {
    let task = Task::with_id(TaskId::new("t1"), r#"" onmouseover="x"#).unwrap();

    let html = render(&[task]).list_html();
    assert!(!html.contains(r#"" onmouseover"#));
    assert!(html.contains("&quot; onmouseover=&quot;x"));
}

#[test]
fn escape_neutralizes_ampersand_first() {
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}

#[test]
fn each_row_carries_id_toggle_and_delete_controls() {
    let mut done = Task::with_id(TaskId::new("done-1"), "done").unwrap();
    done.toggle();
    let open = Task::with_id(TaskId::new("open-1"), "open").unwrap();

    let html = render(&[open, done]).list_html();
    assert_eq!(html.matches(r#"<li class="task-item"#).count(), 2);
    assert_eq!(html.matches("btn-delete").count(), 2);
    assert!(html.contains(r#"<li class="task-item" data-id="open-1">"#));
    assert!(html.contains(r#"<li class="task-item completed" data-id="done-1">"#));
    assert!(html.find("open-1").unwrap() < html.find("done-1").unwrap());
}

#[test]
fn render_into_replaces_previous_output() {
    let mut surface = HeadlessSurface::new();
    let task = Task::new("only").unwrap();

    render_into(&[task], &mut surface);
    assert!(surface.list_html.contains("only"));
    assert_eq!(surface.summary, "1 active / 1 total");

    let view = render_into(&[], &mut surface);
    assert_eq!(view.list, ListView::Empty { hint: EMPTY_HINT });
    assert!(!surface.list_html.contains("only"));
    assert!(surface.list_html.contains("hint"));
    assert_eq!(surface.summary, "0 active / 0 total");
    assert_eq!(surface.renders, 2);
}
