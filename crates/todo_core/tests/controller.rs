use std::cell::Cell;
use std::rc::Rc;
use todo_core::controller::CLEAR_ALL_PROMPT;
use todo_core::view::EMPTY_HINT;
use todo_core::{
    Controller, EditKey, HeadlessSurface, KvTaskRepository, MemoryKvStore, Node, NodeRole,
    Outcome, TaskId, TaskRepository, TaskStore, UiEvent,
};

type TestController<C> = Controller<KvTaskRepository<MemoryKvStore>, HeadlessSurface, C>;

fn controller_with<C: FnMut(&str) -> bool>(confirm: C) -> TestController<C> {
    let store = TaskStore::open(KvTaskRepository::new(MemoryKvStore::new()));
    let mut controller = Controller::new(store, HeadlessSurface::new(), confirm);
    controller.start();
    controller
}

fn accept_all(_message: &str) -> bool {
    true
}

fn controller() -> TestController<fn(&str) -> bool> {
    controller_with(accept_all as fn(&str) -> bool)
}

fn submit<C: FnMut(&str) -> bool>(controller: &mut TestController<C>, text: &str) -> TaskId {
    controller.surface_mut().type_input(text);
    assert_eq!(controller.handle(UiEvent::Submit), Outcome::Rendered);
    controller.store().tasks()[0].id.clone()
}

fn click(role: NodeRole, id: &TaskId) -> UiEvent {
    UiEvent::ListClick {
        path: vec![Node::of(role), Node::row(id.clone())],
    }
}

fn double_click_text(id: &TaskId) -> UiEvent {
    UiEvent::ListDoubleClick {
        path: vec![Node::of(NodeRole::Text), Node::row(id.clone())],
    }
}

fn persisted<C: FnMut(&str) -> bool>(controller: &TestController<C>) -> Vec<todo_core::Task> {
    controller
        .store()
        .repository()
        .try_load()
        .unwrap()
        .unwrap_or_default()
}

#[test]
fn start_renders_placeholder_for_empty_list() {
    let controller = controller();

    assert!(controller.surface().list_html.contains(EMPTY_HINT));
    assert_eq!(controller.surface().summary, "0 active / 0 total");
}

#[test]
fn buy_milk_scenario() {
    let mut controller = controller();

    let id = submit(&mut controller, "Buy milk");
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.store().tasks()[0].text, "Buy milk");
    assert!(!controller.store().tasks()[0].completed);
    assert_eq!(controller.surface().summary, "1 active / 1 total");

    assert_eq!(
        controller.handle(click(NodeRole::Toggle, &id)),
        Outcome::Rendered
    );
    assert_eq!(controller.surface().summary, "0 active / 1 total");

    assert_eq!(
        controller.handle(click(NodeRole::Delete, &id)),
        Outcome::Rendered
    );
    assert!(controller.store().is_empty());
    assert!(controller.surface().list_html.contains(EMPTY_HINT));
    assert!(persisted(&controller).is_empty());
}

#[test]
fn successful_submit_clears_and_focuses_input() {
    let mut controller = controller();

    submit(&mut controller, "  Walk dog ");
    assert_eq!(controller.surface().input, "");
    assert!(controller.surface().input_focused);
    assert_eq!(controller.store().tasks()[0].text, "Walk dog");
}

#[test]
fn blank_submit_leaves_input_untouched() {
    let mut controller = controller();
    controller.surface_mut().type_input("   ");
    let renders = controller.surface().renders;

    assert_eq!(controller.handle(UiEvent::Submit), Outcome::Unchanged);
    assert_eq!(controller.surface().renders, renders);
    assert_eq!(controller.surface().input, "   ");
    assert!(controller.store().is_empty());
}

#[test]
fn input_blur_strips_leading_whitespace_only() {
    let mut controller = controller();
    controller.surface_mut().type_input("  hello  ");

    assert_eq!(controller.handle(UiEvent::InputBlur), Outcome::Unchanged);
    assert_eq!(controller.surface().input, "hello  ");
    assert!(controller.store().is_empty());
}

#[test]
fn click_outside_actionable_controls_is_ignored() {
    let mut controller = controller();
    let id = submit(&mut controller, "A");
    let renders = controller.surface().renders;

    assert_eq!(
        controller.handle(click(NodeRole::Text, &id)),
        Outcome::Unchanged
    );
    assert_eq!(
        controller.handle(UiEvent::ListClick {
            path: vec![Node::of(NodeRole::Other)],
        }),
        Outcome::Unchanged
    );
    assert_eq!(controller.surface().renders, renders);
    assert!(!controller.store().tasks()[0].completed);
}

#[test]
fn click_on_toggle_inside_delete_row_fires_one_action() {
    let mut controller = controller();
    let id = submit(&mut controller, "A");

    controller.handle(UiEvent::ListClick {
        path: vec![
            Node::of(NodeRole::Toggle),
            Node::of(NodeRole::Delete),
            Node::row(id.clone()),
        ],
    });
    assert_eq!(controller.store().len(), 1);
    assert!(controller.store().get(&id).unwrap().completed);
}

#[test]
fn enter_commits_edit_once_and_following_blur_is_ignored() {
    let mut controller = controller();
    let id = submit(&mut controller, "draft");

    assert_eq!(controller.handle(double_click_text(&id)), Outcome::EditStarted);
    let editor = controller.surface().editor.clone().unwrap();
    assert_eq!(editor.id, id);
    assert_eq!(editor.value, "draft");
    assert_eq!(controller.editing(), Some(&id));

    assert_eq!(
        controller.handle(UiEvent::EditKey {
            key: EditKey::Enter,
            value: "final".to_string(),
        }),
        Outcome::Rendered
    );
    let renders = controller.surface().renders;

    assert_eq!(
        controller.handle(UiEvent::EditBlur {
            value: "stale blur value".to_string(),
        }),
        Outcome::Unchanged
    );
    assert_eq!(controller.store().get(&id).unwrap().text, "final");
    assert_eq!(controller.surface().renders, renders);
    assert!(controller.editing().is_none());
}

#[test]
fn blur_commits_edit() {
    let mut controller = controller();
    let id = submit(&mut controller, "draft");
    controller.handle(double_click_text(&id));

    assert_eq!(
        controller.handle(UiEvent::EditBlur {
            value: "  edited ".to_string(),
        }),
        Outcome::Rendered
    );
    assert_eq!(controller.store().get(&id).unwrap().text, "edited");
    assert_eq!(persisted(&controller), controller.store().tasks());
    assert!(controller.surface().editor.is_none());
}

#[test]
fn blank_edit_keeps_text_but_still_rerenders() {
    let mut controller = controller();
    let id = submit(&mut controller, "keep me");
    controller.handle(double_click_text(&id));
    let renders = controller.surface().renders;

    assert_eq!(
        controller.handle(UiEvent::EditBlur {
            value: "   ".to_string(),
        }),
        Outcome::Rendered
    );
    assert_eq!(controller.store().get(&id).unwrap().text, "keep me");
    assert_eq!(controller.surface().renders, renders + 1);
}

#[test]
fn escape_discards_edit_and_blur_afterwards_does_not_commit() {
    let mut controller = controller();
    let id = submit(&mut controller, "original");
    controller.handle(double_click_text(&id));

    assert_eq!(
        controller.handle(UiEvent::EditKey {
            key: EditKey::Escape,
            value: "changed".to_string(),
        }),
        Outcome::Rendered
    );
    assert_eq!(
        controller.handle(UiEvent::EditBlur {
            value: "changed".to_string(),
        }),
        Outcome::Unchanged
    );
    assert_eq!(controller.store().get(&id).unwrap().text, "original");
}

#[test]
fn other_keys_keep_edit_session_open() {
    let mut controller = controller();
    let id = submit(&mut controller, "typing");
    controller.handle(double_click_text(&id));

    assert_eq!(
        controller.handle(UiEvent::EditKey {
            key: EditKey::Other,
            value: "typin".to_string(),
        }),
        Outcome::Unchanged
    );
    assert_eq!(controller.editing(), Some(&id));
}

#[test]
fn double_click_outside_text_does_not_start_edit() {
    let mut controller = controller();
    let id = submit(&mut controller, "A");

    assert_eq!(
        controller.handle(UiEvent::ListDoubleClick {
            path: vec![Node::of(NodeRole::Toggle), Node::row(id.clone())],
        }),
        Outcome::Unchanged
    );
    assert_eq!(
        controller.handle(double_click_text(&TaskId::new("gone"))),
        Outcome::Unchanged
    );
    assert!(controller.editing().is_none());
}

#[test]
fn edit_of_task_removed_meanwhile_is_a_no_op() {
    let mut controller = controller();
    let id = submit(&mut controller, "A");
    controller.handle(double_click_text(&id));
    // Any other re-render drops the open editor with it.
    controller.handle(click(NodeRole::Delete, &id));

    assert_eq!(
        controller.handle(UiEvent::EditBlur {
            value: "B".to_string(),
        }),
        Outcome::Unchanged
    );
    assert!(controller.store().is_empty());
}

#[test]
fn clear_completed_removes_done_tasks() {
    let mut controller = controller();
    let a = submit(&mut controller, "A");
    submit(&mut controller, "B");
    controller.handle(click(NodeRole::Toggle, &a));

    assert_eq!(controller.handle(UiEvent::ClearCompleted), Outcome::Rendered);
    let texts: Vec<&str> = controller
        .store()
        .tasks()
        .iter()
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(texts, vec!["B"]);
    assert_eq!(controller.surface().summary, "1 active / 1 total");
}

#[test]
fn declined_clear_all_changes_nothing() {
    let asked = Rc::new(Cell::new(0));
    let asked_in_prompt = Rc::clone(&asked);
    let mut controller = controller_with(move |message: &str| {
        assert_eq!(message, CLEAR_ALL_PROMPT);
        asked_in_prompt.set(asked_in_prompt.get() + 1);
        false
    });
    submit(&mut controller, "A");
    submit(&mut controller, "B");

    assert_eq!(controller.handle(UiEvent::ClearAll), Outcome::Unchanged);
    assert_eq!(asked.get(), 1);
    assert_eq!(controller.store().len(), 2);
    assert_eq!(persisted(&controller).len(), 2);
}

#[test]
fn confirmed_clear_all_empties_list() {
    let mut controller = controller();
    submit(&mut controller, "A");
    submit(&mut controller, "B");

    assert_eq!(controller.handle(UiEvent::ClearAll), Outcome::Rendered);
    assert!(controller.store().is_empty());
    assert!(persisted(&controller).is_empty());
    assert!(controller.surface().list_html.contains(EMPTY_HINT));
}

#[test]
fn rendered_rows_follow_most_recent_first() {
    let mut controller = controller();
    let a = submit(&mut controller, "A");
    let b = submit(&mut controller, "B");

    let html = &controller.surface().list_html;
    let pos_a = html.find(a.as_str()).unwrap();
    let pos_b = html.find(b.as_str()).unwrap();
    assert!(pos_b < pos_a);
}
