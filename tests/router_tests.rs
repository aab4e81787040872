use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kanban::model::{Column, ColumnSet, Task};
use kanban::tui::input::ActiveField;
use kanban::tui::{AppEvent, AppRouter, BoardController, Flow, FormController, Mode};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send(router: &mut AppRouter, code: KeyCode) -> Flow {
    router.dispatch(key(code))
}

fn type_str(router: &mut AppRouter, s: &str) {
    for c in s.chars() {
        assert_eq!(send(router, KeyCode::Char(c)), Flow::Continue);
    }
}

fn snapshot(router: &AppRouter) -> (Column, Vec<Vec<Task>>, Vec<Option<usize>>) {
    let columns = router.board().columns();
    (
        router.board().focused(),
        Column::ALL.iter().map(|c| columns.tasks(*c).to_vec()).collect(),
        Column::ALL.iter().map(|c| columns.selected_index(*c)).collect(),
    )
}

#[test]
fn test_router_starts_in_board_mode() {
    let router = AppRouter::default();
    assert_eq!(router.mode(), Mode::Board);
}

#[test]
fn test_new_task_opens_form_with_focused_column() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('l'));
    send(&mut router, KeyCode::Char('l'));

    assert_eq!(send(&mut router, KeyCode::Char('n')), Flow::Continue);
    assert_eq!(router.mode(), Mode::Form);
    assert_eq!(router.form().target_column(), Column::Done);
    assert_eq!(router.form().active_field(), ActiveField::Title);
}

#[test]
fn test_created_task_lands_on_board() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('l'));
    send(&mut router, KeyCode::Char('n'));
    type_str(&mut router, "X");
    send(&mut router, KeyCode::Enter);
    type_str(&mut router, "Y");
    send(&mut router, KeyCode::Enter);

    assert_eq!(router.mode(), Mode::Board);
    let in_progress = router.board().columns().tasks(Column::InProgress);
    assert_eq!(in_progress.len(), 4);
    assert_eq!(in_progress[3], Task::new(Column::InProgress, "X", "Y"));
    assert_eq!(router.form().title().value(), "");
    assert_eq!(router.form().active_field(), ActiveField::Title);
}

#[test]
fn test_task_created_event_switches_to_board() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('n'));

    let flow = router.dispatch(AppEvent::TaskCreated(Task::new(Column::Done, "T", "")));

    assert_eq!(flow, Flow::Continue);
    assert_eq!(router.mode(), Mode::Board);
    assert_eq!(router.board().columns().len(Column::Done), 2);
}

#[test]
fn test_form_input_never_touches_board() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('j'));
    let before = snapshot(&router);

    send(&mut router, KeyCode::Char('n'));
    for code in [
        KeyCode::Char('l'),
        KeyCode::Char('h'),
        KeyCode::Char('j'),
        KeyCode::Char('q'),
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Enter,
    ] {
        assert_eq!(send(&mut router, code), Flow::Continue);
    }
    assert_eq!(router.mode(), Mode::Form);
    assert_eq!(snapshot(&router), before);
}

#[test]
fn test_board_input_never_touches_form_text() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('n'));
    type_str(&mut router, "half");
    send(&mut router, KeyCode::Esc);
    assert_eq!(router.mode(), Mode::Board);

    for code in [KeyCode::Char('l'), KeyCode::Enter, KeyCode::Char('j'), KeyCode::Char('x')] {
        send(&mut router, code);
    }

    assert_eq!(router.form().title().value(), "half");
    assert_eq!(router.form().active_field(), ActiveField::Title);
}

#[test]
fn test_escape_returns_without_creating() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('n'));
    type_str(&mut router, "abandoned");
    send(&mut router, KeyCode::Esc);

    assert_eq!(router.mode(), Mode::Board);
    assert_eq!(router.board().columns().total(), 7);
}

#[test]
fn test_reopening_form_clears_previous_text() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('n'));
    type_str(&mut router, "old");
    send(&mut router, KeyCode::Esc);
    send(&mut router, KeyCode::Char('n'));

    assert_eq!(router.form().title().value(), "");
}

#[test]
fn test_quit_in_board_mode() {
    let mut router = AppRouter::default();
    assert_eq!(send(&mut router, KeyCode::Char('q')), Flow::Quit);
}

#[test]
fn test_q_is_text_in_form_mode() {
    let mut router = AppRouter::default();
    send(&mut router, KeyCode::Char('n'));
    assert_eq!(send(&mut router, KeyCode::Char('q')), Flow::Continue);
    assert_eq!(router.form().title().value(), "q");
}

#[test]
fn test_ctrl_c_quits_in_both_modes() {
    let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    let mut router = AppRouter::default();
    assert_eq!(router.dispatch(ctrl_c.clone()), Flow::Quit);

    send(&mut router, KeyCode::Char('n'));
    assert_eq!(router.dispatch(ctrl_c), Flow::Quit);
}

#[test]
fn test_resize_keeps_mode_and_tasks() {
    let mut router = AppRouter::new(
        BoardController::new(ColumnSet::new()),
        FormController::default(),
    );
    send(&mut router, KeyCode::Char('n'));

    router.dispatch(AppEvent::Resize { width: 80, height: 24 });

    assert_eq!(router.mode(), Mode::Form);
    assert_eq!(router.board().viewport(), (80, 24));
    assert_eq!(router.board().columns().total(), 0);
}
