//! Unit tests for the app loop and view

use super::*;
use crate::model::ColumnSet;
use crate::tui::{BoardController, FormController};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use std::collections::VecDeque;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn chars(s: &str) -> Vec<AppEvent> {
    s.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// Mock source replaying `events`, then reporting end of input
fn scripted(events: Vec<AppEvent>) -> MockEventSource {
    let mut queue: VecDeque<AppEvent> = events.into();
    let mut source = MockEventSource::new();
    source
        .expect_next_event()
        .returning(move || Ok(queue.pop_front()));
    source
}

fn test_app(width: u16, height: u16) -> App<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    App::new(terminal, AppRouter::default(), ThemeConfig::default()).unwrap()
}

fn screen(app: &App<TestBackend>) -> String {
    app.backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_new_reports_terminal_size_to_board() {
    let app = test_app(120, 30);
    assert_eq!(app.router().board().viewport(), (120, 30));
    assert_eq!(app.router().board().list_height(), 25);
}

#[test]
fn test_board_draws_three_columns() {
    let mut app = test_app(120, 30);
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("To Do (3)"));
    assert!(text.contains("In Progress (3)"));
    assert!(text.contains("Done (1)"));
    assert!(text.contains("Write documentation"));
}

#[test]
fn test_run_advances_and_quits() {
    let mut app = test_app(120, 30);
    let mut events = scripted(vec![key(KeyCode::Enter), key(KeyCode::Char('q')), key(KeyCode::Enter)]);

    app.run(&mut events).unwrap();

    let columns = app.router().board().columns();
    assert_eq!(columns.len(Column::ToDo), 2);
    assert_eq!(columns.len(Column::InProgress), 4);
    // Events after quit are never dispatched
    assert_eq!(columns.total(), 7);
    assert_eq!(columns.tasks(Column::InProgress)[3].title(), "Write documentation");
}

#[test]
fn test_run_creates_task_through_form() {
    let mut app = test_app(120, 30);
    let mut script = vec![key(KeyCode::Char('l')), key(KeyCode::Char('n'))];
    script.extend(chars("Ship"));
    script.push(key(KeyCode::Enter));
    script.extend(chars("release notes"));
    script.push(key(KeyCode::Enter));
    let mut events = scripted(script);

    app.run(&mut events).unwrap();

    assert_eq!(app.router().mode(), Mode::Board);
    let in_progress = app.router().board().columns().tasks(Column::InProgress);
    assert_eq!(in_progress.len(), 4);
    let created = &in_progress[3];
    assert_eq!(created.title(), "Ship");
    assert_eq!(created.description(), "release notes");
    assert_eq!(created.column(), Column::InProgress);
    assert!(screen(&app).contains("Ship"));
}

#[test]
fn test_form_popup_is_drawn() {
    let mut app = test_app(120, 30);
    let mut events = scripted(vec![key(KeyCode::Char('n')), key(KeyCode::Char('x'))]);

    app.run(&mut events).unwrap();

    let text = screen(&app);
    assert!(text.contains("New Task in To Do"));
    assert!(text.contains("Title"));
    assert!(text.contains("x█"));
}

#[test]
fn test_resize_event_updates_viewport() {
    let mut app = test_app(80, 24);
    let mut events = scripted(vec![AppEvent::Resize { width: 100, height: 40 }]);

    app.run(&mut events).unwrap();

    assert_eq!(app.router().board().viewport(), (100, 40));
    assert_eq!(app.router().board().columns().total(), 7);
}

#[test]
fn test_event_source_error_propagates() {
    let mut app = test_app(80, 24);
    let mut events = MockEventSource::new();
    events
        .expect_next_event()
        .times(1)
        .returning(|| Err(anyhow::anyhow!("input closed")));

    let err = app.run(&mut events).unwrap_err();
    assert!(err.to_string().contains("input closed"));
}

#[test]
fn test_event_source_error_after_events_propagates() {
    let mut app = test_app(120, 30);
    let mut queue: VecDeque<Result<Option<AppEvent>>> = VecDeque::from(vec![
        Ok(Some(key(KeyCode::Enter))),
        Ok(Some(key(KeyCode::Char('l')))),
        Err(anyhow::anyhow!("terminal read failed")),
        Ok(Some(key(KeyCode::Enter))),
    ]);
    let mut events = MockEventSource::new();
    events
        .expect_next_event()
        .times(3)
        .returning(move || queue.pop_front().unwrap_or(Ok(None)));

    let err = app.run(&mut events).unwrap_err();

    assert!(err.to_string().contains("terminal read failed"));
    let columns = app.router().board().columns();
    assert_eq!(columns.len(Column::ToDo), 2);
    assert_eq!(columns.len(Column::InProgress), 4);
    assert_eq!(app.router().board().focused(), Column::InProgress);
}

#[test]
fn test_crossterm_events_surface_reader_errors() {
    let (tx, rx) = mpsc::channel(4);
    tx.try_send(Ok(key(KeyCode::Char('j')))).unwrap();
    tx.try_send(Err(anyhow::anyhow!("poll failed"))).unwrap();
    drop(tx);
    let mut events = CrosstermEvents::from_receiver(rx);

    assert_eq!(events.next_event().unwrap(), Some(key(KeyCode::Char('j'))));
    let err = events.next_event().unwrap_err();
    assert!(err.to_string().contains("poll failed"));
    assert_eq!(events.next_event().unwrap(), None);
}

#[test]
fn test_empty_board_renders() {
    let terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
    let router = AppRouter::new(BoardController::new(ColumnSet::new()), FormController::default());
    let mut app = App::new(terminal, router, ThemeConfig::default()).unwrap();
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("To Do (0)"));
    assert!(text.contains("Done (0)"));
}

#[test]
fn test_footer_text_per_mode() {
    assert!(build_footer_text(Mode::Board, ActiveField::Title).contains("[n] new"));
    assert!(build_footer_text(Mode::Form, ActiveField::Title).contains("[Enter] next"));
    assert!(build_footer_text(Mode::Form, ActiveField::Description).contains("[Enter] save"));
}

#[test]
fn test_hex_to_color_falls_back_to_white() {
    assert_eq!(hex_to_color("#FF00FF"), Color::Rgb(255, 0, 255));
    assert_eq!(hex_to_color("nope"), Color::White);
}
