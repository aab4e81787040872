use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

use crate::config::ThemeConfig;
use crate::model::{Column, Task};

use super::input::{ActiveField, TextField};
use super::router::{AppEvent, AppRouter, Flow, Mode};

/// How often the reader thread checks whether the app has gone away
const READ_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current mode
fn build_footer_text(mode: Mode, active_field: ActiveField) -> &'static str {
    match mode {
        Mode::Board => " [h/l] focus  [j/k] select  [Enter] advance  [n] new  [q] quit ",
        Mode::Form => match active_field {
            ActiveField::Title => " Enter task title... [Enter] next  [Tab] switch  [Esc] back ",
            ActiveField::Description => {
                " Enter description... [Alt+Enter] newline  [Enter] save  [Tab] switch  [Esc] back "
            }
        },
    }
}

/// Source of input events for the app loop.
///
/// Events are consumed one at a time; this is the only place input enters
/// the router, whatever thread produced it.
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait EventSource {
    /// Next event, or `None` once the source is exhausted
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

/// Terminal input read on a background thread and funneled through a channel.
///
/// A read failure is sent down the channel, so it ends the app loop with an
/// error instead of looking like the input ran out.
pub struct CrosstermEvents {
    rx: mpsc::Receiver<Result<AppEvent>>,
}

impl CrosstermEvents {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(64);
        std::thread::spawn(move || {
            if let Err(err) = read_terminal_events(&tx) {
                warn!(%err, "terminal event reader stopped");
                let _ = tx.blocking_send(Err(err.context("failed to read terminal input")));
            }
        });
        Self::from_receiver(rx)
    }

    fn from_receiver(rx: mpsc::Receiver<Result<AppEvent>>) -> Self {
        Self { rx }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        self.rx.blocking_recv().transpose()
    }
}

fn read_terminal_events(tx: &mpsc::Sender<Result<AppEvent>>) -> Result<()> {
    while !tx.is_closed() {
        if !event::poll(READ_POLL_INTERVAL)? {
            continue;
        }
        let app_event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Resize(width, height) => AppEvent::Resize { width, height },
            _ => continue,
        };
        if tx.blocking_send(Ok(app_event)).is_err() {
            break;
        }
    }
    Ok(())
}

/// Raw mode and alternate screen for the lifetime of the guard
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub struct App<B: Backend> {
    terminal: Terminal<B>,
    router: AppRouter,
    theme: ThemeConfig,
}

impl<B> App<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    /// Wrap a terminal and report its current size to the board
    pub fn new(terminal: Terminal<B>, mut router: AppRouter, theme: ThemeConfig) -> Result<Self> {
        let size = terminal.size()?;
        router.dispatch(AppEvent::Resize {
            width: size.width,
            height: size.height,
        });
        Ok(Self {
            terminal,
            router,
            theme,
        })
    }

    pub fn router(&self) -> &AppRouter {
        &self.router
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Draw, then dispatch events one by one until quit or the source ends
    pub fn run(&mut self, events: &mut dyn EventSource) -> Result<()> {
        self.draw()?;
        while let Some(event) = events.next_event()? {
            if self.router.dispatch(event) == Flow::Quit {
                debug!("leaving event loop");
                break;
            }
            self.draw()?;
        }
        Ok(())
    }

    pub fn draw(&mut self) -> Result<()> {
        let router = &self.router;
        let theme = &self.theme;
        self.terminal.draw(|frame| {
            let area = frame.area();
            match router.mode() {
                Mode::Board => draw_board(router, theme, frame, area),
                Mode::Form => draw_form(router, theme, frame, area),
            }
        })?;
        Ok(())
    }
}

fn draw_board(router: &AppRouter, theme: &ThemeConfig, frame: &mut Frame, area: Rect) {
    let board = router.board();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[0]);

    for column in Column::ALL {
        let is_focused = board.focused() == column;
        let tasks = board.columns().tasks(column);

        let title = format!(" {} ({}) ", column.title(), tasks.len());
        let block = if is_focused {
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(hex_to_color(&theme.color_focused)))
                .title_style(Style::default().fg(hex_to_color(&theme.color_focused)).bold())
        } else {
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(&theme.color_normal)))
        };

        let items: Vec<ListItem> = tasks.iter().map(|task| task_item(task, theme)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(hex_to_color(&theme.color_selected)))
            .highlight_symbol("│ ");

        // Only the focused column shows its cursor
        let selected = if is_focused {
            board.columns().selected_index(column)
        } else {
            None
        };
        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, columns[column.index()], &mut state);
    }

    let footer = Paragraph::new(build_footer_text(Mode::Board, ActiveField::Title))
        .style(Style::default().fg(hex_to_color(&theme.color_dimmed)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[1]);
}

fn task_item<'a>(task: &'a Task, theme: &ThemeConfig) -> ListItem<'a> {
    let title = Line::styled(task.title(), Style::default().fg(hex_to_color(&theme.color_text)).bold());
    let description = if task.description().is_empty() {
        Line::styled("No description", Style::default().fg(hex_to_color(&theme.color_dimmed)).italic())
    } else {
        let first_line = task.description().lines().next().unwrap_or_default();
        Line::styled(first_line, Style::default().fg(hex_to_color(&theme.color_description)))
    };
    ListItem::new(vec![title, description, Line::default()])
}

fn draw_form(router: &AppRouter, theme: &ThemeConfig, frame: &mut Frame, area: Rect) {
    let form = router.form();
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let outer = Block::default()
        .title(format!(" New Task in {} ", form.target_column().title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(hex_to_color(&theme.color_focused)));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Description
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    frame.render_widget(field_paragraph(form.title(), " Title ", theme), chunks[0]);
    frame.render_widget(field_paragraph(form.description(), " Description ", theme), chunks[1]);

    let hints = Paragraph::new(build_footer_text(Mode::Form, form.active_field()))
        .style(Style::default().fg(hex_to_color(&theme.color_dimmed)));
    frame.render_widget(hints, chunks[2]);
}

fn field_paragraph<'a>(field: &'a TextField, label: &'a str, theme: &ThemeConfig) -> Paragraph<'a> {
    let border_color = if field.is_focused() {
        hex_to_color(&theme.color_selected)
    } else {
        hex_to_color(&theme.color_normal)
    };
    let text = if field.is_focused() {
        let (before, after) = field.split_at_cursor();
        format!("{}█{}", before, after)
    } else {
        field.value().to_string()
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(hex_to_color(&theme.color_text)))
        .block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    if field.is_multiline() {
        paragraph.wrap(Wrap { trim: false })
    } else {
        paragraph
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
