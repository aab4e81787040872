mod app;
pub mod board;
pub mod form;
pub mod input;
pub mod router;

pub use app::{App, CrosstermEvents, EventSource, TerminalGuard};
#[cfg(any(test, feature = "test-mocks"))]
pub use app::MockEventSource;
pub use board::BoardController;
pub use form::FormController;
pub use router::{AppEvent, AppRouter, Flow, Mode};
