//! TUI rendering and the main event loop (impure shell).

pub mod cell;
pub mod constants;
pub mod grid;
pub mod layout;
pub mod styles;

pub use cell::{truncate_to_width, CellView};
pub use grid::GridView;
pub use layout::{grid_viewport, HeaderInfo};
pub use styles::{ColorConfig, GridStyles};

use crate::config::KeyBindings;
use crate::integration;
use crate::model::{AppError, InputError, KeyAction};
use crate::source::{Subscription, WidgetSource, WidgetStore};
use crate::state::{handle_scroll_action, handle_wheel, scroll_to};
use crate::view_state::{CellGeometry, Clock, ScrollPosition, SystemClock, VirtualGrid};
use constants::{IDLE_POLL, WHEEL_ROWS};
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

impl From<TuiError> for AppError {
    fn from(error: TuiError) -> Self {
        match error {
            TuiError::Io(e) => AppError::Terminal(e),
            TuiError::Input(e) => AppError::Input(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// store and clock so tests can drive time by hand.
pub struct TuiApp<B, S = WidgetSource, C = SystemClock>
where
    B: Backend,
    S: WidgetStore,
    C: Clock,
{
    terminal: Terminal<B>,
    grid: VirtualGrid<C>,
    store: S,
    subscription: Subscription,
    key_bindings: KeyBindings,
    styles: GridStyles,
    header: HeaderInfo,
    /// Last rendered scrollbar area (for click-to-jump)
    last_scrollbar_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        store: WidgetSource,
        geometry: CellGeometry,
        settle_delay: Duration,
        styles: GridStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let grid = VirtualGrid::with_system_clock(geometry, settle_delay);
        Self::from_parts(terminal, grid, store, styles)
    }
}

impl<B, S, C> TuiApp<B, S, C>
where
    B: Backend,
    S: WidgetStore,
    C: Clock,
{
    /// Assemble an app from an existing terminal, grid and store.
    ///
    /// Subscribes before taking the store snapshot so no update published
    /// in between is lost, seeds the grid and attaches it to the terminal's
    /// grid area.
    pub fn from_parts(
        terminal: Terminal<B>,
        mut grid: VirtualGrid<C>,
        mut store: S,
        styles: GridStyles,
    ) -> Result<Self, TuiError> {
        let subscription = store.subscribe();
        grid.seed(store.current_widgets());

        let size = terminal.size()?;
        grid.attach(grid_viewport(Rect::new(0, 0, size.width, size.height)));

        Ok(Self {
            terminal,
            grid,
            store,
            subscription,
            key_bindings: KeyBindings::default(),
            styles,
            header: HeaderInfo::default(),
            last_scrollbar_area: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Blocks on terminal input until the
    /// settle timer or the store's next wakeup is due, and redraws only
    /// when something visible changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = self.grid.clock().now();
            let timeout = integration::poll_timeout(
                self.grid.time_until_due(),
                self.store.next_wakeup(now),
                IDLE_POLL,
            );

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty = self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.tick()? || dirty {
                self.draw()?;
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit. Only key presses act; releases and
    /// repeats reported by some terminals are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.key_bindings.get(key) {
            Some(KeyAction::Quit) => true,
            Some(action) => {
                handle_scroll_action(&mut self.grid, action);
                false
            }
            None => false,
        }
    }

    /// Handle a single mouse event
    ///
    /// Wheel scrolls by cell rows; a left click or drag on the scrollbar
    /// jumps proportionally. Returns true if the live offset changed.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollUp => handle_wheel(&mut self.grid, -WHEEL_ROWS),
            MouseEventKind::ScrollDown => handle_wheel(&mut self.grid, WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                match self.last_scrollbar_area {
                    Some(area) if contains(area, mouse.column, mouse.row) => {
                        let span = f64::from(area.height.saturating_sub(1).max(1));
                        let fraction = f64::from(mouse.row - area.y) / span;
                        scroll_to(&mut self.grid, ScrollPosition::Fraction(fraction))
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Handle a terminal resize event
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.grid
            .on_resize(grid_viewport(Rect::new(0, 0, width, height)));
    }

    /// Poll the store, apply what it published and run a due scroll settle.
    ///
    /// Returns true if the frame needs redrawing.
    pub fn tick(&mut self) -> Result<bool, TuiError> {
        let now = self.grid.clock().now();
        let polled = self.store.poll(now)?;
        let summary =
            integration::sync_grid(&mut self.grid, &self.store, &mut self.subscription);
        let dropped = polled.dropped.len() + summary.dropped;
        self.header.dropped_updates += dropped;
        let settled = self.grid.tick();
        Ok(summary.needs_redraw() || settled || dropped > 0)
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let grid = &self.grid;
        let header = &self.header;
        let styles = self.styles;
        let completed = self.terminal.draw(|frame| {
            layout::render_layout(frame, grid, header, styles);
        })?;
        self.last_scrollbar_area = Some(layout::calculate_areas(completed.area).scrollbar);
        Ok(())
    }

    /// Stop listening to the store and tear the grid down.
    pub fn shutdown(&mut self) {
        self.subscription.cancel();
        self.grid.teardown();
    }

    /// The grid being displayed.
    pub fn grid(&self) -> &VirtualGrid<C> {
        &self.grid
    }

    /// The store feeding the grid.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Updates dropped since start.
    pub fn dropped_updates(&self) -> usize {
        self.header.dropped_updates
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Initialize and run the TUI application with a store
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    store: WidgetSource,
    geometry: CellGeometry,
    settle_delay: Duration,
    styles: GridStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(store, geometry, settle_delay, styles)?;
    info!("event loop started");

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.shutdown();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Widget;
    use crate::source::Simulator;
    use crate::view_state::{GridPhase, ManualClock, DEFAULT_SETTLE_DELAY};
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    const TICK: Duration = Duration::from_secs(1);

    type TestApp = TuiApp<TestBackend, Simulator, ManualClock>;

    /// 45x13 terminal: grid area 44x12, 4 columns of 10x3 cells, row unit 4.
    /// 40 widgets make 10 rows, total height 40, max offset 28.
    fn create_test_app() -> (ManualClock, TestApp) {
        let clock = ManualClock::new();
        let terminal = Terminal::new(TestBackend::new(45, 13)).expect("test terminal");
        let geometry = CellGeometry::new(10, 3, 1).expect("valid geometry");
        let grid = VirtualGrid::new(geometry, clock.clone(), DEFAULT_SETTLE_DELAY);
        let widgets = (1..=40)
            .map(|i| Widget::new(i, 0).with_name(format!("W{i}")))
            .collect();
        let store = Simulator::new(widgets, TICK, clock.now());
        let app = TuiApp::from_parts(terminal, grid, store, GridStyles::new(ColorConfig::enabled()))
            .expect("app");
        (clock, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn screen_row(app: &TestApp, y: u16) -> String {
        let buffer = app.terminal().backend().buffer();
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn from_parts_seeds_and_attaches() {
        let (_, app) = create_test_app();
        assert_eq!(app.grid().phase(), GridPhase::Windowed);
        assert_eq!(app.grid().widgets().len(), 40);
        assert_eq!(app.grid().viewport().width(), 44);
        assert!(!app.grid().render_set().is_empty());
    }

    #[test]
    fn draw_renders_header_and_cells() {
        let (_, mut app) = create_test_app();
        app.draw().expect("draw");
        assert!(screen_row(&app, 0).starts_with(" 40 widgets"));
        assert!(screen_row(&app, 2).starts_with("│W1      │ │W2"));
    }

    #[test]
    fn handle_key_q_returns_true() {
        let (_, mut app) = create_test_app();
        assert!(app.handle_key(press(KeyCode::Char('q'))));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let (_, mut app) = create_test_app();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn key_release_is_ignored() {
        let (_, mut app) = create_test_app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!app.handle_key(release));
    }

    #[test]
    fn handle_key_j_scrolls_one_row() {
        let (_, mut app) = create_test_app();
        assert!(!app.handle_key(press(KeyCode::Char('j'))));
        assert_eq!(app.grid().viewport().scroll_offset, 4);
        assert!(app.grid().has_pending_recompute());
    }

    #[test]
    fn tick_settles_scroll_after_delay() {
        let (clock, mut app) = create_test_app();
        app.handle_key(press(KeyCode::End));
        assert_eq!(app.grid().viewport().scroll_offset, 28);

        assert!(!app.tick().expect("tick"));
        clock.advance(DEFAULT_SETTLE_DELAY);
        assert!(app.tick().expect("tick"));
        assert_eq!(app.grid().visible_range().end, 40);
    }

    #[test]
    fn simulator_updates_reach_visible_cells() {
        let (clock, mut app) = create_test_app();
        clock.advance(TICK);
        assert!(app.tick().expect("tick"));
        assert!(app.grid().widgets().as_slice().iter().all(|w| w.value == 1));
        assert_eq!(app.dropped_updates(), 0);
    }

    #[test]
    fn wheel_scrolls_by_rows() {
        let (_, mut app) = create_test_app();
        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 5)));
        assert_eq!(app.grid().viewport().scroll_offset, 4);
        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollUp, 5, 5)));
        assert_eq!(app.grid().viewport().scroll_offset, 0);
    }

    #[test]
    fn scrollbar_click_jumps_proportionally() {
        let (_, mut app) = create_test_app();
        app.draw().expect("draw");
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 44, 12)));
        assert_eq!(app.grid().viewport().scroll_offset, 28);
    }

    #[test]
    fn click_outside_scrollbar_is_ignored() {
        let (_, mut app) = create_test_app();
        app.draw().expect("draw");
        assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 12)));
    }

    #[test]
    fn resize_relayouts_immediately() {
        let (_, mut app) = create_test_app();
        app.handle_resize(23, 13);
        let layout = app.grid().layout().expect("layout");
        assert_eq!(layout.columns_per_row(), 2);
        assert!(!app.grid().has_pending_recompute());
    }

    #[test]
    fn shutdown_tears_down_grid() {
        let (clock, mut app) = create_test_app();
        app.shutdown();
        assert_eq!(app.grid().phase(), GridPhase::TornDown);

        clock.advance(TICK);
        assert!(!app.tick().expect("tick"));
    }
}
