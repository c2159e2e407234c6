//! The host UI surface the limits command reports through.
//!
//! The host owns three things the command can touch: transient notices, a
//! keyed one-line status slot and keyed multi-line widgets. Each slot is last
//! writer wins.

use crossterm::cursor::MoveToPreviousLine;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

/// Where the host draws a widget relative to its editor. A plain terminal has
/// no editor, so widgets always render below what is already on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetPlacement {
    #[default]
    BelowEditor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetOptions {
    pub placement: WidgetPlacement,
}

impl WidgetOptions {
    pub fn below_editor() -> Self {
        Self {
            placement: WidgetPlacement::BelowEditor,
        }
    }
}

pub trait HostUi: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);

    /// Sets or (with `None`) clears the status slot `key`.
    fn set_status(&self, key: &str, value: Option<&str>);

    /// Shows or (with `None`) removes the widget `key`.
    fn set_widget(&self, key: &str, lines: Option<&[String]>, options: WidgetOptions);
}

/// Renders the host UI on a plain terminal.
///
/// Notices go to stderr. The status slot is a single rewritable stderr line.
/// Widgets are printed to stdout and erased in place when cleared, which only
/// happens when stdout is an interactive terminal.
pub struct TerminalUi {
    stdout_interactive: bool,
    stderr_interactive: bool,
    state: Mutex<TerminalState>,
}

#[derive(Default)]
struct TerminalState {
    status_visible: bool,
    /// Key and rendered row count of the widget currently on screen
    widget: Option<(String, u16)>,
}

impl TerminalUi {
    pub fn new() -> Self {
        let capable = std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true);
        Self {
            stdout_interactive: capable && io::stdout().is_terminal(),
            stderr_interactive: capable && io::stderr().is_terminal(),
            state: Mutex::new(TerminalState::default()),
        }
    }

    /// Whether cleared widgets actually disappear from the screen.
    pub fn can_erase_widgets(&self) -> bool {
        self.stdout_interactive
    }

    fn clear_status_line(&self, state: &mut TerminalState) {
        if state.status_visible {
            let mut stderr = io::stderr();
            let _ = write!(stderr, "\r");
            let _ = execute!(stderr, Clear(ClearType::CurrentLine));
            state.status_visible = false;
        }
    }

    fn erase_widget(&self, state: &mut TerminalState, key: &str) {
        let Some((current_key, rows)) = state.widget.take() else {
            return;
        };
        if current_key != key {
            state.widget = Some((current_key, rows));
            return;
        }
        if self.stdout_interactive && rows > 0 {
            let mut stdout = io::stdout();
            let _ = execute!(
                stdout,
                MoveToPreviousLine(rows),
                Clear(ClearType::FromCursorDown)
            );
        }
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl HostUi for TerminalUi {
    fn notify(&self, message: &str, level: NotifyLevel) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.clear_status_line(&mut state);

        let label = match level {
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        };
        if self.stderr_interactive {
            let styled = match level {
                NotifyLevel::Info => label.cyan(),
                NotifyLevel::Warning => label.yellow(),
                NotifyLevel::Error => label.red(),
            };
            eprintln!("{}: {}", styled.bold(), message);
        } else {
            eprintln!("{}: {}", label, message);
        }
    }

    fn set_status(&self, _key: &str, value: Option<&str>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.clear_status_line(&mut state);

        let Some(value) = value else {
            return;
        };
        if self.stderr_interactive {
            let mut stderr = io::stderr();
            let _ = write!(stderr, "{}", value.dim());
            let _ = stderr.flush();
            state.status_visible = true;
        }
    }

    fn set_widget(&self, key: &str, lines: Option<&[String]>, _options: WidgetOptions) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.clear_status_line(&mut state);

        let Some(lines) = lines else {
            self.erase_widget(&mut state, key);
            return;
        };

        // A new widget under the same key replaces the old one.
        self.erase_widget(&mut state, key);

        let width = crossterm::terminal::size()
            .ok()
            .map(|(cols, _)| cols)
            .filter(|cols| *cols > 0)
            .unwrap_or(80);
        let mut stdout = io::stdout();
        for line in lines {
            let _ = queue!(stdout, crossterm::style::Print(line), crossterm::style::Print("\n"));
        }
        let _ = stdout.flush();

        state.widget = Some((key.to_string(), rendered_rows(lines, width)));
    }
}

/// Terminal rows taken by `lines` once wrapped at `width` columns.
fn rendered_rows(lines: &[String], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.chars().count().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
