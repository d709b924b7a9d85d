//! Front-end state and input handling.
//!
//! The [`App`] owns a clone of the [`DisplayBoard`] the poller writes into,
//! plus the bits of UI state around it: which input has focus, the time of
//! the last successful update and a transient notice line.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::display::{Binding, DisplayBoard};
use crate::error::DeviceError;
use crate::poller::{PollEvent, PollOutcome};
use crate::traits::{DisplayTarget, TargetKind};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Messages delivered to the UI loop from background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// A poll cycle finished.
    Poll(PollEvent),
    /// The WiFi form was submitted.
    WifiSaved(Result<(), DeviceError>),
    /// A restart was requested.
    Restarted(Result<(), DeviceError>),
}

/// What the UI loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    SaveWifi,
    Restart,
}

/// A one-line message in the footer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

impl Notice {
    /// Whether the notice should still be displayed.
    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < NOTICE_TTL
    }
}

/// Front-end state.
#[derive(Debug)]
pub struct App {
    /// Device base URL, shown in the header
    pub base_url: String,
    /// Targets shared with the poller
    pub board: DisplayBoard,
    /// Index of the focused input among the board's input bindings
    pub focus: usize,
    /// Whether the password input is shown in clear text
    pub show_password: bool,
    /// Finish time of the last poll that updated the board
    pub last_update: Option<DateTime<Local>>,
    /// Footer notice
    pub notice: Option<Notice>,
    /// A device command is in flight
    pub busy: bool,
}

impl App {
    pub fn new(base_url: impl Into<String>, board: DisplayBoard) -> Self {
        Self {
            base_url: base_url.into(),
            board,
            focus: 0,
            show_password: false,
            last_update: None,
            notice: None,
            busy: false,
        }
    }

    /// Input bindings in display order.
    pub fn inputs(&self) -> Vec<&Binding> {
        self.board.bindings_of(TargetKind::Input).collect()
    }

    /// Label bindings in display order.
    pub fn labels(&self) -> Vec<&Binding> {
        self.board.bindings_of(TargetKind::Label).collect()
    }

    fn focused_target(&self) -> Option<Arc<dyn DisplayTarget>> {
        self.inputs().get(self.focus).map(|b| Arc::clone(&b.target))
    }

    fn edit_focused(&self, mut edit: impl FnMut(&mut String)) {
        if let Some(target) = self.focused_target() {
            target.update(&mut |value| {
                edit(value);
                true
            });
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.inputs().len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    /// Show a notice in the footer.
    pub fn set_notice(&mut self, text: impl Into<String>, is_error: bool) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// The notice, if it has not expired.
    pub fn visible_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible())
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Action::Quit,
            KeyCode::Char('s') if ctrl => {
                if self.busy {
                    Action::None
                } else {
                    Action::SaveWifi
                }
            }
            KeyCode::Char('r') if ctrl => {
                if self.busy {
                    Action::None
                } else {
                    Action::Restart
                }
            }
            KeyCode::Char('p') if ctrl => {
                self.show_password = !self.show_password;
                Action::None
            }
            KeyCode::Char('u') if ctrl => {
                self.edit_focused(|value| value.clear());
                Action::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| {
                    value.pop();
                });
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit_focused(|value| value.push(c));
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Poll(event) => {
                // Failed polls leave the screen as it was.
                if let PollOutcome::Applied(_) = event.outcome {
                    self.last_update = Some(event.at);
                }
            }
            AppMessage::WifiSaved(result) => {
                self.busy = false;
                match result {
                    Ok(()) => self.set_notice("WiFi saved, device is restarting", false),
                    Err(e) => self.set_notice(format!("Saving WiFi failed: {}", e), true),
                }
            }
            AppMessage::Restarted(result) => {
                self.busy = false;
                match result {
                    Ok(()) => self.set_notice("Device is restarting", false),
                    Err(e) => self.set_notice(format!("Restart failed: {}", e), true),
                }
            }
        }
    }
}
