//! Screen state and key reducer
//!
//! `App` owns the in-memory employee list and the working copy bound to the
//! open dialog. Key handling is a pure reducer: it mutates state and returns
//! the request the main loop should issue, if any. Request results come back
//! as `ApiEvent`s and are folded in with `apply`.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directory_client::{ClientResult, Employee};

use crate::form::{FormMode, FormOutcome, FormState};

/// Fixed table page size.
pub const PAGE_SIZE: usize = 10;

/// How long a success toast stays visible.
const NOTICE_TTL: Duration = Duration::from_millis(2500);

/// What the screen is currently showing.
pub enum Mode {
    /// The table, with key-driven row actions.
    Browse,
    /// The modal create/edit dialog.
    Form(FormState),
    /// The blocking delete confirmation.
    ConfirmDelete { id: i64, first_name: String },
}

/// A request for the main loop to issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Re-read the full collection.
    Refresh,
    /// Create or update, per the mode flag, with the rebuilt working copy.
    Submit { mode: FormMode, employee: Employee },
    /// Delete the record with this id.
    Delete(i64),
    /// Leave the screen.
    Quit,
}

/// Result of a spawned request chain.
///
/// Every mutation variant carries the follow-up full read issued after the
/// mutation resolved, so the list is only ever replaced wholesale.
pub enum ApiEvent {
    Refreshed(ClientResult<Vec<Employee>>),
    Saved {
        mode: FormMode,
        result: ClientResult<Vec<Employee>>,
    },
    Deleted(ClientResult<Vec<Employee>>),
}

/// Transient success toast.
pub struct Notice {
    pub text: String,
    since: Instant,
}

/// Screen state.
pub struct App {
    /// The in-memory collection; replaced in full by every refresh.
    pub employees: Vec<Employee>,
    /// Cursor into `employees`; the visible page is derived from it.
    pub selected: usize,
    pub mode: Mode,
    /// Set while a request chain is in flight; request keys are ignored.
    pub busy: bool,
    pub notice: Option<Notice>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            selected: 0,
            mode: Mode::Browse,
            busy: false,
            notice: None,
        }
    }

    // ========== Pagination ==========

    pub fn page(&self) -> usize {
        self.selected / PAGE_SIZE
    }

    pub fn page_count(&self) -> usize {
        self.employees.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Rows of the currently visible page.
    pub fn page_rows(&self) -> &[Employee] {
        let start = self.page() * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.employees.len());
        &self.employees[start.min(self.employees.len())..end]
    }

    /// Cursor position within the visible page.
    pub fn selected_in_page(&self) -> usize {
        self.selected % PAGE_SIZE
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.employees.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.employees.len() {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn next_page(&mut self) {
        let candidate = self.selected + PAGE_SIZE;
        if candidate < self.employees.len() {
            self.selected = candidate;
        } else if self.page() + 1 < self.page_count() {
            self.selected = self.employees.len() - 1;
        }
    }

    fn prev_page(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    // ========== Key handling ==========

    /// Reduce one key press, returning the request to issue, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::Form(_) => self.handle_form_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                self.prev_page();
                None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                self.next_page();
                None
            }
            KeyCode::Char('n') => {
                self.mode = Mode::Form(FormState::create());
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                // Rows in the table always carry a server-assigned id.
                if let Some(employee) = self.selected_employee()
                    && let Some(id) = employee.id
                {
                    self.mode = Mode::Form(FormState::edit(id, employee));
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(employee) = self.selected_employee()
                    && let Some(id) = employee.id
                {
                    self.mode = Mode::ConfirmDelete {
                        id,
                        first_name: employee.first_name.clone(),
                    };
                }
                None
            }
            KeyCode::Char('r') => {
                if self.busy {
                    return None;
                }
                self.busy = true;
                Some(Action::Refresh)
            }
            _ => None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Action> {
        let Mode::ConfirmDelete { id, .. } = self.mode else {
            return None;
        };

        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Browse;
                if self.busy {
                    return None;
                }
                self.busy = true;
                Some(Action::Delete(id))
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                // Declining performs no request and changes nothing else.
                self.mode = Mode::Browse;
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let Mode::Form(form) = &mut self.mode else {
            return None;
        };

        match form.handle_key(key) {
            FormOutcome::Consumed => None,
            FormOutcome::Cancel => {
                // Working copy is discarded with the dialog, saved or not.
                self.mode = Mode::Browse;
                None
            }
            FormOutcome::Submit => {
                if self.busy {
                    return None;
                }
                let mode = form.mode;
                let employee = form.to_employee();
                self.busy = true;
                // The dialog stays open until the request chain succeeds.
                Some(Action::Submit { mode, employee })
            }
        }
    }

    // ========== Request results ==========

    /// Fold a finished request chain into the screen.
    ///
    /// Failures reproduce the source behavior of having no error UI: the
    /// list is left untouched and an open dialog stays open; the error only
    /// goes to the log.
    pub fn apply(&mut self, event: ApiEvent) {
        self.busy = false;

        match event {
            ApiEvent::Refreshed(result) => match result {
                Ok(list) => self.replace_employees(list),
                Err(err) => tracing::error!("refresh failed: {err}"),
            },
            ApiEvent::Saved { mode, result } => match result {
                Ok(list) => {
                    self.replace_employees(list);
                    self.mode = Mode::Browse;
                    self.set_notice(match mode {
                        FormMode::Creating => "Employee created",
                        FormMode::Editing(_) => "Employee updated",
                    });
                }
                Err(err) => tracing::error!("save failed: {err}"),
            },
            ApiEvent::Deleted(result) => match result {
                Ok(list) => {
                    self.replace_employees(list);
                    self.set_notice("Employee deleted");
                }
                Err(err) => tracing::error!("delete failed: {err}"),
            },
        }
    }

    /// Replace the collection wholesale; no diffing, no partial update.
    fn replace_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.selected = self
            .selected
            .min(self.employees.len().saturating_sub(1));
    }

    fn set_notice(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            since: Instant::now(),
        });
    }

    /// Expire the toast; called once per loop iteration.
    pub fn tick(&mut self) {
        if let Some(notice) = &self.notice
            && notice.since.elapsed() >= NOTICE_TTL
        {
            self.notice = None;
        }
    }
}
