//! Modal form state - the working copy of an employee
//!
//! One `tui_input::Input` per scalar field, plus a variable-length address
//! sub-list whose rows can be appended and removed independently. The
//! create/edit distinction is an explicit mode flag set when the dialog is
//! opened, never inferred from the payload. No field is validated before
//! submission; whatever is typed (including nothing) is sent verbatim.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use shared::models::{Address, Employee};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// Dialog mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Composing a new record; the payload carries no id.
    Creating,
    /// Editing the existing record with this server-assigned id.
    Editing(i64),
}

/// Scalar employee fields, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 4] = [
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Email,
        EmployeeField::PhoneNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmployeeField::FirstName => "First Name",
            EmployeeField::LastName => "Last Name",
            EmployeeField::Email => "Email",
            EmployeeField::PhoneNumber => "Phone Number",
        }
    }
}

/// Fields of one address row, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    StreetName,
    PostalCode,
    ApartmentNumber,
    State,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        AddressField::StreetName,
        AddressField::PostalCode,
        AddressField::ApartmentNumber,
        AddressField::State,
        AddressField::Country,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AddressField::StreetName => "Street Name",
            AddressField::PostalCode => "Postal Code",
            AddressField::ApartmentNumber => "Apartment Number",
            AddressField::State => "State",
            AddressField::Country => "Country",
        }
    }
}

/// Currently focused element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Employee(EmployeeField),
    Address { row: usize, field: AddressField },
    AddAddress,
    Submit,
}

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// The submit control was activated.
    Submit,
    /// The dialog was cancelled; the working copy is to be discarded.
    Cancel,
    /// The key was handled internally (editing, focus movement).
    Consumed,
}

/// One editable address row.
#[derive(Debug, Clone, Default)]
pub struct AddressEntry {
    pub street_name: Input,
    pub postal_code: Input,
    pub apartment_number: Input,
    pub state: Input,
    pub country: Input,
}

impl AddressEntry {
    fn from_address(address: &Address) -> Self {
        Self {
            street_name: Input::new(address.street_name.clone()),
            postal_code: Input::new(address.postal_code.clone()),
            apartment_number: Input::new(address.apartment_number.as_str().to_string()),
            state: Input::new(address.state.clone()),
            country: Input::new(address.country.clone()),
        }
    }

    fn to_address(&self) -> Address {
        Address {
            street_name: self.street_name.value().to_string(),
            postal_code: self.postal_code.value().to_string(),
            apartment_number: self.apartment_number.value().into(),
            state: self.state.value().to_string(),
            country: self.country.value().to_string(),
        }
    }

    pub fn input(&self, field: AddressField) -> &Input {
        match field {
            AddressField::StreetName => &self.street_name,
            AddressField::PostalCode => &self.postal_code,
            AddressField::ApartmentNumber => &self.apartment_number,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
        }
    }

    fn input_mut(&mut self, field: AddressField) -> &mut Input {
        match field {
            AddressField::StreetName => &mut self.street_name,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::ApartmentNumber => &mut self.apartment_number,
            AddressField::State => &mut self.state,
            AddressField::Country => &mut self.country,
        }
    }
}

/// Form dialog state.
pub struct FormState {
    pub mode: FormMode,
    pub first_name: Input,
    pub last_name: Input,
    pub email: Input,
    pub phone_number: Input,
    pub addresses: Vec<AddressEntry>,
    pub focus: FormFocus,
}

impl FormState {
    /// Open the dialog in create mode: all fields empty, no address rows.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Creating,
            first_name: Input::default(),
            last_name: Input::default(),
            email: Input::default(),
            phone_number: Input::default(),
            addresses: Vec::new(),
            focus: FormFocus::Employee(EmployeeField::FirstName),
        }
    }

    /// Open the dialog in edit mode, seeded with a copy of the record.
    pub fn edit(id: i64, employee: &Employee) -> Self {
        Self {
            mode: FormMode::Editing(id),
            first_name: Input::new(employee.first_name.clone()),
            last_name: Input::new(employee.last_name.clone()),
            email: Input::new(employee.email.clone()),
            phone_number: Input::new(employee.phone_number.clone()),
            addresses: employee.addresses.iter().map(AddressEntry::from_address).collect(),
            focus: FormFocus::Employee(EmployeeField::FirstName),
        }
    }

    /// Rebuild the full payload from the working copy.
    ///
    /// The id is attached only in edit mode; a create payload has none.
    pub fn to_employee(&self) -> Employee {
        Employee {
            id: match self.mode {
                FormMode::Creating => None,
                FormMode::Editing(id) => Some(id),
            },
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            email: self.email.value().to_string(),
            phone_number: self.phone_number.value().to_string(),
            addresses: self.addresses.iter().map(AddressEntry::to_address).collect(),
        }
    }

    /// Append a blank address row and focus its first field.
    pub fn push_address(&mut self) {
        self.addresses.push(AddressEntry::default());
        self.focus = FormFocus::Address {
            row: self.addresses.len() - 1,
            field: AddressField::StreetName,
        };
    }

    /// Remove the address row at `row`, clamping focus to what remains.
    pub fn remove_address(&mut self, row: usize) {
        if row >= self.addresses.len() {
            return;
        }
        self.addresses.remove(row);

        if let FormFocus::Address { row: focused, field } = self.focus {
            if self.addresses.is_empty() {
                self.focus = FormFocus::AddAddress;
            } else if focused > row {
                self.focus = FormFocus::Address { row: focused - 1, field };
            } else if focused == row {
                self.focus = FormFocus::Address {
                    row: row.min(self.addresses.len() - 1),
                    field,
                };
            }
        }
    }

    /// Total number of focusable elements.
    fn focus_len(&self) -> usize {
        EmployeeField::ALL.len() + self.addresses.len() * AddressField::ALL.len() + 2
    }

    fn focus_index(&self) -> usize {
        let fields = EmployeeField::ALL.len();
        let per_row = AddressField::ALL.len();
        match self.focus {
            FormFocus::Employee(f) => {
                EmployeeField::ALL.iter().position(|x| *x == f).unwrap_or(0)
            }
            FormFocus::Address { row, field } => {
                fields
                    + row * per_row
                    + AddressField::ALL.iter().position(|x| *x == field).unwrap_or(0)
            }
            FormFocus::AddAddress => fields + self.addresses.len() * per_row,
            FormFocus::Submit => fields + self.addresses.len() * per_row + 1,
        }
    }

    fn focus_at(&self, index: usize) -> FormFocus {
        let fields = EmployeeField::ALL.len();
        let per_row = AddressField::ALL.len();
        let address_span = self.addresses.len() * per_row;

        if index < fields {
            FormFocus::Employee(EmployeeField::ALL[index])
        } else if index < fields + address_span {
            let offset = index - fields;
            FormFocus::Address {
                row: offset / per_row,
                field: AddressField::ALL[offset % per_row],
            }
        } else if index == fields + address_span {
            FormFocus::AddAddress
        } else {
            FormFocus::Submit
        }
    }

    /// Move focus to the next element, wrapping.
    pub fn focus_next(&mut self) {
        let next = (self.focus_index() + 1) % self.focus_len();
        self.focus = self.focus_at(next);
    }

    /// Move focus to the previous element, wrapping.
    pub fn focus_prev(&mut self) {
        let len = self.focus_len();
        let prev = (self.focus_index() + len - 1) % len;
        self.focus = self.focus_at(prev);
    }

    /// The input under focus, if focus is on an editable field.
    pub fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            FormFocus::Employee(field) => Some(match field {
                EmployeeField::FirstName => &mut self.first_name,
                EmployeeField::LastName => &mut self.last_name,
                EmployeeField::Email => &mut self.email,
                EmployeeField::PhoneNumber => &mut self.phone_number,
            }),
            FormFocus::Address { row, field } => {
                self.addresses.get_mut(row).map(|entry| entry.input_mut(field))
            }
            FormFocus::AddAddress | FormFocus::Submit => None,
        }
    }

    pub fn employee_input(&self, field: EmployeeField) -> &Input {
        match field {
            EmployeeField::FirstName => &self.first_name,
            EmployeeField::LastName => &self.last_name,
            EmployeeField::Email => &self.email,
            EmployeeField::PhoneNumber => &self.phone_number,
        }
    }

    /// Route a key press into the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        // Ctrl-D removes the focused address row.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
            if let FormFocus::Address { row, .. } = self.focus {
                self.remove_address(row);
            }
            return FormOutcome::Consumed;
        }

        match key.code {
            KeyCode::Esc => FormOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormOutcome::Consumed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormOutcome::Consumed
            }
            KeyCode::Enter => match self.focus {
                FormFocus::Submit => FormOutcome::Submit,
                FormFocus::AddAddress => {
                    self.push_address();
                    FormOutcome::Consumed
                }
                _ => {
                    self.focus_next();
                    FormOutcome::Consumed
                }
            },
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&Event::Key(key));
                }
                FormOutcome::Consumed
            }
        }
    }

    /// Dialog title, per the mode flag.
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Create Employee",
            FormMode::Editing(_) => "Edit Employee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use shared::models::{Address, Employee};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn create_mode_starts_with_an_empty_working_copy() {
        let form = FormState::create();
        let employee = form.to_employee();

        assert_eq!(employee, Employee::default());
        assert!(employee.id.is_none());
        assert!(employee.addresses.is_empty());
    }

    #[test]
    fn edit_mode_seeds_the_working_copy_from_the_record() {
        let record = Employee {
            id: Some(7),
            first_name: "Ann".to_string(),
            last_name: "Ng".to_string(),
            email: "ann@x.com".to_string(),
            phone_number: "555".to_string(),
            addresses: vec![Address {
                street_name: "Main St".to_string(),
                apartment_number: "4B".into(),
                ..Default::default()
            }],
        };

        let form = FormState::edit(7, &record);
        // Submitting without changes rebuilds the unchanged record.
        assert_eq!(form.to_employee(), record);
        assert_eq!(form.mode, FormMode::Editing(7));
    }

    #[test]
    fn add_then_remove_address_returns_to_empty() {
        let mut form = FormState::create();

        form.push_address();
        assert_eq!(form.addresses.len(), 1);
        let added = form.to_employee().addresses;
        assert_eq!(added, vec![Address::default()]);

        form.remove_address(0);
        assert!(form.addresses.is_empty());
        assert_eq!(form.focus, FormFocus::AddAddress);
    }

    #[test]
    fn ctrl_d_removes_the_focused_row_only() {
        let mut form = FormState::create();
        form.push_address();
        form.push_address();
        form.addresses[0].street_name = tui_input::Input::new("keep".to_string());

        // Focus is on row 1 after the second push.
        assert_eq!(
            form.focus,
            FormFocus::Address { row: 1, field: AddressField::StreetName }
        );
        form.handle_key(ctrl('d'));

        assert_eq!(form.addresses.len(), 1);
        assert_eq!(form.addresses[0].street_name.value(), "keep");
    }

    #[test]
    fn typing_routes_to_the_focused_field() {
        let mut form = FormState::create();
        form.handle_key(key(KeyCode::Char('A')));
        form.handle_key(key(KeyCode::Char('n')));
        form.handle_key(key(KeyCode::Char('n')));

        assert_eq!(form.to_employee().first_name, "Ann");
    }

    #[test]
    fn focus_wraps_over_the_whole_traversal_order() {
        let mut form = FormState::create();
        form.push_address();
        form.focus = FormFocus::Employee(EmployeeField::FirstName);

        // 4 employee fields + 5 address fields + AddAddress + Submit.
        for _ in 0..form.focus_len() {
            form.focus_next();
        }
        assert_eq!(form.focus, FormFocus::Employee(EmployeeField::FirstName));

        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Submit);
    }

    #[test]
    fn enter_submits_only_on_the_submit_control() {
        let mut form = FormState::create();

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Consumed);

        form.focus = FormFocus::Submit;
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Submit);
    }

    #[test]
    fn enter_on_add_address_appends_a_blank_row() {
        let mut form = FormState::create();
        form.focus = FormFocus::AddAddress;

        form.handle_key(key(KeyCode::Enter));

        assert_eq!(form.addresses.len(), 1);
        assert_eq!(
            form.focus,
            FormFocus::Address { row: 0, field: AddressField::StreetName }
        );
    }

    #[test]
    fn escape_cancels_unconditionally() {
        let mut form = FormState::create();
        form.handle_key(key(KeyCode::Char('x')));

        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
    }

    #[test]
    fn empty_fields_are_submitted_verbatim() {
        let mut form = FormState::create();
        form.push_address();

        // Nothing typed anywhere: the payload still carries the blank row.
        let employee = form.to_employee();
        assert_eq!(employee.first_name, "");
        assert_eq!(employee.addresses.len(), 1);
        assert_eq!(employee.addresses[0].street_name, "");
    }
}
