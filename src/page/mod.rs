pub mod memory;

use std::cell::Cell;
use std::fmt;

use crate::render::{ActivityCard, RemovalTarget};

pub use memory::MemoryPage;

pub const PICKER_PLACEHOLDER: &str = "-- Select an activity --";

/// Style of a feedback message; doubles as the message element's class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

impl FeedbackKind {
    pub fn class_name(self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One `<option>` of the activity picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

impl PickerOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PICKER_PLACEHOLDER.to_string(),
        }
    }

    pub fn activity(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }
}

/// Current values of the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    pub activity: String,
    pub contact: String,
}

/// A form submission. Handlers call `prevent_default` to keep the host from
/// navigating away.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Cell<bool>,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// The host document the client draws into.
///
/// Methods take `&self` like DOM handles do; implementations use interior
/// mutability. None of them may block or await.
pub trait Page {
    /// Replaces everything inside the roster container with `html`. Removal
    /// handlers bound to the old contents go away with them.
    fn replace_roster(&self, html: &str);

    /// Appends a rendered card to the roster container.
    fn append_card(&self, card: &ActivityCard);

    /// Attaches a removal handler to a roster entry already in the page.
    fn bind_removal(&self, target: RemovalTarget);

    /// Drops all picker options and installs `placeholder` as the only one.
    fn reset_picker(&self, placeholder: PickerOption);

    fn add_picker_option(&self, option: PickerOption);

    fn read_signup_form(&self) -> SignupForm;

    fn reset_signup_form(&self);

    /// Sets the message text and its style class. Visibility is unchanged.
    fn set_message(&self, text: &str, kind: FeedbackKind);

    fn set_message_hidden(&self, hidden: bool);

    /// Asks the user a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;
}
