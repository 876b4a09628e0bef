use std::cell::RefCell;

use super::{FeedbackKind, Page, PickerOption, SignupForm};
use crate::render::{ActivityCard, RemovalTarget};

/// State of the feedback element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageState {
    pub text: String,
    pub kind: Option<FeedbackKind>,
    pub hidden: bool,
}

impl Default for MessageState {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
        }
    }
}

type Confirmer = Box<dyn Fn(&str) -> bool>;

/// An in-memory host document.
///
/// Used by the command-line host and by tests. Interactions a user would
/// perform in a browser (picking an activity, typing a contact, answering a
/// confirmation) are exposed as plain methods.
pub struct MemoryPage {
    roster_html: RefCell<String>,
    cards: RefCell<Vec<ActivityCard>>,
    bindings: RefCell<Vec<RemovalTarget>>,
    picker: RefCell<Vec<PickerOption>>,
    form: RefCell<SignupForm>,
    message: RefCell<MessageState>,
    message_log: RefCell<Vec<(String, FeedbackKind)>>,
    prompts: RefCell<Vec<String>>,
    confirmer: RefCell<Confirmer>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// A fresh page: loading notice in the roster, placeholder-only picker,
    /// hidden message, every confirmation declined.
    pub fn new() -> Self {
        Self {
            roster_html: RefCell::new("<p>Loading activities...</p>".to_string()),
            cards: RefCell::new(Vec::new()),
            bindings: RefCell::new(Vec::new()),
            picker: RefCell::new(vec![PickerOption::placeholder()]),
            form: RefCell::new(SignupForm::default()),
            message: RefCell::new(MessageState::default()),
            message_log: RefCell::new(Vec::new()),
            prompts: RefCell::new(Vec::new()),
            confirmer: RefCell::new(Box::new(|_| false)),
        }
    }

    /// Answers every confirmation prompt with `answer`.
    pub fn answer_confirmations(&self, answer: bool) {
        *self.confirmer.borrow_mut() = Box::new(move |_| answer);
    }

    /// Routes confirmation prompts to `confirmer`.
    pub fn set_confirmer<F>(&self, confirmer: F)
    where
        F: Fn(&str) -> bool + 'static,
    {
        *self.confirmer.borrow_mut() = Box::new(confirmer);
    }

    /// Picks an activity in the form's selector. Like a `<select>`, a value with
    /// no matching option selects the placeholder.
    pub fn select_activity(&self, name: &str) {
        let known = self.picker.borrow().iter().any(|option| option.value == name);
        self.form.borrow_mut().activity = if known { name.to_string() } else { String::new() };
    }

    pub fn type_contact(&self, contact: &str) {
        self.form.borrow_mut().contact = contact.to_string();
    }

    pub fn roster_html(&self) -> String {
        self.roster_html.borrow().clone()
    }

    pub fn cards(&self) -> Vec<ActivityCard> {
        self.cards.borrow().clone()
    }

    /// Removal handlers currently attached, in binding order.
    pub fn bound_removals(&self) -> Vec<RemovalTarget> {
        self.bindings.borrow().clone()
    }

    /// The bound handler for `contact` in `activity`, if that entry is on screen.
    pub fn removal_for(&self, activity: &str, contact: &str) -> Option<RemovalTarget> {
        self.bindings
            .borrow()
            .iter()
            .find(|target| target.activity == activity && target.contact == contact)
            .cloned()
    }

    pub fn picker_options(&self) -> Vec<PickerOption> {
        self.picker.borrow().clone()
    }

    pub fn signup_form(&self) -> SignupForm {
        self.form.borrow().clone()
    }

    pub fn message(&self) -> MessageState {
        self.message.borrow().clone()
    }

    /// Every message set so far, oldest first.
    pub fn message_log(&self) -> Vec<(String, FeedbackKind)> {
        self.message_log.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Page for MemoryPage {
    fn replace_roster(&self, html: &str) {
        *self.roster_html.borrow_mut() = html.to_string();
        self.cards.borrow_mut().clear();
        self.bindings.borrow_mut().clear();
    }

    fn append_card(&self, card: &ActivityCard) {
        self.roster_html.borrow_mut().push_str(&card.html);
        self.cards.borrow_mut().push(card.clone());
    }

    fn bind_removal(&self, target: RemovalTarget) {
        debug_assert!(
            self.cards
                .borrow()
                .iter()
                .any(|card| card.removals.contains(&target)),
            "handler bound to an entry that is not on the page: {target:?}"
        );
        self.bindings.borrow_mut().push(target);
    }

    fn reset_picker(&self, placeholder: PickerOption) {
        *self.picker.borrow_mut() = vec![placeholder];
    }

    fn add_picker_option(&self, option: PickerOption) {
        self.picker.borrow_mut().push(option);
    }

    fn read_signup_form(&self) -> SignupForm {
        self.form.borrow().clone()
    }

    fn reset_signup_form(&self) {
        *self.form.borrow_mut() = SignupForm::default();
    }

    fn set_message(&self, text: &str, kind: FeedbackKind) {
        let mut message = self.message.borrow_mut();
        message.text = text.to_string();
        message.kind = Some(kind);
        self.message_log.borrow_mut().push((text.to_string(), kind));
    }

    fn set_message_hidden(&self, hidden: bool) {
        self.message.borrow_mut().hidden = hidden;
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        (*self.confirmer.borrow())(prompt)
    }
}
