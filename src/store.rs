use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error};

use crate::api::ActivityApi;
use crate::model::ActivityCollection;
use crate::page::{Page, PickerOption};
use crate::render::render_activity;

pub const LOAD_FAILURE_NOTICE: &str = "<p>Failed to load activities. Please try again later.</p>";

/// What a call to [`ActivityStore::refresh`] did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The page now shows this many activities.
    Rendered { activities: usize },
    /// The fetch failed and the failure notice replaced the roster.
    Failed,
    /// A later refresh started before this one finished; its result was dropped.
    Superseded,
}

/// Fetches the activity collection and redraws the page from it.
///
/// Every successful refresh rebuilds the roster and the picker from scratch;
/// nothing from an earlier render is patched or reused.
pub struct ActivityStore<P: Page, A: ActivityApi> {
    page: Rc<P>,
    api: Rc<A>,
    latest_ticket: Cell<u64>,
    displayed: RefCell<ActivityCollection>,
}

impl<P: Page, A: ActivityApi> ActivityStore<P, A> {
    pub fn new(page: Rc<P>, api: Rc<A>) -> Self {
        Self {
            page,
            api,
            latest_ticket: Cell::new(0),
            displayed: RefCell::new(ActivityCollection::default()),
        }
    }

    /// The collection behind the current render.
    pub fn displayed(&self) -> ActivityCollection {
        self.displayed.borrow().clone()
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        debug!(ticket, "refreshing activities");

        let result = self.api.list_activities().await;

        // Latest-started wins: a slower, older fetch must not overwrite a newer render.
        if ticket != self.latest_ticket.get() {
            debug!(ticket, latest = self.latest_ticket.get(), "dropping superseded refresh");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(collection) => {
                self.render(&collection);
                let activities = collection.len();
                *self.displayed.borrow_mut() = collection;
                debug!(ticket, activities, "activities rendered");
                RefreshOutcome::Rendered { activities }
            }
            Err(err) => {
                error!(error = %err, "error fetching activities");
                self.page.replace_roster(LOAD_FAILURE_NOTICE);
                *self.displayed.borrow_mut() = ActivityCollection::default();
                RefreshOutcome::Failed
            }
        }
    }

    fn render(&self, collection: &ActivityCollection) {
        self.page.replace_roster("");
        self.page.reset_picker(PickerOption::placeholder());

        for (name, activity) in collection.iter() {
            let card = render_activity(name, activity);
            self.page.append_card(&card);
            // Entries exist only once the card is in the page.
            for target in &card.removals {
                self.page.bind_removal(target.clone());
            }
            self.page.add_picker_option(PickerOption::activity(name));
        }
    }
}
