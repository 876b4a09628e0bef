use std::rc::Rc;

use crate::api::ActivityApi;
use crate::config::ClientConfig;
use crate::feedback::FeedbackChannel;
use crate::mutation::{MutationController, MutationOutcome};
use crate::page::{Page, SubmitEvent};
use crate::render::RemovalTarget;
use crate::store::{ActivityStore, RefreshOutcome};

/// Something the user did on the page.
#[derive(Debug)]
pub enum Interaction {
    Submit(SubmitEvent),
    Remove(RemovalTarget),
    Refresh,
}

/// What handling an [`Interaction`] led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Refreshed(RefreshOutcome),
    Mutated(MutationOutcome),
}

/// The client wired to one page: the single context every component reaches
/// the page, the service and each other through.
pub struct SignupApp<P: Page + 'static, A: ActivityApi> {
    page: Rc<P>,
    store: Rc<ActivityStore<P, A>>,
    feedback: Rc<FeedbackChannel<P>>,
    mutations: MutationController<P, A>,
}

impl<P: Page + 'static, A: ActivityApi> SignupApp<P, A> {
    pub fn new(page: Rc<P>, api: A, config: &ClientConfig) -> Self {
        let api = Rc::new(api);
        let store = Rc::new(ActivityStore::new(Rc::clone(&page), Rc::clone(&api)));
        let feedback = Rc::new(FeedbackChannel::new(Rc::clone(&page), config.feedback_delay));
        let mutations = MutationController::new(
            Rc::clone(&page),
            api,
            Rc::clone(&store),
            Rc::clone(&feedback),
        );
        Self {
            page,
            store,
            feedback,
            mutations,
        }
    }

    /// Initial load.
    pub async fn start(&self) -> RefreshOutcome {
        self.store.refresh().await
    }

    pub async fn handle(&self, interaction: Interaction) -> Outcome {
        match interaction {
            Interaction::Submit(event) => {
                Outcome::Mutated(self.mutations.register_participant(&event).await)
            }
            Interaction::Remove(target) => {
                Outcome::Mutated(self.mutations.remove_participant(&target).await)
            }
            Interaction::Refresh => Outcome::Refreshed(self.store.refresh().await),
        }
    }

    pub fn page(&self) -> &Rc<P> {
        &self.page
    }

    pub fn store(&self) -> &ActivityStore<P, A> {
        &self.store
    }

    pub fn feedback(&self) -> &FeedbackChannel<P> {
        &self.feedback
    }

    pub fn mutations(&self) -> &MutationController<P, A> {
        &self.mutations
    }
}
