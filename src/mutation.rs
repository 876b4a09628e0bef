use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::api::ActivityApi;
use crate::error::ApiError;
use crate::feedback::FeedbackChannel;
use crate::page::{Page, SubmitEvent};
use crate::render::RemovalTarget;
use crate::store::ActivityStore;

pub const GENERIC_ERROR: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister participant.";

/// Result of a register or remove action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the change and the page was refreshed.
    Applied,
    /// The server refused the change; its detail was shown.
    Rejected,
    /// No usable response; the generic failure message was shown.
    Failed,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

/// Runs the two state-changing operations and reconciles the page afterwards.
pub struct MutationController<P: Page + 'static, A: ActivityApi> {
    page: Rc<P>,
    api: Rc<A>,
    store: Rc<ActivityStore<P, A>>,
    feedback: Rc<FeedbackChannel<P>>,
}

impl<P: Page + 'static, A: ActivityApi> MutationController<P, A> {
    pub fn new(
        page: Rc<P>,
        api: Rc<A>,
        store: Rc<ActivityStore<P, A>>,
        feedback: Rc<FeedbackChannel<P>>,
    ) -> Self {
        Self {
            page,
            api,
            store,
            feedback,
        }
    }

    /// Handles a submission of the signup form.
    pub async fn register_participant(&self, event: &SubmitEvent) -> MutationOutcome {
        event.prevent_default();
        let form = self.page.read_signup_form();

        match self.api.signup(&form.activity, &form.contact).await {
            Ok(reply) => {
                info!(activity = %form.activity, contact = %form.contact, "signed up");
                self.feedback.success(&reply.message);
                self.page.reset_signup_form();
                self.store.refresh().await;
                MutationOutcome::Applied
            }
            Err(err) => self.report_failure(&err, SIGNUP_FAILED),
        }
    }

    /// Handles a click on a roster entry's delete affordance.
    pub async fn remove_participant(&self, target: &RemovalTarget) -> MutationOutcome {
        let prompt = format!("Unregister {} from {}?", target.contact, target.activity);
        if !self.page.confirm(&prompt) {
            debug!(activity = %target.activity, contact = %target.contact, "removal declined");
            return MutationOutcome::Declined;
        }

        match self.api.unregister(&target.activity, &target.contact).await {
            Ok(reply) => {
                info!(activity = %target.activity, contact = %target.contact, "unregistered");
                self.feedback.success(&reply.message);
                self.store.refresh().await;
                MutationOutcome::Applied
            }
            Err(err) => self.report_failure(&err, UNREGISTER_FAILED),
        }
    }

    fn report_failure(&self, err: &ApiError, network_message: &str) -> MutationOutcome {
        if err.is_network() {
            error!(error = %err, "mutation failed");
            self.feedback.error(network_message);
            return MutationOutcome::Failed;
        }

        warn!(error = %err, "mutation rejected");
        let detail = err.detail().filter(|d| !d.is_empty()).unwrap_or(GENERIC_ERROR);
        self.feedback.error(detail);
        MutationOutcome::Rejected
    }
}
