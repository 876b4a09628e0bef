//! Client for an activity-signup service.
//!
//! Fetches the activity collection, renders each activity's roster into a host
//! page, and runs the register/remove mutations, re-fetching after every
//! accepted change.

pub mod api;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod feedback;
pub mod formatter;
pub mod http;
pub mod model;
pub mod mutation;
pub mod page;
pub mod render;
pub mod store;

pub use api::{ActivityApi, ApiReply};
pub use app::{Interaction, Outcome, SignupApp};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use feedback::FeedbackChannel;
pub use http::HttpApi;
pub use model::{Activity, ActivityCollection, Participant};
pub use mutation::{MutationController, MutationOutcome};
pub use page::{FeedbackKind, MemoryPage, Page, PickerOption, SignupForm, SubmitEvent};
pub use render::{render_activity, ActivityCard, RemovalTarget};
pub use store::{ActivityStore, RefreshOutcome};
