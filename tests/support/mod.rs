#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use signup_client::{ActivityApi, ActivityCollection, ApiError, ApiReply};
use tokio::task::LocalSet;

pub const CHESS_CLUB: &str = r#"{
    "Chess Club": {
        "description": "d",
        "schedule": "s",
        "max_participants": 2,
        "participants": ["a@x.com"]
    }
}"#;

/// Runs `fut` inside a `LocalSet` so feedback timers can be spawned.
pub async fn local<F: Future>(fut: F) -> F::Output {
    LocalSet::new().run_until(fut).await
}

pub fn collection(json: &str) -> ActivityCollection {
    ActivityCollection::from_json(json).expect("fixture json")
}

pub fn transport_error() -> ApiError {
    ApiError::Transport {
        url: "http://test/activities".to_string(),
        reason: "connection refused".to_string(),
    }
}

pub fn rejection(status: u16, detail: Option<&str>) -> ApiError {
    ApiError::Status {
        status,
        detail: detail.map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Signup { activity: String, contact: String },
    Unregister { activity: String, contact: String },
}

struct Scripted<T> {
    delay: Duration,
    result: Result<T, ApiError>,
}

#[derive(Default)]
struct Inner {
    calls: RefCell<Vec<Call>>,
    current: RefCell<ActivityCollection>,
    lists: RefCell<VecDeque<Scripted<ActivityCollection>>>,
    mutations: RefCell<VecDeque<Result<ApiReply, ApiError>>>,
}

/// An `ActivityApi` answering from a script, recording every call.
///
/// List calls without a scripted answer return the current collection.
/// Mutation calls without a scripted answer panic.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    inner: Rc<Inner>,
}

impl ScriptedApi {
    pub fn with_activities(json: &str) -> Self {
        let api = Self::default();
        api.set_activities(json);
        api
    }

    /// Replaces what the "server" currently holds.
    pub fn set_activities(&self, json: &str) {
        *self.inner.current.borrow_mut() = collection(json);
    }

    pub fn push_list(&self, result: Result<ActivityCollection, ApiError>) {
        self.push_list_after(Duration::ZERO, result);
    }

    pub fn push_list_after(&self, delay: Duration, result: Result<ActivityCollection, ApiError>) {
        self.inner
            .lists
            .borrow_mut()
            .push_back(Scripted { delay, result });
    }

    pub fn push_mutation(&self, result: Result<ApiReply, ApiError>) {
        self.inner.mutations.borrow_mut().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|call| **call == Call::List).count()
    }

    pub fn mutation_calls(&self) -> usize {
        self.calls().len() - self.list_calls()
    }

    fn next_mutation(&self) -> Result<ApiReply, ApiError> {
        self.inner
            .mutations
            .borrow_mut()
            .pop_front()
            .expect("unexpected mutation call")
    }
}

impl ActivityApi for ScriptedApi {
    async fn list_activities(&self) -> Result<ActivityCollection, ApiError> {
        self.inner.calls.borrow_mut().push(Call::List);
        let scripted = self.inner.lists.borrow_mut().pop_front();
        match scripted {
            Some(Scripted { delay, result }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(self.inner.current.borrow().clone()),
        }
    }

    async fn signup(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError> {
        self.inner.calls.borrow_mut().push(Call::Signup {
            activity: activity.to_string(),
            contact: contact.to_string(),
        });
        self.next_mutation()
    }

    async fn unregister(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError> {
        self.inner.calls.borrow_mut().push(Call::Unregister {
            activity: activity.to_string(),
            contact: contact.to_string(),
        });
        self.next_mutation()
    }
}
