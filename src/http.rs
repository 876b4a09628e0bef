use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::api::{ActivityApi, ApiRejection, ApiReply};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::model::ActivityCollection;

/// `ActivityApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response, ApiError> {
        debug!(%method, %url, "sending request");
        self.client
            .request(method, url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn mutate(&self, method: Method, url: Url) -> Result<ApiReply, ApiError> {
        let response = self.send(method, url.clone()).await?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if status.is_success() {
            serde_json::from_value(body).map_err(|e| ApiError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })
        } else {
            let rejection: ApiRejection = serde_json::from_value(body).unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                detail: rejection.detail,
            })
        }
    }
}

impl ActivityApi for HttpApi {
    async fn list_activities(&self) -> Result<ActivityCollection, ApiError> {
        let url = activities_url(&self.base_url);
        let response = self.send(Method::GET, url.clone()).await?;
        let status = response.status();
        if !status.is_success() {
            let rejection: ApiRejection = response.json().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: rejection.detail,
            });
        }
        response.json().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn signup(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError> {
        let url = mutation_url(&self.base_url, activity, "signup", contact);
        self.mutate(Method::POST, url).await
    }

    async fn unregister(&self, activity: &str, contact: &str) -> Result<ApiReply, ApiError> {
        let url = mutation_url(&self.base_url, activity, "unregister", contact);
        self.mutate(Method::DELETE, url).await
    }
}

/// `{base}/activities`
pub fn activities_url(base: &Url) -> Url {
    with_segments(base, &["activities"])
}

/// `{base}/activities/{activity}/{action}?email={contact}` with the activity
/// encoded as a single path segment and the contact as a query value.
pub fn mutation_url(base: &Url, activity: &str, action: &str, contact: &str) -> Url {
    let mut url = with_segments(base, &["activities", activity, action]);
    url.query_pairs_mut().clear().append_pair("email", contact);
    url
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn activities_url_joins_base_path() {
        assert_eq!(
            activities_url(&base("http://127.0.0.1:8000")).as_str(),
            "http://127.0.0.1:8000/activities"
        );
        assert_eq!(
            activities_url(&base("http://school.test/api/")).as_str(),
            "http://school.test/api/activities"
        );
    }

    #[test]
    fn mutation_url_encodes_activity_and_contact() {
        let url = mutation_url(
            &base("http://127.0.0.1:8000/"),
            "Chess Club/Advanced?",
            "signup",
            "a+b@x.com",
        );
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club%2FAdvanced%3F/signup?email=a%2Bb%40x.com"
        );
    }

    #[test]
    fn mutation_url_round_trips_through_parsing() {
        let url = mutation_url(&base("http://h"), "R&D #1", "unregister", "x y&z@x.com");
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments, vec!["activities", "R&D%20%231", "unregister"]);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("email".to_string(), "x y&z@x.com".to_string())]);
    }
}
