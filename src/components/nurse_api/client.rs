use super::models::{
    ApiErrorBody, ChatRequest, ChatResponse, FullScheduleResponse, MyScheduleOutcome, StatusInfo,
    MY_SCHEDULE_MESSAGE, NO_SCHEDULE_MARKER,
};
use crate::config::Config;
use crate::error::{Error, RosterResult};
use crate::schedule::{parse_freeform_schedule, parse_full_schedule, ScheduleRecord};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Typed access to the roster backend REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> RosterResult<Self> {
        // Url::join drops the last path segment unless the base ends in '/'
        let base = format!("{}/", config.api_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the logged-in nurse
    pub async fn status(&self) -> RosterResult<StatusInfo> {
        let request = self.request(self.client.get(self.endpoint("status")?));
        let status: StatusInfo = Self::read_json(request.send().await?).await?;
        info!("Fetched status for nurse {}", status.nurse_id);
        Ok(status)
    }

    /// Fetch the caller's own schedule text and parse it
    pub async fn my_schedule(&self) -> RosterResult<MyScheduleOutcome> {
        let body = ChatRequest {
            message: MY_SCHEDULE_MESSAGE.to_string(),
        };
        let request = self.request(self.client.post(self.endpoint("chat")?).json(&body));
        let reply: ChatResponse = Self::read_json(request.send().await?).await?;

        if !reply.success {
            debug!("Chat reply did not set success, parsing anyway");
        }

        if reply.response.contains(NO_SCHEDULE_MARKER) {
            info!("No schedule generated yet");
            return Ok(MyScheduleOutcome::Pending(reply.response));
        }

        Ok(MyScheduleOutcome::Ready(parse_freeform_schedule(
            &reply.response,
        )))
    }

    /// Fetch the admin full schedule table and parse every nurse row
    pub async fn full_schedule(&self) -> RosterResult<Vec<ScheduleRecord>> {
        let request = self.request(self.client.get(self.endpoint("schedule/full")?));
        let reply: FullScheduleResponse = Self::read_json(request.send().await?).await?;

        if let Some(total) = reply.total_nurses {
            if total != reply.schedule.len() {
                warn!(
                    "Backend reported {} nurses but sent {} rows",
                    total,
                    reply.schedule.len()
                );
            }
        }

        Ok(parse_full_schedule(&reply.schedule))
    }

    fn endpoint(&self, path: &str) -> RosterResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RosterResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            warn!("Backend request failed with {}: {}", status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_keep_base_path() {
        let config = Config {
            api_base_url: "http://localhost:5000/api".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config).unwrap();

        assert_eq!(
            client.endpoint("schedule/full").unwrap().as_str(),
            "http://localhost:5000/api/schedule/full"
        );

        let config = Config {
            api_base_url: "http://roster.local/api/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("status").unwrap().as_str(),
            "http://roster.local/api/status"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(Error::Url(_))));
    }
}
