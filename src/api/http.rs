//! HTTP implementation of [`UserApi`] over one REST collection resource.

use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::{
    config::ApiProfile,
    types::UserId,
    user::UserRecord,
};

use super::{ApiError, ApiResult, NewUser, UserApi, UserUpdate};

/// Resource path under the profile's base URL.
const USERS_PATH: &str = "/users";

/// Asynchronous HTTP client for the remote user collection.
pub struct HttpUserApi {
    client: Client,
    users_url: String,
    retry_attempts: u32,
}

impl HttpUserApi {
    /// Builds a client for `profile`, applying its request timeout.
    pub fn new(profile: &ApiProfile) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(profile.timeout)
            .build()
            .map_err(|err| ApiError::Unavailable(err.to_string()))?;

        Ok(Self {
            client,
            users_url: format!("{}{USERS_PATH}", profile.base_url.trim_end_matches('/')),
            retry_attempts: profile.retry_attempts,
        })
    }

    fn record_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.users_url)
    }

    async fn one_list(&self, q: Option<&str>) -> ApiResult<Vec<UserRecord>> {
        let mut req = self.client.get(&self.users_url);
        if let Some(q) = q {
            req = req.query(&[("q", q)]);
        }
        let resp = req.send().await.map_err(classify_transport)?;
        decode(resp).await
    }
}

#[async_trait::async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self, q: Option<&str>) -> ApiResult<Vec<UserRecord>> {
        let mut attempt = 0u32;
        loop {
            match self.one_list(q).await {
                Ok(users) => {
                    debug!(count = users.len(), "retrieved users");
                    return Ok(users);
                }
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    warn!(%err, attempt, "list failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn create(&self, user: NewUser) -> ApiResult<UserRecord> {
        let resp = self
            .client
            .post(&self.users_url)
            .json(&user)
            .send()
            .await
            .map_err(classify_transport)?;
        let created: UserRecord = decode(resp).await?;
        debug!(id = created.id, name = %created.name, "created user");
        Ok(created)
    }

    async fn update(&self, user: UserUpdate) -> ApiResult<UserRecord> {
        let resp = self
            .client
            .put(self.record_url(user.id))
            .json(&user)
            .send()
            .await
            .map_err(classify_transport)?;
        let updated: UserRecord = decode(resp).await?;
        debug!(id = updated.id, "updated user");
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> ApiResult<()> {
        let resp = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(classify_transport)?;
        if !resp.status().is_success() {
            return Err(read_failure(resp).await);
        }
        debug!(id, "deleted user");
        Ok(())
    }
}

/// A request that never produced a status is an unreachable-service condition.
fn classify_transport(err: reqwest::Error) -> ApiError {
    ApiError::Unavailable(err.to_string())
}

async fn read_failure(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    ApiError::from_status(status, message)
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> ApiResult<T> {
    if !resp.status().is_success() {
        return Err(read_failure(resp).await);
    }
    let status = resp.status().as_u16();
    resp.json().await.map_err(|err| ApiError::Unknown {
        status,
        message: format!("undecodable body: {err}"),
    })
}
