use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ActivityEntry, ClientError, ProfileData, RemoteClient};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    session: String,
}

#[derive(Deserialize)]
struct ActivityResponse {
    entries: Vec<ActivityEntry>,
}

/// Remote client backed by a JSON API over HTTPS.
pub struct HttpRemoteClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    session: Option<String>,
}

impl HttpRemoteClient {
    pub fn new(base_url: String, username: String, password: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url,
            username,
            password,
            session: None,
        }
    }

    fn session(&self) -> Result<&str, ClientError> {
        self.session
            .as_deref()
            .ok_or_else(|| ClientError::Auth("not logged in".to_string()))
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn login(&mut self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(format!(
                "login rejected with status {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;
        self.session = Some(body.session);
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), ClientError> {
        let session = self.session()?.to_string();
        self.client
            .post(format!("{}/logout", self.base_url))
            .bearer_auth(&session)
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;
        self.session = None;
        Ok(())
    }

    async fn fetch_profile(&self, handle: &str) -> Result<ProfileData, ClientError> {
        let session = self.session()?;
        let response = self
            .client
            .get(format!("{}/users/{}", self.base_url, handle))
            .bearer_auth(session)
            .send()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Fetch(format!(
                "profile fetch for '{}' returned {}",
                handle,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))
    }

    async fn fetch_recent_activity(&self) -> Result<Vec<ActivityEntry>, ClientError> {
        let session = self.session()?;
        let response = self
            .client
            .get(format!("{}/activity/recent", self.base_url))
            .bearer_auth(session)
            .send()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Fetch(format!(
                "activity fetch returned {}",
                response.status()
            )));
        }

        let body: ActivityResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;
        Ok(body.entries)
    }
}
