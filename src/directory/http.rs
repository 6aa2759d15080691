//! REST client for the profile directory.

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::DirectoryError;
use crate::wallet::Address;

use super::ProfileDirectory;
use super::model::Profile;

/// Profile directory over its REST API.
///
/// Address-keyed lookups hit `GET {base}/user/bulk-by-address` and return a
/// map keyed by address string; id-keyed lookups hit `GET {base}/user/bulk`.
pub struct HttpDirectory {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

/// Response body of the id-keyed lookup.
#[derive(Debug, Deserialize)]
struct BulkUsersResponse {
    #[serde(default)]
    users: Vec<Profile>,
}

impl HttpDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.directory_base_url.trim_end_matches('/').to_string(),
            api_key: config.directory_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DirectoryError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .query(query)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ProfileDirectory for HttpDirectory {
    async fn users_by_address(
        &self,
        address: &Address,
    ) -> Result<HashMap<String, Vec<Profile>>, DirectoryError> {
        self.get_json(
            "/user/bulk-by-address",
            &[("addresses", address.as_str().to_string())],
        )
        .await
    }

    async fn users_by_fid(
        &self,
        fid: u64,
        viewer_fid: u64,
    ) -> Result<Vec<Profile>, DirectoryError> {
        let resp: BulkUsersResponse = self
            .get_json(
                "/user/bulk",
                &[
                    ("fids", fid.to_string()),
                    ("viewer_fid", viewer_fid.to_string()),
                ],
            )
            .await?;
        Ok(resp.users)
    }
}
