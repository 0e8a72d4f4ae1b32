use std::time::Duration;

use fake_user_agent::get_chrome_rua;
use reqwest::{
    header::{LOCATION, USER_AGENT},
    redirect::Policy,
    Client, StatusCode,
};
use serde::de::DeserializeOwned;

use crate::{
    config::Folder,
    error::{SublistError, SublistResult},
    model::{ApiResponse, FileInfo, ListData, PathRequest},
};

/// Some storage drivers only hand out a redirect to the real file
/// when the request looks like it comes from an old desktop browser.
pub const LEGACY_USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)";

/// Client of the `/api/fs/*` endpoints of an AList compatible host.
#[derive(Clone)]
pub struct FsClient {
    client: Client,
    /// Does not follow redirects, so the `Location` of a raw url can be captured.
    no_redirect: Client,
}

impl FsClient {
    pub fn new(timeout: Duration) -> SublistResult<Self> {
        let client = Client::builder()
            .user_agent(get_chrome_rua())
            .timeout(timeout)
            .build()?;
        let no_redirect = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            no_redirect,
        })
    }

    async fn post<T>(
        &self,
        host: &str,
        endpoint: &str,
        body: &PathRequest<'_>,
    ) -> SublistResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/api/fs/{endpoint}", host.trim_end_matches('/'));
        log::debug!("POST {url} path={}", body.path);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SublistError::HttpError(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Lists `folder` and returns the remote paths of its regular files,
    /// in the order the host returned them.
    pub async fn list(&self, folder: &Folder) -> SublistResult<Vec<String>> {
        let request = PathRequest {
            path: &folder.path,
            password: folder.password.as_deref(),
        };
        let response: ApiResponse<ListData> = self.post(&folder.host, "list", &request).await?;

        let Some(data) = response.into_data()? else {
            return Ok(Vec::new());
        };

        let files = data
            .entries()?
            .into_iter()
            .filter(|entry| entry.is_regular_file())
            .map(|entry| folder.entry_path(&entry.name))
            .collect();
        Ok(files)
    }

    /// Fetches `data.raw_url` of a single file listed in `folder`.
    ///
    /// The folder password protects its files as well as the listing.
    pub async fn raw_url(&self, folder: &Folder, path: &str) -> SublistResult<String> {
        let request = PathRequest {
            path,
            password: folder.password.as_deref(),
        };
        let response: ApiResponse<FileInfo> = self.post(&folder.host, "get", &request).await?;

        response
            .into_data()?
            .and_then(|info| info.raw_url)
            .filter(|url| !url.is_empty())
            .ok_or(SublistError::MissingRawUrl)
    }

    /// Requests `raw_url` once without following redirects.
    ///
    /// Returns the `Location` header of a `302 Found`, or `None` for any other status.
    pub async fn redirect_location(&self, raw_url: &str) -> SublistResult<Option<String>> {
        let response = self
            .no_redirect
            .get(raw_url)
            .header(USER_AGENT, LEGACY_USER_AGENT)
            .send()
            .await?;

        if response.status() != StatusCode::FOUND {
            return Ok(None);
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|l| l.to_str().ok())
            .map(str::to_string);
        Ok(location)
    }

    /// Best effort final url of a file.
    ///
    /// Falls back to the raw url when the redirect can not be followed,
    /// and to an empty string when there is no raw url at all.
    pub async fn resolve(&self, folder: &Folder, path: &str) -> String {
        let raw_url = match self.raw_url(folder, path).await {
            Ok(raw_url) => raw_url,
            Err(e) => {
                log::warn!("Failed to get raw url of {path}: {e}");
                return String::new();
            }
        };

        match self.redirect_location(&raw_url).await {
            Ok(Some(location)) => location,
            Ok(None) => raw_url,
            Err(e) => {
                log::warn!("Failed to follow raw url of {path}, using it as is: {e}");
                raw_url
            }
        }
    }
}
