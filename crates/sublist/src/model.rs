use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SublistError, SublistResult};

/// `type` value the listing API uses for regular files.
pub const REGULAR_FILE_TYPE: i64 = 2;

/// Envelope shared by every `/api/fs/*` response.
///
/// `{"code":200,"message":"success","data":{...}}`
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Hosts that omit the envelope code are treated as successful.
    #[serde(default = "success_code")]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

fn success_code() -> i64 {
    200
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> SublistResult<Option<T>> {
        if self.code != 200 {
            return Err(SublistError::ApiError {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

#[derive(Debug, Serialize)]
pub struct PathRequest<'a> {
    pub path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ListData {
    /// `null` for an empty directory, otherwise an array of [ListEntry].
    #[serde(default)]
    pub content: serde_json::Value,
}

impl ListData {
    /// Entries of the listing. Elements which are not objects are skipped.
    pub fn entries(self) -> SublistResult<Vec<ListEntry>> {
        match self.content {
            serde_json::Value::Null => Ok(Vec::new()),
            serde_json::Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::debug!("Skipping malformed listing entry: {e}");
                        None
                    }
                })
                .collect()),
            other => Err(SublistError::UnexpectedContent(other.to_string())),
        }
    }
}

/// Fields which are missing, `null` or of another type read as their default.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub is_dir: bool,
    /// 1: folder
    /// 2: regular file
    /// others: special objects exposed by the storage driver
    #[serde(default, deserialize_with = "lenient")]
    pub r#type: i64,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl ListEntry {
    pub fn is_regular_file(&self) -> bool {
        !self.is_dir && self.r#type == REGULAR_FILE_TYPE && !self.name.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub raw_url: Option<String>,
}
