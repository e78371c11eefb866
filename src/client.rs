use crate::client::SynoError::*;
use crate::entities::{
    ApiError, AuthData, File, FileStationInfo, RenamedFiles, ShareList, SynologyResponse,
};
use crate::multipart;
use crate::multipart::UploadMetadata;
use crate::upload::UploadRequest;
use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use log::debug;
use reqwest::Client;
use std::env;
use std::time::Duration;
use thiserror::Error;

const API_PATH: &str = "/webapi/entry.cgi";
const UPLOAD_PATH: &str = "/webapi/FileStation/api_upload.cgi";

const UPLOAD_API: &str = "SYNO.FileStation.Upload";

/// Custom error types for the [`SynoFS`] client
#[derive(Error, Debug)]
pub enum SynoError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("File already exists: {parent_folder_path}/{file_name} (code={code})")]
    FileAlreadyExists {
        code: i32,
        parent_folder_path: String,
        file_name: String,
    },

    #[error("Synology API error: code={code}, message={message}")]
    Api { code: i32, message: String },

    #[error("Network request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Environment variable error: {0}")]
    Environment(#[from] env::VarError),

    #[error("JSON serialization/deserialization error: {0}")]
    InvalidResponse(String),

    #[error("Invalid input parameter: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Synology FileStation client
pub struct SynoFS {
    host: String,
    username: String,
    password: String,
    zone_offset: FixedOffset,
    client: Client,
    sid: String,
}

impl SynoFS {
    /// Creates a new `SynoFS` client with the given host, credentials,
    /// timeout and DiskStation time zone offset
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username, password, or host URL is empty
    /// - Host URL doesn't start with "http://" or "https://"
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(
        host: String,
        username: String,
        password: String,
        timeout_ms: u64,
        zone_offset: FixedOffset,
    ) -> Result<Self> {
        // Validate all required configuration parameters
        if username.is_empty() {
            return Err(Configuration("Username cannot be empty".into()).into());
        }

        if password.is_empty() {
            return Err(Configuration("Password cannot be empty".into()).into());
        }

        if host.is_empty() {
            return Err(Configuration("Host URL cannot be empty".into()).into());
        }

        // Validate host URL format
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(Configuration(format!(
                "Host URL must start with http:// or https://, got: {host}"
            ))
            .into());
        }

        // Remove trailing slash from host if present
        let host = host.trim_end_matches('/').to_string();

        let client = Self::create_client(timeout_ms);

        Ok(Self {
            host,
            username,
            password,
            zone_offset,
            client,
            sid: String::new(),
        })
    }

    /// Creates a configured HTTP client
    fn create_client(timeout: u64) -> Client {
        Client::builder()
            .timeout(Duration::from_millis(timeout))
            .build()
            .unwrap_or_default()
    }

    /// Creates a new `SynoFS` client with a builder pattern
    #[must_use]
    pub fn builder() -> SynoFSBuilder {
        SynoFSBuilder::default()
    }

    /// Authorizes the client by getting a session ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - Authentication fails
    /// - Response cannot be parsed
    pub async fn authorize(&mut self) -> Result<()> {
        let params = [
            ("api", "SYNO.API.Auth"),
            ("version", "7"),
            ("method", "login"),
            ("account", &self.username),
            ("passwd", &self.password),
            ("session", "FileStation"),
            ("format", "sid"),
        ];

        let response = self
            .make_api_request::<SynologyResponse<AuthData>>(&params)
            .await
            .context("Failed to authorize")?;

        if response.success {
            match response.data {
                Some(data) => {
                    self.sid = data.sid;
                    Ok(())
                }
                None => Err(InvalidResponse("No data received".into()).into()),
            }
        } else {
            Err(Auth("Failed to authenticate".into()).into())
        }
    }

    /// Whether [`Self::authorize()`] has produced a session ID
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        !self.sid.is_empty()
    }

    /// Gets FileStation capability information for the logged-in user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - API returns an error response
    /// - Response cannot be parsed
    /// - Session is invalid or expired
    pub async fn get_info(&self) -> Result<FileStationInfo> {
        let params = [
            ("api", "SYNO.FileStation.Info"),
            ("version", "2"),
            ("method", "get"),
        ];

        let response = self
            .make_api_request::<SynologyResponse<FileStationInfo>>(&params)
            .await
            .context("Failed to get FileStation information")?;

        match interpret(response, generic_error)? {
            Some(info) => Ok(info),
            None => Err(InvalidResponse("No data received".into()).into()),
        }
    }

    /// Lists shared folders visible to the logged-in user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - API returns an error response
    /// - Response cannot be parsed
    /// - Session is invalid or expired
    pub async fn list_shares(&self, only_writable: bool) -> Result<ShareList> {
        let params = [
            ("api", "SYNO.FileStation.List"),
            ("version", "2"),
            ("method", "list_share"),
            ("onlywritable", if only_writable { "true" } else { "false" }),
            (
                "additional",
                r#"["real_path","owner","time","volume_status"]"#,
            ),
        ];

        let response = self
            .make_api_request::<SynologyResponse<ShareList>>(&params)
            .await
            .context("Failed to list shares")?;

        match interpret(response, generic_error)? {
            Some(shares) => Ok(shares),
            None => Err(InvalidResponse("No data received".into()).into()),
        }
    }

    /// Renames the file or folder at `path` to `name`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Path or name is empty
    /// - Network request fails
    /// - API returns an error response
    /// - Response cannot be parsed
    /// - Session is invalid or expired
    pub async fn rename(&self, path: &str, name: &str) -> Result<File> {
        if path.is_empty() {
            return Err(InvalidInput("Path cannot be empty".into()).into());
        }

        if name.is_empty() {
            return Err(InvalidInput("Name cannot be empty".into()).into());
        }

        debug!("Renaming {path} to {name}");

        let params = [
            ("api", "SYNO.FileStation.Rename"),
            ("version", "2"),
            ("method", "rename"),
            ("path", path),
            ("name", name),
        ];

        let response = self
            .make_api_request::<SynologyResponse<RenamedFiles>>(&params)
            .await
            .context("Failed to rename")?;

        match interpret(response, generic_error)? {
            Some(renamed) => renamed
                .files
                .into_iter()
                .next()
                .ok_or_else(|| InvalidResponse("No renamed file received".into()).into()),
            None => Err(InvalidResponse("No data received".into()).into()),
        }
    }

    /// Uploads a file with default options (no timestamps, fail if the
    /// destination exists, don't create parent directories)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent path or file name is invalid
    /// - Session ID is not available (must call [`Self::authorize()`] first)
    /// - Network request fails
    /// - The destination file already exists
    /// - API returns an error response
    /// - Response cannot be parsed
    pub async fn upload_file(&self, parent_path: &str, file_name: &str, content: &[u8]) -> Result<()> {
        let request = UploadRequest::builder(parent_path, file_name, content.to_vec()).build()?;
        self.upload(&request).await
    }

    /// Uploads a file described by an [`UploadRequest`]
    ///
    /// Uses the dedicated upload CGI with a fixed-boundary multipart body;
    /// see [`crate::multipart`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Session ID is not available (must call [`Self::authorize()`] first)
    /// - Network request fails
    /// - The destination file already exists ([`SynoError::FileAlreadyExists`],
    ///   API codes 1805 and 414)
    /// - API returns any other error response ([`SynoError::Api`])
    /// - Response cannot be parsed
    pub async fn upload(&self, request: &UploadRequest) -> Result<()> {
        // Check if we have a session ID
        if self.sid.is_empty() {
            return Err(Auth(
                "No session ID available. Make sure to call authorize() first".into(),
            )
            .into());
        }

        debug!(
            "Uploading file. Name: {}, Size: {} bytes, Destination: {}",
            request.file_name(),
            request.content().len(),
            request.parent_folder_path()
        );

        let metadata = UploadMetadata {
            api: UPLOAD_API,
            version: "1",
            method: "upload",
            sid: &self.sid,
        };
        let body = multipart::encode(&metadata, request, self.zone_offset);

        let url = format!("{}{}", self.host, UPLOAD_PATH);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", multipart::content_type())
            .body(body)
            .send()
            .await
            .context("Failed to send file upload request")?;

        let status = response.status();
        if !status.is_success() {
            return Err(Api {
                code: i32::from(status.as_u16()),
                message: format!(
                    "HTTP request failed with status: {} ({})",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            }
            .into());
        }

        let response = response
            .json::<SynologyResponse<()>>()
            .await
            .context("Failed to parse upload response")?;

        // Upload reports no data on success; only the error mapping matters
        interpret(response, |error| upload_error(&error, request))?;

        debug!(
            "Successfully uploaded file: {}/{}",
            request.parent_folder_path(),
            request.file_name()
        );
        Ok(())
    }

    /// Makes a POST API request with form parameters
    async fn make_api_request<R>(&self, params: &[(&str, &str)]) -> Result<R>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        // Create combined parameters with session ID if needed
        let mut all_params = params.to_vec();
        if !self.sid.is_empty() {
            all_params.push(("_sid", &self.sid));
        }

        // Build the base URL
        let base_url = format!("{}{}", self.host, API_PATH);
        debug!(
            "Making API request to: {} with {} parameters",
            base_url,
            all_params.len()
        );

        // Send the POST request with form data
        let client = &self.client;
        let response = client
            .post(&base_url)
            .form(&all_params)
            .send()
            .await
            .context("Failed to make API request")?;

        debug!("API request status: {}", response.status());

        // Process the response
        let status = response.status();
        if !status.is_success() {
            return Err(Api {
                code: i32::from(status.as_u16()),
                message: format!(
                    "HTTP request failed with status: {} ({})",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            }
            .into());
        }

        response
            .json::<R>()
            .await
            .context("Failed to parse API response".to_string())
    }
}

/// Evaluates a response envelope: data on success, a typed error otherwise
///
/// `map_error` is the per-operation error-code table; responses claiming
/// failure without error details surface as [`SynoError::InvalidResponse`].
fn interpret<D>(
    response: SynologyResponse<D>,
    map_error: impl FnOnce(ApiError) -> SynoError,
) -> Result<Option<D>> {
    if response.success {
        Ok(response.data)
    } else if let Some(error) = response.error {
        Err(map_error(error).into())
    } else {
        Err(InvalidResponse("API reported failure without error details".into()).into())
    }
}

/// Fallback mapping for operations without operation-specific error codes
fn generic_error(error: ApiError) -> SynoError {
    Api {
        code: error.code,
        message: error.message.unwrap_or_else(|| "API call failed".into()),
    }
}

/// Error-code table for the upload endpoint
///
/// Codes 1805 and 414 both mean the destination file exists; everything
/// else falls through to the generic API error.
fn upload_error(error: &ApiError, request: &UploadRequest) -> SynoError {
    match error.code {
        1805 | 414 => FileAlreadyExists {
            code: error.code,
            parent_folder_path: request.parent_folder_path().to_string(),
            file_name: request.file_name().to_string(),
        },
        code => Api {
            code,
            message: error
                .message
                .clone()
                .unwrap_or_else(|| "API call failed".into()),
        },
    }
}

/// Builder for [`SynoFS`] client
#[derive(Default)]
pub struct SynoFSBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<u64>,
    zone_offset: Option<FixedOffset>,
}

impl SynoFSBuilder {
    /// Sets the host URL
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the request timeout in milliseconds
    #[must_use]
    pub fn timeout(mut self, timeout_millis: u64) -> Self {
        self.timeout = Some(timeout_millis);
        self
    }

    /// Sets the time zone offset of the DiskStation, used to encode upload
    /// timestamps; defaults to UTC
    #[must_use]
    pub fn zone_offset(mut self, zone_offset: FixedOffset) -> Self {
        self.zone_offset = Some(zone_offset);
        self
    }

    /// Builds the [`SynoFS`] client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields (host, username, password) are not provided
    /// - Host URL doesn't start with "http://" or "https://"
    /// - Any field contains invalid data
    pub fn build(self) -> Result<SynoFS> {
        let host = self
            .host
            .ok_or_else(|| Configuration("Host URL is required".into()))?;
        let username = self
            .username
            .ok_or_else(|| Configuration("Username is required".into()))?;
        let password = self
            .password
            .ok_or_else(|| Configuration("Password is required".into()))?;

        let timeout = self.timeout.unwrap_or(3000);
        let zone_offset = self.zone_offset.unwrap_or_else(|| Utc.fix());

        let client = SynoFS::new(host, username, password, timeout, zone_offset)?;

        Ok(client)
    }
}
