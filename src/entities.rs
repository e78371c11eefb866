use chrono::serde::ts_seconds;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response from Synology API
#[derive(Deserialize, Debug)]
pub struct SynologyResponse<D> {
    pub success: bool,
    pub data: Option<D>,
    pub error: Option<ApiError>,
}

/// Error information from Synology API
///
/// Most FileStation endpoints report only a numeric code; `message` is
/// populated by the few that include one.
#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authentication response data
#[allow(unused)]
#[derive(Deserialize, Debug)]
pub struct AuthData {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub ik_message: String,
    #[serde(default)]
    pub is_portal_port: bool,
    /// Session ID used for authenticated requests
    pub sid: String,
    #[serde(default)]
    pub synotoken: String,
}

/// FileStation capability information
#[derive(Deserialize, Debug)]
pub struct FileStationInfo {
    #[serde(default)]
    pub hostname: String,
    /// Whether the logged-in user belongs to the administrators group
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub support_sharing: bool,
    #[serde(default)]
    pub support_virtual_protocol: Vec<String>,
    #[serde(default)]
    pub uid: i64,
}

/// Collection of shared folders
#[derive(Deserialize, Debug)]
pub struct ShareList {
    pub offset: i32,
    pub shares: Vec<Share>,
    pub total: i32,
}

/// A top-level shared folder
#[derive(Deserialize, Debug)]
pub struct Share {
    pub isdir: bool,
    pub name: String,
    pub path: String,
    pub additional: Option<AdditionalShareInfo>,
}

/// Additional detailed information about a share
#[derive(Deserialize, Default, Debug)]
pub struct AdditionalShareInfo {
    pub owner: Option<Owner>,
    pub real_path: Option<String>,
    pub time: Option<TimeInfo>,
    pub volume_status: Option<VolumeStatus>,
}

/// Ownership information for a file or share
#[derive(Deserialize, Debug)]
pub struct Owner {
    pub gid: i64,
    pub group: String,
    pub uid: i64,
    pub user: String,
}

/// File timestamps, reported by the API in epoch seconds
#[derive(Deserialize, Debug)]
pub struct TimeInfo {
    #[serde(with = "ts_seconds")]
    pub atime: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub crtime: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub ctime: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub mtime: DateTime<Utc>,
}

/// Volume statistics for the volume hosting a share
#[derive(Deserialize, Debug)]
pub struct VolumeStatus {
    pub freespace: u64,
    pub totalspace: u64,
    pub readonly: bool,
}

/// Files affected by a rename operation
#[derive(Deserialize, Debug)]
pub struct RenamedFiles {
    pub files: Vec<File>,
}

/// A file or folder entry
#[derive(Deserialize, Debug)]
pub struct File {
    pub isdir: bool,
    pub name: String,
    pub path: String,
    pub additional: Option<AdditionalFileInfo>,
}

/// Additional detailed information about a file
#[derive(Deserialize, Default, Debug)]
pub struct AdditionalFileInfo {
    pub owner: Option<Owner>,
    pub real_path: Option<String>,
    /// Size in bytes; absent for directories
    pub size: Option<u64>,
    pub time: Option<TimeInfo>,
}
