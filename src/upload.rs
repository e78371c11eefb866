use crate::client::SynoError::InvalidInput;
use anyhow::Result;
use chrono::NaiveDateTime;

/// What the FileStation should do when the destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteBehavior {
    /// Replace the existing file
    Overwrite,
    /// Sent to the API as `overwrite=true`, identical to [`Self::Overwrite`].
    /// The upload endpoint does not distinguish the two on the wire, so a
    /// skipped upload will in fact replace the existing file.
    Skip,
    /// Default behavior: the API rejects the upload with code 1805/414
    #[default]
    Error,
}

/// A single file upload, consumed by [`crate::client::SynoFS::upload`]
///
/// Immutable once built; construct via [`UploadRequest::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    parent_folder_path: String,
    file_name: String,
    content: Vec<u8>,
    creation_time: Option<NaiveDateTime>,
    last_modification_time: Option<NaiveDateTime>,
    last_access_time: Option<NaiveDateTime>,
    overwrite_behavior: OverwriteBehavior,
    create_parents: bool,
}

impl UploadRequest {
    /// Creates a builder seeded with the required fields
    #[must_use]
    pub fn builder(
        parent_folder_path: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> UploadRequestBuilder {
        UploadRequestBuilder {
            parent_folder_path: parent_folder_path.into(),
            file_name: file_name.into(),
            content: content.into(),
            creation_time: None,
            last_modification_time: None,
            last_access_time: None,
            overwrite_behavior: OverwriteBehavior::default(),
            create_parents: false,
        }
    }

    /// Destination directory on the DiskStation
    #[must_use]
    pub fn parent_folder_path(&self) -> &str {
        &self.parent_folder_path
    }

    /// Target file name
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File payload; may be empty
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub fn creation_time(&self) -> Option<NaiveDateTime> {
        self.creation_time
    }

    #[must_use]
    pub fn last_modification_time(&self) -> Option<NaiveDateTime> {
        self.last_modification_time
    }

    #[must_use]
    pub fn last_access_time(&self) -> Option<NaiveDateTime> {
        self.last_access_time
    }

    #[must_use]
    pub fn overwrite_behavior(&self) -> OverwriteBehavior {
        self.overwrite_behavior
    }

    /// Whether missing parent directories should be created
    #[must_use]
    pub fn create_parents(&self) -> bool {
        self.create_parents
    }
}

/// Builder for [`UploadRequest`]
#[derive(Debug)]
pub struct UploadRequestBuilder {
    parent_folder_path: String,
    file_name: String,
    content: Vec<u8>,
    creation_time: Option<NaiveDateTime>,
    last_modification_time: Option<NaiveDateTime>,
    last_access_time: Option<NaiveDateTime>,
    overwrite_behavior: OverwriteBehavior,
    create_parents: bool,
}

impl UploadRequestBuilder {
    /// Sets the creation time recorded for the uploaded file
    #[must_use]
    pub fn creation_time(mut self, creation_time: NaiveDateTime) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    /// Sets the last modification time recorded for the uploaded file
    #[must_use]
    pub fn last_modification_time(mut self, last_modification_time: NaiveDateTime) -> Self {
        self.last_modification_time = Some(last_modification_time);
        self
    }

    /// Sets the last access time recorded for the uploaded file
    #[must_use]
    pub fn last_access_time(mut self, last_access_time: NaiveDateTime) -> Self {
        self.last_access_time = Some(last_access_time);
        self
    }

    /// Sets the behavior when the destination file already exists
    #[must_use]
    pub fn overwrite_behavior(mut self, overwrite_behavior: OverwriteBehavior) -> Self {
        self.overwrite_behavior = overwrite_behavior;
        self
    }

    /// Requests creation of missing parent directories
    #[must_use]
    pub fn create_parents(mut self, create_parents: bool) -> Self {
        self.create_parents = create_parents;
        self
    }

    /// Builds the [`UploadRequest`]
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent folder path is empty
    /// - File name is empty
    /// - File name contains a path separator
    pub fn build(self) -> Result<UploadRequest> {
        if self.parent_folder_path.is_empty() {
            return Err(InvalidInput("Parent folder path cannot be empty".into()).into());
        }

        if self.file_name.is_empty() {
            return Err(InvalidInput("File name cannot be empty".into()).into());
        }

        if self.file_name.contains(['/', '\\']) {
            return Err(InvalidInput(format!(
                "File name must not contain path separators, got: {}",
                self.file_name
            ))
            .into());
        }

        Ok(UploadRequest {
            parent_folder_path: self.parent_folder_path,
            file_name: self.file_name,
            content: self.content,
            creation_time: self.creation_time,
            last_modification_time: self.last_modification_time,
            last_access_time: self.last_access_time,
            overwrite_behavior: self.overwrite_behavior,
            create_parents: self.create_parents,
        })
    }
}
