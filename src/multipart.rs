//! Hand-rolled `multipart/form-data` encoding for the upload endpoint
//!
//! The FileStation upload CGI accepts a fixed-boundary multipart body; the
//! boundary is a constant token, not a random one. Field values and file
//! content are embedded verbatim, with no escaping against the boundary
//! token or CRLF, matching what the endpoint's parser expects. Callers are
//! responsible for not feeding it payloads containing the boundary itself.

use crate::upload::{OverwriteBehavior, UploadRequest};
use crate::utils::to_epoch_millis;
use chrono::{FixedOffset, NaiveDateTime};

const DELIMITER: &str = "--AaB03x";
const CRLF: &str = "\r\n";

/// API metadata fields sent ahead of the file in an upload body
#[derive(Debug)]
pub struct UploadMetadata<'a> {
    pub api: &'a str,
    pub version: &'a str,
    pub method: &'a str,
    pub sid: &'a str,
}

/// Value for the `Content-Type` request header accompanying an encoded body
#[must_use]
pub fn content_type() -> String {
    format!("multipart/form-data, boundary={}", &DELIMITER[2..])
}

/// Encodes an upload request into a multipart body
///
/// Text fields are emitted in the order the upload CGI documents them:
/// `api`, `version`, `method`, `_sid`, `dest_folder_path`, `create_parents`,
/// `overwrite`, `mtime`, `crtime`, `atime`, then the single `file` field.
/// Output is deterministic for identical input.
#[must_use]
pub fn encode(
    metadata: &UploadMetadata<'_>,
    request: &UploadRequest,
    zone_offset: FixedOffset,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(request.content().len() + 512);

    append_parameter(&mut body, "api", metadata.api);
    append_parameter(&mut body, "version", metadata.version);
    append_parameter(&mut body, "method", metadata.method);
    append_parameter(&mut body, "_sid", metadata.sid);
    append_parameter(&mut body, "dest_folder_path", request.parent_folder_path());
    append_parameter(
        &mut body,
        "create_parents",
        if request.create_parents() {
            "true"
        } else {
            "false"
        },
    );
    append_overwrite_behavior(&mut body, request.overwrite_behavior());
    append_time_parameter(&mut body, "mtime", request.last_modification_time(), zone_offset);
    append_time_parameter(&mut body, "crtime", request.creation_time(), zone_offset);
    append_time_parameter(&mut body, "atime", request.last_access_time(), zone_offset);
    append_file_parameter(&mut body, request.file_name(), request.content());

    body
}

fn append_overwrite_behavior(body: &mut Vec<u8>, overwrite_behavior: OverwriteBehavior) {
    match overwrite_behavior {
        // Skip is sent as overwrite=true, same as Overwrite; see
        // `OverwriteBehavior::Skip`.
        OverwriteBehavior::Overwrite | OverwriteBehavior::Skip => {
            append_parameter(body, "overwrite", "true");
        }
        // Default endpoint behavior: no parameter to add
        OverwriteBehavior::Error => {}
    }
}

fn append_time_parameter(
    body: &mut Vec<u8>,
    parameter_name: &str,
    time: Option<NaiveDateTime>,
    zone_offset: FixedOffset,
) {
    if let Some(time) = time {
        let unix_time = to_epoch_millis(time, zone_offset);
        append_parameter(body, parameter_name, &unix_time.to_string());
    }
}

fn append_parameter(body: &mut Vec<u8>, parameter_name: &str, parameter_value: &str) {
    body.extend_from_slice(DELIMITER.as_bytes());
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{parameter_name}\"").as_bytes(),
    );
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(parameter_value.as_bytes());
    body.extend_from_slice(CRLF.as_bytes());
}

fn append_file_parameter(body: &mut Vec<u8>, file_name: &str, file_content: &[u8]) {
    body.extend_from_slice(DELIMITER.as_bytes());
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"")
            .as_bytes(),
    );
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream");
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(file_content);
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(CRLF.as_bytes());
    body.extend_from_slice(DELIMITER.as_bytes());
    body.extend_from_slice(b"--");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_metadata() -> UploadMetadata<'static> {
        UploadMetadata {
            api: "SYNO.FileStation.Upload",
            version: "1",
            method: "upload",
            sid: "456",
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
            .last_modification_time(datetime(2021, 1, 1, 0, 0, 0))
            .create_parents(true)
            .build()
            .unwrap();

        let first = encode(&test_metadata(), &request, utc());
        let second = encode(&test_metadata(), &request, utc());
        assert_eq!(first, second);
    }

    #[test]
    fn test_basic_upload_body() {
        let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
            .build()
            .unwrap();

        let body = encode(&test_metadata(), &request, utc());

        let dest = position(&body, b"name=\"dest_folder_path\"").unwrap();
        let dest_value = position(&body, b"/home/docs").unwrap();
        assert!(dest < dest_value);

        assert!(position(&body, b"name=\"file\"; filename=\"a.txt\"").is_some());
        assert!(position(&body, b"hello").is_some());
        assert!(position(&body, b"name=\"overwrite\"").is_none());
        assert!(position(&body, b"name=\"mtime\"").is_none());
        assert!(position(&body, b"name=\"crtime\"").is_none());
        assert!(position(&body, b"name=\"atime\"").is_none());
    }

    #[test]
    fn test_exactly_one_file_field_with_verbatim_payload() {
        // Payload that is not valid UTF-8, to catch any transcoding
        let payload = vec![0x00, 0xff, 0xfe, 0x0d, 0x0a, 0x80];
        let request = UploadRequest::builder("/data", "blob.bin", payload.clone())
            .build()
            .unwrap();

        let body = encode(&test_metadata(), &request, utc());

        assert_eq!(count(&body, b"name=\"file\""), 1);
        let header_end = position(&body, b"application/octet-stream\r\n\r\n").unwrap()
            + b"application/octet-stream\r\n\r\n".len();
        assert_eq!(&body[header_end..header_end + payload.len()], &payload[..]);
        assert!(body.ends_with(b"\r\n\r\n--AaB03x--"));
    }

    #[test]
    fn test_metadata_fields_precede_file_field() {
        let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
            .build()
            .unwrap();

        let body = encode(&test_metadata(), &request, utc());

        let api = position(&body, b"name=\"api\"").unwrap();
        let version = position(&body, b"name=\"version\"").unwrap();
        let method = position(&body, b"name=\"method\"").unwrap();
        let sid = position(&body, b"name=\"_sid\"").unwrap();
        let dest = position(&body, b"name=\"dest_folder_path\"").unwrap();
        let create_parents = position(&body, b"name=\"create_parents\"").unwrap();
        let file = position(&body, b"name=\"file\"").unwrap();

        assert!(api < version);
        assert!(version < method);
        assert!(method < sid);
        assert!(sid < dest);
        assert!(dest < create_parents);
        assert!(create_parents < file);
    }

    #[test]
    fn test_overwrite_and_skip_both_emit_overwrite_true() {
        for behavior in [OverwriteBehavior::Overwrite, OverwriteBehavior::Skip] {
            let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
                .overwrite_behavior(behavior)
                .build()
                .unwrap();

            let body = encode(&test_metadata(), &request, utc());
            let field = position(&body, b"name=\"overwrite\"\r\ntrue\r\n");
            assert!(field.is_some(), "missing overwrite field for {behavior:?}");
        }
    }

    #[test]
    fn test_timestamps_emitted_in_fixed_order() {
        let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
            .creation_time(datetime(2021, 1, 1, 0, 0, 0))
            .last_modification_time(datetime(2021, 6, 1, 12, 30, 0))
            .last_access_time(datetime(2022, 1, 1, 0, 0, 0))
            .build()
            .unwrap();

        let body = encode(&test_metadata(), &request, utc());

        let mtime = position(&body, b"name=\"mtime\"").unwrap();
        let crtime = position(&body, b"name=\"crtime\"").unwrap();
        let atime = position(&body, b"name=\"atime\"").unwrap();
        assert!(mtime < crtime);
        assert!(crtime < atime);

        // Values are epoch milliseconds
        assert!(position(&body, b"name=\"crtime\"\r\n1609459200000\r\n").is_some());
    }

    #[test]
    fn test_absent_timestamps_are_omitted() {
        let request = UploadRequest::builder("/home/docs", "a.txt", b"hello".to_vec())
            .creation_time(datetime(2021, 1, 1, 0, 0, 0))
            .build()
            .unwrap();

        let body = encode(&test_metadata(), &request, utc());

        assert!(position(&body, b"name=\"crtime\"").is_some());
        assert!(position(&body, b"name=\"mtime\"").is_none());
        assert!(position(&body, b"name=\"atime\"").is_none());
    }

    #[test]
    fn test_content_type_strips_leading_dashes() {
        assert_eq!(content_type(), "multipart/form-data, boundary=AaB03x");
    }
}
