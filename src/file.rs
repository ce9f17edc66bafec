use crate::error::GlikRequestError;
use serde::{Deserialize, Serialize};

/// How a file reaches the service, tagged by `transfer_method` on the wire.
///
/// The tagged shape makes the contract unrepresentable to violate: a
/// `remote_url` descriptor carries `url` and never `upload_file_id`, a
/// `local_file` descriptor the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transfer_method", rename_all = "snake_case")]
pub enum FileSource {
    /// The service fetches the file from a public URL.
    RemoteUrl {
        /// Publicly reachable file URL.
        url: String,
    },
    /// The file was previously uploaded through `POST /files/upload`.
    LocalFile {
        /// Id returned by the upload call.
        upload_file_id: String,
    },
}

/// File category accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
}

/// One file attached to a completion or chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(flatten)]
    pub source: FileSource,
}

impl FileDescriptor {
    /// An image the service should fetch from a URL.
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            kind: FileKind::Image,
            source: FileSource::RemoteUrl { url: url.into() },
        }
    }

    /// A previously uploaded image, referenced by its upload id.
    pub fn image_upload(upload_file_id: impl Into<String>) -> Self {
        Self {
            kind: FileKind::Image,
            source: FileSource::LocalFile {
                upload_file_id: upload_file_id.into(),
            },
        }
    }
}

/// Represents a file to be uploaded.
#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    /// The raw byte content of the file.
    pub content: Vec<u8>,
    /// The name of the file.
    pub filename: String,
    /// The MIME type of the file.
    pub mime_type: String,
}

impl FileUploadRequest {
    /// Create an upload request, guessing the MIME type from the filename.
    pub fn new(content: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();

        Self {
            content,
            filename,
            mime_type,
        }
    }

    /// Override the guessed MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Turn this request into a multipart part.
    pub(crate) fn to_part(&self) -> Result<reqwest::multipart::Part, GlikRequestError> {
        Ok(reqwest::multipart::Part::bytes(self.content.clone())
            .file_name(self.filename.clone())
            .mime_str(&self.mime_type)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_guessed_from_filename() {
        let request = FileUploadRequest::new(vec![1, 2, 3], "panda.jpeg");
        assert_eq!(request.mime_type, "image/jpeg");
        assert_eq!(request.filename, "panda.jpeg");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let request = FileUploadRequest::new(vec![], "blob.xyzzy");
        assert_eq!(request.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_mime_type_override() {
        let request = FileUploadRequest::new(vec![], "recording.bin").with_mime_type("audio/mpeg");
        assert_eq!(request.mime_type, "audio/mpeg");
    }
}
