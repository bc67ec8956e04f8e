use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// A binary image attached to a create/update submission, carried as
/// base64 so command objects stay plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImage {
    /// Original client-side file name; only the extension is kept.
    pub file_name: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Base64-encoded file bytes.
    pub data: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

impl NewImage {
    pub fn decoded_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.data)
    }

    /// File extension of the original name, preserved on the stored object.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(file_name: &str) -> NewImage {
        NewImage {
            file_name: file_name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: BASE64.encode(b"pixels"),
        }
    }

    #[test]
    fn test_extension_from_file_name() {
        assert_eq!(image("clasp.jpg").extension(), "jpg");
        assert_eq!(image("photo.final.png").extension(), "png");
        assert_eq!(image("noextension").extension(), "bin");
    }

    #[test]
    fn test_decoded_bytes_round_trip() {
        assert_eq!(image("clasp.jpg").decoded_bytes().unwrap(), b"pixels");
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let broken = NewImage {
            file_name: "clasp.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: "not base64 at all!!!".to_string(),
        };
        assert!(broken.decoded_bytes().is_err());
    }
}
