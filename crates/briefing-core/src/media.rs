//! Pictures attached to a briefing. They are stored inline as `data:` URLs
//! so a record stays self-contained.

use crate::error::{BriefingError, Result};
use base64::Engine;
use std::path::Path;

/// Read an image file and encode it as `data:<mime>;base64,<payload>`.
pub fn image_data_url(path: &Path) -> Result<String> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(BriefingError::InvalidValue {
            field: "image".to_string(),
            value: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;
    Ok(encode_data_url(mime.as_ref(), &bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Accept a link or an inline picture as is; anything else is a local file.
pub fn image_reference(input: &str) -> Result<String> {
    let input = input.trim();
    if is_inline(input) || input.starts_with("https://") || input.starts_with("http://") {
        return Ok(input.to_string());
    }
    image_data_url(Path::new(input))
}

pub fn is_inline(image: &str) -> bool {
    image.starts_with("data:")
}

/// Short description of an image for terminal screens.
pub fn describe(image: &str) -> String {
    match image.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((header, payload)) => {
            let mime = header.trim_end_matches(";base64");
            format!("[{mime}, {} base64 chars]", payload.len())
        }
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn encodes_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ana.png");
        std::fs::write(&path, b"hi").unwrap();
        assert_eq!(image_data_url(&path).unwrap(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn rejects_non_images() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hi").unwrap();
        assert!(matches!(
            image_data_url(&path),
            Err(BriefingError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = image_data_url(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, BriefingError::Io(_)));
    }

    #[test]
    fn links_pass_through() {
        let url = "https://example.com/ana.jpg";
        assert_eq!(image_reference(url).unwrap(), url);
        assert_eq!(
            image_reference("data:image/png;base64,aGk=").unwrap(),
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn describe_summarises_inline_images() {
        assert_eq!(
            describe("data:image/png;base64,aGk="),
            "[image/png, 4 base64 chars]"
        );
        assert_eq!(describe("https://x/y.png"), "https://x/y.png");
    }
}
