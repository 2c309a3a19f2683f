use derive_builder::Builder;
use reqwest::{
    multipart::{Form, Part},
    Client, Url,
};

use crate::{
    constants::{
        DEFAULT_PHOTO_CONTENT_TYPE, DEFAULT_PHOTO_FILE_NAME, DEFAULT_PHOTO_SERVICE_URL,
        PHOTO_PART_NAME,
    },
    error::UploadError,
};

/// A photo ready to send. `bytes` must already be encoded in the format
/// `content_type` declares; this layer does no image processing.
#[derive(Builder, Clone, Debug)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    #[builder(setter(into), default = "DEFAULT_PHOTO_CONTENT_TYPE.to_string()")]
    pub content_type: String,
    #[builder(setter(into), default = "DEFAULT_PHOTO_FILE_NAME.to_string()")]
    pub file_name: String,
}

/// Post a photo to the upload service as a single-part multipart form.
///
/// The form carries one file part named `file`; reqwest generates a fresh
/// random boundary token per form. Zero-length bytes are accepted and produce
/// a well-formed empty file part.
pub async fn post(
    client: &Client,
    photo: &PhotoUpload,
    upload_url: Option<&str>,
) -> Result<(), UploadError> {
    let url = Url::parse(upload_url.unwrap_or(DEFAULT_PHOTO_SERVICE_URL))
        .map_err(|e| UploadError::InvalidRequest(e.to_string()))?;
    let part = Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(&photo.content_type)
        .map_err(|e| UploadError::Encoding(e.to_string()))?;
    let form = Form::new().part(PHOTO_PART_NAME, part);
    let response = client.post(url).multipart(form).send().await?;
    if !response.status().is_success() {
        return Err(UploadError::ResponseStatus(response.status()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const FAKE_JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    fn fake_photo() -> PhotoUpload {
        PhotoUploadBuilder::default()
            .bytes(FAKE_JPEG_BYTES.to_vec())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_applies_defaults() {
        let photo = fake_photo();
        assert_eq!(photo.content_type, "image/jpeg");
        assert_eq!(photo.file_name, "image.jpg");
    }

    #[test]
    fn builder_requires_bytes() {
        let photo = PhotoUploadBuilder::default().build();
        assert!(photo.is_err());
    }

    #[tokio::test]
    async fn post_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let upload_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/upload")
                    .body_contains("name=\"file\"")
                    .body_contains("filename=\"image.jpg\"")
                    .body_contains("Content-Type: image/jpeg");
                then.status(200);
            })
            .await;
        let url = server.url("/upload");
        let client = reqwest::Client::new();

        // Act
        let result = post(&client, &fake_photo(), Some(url.as_str())).await;

        // Assert
        assert!(result.is_ok(), "Failed to upload: {:?}", result.unwrap_err());
        upload_mock.assert();
    }

    #[tokio::test]
    async fn post_empty_bytes_still_well_formed() {
        // Arrange
        let server = MockServer::start_async().await;
        let upload_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/upload")
                    .body_contains("name=\"file\"")
                    .body_contains("filename=\"image.jpg\"");
                then.status(200);
            })
            .await;
        let url = server.url("/upload");
        let client = reqwest::Client::new();
        let photo = PhotoUploadBuilder::default()
            .bytes(Vec::new())
            .build()
            .unwrap();

        // Act
        let result = post(&client, &photo, Some(url.as_str())).await;

        // Assert
        assert!(result.is_ok(), "Failed to upload: {:?}", result.unwrap_err());
        upload_mock.assert();
    }

    #[tokio::test]
    async fn post_bad_status() {
        // Arrange
        let server = MockServer::start_async().await;
        let upload_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/upload");
                then.status(500);
            })
            .await;
        let url = server.url("/upload");
        let client = reqwest::Client::new();

        // Act
        let result = post(&client, &fake_photo(), Some(url.as_str())).await;

        // Assert
        assert!(result.is_err());
        match result.unwrap_err() {
            UploadError::ResponseStatus(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("Expected ResponseStatus, got {:?}", other),
        }
        upload_mock.assert();
    }

    #[tokio::test]
    async fn post_invalid_content_type() {
        // Arrange
        let client = reqwest::Client::new();
        let photo = PhotoUploadBuilder::default()
            .bytes(FAKE_JPEG_BYTES.to_vec())
            .content_type("not a mime type")
            .build()
            .unwrap();

        // Act
        let result = post(&client, &photo, Some("http://localhost/upload")).await;

        // Assert
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UploadError::Encoding(_)));
    }

    #[tokio::test]
    async fn post_invalid_url() {
        // Arrange
        let client = reqwest::Client::new();

        // Act
        let result = post(&client, &fake_photo(), Some("not a url")).await;

        // Assert
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UploadError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn post_transport_error() {
        // Arrange
        let client = reqwest::Client::new();

        // Act
        let result = post(&client, &fake_photo(), Some("http://test.invalid/upload")).await;

        // Assert
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), UploadError::Request(_)));
    }
}
