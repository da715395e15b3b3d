use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use chat_relay::application::ports::{MediaError, MediaHost};
use chat_relay::application::services::{
    AttachmentSource, MediaResolver, UploadedImage, embed_data_uri,
};
use chat_relay::domain::ImageFormat;

const PNG_BYTES: &[u8] = &[137, 80, 78, 71];

struct StubHost {
    url: String,
    uploads: Mutex<Vec<(usize, ImageFormat)>>,
}

impl StubHost {
    fn returning(url: &str) -> Arc<Self> {
        Arc::new(Self {
            url: url.to_string(),
            uploads: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl MediaHost for StubHost {
    async fn upload(&self, data: Bytes, format: ImageFormat) -> Result<String, MediaError> {
        self.uploads.lock().unwrap().push((data.len(), format));
        Ok(self.url.clone())
    }
}

fn png_upload() -> UploadedImage {
    UploadedImage {
        data: Bytes::from_static(PNG_BYTES),
        mime: "image/png".to_string(),
        file_name: Some("pic.png".to_string()),
    }
}

#[test]
fn given_png_bytes_when_embedding_then_produces_base64_data_uri() {
    assert_eq!(
        embed_data_uri(PNG_BYTES, ImageFormat::Png),
        "data:image/png;base64,iVBORw=="
    );
}

#[tokio::test]
async fn given_no_media_host_when_attaching_then_embeds_inline() {
    let resolver = MediaResolver::inline();

    let url = resolver.attach(png_upload()).await.unwrap();

    assert_eq!(url, "data:image/png;base64,iVBORw==");
}

#[tokio::test]
async fn given_media_host_when_attaching_then_returns_hosted_url() {
    let host = StubHost::returning("https://res.cloudinary.com/demo/image/upload/x.png");
    let resolver = MediaResolver::new(Some(host.clone() as Arc<dyn MediaHost>));

    let url = resolver.attach(png_upload()).await.unwrap();

    assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/x.png");
    assert_eq!(*host.uploads.lock().unwrap(), vec![(4, ImageFormat::Png)]);
}

#[tokio::test]
async fn given_unsupported_mime_when_attaching_then_rejects_before_upload() {
    let host = StubHost::returning("https://cdn/x.png");
    let resolver = MediaResolver::new(Some(host.clone() as Arc<dyn MediaHost>));
    let upload = UploadedImage {
        mime: "application/pdf".to_string(),
        ..png_upload()
    };

    let result = resolver.attach(upload).await;

    assert!(matches!(result, Err(MediaError::UnsupportedMedia(_))));
    assert!(host.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_host_returning_non_http_reference_when_attaching_then_rejects() {
    let host = StubHost::returning("ftp://cdn/x.png");
    let resolver = MediaResolver::new(Some(host as Arc<dyn MediaHost>));

    let result = resolver.attach(png_upload()).await;

    assert!(matches!(result, Err(MediaError::UnsupportedMedia(_))));
}

#[tokio::test]
async fn given_https_reference_when_resolving_then_passes_through_unchanged() {
    let resolver = MediaResolver::inline();

    let url = resolver
        .resolve(AttachmentSource::Hosted("https://cdn/a.jpg".to_string()))
        .await
        .unwrap();

    assert_eq!(url, "https://cdn/a.jpg");
}

#[tokio::test]
async fn given_local_file_when_resolving_then_embeds_its_bytes() {
    let path = std::env::temp_dir().join(format!("chat-relay-{}.gif", uuid::Uuid::new_v4()));
    std::fs::File::create(&path)
        .unwrap()
        .write_all(PNG_BYTES)
        .unwrap();
    let resolver = MediaResolver::inline();

    let url = resolver
        .resolve(AttachmentSource::File {
            path: path.clone(),
            mime: "image/gif".to_string(),
        })
        .await
        .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(url, "data:image/gif;base64,iVBORw==");
}

#[tokio::test]
async fn given_missing_file_when_resolving_then_returns_io_error() {
    let resolver = MediaResolver::inline();

    let result = resolver
        .resolve(AttachmentSource::File {
            path: std::env::temp_dir().join("chat-relay-does-not-exist.png"),
            mime: "image/png".to_string(),
        })
        .await;

    assert!(matches!(result, Err(MediaError::Io(_))));
}
