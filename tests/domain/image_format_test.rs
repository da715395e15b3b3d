use chat_relay::domain::ImageFormat;

#[test]
fn given_supported_mime_types_when_parsing_then_returns_format() {
    assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
    assert_eq!(ImageFormat::from_mime("image/jpeg"), Some(ImageFormat::Jpeg));
    assert_eq!(ImageFormat::from_mime("image/jpg"), Some(ImageFormat::Jpeg));
    assert_eq!(ImageFormat::from_mime("image/gif"), Some(ImageFormat::Gif));
    assert_eq!(ImageFormat::from_mime("image/webp"), Some(ImageFormat::Webp));
}

#[test]
fn given_mime_with_parameters_when_parsing_then_ignores_parameters() {
    assert_eq!(
        ImageFormat::from_mime("IMAGE/PNG; charset=binary"),
        Some(ImageFormat::Png)
    );
}

#[test]
fn given_unsupported_mime_when_parsing_then_returns_none() {
    assert_eq!(ImageFormat::from_mime("application/pdf"), None);
    assert_eq!(ImageFormat::from_mime("image/svg+xml"), None);
    assert_eq!(ImageFormat::from_mime(""), None);
}

#[test]
fn given_jpeg_when_describing_then_uses_canonical_mime_and_extension() {
    assert_eq!(ImageFormat::Jpeg.as_mime(), "image/jpeg");
    assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
}
