//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::{Path, PathBuf};
    use tilepress::PatternError;
    use tilepress::io::error::{WithPath, invalid_parameter, malformed_png};

    fn image_error(message: &str) -> image::ImageError {
        image::ImageError::IoError(std::io::Error::other(message.to_string()))
    }

    // Tests file system errors chain to the I/O error
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PatternError::FileSystem {
            path: "/tmp/out.png".into(),
            operation: "write",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("write"));
        assert!(message.contains("/tmp/out.png"));
        assert!(message.contains("file not found"));
    }

    // Tests decode errors mention both attempts and chain to the retry
    #[test]
    fn test_image_decode_error() {
        let error = PatternError::ImageDecode {
            path: PathBuf::from("photo.heic"),
            primary: image_error("unsupported extension"),
            fallback: image_error("unknown format"),
        };

        let message = error.to_string();
        assert!(message.contains("photo.heic"));
        assert!(message.contains("unsupported extension"));
        assert!(message.contains("unknown format"));
        assert!(
            error
                .source()
                .is_some_and(|source| source.to_string().contains("unknown format"))
        );
    }

    // Tests the oversize message carries dimensions and limit
    #[test]
    fn test_output_too_large_error() {
        let error = PatternError::OutputTooLarge {
            width: 10_000,
            height: 8_000,
            limit: 50_000_000,
        };

        let message = error.to_string();
        assert!(message.contains("10000x8000"));
        assert!(message.contains("50000000"));
        assert!(error.source().is_none());
    }

    // Tests the empty export message
    #[test]
    fn test_no_images_error() {
        let message = PatternError::NoImages.to_string();
        assert!(message.contains("No images"));
    }

    // Tests helper constructors fill every field
    #[test]
    fn test_helpers() {
        let error = invalid_parameter("dpi", &0, &"must be at least 1");
        let message = error.to_string();
        assert!(message.contains("dpi"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be at least 1"));

        let error = malformed_png(&"signature mismatch");
        assert!(matches!(error, PatternError::MalformedPng { ref reason } if reason == "signature mismatch"));
        assert_eq!(error.to_string(), "Malformed PNG: signature mismatch");
    }

    // Tests I/O errors pick up the path they were working on
    #[test]
    fn test_with_path() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let error = result.with_path(Path::new("/out/a.png"), "write").unwrap_err();

        match error {
            PatternError::FileSystem {
                path, operation, ..
            } => {
                assert_eq!(path, PathBuf::from("/out/a.png"));
                assert_eq!(operation, "write");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // Tests non file system errors pass through with_path untouched
    #[test]
    fn test_with_path_keeps_other_errors() {
        let result: Result<(), PatternError> = Err(PatternError::NoImages);
        let error = result.with_path(Path::new("x"), "read").unwrap_err();
        assert!(matches!(error, PatternError::NoImages));
    }

    // Tests conversions from library errors
    #[test]
    fn test_from_conversions() {
        let error = PatternError::from(image_error("boom"));
        assert!(matches!(error, PatternError::ImageEncode { .. }));
        assert!(error.to_string().contains("boom"));

        let error = PatternError::from(std::io::Error::other("disk"));
        assert!(matches!(error, PatternError::FileSystem { .. }));
    }
}
