//! Tests for export sizing, the pixel ceiling and the PNG pipeline

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tilepress::PatternError;
    use tilepress::io::configuration::MAX_PIXELS;
    use tilepress::pattern::compositor::PatternConfig;
    use tilepress::pattern::export::{
        CeilingPolicy, ExportSpec, PixelSize, Unit, enforce_ceiling, render_png, render_surface,
        suggested_filename, to_pixels,
    };
    use tilepress::pattern::source::SourceImage;
    use tilepress::png::read_resolution;

    fn spec(width: f64, height: f64, unit: Unit, dpi: u32) -> ExportSpec {
        ExportSpec {
            width,
            height,
            unit,
            dpi,
        }
    }

    fn red_image() -> Option<SourceImage> {
        Some(SourceImage::new(RgbaImage::from_pixel(
            8,
            8,
            Rgba([255, 0, 0, 255]),
        )))
    }

    // Tests unit conversion floors to whole pixels
    #[test]
    fn test_to_pixels_units() {
        assert_eq!(to_pixels("width", 1024.9, Unit::Pixel, 300).ok(), Some(1024));
        assert_eq!(to_pixels("width", 2.0, Unit::Inch, 300).ok(), Some(600));
        assert_eq!(to_pixels("width", 210.0, Unit::Millimeter, 300).ok(), Some(2480));
        assert_eq!(to_pixels("height", 297.0, Unit::Millimeter, 300).ok(), Some(3507));
    }

    // Tests tiny positive sizes round up to one pixel
    #[test]
    fn test_to_pixels_minimum_one() {
        assert_eq!(to_pixels("width", 0.2, Unit::Pixel, 300).ok(), Some(1));
        assert_eq!(to_pixels("width", 0.01, Unit::Millimeter, 72).ok(), Some(1));
    }

    // Tests non-positive and non-finite sizes are rejected
    #[test]
    fn test_to_pixels_rejects_invalid() {
        for value in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = to_pixels("width", value, Unit::Pixel, 300);
            assert!(matches!(
                result,
                Err(PatternError::InvalidParameter {
                    parameter: "width",
                    ..
                })
            ));
        }
    }

    // Tests a zero DPI is rejected
    #[test]
    fn test_zero_dpi_rejected() {
        let result = spec(10.0, 10.0, Unit::Pixel, 0).requested_pixels();
        assert!(matches!(
            result,
            Err(PatternError::InvalidParameter {
                parameter: "dpi",
                ..
            })
        ));
    }

    // Tests the ceiling accepts sizes up to the limit
    #[test]
    fn test_ceiling_allows_limit() {
        let size = enforce_ceiling(10_000, 5_000, MAX_PIXELS, CeilingPolicy::Reject);
        assert_eq!(
            size.ok(),
            Some(PixelSize {
                width: 10_000,
                height: 5_000
            })
        );
    }

    // Tests the default policy rejects oversized output
    #[test]
    fn test_ceiling_rejects() {
        let result = enforce_ceiling(10_000, 10_000, MAX_PIXELS, CeilingPolicy::default());
        assert!(matches!(
            result,
            Err(PatternError::OutputTooLarge {
                width: 10_000,
                height: 10_000,
                limit: MAX_PIXELS
            })
        ));
    }

    // Tests downscaling keeps the aspect ratio within the limit
    #[test]
    fn test_ceiling_downscales() {
        let size = enforce_ceiling(10_000, 10_000, MAX_PIXELS, CeilingPolicy::Downscale).unwrap();
        assert_eq!((size.width, size.height), (7071, 7071));
        assert!(size.pixel_count() <= MAX_PIXELS);
    }

    // Tests a one pixel wide strip is shortened to the limit
    #[test]
    fn test_ceiling_downscales_thin_strip() {
        let size =
            enforce_ceiling(1, 60_000_000, MAX_PIXELS, CeilingPolicy::Downscale).unwrap();
        assert_eq!((size.width, size.height), (1, 50_000_000));
        assert!(size.pixel_count() <= MAX_PIXELS);

        let size =
            enforce_ceiling(60_000_000, 1, MAX_PIXELS, CeilingPolicy::Downscale).unwrap();
        assert_eq!((size.width, size.height), (50_000_000, 1));

        let size = spec(1.0, 60_000_000.0, Unit::Pixel, 300)
            .resolve(CeilingPolicy::Downscale)
            .unwrap();
        assert!(size.pixel_count() <= MAX_PIXELS);
    }

    // Tests the preview fits the screen box with a minimum side
    #[test]
    fn test_preview_size() {
        let square = spec(1024.0, 1024.0, Unit::Pixel, 300).preview_size();
        assert_eq!((square.width, square.height), (768, 768));

        let strip = spec(3000.0, 1000.0, Unit::Pixel, 300).preview_size();
        assert_eq!((strip.width, strip.height), (1024, 341));

        let banner = spec(10_000.0, 100.0, Unit::Pixel, 300).preview_size();
        assert_eq!((banner.width, banner.height), (1024, 200));
    }

    // Tests the suggested name encodes size and DPI
    #[test]
    fn test_suggested_filename() {
        let size = PixelSize {
            width: 2480,
            height: 3507,
        };
        assert_eq!(suggested_filename(size, 300), "pattern_2480x3507_300dpi.png");
    }

    // Tests the default export spec
    #[test]
    fn test_default_spec() {
        let spec = ExportSpec::default();
        assert_eq!(spec.unit, Unit::Pixel);
        assert_eq!(spec.dpi, 300);
        assert_eq!(
            spec.resolve(CeilingPolicy::Reject).ok(),
            Some(PixelSize {
                width: 1024,
                height: 1024
            })
        );
    }

    // Tests rendering without images fails before doing work
    #[test]
    fn test_render_without_images() {
        let result = render_png(
            &ExportSpec::default(),
            CeilingPolicy::Reject,
            &PatternConfig::default(),
            &[None, None],
            |_| {},
        );
        assert!(matches!(result, Err(PatternError::NoImages)));
    }

    // Tests oversized output is rejected before rendering
    #[test]
    fn test_render_too_large() {
        let mut rows = 0;
        let result = render_png(
            &spec(20_000.0, 20_000.0, Unit::Pixel, 300),
            CeilingPolicy::Reject,
            &PatternConfig::default(),
            &[red_image()],
            |_| rows += 1,
        );
        assert!(matches!(result, Err(PatternError::OutputTooLarge { .. })));
        assert_eq!(rows, 0);
    }

    // Tests a rendered export decodes at the requested size with the DPI tag
    #[test]
    fn test_render_png() {
        let exported = render_png(
            &spec(64.0, 48.0, Unit::Pixel, 72),
            CeilingPolicy::Reject,
            &PatternConfig::default(),
            &[red_image()],
            |_| {},
        )
        .unwrap();

        assert_eq!(exported.filename, "pattern_64x48_72dpi.png");
        assert_eq!(exported.dpi, 72);
        assert_eq!(
            read_resolution(&exported.bytes).map(|res| res.x_pixels_per_unit),
            Some(2835)
        );

        let decoded = image::load_from_memory(&exported.bytes).map(|image| image.to_rgba8());
        assert_eq!(decoded.ok().map(|image| image.dimensions()), Some((64, 48)));
    }

    // Tests render_surface starts from a transparent canvas
    #[test]
    fn test_render_surface_transparent_margin() {
        let size = PixelSize {
            width: 40,
            height: 40,
        };
        let surface = render_surface(size, &PatternConfig::default(), &[red_image()], |_| {});
        assert_eq!(surface.dimensions(), (40, 40));
        assert_eq!(surface.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
