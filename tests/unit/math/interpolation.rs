//! Tests for linear interpolation and premultiplied bilinear sampling

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tilepress::math::interpolation::{lerp, premultiplied_texel, sample_bilinear};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: [f64; 4], expected: [f64; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
        }
    }

    // Tests endpoints and midpoint of lerp
    #[test]
    fn test_lerp() {
        assert!((lerp(2.0_f64, 6.0, 0.0) - 2.0).abs() < EPSILON);
        assert!((lerp(2.0_f64, 6.0, 1.0) - 6.0).abs() < EPSILON);
        assert!((lerp(2.0_f64, 6.0, 0.5) - 4.0).abs() < EPSILON);
        assert!((lerp(1.0_f32, 3.0, 0.25) - 1.5).abs() < 1e-6);
    }

    // Tests texels are premultiplied by their alpha
    #[test]
    fn test_premultiplied_texel() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
        assert_close(premultiplied_texel(&image, 0, 0), [0.0; 4]);

        image.put_pixel(0, 0, Rgba([255, 255, 0, 255]));
        assert_close(premultiplied_texel(&image, 0, 0), [1.0, 1.0, 0.0, 1.0]);
    }

    // Tests reads outside the image are transparent
    #[test]
    fn test_premultiplied_texel_out_of_bounds() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        assert_close(premultiplied_texel(&image, 2, 0), [0.0; 4]);
        assert_close(premultiplied_texel(&image, 0, 5), [0.0; 4]);
    }

    // Tests integer positions return texel centers exactly
    #[test]
    fn test_sample_on_texel_center() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        assert_close(sample_bilinear(&image, 0.0, 0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_close(sample_bilinear(&image, 1.0, 0.0), [1.0, 1.0, 1.0, 1.0]);
    }

    // Tests a halfway position blends neighbours evenly
    #[test]
    fn test_sample_between_texels() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        assert_close(sample_bilinear(&image, 0.5, 0.0), [0.5, 0.5, 0.5, 1.0]);
    }

    // Tests a transparent neighbour does not darken the colour
    #[test]
    fn test_transparent_texel_does_not_bleed() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let [r, g, b, a] = sample_bilinear(&image, 0.5, 0.0);
        assert!((a - 0.5).abs() < EPSILON);
        assert!((r / a - 1.0).abs() < EPSILON);
        assert!(g.abs() < EPSILON);
        assert!(b.abs() < EPSILON);
    }

    // Tests positions past the edge clamp to the edge texel
    #[test]
    fn test_sample_clamps_to_edges() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        assert_close(sample_bilinear(&image, -3.0, -1.0), [0.0, 0.0, 0.0, 1.0]);
        assert_close(sample_bilinear(&image, 7.5, 2.0), [1.0, 1.0, 1.0, 1.0]);
    }

    // Tests an empty image samples as transparent
    #[test]
    fn test_sample_empty_image() {
        let image = RgbaImage::new(0, 0);
        assert_close(sample_bilinear(&image, 0.0, 0.0), [0.0; 4]);
    }
}
