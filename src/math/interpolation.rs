//! Bilinear sampling for resampling source images onto the surface
//!
//! Colors are handled as premultiplied RGBA in the unit range so that
//! transparent texels do not bleed their color into neighbours.

use image::RgbaImage;
use num_traits::Float;

/// Premultiplied RGBA color with channels in `[0, 1]`
pub type Premultiplied = [f64; 4];

/// Linear interpolation between `a` and `b`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    t.mul_add(b - a, a)
}

/// Read one texel as premultiplied RGBA, transparent when out of bounds
pub fn premultiplied_texel(image: &RgbaImage, x: u32, y: u32) -> Premultiplied {
    let Some(pixel) = image.get_pixel_checked(x, y) else {
        return [0.0; 4];
    };
    let [r, g, b, a] = pixel.0;
    let alpha = f64::from(a) / 255.0;
    [
        f64::from(r) / 255.0 * alpha,
        f64::from(g) / 255.0 * alpha,
        f64::from(b) / 255.0 * alpha,
        alpha,
    ]
}

/// Sample an image at a continuous texel position
///
/// Integer coordinates land exactly on texel centers. Positions outside the
/// image clamp to the nearest edge texel.
pub fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Premultiplied {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return [0.0; 4];
    }

    let x = x.clamp(0.0, f64::from(width - 1));
    let y = y.clamp(0.0, f64::from(height - 1));
    let (x0, y0) = (x.floor(), y.floor());
    let (tx, ty) = (x - x0, y - y0);

    let x0 = x0 as u32;
    let y0 = y0 as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let top_left = premultiplied_texel(image, x0, y0);
    let top_right = premultiplied_texel(image, x1, y0);
    let bottom_left = premultiplied_texel(image, x0, y1);
    let bottom_right = premultiplied_texel(image, x1, y1);

    let mut out = [0.0; 4];
    for (channel, value) in out.iter_mut().enumerate() {
        let pick = |texel: &Premultiplied| texel.get(channel).copied().unwrap_or(0.0);
        let top = lerp(pick(&top_left), pick(&top_right), tx);
        let bottom = lerp(pick(&bottom_left), pick(&bottom_right), tx);
        *value = lerp(top, bottom, ty);
    }
    out
}
