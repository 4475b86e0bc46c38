//! Decoded source images and the fixed set of slots that hold them

use image::RgbaImage;

use crate::io::configuration::{
    DEFAULT_SCALE_PERCENT, MAX_IMAGE_SLOTS, MAX_SCALE_PERCENT, MIN_SCALE_MULTIPLIER,
    MIN_SCALE_PERCENT,
};
use crate::io::error::{Result, invalid_parameter};

/// A decoded raster asset with its display name and scale
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    name: Option<String>,
    scale_percent: u8,
}

impl SourceImage {
    /// Wrap decoded pixels using the default scale
    pub const fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            name: None,
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }

    /// Attach a display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the scale percentage, clamped to 1..=100
    #[must_use]
    pub fn with_scale_percent(mut self, percent: u8) -> Self {
        self.set_scale_percent(percent);
        self
    }

    /// Update the scale percentage, clamped to 1..=100
    pub fn set_scale_percent(&mut self, percent: u8) {
        self.scale_percent = percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
    }

    /// Scale percentage applied on top of cover-fit
    pub const fn scale_percent(&self) -> u8 {
        self.scale_percent
    }

    /// Multiplier applied on top of cover-fit, never below 0.01
    pub fn scale_multiplier(&self) -> f64 {
        (f64::from(self.scale_percent) / 100.0).max(MIN_SCALE_MULTIPLIER)
    }

    /// Display name, usually the file name the image came from
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Decoded pixels
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Natural width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the image has a non-zero area and can be scaled
    pub fn is_drawable(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }
}

/// Fixed set of optional image slots, in the order the user filled them
#[derive(Debug, Clone, Default)]
pub struct ImageSlots {
    slots: [Option<SourceImage>; MAX_IMAGE_SLOTS],
}

impl ImageSlots {
    /// Create empty slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an image in a slot and return the image it replaced
    ///
    /// A replaced image hands its scale percentage to the newcomer, so a
    /// slot keeps its scale setting across file changes.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is not below the slot count
    pub fn set(&mut self, slot: usize, mut image: SourceImage) -> Result<Option<SourceImage>> {
        let entry = self.slots.get_mut(slot).ok_or_else(|| {
            invalid_parameter("slot", &slot, &format!("must be below {MAX_IMAGE_SLOTS}"))
        })?;
        if let Some(previous) = entry.as_ref() {
            image.scale_percent = previous.scale_percent;
        }
        Ok(entry.replace(image))
    }

    /// Empty a slot and return its image
    pub fn take(&mut self, slot: usize) -> Option<SourceImage> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Image in a slot, if any
    pub fn get(&self, slot: usize) -> Option<&SourceImage> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Mutable image in a slot, if any
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut SourceImage> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Loaded images in slot order, holes skipped
    pub fn present(&self) -> impl Iterator<Item = &SourceImage> {
        self.slots.iter().flatten()
    }

    /// Number of loaded images
    pub fn count(&self) -> usize {
        self.present().count()
    }

    /// Whether no slot holds an image
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All slots including holes
    pub const fn as_slice(&self) -> &[Option<SourceImage>] {
        &self.slots
    }
}
