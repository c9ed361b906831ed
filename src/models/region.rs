use image::GrayImage;
use image::imageops;

/// Region of interest as percentages of the frame (0-100)
///
/// Stored exactly as set. Values outside 0-100 are kept; they are only
/// clamped once a real frame size is known, see [`RegionOfInterest::pixel_rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionOfInterest {
    /// Left edge, percent of width
    pub left: f32,
    /// Top edge, percent of height
    pub top: f32,
    /// Width, percent of width
    pub width: f32,
    /// Height, percent of height
    pub height: f32,
}

/// Pixel rectangle inside a concrete frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// True if the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl RegionOfInterest {
    /// Create a region from percentage components
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whole frame
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }

    /// True if this region covers the whole frame
    pub fn is_full(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.right() >= 100.0 && self.bottom() >= 100.0
    }

    /// Right edge in percent
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge in percent
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Resolve against a frame of `frame_width` x `frame_height` pixels,
    /// clamping every edge to the frame.
    pub fn pixel_rect(&self, frame_width: u32, frame_height: u32) -> PixelRect {
        let (x0, x1) = span(self.left, self.right(), frame_width);
        let (y0, y1) = span(self.top, self.bottom(), frame_height);
        PixelRect {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }

    /// Copy out the part of `image` this region selects
    pub fn crop(&self, image: &GrayImage) -> GrayImage {
        let rect = self.pixel_rect(image.width(), image.height());
        imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}

impl Default for RegionOfInterest {
    fn default() -> Self {
        Self::full()
    }
}

// Percent edges to pixel edges; start rounds down, end rounds up.
fn span(start_pct: f32, end_pct: f32, extent: u32) -> (u32, u32) {
    let to_px = |pct: f32| pct.clamp(0.0, 100.0) * extent as f32 / 100.0;
    let start = (to_px(start_pct).floor() as u32).min(extent);
    let end = (to_px(end_pct).ceil() as u32).min(extent);
    (start, end.max(start))
}
