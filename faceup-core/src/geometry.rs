//! Pixel-space to display-space rectangle mapping.
//!
//! Detectors report face boxes in native image pixels while the preview renders
//! the image at some other size. The mapper converts between the two spaces
//! under an explicit [`ScalingPolicy`]. The GUI displays photos with
//! [`ScalingPolicy::Fit`] (uniform scale, letterboxed and centered); the other
//! policies are kept for embedders that lay the image out differently. Mapping
//! is pure and is re-evaluated on every render, never cached per selection.

use std::{fmt, str::FromStr};

/// Axis-aligned face rectangle in native image pixel coordinates.
///
/// Produced by the detection session; coordinates are already normalized into
/// the native image bounds by the time the workflow exposes them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// On-screen footprint available to the image, in presentation units.
///
/// Supplied by the presentation layer per render; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFrame {
    pub width: f32,
    pub height: f32,
}

impl DisplayFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in display-surface coordinates, origin at the frame's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle has no visible extent.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn clip_to(self, frame: DisplayFrame) -> Self {
        let x = self.x.clamp(0.0, frame.width);
        let y = self.y.clamp(0.0, frame.height);
        let right = self.right().clamp(x, frame.width);
        let bottom = self.bottom().clamp(y, frame.height);
        Self {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// How the native image is scaled into the display frame.
///
/// `Fit` and `Fill` scale uniformly with centered letterbox/crop offsets;
/// `Stretch` scales each axis independently. The policies yield different
/// overlay positions whenever the aspect ratios differ, so layout and overlay
/// mapping must agree on one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingPolicy {
    /// Uniform scale, letterboxed and centered. The GUI default.
    #[default]
    Fit,
    /// Independent horizontal and vertical scale factors filling the frame.
    Stretch,
    /// Uniform scale covering the frame; overflow is cropped.
    Fill,
}

impl fmt::Display for ScalingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScalingPolicy::Fit => "fit",
                ScalingPolicy::Stretch => "stretch",
                ScalingPolicy::Fill => "fill",
            }
        )
    }
}

impl FromStr for ScalingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(ScalingPolicy::Fit),
            "stretch" => Ok(ScalingPolicy::Stretch),
            "fill" => Ok(ScalingPolicy::Fill),
            other => Err(format!(
                "invalid scaling policy '{other}'; expected 'fit', 'stretch', or 'fill'"
            )),
        }
    }
}

/// Per-axis scale factors plus the letterbox/crop offset for a policy.
///
/// Callers must have rejected degenerate sizes already.
fn scale_factors(
    native: (u32, u32),
    frame: DisplayFrame,
    policy: ScalingPolicy,
) -> (f32, f32, f32, f32) {
    let native_w = native.0 as f32;
    let native_h = native.1 as f32;
    match policy {
        ScalingPolicy::Stretch => (frame.width / native_w, frame.height / native_h, 0.0, 0.0),
        ScalingPolicy::Fit | ScalingPolicy::Fill => {
            let sx = frame.width / native_w;
            let sy = frame.height / native_h;
            let scale = if policy == ScalingPolicy::Fit {
                sx.min(sy).max(0.0)
            } else {
                sx.max(sy)
            };
            let offset_x = (frame.width - native_w * scale) / 2.0;
            let offset_y = (frame.height - native_h * scale) / 2.0;
            (scale, scale, offset_x, offset_y)
        }
    }
}

/// Map a face box from native pixel space into the display frame.
///
/// The result is expressed relative to the frame's top-left corner. Under
/// `Fit` the letterbox offset is included; under `Fill` the rectangle is
/// additionally clipped to the frame bounds. Degenerate native or frame
/// dimensions yield the zero rectangle.
pub fn map_box(
    bbox: FaceBox,
    native: (u32, u32),
    frame: DisplayFrame,
    policy: ScalingPolicy,
) -> DisplayRect {
    if native.0 == 0 || native.1 == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return DisplayRect::ZERO;
    }

    let (scale_x, scale_y, offset_x, offset_y) = scale_factors(native, frame, policy);
    let mapped = DisplayRect {
        x: bbox.x.mul_add(scale_x, offset_x),
        y: bbox.y.mul_add(scale_y, offset_y),
        width: bbox.width * scale_x,
        height: bbox.height * scale_y,
    };

    match policy {
        ScalingPolicy::Fill => mapped.clip_to(frame),
        _ => mapped,
    }
}

/// Where the scaled image itself lands inside the frame under the policy.
///
/// Presentation layers position the texture with this rectangle. Under `Fill`
/// it overhangs the frame on the cropped axis, so painting must clip to the
/// frame bounds. Degenerate sizes yield the zero rectangle.
pub fn image_placement(
    native: (u32, u32),
    frame: DisplayFrame,
    policy: ScalingPolicy,
) -> DisplayRect {
    if native.0 == 0 || native.1 == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return DisplayRect::ZERO;
    }

    let (scale_x, scale_y, offset_x, offset_y) = scale_factors(native, frame, policy);
    DisplayRect {
        x: offset_x,
        y: offset_y,
        width: native.0 as f32 * scale_x,
        height: native.1 as f32 * scale_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_close(actual: DisplayRect, expected: DisplayRect) {
        assert!(
            (actual.x - expected.x).abs() < 1e-4
                && (actual.y - expected.y).abs() < 1e-4
                && (actual.width - expected.width).abs() < 1e-4
                && (actual.height - expected.height).abs() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn stretch_maps_full_image_box_onto_frame() {
        let cases = [
            ((800u32, 600u32), (400.0, 300.0)),
            ((640, 480), (123.0, 456.0)),
            ((1, 1), (17.0, 3.0)),
            ((1920, 1080), (1920.0, 1080.0)),
        ];
        for ((w, h), (rw, rh)) in cases {
            let full = FaceBox::new(0.0, 0.0, w as f32, h as f32);
            let mapped = map_box(full, (w, h), DisplayFrame::new(rw, rh), ScalingPolicy::Stretch);
            assert_rect_close(mapped, DisplayRect { x: 0.0, y: 0.0, width: rw, height: rh });
        }
    }

    #[test]
    fn stretch_keeps_in_bounds_boxes_inside_frame() {
        let native = (1024u32, 768u32);
        let frame = DisplayFrame::new(333.0, 505.0);
        let boxes = [
            FaceBox::new(0.0, 0.0, 10.0, 10.0),
            FaceBox::new(512.0, 384.0, 512.0, 384.0),
            FaceBox::new(1000.0, 700.0, 24.0, 68.0),
            FaceBox::new(3.5, 9.25, 0.0, 0.0),
        ];
        for bbox in boxes {
            let mapped = map_box(bbox, native, frame, ScalingPolicy::Stretch);
            assert!(mapped.x >= 0.0 && mapped.y >= 0.0, "origin out of frame: {mapped:?}");
            assert!(
                mapped.right() <= frame.width + 1e-3 && mapped.bottom() <= frame.height + 1e-3,
                "extent out of frame: {mapped:?}"
            );
        }
    }

    #[test]
    fn half_scale_overlay_matches_expected_pixels() {
        // 800x600 shown at 400x300: every coordinate halves.
        let bbox = FaceBox::new(100.0, 100.0, 50.0, 50.0);
        let native = (800, 600);
        let frame = DisplayFrame::new(400.0, 300.0);

        let stretched = map_box(bbox, native, frame, ScalingPolicy::Stretch);
        assert_eq!(stretched, DisplayRect { x: 50.0, y: 50.0, width: 25.0, height: 25.0 });

        // Same aspect ratio, so the uniform policies agree.
        let fitted = map_box(bbox, native, frame, ScalingPolicy::Fit);
        assert_eq!(fitted, stretched);
    }

    #[test]
    fn fit_centers_landscape_image_in_square_frame() {
        let native = (800, 600);
        let frame = DisplayFrame::new(400.0, 400.0);

        let placement = image_placement(native, frame, ScalingPolicy::Fit);
        assert_rect_close(placement, DisplayRect { x: 0.0, y: 50.0, width: 400.0, height: 300.0 });

        let bbox = FaceBox::new(100.0, 100.0, 50.0, 50.0);
        let mapped = map_box(bbox, native, frame, ScalingPolicy::Fit);
        assert_rect_close(mapped, DisplayRect { x: 50.0, y: 100.0, width: 25.0, height: 25.0 });
    }

    #[test]
    fn fit_boxes_stay_inside_placement() {
        let native = (600, 800);
        let frame = DisplayFrame::new(512.0, 256.0);
        let placement = image_placement(native, frame, ScalingPolicy::Fit);

        let boxes = [
            FaceBox::new(0.0, 0.0, 600.0, 800.0),
            FaceBox::new(550.0, 10.0, 50.0, 50.0),
            FaceBox::new(200.0, 790.0, 100.0, 10.0),
        ];
        for bbox in boxes {
            let mapped = map_box(bbox, native, frame, ScalingPolicy::Fit);
            assert!(mapped.x >= placement.x - 1e-3 && mapped.y >= placement.y - 1e-3);
            assert!(mapped.right() <= placement.right() + 1e-3);
            assert!(mapped.bottom() <= placement.bottom() + 1e-3);
        }
    }

    #[test]
    fn fill_overhangs_frame_and_clips_boxes() {
        // 800x600 covering a 400x400 frame overhangs horizontally.
        let native = (800, 600);
        let frame = DisplayFrame::new(400.0, 400.0);

        let placement = image_placement(native, frame, ScalingPolicy::Fill);
        assert_rect_close(
            placement,
            DisplayRect { x: -200.0 / 3.0, y: 0.0, width: 1600.0 / 3.0, height: 400.0 },
        );

        // The visible part of the image is exactly the frame.
        let full = FaceBox::new(0.0, 0.0, 800.0, 600.0);
        let visible = map_box(full, native, frame, ScalingPolicy::Fill);
        assert_rect_close(visible, DisplayRect { x: 0.0, y: 0.0, width: 400.0, height: 400.0 });

        // A box hugging the left edge is mostly cropped away.
        let bbox = FaceBox::new(0.0, 0.0, 150.0, 600.0);
        let mapped = map_box(bbox, native, frame, ScalingPolicy::Fill);
        assert_eq!(mapped.x, 0.0);
        assert!(mapped.width < 150.0 * (400.0 / 600.0));
        assert!(mapped.right() <= frame.width + 1e-3);
        assert!(mapped.bottom() <= frame.height + 1e-3);
    }

    #[test]
    fn degenerate_sizes_map_to_zero() {
        let bbox = FaceBox::new(10.0, 10.0, 5.0, 5.0);
        let frame = DisplayFrame::new(100.0, 100.0);
        assert_eq!(map_box(bbox, (0, 480), frame, ScalingPolicy::Stretch), DisplayRect::ZERO);
        assert_eq!(map_box(bbox, (640, 0), frame, ScalingPolicy::Fit), DisplayRect::ZERO);
        assert_eq!(
            map_box(bbox, (640, 480), DisplayFrame::new(0.0, 100.0), ScalingPolicy::Fill),
            DisplayRect::ZERO
        );
    }

    #[test]
    fn scaling_policy_parses_and_rejects() {
        assert_eq!(" Fit ".parse::<ScalingPolicy>(), Ok(ScalingPolicy::Fit));
        assert_eq!("stretch".parse::<ScalingPolicy>(), Ok(ScalingPolicy::Stretch));
        assert_eq!("FILL".parse::<ScalingPolicy>(), Ok(ScalingPolicy::Fill));
        assert!("tile".parse::<ScalingPolicy>().is_err());
        assert_eq!(ScalingPolicy::Fill.to_string(), "fill");
    }
}
