//! Zoom Helper
//!
//! Pan-and-zoom transform math for the modal's image viewer. Desktop
//! pointers toggle a fixed zoom level; touch devices drive the scale
//! from a two-finger pinch. All functions are pure: the caller applies
//! the resulting transform to whatever element it manages.

/// Fixed pointer zoom factor
pub const POINTER_ZOOM_SCALE: f64 = 2.0;

/// Reduced pointer zoom factor on narrow viewports
pub const NARROW_POINTER_ZOOM_SCALE: f64 = 1.6;

/// Viewport width below which the reduced factor applies
pub const NARROW_VIEWPORT_WIDTH: f64 = 640.0;

/// Pinch scale bounds
pub const PINCH_MIN_SCALE: f64 = 1.0;
pub const PINCH_MAX_SCALE: f64 = 3.0;

/// A point relative to the image container's origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Container dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Whether the image is currently zoomed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    #[default]
    Idle,
    Zoomed,
}

/// Translate + scale applied to the image element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

/// Pointer zoom factor for a given viewport width
pub fn pointer_scale(viewport_width: f64) -> f64 {
    if viewport_width < NARROW_VIEWPORT_WIDTH {
        NARROW_POINTER_ZOOM_SCALE
    } else {
        POINTER_ZOOM_SCALE
    }
}

/// Clamp one translate axis so the scaled image keeps the container
/// covered: the edge may meet the frame but never retreat past it.
fn clamp_translate(translate: f64, extent: f64, scale: f64) -> f64 {
    let max = extent * (scale - 1.0) / 2.0;
    translate.clamp(-max, max)
}

/// Compute the pan transform for a zoom centered on `pointer`.
///
/// The translate is proportional to the pointer's offset from the
/// container center, so pointing at a corner pans that corner into
/// view, and is clamped so no edge uncovers the frame.
pub fn zoom_transform(pointer: Point, container: Size, scale: f64) -> Transform {
    let dx = pointer.x - container.width / 2.0;
    let dy = pointer.y - container.height / 2.0;

    Transform {
        translate_x: clamp_translate(-dx * (scale - 1.0), container.width, scale),
        translate_y: clamp_translate(-dy * (scale - 1.0), container.height, scale),
        scale,
    }
}

/// Zoom sub-state: orthogonal to the modal lifecycle, reset on close or
/// image change
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomState {
    pub mode: ZoomMode,
    pub transform: Transform,
    /// Finger distance at pinch start
    pinch_initial: Option<f64>,
}

impl ZoomState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desktop click: toggle between idle and the fixed zoom level
    pub fn toggle_pointer(&mut self, pointer: Point, container: Size, viewport_width: f64) {
        match self.mode {
            ZoomMode::Idle => {
                let scale = pointer_scale(viewport_width);
                self.transform = zoom_transform(pointer, container, scale);
                self.mode = ZoomMode::Zoomed;
            }
            ZoomMode::Zoomed => self.reset(),
        }
    }

    /// Two fingers down: remember the starting distance
    pub fn pinch_start(&mut self, distance: f64) {
        if distance > 0.0 {
            self.pinch_initial = Some(distance);
        }
    }

    /// Pinch update: scale from the distance ratio, centered on the
    /// gesture midpoint
    pub fn pinch_move(&mut self, distance: f64, midpoint: Point, container: Size) {
        let Some(initial) = self.pinch_initial else {
            return;
        };
        let scale = (distance / initial).clamp(PINCH_MIN_SCALE, PINCH_MAX_SCALE);
        self.transform = zoom_transform(midpoint, container, scale);
        self.mode = if scale > PINCH_MIN_SCALE {
            ZoomMode::Zoomed
        } else {
            ZoomMode::Idle
        };
    }

    /// Fingers lifted: the reached scale stays, the gesture ends
    pub fn pinch_end(&mut self) {
        self.pinch_initial = None;
    }

    /// Back to idle (modal close or image change)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_center_pointer_no_translate() {
        let t = zoom_transform(Point { x: 400.0, y: 300.0 }, CONTAINER, 2.0);
        assert_eq!(t.translate_x, 0.0);
        assert_eq!(t.translate_y, 0.0);
        assert_eq!(t.scale, 2.0);
    }

    #[test]
    fn test_corner_pointer_hits_clamp() {
        let t = zoom_transform(Point { x: 0.0, y: 0.0 }, CONTAINER, 2.0);
        // Max pan at 2x: half the container in each axis
        assert_eq!(t.translate_x, 400.0);
        assert_eq!(t.translate_y, 300.0);
    }

    #[test]
    fn test_translate_never_uncovers_frame() {
        // For any pointer inside the bounds, the scaled image's edge must
        // not retreat past the container's edge.
        let scale = 2.0;
        for px in [0.0, 123.0, 400.0, 777.0, 800.0] {
            for py in [0.0, 55.5, 300.0, 600.0] {
                let t = zoom_transform(Point { x: px, y: py }, CONTAINER, scale);
                let max_x = CONTAINER.width * (scale - 1.0) / 2.0;
                let max_y = CONTAINER.height * (scale - 1.0) / 2.0;
                assert!(t.translate_x.abs() <= max_x, "x pan {} exceeds {}", t.translate_x, max_x);
                assert!(t.translate_y.abs() <= max_y, "y pan {} exceeds {}", t.translate_y, max_y);
            }
        }
    }

    #[test]
    fn test_pointer_toggle_round_trip() {
        let mut zoom = ZoomState::new();
        zoom.toggle_pointer(Point { x: 100.0, y: 100.0 }, CONTAINER, 1024.0);
        assert_eq!(zoom.mode, ZoomMode::Zoomed);
        assert_eq!(zoom.transform.scale, POINTER_ZOOM_SCALE);

        zoom.toggle_pointer(Point { x: 100.0, y: 100.0 }, CONTAINER, 1024.0);
        assert_eq!(zoom.mode, ZoomMode::Idle);
        assert_eq!(zoom.transform, Transform::default());
    }

    #[test]
    fn test_narrow_viewport_reduces_scale() {
        let mut zoom = ZoomState::new();
        zoom.toggle_pointer(Point { x: 100.0, y: 100.0 }, CONTAINER, 480.0);
        assert_eq!(zoom.transform.scale, NARROW_POINTER_ZOOM_SCALE);
    }

    #[test]
    fn test_pinch_scale_clamped() {
        let mut zoom = ZoomState::new();
        zoom.pinch_start(100.0);

        zoom.pinch_move(500.0, Point { x: 400.0, y: 300.0 }, CONTAINER);
        assert_eq!(zoom.transform.scale, PINCH_MAX_SCALE);

        zoom.pinch_move(50.0, Point { x: 400.0, y: 300.0 }, CONTAINER);
        assert_eq!(zoom.transform.scale, PINCH_MIN_SCALE);
        assert_eq!(zoom.mode, ZoomMode::Idle);
    }

    #[test]
    fn test_pinch_without_start_is_ignored() {
        let mut zoom = ZoomState::new();
        zoom.pinch_move(200.0, Point { x: 0.0, y: 0.0 }, CONTAINER);
        assert_eq!(zoom.transform, Transform::default());
    }
}
