//! Pan/zoom transform between screen pixels (relative to the canvas
//! container) and virtual canvas units.
//!
//! `screen = virtual * scale + translate`.  Zoom never touches `translate`, so
//! zooming scales about the transform origin rather than the cursor.

use crate::constants::{MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_SENSITIVITY, ZOOM_STEP};
use crate::models::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportTransform {
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn screen_to_virtual(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }

    pub fn virtual_to_screen(&self, virtual_point: Point) -> Point {
        Point::new(
            virtual_point.x * self.scale + self.translate_x,
            virtual_point.y * self.scale + self.translate_y,
        )
    }

    /// Converts a screen-space movement into the virtual distance it covers
    /// at the current zoom.
    pub fn screen_delta_to_virtual(&self, delta: Point) -> Point {
        Point::new(delta.x / self.scale, delta.y / self.scale)
    }

    /// Pan deltas stay in screen space so the canvas tracks the cursor 1:1 at
    /// any zoom level.
    pub fn apply_pan(&mut self, delta_screen: Point) {
        if !delta_screen.is_finite() {
            return;
        }
        self.translate_x += delta_screen.x;
        self.translate_y += delta_screen.y;
    }

    /// Wheel zoom: positive `wheel_delta` (scrolling down) zooms out.
    pub fn apply_zoom(&mut self, wheel_delta: f64) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.set_scale(self.scale - wheel_delta * WHEEL_ZOOM_SENSITIVITY);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Virtual point under the centre of a container of the given size.
    pub fn visible_center(&self, viewport_width: f64, viewport_height: f64) -> Point {
        self.screen_to_virtual(Point::new(viewport_width / 2.0, viewport_height / 2.0))
    }

    fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn identity_maps_points_to_themselves() {
        let t = ViewportTransform::identity();
        assert_eq!(t.screen_to_virtual(Point::new(12.0, -4.0)), Point::new(12.0, -4.0));
    }

    #[test]
    fn virtual_is_screen_minus_translate_over_scale() {
        let t = ViewportTransform { translate_x: 100.0, translate_y: 50.0, scale: 2.0 };
        assert_eq!(t.screen_to_virtual(Point::new(300.0, 250.0)), Point::new(100.0, 100.0));
    }

    #[test]
    fn pan_is_not_divided_by_scale() {
        let mut t = ViewportTransform { translate_x: 0.0, translate_y: 0.0, scale: 2.5 };
        t.apply_pan(Point::new(10.0, -5.0));
        assert_eq!((t.translate_x, t.translate_y), (10.0, -5.0));
    }

    #[test]
    fn wheel_zoom_keeps_translate() {
        let mut t = ViewportTransform { translate_x: 40.0, translate_y: 30.0, scale: 1.0 };
        t.apply_zoom(-100.0);
        assert!(approx(t.scale, 1.1));
        assert_eq!((t.translate_x, t.translate_y), (40.0, 30.0));
    }

    #[test]
    fn zoom_buttons_step_and_clamp() {
        let mut t = ViewportTransform::identity();
        t.zoom_in();
        assert!(approx(t.scale, 1.2));
        for _ in 0..20 {
            t.zoom_in();
        }
        assert_eq!(t.scale, MAX_SCALE);
        for _ in 0..40 {
            t.zoom_out();
        }
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn reset_restores_identity() {
        let mut t = ViewportTransform { translate_x: 9.0, translate_y: 8.0, scale: 0.4 };
        t.reset();
        assert_eq!(t, ViewportTransform::identity());
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut t = ViewportTransform::identity();
        t.apply_zoom(f64::NAN);
        t.apply_pan(Point::new(f64::INFINITY, 1.0));
        assert_eq!(t, ViewportTransform::identity());
    }

    #[test]
    fn visible_center_accounts_for_pan_and_zoom() {
        let t = ViewportTransform { translate_x: -200.0, translate_y: 0.0, scale: 2.0 };
        assert_eq!(t.visible_center(800.0, 600.0), Point::new(300.0, 150.0));
    }

    proptest! {
        #[test]
        fn screen_to_virtual_inverts_forward_mapping(
            tx in -5_000.0f64..5_000.0,
            ty in -5_000.0f64..5_000.0,
            scale in 0.1f64..3.0,
            x in -10_000.0f64..10_000.0,
            y in -10_000.0f64..10_000.0,
        ) {
            let t = ViewportTransform { translate_x: tx, translate_y: ty, scale };
            let p = Point::new(x, y);
            let back = t.virtual_to_screen(t.screen_to_virtual(p));
            prop_assert!((back.x - p.x).abs() < 1e-6);
            prop_assert!((back.y - p.y).abs() < 1e-6);
        }

        #[test]
        fn repeated_zoom_stays_in_range(deltas in prop::collection::vec(-5_000.0f64..5_000.0, 1..64)) {
            let mut t = ViewportTransform::identity();
            for d in deltas {
                t.apply_zoom(d);
                prop_assert!(t.scale >= MIN_SCALE && t.scale <= MAX_SCALE);
            }
        }
    }
}
