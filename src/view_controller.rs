use crate::error::{ChartError, Result};
use crate::scales::BaseScales;
use tracing::{debug, trace};

/// Zoom/pan state: `screen = base * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0, y: 0.0 };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.k + self.y
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomState {
    Idle,
    Zooming,
}

/// Owns the view transform and turns gestures into rescaled axes.
///
/// The base scales are never modified here; every update rescales from them.
#[derive(Clone, Debug)]
pub struct ZoomController {
    transform: Option<ViewTransform>,
    state: ZoomState,
    min_k: f64,
    max_k: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            transform: None,
            state: ZoomState::Idle,
            min_k: 0.5,
            max_k: 10.0,
        }
    }
}

impl ZoomController {
    pub fn new(scale_extent: (f64, f64)) -> Result<Self> {
        let (min_k, max_k) = scale_extent;
        if !(min_k > 0.0 && min_k <= 1.0 && max_k >= 1.0 && max_k.is_finite()) {
            return Err(ChartError::InvalidScaleExtent { min: min_k, max: max_k });
        }
        Ok(Self {
            min_k,
            max_k,
            ..Default::default()
        })
    }

    pub fn scale_extent(&self) -> (f64, f64) {
        (self.min_k, self.max_k)
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Current transform; identity until the first gesture.
    pub fn transform(&self) -> ViewTransform {
        self.transform.unwrap_or_default()
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    pub fn begin(&mut self) {
        if self.state == ZoomState::Idle {
            trace!("zoom gesture start");
        }
        self.state = ZoomState::Zooming;
        self.transform.get_or_insert(ViewTransform::IDENTITY);
    }

    pub fn end(&mut self) {
        if self.state == ZoomState::Zooming {
            trace!(transform = ?self.transform(), "zoom gesture end");
        }
        self.state = ZoomState::Idle;
    }

    fn clamp_k(&self, k: f64) -> f64 {
        let clamped = k.clamp(self.min_k, self.max_k);
        if clamped != k {
            debug!(requested = k, applied = clamped, "zoom clamped to scale extent");
        }
        clamped
    }

    /// Sets the scale factor, keeping the plot-space point `pivot` fixed on screen.
    pub fn zoom_to(&mut self, k: f64, pivot: (f64, f64)) {
        self.begin();
        let t = self.transform();
        let new_k = self.clamp_k(k);
        // Base-space point under the pivot stays under the pivot.
        let bx = t.invert_x(pivot.0);
        let by = t.invert_y(pivot.1);
        self.transform = Some(ViewTransform {
            k: new_k,
            x: pivot.0 - bx * new_k,
            y: pivot.1 - by * new_k,
        });
    }

    pub fn zoom_at(&mut self, factor: f64, pivot: (f64, f64)) {
        let k = self.transform().k * factor;
        self.zoom_to(k, pivot);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.begin();
        let t = self.transform();
        self.transform = Some(ViewTransform {
            x: t.x + dx,
            y: t.y + dy,
            ..t
        });
    }

    /// Jumps to an explicit transform (scale clamped).
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.begin();
        self.transform = Some(ViewTransform {
            k: self.clamp_k(transform.k),
            ..transform
        });
    }

    pub fn reset(&mut self) {
        if self.transform.is_some() {
            self.transform = Some(ViewTransform::IDENTITY);
        }
    }

    /// Drops the transform entirely, as on unmount.
    pub fn discard(&mut self) {
        self.transform = None;
        self.state = ZoomState::Idle;
    }

    pub fn rescaled(&self, base: &BaseScales) -> BaseScales {
        base.rescaled(&self.transform())
    }

    /// Converts a wheel delta (pixels, positive = scroll down) into a zoom factor.
    pub fn wheel_factor(delta_y: f32) -> f64 {
        2f64.powf(-(delta_y as f64) * 0.002)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine() {
        let mut zoom = ZoomController::default();
        assert_eq!(zoom.state(), ZoomState::Idle);
        assert!(!zoom.has_transform());
        zoom.pan_by(5.0, 0.0);
        assert_eq!(zoom.state(), ZoomState::Zooming);
        zoom.end();
        assert_eq!(zoom.state(), ZoomState::Idle);
        assert_eq!(zoom.transform().x, 5.0);
    }

    #[test]
    fn test_zoom_keeps_pivot_fixed() {
        let mut zoom = ZoomController::default();
        zoom.zoom_at(2.0, (100.0, 50.0));
        let t = zoom.transform();
        assert_eq!(t.apply_x(100.0), 100.0);
        assert_eq!(t.apply_y(50.0), 50.0);
        assert_eq!(t.k, 2.0);
    }

    #[test]
    fn test_scale_factor_is_clamped() {
        let mut zoom = ZoomController::default();
        zoom.zoom_to(50.0, (0.0, 0.0));
        assert_eq!(zoom.transform().k, 10.0);
        zoom.zoom_to(0.01, (0.0, 0.0));
        assert_eq!(zoom.transform().k, 0.5);
    }

    #[test]
    fn test_invalid_extent() {
        assert!(ZoomController::new((0.0, 10.0)).is_err());
        assert!(ZoomController::new((2.0, 10.0)).is_err());
        assert!(ZoomController::new((0.5, 10.0)).is_ok());
    }

    #[test]
    fn test_wheel_factor_direction() {
        assert!(ZoomController::wheel_factor(-100.0) > 1.0);
        assert!(ZoomController::wheel_factor(100.0) < 1.0);
        assert_eq!(ZoomController::wheel_factor(0.0), 1.0);
    }
}
