//! Focal point kinematics.
//!
//! Velocity is expressed in on-screen units per tick. Integration scales it
//! by `REFERENCE_ZOOM / zoom` so apparent speed does not depend on zoom, then
//! applies drag.

use glam::DVec2;

/// Zoom level at which one velocity unit moves one world unit.
pub const REFERENCE_ZOOM: f64 = 100.0;

/// World units per screen unit at `zoom`.
pub fn zoom_scale(zoom: f64) -> f64 {
    REFERENCE_ZOOM / zoom
}

/// Position and velocity of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FocalPoint {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl FocalPoint {
    /// Creates a resting focal point.
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
        }
    }

    /// Advances one tick: move by the zoom-scaled velocity, then apply drag.
    /// Returns the displacement.
    pub fn integrate(&mut self, zoom: f64, drag: f64) -> DVec2 {
        let step = self.velocity * zoom_scale(zoom);
        self.position += step;
        self.velocity *= drag;
        step
    }

    /// True when both velocity components are below `threshold`.
    pub fn is_stopped(&self, threshold: f64) -> bool {
        self.velocity.x.abs() < threshold && self.velocity.y.abs() < threshold
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Zeroes the velocity.
    pub fn halt(&mut self) {
        self.velocity = DVec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_then_drags() {
        let mut focal = FocalPoint::at(DVec2::new(10.0, 10.0));
        focal.velocity = DVec2::new(2.0, -1.0);
        let step = focal.integrate(100.0, 0.5);
        assert_eq!(step, DVec2::new(2.0, -1.0));
        assert_eq!(focal.position, DVec2::new(12.0, 9.0));
        assert_eq!(focal.velocity, DVec2::new(1.0, -0.5));
    }

    #[test]
    fn test_zoom_compensation() {
        let mut near = FocalPoint::default();
        let mut far = FocalPoint::default();
        near.velocity = DVec2::X;
        far.velocity = DVec2::X;
        near.integrate(50.0, 1.0);
        far.integrate(200.0, 1.0);
        assert_eq!(near.position.x, 2.0);
        assert_eq!(far.position.x, 0.5);
    }

    #[test]
    fn test_drag_brings_focal_to_rest() {
        let mut focal = FocalPoint::default();
        focal.velocity = DVec2::new(1.0, 1.0);
        let mut ticks = 0;
        while !focal.is_stopped(0.01) {
            focal.integrate(100.0, 0.95);
            ticks += 1;
        }
        // 0.95^90 ≈ 0.0099
        assert_eq!(ticks, 90);
    }

    #[test]
    fn test_stopped_uses_both_axes() {
        let mut focal = FocalPoint::default();
        focal.velocity = DVec2::new(0.009, -0.02);
        assert!(!focal.is_stopped(0.01));
        focal.velocity.y = -0.009;
        assert!(focal.is_stopped(0.01));
        focal.halt();
        assert_eq!(focal.speed(), 0.0);
    }
}
