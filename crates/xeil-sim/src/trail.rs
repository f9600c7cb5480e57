//! Fading trail behind the focal point.

use std::collections::VecDeque;

use glam::DVec2;
use xeil_config::TrailConfig;

use crate::motion::zoom_scale;

/// Opacity of a freshly laid trail point.
const TRAIL_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrailPoint {
    position: DVec2,
    time_ms: f64,
}

/// A trail point ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailMark {
    pub position: DVec2,
    /// In `(0, 0.3]`, fading linearly with age.
    pub opacity: f64,
}

/// Timestamped positions, oldest first.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    lifetime_ms: f64,
    min_spacing: f64,
}

impl Trail {
    pub fn new(config: &TrailConfig) -> Self {
        Self {
            points: VecDeque::new(),
            lifetime_ms: config.lifetime_ms,
            min_spacing: config.min_spacing,
        }
    }

    /// Lays a point if the focal point moved far enough on either axis since
    /// the last one, then expires points older than the lifetime.
    pub fn update(&mut self, position: DVec2, zoom: f64, now_ms: f64) {
        let spacing = self.min_spacing * zoom_scale(zoom);
        let moved = self.points.back().is_none_or(|last| {
            (position.x - last.position.x).abs() > spacing
                || (position.y - last.position.y).abs() > spacing
        });
        if moved {
            self.points.push_back(TrailPoint {
                position,
                time_ms: now_ms,
            });
        }

        while self
            .points
            .front()
            .is_some_and(|p| now_ms - p.time_ms > self.lifetime_ms)
        {
            self.points.pop_front();
        }
    }

    /// Visible points with their opacity at `now_ms`, oldest first.
    pub fn marks(&self, now_ms: f64) -> impl Iterator<Item = TrailMark> + '_ {
        self.points.iter().filter_map(move |p| {
            let age = (now_ms - p.time_ms) / self.lifetime_ms;
            let opacity = TRAIL_OPACITY * (1.0 - age);
            (opacity > 0.0).then_some(TrailMark {
                position: p.position,
                opacity,
            })
        })
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
