// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie / donut angle layout.
//!
//! Angles are in degrees, measured counter-clockwise from the positive x axis with y pointing
//! up (so 90 is straight up). [`PieArc::screen_start`] and [`PieArc::screen_sweep`] convert to
//! radians in y-down screen space, as expected by `kurbo::Circle::segment`.

extern crate alloc;

use alloc::vec::Vec;

use tracing::warn;

/// Angular layout of a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    /// Angle of the first slice's leading edge.
    pub start_angle: f64,
    /// Angle the last slice ends at.
    pub end_angle: f64,
}

impl Default for PieLayout {
    /// A half circle over the top, from 180 down to 0.
    fn default() -> Self {
        Self::new(180.0, 0.0)
    }
}

impl PieLayout {
    /// A layout sweeping from `start_angle` to `end_angle` (at most one full turn).
    pub fn new(start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
        }
    }

    /// Signed sweep, clamped to one full turn.
    pub fn sweep(&self) -> f64 {
        let delta = self.end_angle - self.start_angle;
        delta.signum() * delta.abs().min(360.0)
    }

    /// One arc per value, in input order, each spanning an angle proportional to its share.
    ///
    /// Values that are negative or not finite count as `0`. When all values are `0` every arc
    /// is empty.
    pub fn arcs(&self, values: &[f64]) -> Vec<PieArc> {
        let values: Vec<f64> = values
            .iter()
            .map(|v| {
                if v.is_finite() && *v >= 0.0 {
                    *v
                } else {
                    warn!("pie value {v} counted as 0");
                    0.0
                }
            })
            .collect();
        let total: f64 = values.iter().sum();
        let sweep = self.sweep();

        let mut angle = self.start_angle;
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let percent = if total > 0.0 { value / total } else { 0.0 };
                let end = angle + percent * sweep;
                let arc = PieArc {
                    index,
                    value,
                    percent,
                    start_angle: angle,
                    end_angle: end,
                };
                angle = end;
                arc
            })
            .collect()
    }
}

/// One slice of a [`PieLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieArc {
    /// Position of the value in the input.
    pub index: usize,
    /// The (sanitized) value.
    pub value: f64,
    /// Share of the total, in `[0, 1]`.
    pub percent: f64,
    /// Leading edge, degrees.
    pub start_angle: f64,
    /// Trailing edge, degrees.
    pub end_angle: f64,
}

impl PieArc {
    /// Bisecting angle, degrees.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Leading edge in y-down radians.
    pub fn screen_start(&self) -> f64 {
        -self.start_angle.to_radians()
    }

    /// Signed sweep in y-down radians.
    pub fn screen_sweep(&self) -> f64 {
        -(self.end_angle - self.start_angle).to_radians()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn half_circle_is_split_by_share() {
        let arcs = PieLayout::default().arcs(&[1.0, 3.0]);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].start_angle, 180.0);
        assert_eq!(arcs[0].end_angle, 135.0);
        assert_eq!(arcs[1].start_angle, 135.0);
        assert_eq!(arcs[1].end_angle, 0.0);
        assert_eq!(arcs[1].percent, 0.75);
        assert_eq!(arcs[0].mid_angle(), 157.5);
    }

    #[test]
    fn sweep_matches_configuration() {
        let layout = PieLayout::new(0.0, 360.0);
        let arcs = layout.arcs(&[2.0, 5.0, 1.0, 4.0]);
        let swept: f64 = arcs.iter().map(|a| a.end_angle - a.start_angle).sum();
        assert!((swept - 360.0).abs() < 1e-9);
        assert_eq!(PieLayout::new(0.0, 720.0).sweep(), 360.0);
        assert_eq!(PieLayout::default().sweep(), -180.0);
    }

    #[test]
    fn invalid_and_zero_values() {
        let arcs = PieLayout::default().arcs(&[f64::NAN, -1.0, 0.0]);
        assert!(arcs.iter().all(|a| a.percent == 0.0));
        assert!(arcs.iter().all(|a| a.start_angle == 180.0 && a.end_angle == 180.0));
    }

    #[test]
    fn screen_angles_flip_orientation() {
        let arcs = PieLayout::default().arcs(&[1.0]);
        let arc = arcs[0];
        assert!((arc.screen_start() + core::f64::consts::PI).abs() < 1e-12);
        assert!((arc.screen_sweep() - core::f64::consts::PI).abs() < 1e-12);
    }
}
