//! Ball vs. platform contact
//!
//! A contact needs two independent conditions:
//! - the vertical gate: the ball has dropped to the platform's contact height
//! - horizontal overlap: the ball's X/Z extents overlap the box's X/Z extents
//!
//! Neither alone is enough. A ball beside the platform passes the gate on its
//! way down, and a ball above the platform overlaps horizontally all the time.

use glam::Vec3;

use super::state::{Ball, Platform};

/// Vertical gate: `ball.y + radius <= platform.y - size.y`
#[inline]
pub fn reached_contact_height(ball: &Ball, platform: &Platform) -> bool {
    ball.pos.y + ball.radius() <= platform.contact_height()
}

/// Sphere vs. box overlap on the X and Z axes only (edges touching count)
pub fn horizontal_overlap(
    ball_pos: Vec3,
    ball_radius: f32,
    platform_pos: Vec3,
    platform_size: Vec3,
) -> bool {
    let half = platform_size / 2.0;

    let overlap_x = ball_pos.x + ball_radius >= platform_pos.x - half.x
        && ball_pos.x - ball_radius <= platform_pos.x + half.x;
    let overlap_z = ball_pos.z + ball_radius >= platform_pos.z - half.z
        && ball_pos.z - ball_radius <= platform_pos.z + half.z;

    overlap_x && overlap_z
}

/// Full contact test: vertical gate first, then horizontal overlap
pub fn ball_platform_contact(ball: &Ball, platform: &Platform) -> bool {
    reached_contact_height(ball, platform)
        && horizontal_overlap(ball.pos, ball.radius(), platform.pos, platform.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec3 = Vec3::new(4.0, 0.2, 4.0);

    #[test]
    fn test_overlap_centered() {
        let center = Vec3::new(0.0, -1.0, 0.0);
        assert!(horizontal_overlap(center, 0.5, center, SIZE));
        // Smallest box that still has half-extents of 0.5
        assert!(horizontal_overlap(center, 0.5, center, Vec3::new(1.0, 0.2, 1.0)));
    }

    #[test]
    fn test_overlap_edges() {
        let platform = Vec3::new(0.0, -1.0, 0.0);
        let limit = platform.x + SIZE.x / 2.0 + 0.5;

        // Exactly touching still counts
        assert!(horizontal_overlap(Vec3::new(limit, 0.0, 0.0), 0.5, platform, SIZE));
        // Past the edge on X
        assert!(!horizontal_overlap(Vec3::new(limit + 0.01, 0.0, 0.0), 0.5, platform, SIZE));
        // Past the edge on -Z
        assert!(!horizontal_overlap(Vec3::new(0.0, 0.0, -limit - 0.01), 0.5, platform, SIZE));
    }

    #[test]
    fn test_overlap_offset_platform() {
        let platform = Vec3::new(-5.5, -1.0, -5.5);
        assert!(!horizontal_overlap(Vec3::ZERO, 0.5, platform, SIZE));
        assert!(horizontal_overlap(Vec3::new(-4.0, 0.0, -4.0), 0.5, platform, SIZE));
    }

    #[test]
    fn test_vertical_gate() {
        let platform = Platform::default();
        // Contact height is -1.2, so the ball center must be at or below -1.7
        let mut ball = Ball::new(Vec3::new(0.0, -1.69, 0.0), 0.0, 0.5);
        assert!(!reached_contact_height(&ball, &platform));
        ball.pos.y = -1.7;
        assert!(reached_contact_height(&ball, &platform));
    }

    #[test]
    fn test_contact_needs_both_conditions() {
        let platform = Platform::default();

        // High above the platform: overlap but no gate
        let above = Ball::new(Vec3::new(0.0, 2.0, 0.0), 0.0, 0.5);
        assert!(!ball_platform_contact(&above, &platform));

        // Low enough but off to the side: gate but no overlap
        let beside = Ball::new(Vec3::new(10.0, -2.0, 0.0), 0.0, 0.5);
        assert!(!ball_platform_contact(&beside, &platform));

        let on_top = Ball::new(Vec3::new(1.0, -1.8, -1.0), 0.0, 0.5);
        assert!(ball_platform_contact(&on_top, &platform));
    }
}
