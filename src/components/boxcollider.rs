use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned collider relative to an entity's [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Centre of the collider in world space.
    pub fn center(&self, position: Vector2) -> Vector2 {
        let (min, max) = self.aabb(position);
        Vector2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(Vector2::new(0.0, 0.0), &b, Vector2::new(10.0, 0.0)));
        assert!(a.overlaps(Vector2::new(0.0, 0.0), &b, Vector2::new(9.0, 9.0)));
    }

    #[test]
    fn negative_size_is_normalized() {
        let c = BoxCollider::new(-10.0, -20.0);
        let (min, max) = c.aabb(Vector2::new(100.0, 100.0));
        assert_eq!((min.x, min.y), (90.0, 80.0));
        assert_eq!((max.x, max.y), (100.0, 100.0));
    }

    #[test]
    fn center_and_draw_rect_follow_the_position() {
        let c = BoxCollider::new(128.0, 64.0);
        let center = c.center(Vector2::new(136.0, 236.0));
        assert_eq!((center.x, center.y), (200.0, 268.0));
        assert_eq!(c.get_aabb(Vector2::new(5.0, 5.0)), (5.0, 5.0, 128.0, 64.0));
    }
}
