use glam::DVec3;

/// Axis-aligned box with inclusive bounds, `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        let delta = DVec3::new(dx, dy, dz);
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Grow toward the signed direction of each component, never shrinking.
    pub fn extend(self, dx: f64, dy: f64, dz: f64) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        if dx < 0.0 {
            min.x += dx;
        } else {
            max.x += dx;
        }
        if dy < 0.0 {
            min.y += dy;
        } else {
            max.y += dy;
        }
        if dz < 0.0 {
            min.z += dz;
        } else {
            max.z += dz;
        }
        Self { min, max }
    }

    /// Shrink symmetrically by the given amount per axis.
    pub fn contract(self, x: f64, y: f64, z: f64) -> Self {
        let delta = DVec3::new(x, y, z);
        Self {
            min: self.min + delta,
            max: self.max - delta,
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Largest same-sign portion of `dx` that `other` can sweep along X
    /// without entering `self`. `dx` comes back unchanged when the boxes
    /// cannot meet on this axis.
    pub fn compute_offset_x(&self, other: &Self, mut dx: f64) -> f64 {
        if other.max.y > self.min.y
            && other.min.y < self.max.y
            && other.max.z > self.min.z
            && other.min.z < self.max.z
        {
            if dx > 0.0 && other.max.x <= self.min.x {
                dx = dx.min(self.min.x - other.max.x);
            } else if dx < 0.0 && other.min.x >= self.max.x {
                dx = dx.max(self.max.x - other.min.x);
            }
        }
        dx
    }

    pub fn compute_offset_y(&self, other: &Self, mut dy: f64) -> f64 {
        if other.max.x > self.min.x
            && other.min.x < self.max.x
            && other.max.z > self.min.z
            && other.min.z < self.max.z
        {
            if dy > 0.0 && other.max.y <= self.min.y {
                dy = dy.min(self.min.y - other.max.y);
            } else if dy < 0.0 && other.min.y >= self.max.y {
                dy = dy.max(self.max.y - other.min.y);
            }
        }
        dy
    }

    pub fn compute_offset_z(&self, other: &Self, mut dz: f64) -> f64 {
        if other.max.x > self.min.x
            && other.min.x < self.max.x
            && other.max.y > self.min.y
            && other.min.y < self.max.y
        {
            if dz > 0.0 && other.max.z <= self.min.z {
                dz = dz.min(self.min.z - other.max.z);
            } else if dz < 0.0 && other.min.z >= self.max.z {
                dz = dz.max(self.max.z - other.min.z);
            }
        }
        dz
    }
}
