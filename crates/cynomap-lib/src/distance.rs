use crate::starmap::{System, SystemPosition};

/// Raw dataset units (metres) per light-year.
pub const UNITS_PER_LIGHT_YEAR: f64 = 9.46e15;

impl SystemPosition {
    /// Calculate the Euclidean distance to another position, in raw units.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Distance between two systems in light-years, using raw coordinates.
pub fn light_years_between(a: &System, b: &System) -> f64 {
    a.position.distance_to(&b.position) / UNITS_PER_LIGHT_YEAR
}
