use std::fmt;

/// A point in the plane. Identity inside a tour is the city's index in the
/// problem's city list, so two cities may share coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.x), b2.format(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::City;

    #[test]
    fn dist_uses_euclidean_metric() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((a.dist(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dist_is_symmetric_and_zero_for_same_point() {
        let a = City::new(12.5, -3.25);
        let b = City::new(-40.0, 7.75);

        assert!((a.dist(&b) - b.dist(&a)).abs() < 1e-12);
        assert_eq!(a.dist(&a), 0.0);
    }

    #[test]
    fn coincident_cities_have_zero_distance() {
        let a = City::new(5.0, 5.0);
        let b = City::new(5.0, 5.0);
        assert_eq!(a.dist(&b), 0.0);
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        assert!(City::new(0.0, 100.0).is_valid());
        assert!(!City::new(f64::NAN, 0.0).is_valid());
        assert!(!City::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn display_formats_as_x_y() {
        let city = City::new(1.5, -2.25);
        assert_eq!(city.to_string(), "1.5,-2.25");
    }
}
