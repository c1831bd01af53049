use serde::Serialize;

use crate::{error::PrimitiveError, types::{Float, Vec3}};

use super::{check_point, check_radius};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spheroid {
    pub centre: Vec3,
    pub radius: Float,
}

impl Spheroid {
    pub fn new(centre: Vec3, radius: Float) -> Result<Self, PrimitiveError> {
        check_point(&centre)?;
        Ok(Self { centre, radius: check_radius(radius)? })
    }
}

#[cfg(test)]
mod test {
    use cgmath::vec3;

    use crate::error::PrimitiveError;

    use super::Spheroid;

    #[test]
    fn zero_radius() {
        assert_eq!(Spheroid::new(vec3(0.0, 0.0, 0.0), 0.0).unwrap_err(), PrimitiveError::NonPositiveRadius(0.0));
    }

    #[test]
    fn infinite_radius() {
        assert!(Spheroid::new(vec3(0.0, 0.0, 0.0), f64::INFINITY).is_err());
    }
}
