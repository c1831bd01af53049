use serde::Serialize;

use crate::{error::PrimitiveError, types::Vec3};

use super::{check_point, check_radius};

/// Axis-aligned ellipsoid centred on `base`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ellipsoid {
    pub base: Vec3,
    pub radiuses: Vec3,
}

impl Ellipsoid {
    pub fn new(base: Vec3, radiuses: Vec3) -> Result<Self, PrimitiveError> {
        check_point(&base)?;
        for i in 0..3 {
            check_radius(radiuses[i])?;
        }
        Ok(Self { base, radiuses })
    }
}
