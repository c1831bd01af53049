use serde::Serialize;

use crate::{error::PrimitiveError, types::{Float, Vec3}};

use super::{check_point, check_radius, unit};

/// Flat disc. `normal` is stored normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disc {
    pub centre: Vec3,
    pub normal: Vec3,
    pub radius: Float,
}

impl Disc {
    pub fn new(centre: Vec3, normal: Vec3, radius: Float) -> Result<Self, PrimitiveError> {
        check_point(&centre)?;
        Ok(Self { centre, normal: unit(&normal)?, radius: check_radius(radius)? })
    }
}
