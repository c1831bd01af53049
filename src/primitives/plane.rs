use serde::Serialize;

use crate::{error::PrimitiveError, types::Vec3};

use super::{check_point, unit};

/// Infinite plane through `point`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plane {
    pub normal: Vec3,
    pub point: Vec3,
}

impl Plane {
    pub fn new(normal: Vec3, point: Vec3) -> Result<Self, PrimitiveError> {
        check_point(&point)?;
        Ok(Self { normal: unit(&normal)?, point })
    }
}
