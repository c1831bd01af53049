use cgmath::InnerSpace as _;
use serde::Serialize;

use crate::{error::PrimitiveError, types::{Float, Vec3, EPSILON}};

use super::{check_point, unit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
    pub area: Float,
}

impl Facet {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Result<Self, PrimitiveError> {
        for p in [&a, &b, &c] {
            check_point(p)?;
        }
        let ba = b - a;
        let ca = c - a;
        let sized_normal = ba.cross(ca);
        let double_area = sized_normal.magnitude();
        // sine of the angle between the edges
        if double_area <= EPSILON * ba.magnitude() * ca.magnitude() {
            return Err(PrimitiveError::DegenerateFacet);
        }
        Ok(Self { vertices: [a, b, c], normal: unit(&sized_normal)?, area: double_area / 2.0 })
    }
}
