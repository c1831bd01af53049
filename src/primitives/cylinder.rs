use cgmath::InnerSpace as _;
use serde::Serialize;

use crate::{error::PrimitiveError, types::{Float, Vec3}};

use super::{check_point, check_radius, unit};

/// Per-command cylinder settings. Every `cyl`/`ccyl` line builds its own value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderOptions {
    pub radius: Float,
    pub caps: bool,
}

impl CylinderOptions {
    pub fn open(radius: Float) -> Self {
        Self { radius, caps: false }
    }

    pub fn capped(radius: Float) -> Self {
        Self { radius, caps: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cylinder {
    pub base: Vec3,
    pub tip: Vec3,
    pub radius: Float,
    pub caps: bool,
    #[serde(skip)]
    pub axis: Vec3,
    pub length: Float,
}

impl Cylinder {
    pub fn new(base: Vec3, tip: Vec3, options: CylinderOptions) -> Result<Self, PrimitiveError> {
        check_point(&base)?;
        check_point(&tip)?;
        let radius = check_radius(options.radius)?;
        let axis = unit(&(tip - base))?;
        Ok(Self { base, tip, radius, caps: options.caps, axis, length: (tip - base).magnitude() })
    }
}
