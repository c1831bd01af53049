pub mod facet;
pub mod disc;
pub mod plane;
pub mod spheroid;
pub mod ellipsoid;
pub mod cylinder;

pub use facet::Facet;
pub use disc::Disc;
pub use plane::Plane;
pub use spheroid::Spheroid;
pub use ellipsoid::Ellipsoid;
pub use cylinder::{Cylinder, CylinderOptions};

use cgmath::InnerSpace as _;
use serde::Serialize;

use crate::{error::PrimitiveError, types::{is_finite, Float, Vec3}};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Facet(Facet),
    Disc(Disc),
    Plane(Plane),
    Spheroid(Spheroid),
    Ellipsoid(Ellipsoid),
    Cylinder(Cylinder),
}

/// A leaf of the scene graph.
///
/// `material` is copied from the enclosing container when the primitive is
/// built; later `usemtl` lines do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub material: Option<String>,
}

impl Primitive {
    pub fn new(shape: impl Into<Shape>, material: Option<String>) -> Self {
        Self { shape: shape.into(), material }
    }

    pub fn kind(&self) -> &'static str {
        match self.shape {
            Shape::Facet(_) => "facet",
            Shape::Disc(_) => "disc",
            Shape::Plane(_) => "plane",
            Shape::Spheroid(_) => "spheroid",
            Shape::Ellipsoid(_) => "ellipsoid",
            Shape::Cylinder(_) => "cylinder",
        }
    }
}

macro_rules! impl_into_shape {
    ($($name:ident),*) => {
        $(impl From<$name> for Shape {
            fn from(value: $name) -> Self {
                Shape::$name(value)
            }
        })*
    };
}

impl_into_shape!(Facet, Disc, Plane, Spheroid, Ellipsoid, Cylinder);

fn check_point(p: &Vec3) -> Result<(), PrimitiveError> {
    if is_finite(p) { Ok(()) } else { Err(PrimitiveError::NonFinite) }
}

fn check_radius(r: Float) -> Result<Float, PrimitiveError> {
    if r.is_finite() && r > 0.0 { Ok(r) } else { Err(PrimitiveError::NonPositiveRadius(r)) }
}

/// Normalizes `direction`. Only an exactly zero vector is rejected; the
/// largest component is divided out first so tiny and huge vectors survive.
fn unit(direction: &Vec3) -> Result<Vec3, PrimitiveError> {
    check_point(direction)?;
    let scale = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());
    if scale == 0.0 {
        return Err(PrimitiveError::ZeroDirection);
    }
    let scaled = direction / scale;
    Ok(scaled / scaled.magnitude())
}
