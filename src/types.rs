use cgmath::Vector3;

pub type Float = f64;
pub type Vec3 = Vector3<Float>;

pub const EPSILON: Float = Float::EPSILON * 512.0;

pub fn is_finite(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
