use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vec4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Sphere laid out as four consecutive floats, center first.
#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Sphere {
    pub center: Vec3f,
    pub radius: f32,
}

macro_rules! impl_elementwise {
    ($name:ident { $($field:ident),+ }) => {
        impl $name {
            pub const ZERO: Self = Self { $($field: 0.0),+ };

            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            pub fn splat(v: f32) -> Self {
                Self { $($field: v),+ }
            }

            /// Componentwise product.
            pub fn pair_mult(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }

            pub fn dot(self, rhs: Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            pub fn length(self) -> f32 {
                self.dot(self).sqrt()
            }

            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }
        }

        impl core::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl core::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl core::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl core::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl core::ops::Mul<f32> for $name {
            type Output = Self;

            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        /// Componentwise division.
        impl core::ops::Div for $name {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

impl_elementwise!(Vec2f { x, y });
impl_elementwise!(Vec3f { x, y, z });
impl_elementwise!(Vec4f { x, y, z, w });

impl Vec3f {
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn extend(self, w: f32) -> Vec4f {
        Vec4f::new(self.x, self.y, self.z, w)
    }
}

impl Vec4f {
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn truncate(self) -> Vec3f {
        Vec3f::new(self.x, self.y, self.z)
    }
}

impl From<Vec3f> for cgmath::Point3<f32> {
    fn from(v: Vec3f) -> Self {
        cgmath::Point3::new(v.x, v.y, v.z)
    }
}

impl From<cgmath::Vector3<f32>> for Vec3f {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Vec3f::new(v.x, v.y, v.z)
    }
}

impl Sphere {
    pub const fn new(center: Vec3f, radius: f32) -> Self {
        Sphere { center, radius }
    }

    pub fn contains(&self, point: Vec3f) -> bool {
        (point - self.center).length() <= self.radius
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.center.x, self.center.y, self.center.z, self.radius]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_ops() {
        let a = Vec3f::new(1.0, 2.0, 3.0);
        let b = Vec3f::new(4.0, -2.0, 0.5);
        assert_eq!(a + b, Vec3f::new(5.0, 0.0, 3.5));
        assert_eq!(a - b, Vec3f::new(-3.0, 4.0, 2.5));
        assert_eq!(a * 2.0, Vec3f::new(2.0, 4.0, 6.0));
        assert_eq!(a.pair_mult(b), Vec3f::new(4.0, -4.0, 1.5));
        assert_eq!(a / Vec3f::new(1.0, 4.0, 2.0), Vec3f::new(1.0, 0.5, 1.5));
        assert_eq!(-Vec2f::new(1.0, -1.0), Vec2f::new(-1.0, 1.0));
    }

    #[test]
    fn dot_and_cross() {
        let x = Vec3f::new(1.0, 0.0, 0.0);
        let y = Vec3f::new(0.0, 1.0, 0.0);
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.cross(y), Vec3f::new(0.0, 0.0, 1.0));
        assert_eq!(Vec4f::new(1.0, 2.0, 3.0, 4.0).dot(Vec4f::splat(1.0)), 10.0);
        assert_eq!(Vec2f::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn sphere_is_four_packed_floats() {
        assert_eq!(std::mem::size_of::<Sphere>(), 16);
        let s = Sphere::new(Vec3f::new(0.0, 0.0, -3.0), 1.0);
        assert_eq!(bytemuck::cast::<Sphere, [f32; 4]>(s), [0.0, 0.0, -3.0, 1.0]);
        assert!(s.contains(Vec3f::new(0.0, 0.5, -3.0)));
        assert!(!s.contains(Vec3f::ZERO));
    }
}
