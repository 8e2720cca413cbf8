//! Back-to-front draw order for a cubic voxel grid.
//!
//! Instead of sorting voxels by distance, one traversal is chosen per frame:
//! the axis most aligned with the camera becomes the outer ("slice") loop, the
//! next the middle ("row") loop, the last the inner ("unit") loop. Each axis
//! runs toward the camera, so far voxels land in low instance slots. The
//! result is exact for an axis-aligned view and approximate otherwise, at
//! O(volume) per frame.

use log::trace;

use crate::vector::Vec3f;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn component(self, v: Vec3f) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Traversal nesting level an axis is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Unit = 0,
    Row = 1,
    Slice = 2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RolePolicy {
    /// Fixed comparison tree that tests |z| against |y| first. Ties resolve
    /// differently from a plain sort when z dominates and |x| == |y|.
    #[default]
    Legacy,
    /// Stable descending sort of |x|, |y|, |z|; ties prefer x, then y.
    Ranked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRoles {
    pub slice: Axis,
    pub row: Axis,
    pub unit: Axis,
}

impl AxisRoles {
    pub fn from_eye(eye: Vec3f, policy: RolePolicy) -> Self {
        match policy {
            RolePolicy::Legacy => Self::legacy(eye),
            RolePolicy::Ranked => Self::ranked(eye),
        }
    }

    pub fn legacy(eye: Vec3f) -> Self {
        let Vec3f { x, y, z } = eye.abs();
        let (slice, row, unit) = if z > y {
            if z > x {
                if x > y {
                    (Axis::Z, Axis::X, Axis::Y)
                } else {
                    (Axis::Z, Axis::Y, Axis::X)
                }
            } else {
                (Axis::X, Axis::Z, Axis::Y)
            }
        } else if y > x {
            if z > x {
                (Axis::Y, Axis::Z, Axis::X)
            } else {
                (Axis::Y, Axis::X, Axis::Z)
            }
        } else {
            (Axis::X, Axis::Y, Axis::Z)
        };
        AxisRoles { slice, row, unit }
    }

    pub fn ranked(eye: Vec3f) -> Self {
        let magnitude = eye.abs();
        let mut axes = [Axis::X, Axis::Y, Axis::Z];
        axes.sort_by(|a, b| b.component(magnitude).total_cmp(&a.component(magnitude)));
        AxisRoles {
            slice: axes[0],
            row: axes[1],
            unit: axes[2],
        }
    }

    pub fn role_of(&self, axis: Axis) -> Role {
        if axis == self.slice {
            Role::Slice
        } else if axis == self.row {
            Role::Row
        } else {
            debug_assert_eq!(axis, self.unit);
            Role::Unit
        }
    }

    pub fn is_bijection(&self) -> bool {
        self.slice != self.row && self.row != self.unit && self.slice != self.unit
    }
}

/// Per-axis mapping from traversal index to grid coordinate.
#[derive(Clone, Copy, Debug)]
struct AxisWalk {
    role: Role,
    ascending: bool,
}

impl AxisWalk {
    fn new(axis: Axis, roles: &AxisRoles, eye: Vec3f) -> Self {
        AxisWalk {
            role: roles.role_of(axis),
            // The origin counts as positive on every axis.
            ascending: axis.component(eye) >= 0.0,
        }
    }

    fn coordinate(&self, indices: &[u32; 3], grid_length: u32) -> u32 {
        let index = indices[self.role as usize];
        if self.ascending {
            index
        } else {
            grid_length - 1 - index
        }
    }
}

/// Fills `permutation` so that `permutation[slot]` is the linear index
/// (`z * length^2 + y * length + x`) of the voxel drawn at instance `slot`.
pub fn order_into(eye: Vec3f, grid_length: u32, policy: RolePolicy, permutation: &mut Vec<u32>) {
    permutation.clear();
    if grid_length == 0 {
        return;
    }

    let roles = AxisRoles::from_eye(eye, policy);
    debug_assert!(roles.is_bijection());

    let walk_x = AxisWalk::new(Axis::X, &roles, eye);
    let walk_y = AxisWalk::new(Axis::Y, &roles, eye);
    let walk_z = AxisWalk::new(Axis::Z, &roles, eye);

    let area = grid_length * grid_length;
    let volume = area * grid_length;
    permutation.reserve(volume as usize);

    for i in 0..volume {
        let indices = [i % grid_length, (i % area) / grid_length, i / area];

        let x = walk_x.coordinate(&indices, grid_length);
        let y = walk_y.coordinate(&indices, grid_length);
        let z = walk_z.coordinate(&indices, grid_length);

        permutation.push(z * area + y * grid_length + x);
    }
}

pub fn order(eye: Vec3f, grid_length: u32) -> Vec<u32> {
    let mut permutation = Vec::new();
    order_into(eye, grid_length, RolePolicy::Legacy, &mut permutation);
    permutation
}

/// Instance-to-voxel map rebuilt every frame; keeps its allocation between frames.
#[derive(Clone, Debug, Default)]
pub struct VisibilityOrdering {
    policy: RolePolicy,
    permutation: Vec<u32>,
    last_roles: Option<AxisRoles>,
}

impl VisibilityOrdering {
    pub fn new(policy: RolePolicy) -> Self {
        VisibilityOrdering {
            policy,
            permutation: Vec::new(),
            last_roles: None,
        }
    }

    pub fn recompute(&mut self, eye: Vec3f, grid_length: u32) -> &[u32] {
        let roles = AxisRoles::from_eye(eye, self.policy);
        if self.last_roles != Some(roles) {
            trace!(
                "voxel traversal: slice {:?}, row {:?}, unit {:?} (eye {:?})",
                roles.slice,
                roles.row,
                roles.unit,
                eye
            );
            self.last_roles = Some(roles);
        }
        order_into(eye, grid_length, self.policy, &mut self.permutation);
        &self.permutation
    }

    pub fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.permutation)
    }
}
