// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry nodes and primitive payloads
//!
//! A [`Geometry`] is one transformed primitive. Its payload is a closed sum
//! type, [`Primitive`]; faceted payloads point into the store's arenas through
//! [`Span`] handles and are read back with the store's facet accessors.

use crate::{transform_bbox, BBox3, Mat3x4, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification carried by the chunk that introduced the geometry
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GeometryClass {
    /// `PRIM`
    Primitive,
    /// `OBST`
    Obstruction,
    /// `INSU`
    Insulation,
}

/// Primitive kind codes as written in the text form
///
/// `Sphere` is a valid code but has no [`Primitive`] variant: producers never
/// write it in text and readers reject it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u32)]
pub enum PrimitiveKind {
    Pyramid = 1,
    Box = 2,
    RectangularTorus = 3,
    CircularTorus = 4,
    EllipticalDish = 5,
    SphericalDish = 6,
    Snout = 7,
    Cylinder = 8,
    Sphere = 9,
    Line = 10,
    FacetGroup = 11,
}

impl PrimitiveKind {
    /// Map a numeric code to a kind
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            1 => PrimitiveKind::Pyramid,
            2 => PrimitiveKind::Box,
            3 => PrimitiveKind::RectangularTorus,
            4 => PrimitiveKind::CircularTorus,
            5 => PrimitiveKind::EllipticalDish,
            6 => PrimitiveKind::SphericalDish,
            7 => PrimitiveKind::Snout,
            8 => PrimitiveKind::Cylinder,
            9 => PrimitiveKind::Sphere,
            10 => PrimitiveKind::Line,
            11 => PrimitiveKind::FacetGroup,
            _ => return None,
        })
    }

    /// Numeric code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Pyramid => "Pyramid",
            PrimitiveKind::Box => "Box",
            PrimitiveKind::RectangularTorus => "RectangularTorus",
            PrimitiveKind::CircularTorus => "CircularTorus",
            PrimitiveKind::EllipticalDish => "EllipticalDish",
            PrimitiveKind::SphericalDish => "SphericalDish",
            PrimitiveKind::Snout => "Snout",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Line => "Line",
            PrimitiveKind::FacetGroup => "FacetGroup",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pyramid {
    pub bottom: [f32; 2],
    pub top: [f32; 2],
    pub offset: [f32; 2],
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxShape {
    pub lengths: [f32; 3],
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectangularTorus {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub height: f32,
    pub angle: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CircularTorus {
    pub offset: f32,
    pub radius: f32,
    pub angle: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EllipticalDish {
    pub base_radius: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalDish {
    pub base_radius: f32,
    pub height: f32,
}

/// Truncated, possibly offset and sheared cone
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Snout {
    pub radius_b: f32,
    pub radius_t: f32,
    pub height: f32,
    pub offset: [f32; 2],
    pub bshear: [f32; 2],
    pub tshear: [f32; 2],
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub height: f32,
}

/// Segment from `a` to `b` along the local x axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Line {
    pub a: f32,
    pub b: f32,
}

/// One closed loop of a polygon
///
/// `data` holds `vertices_n` records of six floats: position xyz then normal xyz.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contour {
    pub vertices_n: u32,
    pub data: Span<f32>,
}

/// Polygon made of an outer contour and optional holes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polygon {
    pub contours: Span<Contour>,
}

/// Arbitrary faceted mesh
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FacetGroup {
    pub polygons: Span<Polygon>,
}

/// Decoded primitive payload
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Pyramid(Pyramid),
    Box(BoxShape),
    RectangularTorus(RectangularTorus),
    CircularTorus(CircularTorus),
    EllipticalDish(EllipticalDish),
    SphericalDish(SphericalDish),
    Snout(Snout),
    Cylinder(Cylinder),
    Line(Line),
    FacetGroup(FacetGroup),
}

impl Primitive {
    /// Kind code of this payload
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Pyramid(_) => PrimitiveKind::Pyramid,
            Primitive::Box(_) => PrimitiveKind::Box,
            Primitive::RectangularTorus(_) => PrimitiveKind::RectangularTorus,
            Primitive::CircularTorus(_) => PrimitiveKind::CircularTorus,
            Primitive::EllipticalDish(_) => PrimitiveKind::EllipticalDish,
            Primitive::SphericalDish(_) => PrimitiveKind::SphericalDish,
            Primitive::Snout(_) => PrimitiveKind::Snout,
            Primitive::Cylinder(_) => PrimitiveKind::Cylinder,
            Primitive::Line(_) => PrimitiveKind::Line,
            Primitive::FacetGroup(_) => PrimitiveKind::FacetGroup,
        }
    }
}

/// A transformed primitive leaf
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Sequential id in document order
    pub id: u32,
    pub class: GeometryClass,
    /// Inherited from the enclosing group
    pub transparency: u8,
    /// Packed 0xRRGGBB, assigned downstream
    pub color: u32,
    pub transform: Mat3x4,
    pub bbox_local: BBox3,
    bbox_world: BBox3,
    pub primitive: Primitive,
}

impl Geometry {
    pub(crate) fn new(
        id: u32,
        class: GeometryClass,
        transparency: u8,
        transform: Mat3x4,
        bbox_local: BBox3,
        primitive: Primitive,
    ) -> Self {
        Self {
            id,
            class,
            transparency,
            color: 0,
            transform,
            bbox_local,
            bbox_world: transform_bbox(&transform, &bbox_local),
            primitive,
        }
    }

    /// World-space bounds, derived from the local box and the transform
    pub fn bbox_world(&self) -> BBox3 {
        self.bbox_world
    }

    /// Kind of the payload
    pub fn kind(&self) -> PrimitiveKind {
        self.primitive.kind()
    }

    /// Key grouping geometries that share color and transparency
    pub fn color_key(&self) -> u32 {
        (self.color << 8) | u32::from(self.transparency)
    }

    /// Map a local-space point to world space
    pub fn local_to_world(&self, p: [f32; 3]) -> [f32; 3] {
        self.transform.transform_point(p)
    }

    /// World-space endpoints of a line primitive
    pub fn line_endpoints_world(&self) -> Option<([f32; 3], [f32; 3])> {
        match self.primitive {
            Primitive::Line(line) => Some((
                self.local_to_world([line.a, 0.0, 0.0]),
                self.local_to_world([line.b, 0.0, 0.0]),
            )),
            _ => None,
        }
    }
}
