// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive chunk decoding
//!
//! Every primitive body starts with the same preamble (kind, transform, local
//! bounds) followed by a kind-specific payload. Facet groups are stored in the
//! store's arenas; all other payloads are plain values.

use crate::scanner::Scanner;
use rev_model::{
    BBox3, BoxShape, CircularTorus, Contour, Cylinder, EllipticalDish, FacetGroup, Line, Mat3x4,
    ParseError, Polygon, Primitive, PrimitiveKind, Pyramid, RectangularTorus, Result, Snout,
    SphericalDish, Store,
};

/// Smallest text form of one count: a digit and a separator
const MIN_COUNT_BYTES: usize = 2;
/// Smallest text form of one vertex: six one-digit floats with separators
const MIN_VERTEX_BYTES: usize = 12;

/// Fields shared by every primitive chunk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preamble {
    pub kind: u32,
    pub transform: Mat3x4,
    pub bbox_local: BBox3,
}

/// Read kind code, 3x4 matrix rows and local bounds
pub fn read_preamble(scanner: &mut Scanner<'_>) -> Result<Preamble> {
    let kind = scanner.read_u32("primitive kind")?;
    scanner.finish_line();

    let mut rows = [[0.0; 4]; 3];
    for row in &mut rows {
        *row = scanner.read_record::<4>("primitive matrix row")?;
    }

    let bounds = scanner.read_record::<6>("primitive bounding box")?;

    Ok(Preamble {
        kind,
        transform: Mat3x4::from_rows(rows),
        bbox_local: BBox3::from_array(bounds),
    })
}

/// Decode the payload for kind `code`
pub fn decode_primitive(code: u32, scanner: &mut Scanner<'_>, store: &mut Store) -> Result<Primitive> {
    let kind = PrimitiveKind::from_code(code).ok_or(ParseError::UnknownPrimitiveKind(code))?;
    log::trace!("decoding {kind} at line {}", scanner.line_number());

    let primitive = match kind {
        PrimitiveKind::Pyramid => {
            let [bx, by, tx, ty] = scanner.read_record::<4>("Pyramid bottom/top")?;
            let [ox, oy, height] = scanner.read_record::<3>("Pyramid offset/height")?;
            Primitive::Pyramid(Pyramid {
                bottom: [bx, by],
                top: [tx, ty],
                offset: [ox, oy],
                height,
            })
        }
        PrimitiveKind::Box => Primitive::Box(BoxShape {
            lengths: scanner.read_record::<3>("Box lengths")?,
        }),
        PrimitiveKind::RectangularTorus => {
            let [inner_radius, outer_radius, height, angle] =
                scanner.read_record::<4>("RectangularTorus")?;
            Primitive::RectangularTorus(RectangularTorus {
                inner_radius,
                outer_radius,
                height,
                angle,
            })
        }
        PrimitiveKind::CircularTorus => {
            let [offset, radius, angle] = scanner.read_record::<3>("CircularTorus")?;
            Primitive::CircularTorus(CircularTorus {
                offset,
                radius,
                angle,
            })
        }
        PrimitiveKind::EllipticalDish => {
            let [base_radius, height] = scanner.read_record::<2>("EllipticalDish")?;
            Primitive::EllipticalDish(EllipticalDish {
                base_radius,
                height,
            })
        }
        PrimitiveKind::SphericalDish => {
            let [base_radius, height] = scanner.read_record::<2>("SphericalDish")?;
            Primitive::SphericalDish(SphericalDish {
                base_radius,
                height,
            })
        }
        PrimitiveKind::Snout => {
            let [radius_b, radius_t, height, ox, oy] = scanner.read_record::<5>("Snout")?;
            let [bx, by, tx, ty] = scanner.read_record::<4>("Snout shear")?;
            Primitive::Snout(Snout {
                radius_b,
                radius_t,
                height,
                offset: [ox, oy],
                bshear: [bx, by],
                tshear: [tx, ty],
            })
        }
        PrimitiveKind::Cylinder => {
            let [radius, height] = scanner.read_record::<2>("Cylinder")?;
            Primitive::Cylinder(Cylinder { radius, height })
        }
        PrimitiveKind::Sphere => return Err(ParseError::SphereUnsupported),
        PrimitiveKind::Line => {
            let [a, b] = scanner.read_record::<2>("Line")?;
            Primitive::Line(Line { a, b })
        }
        PrimitiveKind::FacetGroup => Primitive::FacetGroup(decode_facet_group(scanner, store)?),
    };
    Ok(primitive)
}

/// Read a count and reject it if the rest of the buffer cannot hold that many items
fn read_count(
    scanner: &mut Scanner<'_>,
    context: &'static str,
    min_item_bytes: usize,
) -> Result<usize> {
    let n = scanner.read_u32(context)? as usize;
    scanner.finish_line();
    // the last item may end the buffer without a separator
    let needed = n.saturating_mul(min_item_bytes).saturating_sub(1);
    if needed > scanner.remaining().len() {
        return Err(ParseError::grammar(format!(
            "{context} {n} exceeds remaining input at line {}",
            scanner.line_number()
        )));
    }
    Ok(n)
}

fn decode_facet_group(scanner: &mut Scanner<'_>, store: &mut Store) -> Result<FacetGroup> {
    let polygons_n = read_count(scanner, "FacetGroup polygon count", MIN_COUNT_BYTES)?;
    let polygons = store.alloc_polygons(polygons_n);

    for pi in 0..polygons_n {
        let contours_n = read_count(scanner, "FacetGroup contour count", MIN_COUNT_BYTES)?;
        let contours = store.alloc_contours(contours_n);

        for ci in 0..contours_n {
            let contour = decode_contour(scanner, store)?;
            if let Some(slot) = store.contours_mut(contours).get_mut(ci) {
                *slot = contour;
            }
        }

        if let Some(slot) = store.polygons_mut(polygons).get_mut(pi) {
            *slot = Polygon { contours };
        }
    }

    Ok(FacetGroup { polygons })
}

fn decode_contour(scanner: &mut Scanner<'_>, store: &mut Store) -> Result<Contour> {
    let vertices_n = read_count(scanner, "FacetGroup vertex count", MIN_VERTEX_BYTES)?;
    let data = store.alloc_floats(vertices_n * 6);

    for vertex in store.floats_mut(data).chunks_exact_mut(6) {
        let position = scanner.read_record::<3>("FacetGroup vertex")?;
        let normal = scanner.read_record::<3>("FacetGroup normal")?;
        vertex[..3].copy_from_slice(&position);
        vertex[3..].copy_from_slice(&normal);
    }

    Ok(Contour {
        vertices_n: vertices_n as u32,
        data,
    })
}
