/// Parser for the vertex/face subset of the Wavefront `.obj` format
use log::{debug, trace};
use nom::{
    bytes::complete::is_not,
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    multi::separated_list0,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{GeometryError, Result};
use crate::geometry::Triangle;
use crate::validate;
use crate::vector::Vector3;

/// File extension accepted by [`crate::Mesh::load_object_file`].
pub const EXTENSION: &str = "obj";

/// The `index`-th field of `line` split on `separator`.
///
/// Runs of the separator count as one, and leading separators are skipped.
pub fn field(line: &str, separator: char, index: usize) -> Option<&str> {
    line.split(separator).filter(|part| !part.is_empty()).nth(index)
}

/// Parse `.obj` source into triangles.
///
/// Only `v` and `f` records are read; every other record is skipped. Faces
/// must be triangles and may only reference vertices declared above them.
pub fn parse_obj(source: &str) -> Result<Vec<Triangle>> {
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let tokens = tokens(line);
        let Some((&marker, fields)) = tokens.split_first() else {
            continue;
        };

        // Markers match whole tokens, so `vn` and `vt` are not vertex records
        match marker {
            "v" => vertices.push(parse_vertex(fields).map_err(|e| e.at_line(number + 1))?),
            "f" => triangles.push(parse_face(fields, &vertices).map_err(|e| e.at_line(number + 1))?),
            other => trace!("skipping `{other}` record on line {}", number + 1),
        }
    }

    debug!(
        "parsed {} vertices and {} triangles",
        vertices.len(),
        triangles.len()
    );
    Ok(triangles)
}

fn tokens(line: &str) -> Vec<&str> {
    let parsed: IResult<&str, Vec<&str>> =
        preceded(space0, separated_list0(space1, is_not(" \t\r")))(line);
    parsed.map(|(_, tokens)| tokens).unwrap_or_default()
}

fn first_three<'a>(fields: &[&'a str]) -> Result<[&'a str; 3]> {
    match fields {
        [a, b, c, ..] => Ok([*a, *b, *c]),
        _ => Err(GeometryError::Length {
            expected: 3,
            found: fields.len(),
        }),
    }
}

fn parse_vertex(fields: &[&str]) -> Result<Vector3> {
    let [x, y, z] = first_three(fields)?;
    Ok(Vector3::xyz(coordinate(x)?, coordinate(y)?, coordinate(z)?))
}

fn coordinate(token: &str) -> Result<f64> {
    let parsed: IResult<&str, f64> = all_consuming(double)(token);
    match parsed {
        Ok((_, value)) => validate::check_number(value),
        Err(_) => Err(GeometryError::type_error(format!(
            "`{token}` is not a number"
        ))),
    }
}

fn parse_face(fields: &[&str], vertices: &[Vector3]) -> Result<Triangle> {
    let [a, b, c] = first_three(fields)?;
    Ok(Triangle::new(
        vertex_at(a, vertices)?,
        vertex_at(b, vertices)?,
        vertex_at(c, vertices)?,
    ))
}

/// Resolve a face token such as `12`, `12/4` or `12/4/7` to its vertex.
fn vertex_at(token: &str, vertices: &[Vector3]) -> Result<Vector3> {
    let position = if token.starts_with('/') {
        None
    } else {
        field(token, '/', 0)
    };
    let index = position
        .and_then(|position| face_index(position).ok())
        .map(|(_, index)| index)
        .ok_or_else(|| GeometryError::type_error(format!("`{token}` is not a vertex index")))?;

    // 1-based
    match index.checked_sub(1) {
        Some(i) if i < vertices.len() => Ok(vertices[i]),
        _ => Err(GeometryError::Index {
            index,
            len: vertices.len(),
        }),
    }
}

fn face_index(input: &str) -> IResult<&str, usize> {
    all_consuming(map_res(digit1, str::parse::<usize>))(input)
}
