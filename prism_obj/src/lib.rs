use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use prism::prelude::*;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read the file: {0}")]
    CouldNotOpenFile(#[from] std::io::Error),

    #[error(transparent)]
    RayTracer(#[from] RayTracerError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing vertex at index {0}")]
    MissingVertex(usize),

    #[error("missing normal at index {0}")]
    MissingNormal(usize),
}

pub type Result<T> = std::result::Result<T, ParserError>;

/// The outcome of parsing an OBJ document.
///
/// All triangles end up under `default_group`, either directly or through
/// a named group. The default group is left detached in the arena, so the
/// caller can transform it and attach it wherever it belongs.
#[derive(Debug, Clone)]
pub struct ParsedObj {
    pub ignored_lines: u32,
    pub default_group: ShapeId,
    pub vertices: Vec<Point>,
    pub normals: Vec<Vector>,
    groups: HashMap<String, ShapeId>,
}

impl ParsedObj {
    pub fn get_group(&self, group_name: &str) -> Option<ShapeId> {
        self.groups.get(group_name).copied()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

/// One `v/vt/vn` reference from a face record, as 0-based indices.
struct FaceVertex {
    vertex: usize,
    normal: Option<usize>,
}

fn parse_coordinates(tokens: &[&str], line_no: usize) -> Result<Option<(f64, f64, f64)>> {
    let (Some(x), Some(y), Some(z)) = (tokens.get(1), tokens.get(2), tokens.get(3)) else {
        return Ok(None);
    };

    let parse = |value: &str| {
        value.parse::<f64>().map_err(|_| {
            ParserError::InvalidInput(format!("Invalid coordinate on line {line_no}: {value}"))
        })
    };
    Ok(Some((parse(x)?, parse(y)?, parse(z)?)))
}

/// OBJ indices are 1-based; 0 and anything unparseable are rejected.
fn parse_index(value: &str, line_no: usize) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index - 1),
        _ => Err(ParserError::InvalidInput(format!(
            "Invalid index for face record on line {line_no}: {value}"
        ))),
    }
}

fn parse_face_vertex(token: &str, line_no: usize) -> Result<FaceVertex> {
    let mut parts = token.split('/');
    let vertex = parse_index(parts.next().unwrap_or_default(), line_no)?;
    // the texture index is skipped
    let normal = match parts.nth(1) {
        Some(normal) if !normal.is_empty() => Some(parse_index(normal, line_no)?),
        _ => None,
    };
    Ok(FaceVertex { vertex, normal })
}

/// Something the default group receives, in the order the file introduces it.
enum Entry {
    Triangle(ShapeKind),
    Group(usize),
}

/// A named group and the triangles of every face listed under it.
struct NamedGroup {
    name: String,
    triangles: Vec<ShapeKind>,
}

/// Collects the whole document as plain data; nothing reaches a
/// `ShapeArena` until every line has parsed.
#[derive(Default)]
struct ObjParser {
    vertices: Vec<Point>,
    normals: Vec<Vector>,
    entries: Vec<Entry>,
    groups: Vec<NamedGroup>,
    current_group: Option<usize>,
    ignored_lines: u32,
}

impl ObjParser {
    fn parse_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let Some(&keyword) = tokens.first() else {
            return Ok(());
        };

        match keyword {
            "v" | "vn" => match parse_coordinates(&tokens, line_no)? {
                Some((x, y, z)) if keyword == "v" => self.vertices.push(Point::new(x, y, z)),
                Some((x, y, z)) => self.normals.push(Vector::new(x, y, z)),
                None => {
                    warn!("Malformed {keyword} record on line {line_no}, skipping it");
                    self.ignored_lines += 1;
                }
            },
            "f" => self.parse_face(&tokens[1..], line_no)?,
            "g" => {
                let name = tokens.get(1).ok_or_else(|| {
                    ParserError::InvalidInput(format!(
                        "Malformed named group record on line {line_no}: missing group name"
                    ))
                })?;
                self.switch_group(name);
            }
            _ => self.ignored_lines += 1,
        }
        Ok(())
    }

    /// Makes `name` the group that receives the following faces,
    /// creating it under the default group the first time it's seen.
    fn switch_group(&mut self, name: &str) {
        if let Some(index) = self.groups.iter().position(|group| group.name == name) {
            self.current_group = Some(index);
            return;
        }

        self.groups.push(NamedGroup {
            name: name.to_string(),
            triangles: vec![],
        });
        let index = self.groups.len() - 1;
        self.entries.push(Entry::Group(index));
        self.current_group = Some(index);
        debug!("started group {name}");
    }

    fn parse_face(&mut self, tokens: &[&str], line_no: usize) -> Result<()> {
        if tokens.len() < 3 {
            return Err(ParserError::InvalidInput(format!(
                "Face record on line {line_no} needs at least three vertices"
            )));
        }

        let mut points = vec![];
        let mut normals = vec![];
        for token in tokens {
            let face_vertex = parse_face_vertex(token, line_no)?;
            let point = self
                .vertices
                .get(face_vertex.vertex)
                .ok_or(ParserError::MissingVertex(face_vertex.vertex + 1))?;
            points.push(*point);

            if let Some(index) = face_vertex.normal {
                let normal = self
                    .normals
                    .get(index)
                    .ok_or(ParserError::MissingNormal(index + 1))?;
                normals.push(*normal);
            }
        }

        // only smooth when every vertex of the face carries a normal
        let smooth = normals.len() == points.len();

        // fan triangulation around the first vertex
        for index in 1..points.len() - 1 {
            let (p1, p2, p3) = (points[0], points[index], points[index + 1]);
            let kind: ShapeKind = if smooth {
                SmoothTriangle::new(p1, p2, p3, normals[0], normals[index], normals[index + 1])
                    .into()
            } else {
                Triangle::new(p1, p2, p3).into()
            };

            match self.current_group {
                Some(group) => self.groups[group].triangles.push(kind),
                None => self.entries.push(Entry::Triangle(kind)),
            }
        }
        Ok(())
    }

    /// Moves the parsed shapes into the arena under a new, detached default group.
    fn commit(self, shapes: &mut ShapeArena, material: Material) -> Result<ParsedObj> {
        let shape = |kind: ShapeKind| Shape::new(kind).with_material(material.clone());
        let group = || Shape::group().with_material(material.clone());

        let default_group = shapes.insert(group());
        let mut groups = self.groups.into_iter().map(Some).collect::<Vec<_>>();
        let mut group_ids = HashMap::new();

        for entry in self.entries {
            match entry {
                Entry::Triangle(kind) => {
                    let triangle = shapes.insert(shape(kind));
                    shapes.add_child(default_group, triangle)?;
                }
                Entry::Group(index) => {
                    let Some(named) = groups[index].take() else {
                        continue;
                    };
                    let id = shapes.insert(group());
                    shapes.add_child(default_group, id)?;
                    for kind in named.triangles {
                        let triangle = shapes.insert(shape(kind));
                        shapes.add_child(id, triangle)?;
                    }
                    group_ids.insert(named.name, id);
                }
            }
        }

        Ok(ParsedObj {
            ignored_lines: self.ignored_lines,
            default_group,
            vertices: self.vertices,
            normals: self.normals,
            groups: group_ids,
        })
    }
}

/// Parses OBJ text, adding a triangle shape to `shapes` for each face.
/// Every triangle gets `material`, or the default material if None.
///
/// `shapes` is only modified when the whole input parses.
pub fn parse_obj_string(
    input: &str,
    shapes: &mut ShapeArena,
    material: Option<Material>,
) -> Result<ParsedObj> {
    let mut parser = ObjParser::default();
    for (n, line) in input.lines().enumerate() {
        parser.parse_line(line, n + 1)?;
    }

    let parsed = parser.commit(shapes, material.unwrap_or_default())?;
    debug!(
        "parsed {} vertices, {} normals and {} groups; ignored {} lines",
        parsed.vertices.len(),
        parsed.normals.len(),
        parsed.groups.len(),
        parsed.ignored_lines
    );
    Ok(parsed)
}

pub fn parse_obj_file(
    path: impl AsRef<Path>,
    shapes: &mut ShapeArena,
    material: Option<Material>,
) -> Result<ParsedObj> {
    let buffer = fs::read_to_string(path)?;
    parse_obj_string(&buffer, shapes, material)
}
