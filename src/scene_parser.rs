use std::{fs, io::BufRead, path::Path, str::{FromStr, SplitAsciiWhitespace}};

use cgmath::vec3;
use log::{debug, error, info, warn};

use crate::{
    command::Keyword,
    error::{LineError, LineReport, ParseError},
    options::ParseOptions,
    primitives::{Cylinder, CylinderOptions, Disc, Ellipsoid, Facet, Plane, Primitive, Shape, Spheroid},
    scene::{Container, ContainerId, Node, Scene, SceneGraph},
    types::{Float, Vec3},
};

/// Reads and parses the file at `path`.
pub fn load_scene(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Scene, ParseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
        error!("Unable to read wavefront file {}: {}", path.display(), source);
        ParseError::Io { path: path.to_path_buf(), source }
    })?;
    Ok(parse_str(&content, options))
}

pub fn parse_reader(mut reader: impl BufRead, options: &ParseOptions) -> Result<Scene, ParseError> {
    let mut content = String::new();
    if let Err(source) = reader.read_to_string(&mut content) {
        error!("Unable to read wavefront input: {}", source);
        return Err(source.into());
    }
    Ok(parse_str(&content, options))
}

pub fn parse_str(content: &str, options: &ParseOptions) -> Scene {
    let total = content.lines().count();
    let interval = options.progress_interval(total);

    let mut parser = SceneParser::new();
    for (i, line) in content.lines().enumerate() {
        if options.verbose && i % interval == 0 {
            info!(target: "scene_obj::progress", "{:.2}%", 100.0 * i as Float / total as Float);
        }
        let _ = parser.parse_line(line);
    }

    let scene = parser.finish();
    if options.verbose {
        info!(
            "Parsed {} lines: {} vertices, {} primitives, {} containers, {} bad lines",
            total,
            scene.vertices.len(),
            scene.primitive_count(),
            scene.graph.len(),
            scene.errors.len(),
        );
    }
    scene
}

/// Incremental builder: feed it lines, then call [`SceneParser::finish`].
#[derive(Debug)]
pub struct SceneParser {
    graph: SceneGraph,
    top: ContainerId,
    stack: Vec<ContainerId>,
    vertices: Vec<Vec3>,
    errors: Vec<LineReport>,
    line_number: usize,
}

impl SceneParser {
    pub fn new() -> Self {
        let graph = SceneGraph::new();
        let top = graph.root();
        Self { graph, top, stack: vec![], vertices: vec![], errors: vec![], line_number: 0 }
    }

    /// Interprets one line. A failure is logged and recorded, and leaves the
    /// parser exactly as it was before the line.
    pub fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        self.line_number += 1;
        let mut parts = line.split_ascii_whitespace();
        let Some(token) = parts.next() else { return Ok(()); };

        let result = token.parse::<Keyword>().and_then(|keyword| self.dispatch(keyword, Args::new(keyword, parts)));
        if let Err(err) = &result {
            warn!("could not interpret line {} `{}`: {}", self.line_number, line.trim(), err);
            self.errors.push(LineReport { line: self.line_number, text: line.to_string(), error: err.clone() });
        }
        result
    }

    pub fn active(&self) -> ContainerId {
        self.top
    }

    pub fn root(&self) -> ContainerId {
        self.graph.root()
    }

    /// Number of `!{` currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn errors(&self) -> &[LineReport] {
        &self.errors
    }

    pub fn finish(self) -> Scene {
        if !self.stack.is_empty() {
            warn!("{} container(s) still open at end of input", self.stack.len());
        }
        Scene { graph: self.graph, vertices: self.vertices, errors: self.errors, active: self.top }
    }

    fn dispatch(&mut self, keyword: Keyword, mut args: Args) -> Result<(), LineError> {
        match keyword {
            Keyword::Define          => self.define(),
            Keyword::OpenBox         => self.open_box(),
            Keyword::CloseBox        => self.close_box(),
            Keyword::UseMaterial     => self.use_material(&mut args),
            Keyword::MaterialLibrary => self.material_library(&mut args),
            Keyword::Clone           => Ok(()),
            Keyword::Group           => self.group(args),
            Keyword::Vertex          => self.vertex(&mut args),
            Keyword::Facet           => self.facet(&mut args),
            Keyword::Disk            => self.disk(&mut args),
            Keyword::Plane           => self.plane(&mut args),
            Keyword::Spheroid        => self.spheroid(&mut args),
            Keyword::Ellipsoid       => self.ellipsoid(&mut args),
            Keyword::Cylinder        => self.cylinder(&mut args, CylinderOptions::open),
            Keyword::CappedCylinder  => self.cylinder(&mut args, CylinderOptions::capped),
        }
    }

    fn top_mut(&mut self) -> &mut Container {
        &mut self.graph[self.top]
    }

    fn define(&mut self) -> Result<(), LineError> {
        self.top_mut().visible = false;
        Ok(())
    }

    fn open_box(&mut self) -> Result<(), LineError> {
        let child = self.graph.open_child(self.top);
        self.stack.push(self.top);
        self.top = child;
        debug!("line {}: opened container at depth {}", self.line_number, self.stack.len());
        Ok(())
    }

    fn close_box(&mut self) -> Result<(), LineError> {
        self.top = self.stack.pop().ok_or(LineError::UnmatchedClose)?;
        debug!("line {}: closed container, back to depth {}", self.line_number, self.stack.len());
        Ok(())
    }

    fn use_material(&mut self, args: &mut Args) -> Result<(), LineError> {
        let name = args.next_str()?.to_string();
        self.top_mut().material = Some(name);
        Ok(())
    }

    fn material_library(&mut self, args: &mut Args) -> Result<(), LineError> {
        let path = args.next_str()?.to_string();
        let root = self.graph.root();
        self.graph[root].material_file = Some(path);
        Ok(())
    }

    fn group(&mut self, args: Args) -> Result<(), LineError> {
        let name = args.rest().collect::<Vec<_>>().join(" ");
        self.top_mut().group_name = Some(name);
        Ok(())
    }

    fn vertex(&mut self, args: &mut Args) -> Result<(), LineError> {
        let point = args.next_vec3()?;
        self.vertices.push(point);
        Ok(())
    }

    fn facet(&mut self, args: &mut Args) -> Result<(), LineError> {
        let a = self.point(args.next_index()?)?;
        let b = self.point(args.next_index()?)?;
        let c = self.point(args.next_index()?)?;
        self.append(Facet::new(a, b, c)?)
    }

    fn disk(&mut self, args: &mut Args) -> Result<(), LineError> {
        let centre = self.point(args.next_index()?)?;
        let normal = self.point(args.next_index()?)?;
        let radius = args.next_float()?;
        self.append(Disc::new(centre, normal, radius)?)
    }

    fn plane(&mut self, args: &mut Args) -> Result<(), LineError> {
        let normal = self.point(args.next_index()?)?;
        let point = self.point(args.next_index()?)?;
        self.append(Plane::new(normal, point)?)
    }

    fn spheroid(&mut self, args: &mut Args) -> Result<(), LineError> {
        let centre = self.point(args.next_index()?)?;
        let radius = args.next_float()?;
        self.append(Spheroid::new(centre, radius)?)
    }

    fn ellipsoid(&mut self, args: &mut Args) -> Result<(), LineError> {
        let base = self.point(args.next_index()?)?;
        let radiuses = args.next_vec3()?;
        self.append(Ellipsoid::new(base, radiuses)?)
    }

    fn cylinder(&mut self, args: &mut Args, options: fn(Float) -> CylinderOptions) -> Result<(), LineError> {
        let base = self.point(args.next_index()?)?;
        let tip = self.point(args.next_index()?)?;
        let radius = args.next_float()?;
        self.append(Cylinder::new(base, tip, options(radius))?)
    }

    /// Looks up a vertex by its file index, counting negative indices back
    /// from the number of vertices read so far.
    fn point(&self, index: i64) -> Result<Vec3, LineError> {
        let resolved = resolve_index(index, self.vertices.len())?;
        Ok(self.vertices[resolved])
    }

    fn append(&mut self, shape: impl Into<Shape>) -> Result<(), LineError> {
        let top = self.top_mut();
        let primitive = Primitive::new(shape, top.material.clone());
        top.children.push(Node::Primitive(primitive));
        Ok(())
    }
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

pub fn resolve_index(index: i64, count: usize) -> Result<usize, LineError> {
    let count_signed = i64::try_from(count).unwrap_or(i64::MAX);
    let resolved = if index < 0 { index + count_signed } else { index };
    if resolved < 0 || resolved >= count_signed {
        return Err(LineError::VertexOutOfRange { index, resolved, count });
    }
    Ok(resolved as usize)
}

/// Arguments following the keyword.
struct Args<'a> {
    keyword: Keyword,
    parts: SplitAsciiWhitespace<'a>,
    position: usize,
}

impl<'a> Args<'a> {
    fn new(keyword: Keyword, parts: SplitAsciiWhitespace<'a>) -> Self {
        Self { keyword, parts, position: 0 }
    }

    fn next_str(&mut self) -> Result<&'a str, LineError> {
        self.position += 1;
        self.parts.next().ok_or(LineError::MissingArgument { command: self.keyword.as_str(), position: self.position })
    }

    fn next_float(&mut self) -> Result<Float, LineError> {
        let token = self.next_str()?;
        parse(token, LineError::InvalidNumber)
    }

    fn next_index(&mut self) -> Result<i64, LineError> {
        let token = self.next_str()?;
        parse(token, LineError::InvalidInteger)
    }

    fn next_vec3(&mut self) -> Result<Vec3, LineError> {
        Ok(vec3(self.next_float()?, self.next_float()?, self.next_float()?))
    }

    fn rest(self) -> SplitAsciiWhitespace<'a> {
        self.parts
    }
}

fn parse<T: FromStr>(token: &str, err: fn(String) -> LineError) -> Result<T, LineError> {
    token.parse().map_err(|_| err(token.to_string()))
}

#[cfg(test)]
mod test {
    use cgmath::vec3;

    use crate::{error::{LineError, PrimitiveError}, primitives::Shape, scene::Node};

    use super::{resolve_index, SceneParser};

    fn feed(parser: &mut SceneParser, input: &str) {
        for line in input.lines() {
            let _ = parser.parse_line(line);
        }
    }

    fn with_vertices(n: usize) -> SceneParser {
        let mut parser = SceneParser::new();
        for i in 0..n {
            parser.parse_line(&format!("v {i} 0 0")).unwrap();
        }
        parser
    }

    #[test]
    fn resolve_positive_and_negative() {
        assert_eq!(resolve_index(0, 3), Ok(0));
        assert_eq!(resolve_index(2, 3), Ok(2));
        assert_eq!(resolve_index(-1, 3), Ok(2));
        assert_eq!(resolve_index(-3, 3), Ok(0));
        assert_eq!(resolve_index(3, 3), Err(LineError::VertexOutOfRange { index: 3, resolved: 3, count: 3 }));
        assert_eq!(resolve_index(-4, 3), Err(LineError::VertexOutOfRange { index: -4, resolved: -1, count: 3 }));
        assert!(resolve_index(0, 0).is_err());
        assert!(resolve_index(i64::MIN, 3).is_err());
    }

    #[test]
    fn vertex_count_tracks_successful_lines() {
        let mut parser = SceneParser::new();
        assert!(parser.parse_line("v 1 2 3").is_ok());
        assert_eq!(parser.parse_line("v 1 2"), Err(LineError::MissingArgument { command: "v", position: 3 }));
        assert_eq!(parser.parse_line("v 1 x 3"), Err(LineError::InvalidNumber("x".into())));
        assert!(parser.parse_line("v -1.5 2e3 0").is_ok());
        assert_eq!(parser.vertices(), &[vec3(1.0, 2.0, 3.0), vec3(-1.5, 2000.0, 0.0)]);
        assert_eq!(parser.errors().len(), 2);
        assert_eq!(parser.errors()[0].line, 2);
        assert_eq!(parser.errors()[1].line, 3);
    }

    #[test]
    fn negative_index_uses_count_at_that_line() {
        let mut parser = with_vertices(3);
        parser.parse_line("sph -1 1.0").unwrap();
        parser.parse_line("v 9 9 9").unwrap();
        parser.parse_line("sph -1 1.0").unwrap();

        let root = &parser.graph()[parser.root()];
        let centres: Vec<_> = root.primitives().map(|p| match &p.shape {
            Shape::Spheroid(s) => s.centre,
            other => panic!("unexpected {other:?}"),
        }).collect();
        assert_eq!(centres, vec![vec3(2.0, 0.0, 0.0), vec3(9.0, 9.0, 9.0)]);
    }

    #[test]
    fn facet_mixes_absolute_and_relative_indices() {
        let mut parser = SceneParser::new();
        feed(&mut parser, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 -2 -1");
        let root = &parser.graph()[parser.root()];
        let Some(Node::Primitive(primitive)) = root.children.first() else { panic!("no facet") };
        let Shape::Facet(facet) = &primitive.shape else { panic!("not a facet") };
        assert_eq!(facet.vertices, [vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)]);
    }

    #[test]
    fn out_of_range_index_appends_nothing() {
        let mut parser = with_vertices(2);
        assert!(matches!(parser.parse_line("f 0 1 2"), Err(LineError::VertexOutOfRange { .. })));
        assert!(matches!(parser.parse_line("sph -3 1"), Err(LineError::VertexOutOfRange { .. })));
        assert_eq!(parser.parse_line("sph 1.5 1"), Err(LineError::InvalidInteger("1.5".into())));
        assert!(parser.graph()[parser.root()].children.is_empty());
    }

    #[test]
    fn material_is_snapshot_at_construction() {
        let mut parser = with_vertices(1);
        feed(&mut parser, "sph 0 1\nusemtl leaf\nsph 0 1\nusemtl bark\nsph 0 1");
        let materials: Vec<_> = parser.graph()[parser.root()].primitives().map(|p| p.material.clone()).collect();
        assert_eq!(materials, vec![None, Some("leaf".into()), Some("bark".into())]);
    }

    #[test]
    fn child_container_does_not_inherit_attributes() {
        let mut parser = with_vertices(1);
        feed(&mut parser, "usemtl red\ng outer\n!{\nsph 0 1");
        let child = &parser.graph()[parser.active()];
        assert_eq!(child.material, None);
        assert_eq!(child.group_name, None);
        assert_eq!(child.primitives().next().map(|p| p.material.clone()), Some(None));
        assert_eq!(parser.graph()[parser.root()].material.as_deref(), Some("red"));
    }

    #[test]
    fn container_stack() {
        let mut parser = SceneParser::new();
        let root = parser.active();
        parser.parse_line("!{").unwrap();
        let outer = parser.active();
        parser.parse_line("!{").unwrap();
        assert_eq!(parser.depth(), 2);
        parser.parse_line("!}").unwrap();
        assert_eq!(parser.active(), outer);
        parser.parse_line("!}").unwrap();
        assert_eq!(parser.active(), root);
        assert_eq!(parser.parse_line("!}"), Err(LineError::UnmatchedClose));
        assert_eq!(parser.active(), root);
        assert_eq!(parser.depth(), 0);
    }

    #[test]
    fn trailing_open_stays_open() {
        let mut parser = SceneParser::new();
        feed(&mut parser, "!{\n!{\n!}");
        assert_eq!(parser.depth(), 1);
        let scene = parser.finish();
        assert_ne!(scene.active, scene.graph.root());
        assert!(scene.errors.is_empty());
    }

    #[test]
    fn attribute_commands() {
        let mut parser = SceneParser::new();
        feed(&mut parser, "!{\nmtllib scene.mtl\ng  tree   number 7\n#define\nclone");
        let active = &parser.graph()[parser.active()];
        assert_eq!(active.group_name.as_deref(), Some("tree number 7"));
        assert!(!active.visible);
        assert_eq!(active.material_file, None);

        let root = &parser.graph()[parser.root()];
        assert_eq!(root.material_file.as_deref(), Some("scene.mtl"));
        assert!(root.visible);
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn bare_group_sets_empty_name() {
        let mut parser = SceneParser::new();
        parser.parse_line("g").unwrap();
        assert_eq!(parser.graph()[parser.root()].group_name.as_deref(), Some(""));
    }

    #[test]
    fn usemtl_without_name() {
        let mut parser = SceneParser::new();
        parser.parse_line("usemtl a").unwrap();
        assert_eq!(parser.parse_line("usemtl"), Err(LineError::MissingArgument { command: "usemtl", position: 1 }));
        assert_eq!(parser.graph()[parser.root()].material.as_deref(), Some("a"));
    }

    #[test]
    fn unknown_and_blank_lines() {
        let mut parser = SceneParser::new();
        assert!(parser.parse_line("").is_ok());
        assert!(parser.parse_line("   \t ").is_ok());
        assert_eq!(parser.parse_line("vt 0 0"), Err(LineError::UnknownCommand("vt".into())));
        assert_eq!(parser.parse_line("# comment"), Err(LineError::UnknownCommand("#".into())));
        assert_eq!(parser.errors().iter().map(|r| r.line).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn every_cylinder_gets_fresh_options() {
        let mut parser = with_vertices(2);
        feed(&mut parser, "ccyl 0 1 0.5\ncyl 0 1 0.25\nccyl -2 -1 2");
        let caps: Vec<_> = parser.graph()[parser.root()].primitives().map(|p| match &p.shape {
            Shape::Cylinder(c) => (c.caps, c.radius),
            other => panic!("unexpected {other:?}"),
        }).collect();
        assert_eq!(caps, vec![(true, 0.5), (false, 0.25), (true, 2.0)]);
    }

    #[test]
    fn construction_failure_is_a_line_error() {
        let mut parser = with_vertices(2);
        assert_eq!(parser.parse_line("sph 0 -1"), Err(LineError::Primitive(PrimitiveError::NonPositiveRadius(-1.0))));
        assert_eq!(parser.parse_line("disk 1 0 1"), Err(LineError::Primitive(PrimitiveError::ZeroDirection)));
        assert_eq!(parser.parse_line("cyl 1 1 1"), Err(LineError::Primitive(PrimitiveError::ZeroDirection)));
        assert!(parser.graph()[parser.root()].children.is_empty());
    }

    #[test]
    fn small_scale_geometry_is_kept() {
        let mut parser = SceneParser::new();
        feed(&mut parser, "v 0 0 0\nv 1e-7 0 0\nv 0 1e-7 0\nf 0 1 2\nv 0 0 1e-14\ndisk 0 3 1\nplane 3 0\ncyl 0 3 1e-9");
        assert!(parser.errors().is_empty());
        let kinds: Vec<_> = parser.graph()[parser.root()].primitives().map(|p| p.kind()).collect();
        assert_eq!(kinds, vec!["facet", "disc", "plane", "cylinder"]);
    }

    #[test]
    fn remaining_primitives() {
        let mut parser = SceneParser::new();
        feed(&mut parser, "v 0 0 1\nv 5 5 5\ndisk 1 0 2\nplane 0 1\nell 1 1 2 3\nf 0 1 2 extra");
        let kinds: Vec<_> = parser.graph()[parser.root()].primitives().map(|p| p.kind()).collect();
        assert_eq!(kinds, vec!["disc", "plane", "ellipsoid"]);
        assert_eq!(parser.errors().len(), 1);

        let root = &parser.graph()[parser.root()];
        let primitives: Vec<_> = root.primitives().collect();
        let Shape::Plane(plane) = &primitives[1].shape else { panic!("not a plane") };
        assert_eq!(plane.normal, vec3(0.0, 0.0, 1.0));
        assert_eq!(plane.point, vec3(5.0, 5.0, 5.0));
        let Shape::Ellipsoid(ellipsoid) = &primitives[2].shape else { panic!("not an ellipsoid") };
        assert_eq!(ellipsoid.base, vec3(5.0, 5.0, 5.0));
        assert_eq!(ellipsoid.radiuses, vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let mut parser = SceneParser::new();
        assert!(parser.parse_line("v 1 2 3 4").is_ok());
        assert!(parser.parse_line("sph 0 1 ignored").is_ok());
        assert_eq!(parser.vertices(), &[vec3(1.0, 2.0, 3.0)]);
    }
}
