use serde::{ser::SerializeStruct as _, Serialize, Serializer};
use slotmap::SlotMap;

use crate::{error::LineReport, primitives::Primitive, types::Vec3};

slotmap::new_key_type! {
    /// Handle of a container in the scene arena.
    pub struct ContainerId;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Primitive(Primitive),
    Container(ContainerId),
}

/// A bounding scope opened with `!{`.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub children: Vec<Node>,
    pub visible: bool,
    pub material: Option<String>,
    pub group_name: Option<String>,
    /// Only ever set on the root.
    pub material_file: Option<String>,
}

impl Container {
    pub fn new() -> Self {
        Self { children: vec![], visible: true, material: None, group_name: None, material_file: None }
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.children.iter().filter_map(|node| match node {
            Node::Primitive(primitive) => Some(primitive),
            Node::Container(_) => None,
        })
    }

    pub fn sub_containers(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Container(id) => Some(*id),
            Node::Primitive(_) => None,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena owning every container of one parse, rooted at `root`.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    containers: SlotMap<ContainerId, Container>,
    root: ContainerId,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut containers = SlotMap::with_key();
        let root = containers.insert(Container::new());
        Self { containers, root }
    }

    pub fn root(&self) -> ContainerId {
        self.root
    }

    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    /// Creates an empty container as the last child of `parent`.
    pub fn open_child(&mut self, parent: ContainerId) -> ContainerId {
        let child = self.containers.insert(Container::new());
        self.containers[parent].children.push(Node::Container(child));
        child
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Depth-first, pre-order walk over containers starting at the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk { graph: self, pending: vec![(self.root, 0)] }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

// Containers are never removed, so ids from this graph stay valid.
impl std::ops::Index<ContainerId> for SceneGraph {
    type Output = Container;

    fn index(&self, id: ContainerId) -> &Container {
        &self.containers[id]
    }
}

impl std::ops::IndexMut<ContainerId> for SceneGraph {
    fn index_mut(&mut self, id: ContainerId) -> &mut Container {
        &mut self.containers[id]
    }
}

pub struct Walk<'a> {
    graph: &'a SceneGraph,
    pending: Vec<(ContainerId, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    /// Container id, container and nesting depth (root is 0).
    type Item = (ContainerId, &'a Container, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.pending.pop()?;
        let graph = self.graph;
        let container = &graph[id];
        let children: Vec<_> = container.sub_containers().collect();
        self.pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        Some((id, container, depth))
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct Scene {
    pub graph: SceneGraph,
    pub vertices: Vec<Vec3>,
    pub errors: Vec<LineReport>,
    /// Container that was active when input ended. Equals the root unless a `!{` was left open.
    pub active: ContainerId,
}

impl Scene {
    pub fn root(&self) -> &Container {
        &self.graph[self.graph.root()]
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.graph.get(id)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn errors(&self) -> &[LineReport] {
        &self.errors
    }

    pub fn primitive_count(&self) -> usize {
        self.graph.walk().map(|(_, container, _)| container.primitives().count()).sum()
    }
}

struct ContainerTree<'a> {
    graph: &'a SceneGraph,
    id: ContainerId,
}

struct ChildTree<'a> {
    graph: &'a SceneGraph,
    node: &'a Node,
}

impl Serialize for ContainerTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let container = &self.graph[self.id];
        let children: Vec<_> = container.children.iter().map(|node| ChildTree { graph: self.graph, node }).collect();
        let mut state = serializer.serialize_struct("Container", 6)?;
        state.serialize_field("type", "container")?;
        state.serialize_field("visible", &container.visible)?;
        state.serialize_field("material", &container.material)?;
        state.serialize_field("group_name", &container.group_name)?;
        state.serialize_field("material_file", &container.material_file)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

impl Serialize for ChildTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.node {
            Node::Primitive(primitive) => primitive.serialize(serializer),
            Node::Container(id) => ContainerTree { graph: self.graph, id: *id }.serialize(serializer),
        }
    }
}

impl Serialize for Scene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Scene", 3)?;
        state.serialize_field("vertices", &self.vertices)?;
        state.serialize_field("root", &ContainerTree { graph: &self.graph, id: self.graph.root() })?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
