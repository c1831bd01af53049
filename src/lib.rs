//! Parser for an extended Wavefront OBJ scene format.
//!
//! Besides `v` and `f`, the format knows discs, planes, spheroids,
//! ellipsoids and cylinders, plus nestable containers opened with `!{` and
//! closed with `!}`. Each container carries its own material, group name and
//! visibility. Lines that cannot be interpreted are reported and skipped.

pub mod command;
pub mod error;
pub mod options;
pub mod primitives;
pub mod scene;
pub mod scene_parser;
pub mod types;

pub use error::{LineError, LineReport, ParseError, PrimitiveError};
pub use options::ParseOptions;
pub use primitives::{Primitive, Shape};
pub use scene::{Container, ContainerId, Node, Scene, SceneGraph};
pub use scene_parser::{load_scene, parse_reader, parse_str, SceneParser};
