use std::str::FromStr;

use crate::error::LineError;

/// First token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Define,
    OpenBox,
    CloseBox,
    UseMaterial,
    MaterialLibrary,
    Disk,
    Plane,
    Clone,
    Group,
    Vertex,
    Ellipsoid,
    Spheroid,
    Facet,
    Cylinder,
    CappedCylinder,
}

impl Keyword {
    pub const ALL: [Keyword; 15] = [
        Keyword::Define,
        Keyword::OpenBox,
        Keyword::CloseBox,
        Keyword::UseMaterial,
        Keyword::MaterialLibrary,
        Keyword::Disk,
        Keyword::Plane,
        Keyword::Clone,
        Keyword::Group,
        Keyword::Vertex,
        Keyword::Ellipsoid,
        Keyword::Spheroid,
        Keyword::Facet,
        Keyword::Cylinder,
        Keyword::CappedCylinder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Define          => "#define",
            Keyword::OpenBox         => "!{",
            Keyword::CloseBox        => "!}",
            Keyword::UseMaterial     => "usemtl",
            Keyword::MaterialLibrary => "mtllib",
            Keyword::Disk            => "disk",
            Keyword::Plane           => "plane",
            Keyword::Clone           => "clone",
            Keyword::Group           => "g",
            Keyword::Vertex          => "v",
            Keyword::Ellipsoid       => "ell",
            Keyword::Spheroid        => "sph",
            Keyword::Facet           => "f",
            Keyword::Cylinder        => "cyl",
            Keyword::CappedCylinder  => "ccyl",
        }
    }
}

impl FromStr for Keyword {
    type Err = LineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Keyword::ALL
            .into_iter()
            .find(|keyword| keyword.as_str() == token)
            .ok_or_else(|| LineError::UnknownCommand(token.to_string()))
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
