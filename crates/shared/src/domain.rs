use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CatalogError, EntityKind};

/// Placeholder the catalog source uses when the developer of a property
/// group is unknown.
const UNKNOWN_DEVELOPER_SENTINEL: &str = "—";

macro_rules! slug_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

slug_newtype!(UnitId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoCategory {
    Rendering,
    Real,
    Highlight,
}

impl PhotoCategory {
    /// Fixed traversal order for photo inventories.
    pub const ALL: [PhotoCategory; 3] = [
        PhotoCategory::Rendering,
        PhotoCategory::Real,
        PhotoCategory::Highlight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PhotoCategory::Rendering => "Visualization",
            PhotoCategory::Real => "Real photos",
            PhotoCategory::Highlight => "Featured",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Photo {
    /// Photos with an empty url are never counted nor displayed.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// The three photo categories of an entity. Absent categories deserialize to
/// empty sequences; categories the source invents beyond these three are
/// ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSet {
    #[serde(default)]
    pub rendering: Vec<Photo>,
    #[serde(default)]
    pub real: Vec<Photo>,
    #[serde(default)]
    pub highlight: Vec<Photo>,
}

impl PhotoSet {
    pub fn category(&self, category: PhotoCategory) -> &[Photo] {
        match category {
            PhotoCategory::Rendering => &self.rendering,
            PhotoCategory::Real => &self.real,
            PhotoCategory::Highlight => &self.highlight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    #[serde(default)]
    pub area_m2: f64,
    /// Currency-denominated price. Zero or missing excludes the unit from
    /// every price-derived aggregate.
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<String>,
    #[serde(default)]
    pub photos: PhotoSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    pub name: String,
    #[serde(default)]
    pub photos: PhotoSet,
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    #[serde(default)]
    pub photos: PhotoSet,
    #[serde(default)]
    pub unit_types: BTreeMap<String, UnitType>,
}

impl Block {
    pub fn unit_type(&self, slug: &str) -> Option<&UnitType> {
        self.unit_types.get(slug)
    }

    pub fn require_unit_type(&self, slug: &str) -> Result<&UnitType, CatalogError> {
        self.unit_type(slug)
            .ok_or_else(|| CatalogError::not_found(EntityKind::UnitType, slug))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub name: String,
    #[serde(default, deserialize_with = "developer_or_unknown")]
    pub developer: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: PhotoSet,
    #[serde(default)]
    pub blocks: BTreeMap<String, Block>,
}

impl PropertyGroup {
    pub fn block(&self, slug: &str) -> Option<&Block> {
        self.blocks.get(slug)
    }

    pub fn require_block(&self, slug: &str) -> Result<&Block, CatalogError> {
        self.block(slug)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Block, slug))
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.blocks
            .values()
            .flat_map(|block| block.unit_types.values())
            .flat_map(|unit_type| unit_type.units.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<GeoPoint>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: PhotoSet,
    #[serde(default)]
    pub groups: BTreeMap<String, PropertyGroup>,
}

impl Area {
    pub fn group(&self, slug: &str) -> Option<&PropertyGroup> {
        self.groups.get(slug)
    }

    pub fn require_group(&self, slug: &str) -> Result<&PropertyGroup, CatalogError> {
        self.group(slug)
            .ok_or_else(|| CatalogError::not_found(EntityKind::PropertyGroup, slug))
    }
}

/// The full hierarchy, built once per session from the fetched document and
/// treated as immutable afterwards. Child mappings are `BTreeMap`s keyed by
/// slug: the source declares insertion order irrelevant, so slug order is the
/// mapping order everywhere the catalog is walked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub areas: BTreeMap<String, Area>,
}

impl Catalog {
    pub fn area(&self, slug: &str) -> Option<&Area> {
        self.areas.get(slug)
    }

    /// Result-typed lookup for callers that render a distinct not-found
    /// state; the `Option` accessors stay the default for existence checks.
    pub fn require_area(&self, slug: &str) -> Result<&Area, CatalogError> {
        self.area(slug)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Area, slug))
    }

    /// Global lookup by unit id. Ids are unique across the whole catalog.
    pub fn find_unit(&self, id: &UnitId) -> Option<&Unit> {
        self.areas
            .values()
            .flat_map(|area| area.groups.values())
            .flat_map(|group| group.units())
            .find(|unit| &unit.id == id)
    }

    pub fn require_unit(&self, id: &UnitId) -> Result<&Unit, CatalogError> {
        self.find_unit(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Unit, id.0.clone()))
    }
}

fn developer_or_unknown<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| {
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed != UNKNOWN_DEVELOPER_SENTINEL
    }))
}
