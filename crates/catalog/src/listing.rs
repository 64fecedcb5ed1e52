use std::collections::{BTreeMap, HashSet};

use shared::domain::{PropertyGroup, Unit};

/// Id of the synthetic "every unit type" entry.
pub const ALL_UNIT_TYPES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitTypeFilter {
    #[default]
    All,
    Type(String),
}

impl UnitTypeFilter {
    pub fn matches(&self, unit_type_slug: &str) -> bool {
        match self {
            UnitTypeFilter::All => true,
            UnitTypeFilter::Type(slug) => slug == unit_type_slug,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// The user's current (filter, sort) pair for a property-group listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingSelection {
    pub filter: UnitTypeFilter,
    pub sort: SortOrder,
}

impl ListingSelection {
    /// Restores filter = all, sort = ascending. Always the same outcome,
    /// independent of what the selection was before.
    pub fn reset(&mut self) {
        *self = ListingSelection::default();
    }
}

/// Units of the group, keyed by block slug, with only units passing the
/// filter, each block's sequence sorted by price per the requested order.
/// Blocks left empty by the filter are absent from the result entirely.
pub fn grouped_units<'a>(
    group: &'a PropertyGroup,
    filter: &UnitTypeFilter,
    sort: SortOrder,
) -> BTreeMap<&'a str, Vec<&'a Unit>> {
    let mut grouped = BTreeMap::new();
    for (block_slug, block) in &group.blocks {
        let mut units: Vec<&Unit> = block
            .unit_types
            .iter()
            .filter(|(slug, _)| filter.matches(slug))
            .flat_map(|(_, unit_type)| unit_type.units.iter())
            .collect();
        if units.is_empty() {
            continue;
        }
        units.sort_by(|a, b| match sort {
            SortOrder::Ascending => a.price.total_cmp(&b.price),
            SortOrder::Descending => b.price.total_cmp(&a.price),
        });
        grouped.insert(block_slug.as_str(), units);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTypeOption {
    pub id: String,
    pub label: String,
}

/// Distinct unit types available in the group: the synthetic "all" entry
/// first, then every unit-type id that appears in any block, labeled with
/// its display name, without duplicates when a type recurs across blocks.
pub fn unit_type_options(group: &PropertyGroup) -> Vec<UnitTypeOption> {
    let mut options = vec![UnitTypeOption {
        id: ALL_UNIT_TYPES.to_string(),
        label: "All types".to_string(),
    }];
    let mut seen = HashSet::new();
    for block in group.blocks.values() {
        for (slug, unit_type) in &block.unit_types {
            if seen.insert(slug.as_str()) {
                options.push(UnitTypeOption {
                    id: slug.clone(),
                    label: unit_type.name.clone(),
                });
            }
        }
    }
    options
}
