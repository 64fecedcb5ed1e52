use std::collections::HashSet;

use serde::Serialize;
use shared::domain::{Area, Photo, PhotoCategory, PhotoSet, PropertyGroup, Unit};

/// Hard ceiling on a materialized photo inventory.
pub const PHOTO_INVENTORY_CAP: usize = 100;

/// A subtree root the aggregation engine can be pointed at. Aggregates are
/// derived on demand and never stored back into the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Area(&'a Area),
    Group(&'a PropertyGroup),
    Unit(&'a Unit),
}

impl<'a> Scope<'a> {
    fn units(self) -> Box<dyn Iterator<Item = &'a Unit> + 'a> {
        match self {
            Scope::Area(area) => Box::new(area.groups.values().flat_map(|group| group.units())),
            Scope::Group(group) => Box::new(group.units()),
            Scope::Unit(unit) => Box::new(std::iter::once(unit)),
        }
    }
}

/// Market-segment bands, fixed order. Band membership is decided by price
/// alone; units with zero or missing price never qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBand {
    Economy,
    Business,
    Premium,
    Luxury,
}

impl PriceBand {
    pub const ALL: [PriceBand; 4] = [
        PriceBand::Economy,
        PriceBand::Business,
        PriceBand::Premium,
        PriceBand::Luxury,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::Economy => "Economy",
            PriceBand::Business => "Business",
            PriceBand::Premium => "Premium",
            PriceBand::Luxury => "Luxury",
        }
    }

    pub fn for_price(price: f64) -> PriceBand {
        if price <= 80_000.0 {
            PriceBand::Economy
        } else if price <= 150_000.0 {
            PriceBand::Business
        } else if price <= 250_000.0 {
            PriceBand::Premium
        } else {
            PriceBand::Luxury
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: PriceBand,
    pub count: usize,
}

/// Counts qualifying units per band over the subtree. Bands with no units
/// are omitted; the remaining entries keep the fixed band order, never a
/// by-count order.
pub fn price_band_histogram(scope: Scope<'_>) -> Vec<BandCount> {
    let mut counts = [0usize; PriceBand::ALL.len()];
    for unit in scope.units().filter(|unit| unit.price > 0.0) {
        counts[PriceBand::for_price(unit.price) as usize] += 1;
    }
    PriceBand::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(band, count)| BandCount { band, count })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Min/max/arithmetic-mean over a property group's qualifying unit prices.
/// A group with no qualifying units yields all zeroes, never NaN.
pub fn price_stats(group: &PropertyGroup) -> PriceStats {
    let mut min = f64::INFINITY;
    let mut max = 0.0_f64;
    let mut sum = 0.0_f64;
    let mut count = 0u64;

    for unit in group.units().filter(|unit| unit.price > 0.0) {
        min = min.min(unit.price);
        max = max.max(unit.price);
        sum += unit.price;
        count += 1;
    }

    if count == 0 {
        return PriceStats::default();
    }

    PriceStats {
        min,
        max,
        mean: sum / count as f64,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPhoto {
    pub url: String,
    pub caption: Option<String>,
    pub category: PhotoCategory,
}

impl InventoryPhoto {
    pub fn category_label(&self) -> &'static str {
        self.category.label()
    }
}

/// Flattens the subtree's photos depth-first (self before children, children
/// in mapping order, categories in fixed order within each node). Photos
/// with empty urls are dropped and duplicate urls collapse to their first
/// occurrence, both before the cap applies; the result never exceeds
/// [`PHOTO_INVENTORY_CAP`] entries.
pub fn photo_inventory(scope: Scope<'_>) -> Vec<InventoryPhoto> {
    let mut seen = HashSet::new();
    let mut inventory = Vec::new();
    visit_photo_sets(scope, &mut |set| {
        for category in PhotoCategory::ALL {
            for photo in set.category(category).iter().filter(|p| p.has_url()) {
                if !seen.insert(photo.url.as_str()) {
                    continue;
                }
                if inventory.len() == PHOTO_INVENTORY_CAP {
                    return false;
                }
                inventory.push(InventoryPhoto {
                    url: photo.url.clone(),
                    caption: photo.caption.clone(),
                    category,
                });
            }
        }
        true
    });
    inventory
}

/// True iff the subtree holds at least one displayable photo. Stops at the
/// first hit instead of materializing an inventory, so it is safe to call
/// for every group card on a page.
pub fn has_photos(scope: Scope<'_>) -> bool {
    let mut found = false;
    visit_photo_sets(scope, &mut |set| {
        found = PhotoCategory::ALL
            .into_iter()
            .any(|category| set.category(category).iter().any(Photo::has_url));
        !found
    });
    found
}

/// Depth-first walk over every photo set of the subtree. The visitor
/// returns false to stop the walk early.
fn visit_photo_sets<'a>(scope: Scope<'a>, visit: &mut dyn FnMut(&'a PhotoSet) -> bool) -> bool {
    match scope {
        Scope::Area(area) => {
            if !visit(&area.photos) {
                return false;
            }
            for group in area.groups.values() {
                if !visit_photo_sets(Scope::Group(group), visit) {
                    return false;
                }
            }
            true
        }
        Scope::Group(group) => {
            if !visit(&group.photos) {
                return false;
            }
            for block in group.blocks.values() {
                if !visit(&block.photos) {
                    return false;
                }
                for unit_type in block.unit_types.values() {
                    if !visit(&unit_type.photos) {
                        return false;
                    }
                    for unit in &unit_type.units {
                        if !visit(&unit.photos) {
                            return false;
                        }
                    }
                }
            }
            true
        }
        Scope::Unit(unit) => visit(&unit.photos),
    }
}
