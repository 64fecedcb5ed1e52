use std::{sync::Arc, time::Duration};

use anyhow::Result;
use catalog::{
    aggregate::{has_photos, photo_inventory, price_band_histogram, price_stats, Scope},
    listing::{grouped_units, unit_type_options, SortOrder, UnitTypeFilter},
};
use clap::Parser;
use serde_json::json;
use shared::domain::{Area, Catalog, PropertyGroup};
use viewer_core::{detail, InteractionLogger, MissingHostBridge};

mod config;

const GROUP_VIEW_DEDUP_TTL: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
struct Args {
    /// Catalog document path; overrides browser.toml and environment.
    #[arg(long)]
    catalog: Option<String>,
    /// Area slug to inspect.
    #[arg(long)]
    area: Option<String>,
    /// Property-group slug to inspect (requires --area).
    #[arg(long)]
    group: Option<String>,
    /// Restrict the group listing to one unit-type id.
    #[arg(long)]
    unit_type: Option<String>,
    /// Sort the group listing by descending price.
    #[arg(long)]
    desc: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(path) = args.catalog {
        settings.catalog_path = path;
    }

    let catalog = match catalog::load_file(&settings.catalog_path) {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            tracing::warn!("catalog unavailable: {err}");
            println!("Catalog is unavailable; nothing to browse.");
            return Ok(());
        }
    };

    let logger = InteractionLogger::new(Arc::new(MissingHostBridge), settings.logger_config());
    logger
        .track(
            "catalog_open",
            detail(json!({ "areas": catalog.areas.len() })),
        )
        .await;

    match (args.area.as_deref(), args.group.as_deref()) {
        (Some(area_slug), Some(group_slug)) => {
            let group = match catalog
                .require_area(area_slug)
                .and_then(|area| area.require_group(group_slug))
            {
                Ok(group) => group,
                Err(err) => {
                    println!("{err}.");
                    return Ok(());
                }
            };
            logger
                .track_once(
                    &format!("group_view:{group_slug}"),
                    GROUP_VIEW_DEDUP_TTL,
                    "group_view",
                    detail(json!({ "area": area_slug, "group": group_slug })),
                )
                .await;
            print_group(group, args.unit_type, args.desc);
        }
        (Some(area_slug), None) => {
            let area = match catalog.require_area(area_slug) {
                Ok(area) => area,
                Err(err) => {
                    println!("{err}.");
                    return Ok(());
                }
            };
            print_area(area);
        }
        _ => print_overview(&catalog),
    }

    Ok(())
}

fn print_overview(catalog: &Catalog) {
    for (slug, area) in &catalog.areas {
        println!(
            "{} ({slug}) — {} groups",
            area.name,
            area.groups.len()
        );
    }
}

fn print_area(area: &Area) {
    println!("{}", area.name);
    if !area.description.is_empty() {
        println!("  {}", area.description);
    }
    for (slug, group) in &area.groups {
        let stats = price_stats(group);
        let developer = group.developer.as_deref().unwrap_or("unknown developer");
        let photos = if has_photos(Scope::Group(group)) {
            "photos available"
        } else {
            "no photos"
        };
        println!(
            "  {} ({slug}) by {developer}: {:.0}–{:.0}, mean {:.2}, {photos}",
            group.name, stats.min, stats.max, stats.mean
        );
    }
}

fn print_group(group: &PropertyGroup, unit_type: Option<String>, desc: bool) {
    println!("{}", group.name);

    for entry in price_band_histogram(Scope::Group(group)) {
        println!("  {}: {}", entry.band.label(), entry.count);
    }

    let options = unit_type_options(group);
    println!(
        "  types: {}",
        options
            .iter()
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let filter = match unit_type {
        Some(slug) => UnitTypeFilter::Type(slug),
        None => UnitTypeFilter::All,
    };
    let sort = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let listing = grouped_units(group, &filter, sort);
    if listing.is_empty() {
        println!("  no units match the current filter");
    }
    for (block_slug, units) in &listing {
        println!("  block {block_slug}:");
        for unit in units {
            println!(
                "    {} — {:.0} m², {:.0}",
                unit.id, unit.area_m2, unit.price
            );
        }
    }

    let inventory = photo_inventory(Scope::Group(group));
    println!("  {} photos in gallery inventory", inventory.len());
}
