use catalog::aggregate::Scope;
use shared::domain::{Photo, PhotoCategory, PhotoSet, Unit, UnitId};

use crate::gallery::{Gallery, GalleryFilter};

fn photo(url: &str) -> Photo {
    Photo {
        url: url.to_string(),
        caption: None,
    }
}

fn unit_with_photos(photos: PhotoSet) -> Unit {
    Unit {
        id: UnitId::from("u-1"),
        area_m2: 42.0,
        price: 120_000.0,
        finish: None,
        furnishing: None,
        photos,
    }
}

fn sample_unit() -> Unit {
    unit_with_photos(PhotoSet {
        rendering: vec![],
        real: vec![photo("p1"), photo("p2")],
        highlight: vec![photo("p3")],
    })
}

#[test]
fn open_initializes_inventory_filter_and_index() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    assert!(!gallery.is_open());

    gallery.open(Scope::Unit(&unit));
    assert!(gallery.is_open());
    assert_eq!(gallery.filter(), Some(GalleryFilter::All));
    assert_eq!(gallery.current_index(), Some(0));

    // Empty rendering category is skipped; order is rendering, real, highlight.
    let urls: Vec<&str> = gallery.visible().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["p1", "p2", "p3"]);
    assert_eq!(gallery.current_photo().unwrap().url, "p1");
}

#[test]
fn filter_narrows_visible_list_and_resets_out_of_range_index() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    gallery.select_index(2);
    assert_eq!(gallery.current_photo().unwrap().url, "p3");

    gallery.set_filter(GalleryFilter::Category(PhotoCategory::Highlight));
    let urls: Vec<&str> = gallery.visible().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["p3"]);
    // Index 2 no longer fits the one-item list; it must be 0 before the
    // next read.
    assert_eq!(gallery.current_index(), Some(0));
    assert_eq!(gallery.current_photo().unwrap().url, "p3");
}

#[test]
fn filter_change_keeps_index_when_still_in_range() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    gallery.select_index(1);
    gallery.set_filter(GalleryFilter::Category(PhotoCategory::Real));
    assert_eq!(gallery.current_index(), Some(1));
    assert_eq!(gallery.current_photo().unwrap().url, "p2");
}

#[test]
fn empty_visible_list_has_no_current_photo() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    gallery.set_filter(GalleryFilter::Category(PhotoCategory::Rendering));
    assert!(gallery.visible().is_empty());
    assert_eq!(gallery.current_index(), Some(0));
    assert!(gallery.current_photo().is_none());

    // Navigation over the empty list stays a no-op.
    gallery.next();
    gallery.previous();
    assert!(gallery.current_photo().is_none());
}

#[test]
fn navigation_wraps_in_both_directions() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    gallery.previous();
    assert_eq!(gallery.current_index(), Some(2));
    gallery.next();
    assert_eq!(gallery.current_index(), Some(0));
    gallery.next();
    gallery.next();
    gallery.next();
    assert_eq!(gallery.current_index(), Some(0));
}

#[test]
fn next_then_previous_returns_to_the_original_index() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    for start in 0..3 {
        gallery.select_index(start);
        gallery.next();
        gallery.previous();
        assert_eq!(gallery.current_index(), Some(start));
    }
}

#[test]
fn single_item_visible_list_ignores_navigation() {
    let unit = unit_with_photos(PhotoSet {
        rendering: vec![],
        real: vec![photo("only")],
        highlight: vec![],
    });
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    gallery.next();
    assert_eq!(gallery.current_index(), Some(0));
    gallery.previous();
    assert_eq!(gallery.current_index(), Some(0));
}

#[test]
fn caption_toggles_are_independent_of_navigation_and_cleared_on_close() {
    let unit = sample_unit();
    let mut gallery = Gallery::new();
    gallery.open(Scope::Unit(&unit));

    assert!(!gallery.caption_shown(1));
    gallery.toggle_caption(1);
    assert!(gallery.caption_shown(1));
    gallery.next();
    gallery.next();
    assert!(gallery.caption_shown(1));
    gallery.toggle_caption(1);
    assert!(!gallery.caption_shown(1));

    gallery.toggle_caption(0);
    gallery.close();
    assert!(!gallery.is_open());

    // Reopening starts from scratch: no captions, filter all, index 0.
    gallery.open(Scope::Unit(&unit));
    assert!(!gallery.caption_shown(0));
    assert_eq!(gallery.filter(), Some(GalleryFilter::All));
    assert_eq!(gallery.current_index(), Some(0));
}

#[test]
fn calls_on_a_closed_gallery_are_no_ops() {
    let mut gallery = Gallery::new();
    gallery.set_filter(GalleryFilter::Category(PhotoCategory::Real));
    gallery.next();
    gallery.previous();
    gallery.select_index(3);
    gallery.toggle_caption(0);
    gallery.close();

    assert!(!gallery.is_open());
    assert!(gallery.visible().is_empty());
    assert!(gallery.current_photo().is_none());
    assert_eq!(gallery.current_index(), None);
    assert_eq!(gallery.filter(), None);
}
