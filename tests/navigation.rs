//! End-to-end flow: pages file → store → engine → framing.
//!
//! Exercises the public API the way a viewer does: load a snapshot, switch
//! modes on resize, navigate with keys and swipes, and frame the photos on
//! screen.

use scrapbook::config::BookConfig;
use scrapbook::framing::frame_transform;
use scrapbook::input::{InputEvent, InputMapper, SwipeTracker};
use scrapbook::pagination::{
    Direction, IgnoreReason, ManualClock, NavOutcome, PaginationEngine, ViewMode,
};
use scrapbook::store::{JsonStore, PageSource};
use std::fs;
use tempfile::TempDir;

const PAGES: &str = r#"[
    {"order": 0, "layout": "cover", "content": "Nuestra Historia"},
    {"order": 1, "layout": "index", "content": "Fotos:3 | Listas:5"},
    {"order": 2, "layout": "quote", "content": "Contigo todo"},
    {"order": 3, "layout": "photo_single",
     "media": [{"url": "https://example.com/a.jpg", "scale": 1.5, "offsetX": 20, "offsetY": -10}],
     "imageStyle": {"position": "top", "grayscale": true}},
    {"order": 4, "layout": "collage", "mediaUrl": "b.jpg, c.jpg"},
    {"order": 5, "layout": "checklist", "content": "Ver auroras | Viajar"},
    {"order": 2.5, "layout": "timeline", "content": "Inserted later"}
]"#;

fn load() -> (TempDir, JsonStore) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pages.json");
    fs::write(&path, PAGES).unwrap();
    let store = JsonStore::open(&path).unwrap();
    (tmp, store)
}

fn open_viewer(store: &JsonStore, mode: ViewMode) -> (PaginationEngine<ManualClock>, ManualClock) {
    let config = BookConfig::default();
    let clock = ManualClock::new();
    let engine = PaginationEngine::with_clock(
        store.snapshot().unwrap(),
        mode,
        config.viewer.settle(),
        clock.clone(),
    );
    (engine, clock)
}

fn visible_orders(engine: &PaginationEngine<ManualClock>) -> Vec<f64> {
    let visible = engine.visible_pages().unwrap();
    let mut orders = vec![visible.first.order];
    orders.extend(visible.second.map(|p| p.order));
    orders
}

#[test]
fn fractional_order_slots_into_reading_sequence() {
    let (_tmp, store) = load();
    let (engine, _) = open_viewer(&store, ViewMode::Single);
    let orders: Vec<f64> = engine.pages().iter().map(|p| p.order).collect();
    assert_eq!(orders, vec![0.0, 1.0, 2.0, 2.5, 3.0, 4.0, 5.0]);
}

#[test]
fn read_through_in_spread_mode() {
    let (_tmp, store) = load();
    let (mut engine, clock) = open_viewer(&store, ViewMode::Spread);
    let settle = BookConfig::default().viewer.settle();

    let mut seen = vec![visible_orders(&engine)];
    while engine.next().moved() {
        seen.push(visible_orders(&engine));
        clock.advance(settle);
    }
    assert_eq!(
        seen,
        vec![vec![0.0], vec![1.0, 2.0], vec![2.5, 3.0], vec![4.0, 5.0]]
    );
    assert_eq!(engine.spread_count(), 4);
    assert_eq!(engine.page_label(), "6 - 7 / 7");
}

#[test]
fn keys_and_swipes_share_the_lock() {
    let (_tmp, store) = load();
    let (mut engine, clock) = open_viewer(&store, ViewMode::Single);
    let mapper = InputMapper::new(BookConfig::default().viewer.swipe_threshold);

    let key = mapper.command(&InputEvent::Key("ArrowRight".into())).unwrap();
    assert!(engine.apply(key).moved());

    let mut tracker = SwipeTracker::new();
    tracker.start(400.0);
    tracker.moved(200.0);
    let swipe = mapper.command(&tracker.end().unwrap()).unwrap();
    assert_eq!(
        engine.apply(swipe),
        NavOutcome::Ignored(IgnoreReason::Animating)
    );

    clock.advance(BookConfig::default().viewer.settle());
    assert!(engine.apply(swipe).moved());
    assert_eq!(engine.current_index(), 2);
    assert_eq!(engine.direction(), Direction::Forward);
}

#[test]
fn index_entry_jumps_to_containing_spread() {
    let (_tmp, store) = load();
    let (mut engine, _) = open_viewer(&store, ViewMode::Spread);
    let mapper = InputMapper::default();

    let jump = mapper.command(&InputEvent::IndexEntry(5.0)).unwrap();
    assert!(engine.apply(jump).moved());
    assert_eq!(visible_orders(&engine), vec![4.0, 5.0]);
}

#[test]
fn resize_keeps_position_until_realigned() {
    let (_tmp, store) = load();
    let (mut engine, _) = open_viewer(&store, ViewMode::Single);
    engine.go_to_index(4);

    let config = BookConfig::default();
    engine.set_mode(ViewMode::for_viewport_width(1280, config.viewer.spread_breakpoint));
    assert_eq!(engine.mode(), ViewMode::Spread);
    assert_eq!(engine.current_index(), 4);

    engine.realign();
    assert_eq!(visible_orders(&engine), vec![2.5, 3.0]);
}

#[test]
fn photo_on_screen_is_framed() {
    let (_tmp, store) = load();
    let (mut engine, _) = open_viewer(&store, ViewMode::Single);
    engine.go_to_order(3.0);

    let page = engine.visible_pages().unwrap().first;
    let item = page.primary_photo().unwrap();
    let descriptor = frame_transform(&item.adjustment(), page.image_style.as_ref());

    assert_eq!(descriptor.combined_scale, 1.5);
    assert_eq!(descriptor.crop_origin_x, 30.0);
    assert_eq!(descriptor.crop_origin_y, 10.0);
    assert_eq!(descriptor.filter_css().as_deref(), Some("grayscale(100%)"));
}

#[test]
fn legacy_media_url_is_normalized() {
    let (_tmp, store) = load();
    let collage = store.pages().iter().find(|p| p.order == 4.0).unwrap();
    let urls: Vec<&str> = collage.media.iter().map(|m| m.url.as_str()).collect();
    assert_eq!(urls, vec!["b.jpg", "c.jpg"]);
}

#[test]
fn snapshot_replacement_after_admin_edit() {
    let (_tmp, mut store) = load();
    let (mut engine, _) = open_viewer(&store, ViewMode::Single);
    engine.go_to_index(6);

    let copy = store.pages()[0].clone();
    let new_id = store.add(copy, None).unwrap();
    assert_eq!(store.get(&new_id).unwrap().order, 6.0);

    store.delete(&new_id).unwrap();
    let mut shorter = store.snapshot().unwrap();
    shorter.truncate(3);
    engine.replace_pages(shorter);
    assert_eq!(engine.current_index(), 2);
}
