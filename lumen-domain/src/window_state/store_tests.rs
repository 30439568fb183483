#![cfg(test)]

use super::store::WindowStateStore;
use lumen_core::types::{RectInt, WindowState};
use pretty_assertions::assert_eq;

const DEFAULT_RECT: RectInt = RectInt::from_coords(0, 0, 800, 600);

#[test]
fn geometry_round_trips_bit_exactly() {
    let store = WindowStateStore::open_in_memory().unwrap();
    let rect = RectInt::from_coords(-12, 34, 1280, 720);
    store.save_geometry("app-1/0", rect);
    // An unrelated save must not disturb the first key.
    store.save_geometry("app-2/0", RectInt::from_coords(5, 5, 5, 5));
    assert_eq!(store.get_geometry("app-1/0", DEFAULT_RECT), rect);
}

#[test]
fn unknown_keys_return_the_supplied_default() {
    let store = WindowStateStore::open_in_memory().unwrap();
    assert_eq!(store.get_geometry("nobody", DEFAULT_RECT), DEFAULT_RECT);
    assert_eq!(
        store.get_state("nobody", WindowState::Restored),
        WindowState::Restored
    );
    assert_eq!(store.get_stage("nobody", 7), 7);
}

#[test]
fn state_save_is_visible_to_a_subsequent_read() {
    let store = WindowStateStore::open_in_memory().unwrap();
    store.save_state("dialer/0", WindowState::MaximizedLeft);
    assert_eq!(
        store.get_state("dialer/0", WindowState::Restored),
        WindowState::MaximizedLeft
    );
}

#[test]
fn saves_are_upserts() {
    let store = WindowStateStore::open_in_memory().unwrap();
    store.save_stage("gallery", 1);
    store.save_stage("gallery", 2);
    assert_eq!(store.get_stage("gallery", 0), 2);
}

#[test]
fn interleaved_writes_across_tables_serialize() {
    let store = WindowStateStore::open_in_memory().unwrap();
    for i in 0..50 {
        store.save_state("w", WindowState::Maximized);
        store.save_geometry("w", RectInt::from_coords(i, i, 100, 100));
        store.save_stage("w", i);
    }
    assert_eq!(store.get_state("w", WindowState::Restored), WindowState::Maximized);
    assert_eq!(store.get_geometry("w", DEFAULT_RECT), RectInt::from_coords(49, 49, 100, 100));
    assert_eq!(store.get_stage("w", -1), 49);
}

#[test]
fn invalid_stored_geometry_falls_back_to_default() {
    let store = WindowStateStore::open_in_memory().unwrap();
    store.save_geometry("w", RectInt::from_coords(10, 10, 0, 100));
    assert_eq!(store.get_geometry("w", DEFAULT_RECT), DEFAULT_RECT);
}

#[test]
fn data_survives_reopening_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windowstate.sqlite");
    let rect = RectInt::from_coords(3, 4, 640, 480);
    {
        let store = WindowStateStore::open(&path).unwrap();
        store.save_geometry("app/0", rect);
        store.save_state("app/0", WindowState::Fullscreen);
        // Drop flushes outstanding writes.
    }
    let store = WindowStateStore::open(&path).unwrap();
    assert_eq!(store.get_geometry("app/0", DEFAULT_RECT), rect);
    assert_eq!(
        store.get_state("app/0", WindowState::Restored),
        WindowState::Fullscreen
    );
}

#[test]
fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache").join("windowstate.sqlite");
    let store = WindowStateStore::open(&path).unwrap();
    store.save_stage("app", 1);
    store.flush();
    assert!(path.exists());
}
