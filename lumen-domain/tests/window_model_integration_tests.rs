// lumen-domain/tests/window_model_integration_tests.rs
//
// End-to-end flow over the window model: instances appear in the registry,
// the top-level list tracks their surfaces, the shell raises and closes
// windows, and window state round-trips through the on-disk store.

use lumen_core::types::{AppIdentifier, RectInt, WindowState};
use lumen_domain::{
    ApplicationInstance, InstanceHandle, InstanceRegistry, Surface, TopLevelWindowList,
    WindowStateStore,
};
use std::rc::Rc;

fn app(id: &str) -> InstanceHandle {
    ApplicationInstance::new(AppIdentifier::new(id).unwrap())
}

#[test]
fn session_lifecycle_with_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("windowstate.sqlite");

    let registry = InstanceRegistry::new();
    let list = TopLevelWindowList::new(&registry);

    // Gallery starts up: placeholder first, then its surface arrives.
    let gallery = app("gallery");
    registry.add(Rc::clone(&gallery));
    assert!(list.surface_at(0).is_none());
    let gallery_surface = Surface::new("gallery/main");
    gallery.surfaces().append(Rc::clone(&gallery_surface));
    assert!(list.surface_at(0).is_some());

    // Dialer starts and is raised above the gallery.
    let dialer = app("dialer");
    registry.add(Rc::clone(&dialer));
    let dialer_surface = Surface::new("dialer/main");
    dialer.surfaces().append(Rc::clone(&dialer_surface));
    let dialer_id = list.id_at(1).unwrap();
    list.raise_id(dialer_id);
    assert_eq!(list.id_at(0), Some(dialer_id));

    // The shell records where the windows ended up.
    {
        let store = WindowStateStore::open(&db_path).unwrap();
        store.save_geometry(
            gallery_surface.persistent_id(),
            RectInt::from_coords(40, 20, 1200, 800),
        );
        store.save_state(gallery_surface.persistent_id(), WindowState::Maximized);
        store.save_geometry(
            dialer_surface.persistent_id(),
            RectInt::from_coords(0, 0, 360, 640),
        );
    }

    // The dialer quits cleanly.
    registry.remove(&dialer);
    dialer_surface.destroy();
    assert_eq!(list.count(), 1);

    // Next session: a fresh store restores the gallery's placement.
    let store = WindowStateStore::open(&db_path).unwrap();
    assert_eq!(
        store.get_geometry("gallery/main", RectInt::from_coords(0, 0, 800, 600)),
        RectInt::from_coords(40, 20, 1200, 800)
    );
    assert_eq!(
        store.get_state("gallery/main", WindowState::Restored),
        WindowState::Maximized
    );
    // The dialer never saved a state; restoration falls back to the default
    // and its projection to the compositor vocabulary is "restored".
    let restored = store.get_state("dialer/main", WindowState::Restored);
    assert_eq!(
        restored.to_surface_state(),
        lumen_core::types::SurfaceState::Restored
    );
}
