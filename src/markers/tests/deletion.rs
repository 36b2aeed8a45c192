//! Tests for marker deletion and clearing

use super::{marker_a, methods_for, setup};
use crate::maps::api::RecordedCall;
use crate::markers::api::{Marker, MarkerError};

#[tokio::test]
async fn test_delete_detaches_from_map() {
    let (api, manager) = setup();
    let marker = marker_a();
    manager.add_marker(&marker).unwrap();
    assert!(api.markers()[0].is_displayed());

    manager.delete_marker(&marker).await.unwrap();

    let set_map_calls: Vec<_> = api
        .calls_for(1)
        .into_iter()
        .filter(|call| matches!(call, RecordedCall::SetMap { .. }))
        .collect();
    assert_eq!(
        set_map_calls,
        vec![RecordedCall::SetMap {
            handle: 1,
            map: None
        }]
    );
    assert!(!api.marker(1).unwrap().is_displayed());
    assert!(!manager.contains(&marker));
    assert_eq!(manager.marker_count(), 0);
}

#[tokio::test]
async fn test_delete_removes_registry_entry() {
    let (_api, manager) = setup();
    let marker = marker_a();
    manager.add_marker(&marker).unwrap();
    manager.delete_marker(&marker).await.unwrap();

    let again = manager.delete_marker(&marker).await;
    let update = manager.update_opacity(&marker).await;

    assert_eq!(again, Err(MarkerError::UnknownMarker { id: marker.id() }));
    assert_eq!(update, Err(MarkerError::UnknownMarker { id: marker.id() }));
}

#[tokio::test]
async fn test_delete_targets_only_its_own_marker() {
    let (api, manager) = setup();
    let first = marker_a();
    let second = Marker::new(1.0, 1.0);
    manager.add_marker(&first).unwrap();
    manager.add_marker(&second).unwrap();

    manager.delete_marker(&second).await.unwrap();

    assert_eq!(methods_for(&api, 1), vec!["create_marker"]);
    assert_eq!(methods_for(&api, 2), vec!["create_marker", "set_map"]);
    assert!(manager.contains(&first));
    manager.update_visible(&first).await.unwrap();
}

#[tokio::test]
async fn test_delete_runs_after_queued_updates() {
    let (api, manager) = setup();
    let mut marker = marker_a();
    api.hold_creations();
    manager.add_marker(&marker).unwrap();

    marker.opacity = 0.1;
    let update = manager.update_opacity(&marker);
    let delete = manager.delete_marker(&marker);
    let late = manager.update_visible(&marker);
    api.release_creations();

    update.await.unwrap();
    delete.await.unwrap();
    assert_eq!(
        late.await,
        Err(MarkerError::UnknownMarker { id: marker.id() })
    );
    assert_eq!(
        methods_for(&api, 1),
        vec!["create_marker", "set_opacity", "set_map"]
    );
}

#[tokio::test]
async fn test_marker_can_be_added_again_after_delete() {
    let (api, manager) = setup();
    let marker = marker_a();
    manager.add_marker(&marker).unwrap();
    manager.delete_marker(&marker).await.unwrap();

    manager.add_marker(&marker).unwrap();
    manager.update_z_index(&marker).await.unwrap();

    assert_eq!(api.creation_count(), 2);
    assert_eq!(methods_for(&api, 2), vec!["create_marker", "set_z_index"]);
}

#[tokio::test]
async fn test_clear_detaches_every_marker() {
    let (api, manager) = setup();
    let markers: Vec<Marker> = (0..3).map(|i| Marker::new(i as f64, i as f64)).collect();
    for marker in &markers {
        manager.add_marker(marker).unwrap();
    }

    let detached = manager.clear().await.unwrap();

    assert_eq!(detached, 3);
    assert_eq!(manager.marker_count(), 0);
    assert!(api.markers().iter().all(|native| !native.is_displayed()));
    assert_eq!(
        manager.update_opacity(&markers[0]).await,
        Err(MarkerError::UnknownMarker {
            id: markers[0].id()
        })
    );
}

#[tokio::test]
async fn test_clear_on_empty_manager() {
    let (api, manager) = setup();

    assert_eq!(manager.clear().await, Ok(0));
    assert!(api.calls().is_empty());
}
