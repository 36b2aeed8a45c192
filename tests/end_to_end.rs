//! Marker lifecycle through the public library API

mod common;

use common::{methods, setup};
use marker_manager::maps::api::{MarkerIcon, MarkerProperty, RecordedCall};
use marker_manager::markers::api::{Marker, MarkerError};
use serde_json::json;

#[tokio::test]
async fn test_add_then_update_icon() {
    let (api, manager) = setup();
    let mut marker = Marker::new(34.4, 22.3).with_label("A");

    manager.add_marker(&marker).unwrap();

    let created = serde_json::to_value(&api.created_options()[0]).unwrap();
    assert_eq!(
        created,
        json!({
            "position": {"lat": 34.4, "lng": 22.3},
            "label": "A",
            "draggable": false,
            "opacity": 1.0,
            "visible": true,
            "zIndex": 1,
            "clickable": true
        })
    );

    marker.icon = Some("http://example.com/icon.png".into());
    manager.update_icon(&marker).await.unwrap();

    assert_eq!(
        api.calls()[1],
        RecordedCall::SetProperty {
            handle: 1,
            property: MarkerProperty::Icon(Some(MarkerIcon::Url(
                "http://example.com/icon.png".to_string()
            )))
        }
    );
}

#[tokio::test]
async fn test_opacity_visibility_and_stacking_updates() {
    let (api, manager) = setup();
    let mut marker = Marker::new(34.4, 22.3).with_label("A");
    marker.visible = false;
    manager.add_marker(&marker).unwrap();

    marker.opacity = 0.4;
    manager.update_opacity(&marker).await.unwrap();
    marker.visible = true;
    manager.update_visible(&marker).await.unwrap();
    marker.z_index = 10;
    manager.update_z_index(&marker).await.unwrap();

    let properties: Vec<MarkerProperty> = api
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RecordedCall::SetProperty { property, .. } => Some(property),
            _ => None,
        })
        .collect();
    assert_eq!(
        properties,
        vec![
            MarkerProperty::Opacity(0.4),
            MarkerProperty::Visible(true),
            MarkerProperty::ZIndex(10),
        ]
    );
}

#[tokio::test]
async fn test_full_lifecycle_with_two_markers() {
    let (api, manager) = setup();
    let mut first = Marker::new(1.0, 1.0);
    let mut second = Marker::new(2.0, 2.0);
    manager.add_marker(&first).unwrap();
    manager.add_marker(&second).unwrap();

    first.title = Some("first".to_string());
    second.draggable = true;
    let (a, b) = futures::join!(manager.update_title(&first), manager.update_draggable(&second));
    a.unwrap();
    b.unwrap();

    manager.delete_marker(&first).await.unwrap();

    assert_eq!(
        methods(&api.calls_for(1)),
        vec!["create_marker", "set_title", "set_map"]
    );
    assert_eq!(methods(&api.calls_for(2)), vec!["create_marker", "set_draggable"]);
    assert!(api.marker(2).unwrap().is_displayed());
    assert_eq!(
        manager.update_title(&first).await,
        Err(MarkerError::UnknownMarker { id: first.id() })
    );
}
