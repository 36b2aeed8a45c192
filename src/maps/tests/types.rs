//! Serialization shape of provider value types

use crate::maps::api::{
    Animation, IconDescriptor, LatLng, MarkerIcon, MarkerOptions, MarkerProperty, Point, Size,
};
use serde_json::json;

fn options() -> MarkerOptions {
    MarkerOptions {
        position: LatLng::new(34.4, 22.3),
        label: Some("A".to_string()),
        draggable: false,
        icon: None,
        opacity: 1.0,
        visible: true,
        z_index: 1,
        title: None,
        clickable: true,
        animation: None,
    }
}

#[test]
fn test_options_serialize_as_provider_bag() {
    let value = serde_json::to_value(options()).unwrap();

    assert_eq!(
        value,
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
}

#[test]
fn test_icon_descriptor_uses_provider_field_names() {
    let icon = IconDescriptor {
        anchor: Some(Point { x: 0.0, y: 32.0 }),
        label_origin: Some(Point { x: 16.0, y: 8.0 }),
        scaled_size: Some(Size {
            width: 32.0,
            height: 32.0,
        }),
        ..IconDescriptor::new("http://example.com/pin.png")
    };

    let value = serde_json::to_value(MarkerIcon::from(icon)).unwrap();

    assert_eq!(
        value,
        json!({
            "url": "http://example.com/pin.png",
            "anchor": {"x": 0.0, "y": 32.0},
            "labelOrigin": {"x": 16.0, "y": 8.0},
            "scaledSize": {"width": 32.0, "height": 32.0}
        })
    );
}

#[test]
fn test_icon_deserializes_either_shape() {
    let plain: MarkerIcon = serde_json::from_value(json!("http://example.com/a.png")).unwrap();
    assert_eq!(plain, MarkerIcon::from("http://example.com/a.png"));

    let structured: MarkerIcon = serde_json::from_value(json!({
        "url": "http://example.com/b.png",
        "size": {"width": 20.0, "height": 30.0}
    }))
    .unwrap();
    match structured {
        MarkerIcon::Descriptor(descriptor) => {
            assert_eq!(descriptor.url, "http://example.com/b.png");
            assert_eq!(
                descriptor.size,
                Some(Size {
                    width: 20.0,
                    height: 30.0
                })
            );
            assert!(descriptor.anchor.is_none());
        }
        other => panic!("expected a descriptor, got {:?}", other),
    }
}

#[test]
fn test_property_names_and_setters() {
    let cases = [
        (MarkerProperty::Position(LatLng::new(0.0, 0.0)), "position", "set_position"),
        (MarkerProperty::Label(None), "label", "set_label"),
        (MarkerProperty::Icon(None), "icon", "set_icon"),
        (MarkerProperty::Opacity(0.5), "opacity", "set_opacity"),
        (MarkerProperty::Visible(true), "visible", "set_visible"),
        (MarkerProperty::ZIndex(3), "z_index", "set_z_index"),
        (MarkerProperty::Title(None), "title", "set_title"),
        (MarkerProperty::Draggable(true), "draggable", "set_draggable"),
        (MarkerProperty::Clickable(false), "clickable", "set_clickable"),
        (MarkerProperty::Animation(None), "animation", "set_animation"),
    ];

    for (property, name, setter) in cases {
        assert_eq!(property.name(), name);
        assert_eq!(property.setter(), setter);
    }
}

#[test]
fn test_property_serializes_tagged() {
    let value = serde_json::to_value(MarkerProperty::ZIndex(10)).unwrap();
    assert_eq!(value, json!({"property": "zIndex", "value": 10}));

    let value = serde_json::to_value(MarkerProperty::Animation(Some(Animation::Bounce))).unwrap();
    assert_eq!(value, json!({"property": "animation", "value": "BOUNCE"}));
}
