use crate::binder::fields::LayerFields;
use crate::binder::popup::{format_value, is_web_link, PopupContent, PopupRow};
use crate::binder::style::StyleSpec;
use crate::utils::geojson::Feature;
use crate::utils::maptypes::LayerKind;

/// Derives the style and info panel for one feature. The feature is only read.
pub fn bind(feature: &Feature, kind: LayerKind, fields: &LayerFields) -> (StyleSpec, PopupContent) {
    (StyleSpec::for_layer(kind), popup_content(feature, fields))
}

pub fn popup_content(feature: &Feature, fields: &LayerFields) -> PopupContent {
    let rows: Vec<PopupRow> = fields
        .iter()
        .map(|spec| {
            let value = spec
                .resolve(feature)
                .map(format_value)
                .unwrap_or_else(|| spec.fallback.clone());
            let href = (spec.link && is_web_link(&value)).then(|| value.clone());
            PopupRow {
                label: spec.label.clone(),
                value,
                href,
            }
        })
        .collect();

    let title = rows
        .first()
        .map(|row| row.value.clone())
        .unwrap_or_else(|| fields.name.fallback.clone());

    PopupContent { title, rows }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::binder::fields::{NOT_AVAILABLE, NO_NAME};
    use crate::utils::mock::{point, trail};
    use serde_json::json;

    #[test]
    fn test_trail_with_missing_surface() {
        let feature = trail(json!({ "TRAIL_NAME": "Riverwalk", "LENGTH": 5.2 }));

        let (style, content) = bind(&feature, LayerKind::Trail, &LayerFields::trails());

        assert_eq!(style, StyleSpec::for_layer(LayerKind::Trail));
        assert_eq!(content.tooltip(), "Riverwalk");
        assert_eq!(content.value_of("Length (mi):"), Some("5.2"));
        assert_eq!(content.value_of("Surface Type:"), Some(NOT_AVAILABLE));

        let html = content.to_html().into_string();
        assert!(html.contains("Riverwalk"));
        assert!(html.contains("5.2"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn test_park_fallbacks() {
        let feature = point(json!({ "ACRES": 12 }));

        let (_, content) = bind(&feature, LayerKind::Park, &LayerFields::parks());

        assert_eq!(content.title, NO_NAME);
        assert_eq!(content.value_of("Description:"), Some(NOT_AVAILABLE));
        assert_eq!(content.value_of("Amenities:"), Some(NOT_AVAILABLE));
        assert_eq!(content.value_of("Acres:"), Some("12"));
    }

    #[test]
    fn test_null_name_falls_back() {
        let feature = point(json!({ "NAME": null, "Description": "Riverside lawn" }));

        let (_, content) = bind(&feature, LayerKind::Park, &LayerFields::parks());

        assert_eq!(content.title, NO_NAME);
        assert_eq!(content.value_of("Description:"), Some("Riverside lawn"));
    }

    #[test]
    fn test_alternate_schema_field_names() {
        let feature = trail(json!({
            "name": "Stringers Ridge",
            "difficulty": "Moderate",
            "ada": false
        }));

        let (_, content) = bind(&feature, LayerKind::Trail, &LayerFields::trails());

        assert_eq!(content.title, "Stringers Ridge");
        assert_eq!(content.value_of("Surface Type:"), Some("Moderate"));
        assert_eq!(content.value_of("ADA Accessible:"), Some("No"));
    }

    #[test]
    fn test_external_link_and_escaping() {
        let feature = trail(json!({
            "TRAIL_NAME": "<Walnut> & Street",
            "EXT_LINK": "https://example.org/walnut"
        }));

        let (_, content) = bind(&feature, LayerKind::Trail, &LayerFields::trails());
        let html = content.to_html().into_string();

        assert!(html.contains("&lt;Walnut&gt; &amp; Street"));
        assert!(html.contains("href=\"https://example.org/walnut\""));
    }

    #[test]
    fn test_bind_does_not_modify_feature() {
        let feature = trail(json!({ "TRAIL_NAME": "Riverwalk" }));
        let before = feature.clone();

        let _ = bind(&feature, LayerKind::Trail, &LayerFields::trails());

        assert_eq!(feature, before);
    }
}
