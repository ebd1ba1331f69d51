use crate::utils::geojson::AttributeValue;
use maud::{html, Markup};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PopupRow {
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub rows: Vec<PopupRow>,
}

impl PopupContent {
    pub fn tooltip(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn to_html(&self) -> Markup {
        html! {
            div.popup {
                span.popup-title { (self.title) }
                table {
                    @for row in &self.rows {
                        tr {
                            th { (row.label) }
                            td {
                                @if let Some(href) = &row.href {
                                    a href=(href) target="_blank" { (row.value) }
                                } @else {
                                    (row.value)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Null => String::new(),
        AttributeValue::Bool(true) => "Yes".to_string(),
        AttributeValue::Bool(false) => "No".to_string(),
        AttributeValue::Number(n) => n.to_string(),
        AttributeValue::Text(s) => s.clone(),
        AttributeValue::Composite(v) => v.to_string(),
    }
}

pub fn is_web_link(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
