use crate::view::{Basemap, ViewState};
use crate::web::templates::{APP_SUMMARY, APP_TITLE};
use maud::{html, Markup};

const NAVIGATE: &str = "window.location.href = this.dataset.href";

pub fn view_link(view: &ViewState) -> String {
    format!("/?{}", view.query_string())
}

pub fn header_section() -> Markup {
    html! {
        header {
            span.heading { (APP_TITLE) }
            span.subheading { (APP_SUMMARY) }
        }
    }
}

fn basemap_selector(view: &ViewState) -> Markup {
    html! {
        fieldset {
            legend { "Select Base Map" }
            @for basemap in Basemap::ALL {
                @let next = view.after(|v| v.set_basemap(basemap));
                label {
                    input type="radio" name="basemap" value=(basemap.key())
                        checked[view.basemap == basemap]
                        data-href=(view_link(&next))
                        onchange=(NAVIGATE);
                    " " (basemap.tile_source().name)
                }
            }
        }
    }
}

fn layer_toggles(view: &ViewState) -> Markup {
    let parks = view.after(ViewState::toggle_parks);
    let trails = view.after(ViewState::toggle_trails);
    html! {
        fieldset {
            legend { "Layers" }
            label {
                input type="checkbox" name="parks"
                    checked[view.show_parks]
                    data-href=(view_link(&parks))
                    onchange=(NAVIGATE);
                " Show Parks"
            }
            label {
                input type="checkbox" name="trails"
                    checked[view.show_trails]
                    data-href=(view_link(&trails))
                    onchange=(NAVIGATE);
                " Show Trails"
            }
        }
    }
}

pub fn sidebar_section(view: &ViewState, counts: Option<&str>) -> Markup {
    html! {
        aside.sidebar {
            span.sidebar-heading { "Map Controls" }
            (basemap_selector(view))
            (layer_toggles(view))
            @if let Some(counts) = counts {
                div.info { (counts) }
            }
            a.button href=(view_link(&view.after(ViewState::reset))) { "Reset View" }
        }
    }
}

pub fn map_section() -> Markup {
    html! {
        div #map {}
    }
}

pub fn error_section(message: &str) -> Markup {
    html! {
        div.error {
            (message)
        }
    }
}

pub fn footer_section() -> Markup {
    html! {
        span.attribution {
            "Park and trail data courtesy of the City of Chattanooga"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_link_to_next_state() {
        let view = ViewState::default();
        let html = sidebar_section(&view, Some("Parks: 2 | Trails: 1")).into_string();

        assert!(html.contains("Parks: 2 | Trails: 1"));
        assert!(html.contains("data-href=\"/?basemap=satellite&amp;parks=true&amp;trails=true\""));
        assert!(html.contains("data-href=\"/?basemap=osm&amp;parks=false&amp;trails=true\""));
        assert!(html.contains("data-href=\"/?basemap=osm&amp;parks=true&amp;trails=false\""));
        assert!(html.contains("href=\"/?basemap=osm&amp;parks=true&amp;trails=true\""));
    }

    #[test]
    fn test_current_state_is_checked() {
        let view = ViewState::default().after(|v| {
            v.set_basemap(Basemap::Terrain);
            v.toggle_parks();
        });
        let html = sidebar_section(&view, None).into_string();

        assert!(html.contains("value=\"terrain\" checked"));
        assert!(!html.contains("value=\"osm\" checked"));
        assert!(html.contains("name=\"trails\" checked"));
        assert!(!html.contains("name=\"parks\" checked"));
        assert!(!html.contains("class=\"info\""));
    }
}
