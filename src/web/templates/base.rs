use crate::web::templates::{APP_SUMMARY, APP_TITLE};
use maud::{html, Markup, DOCTYPE};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub fn base_template(content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (head_section())
            body {
                (content)
            }
        }
    }
}

fn head_section() -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="description" content=(APP_SUMMARY);
            title { (APP_TITLE) }
            link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🌲</text></svg>";
            (leaflet_resources())
        }
    }
}

/// Leaflet must load in the head; the map bootstrap script runs inline in the body.
fn leaflet_resources() -> Markup {
    html! {
        link rel="stylesheet"
            href=(LEAFLET_CSS)
            integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY="
            crossorigin="";
        script src=(LEAFLET_JS)
            integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo="
            crossorigin=""{}
    }
}
