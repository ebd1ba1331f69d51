use crate::utils::geojson::{FeatureCollection, GeometryMember};
use geo::{Area, BooleanOps, CoordsIter, Geometry, LineString, Polygon, RemoveRepeatedPoints, Validation};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub trait Sanitise {
    fn sanitise(&mut self) -> SanitiseReport;
}

/// Exactly one of these applies to every feature, judged after repair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryClass {
    Valid,
    Invalid,
    Empty,
    Missing,
}

impl fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GeometryClass::Valid => "valid",
            GeometryClass::Invalid => "invalid",
            GeometryClass::Empty => "empty",
            GeometryClass::Missing => "missing",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitiseReport {
    pub retained: usize,
    pub repaired: usize,
    pub invalid: usize,
    pub empty: usize,
    pub missing: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl SanitiseReport {
    pub fn removed(&self) -> usize {
        self.invalid + self.empty + self.missing
    }

    fn record(&mut self, class: GeometryClass) {
        match class {
            GeometryClass::Valid => self.retained += 1,
            GeometryClass::Invalid => self.invalid += 1,
            GeometryClass::Empty => self.empty += 1,
            GeometryClass::Missing => self.missing += 1,
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    fn error(&mut self, message: String) {
        tracing::error!("{message}");
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }
}

enum Inspection {
    Keep,
    Repaired(geojson::Geometry),
    Drop(GeometryClass),
}

impl Sanitise for FeatureCollection {
    fn sanitise(&mut self) -> SanitiseReport {
        let mut report = SanitiseReport::default();

        self.features.retain_mut(|feature| {
            let class = match feature.geometry.as_ref().map(inspect) {
                None => GeometryClass::Missing,
                Some(Inspection::Keep) => GeometryClass::Valid,
                Some(Inspection::Repaired(geometry)) => {
                    feature.geometry = Some(GeometryMember::Parsed(geometry));
                    report.repaired += 1;
                    GeometryClass::Valid
                }
                Some(Inspection::Drop(class)) => class,
            };
            report.record(class);
            class == GeometryClass::Valid
        });

        for (count, class) in [
            (report.invalid, GeometryClass::Invalid),
            (report.empty, GeometryClass::Empty),
            (report.missing, GeometryClass::Missing),
        ] {
            if count > 0 {
                report.warn(format!("Removed {count} features with {class} geometries"));
            }
        }

        if report.repaired > 0 {
            tracing::info!("Repaired {} geometries", report.repaired);
        }

        if self.is_empty() {
            report.error("No valid geometries remain after sanitation".to_string());
        }

        report
    }
}

fn inspect(member: &GeometryMember) -> Inspection {
    let raw = match member {
        GeometryMember::Parsed(raw) => raw,
        GeometryMember::Unparsed(value) if has_no_positions(value) => {
            return Inspection::Drop(GeometryClass::Empty)
        }
        GeometryMember::Unparsed(_) => return Inspection::Drop(GeometryClass::Invalid),
    };

    let geometry = match Geometry::<f64>::try_from(raw.clone()) {
        Ok(geometry) => geometry,
        Err(e) => {
            tracing::debug!("Could not convert geometry: {e}");
            return Inspection::Drop(GeometryClass::Invalid);
        }
    };

    if geometry.coords_count() == 0 {
        return Inspection::Drop(GeometryClass::Empty);
    }

    // Conversion closes open rings, so a valid result may still need re-encoding.
    if geometry.is_valid() && !has_open_ring(&raw.value) {
        return Inspection::Keep;
    }

    let repaired = repair(geometry);
    if repaired.is_valid() {
        Inspection::Repaired(geojson::Geometry::new(geojson::Value::from(&repaired)))
    } else {
        Inspection::Drop(GeometryClass::Invalid)
    }
}

/// Best-effort repair. Returns the input untouched unless the result is valid.
pub fn repair(geometry: Geometry<f64>) -> Geometry<f64> {
    if geometry.is_valid() {
        return geometry;
    }

    let mut candidate = drop_degenerate_holes(geometry.remove_repeated_points());
    if !candidate.is_valid() {
        candidate = resolve_self_intersections(candidate);
    }

    if candidate.is_valid() {
        candidate
    } else {
        geometry
    }
}

/// `{"type": "Point", "coordinates": []}` and friends, which the `geojson`
/// crate refuses to parse.
fn has_no_positions(value: &serde_json::Value) -> bool {
    fn hollow(value: &serde_json::Value) -> bool {
        value.as_array().is_some_and(|items| items.iter().all(hollow))
    }

    match (value.get("coordinates"), value.get("geometries")) {
        (Some(coordinates), _) => hollow(coordinates),
        (None, Some(geometries)) => hollow(geometries),
        (None, None) => false,
    }
}

fn has_open_ring(value: &geojson::Value) -> bool {
    let open = |rings: &Vec<Vec<Vec<f64>>>| rings.iter().any(|ring| ring.first() != ring.last());
    match value {
        geojson::Value::Polygon(rings) => open(rings),
        geojson::Value::MultiPolygon(polygons) => polygons.iter().any(open),
        geojson::Value::GeometryCollection(geometries) => {
            geometries.iter().any(|g| has_open_ring(&g.value))
        }
        _ => false,
    }
}

fn is_degenerate_ring(ring: &LineString<f64>) -> bool {
    ring.0.len() < 4 || Polygon::new(ring.clone(), vec![]).unsigned_area() == 0.0
}

fn without_degenerate_holes(polygon: Polygon<f64>) -> Polygon<f64> {
    let (exterior, interiors) = polygon.into_inner();
    let interiors = interiors
        .into_iter()
        .filter(|ring| !is_degenerate_ring(ring))
        .collect();
    Polygon::new(exterior, interiors)
}

fn drop_degenerate_holes(geometry: Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Polygon(polygon) => Geometry::Polygon(without_degenerate_holes(polygon)),
        Geometry::MultiPolygon(multi) => Geometry::MultiPolygon(
            multi.into_iter().map(without_degenerate_holes).collect(),
        ),
        other => other,
    }
}

fn resolve_self_intersections(geometry: Geometry<f64>) -> Geometry<f64> {
    // The boolean-op backend may panic on pathological rings; treat that as a failed repair.
    let unioned = match &geometry {
        Geometry::Polygon(polygon) => catch_unwind(AssertUnwindSafe(|| polygon.union(polygon))),
        Geometry::MultiPolygon(multi) => catch_unwind(AssertUnwindSafe(|| multi.union(multi))),
        _ => return geometry,
    };

    match unioned {
        Ok(mut multi) if multi.0.len() == 1 => multi.0.pop().map_or(geometry, Geometry::Polygon),
        Ok(multi) if !multi.0.is_empty() => Geometry::MultiPolygon(multi),
        _ => geometry,
    }
}
