//! Map viewport model for the festival list. Rendering and clustering belong
//! to the map widget; this only decides center, zoom and which markers exist.

use shared::protocol::FestivalRecord;

/// Roughly the middle of the Korean peninsula.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 36.2683,
    lng: 127.6358,
};
pub const OVERVIEW_LEVEL: u8 = 13;
pub const SINGLE_FESTIVAL_LEVEL: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

fn parse_coordinate(text: Option<&str>) -> Option<f64> {
    let value: f64 = text?.trim().parse().ok()?;
    (value.is_finite() && value != 0.0).then_some(value)
}

/// Both coordinates must parse to finite, non-zero numbers.
pub fn coordinates(record: &FestivalRecord) -> Option<GeoPoint> {
    Some(GeoPoint {
        lat: parse_coordinate(record.latitude.as_deref())?,
        lng: parse_coordinate(record.longitude.as_deref())?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker {
    /// Position in the shown list, not in the fetched batch.
    pub index: usize,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub level: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    pub fn for_festivals(festivals: &[&FestivalRecord]) -> Self {
        let markers: Vec<MapMarker> = festivals
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                coordinates(record).map(|position| MapMarker { index, position })
            })
            .collect();

        if let [only] = festivals {
            return Self {
                center: coordinates(only).unwrap_or(DEFAULT_CENTER),
                level: SINGLE_FESTIVAL_LEVEL,
                markers,
            };
        }

        Self {
            center: DEFAULT_CENTER,
            level: OVERVIEW_LEVEL,
            markers,
        }
    }

    pub fn marker(&self, index: usize) -> Option<&MapMarker> {
        self.markers.iter().find(|marker| marker.index == index)
    }

    /// Viewport position of `point`: (0, 0) is the top-left corner and
    /// (1, 1) the bottom-right. Points off screen fall outside that range.
    pub fn normalized(&self, point: GeoPoint) -> (f64, f64) {
        let span = span_degrees(self.level);
        (
            0.5 + (point.lng - self.center.lng) / span,
            0.5 - (point.lat - self.center.lat) / span,
        )
    }
}

/// Degrees visible across a square viewport at `level`. One level halves it.
pub fn span_degrees(level: u8) -> f64 {
    6.0 * 2f64.powi(i32::from(level) - i32::from(OVERVIEW_LEVEL))
}

/// Which marker's info overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerSelection {
    active: Option<usize>,
    shown_len: usize,
}

impl MarkerSelection {
    /// Called whenever the shown list changes. A lone festival opens automatically.
    pub fn reset_for(&mut self, shown_len: usize) {
        self.shown_len = shown_len;
        self.active = (shown_len == 1).then_some(0);
    }

    pub fn select(&mut self, index: usize) {
        if index < self.shown_len {
            self.active = Some(index);
        }
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(name: &str, lat: &str, lng: &str) -> FestivalRecord {
        FestivalRecord {
            name: name.to_string(),
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            ..FestivalRecord::default()
        }
    }

    #[test]
    fn many_festivals_use_overview_viewport() {
        let a = located("a", "35.1", "129.0");
        let b = located("b", "37.5", "127.0");
        let view = MapView::for_festivals(&[&a, &b]);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.level, OVERVIEW_LEVEL);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[1].index, 1);
    }

    #[test]
    fn single_festival_centers_and_zooms_in() {
        let a = located("a", "35.1", "129.0");
        let view = MapView::for_festivals(&[&a]);
        assert_eq!(view.center, GeoPoint { lat: 35.1, lng: 129.0 });
        assert_eq!(view.level, SINGLE_FESTIVAL_LEVEL);
    }

    #[test]
    fn single_festival_without_coordinates_keeps_default_center() {
        let a = FestivalRecord::named("nowhere", Some("2030-01-01"));
        let view = MapView::for_festivals(&[&a]);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.level, SINGLE_FESTIVAL_LEVEL);
        assert!(view.markers.is_empty());
    }

    #[test]
    fn markers_skip_missing_zero_and_garbage_coordinates() {
        let good = located("good", "33.5", "126.5");
        let zero = located("zero", "0", "126.5");
        let garbage = located("garbage", "north", "126.5");
        let missing = FestivalRecord::named("missing", None);
        let view = MapView::for_festivals(&[&zero, &good, &garbage, &missing]);
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].index, 1);
        assert!(view.marker(1).is_some());
        assert!(view.marker(0).is_none());
    }

    #[test]
    fn projection_places_center_in_the_middle() {
        let a = located("a", "35.1", "129.0");
        let b = located("b", "37.5", "127.0");
        let view = MapView::for_festivals(&[&a, &b]);
        assert_eq!(view.normalized(DEFAULT_CENTER), (0.5, 0.5));

        let (x, y) = view.normalized(view.markers[0].position);
        assert!(x > 0.5, "east of center is right");
        assert!(y > 0.5, "south of center is lower");
        assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));

        assert_eq!(span_degrees(OVERVIEW_LEVEL), 6.0);
        assert_eq!(span_degrees(OVERVIEW_LEVEL - 1), 3.0);
    }

    #[test]
    fn marker_selection_auto_opens_lone_festival_and_bounds_indices() {
        let mut selection = MarkerSelection::default();
        selection.reset_for(1);
        assert_eq!(selection.active(), Some(0));

        selection.reset_for(3);
        assert_eq!(selection.active(), None);
        selection.select(2);
        assert_eq!(selection.active(), Some(2));
        selection.select(3);
        assert_eq!(selection.active(), Some(2));
        selection.close();
        assert_eq!(selection.active(), None);

        selection.reset_for(0);
        selection.select(0);
        assert_eq!(selection.active(), None);
    }
}
