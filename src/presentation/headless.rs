// Headless chart and map surfaces
//
// The binary has no browser attached, so the rendering collaborators are
// modeled headlessly: charts keep their series and log changes, the map keeps
// a center/zoom viewport good enough to answer the bounds-containment query.

use crate::application::surfaces::{ChartSurface, MapSurface};

pub struct HeadlessChart {
    name: String,
    labels: Vec<String>,
    values: Vec<Option<f64>>,
}

impl HeadlessChart {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ChartSurface for HeadlessChart {
    fn append(&mut self, label: &str, value: f64) {
        self.labels.push(label.to_string());
        self.values.push(Some(value));
        tracing::debug!(chart = %self.name, label, value, "chart append");
    }

    fn shift(&mut self) {
        if !self.labels.is_empty() {
            self.labels.remove(0);
            self.values.remove(0);
        }
    }

    fn reset(&mut self, title: &str, labels: Vec<String>, values: Vec<Option<f64>>) {
        tracing::debug!(chart = %self.name, title, points = values.len(), "chart reset");
        self.labels = labels;
        self.values = values;
    }
}

pub struct HeadlessMap {
    center: (f64, f64),
    zoom: u8,
    marker: Option<(f64, f64)>,
}

impl HeadlessMap {
    pub fn new(lat: f64, lon: f64, zoom: u8) -> Self {
        Self {
            center: (lat, lon),
            zoom,
            marker: None,
        }
    }

    /// Half the visible span in degrees; the viewport doubles each time the
    /// zoom level drops by one.
    fn half_span(&self) -> f64 {
        180.0 / f64::powi(2.0, i32::from(self.zoom))
    }
}

impl MapSurface for HeadlessMap {
    fn place_marker(&mut self, lat: f64, lon: f64, label: &str) {
        self.marker = Some((lat, lon));
        tracing::debug!(lat, lon, label, "map marker placed");
    }

    fn remove_marker(&mut self) {
        self.marker = None;
    }

    fn open_popup(&mut self) {
        tracing::debug!("map popup opened");
    }

    fn in_view(&self, lat: f64, lon: f64) -> bool {
        let half = self.half_span();
        (lat - self.center.0).abs() <= half && (lon - self.center.1).abs() <= half
    }

    fn set_view(&mut self, lat: f64, lon: f64, zoom: u8) {
        self.center = (lat, lon);
        self.zoom = zoom;
        tracing::debug!(lat, lon, zoom, "map recentered");
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn invalidate_size(&mut self) {
        tracing::debug!("map size invalidated");
    }
}
