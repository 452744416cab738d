// Rendering ports - narrow interfaces over the chart and map collaborators

/// A single line-chart collaborator.
///
/// The view models own all series bookkeeping (capacity, eviction, history
/// extraction); the surface only mirrors it. `reset` is the destroy/recreate
/// operation used by the admin history charts, where series may carry `None`
/// gaps for records missing the metric.
pub trait ChartSurface: Send {
    fn append(&mut self, label: &str, value: f64);
    /// Drop the oldest point from the chart.
    fn shift(&mut self);
    fn reset(&mut self, title: &str, labels: Vec<String>, values: Vec<Option<f64>>);
}

/// A map collaborator with one managed marker.
pub trait MapSurface: Send {
    fn place_marker(&mut self, lat: f64, lon: f64, label: &str);
    fn remove_marker(&mut self);
    fn open_popup(&mut self);
    /// Whether a position falls inside the current visible bounds.
    fn in_view(&self, lat: f64, lon: f64) -> bool;
    fn set_view(&mut self, lat: f64, lon: f64, zoom: u8);
    fn zoom(&self) -> u8;
    /// Recompute the widget size after a layout change.
    fn invalidate_size(&mut self);
}
