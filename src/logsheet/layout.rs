use crate::foundation::core::{CanvasSize, Point, Rgba8};
use crate::trip::model::{DutyStatus, StopKind};

/// Ink used for form fields.
pub const FIELD_INK: Rgba8 = Rgba8::rgb(0x00, 0x00, 0xff);

/// Ink used for bar labels.
pub const LABEL_INK: Rgba8 = Rgba8::BLACK;

/// Bar color for a duty status.
pub fn bar_color(status: DutyStatus) -> Rgba8 {
    match status {
        DutyStatus::OffDuty => Rgba8::rgb(0x3b, 0x82, 0xf6),
        DutyStatus::SleeperBerth => Rgba8::rgb(0x93, 0x33, 0xea),
        DutyStatus::Driving => Rgba8::rgb(0xef, 0x44, 0x44),
        DutyStatus::OnDuty => Rgba8::rgb(0xf5, 0x9e, 0x0b),
    }
}

/// Marker color for a stop category.
pub fn marker_color(kind: StopKind) -> Rgba8 {
    match kind {
        StopKind::Fuel => Rgba8::rgb(0x16, 0xa3, 0x4a),
        StopKind::Rest => Rgba8::rgb(0xdc, 0x26, 0x26),
        StopKind::Pickup => Rgba8::rgb(0xa1, 0x62, 0x07),
        StopKind::Dropoff => Rgba8::rgb(0x25, 0x63, 0xeb),
    }
}

/// Geometry of the log-sheet form.
///
/// Anchors are authored against a 1000 px wide canvas. Fractional anchors are taken of the actual
/// canvas size; fixed pixel anchors are scaled by `width / 1000` so they land on the same form
/// boxes at any width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogSheetLayout {
    canvas: CanvasSize,
}

impl LogSheetLayout {
    /// Layout for `canvas`.
    pub fn new(canvas: CanvasSize) -> Self {
        Self { canvas }
    }

    /// Canvas this layout positions into.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    fn s(&self) -> f64 {
        self.canvas.scale()
    }

    fn w(&self) -> f64 {
        f64::from(self.canvas.width)
    }

    fn h(&self) -> f64 {
        f64::from(self.canvas.height)
    }

    fn px(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.s(), y * self.s())
    }

    fn frac(&self, fx: f64, fy: f64) -> Point {
        Point::new(fx * self.w(), fy * self.h())
    }

    /// Font size of form fields.
    pub fn field_size_px(&self) -> f32 {
        (27.0 * self.s()) as f32
    }

    /// Font size of the worked-hours label.
    pub fn worked_size_px(&self) -> f32 {
        (40.0 * self.s()) as f32
    }

    /// Font size of stop lines.
    pub fn stop_size_px(&self) -> f32 {
        (22.0 * self.s()) as f32
    }

    /// Baseline origin of the year.
    pub fn date_year(&self) -> Point {
        self.frac(0.555, 0.095)
    }

    /// Baseline origin of the month.
    pub fn date_month(&self) -> Point {
        self.frac(0.43, 0.095)
    }

    /// Baseline origin of the day of month.
    pub fn date_day(&self) -> Point {
        self.frac(0.5, 0.095)
    }

    /// Carrier name box.
    pub fn company(&self) -> Point {
        self.px(550.0, 235.0)
    }

    /// Driver name box.
    pub fn driver_name(&self) -> Point {
        self.px(485.0, 425.0)
    }

    /// Truck number box.
    pub fn truck_number(&self) -> Point {
        self.px(150.0, 390.0)
    }

    /// Total miles box.
    pub fn total_miles(&self) -> Point {
        self.frac(0.124, 0.152)
    }

    /// Boxes the form has no data for; they are printed as "N/A".
    pub fn placeholders(&self) -> [Point; 4] {
        [
            self.px(600.0, 350.0),
            self.px(600.0, 295.0),
            self.px(775.0, 430.0),
            self.frac(0.3, 0.152),
        ]
    }

    /// Baseline y of the row for `status`; bars sit directly above it.
    pub fn status_row_y(&self, status: DutyStatus) -> f64 {
        let y = match status {
            DutyStatus::OffDuty => 550.0,
            DutyStatus::SleeperBerth => 600.0,
            DutyStatus::Driving => 650.0,
            DutyStatus::OnDuty => 705.0,
        };
        y * self.s()
    }

    /// X of the per-status hour totals column.
    pub fn hours_column_x(&self) -> f64 {
        890.0 * self.s()
    }

    /// Baseline origin of the hour value for `status`.
    pub fn status_hours(&self, status: DutyStatus) -> Point {
        Point::new(self.hours_column_x(), self.status_row_y(status))
    }

    /// Baseline origin of the total hours value.
    pub fn total_hours(&self) -> Point {
        self.px(890.0, 795.0)
    }

    /// Left edge of every bar.
    pub fn bar_x(&self) -> f64 {
        300.0 * self.s()
    }

    /// Bar thickness.
    pub fn bar_height(&self) -> f64 {
        20.0 * self.s()
    }

    /// Width of a full 24 h bar.
    pub fn bar_max_width(&self) -> f64 {
        0.6 * self.w()
    }

    /// Gap between a bar's right edge and its label.
    pub fn bar_label_gap(&self) -> f64 {
        10.0 * self.s()
    }

    /// Centre of the worked-hours circle.
    pub fn worked_center(&self) -> Point {
        Point::new(0.72 * self.w(), 884.0 * self.s())
    }

    /// Radius of the worked-hours circle.
    pub fn worked_radius(&self) -> f64 {
        50.0 * self.s()
    }

    /// Stroke width of the worked-hours circle.
    pub fn worked_stroke(&self) -> f64 {
        5.0 * self.s()
    }

    /// Baseline origin of the worked-hours label.
    pub fn worked_label(&self) -> Point {
        Point::new(0.7 * self.w(), 895.0 * self.s())
    }

    /// Baseline origin of the first stop line (marker included).
    pub fn stop_origin(&self) -> Point {
        self.px(250.0, 850.0)
    }

    /// Vertical distance between stop lines.
    pub fn stop_line_height(&self) -> f64 {
        40.0 * self.s()
    }

    /// Edge length of a stop marker.
    pub fn stop_marker_size(&self) -> f64 {
        16.0 * self.s()
    }

    /// Horizontal offset from the line origin to the stop text.
    pub fn stop_text_indent(&self) -> f64 {
        24.0 * self.s()
    }

    /// Number of stop lines that fit above the bottom margin.
    pub fn stop_capacity(&self) -> usize {
        let bottom = self.h() - 40.0 * self.s();
        let first = self.stop_origin().y;
        if first > bottom {
            return 0;
        }
        ((bottom - first) / self.stop_line_height()).floor() as usize + 1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/layout.rs"]
mod tests;
