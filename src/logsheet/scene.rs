use kurbo::Shape;

use crate::foundation::core::{BezPath, CanvasSize, Point, Rect, Rgba8};
use crate::foundation::error::TriplogResult;
use crate::logsheet::hours::{HOURS_PER_DAY, HoursAudit, HoursPolicy, format_quantity};
use crate::logsheet::layout::{FIELD_INK, LABEL_INK, LogSheetLayout, bar_color, marker_color};
use crate::trip::model::{DailyLogEntry, DutyStatus, Stop, StopKind, Trip};

/// Which form field a piece of text fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Four-digit year.
    Year,
    /// Two-digit month.
    Month,
    /// Two-digit day of month.
    Day,
    /// Carrier name.
    Company,
    /// Driver name.
    Driver,
    /// Truck number.
    Truck,
    /// Total trip miles.
    Miles,
    /// A box the form has no data for.
    Placeholder,
    /// Hours logged for one status.
    StatusHours(DutyStatus),
    /// Sum of all four statuses.
    TotalHours,
    /// Driving plus on-duty hours, inside the circle.
    WorkedHours,
    /// Label printed right of a bar.
    BarLabel(DutyStatus),
    /// Stop annotation, by position in the trip's stop list.
    Stop(usize),
    /// "+N more" marker for stops that did not fit.
    StopOverflow,
}

/// One drawing step of a log sheet.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Stretch the template over the whole canvas.
    Template,
    /// Single line of text with its baseline starting at `origin`.
    Text {
        /// Field being filled.
        field: TextField,
        /// Text content.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Font size in pixels.
        size_px: f32,
        /// Ink color.
        color: Rgba8,
    },
    /// Horizontal duty-status bar.
    Bar {
        /// Status the bar represents.
        status: DutyStatus,
        /// Bar geometry.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Outline circle.
    StrokeCircle {
        /// Circle centre.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// Filled category marker in front of a stop line.
    Marker {
        /// Stop category.
        kind: StopKind,
        /// Marker outline.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
}

/// Options that shape how one sheet is composed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneOpts {
    /// Handling of implausible duty hours.
    pub hours_policy: HoursPolicy,
}

/// Everything needed to rasterize one log sheet: an ordered list of draw commands applied to a
/// fresh canvas, plus the hours audit of the day.
#[derive(Clone, Debug, PartialEq)]
pub struct LogSheetScene {
    /// Canvas the commands are positioned in.
    pub canvas: CanvasSize,
    /// Commands in paint order.
    pub commands: Vec<DrawCommand>,
    /// Plausibility findings for the day.
    pub audit: HoursAudit,
}

impl LogSheetScene {
    /// Text of the first command filling `field`.
    pub fn text(&self, field: TextField) -> Option<&str> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Text { field: f, text, .. } if *f == field => Some(text.as_str()),
            _ => None,
        })
    }

    /// Geometry of the bar for `status`, if one is drawn.
    pub fn bar(&self, status: DutyStatus) -> Option<Rect> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Bar { status: s, rect, .. } if *s == status => Some(*rect),
            _ => None,
        })
    }

    /// Stop lines in paint order, overflow marker included.
    pub fn stop_lines(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    field: TextField::Stop(_) | TextField::StopOverflow,
                    text,
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Width of the bar for `hours` in `layout`, or `None` when no bar is drawn.
///
/// Zero, negative and non-finite hours draw nothing; more than a day is capped at the full bar.
pub fn bar_width(layout: &LogSheetLayout, hours: f64) -> Option<f64> {
    let width = (hours / HOURS_PER_DAY) * layout.bar_max_width();
    if width > 0.0 && width.is_finite() {
        Some(width.min(layout.bar_max_width()))
    } else {
        None
    }
}

/// Compose the log sheet for `entry` of `trip`.
pub fn compose_log_sheet(
    trip: &Trip,
    entry: &DailyLogEntry,
    layout: &LogSheetLayout,
    opts: &SceneOpts,
) -> TriplogResult<LogSheetScene> {
    let date = entry.parse_date()?;
    let audit = HoursAudit::of(entry);
    audit.enforce(opts.hours_policy, &entry.date)?;

    let mut cmds = vec![DrawCommand::Template];
    let field_px = layout.field_size_px();
    let field = |field: TextField, text: String, origin: Point| DrawCommand::Text {
        field,
        text,
        origin,
        size_px: field_px,
        color: FIELD_INK,
    };

    cmds.push(field(
        TextField::Year,
        date.format("%Y").to_string(),
        layout.date_year(),
    ));
    cmds.push(field(
        TextField::Month,
        date.format("%m").to_string(),
        layout.date_month(),
    ));
    cmds.push(field(
        TextField::Day,
        date.format("%d").to_string(),
        layout.date_day(),
    ));

    for origin in layout.placeholders() {
        cmds.push(field(TextField::Placeholder, "N/A".to_string(), origin));
    }

    cmds.push(field(
        TextField::Driver,
        trip.driver_name.clone(),
        layout.driver_name(),
    ));
    cmds.push(field(
        TextField::Company,
        non_blank_or_na(trip.company.as_deref()),
        layout.company(),
    ));
    cmds.push(field(
        TextField::Truck,
        non_blank_or_na(trip.truck_number.as_deref()),
        layout.truck_number(),
    ));
    cmds.push(field(
        TextField::Miles,
        format!("{} miles", format_quantity(trip.total_miles)),
        layout.total_miles(),
    ));

    for status in DutyStatus::ALL {
        cmds.push(field(
            TextField::StatusHours(status),
            format_quantity(entry.hours(status)),
            layout.status_hours(status),
        ));
    }
    cmds.push(field(
        TextField::TotalHours,
        format_quantity(audit.total),
        layout.total_hours(),
    ));

    cmds.push(DrawCommand::StrokeCircle {
        center: layout.worked_center(),
        radius: layout.worked_radius(),
        width: layout.worked_stroke(),
        color: FIELD_INK,
    });
    cmds.push(DrawCommand::Text {
        field: TextField::WorkedHours,
        text: format_quantity(entry.worked_hours()),
        origin: layout.worked_label(),
        size_px: layout.worked_size_px(),
        color: FIELD_INK,
    });

    for status in DutyStatus::ALL {
        let hours = entry.hours(status);
        let Some(width) = bar_width(layout, hours) else {
            continue;
        };
        let row_y = layout.status_row_y(status);
        let x = layout.bar_x();
        cmds.push(DrawCommand::Bar {
            status,
            rect: Rect::new(x, row_y - layout.bar_height(), x + width, row_y),
            color: bar_color(status),
        });
        cmds.push(DrawCommand::Text {
            field: TextField::BarLabel(status),
            text: format!("{}h", format_quantity(hours)),
            origin: Point::new(x + layout.bar_label_gap() + width, row_y),
            size_px: field_px,
            color: LABEL_INK,
        });
    }

    push_stop_lines(&mut cmds, &trip.stops, layout);

    Ok(LogSheetScene {
        canvas: layout.canvas(),
        commands: cmds,
        audit,
    })
}

fn non_blank_or_na(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Stop annotation text for `stop`.
pub fn stop_line_text(stop: &Stop) -> String {
    format!(
        "{} ({}) - {} min",
        stop.location,
        stop.stop_type,
        format_quantity(stop.duration)
    )
}

// Lines are capped to the form's capacity; when stops overflow, the last line that fits becomes
// a "+N more" marker.
fn push_stop_lines(cmds: &mut Vec<DrawCommand>, stops: &[Stop], layout: &LogSheetLayout) {
    let capacity = layout.stop_capacity();
    if capacity == 0 || stops.is_empty() {
        return;
    }
    let shown = if stops.len() > capacity {
        capacity - 1
    } else {
        stops.len()
    };

    let origin = layout.stop_origin();
    let size_px = layout.stop_size_px();
    let marker = layout.stop_marker_size();
    for (i, stop) in stops.iter().take(shown).enumerate() {
        let y = origin.y + layout.stop_line_height() * i as f64;
        let center = Point::new(origin.x + marker / 2.0, y - marker / 2.0);
        cmds.push(DrawCommand::Marker {
            kind: stop.stop_type,
            path: marker_path(stop.stop_type, center, marker),
            color: marker_color(stop.stop_type),
        });
        cmds.push(DrawCommand::Text {
            field: TextField::Stop(i),
            text: stop_line_text(stop),
            origin: Point::new(origin.x + layout.stop_text_indent(), y),
            size_px,
            color: FIELD_INK,
        });
    }

    let hidden = stops.len() - shown;
    if hidden > 0 {
        let y = origin.y + layout.stop_line_height() * shown as f64;
        cmds.push(DrawCommand::Text {
            field: TextField::StopOverflow,
            text: format!("+{hidden} more"),
            origin: Point::new(origin.x + layout.stop_text_indent(), y),
            size_px,
            color: FIELD_INK,
        });
    }
}

/// Outline of the category marker centred on `center` with edge length `size`.
///
/// Fuel is a circle, rest a square, pickup a diamond and dropoff a triangle.
pub fn marker_path(kind: StopKind, center: Point, size: f64) -> BezPath {
    let r = size / 2.0;
    match kind {
        StopKind::Fuel => kurbo::Circle::new(center, r).to_path(0.1),
        StopKind::Rest => Rect::from_center_size(center, (size, size)).to_path(0.1),
        StopKind::Pickup => {
            let mut p = BezPath::new();
            p.move_to((center.x, center.y - r));
            p.line_to((center.x + r, center.y));
            p.line_to((center.x, center.y + r));
            p.line_to((center.x - r, center.y));
            p.close_path();
            p
        }
        StopKind::Dropoff => {
            let mut p = BezPath::new();
            p.move_to((center.x, center.y - r));
            p.line_to((center.x + r, center.y + r));
            p.line_to((center.x - r, center.y + r));
            p.close_path();
            p
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/scene.rs"]
mod tests;
