use std::str::FromStr;

use crate::foundation::error::{TriplogError, TriplogResult};
use crate::trip::model::{DailyLogEntry, DutyStatus};

/// Hours in one calendar day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// What to do with a day whose duty buckets are implausible (negative, non-finite, or summing to
/// more than 24 h).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoursPolicy {
    /// Render the sheet, log a warning, and record the audit on the image.
    #[default]
    Flag,
    /// Refuse to render the sheet.
    Reject,
    /// Render the sheet without comment.
    Tolerate,
}

impl FromStr for HoursPolicy {
    type Err = TriplogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "reject" => Ok(Self::Reject),
            "tolerate" => Ok(Self::Tolerate),
            other => Err(TriplogError::validation(format!(
                "unknown hours policy '{other}' (expected flag, reject or tolerate)"
            ))),
        }
    }
}

/// Plausibility findings for one [`DailyLogEntry`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoursAudit {
    /// Sum of all four buckets, unclamped.
    pub total: f64,
    /// Buckets holding a negative value.
    pub negative: Vec<DutyStatus>,
    /// Buckets holding NaN or infinity.
    pub non_finite: Vec<DutyStatus>,
    /// The buckets add up to more than a day.
    pub exceeds_day: bool,
}

impl HoursAudit {
    /// Audit `entry`.
    pub fn of(entry: &DailyLogEntry) -> Self {
        let mut audit = Self {
            total: entry.total_hours(),
            ..Self::default()
        };
        for status in DutyStatus::ALL {
            let h = entry.hours(status);
            if !h.is_finite() {
                audit.non_finite.push(status);
            } else if h < 0.0 {
                audit.negative.push(status);
            }
        }
        // Tolerate float noise from fractional entries such as 7.1 + 16.9.
        audit.exceeds_day = audit.total.is_finite() && audit.total > HOURS_PER_DAY + 1e-9;
        audit
    }

    /// Return `true` when nothing was found.
    pub fn is_plausible(&self) -> bool {
        self.negative.is_empty() && self.non_finite.is_empty() && !self.exceeds_day
    }

    /// Human-readable summary of the findings.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.exceeds_day {
            parts.push(format!(
                "buckets sum to {} h (more than {HOURS_PER_DAY} h)",
                format_quantity(self.total)
            ));
        }
        for s in &self.negative {
            parts.push(format!("{} is negative", s.as_str()));
        }
        for s in &self.non_finite {
            parts.push(format!("{} is not a number", s.as_str()));
        }
        parts.join(", ")
    }

    /// Apply `policy` to this audit for the day `date`.
    pub fn enforce(&self, policy: HoursPolicy, date: &str) -> TriplogResult<()> {
        if self.is_plausible() {
            return Ok(());
        }
        match policy {
            HoursPolicy::Tolerate => Ok(()),
            HoursPolicy::Flag => {
                tracing::warn!(date, findings = %self.describe(), "implausible duty hours");
                Ok(())
            }
            HoursPolicy::Reject => Err(TriplogError::validation(format!(
                "log for {date} rejected: {}",
                self.describe()
            ))),
        }
    }
}

/// Format a quantity the way it is printed on the form: integers without a fractional part,
/// everything else with at most two decimals and no trailing zeros.
pub fn format_quantity(v: f64) -> String {
    if !v.is_finite() {
        return "N/A".to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        // Avoid printing "-0".
        return format!("{}", rounded.trunc() as i64);
    }
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/hours.rs"]
mod tests;
