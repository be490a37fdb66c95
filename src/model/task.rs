use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Task attributes the core understands. Every other source column is carried
/// verbatim in [`Task::extra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    OutlineLevel,
    Id,
    Name,
    Start,
    Finish,
    PercentComplete,
    Predecessors,
    ResourceNames,
    Notes,
}

impl TaskField {
    /// Editor order.
    pub fn all() -> &'static [TaskField] {
        &[
            TaskField::OutlineLevel,
            TaskField::Id,
            TaskField::Name,
            TaskField::Start,
            TaskField::Finish,
            TaskField::PercentComplete,
            TaskField::Predecessors,
            TaskField::ResourceNames,
            TaskField::Notes,
        ]
    }

    /// Header name used by the usual MS Project CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            TaskField::OutlineLevel => "Outline Level",
            TaskField::Id => "ID",
            TaskField::Name => "Name",
            TaskField::Start => "Start",
            TaskField::Finish => "Finish",
            TaskField::PercentComplete => "% Complete",
            TaskField::Predecessors => "Predecessors",
            TaskField::ResourceNames => "Resource Names",
            TaskField::Notes => "Notes",
        }
    }
}

/// A single row of the schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Raw date-like text; see [`parse_date`].
    pub start: String,
    pub finish: String,
    pub percent_complete: f64,
    /// Comma-separated predecessor expressions, e.g. `"3FS+2 days, 5SS"`.
    pub predecessors: String,
    pub resource_names: String,
    pub notes: String,
    pub outline_level: u32,
    /// Unmapped source columns, keyed by column position in the source header.
    pub extra: BTreeMap<usize, String>,

    // Derived by the pipeline; never read before the current pass wrote them.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub collapsed: bool,
    pub visible: bool,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            start: String::new(),
            finish: String::new(),
            percent_complete: 0.0,
            predecessors: String::new(),
            resource_names: String::new(),
            notes: String::new(),
            outline_level: 1,
            extra: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            collapsed: false,
            visible: false,
        }
    }
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, outline_level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            outline_level: outline_level.max(1),
            ..Default::default()
        }
    }

    /// Builder-style date setter, mostly for tests and the sample schedule.
    pub fn with_dates(mut self, start: impl Into<String>, finish: impl Into<String>) -> Self {
        self.start = start.into();
        self.finish = finish.into();
        self
    }

    pub fn start_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.start)
    }

    pub fn finish_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.finish)
    }

    /// Both dates parse; only such tasks get a bar.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start_date()?, self.finish_date()?))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Resource name as used for filtering.
    pub fn resource(&self) -> &str {
        self.resource_names.trim()
    }

    /// Display name, falling back like the chart does for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "No Name"
        } else {
            &self.name
        }
    }

    /// Textual value of a mapped field, in export form.
    pub fn field(&self, field: TaskField) -> String {
        match field {
            TaskField::OutlineLevel => self.outline_level.to_string(),
            TaskField::Id => self.id.clone(),
            TaskField::Name => self.name.clone(),
            TaskField::Start => self.start.clone(),
            TaskField::Finish => self.finish.clone(),
            TaskField::PercentComplete => format_number(self.percent_complete),
            TaskField::Predecessors => self.predecessors.clone(),
            TaskField::ResourceNames => self.resource_names.clone(),
            TaskField::Notes => self.notes.clone(),
        }
    }

    /// Assign a mapped field from raw source text.
    pub fn set_field(&mut self, field: TaskField, value: &str) {
        match field {
            TaskField::OutlineLevel => self.outline_level = parse_outline_level(value),
            TaskField::Id => self.id = value.to_string(),
            TaskField::Name => self.name = value.to_string(),
            TaskField::Start => self.start = value.to_string(),
            TaskField::Finish => self.finish = value.to_string(),
            TaskField::PercentComplete => self.percent_complete = parse_percent(value),
            TaskField::Predecessors => self.predecessors = value.to_string(),
            TaskField::ResourceNames => self.resource_names = value.to_string(),
            TaskField::Notes => self.notes = value.to_string(),
        }
    }

    /// Notes with markup reduced to plain text for tooltips.
    pub fn notes_plain(&self) -> String {
        strip_markup(&self.notes)
    }
}

// ── Field parsing ────────────────────────────────────────────────────────────

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"))
}

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid float regex")
    })
}

/// Integer-prefix parse; anything below 1 (or no number at all) is level 1.
pub fn parse_outline_level(raw: &str) -> u32 {
    int_prefix()
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .filter(|level| *level >= 1)
        .map(|level| level.min(u32::MAX as i64) as u32)
        .unwrap_or(1)
}

/// Float-prefix parse (`"50%"` → 50); no number → 0.
pub fn parse_percent(raw: &str) -> f64 {
    float_prefix()
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%a %m/%d/%y %I:%M %p",
    "%a %m/%d/%y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%a %m/%d/%y",
    "%a %m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Lenient date parse. Slash dates are read month-first.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// `YYYY-MM-DD` for the editor; blank when the text does not parse.
pub fn format_date_input(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn line_break_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"))
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

/// `<br>` becomes a newline, other tags are dropped, common entities decoded.
pub fn strip_markup(html: &str) -> String {
    let with_breaks = line_break_tag().replace_all(html, "\n");
    let text = any_tag().replace_all(&with_breaks, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_level_defaults_to_one() {
        assert_eq!(parse_outline_level("3"), 3);
        assert_eq!(parse_outline_level(" 2.0"), 2);
        assert_eq!(parse_outline_level("4 deep"), 4);
        assert_eq!(parse_outline_level(""), 1);
        assert_eq!(parse_outline_level("abc"), 1);
        assert_eq!(parse_outline_level("0"), 1);
        assert_eq!(parse_outline_level("-2"), 1);
    }

    #[test]
    fn percent_uses_numeric_prefix() {
        assert_eq!(parse_percent("50"), 50.0);
        assert_eq!(parse_percent("50%"), 50.0);
        assert_eq!(parse_percent("12.5"), 12.5);
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("n/a"), 0.0);
    }

    #[test]
    fn whole_numbers_export_without_fraction() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn parses_common_schedule_date_forms() {
        let jan10 = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        for raw in [
            "2024-01-10",
            "1/10/2024",
            "01/10/24",
            "2024/01/10",
            "10.01.2024",
            "January 10, 2024",
            "Wed 1/10/24",
            "2024-01-10 08:00",
            "January 10, 2024 8:00 AM",
            "2024-01-10T08:00:00Z",
        ] {
            let parsed = parse_date(raw).unwrap_or_else(|| panic!("failed to parse {raw}"));
            assert_eq!(parsed.date(), jan10, "{raw}");
        }
        assert!(parse_date("").is_none());
        assert!(parse_date("next tuesday").is_none());
        assert!(parse_date("2024-13-45").is_none());
    }

    #[test]
    fn date_input_is_blank_for_garbage() {
        assert_eq!(format_date_input("1/10/2024"), "2024-01-10");
        assert_eq!(format_date_input("soon"), "");
    }

    #[test]
    fn strips_simple_markup() {
        let notes = "<p>Kick-off</p><br/>Bring <b>slides</b> &amp; coffee<BR>";
        assert_eq!(strip_markup(notes), "Kick-off\nBring slides & coffee");
    }

    #[test]
    fn blank_name_falls_back() {
        let task = Task::new("1", "", 1);
        assert_eq!(task.display_name(), "No Name");
    }

    #[test]
    fn set_field_parses_numeric_columns() {
        let mut task = Task::default();
        task.set_field(TaskField::OutlineLevel, "x");
        task.set_field(TaskField::PercentComplete, "75%");
        assert_eq!(task.outline_level, 1);
        assert_eq!(task.percent_complete, 75.0);
        assert_eq!(task.field(TaskField::PercentComplete), "75");
    }
}
