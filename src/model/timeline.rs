use chrono::{Duration, NaiveDateTime};

use super::task::Task;

/// Padding added on both sides of the observed date range.
pub const WINDOW_PADDING_DAYS: i64 = 7;
/// Factor applied per zoom step.
pub const ZOOM_STEP: f64 = 1.5;
/// Tick labels closer than this to the left edge are suppressed.
pub const MIN_LABEL_X: f32 = 30.0;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Grid cadence, chosen from pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

impl TimelineScale {
    /// Cadence for a given density; thresholds compare `pixels_per_day × zoom`.
    pub fn for_density(pixels_per_day: f64, zoom: f64) -> Self {
        let density = pixels_per_day * zoom;
        if density > 80.0 {
            TimelineScale::Days
        } else if density > 20.0 {
            TimelineScale::Weeks
        } else {
            TimelineScale::Months
        }
    }

    pub fn step(&self) -> Duration {
        match self {
            TimelineScale::Days => Duration::days(1),
            TimelineScale::Weeks => Duration::days(7),
            TimelineScale::Months => Duration::days(30),
        }
    }

    pub fn label(&self, date: NaiveDateTime) -> String {
        match self {
            TimelineScale::Days | TimelineScale::Weeks => date.format("%b %-d").to_string(),
            TimelineScale::Months => date.format("%b %Y").to_string(),
        }
    }
}

/// Unbounded multiplicative zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(1.0)
    }
}

impl Zoom {
    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn zoom_in(&mut self) {
        self.0 *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.0 /= ZOOM_STEP;
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

/// Padded `[min, max]` range shared by every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DateWindow {
    /// Window over `rows`. Tasks with an unparseable start or finish are
    /// ignored; `None` when no task has a usable pair.
    pub fn from_tasks(tasks: &[Task], rows: &[usize]) -> Option<Self> {
        let mut min: Option<NaiveDateTime> = None;
        let mut max: Option<NaiveDateTime> = None;
        for &index in rows {
            let Some((start, finish)) = tasks[index].date_range() else {
                continue;
            };
            if min.map_or(true, |m| start < m) {
                min = Some(start);
            }
            if max.map_or(true, |m| finish > m) {
                max = Some(finish);
            }
        }
        let padding = Duration::days(WINDOW_PADDING_DAYS);
        Some(Self {
            min: min? - padding,
            max: max? + padding,
        })
    }

    pub fn span_days(&self) -> f64 {
        (self.max - self.min).num_milliseconds() as f64 / MS_PER_DAY
    }
}

/// One grid line, optionally labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub date: NaiveDateTime,
    pub x: f32,
    pub label: Option<String>,
}

/// Maps dates to chart x offsets for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineViewport {
    pub window: DateWindow,
    /// Viewport width already multiplied by the zoom factor.
    pub chart_width: f32,
    pub zoom: Zoom,
}

impl TimelineViewport {
    pub fn new(window: DateWindow, viewport_width: f32, zoom: Zoom) -> Self {
        Self {
            window,
            chart_width: (viewport_width as f64 * zoom.factor()) as f32,
            zoom,
        }
    }

    /// `(date - min) / (max - min) × chart_width`.
    pub fn date_to_x(&self, date: NaiveDateTime) -> f32 {
        let span = (self.window.max - self.window.min).num_milliseconds() as f64;
        if span <= 0.0 {
            return 0.0;
        }
        let offset = (date - self.window.min).num_milliseconds() as f64;
        (offset / span * self.chart_width as f64) as f32
    }

    /// Width in pixels between two dates (negative if `to` precedes `from`).
    pub fn span_to_width(&self, from: NaiveDateTime, to: NaiveDateTime) -> f32 {
        self.date_to_x(to) - self.date_to_x(from)
    }

    pub fn pixels_per_day(&self) -> f64 {
        let days = self.window.span_days();
        if days <= 0.0 {
            0.0
        } else {
            self.chart_width as f64 / days
        }
    }

    pub fn scale(&self) -> TimelineScale {
        TimelineScale::for_density(self.pixels_per_day(), self.zoom.factor())
    }

    /// Grid lines from `min` in steps of the current cadence, up to `max`.
    pub fn ticks(&self) -> Vec<Tick> {
        let scale = self.scale();
        let step = scale.step();
        let mut ticks = Vec::new();
        let mut date = self.window.min;
        while date <= self.window.max {
            let x = self.date_to_x(date);
            let label = (x > MIN_LABEL_X).then(|| scale.label(date));
            ticks.push(Tick { date, x, label });
            date += step;
        }
        ticks
    }
}
