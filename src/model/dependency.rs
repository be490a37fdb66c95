//! Predecessor expressions and connector routing.
//!
//! A task's predecessor field is a comma-separated list such as
//! `"3FS+2 days, 7SS"`. Each expression names the predecessor by id and
//! optionally a relation kind and a lag. The lag is parsed and kept, but
//! connectors are anchored on the bars as drawn; it never moves an anchor.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::task::Task;

/// Horizontal run before and after the vertical leg of a connector.
pub const CONNECTOR_GAP: f32 = 5.0;
/// Arrowhead length along the final segment.
pub const ARROW_LENGTH: f32 = 8.0;
/// Arrowhead half-width across the final segment.
pub const ARROW_HALF_WIDTH: f32 = 3.5;

/// Represents the type of dependency between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

/// Which side of a bar a connector attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEdge {
    Left,
    Right,
}

impl DependencyKind {
    /// Parse a two-letter code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "FS" => Some(DependencyKind::FinishToStart),
            "SS" => Some(DependencyKind::StartToStart),
            "FF" => Some(DependencyKind::FinishToFinish),
            "SF" => Some(DependencyKind::StartToFinish),
            _ => None,
        }
    }

    /// `(predecessor edge, successor edge)`.
    pub fn anchors(&self) -> (BarEdge, BarEdge) {
        match self {
            DependencyKind::FinishToStart => (BarEdge::Right, BarEdge::Left),
            DependencyKind::StartToStart => (BarEdge::Left, BarEdge::Left),
            DependencyKind::FinishToFinish => (BarEdge::Right, BarEdge::Right),
            DependencyKind::StartToFinish => (BarEdge::Left, BarEdge::Right),
        }
    }
}

/// Lag term of a predecessor expression, e.g. `+2 days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lag {
    /// `-1` for a lead, `1` otherwise.
    pub sign: i8,
    pub amount: Option<u32>,
    pub unit: Option<String>,
}

/// One parsed predecessor expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredecessorRef {
    pub task_id: String,
    pub kind: DependencyKind,
    pub lag: Option<Lag>,
}

/// Lag digits either follow a sign (spacing allowed) or sit directly against
/// the id or kind, so `"3 5"` is not read as a lag.
fn predecessor_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(\d+)(?:\s*(FS|SS|FF|SF))?(?:\s*([+-])\s*(\d+)?|(\d+))?\s*(e?(?:days?|d|weeks?|wks?|w|hours?|hrs?|h|minutes?|mins?|m|months?|mons?|mo))?$",
        )
        .expect("valid predecessor regex")
    })
}

fn leading_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)").expect("valid id regex"))
}

/// Parse one expression. `None` means "skip this dependency".
pub fn parse_predecessor(expr: &str) -> Option<PredecessorRef> {
    let caps = predecessor_pattern().captures(expr.trim())?;
    let task_id = caps.get(1)?.as_str().to_string();
    let kind = match caps.get(2) {
        Some(code) => DependencyKind::from_code(code.as_str())?,
        None => DependencyKind::FinishToStart,
    };
    let sign = caps.get(3).map(|m| m.as_str());
    let amount = caps
        .get(4)
        .or_else(|| caps.get(5))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let unit = caps.get(6).map(|m| m.as_str().to_ascii_lowercase());
    let lag = if sign.is_some() || amount.is_some() || unit.is_some() {
        Some(Lag {
            sign: if sign == Some("-") { -1 } else { 1 },
            amount,
            unit,
        })
    } else {
        None
    };
    Some(PredecessorRef { task_id, kind, lag })
}

/// Parse every expression in a predecessor field, skipping malformed ones.
pub fn parse_predecessors(field: &str) -> Vec<PredecessorRef> {
    field
        .split(',')
        .filter(|expr| !expr.trim().is_empty())
        .filter_map(parse_predecessor)
        .collect()
}

/// Drop every expression whose leading id is in `removed`.
///
/// Surviving expressions are trimmed and rejoined with `", "`. Expressions
/// without a leading id are kept as written.
pub fn scrub_predecessors(field: &str, removed: &dyn Fn(&str) -> bool) -> String {
    field
        .split(',')
        .map(str::trim)
        .filter(|expr| !expr.is_empty())
        .filter(|expr| match leading_id().captures(expr) {
            Some(caps) => !removed(&caps[1]),
            None => true,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A point in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placed bar of a task in the current render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f32,
    /// Top of the drawn bar.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarGeometry {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn edge_x(&self, edge: BarEdge) -> f32 {
        match edge {
            BarEdge::Left => self.x,
            BarEdge::Right => self.x + self.width,
        }
    }

    pub fn anchor(&self, edge: BarEdge) -> Point {
        Point::new(self.edge_x(edge), self.center_y())
    }
}

/// Orthogonal connector between two bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub predecessor: usize,
    pub successor: usize,
    pub kind: DependencyKind,
    pub lag: Option<Lag>,
    pub path: Vec<Point>,
}

impl Connector {
    /// Triangle `[tip, base left, base right]` whose base sits on the last
    /// path point, pointing along the final segment.
    pub fn arrowhead(&self) -> Option<[Point; 3]> {
        let n = self.path.len();
        if n < 2 {
            return None;
        }
        let end = self.path[n - 1];
        // Walk back past zero-length segments to find a direction.
        let from = self.path[..n - 1]
            .iter()
            .rev()
            .find(|p| (p.x - end.x).abs() > f32::EPSILON || (p.y - end.y).abs() > f32::EPSILON)?;
        let (dx, dy) = (end.x - from.x, end.y - from.y);
        let len = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = (dx / len, dy / len);
        let tip = Point::new(end.x + ux * ARROW_LENGTH, end.y + uy * ARROW_LENGTH);
        let left = Point::new(end.x - uy * ARROW_HALF_WIDTH, end.y + ux * ARROW_HALF_WIDTH);
        let right = Point::new(end.x + uy * ARROW_HALF_WIDTH, end.y - ux * ARROW_HALF_WIDTH);
        Some([tip, left, right])
    }
}

/// Manhattan route from the predecessor anchor to the successor anchor.
pub fn route(predecessor: &BarGeometry, successor: &BarGeometry, kind: DependencyKind) -> Vec<Point> {
    let (from_edge, to_edge) = kind.anchors();
    let start = predecessor.anchor(from_edge);
    let end = successor.anchor(to_edge);
    vec![
        start,
        Point::new(start.x + CONNECTOR_GAP, start.y),
        Point::new(start.x + CONNECTOR_GAP, end.y),
        Point::new(end.x - CONNECTOR_GAP, end.y),
        end,
    ]
}

/// Resolve the predecessor fields of `rows` against the placed bars.
///
/// `bars` is keyed by task id; when ids repeat the later row wins. A
/// dependency is dropped when either end has no bar in this pass.
pub fn resolve_dependencies(
    tasks: &[Task],
    rows: &[usize],
    bars: &HashMap<String, (usize, BarGeometry)>,
) -> Vec<Connector> {
    let mut connectors = Vec::new();
    for &index in rows {
        let task = &tasks[index];
        if task.predecessors.trim().is_empty() {
            continue;
        }
        let Some(&(successor, successor_bar)) = bars.get(&task.id) else {
            continue;
        };
        for reference in parse_predecessors(&task.predecessors) {
            let Some(&(predecessor, predecessor_bar)) = bars.get(&reference.task_id) else {
                continue;
            };
            connectors.push(Connector {
                predecessor,
                successor,
                kind: reference.kind,
                path: route(&predecessor_bar, &successor_bar, reference.kind),
                lag: reference.lag,
            });
        }
    }
    connectors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(x: f32, y: f32, width: f32) -> BarGeometry {
        BarGeometry {
            x,
            y,
            width,
            height: 20.0,
        }
    }

    #[test]
    fn lag_is_parsed_but_kind_is_what_matters() {
        let parsed = parse_predecessor("3FS+2 days").unwrap();
        assert_eq!(parsed.task_id, "3");
        assert_eq!(parsed.kind, DependencyKind::FinishToStart);
        assert_eq!(
            parsed.lag,
            Some(Lag {
                sign: 1,
                amount: Some(2),
                unit: Some("days".into()),
            })
        );
    }

    #[test]
    fn lag_digits_need_a_sign_unless_adjacent() {
        assert!(parse_predecessor("3 5").is_none());
        assert!(parse_predecessor("3SS 5 days").is_none());
        assert_eq!(parse_predecessor("3FS + 2d").unwrap().lag.unwrap().amount, Some(2));
        let adjacent = parse_predecessor("3FS5").unwrap();
        assert_eq!(adjacent.kind, DependencyKind::FinishToStart);
        assert_eq!(
            adjacent.lag,
            Some(Lag {
                sign: 1,
                amount: Some(5),
                unit: None,
            })
        );
    }

    #[test]
    fn kind_defaults_to_finish_to_start() {
        let parsed = parse_predecessor(" 12 ").unwrap();
        assert_eq!(parsed.task_id, "12");
        assert_eq!(parsed.kind, DependencyKind::FinishToStart);
        assert_eq!(parsed.lag, None);
    }

    #[test]
    fn kinds_are_case_insensitive() {
        assert_eq!(parse_predecessor("4ss").unwrap().kind, DependencyKind::StartToStart);
        assert_eq!(parse_predecessor("4Ff").unwrap().kind, DependencyKind::FinishToFinish);
        assert_eq!(parse_predecessor("4SF-1d").unwrap().kind, DependencyKind::StartToFinish);
        assert_eq!(parse_predecessor("4SF-1d").unwrap().lag.unwrap().sign, -1);
    }

    #[test]
    fn malformed_expressions_are_skipped_individually() {
        assert!(parse_predecessor("abc").is_none());
        assert!(parse_predecessor("3XY").is_none());
        assert!(parse_predecessor("3F").is_none());
        assert!(parse_predecessor("3FS+2 fortnights").is_none());

        let parsed = parse_predecessors("2, oops, 5SS, ,7FF+1 wk");
        let ids: Vec<&str> = parsed.iter().map(|p| p.task_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5", "7"]);
    }

    #[test]
    fn anchors_follow_relation_kind() {
        let pred = bar(100.0, 40.0, 50.0);
        let succ = bar(200.0, 70.0, 30.0);
        let cases = [
            (DependencyKind::FinishToStart, 150.0, 200.0),
            (DependencyKind::StartToStart, 100.0, 200.0),
            (DependencyKind::FinishToFinish, 150.0, 230.0),
            (DependencyKind::StartToFinish, 100.0, 230.0),
        ];
        for (kind, from_x, to_x) in cases {
            let path = route(&pred, &succ, kind);
            assert_eq!(path.first(), Some(&Point::new(from_x, 50.0)), "{kind:?}");
            assert_eq!(path.last(), Some(&Point::new(to_x, 80.0)), "{kind:?}");
        }
    }

    #[test]
    fn route_is_orthogonal_with_fixed_gap() {
        let path = route(&bar(100.0, 40.0, 50.0), &bar(20.0, 100.0, 30.0), DependencyKind::FinishToStart);
        assert_eq!(
            path,
            vec![
                Point::new(150.0, 50.0),
                Point::new(155.0, 50.0),
                Point::new(155.0, 110.0),
                Point::new(15.0, 110.0),
                Point::new(20.0, 110.0),
            ]
        );
        for pair in path.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
    }

    #[test]
    fn arrowhead_points_along_last_segment() {
        let connector = Connector {
            predecessor: 0,
            successor: 1,
            kind: DependencyKind::FinishToStart,
            lag: None,
            path: route(&bar(0.0, 0.0, 10.0), &bar(50.0, 30.0, 10.0), DependencyKind::FinishToStart),
        };
        let [tip, left, right] = connector.arrowhead().unwrap();
        assert_eq!(tip, Point::new(50.0 + ARROW_LENGTH, 40.0));
        assert_eq!(left.x, 50.0);
        assert_eq!(right.x, 50.0);
        assert!((left.y - right.y).abs() - 2.0 * ARROW_HALF_WIDTH < 1e-4);
    }

    #[test]
    fn unresolved_or_hidden_predecessors_are_dropped() {
        let mut a = Task::new("1", "a", 1);
        a.predecessors = String::new();
        let mut b = Task::new("2", "b", 1);
        b.predecessors = "1FS+3 days, 9, 3SS".into();
        let c = Task::new("3", "c", 1);
        let tasks = vec![a, b, c];

        let mut bars = HashMap::new();
        bars.insert("1".to_string(), (0, bar(0.0, 35.0, 40.0)));
        bars.insert("2".to_string(), (1, bar(60.0, 65.0, 40.0)));
        // Task 3 has no bar this pass (collapsed away or undated).

        let connectors = resolve_dependencies(&tasks, &[0, 1, 2], &bars);
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].predecessor, 0);
        assert_eq!(connectors[0].successor, 1);
        assert_eq!(connectors[0].path.first(), Some(&Point::new(40.0, 45.0)));
        assert_eq!(connectors[0].path.last(), Some(&Point::new(60.0, 75.0)));
    }

    #[test]
    fn scrub_removes_references_to_deleted_ids() {
        let removed = |id: &str| id == "3" || id == "7";
        assert_eq!(scrub_predecessors("3FS+2 days,5, 7SS ,8FF", &removed), "5, 8FF");
        assert_eq!(scrub_predecessors("3", &removed), "");
        assert_eq!(scrub_predecessors("see notes, 4", &removed), "see notes, 4");
        assert_eq!(scrub_predecessors("33, 73SS", &removed), "33, 73SS");
    }
}
