pub mod dependency;
pub mod hierarchy;
pub mod layout;
pub mod project;
pub mod store;
pub mod task;
pub mod timeline;
pub mod visibility;

pub use dependency::{parse_predecessor, parse_predecessors, Connector, DependencyKind, Point};
pub use layout::{BarStatus, ChartLayout, RenderOutcome, TaskRow};
pub use project::Project;
pub use store::{SourceTable, TaskEdit, TaskStore};
pub use task::{Task, TaskField};
pub use timeline::{DateWindow, TimelineScale, TimelineViewport, Zoom};
pub use visibility::ResourceFilter;
