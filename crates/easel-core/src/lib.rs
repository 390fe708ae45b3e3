// File: crates/easel-core/src/lib.rs
// Summary: Core library entry point; exports the data, scale, reconcile, and scene API.

pub mod animate;
pub mod axis;
pub mod chart;
pub mod color;
pub mod dataset;
pub mod format;
pub mod geometry;
pub mod hover;
pub mod playback;
pub mod reconcile;
pub mod record;
pub mod scale;
pub mod scene;
pub mod theme;
pub mod types;

pub use animate::Transition;
pub use axis::{linspace, ticks_for, AxisConfig, ScaleSpec, Tick, TickFormatter};
pub use chart::{ChartConfig, ChartView, MarkConfig, RadiusRule};
pub use color::{Rgba, CATEGORY10};
pub use dataset::{DataError, FrameSpec, LoadSpec};
pub use geometry::{MarkGeometry, RectF};
pub use hover::{nearest_by, FocusOverlay};
pub use playback::Player;
pub use reconcile::{Handle, HandleSet, MarkKind, ReconcileOutcome};
pub use record::{Dataset, Frame, FrameSet, Record};
pub use scale::{extent, AnyScale, BandScale, DomainPolicy, LinearScale, LogScale, OrdinalScale, TimeScale};
pub use scene::{Anchor, Node, Scene};
pub use theme::Theme;
pub use types::Insets;
