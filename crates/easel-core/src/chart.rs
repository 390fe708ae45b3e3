// File: crates/easel-core/src/chart.rs
// Summary: Chart controller: config, scale resolution, reconciliation, and scene assembly.
// Notes:
// - All view state lives on `ChartView` and is passed explicitly; there is no
//   module-level state. Control-surface setters only record state; the next
//   `update`/`scene` call applies it.

use chrono::NaiveDate;
use tracing::debug;

use crate::axis::{ticks_for, AxisConfig, ScaleSpec};
use crate::color::{Rgba, CATEGORY10};
use crate::format::thousands;
use crate::geometry::{MarkGeometry, RectF};
use crate::hover::{nearest_by, FocusOverlay};
use crate::reconcile::{HandleSet, MarkKind, ReconcileOutcome};
use crate::record::Record;
use crate::scale::{AnyScale, BandScale, LinearScale, LogScale, OrdinalScale, TimeScale};
use crate::scene::{Anchor, Node, Scene};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

/// How a point mark sizes itself.
#[derive(Clone, Debug)]
pub enum RadiusRule {
    Fixed(f64),
    /// Area proportional to a metric: `sqrt(v / pi) / divisor` (the
    /// population bubble rule). Missing metric renders radius zero.
    Area { field: String, divisor: f64 },
}

#[derive(Clone, Debug)]
pub enum MarkConfig {
    /// One rectangle per record; x from the band scale, height from the y metric.
    Bar,
    /// One circle per record; x/y from two metrics, color from the group.
    Point { radius: RadiusRule },
    /// One polyline through all records in dataset order; no per-record handles.
    Line { stroke: Rgba, width: f64 },
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub mark: MarkConfig,
    /// Metric plotted on x for point marks; band and time axes key off the
    /// record itself.
    pub x_field: Option<String>,
    /// Metric plotted on y; switchable at runtime via `set_y_field`.
    pub y_field: String,
    pub duration_ms: f64,
    pub theme: Theme,
    /// Categorical palette for bar fills and group colors.
    pub palette: Vec<Rgba>,
    pub legend: bool,
}

impl ChartConfig {
    pub fn new(
        x_axis: AxisConfig,
        y_axis: AxisConfig,
        mark: MarkConfig,
        y_field: impl Into<String>,
    ) -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            x_axis,
            y_axis,
            mark,
            x_field: None,
            y_field: y_field.into(),
            duration_ms: 750.0,
            theme: Theme::dark(),
            palette: CATEGORY10.to_vec(),
            legend: false,
        }
    }
}

/// One chart: owns the config, the handle arena, the active dataset copy,
/// and the control-surface state set by external collaborators.
pub struct ChartView {
    pub config: ChartConfig,
    handles: HandleSet,
    records: Vec<Record>,
    ordinal: OrdinalScale,
    x_scale: Option<AnyScale>,
    y_scale: Option<AnyScale>,
    y_field: String,
    frame_label: Option<String>,
    group_filter: Option<String>,
    date_window: Option<(NaiveDate, NaiveDate)>,
    pointer_px: Option<f64>,
}

impl ChartView {
    pub fn new(config: ChartConfig) -> Self {
        let y_field = config.y_field.clone();
        Self {
            config,
            handles: HandleSet::new(),
            records: Vec::new(),
            ordinal: OrdinalScale::default(),
            x_scale: None,
            y_scale: None,
            y_field,
            frame_label: None,
            group_filter: None,
            date_window: None,
            pointer_px: None,
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.config.width - self.config.insets.hsum()
    }

    pub fn plot_height(&self) -> f64 {
        self.config.height - self.config.insets.vsum()
    }

    // ---- control surface (external collaborators call these) ----------------

    /// Switch the plotted y metric. Applied by the next `update`.
    pub fn set_y_field(&mut self, field: impl Into<String>) {
        self.y_field = field.into();
    }

    pub fn y_field(&self) -> &str {
        &self.y_field
    }

    /// Restrict to one group (`None` = all). Applied by the next `update`.
    pub fn set_group_filter(&mut self, group: Option<String>) {
        self.group_filter = group;
    }

    /// Restrict to records dated within the window, inclusive.
    pub fn set_date_window(&mut self, window: Option<(NaiveDate, NaiveDate)>) {
        self.date_window = window;
    }

    /// Label drawn inside the plot (the year of the active frame).
    pub fn set_frame_label(&mut self, label: impl Into<String>) {
        self.frame_label = Some(label.into());
    }

    /// Pointer x in plot pixels, or `None` to clear the focus overlay.
    pub fn set_pointer(&mut self, px: Option<f64>) {
        self.pointer_px = px;
    }

    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    // ---- update cycle --------------------------------------------------------

    /// Run one data-join pass: prune finished exits, resolve scales against
    /// the filtered records, compute keyed targets, and reconcile.
    pub fn update(&mut self, records: &[Record], now_ms: f64) -> ReconcileOutcome {
        self.handles.prune(now_ms);

        // Color assignment reads the unfiltered input and accumulates across
        // updates, so filtering or frame changes never recolor a key.
        match &self.config.mark {
            MarkConfig::Point { .. } => self.ordinal.extend_keys(
                records.iter().filter_map(|r| r.group.clone()),
                &self.config.palette,
            ),
            _ => self.ordinal.extend_keys(
                records.iter().map(|r| r.key.clone()),
                &self.config.palette,
            ),
        }

        let active: Vec<Record> = records
            .iter()
            .filter(|r| match &self.group_filter {
                Some(g) => r.group.as_deref() == Some(g.as_str()),
                None => true,
            })
            .filter(|r| match self.date_window {
                Some((from, to)) => r.date.map(|d| d >= from && d <= to).unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();

        let x_scale = self.resolve_axis(
            &self.config.x_axis.scale,
            self.config.x_field.as_deref(),
            &active,
            (0.0, self.plot_width()),
        );
        let y_scale = self.resolve_axis(
            &self.config.y_axis.scale,
            Some(self.y_field.as_str()),
            &active,
            (self.plot_height(), 0.0),
        );

        let outcome = match &self.config.mark {
            MarkConfig::Bar => {
                let targets = self.bar_targets(&active, &x_scale, &y_scale);
                self.handles.reconcile(
                    &targets,
                    MarkKind::Bar { baseline: self.plot_height() },
                    now_ms,
                    self.config.duration_ms,
                )
            }
            MarkConfig::Point { radius } => {
                let targets = self.point_targets(&active, &x_scale, &y_scale, radius);
                self.handles
                    .reconcile(&targets, MarkKind::Point, now_ms, self.config.duration_ms)
            }
            // The line path is regenerated from the stored records on every
            // `scene` call; nothing to reconcile.
            MarkConfig::Line { .. } => ReconcileOutcome::default(),
        };

        debug!(
            records = active.len(),
            entered = outcome.entered.len(),
            updated = outcome.updated.len(),
            exited = outcome.exited.len(),
            "chart update"
        );

        self.records = active;
        self.x_scale = Some(x_scale);
        self.y_scale = Some(y_scale);
        outcome
    }

    fn resolve_axis(
        &self,
        spec: &ScaleSpec,
        field: Option<&str>,
        records: &[Record],
        range: (f64, f64),
    ) -> AnyScale {
        match spec {
            ScaleSpec::Band { padding_inner, padding_outer, sorted } => {
                let keys = records.iter().map(|r| r.key.clone());
                let band = if *sorted {
                    BandScale::sorted(keys, range, *padding_inner, *padding_outer)
                } else {
                    BandScale::new(keys, range, *padding_inner, *padding_outer)
                };
                AnyScale::Band(band)
            }
            ScaleSpec::Linear(policy) => {
                let domain = policy.resolve(records, field.unwrap_or_default());
                AnyScale::Linear(LinearScale::new(domain, range))
            }
            ScaleSpec::Log { min, max } => AnyScale::Log(LogScale::new((*min, *max), range)),
            ScaleSpec::Time => {
                let mut dates = records.iter().filter_map(|r| r.date);
                let first = dates.next().unwrap_or(NaiveDate::MIN);
                let (lo, hi) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
                AnyScale::Time(TimeScale::new((lo, hi), range))
            }
        }
    }

    fn bar_targets(
        &self,
        records: &[Record],
        x: &AnyScale,
        y: &AnyScale,
    ) -> Vec<(String, MarkGeometry)> {
        let Some(band) = x.as_band() else {
            return Vec::new();
        };
        let baseline = self.plot_height();
        let mut targets = Vec::with_capacity(records.len());
        for r in records {
            let Some(x0) = band.position(&r.key) else {
                continue;
            };
            // A record missing its y metric keeps its slot as a zero-height bar.
            let y_px = r.metric(&self.y_field).map(|v| y.to_px(v)).unwrap_or(baseline);
            let geometry = MarkGeometry {
                x: x0,
                y: y_px,
                width: band.bandwidth(),
                height: (baseline - y_px).max(0.0),
                radius: 0.0,
                color: self.ordinal.color(&r.key),
            };
            targets.push((r.key.clone(), geometry));
        }
        targets
    }

    fn point_targets(
        &self,
        records: &[Record],
        x: &AnyScale,
        y: &AnyScale,
        radius: &RadiusRule,
    ) -> Vec<(String, MarkGeometry)> {
        let x_field = self.config.x_field.as_deref().unwrap_or_default();
        let mut targets = Vec::with_capacity(records.len());
        for r in records {
            // Sentinel placement: missing x plots at the plot's left edge,
            // missing y at the y image of zero. A misplaced dot, not a panic.
            let cx = r.metric(x_field).map(|v| x.to_px(v)).unwrap_or(0.0);
            let cy = r.metric(&self.y_field).map(|v| y.to_px(v)).unwrap_or_else(|| y.to_px(0.0));
            let rad = match radius {
                RadiusRule::Fixed(v) => *v,
                RadiusRule::Area { field, divisor } => r
                    .metric(field)
                    .map(|v| (v / std::f64::consts::PI).sqrt() / divisor)
                    .unwrap_or(0.0),
            };
            let color = match r.group.as_deref() {
                Some(g) => self.ordinal.color(g),
                None => self.config.theme.line_stroke,
            };
            let geometry = MarkGeometry { x: cx, y: cy, width: 0.0, height: 0.0, radius: rad, color };
            targets.push((r.key.clone(), geometry));
        }
        targets
    }

    // ---- scene assembly ------------------------------------------------------

    /// Build the full scene at `now_ms`: background, axes, marks sampled from
    /// their transitions (exiting handles included until pruned), line path,
    /// legend, frame label, and the focus overlay when a pointer is set.
    pub fn scene(&self, now_ms: f64) -> Scene {
        let cfg = &self.config;
        let th = &cfg.theme;
        let plot_w = self.plot_width();
        let plot_h = self.plot_height();

        let mut plot: Vec<Node> = Vec::new();

        // Axis lines.
        plot.push(Node::Line {
            x1: 0.0,
            y1: plot_h,
            x2: plot_w,
            y2: plot_h,
            stroke: th.axis_line,
            width: 1.5,
        });
        plot.push(Node::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: plot_h,
            stroke: th.axis_line,
            width: 1.5,
        });

        if let Some(xs) = &self.x_scale {
            for tick in ticks_for(xs, cfg.x_axis.ticks, &cfg.x_axis.formatter) {
                plot.push(Node::Line {
                    x1: tick.position,
                    y1: plot_h,
                    x2: tick.position,
                    y2: plot_h + 5.0,
                    stroke: th.tick,
                    width: 1.0,
                });
                if cfg.x_axis.rotate_labels != 0.0 {
                    plot.push(Node::Text {
                        x: tick.position - 5.0,
                        y: plot_h + 10.0,
                        content: tick.label,
                        size: 12.0,
                        fill: th.tick_label,
                        anchor: Anchor::End,
                        rotate: Some(cfg.x_axis.rotate_labels),
                    });
                } else {
                    plot.push(Node::Text {
                        x: tick.position,
                        y: plot_h + 20.0,
                        content: tick.label,
                        size: 12.0,
                        fill: th.tick_label,
                        anchor: Anchor::Middle,
                        rotate: None,
                    });
                }
            }
        }
        if let Some(ys) = &self.y_scale {
            for tick in ticks_for(ys, cfg.y_axis.ticks, &cfg.y_axis.formatter) {
                plot.push(Node::Line {
                    x1: -5.0,
                    y1: tick.position,
                    x2: 0.0,
                    y2: tick.position,
                    stroke: th.tick,
                    width: 1.0,
                });
                plot.push(Node::Text {
                    x: -8.0,
                    y: tick.position + 4.0,
                    content: tick.label,
                    size: 12.0,
                    fill: th.tick_label,
                    anchor: Anchor::End,
                    rotate: None,
                });
            }
        }

        // Axis titles.
        plot.push(Node::Text {
            x: plot_w / 2.0,
            y: plot_h + 60.0,
            content: cfg.x_axis.label.clone(),
            size: 20.0,
            fill: th.axis_title,
            anchor: Anchor::Middle,
            rotate: None,
        });
        plot.push(Node::Text {
            x: -55.0,
            y: plot_h / 2.0,
            content: cfg.y_axis.label.clone(),
            size: 20.0,
            fill: th.axis_title,
            anchor: Anchor::Middle,
            rotate: Some(-90.0),
        });

        // Marks.
        match &cfg.mark {
            MarkConfig::Bar => {
                for handle in self.handles.iter() {
                    let g = handle.transition.at(now_ms);
                    plot.push(Node::Rect {
                        rect: g.rect(),
                        fill: g.color,
                        stroke: Some(th.mark_stroke),
                    });
                }
            }
            MarkConfig::Point { .. } => {
                for handle in self.handles.iter() {
                    let g = handle.transition.at(now_ms);
                    plot.push(Node::Circle { cx: g.x, cy: g.y, r: g.radius.max(0.0), fill: g.color });
                }
            }
            MarkConfig::Line { stroke, width } => {
                let points = self.line_points();
                if points.len() >= 2 {
                    plot.push(Node::Path { points, stroke: *stroke, width: *width, fill: None });
                }
                if let Some(focus) = self.focus_overlay() {
                    plot.push(Node::Line {
                        x1: focus.x,
                        y1: focus.y,
                        x2: focus.x,
                        y2: plot_h,
                        stroke: th.focus,
                        width: 1.0,
                    });
                    plot.push(Node::Line {
                        x1: focus.x,
                        y1: focus.y,
                        x2: 0.0,
                        y2: focus.y,
                        stroke: th.focus,
                        width: 1.0,
                    });
                    plot.push(Node::Circle { cx: focus.x, cy: focus.y, r: 7.5, fill: th.focus });
                    plot.push(Node::Text {
                        x: focus.x + 15.0,
                        y: focus.y + 4.0,
                        content: focus.label,
                        size: 12.0,
                        fill: th.tick_label,
                        anchor: Anchor::Start,
                        rotate: None,
                    });
                }
            }
        }

        if let Some(label) = &self.frame_label {
            plot.push(Node::Text {
                x: 10.0,
                y: plot_h - 10.0,
                content: label.clone(),
                size: 20.0,
                fill: th.frame_label,
                anchor: Anchor::Start,
                rotate: None,
            });
        }

        if cfg.legend {
            let mut rows: Vec<Node> = Vec::new();
            for (i, (key, color)) in self.ordinal.entries().iter().enumerate() {
                let dy = i as f64 * 20.0;
                rows.push(Node::Rect {
                    rect: RectF::new(0.0, dy, 10.0, 10.0),
                    fill: *color,
                    stroke: None,
                });
                rows.push(Node::Text {
                    x: -10.0,
                    y: dy + 10.0,
                    content: key.clone(),
                    size: 12.0,
                    fill: th.tick_label,
                    anchor: Anchor::End,
                    rotate: None,
                });
            }
            plot.push(Node::Group { dx: plot_w, dy: plot_h - 100.0, children: rows });
        }

        let mut scene = Scene::new(cfg.width, cfg.height, th.background);
        scene.push(Node::Group {
            dx: cfg.insets.left,
            dy: cfg.insets.top,
            children: plot,
        });
        scene
    }

    fn line_points(&self) -> Vec<(f64, f64)> {
        let (Some(xs), Some(ys)) = (&self.x_scale, &self.y_scale) else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter_map(|r| {
                let date = r.date?;
                let v = r.metric(&self.y_field)?;
                let x = match xs.as_time() {
                    Some(ts) => ts.to_px(date),
                    None => xs.to_px(TimeScale::day_number(date)),
                };
                Some((x, ys.to_px(v)))
            })
            .collect()
    }

    /// Nearest dated record to the pointer, as a focus annotation. `None`
    /// when no pointer is set or no record qualifies.
    pub fn focus_overlay(&self) -> Option<FocusOverlay> {
        let px = self.pointer_px?;
        let ts = self.x_scale.as_ref()?.as_time()?;
        let ys = self.y_scale.as_ref()?;
        let dated: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.date.is_some() && r.has_metric(&self.y_field))
            .collect();
        let query = ts.invert_days(px);
        let record = nearest_by(&dated, query, |r| {
            TimeScale::day_number(r.date.unwrap_or(NaiveDate::MIN))
        })?;
        let date = record.date?;
        let value = record.metric(&self.y_field)?;
        Some(FocusOverlay {
            x: ts.to_px(date),
            y: ys.to_px(value),
            label: thousands(value),
        })
    }
}
