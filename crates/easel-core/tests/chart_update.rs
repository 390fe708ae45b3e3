// File: crates/easel-core/tests/chart_update.rs
// Purpose: End-to-end data-join update cycle through the chart controller.

use chrono::NaiveDate;
use easel_core::{
    AxisConfig, ChartConfig, ChartView, DomainPolicy, MarkConfig, Node, RadiusRule, Record, Rgba,
    ScaleSpec, CATEGORY10,
};

fn month(name: &str, revenue: f64, profit: f64) -> Record {
    Record::new(name)
        .with_metric("revenue", revenue)
        .with_metric("profit", profit)
}

fn bar_config() -> ChartConfig {
    let x_axis = AxisConfig::new(
        "Month",
        ScaleSpec::Band { padding_inner: 0.3, padding_outer: 0.2, sorted: false },
    );
    let y_axis = AxisConfig::new("Revenue", ScaleSpec::Linear(DomainPolicy::AutoZero { pad: 0.005 }));
    ChartConfig::new(x_axis, y_axis, MarkConfig::Bar, "revenue")
}

/// Rect mark nodes inside the plot group (marks carry a stroke; legend
/// swatches do not).
fn bar_rects(nodes: &[Node]) -> Vec<(f64, f64, f64, f64)> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Group { children, .. } => out.extend(bar_rects(children)),
            Node::Rect { rect, stroke: Some(_), .. } => {
                out.push((rect.x, rect.y, rect.width, rect.height));
            }
            _ => {}
        }
    }
    out
}

#[test]
fn two_month_bar_chart_scales_heights_to_the_padded_domain() {
    // Default surface is 800x500 with 100px insets: a 600x300 plot.
    let mut view = ChartView::new(bar_config());
    let records = [month("Jan", 100.0, 20.0), month("Feb", 150.0, 40.0)];
    let outcome = view.update(&records, 0.0);
    assert_eq!(outcome.entered.len(), 2);
    assert_eq!(view.handles().live_len(), 2);

    // Domain [0, 150 * 1.005]; heights proportional to revenue / 150.75.
    let plot_h = view.plot_height();
    let jan = view.handles().get_by_key("Jan").unwrap().transition.to;
    let feb = view.handles().get_by_key("Feb").unwrap().transition.to;
    assert!((jan.height - plot_h * 100.0 / 150.75).abs() < 1e-9);
    assert!((feb.height - plot_h * 150.0 / 150.75).abs() < 1e-9);
    assert!((jan.y - (plot_h - jan.height)).abs() < 1e-9);

    // The settled scene shows exactly two bar rectangles.
    let scene = view.scene(750.0);
    let rects = bar_rects(&scene.nodes);
    assert_eq!(rects.len(), 2);
}

#[test]
fn switching_the_y_metric_retargets_every_bar() {
    let mut view = ChartView::new(bar_config());
    let records = [month("Jan", 100.0, 20.0), month("Feb", 150.0, 40.0)];
    view.update(&records, 0.0);

    view.set_y_field("profit");
    let outcome = view.update(&records, 1000.0);
    assert!(outcome.entered.is_empty());
    assert!(outcome.exited.is_empty());
    assert_eq!(outcome.updated.len(), 2);

    // Y domain rescaled to [0, 40 * 1.005].
    let plot_h = view.plot_height();
    let feb = view.handles().get_by_key("Feb").unwrap().transition.to;
    assert!((feb.height - plot_h * 40.0 / (40.0 * 1.005)).abs() < 1e-9);
}

#[test]
fn shrinking_dataset_keeps_exiting_bars_until_pruned() {
    let mut view = ChartView::new(bar_config());
    view.update(&[month("Jan", 100.0, 20.0), month("Feb", 150.0, 40.0)], 0.0);
    let outcome = view.update(&[month("Jan", 100.0, 20.0)], 1000.0);
    assert_eq!(outcome.exited.len(), 1);
    assert_eq!(view.handles().live_len(), 1);

    // The exiting bar still renders mid-death.
    let rects = bar_rects(&view.scene(1100.0).nodes);
    assert_eq!(rects.len(), 2);

    // The next update past the deadline prunes it.
    view.update(&[month("Jan", 100.0, 20.0)], 3000.0);
    assert_eq!(view.handles().occupied_len(), 1);
    let rects = bar_rects(&view.scene(3000.0).nodes);
    assert_eq!(rects.len(), 1);
}

#[test]
fn point_marks_use_sentinels_for_missing_metrics() {
    let x_axis = AxisConfig::new("GDP", ScaleSpec::Log { min: 100.0, max: 100_000.0 });
    let y_axis = AxisConfig::new("Life", ScaleSpec::Linear(DomainPolicy::Fixed(0.0, 100.0)));
    let mark = MarkConfig::Point {
        radius: RadiusRule::Area { field: "population".to_string(), divisor: 100.0 },
    };
    let mut config = ChartConfig::new(x_axis, y_axis, mark, "life_exp");
    config.x_field = Some("income".to_string());
    let mut view = ChartView::new(config);

    let complete = Record::new("chile")
        .with_group("americas")
        .with_metric("income", 1000.0)
        .with_metric("life_exp", 50.0)
        .with_metric("population", 3_141_592.65);
    let no_income = Record::new("mystery")
        .with_group("asia")
        .with_metric("life_exp", 50.0);
    view.update(&[complete, no_income], 0.0);

    let plot_h = view.plot_height();
    let chile = view.handles().get_by_key("chile").unwrap().transition.to;
    // Log x: 1000 sits one decade in on a three-decade axis.
    assert!((chile.x - view.plot_width() / 3.0).abs() < 1e-6);
    assert!((chile.y - plot_h / 2.0).abs() < 1e-9);
    // sqrt(population / pi) / 100 = 10.
    assert!((chile.radius - 10.0).abs() < 1e-6);

    let mystery = view.handles().get_by_key("mystery").unwrap().transition.to;
    assert_eq!(mystery.x, 0.0); // missing x plots at the plot's left edge
    assert_eq!(mystery.radius, 0.0); // missing radius metric renders invisible
}

#[test]
fn group_filter_drops_other_continents_on_the_next_update() {
    let x_axis = AxisConfig::new("GDP", ScaleSpec::Log { min: 100.0, max: 100_000.0 });
    let y_axis = AxisConfig::new("Life", ScaleSpec::Linear(DomainPolicy::Fixed(0.0, 100.0)));
    let mark = MarkConfig::Point { radius: RadiusRule::Fixed(5.0) };
    let mut config = ChartConfig::new(x_axis, y_axis, mark, "life_exp");
    config.x_field = Some("income".to_string());
    let mut view = ChartView::new(config);

    let records = [
        Record::new("chile").with_group("americas").with_metric("income", 854.0).with_metric("life_exp", 32.0),
        Record::new("nigeria").with_group("africa").with_metric("income", 1452.0).with_metric("life_exp", 30.4),
    ];
    view.update(&records, 0.0);
    assert_eq!(view.handles().live_len(), 2);

    view.set_group_filter(Some("africa".to_string()));
    let outcome = view.update(&records, 100.0);
    assert_eq!(outcome.exited.len(), 1);
    assert_eq!(view.handles().live_len(), 1);
    assert!(view.handles().get_by_key("nigeria").is_some());
}

#[test]
fn group_filter_round_trip_keeps_group_colors_stable() {
    let x_axis = AxisConfig::new("GDP", ScaleSpec::Log { min: 100.0, max: 100_000.0 });
    let y_axis = AxisConfig::new("Life", ScaleSpec::Linear(DomainPolicy::Fixed(0.0, 100.0)));
    let mark = MarkConfig::Point { radius: RadiusRule::Fixed(5.0) };
    let mut config = ChartConfig::new(x_axis, y_axis, mark, "life_exp");
    config.x_field = Some("income".to_string());
    let mut view = ChartView::new(config);

    let records = [
        Record::new("chile").with_group("americas").with_metric("income", 854.0).with_metric("life_exp", 32.0),
        Record::new("nigeria").with_group("africa").with_metric("income", 1452.0).with_metric("life_exp", 30.4),
    ];
    view.update(&records, 0.0);
    let before = view.handles().get_by_key("nigeria").unwrap().transition.to.color;
    assert_eq!(before, CATEGORY10[1]); // africa was the second group seen

    // Filtering to africa, then clearing, never reseats africa's color.
    view.set_group_filter(Some("africa".to_string()));
    view.update(&records, 100.0);
    let filtered = view.handles().get_by_key("nigeria").unwrap().transition.to.color;
    assert_eq!(filtered, before);

    view.set_group_filter(None);
    view.update(&records, 200.0);
    let restored = view.handles().get_by_key("nigeria").unwrap().transition.to.color;
    assert_eq!(restored, before);
}

#[test]
fn line_chart_focus_overlay_finds_the_nearest_dated_record() {
    let x_axis = AxisConfig::new("Time", ScaleSpec::Time);
    let y_axis = AxisConfig::new("Price", ScaleSpec::Linear(DomainPolicy::Fixed(0.0, 200.0)));
    let mark = MarkConfig::Line { stroke: Rgba::rgb(0x80, 0x80, 0x80), width: 3.0 };
    let config = ChartConfig::new(x_axis, y_axis, mark, "price");
    let mut view = ChartView::new(config);

    let day = |d: u32| NaiveDate::from_ymd_opt(2013, 5, d).unwrap();
    let records = [
        Record::new("2013-05-01").with_date(day(1)).with_metric("price", 100.0),
        Record::new("2013-05-11").with_date(day(11)).with_metric("price", 150.0),
        Record::new("2013-05-21").with_date(day(21)).with_metric("price", 120.0),
    ];
    view.update(&records, 0.0);

    // Pointer at 40% across a 20-day axis lands nearest day 11.
    view.set_pointer(Some(view.plot_width() * 0.4));
    let focus = view.focus_overlay().expect("focus overlay");
    assert_eq!(focus.label, "150");
    assert!((focus.x - view.plot_width() / 2.0).abs() < 1e-6);

    view.set_pointer(None);
    assert!(view.focus_overlay().is_none());

    // The scene carries the polyline through all three records.
    let mut paths = 0;
    for node in &view.scene(0.0).nodes {
        if let Node::Group { children, .. } = node {
            for child in children {
                if let Node::Path { points, .. } = child {
                    paths += 1;
                    assert_eq!(points.len(), 3);
                }
            }
        }
    }
    assert_eq!(paths, 1);
}

#[test]
fn date_window_restricts_the_active_records() {
    let x_axis = AxisConfig::new("Time", ScaleSpec::Time);
    let y_axis = AxisConfig::new("Price", ScaleSpec::Linear(DomainPolicy::auto()));
    let mark = MarkConfig::Line { stroke: Rgba::rgb(0x80, 0x80, 0x80), width: 3.0 };
    let config = ChartConfig::new(x_axis, y_axis, mark, "price");
    let mut view = ChartView::new(config);

    let day = |m: u32, d: u32| NaiveDate::from_ymd_opt(2013, m, d).unwrap();
    let records = [
        Record::new("a").with_date(day(5, 1)).with_metric("price", 100.0),
        Record::new("b").with_date(day(6, 1)).with_metric("price", 150.0),
        Record::new("c").with_date(day(7, 1)).with_metric("price", 120.0),
    ];
    view.set_date_window(Some((day(5, 15), day(6, 15))));
    view.update(&records, 0.0);

    let mut points_seen = None;
    for node in &view.scene(0.0).nodes {
        if let Node::Group { children, .. } = node {
            for child in children {
                if let Node::Path { points, .. } = child {
                    points_seen = Some(points.len());
                }
            }
        }
    }
    // Only "b" is inside the window; a one-point polyline is not drawn.
    assert_eq!(points_seen, None);

    view.set_date_window(Some((day(5, 1), day(7, 1))));
    view.update(&records, 0.0);
    let focus_free = view.focus_overlay();
    assert!(focus_free.is_none()); // no pointer set
}
