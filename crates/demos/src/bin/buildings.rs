// File: crates/demos/src/bin/buildings.rs
// Summary: Static bar chart of the world's tallest buildings, rendered to SVG.

use anyhow::Result;
use easel_core::format;
use easel_core::{
    AxisConfig, ChartConfig, ChartView, Dataset, DomainPolicy, LoadSpec, MarkConfig, ScaleSpec,
    Theme, TickFormatter,
};
use easel_render_svg::write_svg;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/buildings.json");
    let spec = LoadSpec::new("name").metrics(&["height"]);
    let data = match Dataset::from_json_path(&path, &spec) {
        Ok(d) => d,
        Err(e) => {
            // Load failure aborts this view; no retry.
            error!(error = %e, "loading buildings dataset");
            return Ok(());
        }
    };

    let x_axis = AxisConfig::new(
        "Building Name",
        ScaleSpec::Band { padding_inner: 0.3, padding_outer: 0.2, sorted: false },
    )
    .with_rotation(-60.0);
    let y_axis = AxisConfig::new(
        "Height (m)",
        ScaleSpec::Linear(DomainPolicy::AutoZero { pad: 0.0 }),
    )
    .with_formatter(TickFormatter::custom(|v| format::with_suffix(v, "m")));

    let mut config = ChartConfig::new(x_axis, y_axis, MarkConfig::Bar, "height");
    config.duration_ms = 0.0; // static chart, no grow-in
    if let Some(theme) = std::env::var("EASEL_THEME").ok().and_then(|n| Theme::find(&n)) {
        config.theme = theme;
    }

    let mut view = ChartView::new(config);
    view.update(&data.records, 0.0);

    let out = "target/out/buildings.svg";
    write_svg(&view.scene(0.0), out)?;
    info!(out, bars = view.handles().live_len(), "wrote bar chart");
    Ok(())
}
