// File: crates/demos/src/bin/revenues.rs
// Summary: Animated bar chart toggling between revenue and profit each tick.

use anyhow::Result;
use easel_core::format;
use easel_core::{
    AxisConfig, ChartConfig, ChartView, Dataset, DomainPolicy, LoadSpec, MarkConfig, ScaleSpec,
    TickFormatter,
};
use easel_render_svg::write_svg;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const TICK_MS: f64 = 1000.0;
const DURATION_MS: f64 = 750.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/revenues.csv");
    let spec = LoadSpec::new("month").metrics(&["revenue", "profit"]);
    let data = match Dataset::from_csv_path(&path, &spec) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "loading revenues dataset");
            return Ok(());
        }
    };

    let x_axis = AxisConfig::new(
        "Month",
        ScaleSpec::Band { padding_inner: 0.3, padding_outer: 0.2, sorted: false },
    )
    .with_rotation(-60.0);
    let y_axis = AxisConfig::new("Revenue ($)", ScaleSpec::Linear(DomainPolicy::auto_zero()))
        .with_formatter(TickFormatter::custom(format::dollars));

    let mut config = ChartConfig::new(x_axis, y_axis, MarkConfig::Bar, "revenue");
    config.duration_ms = DURATION_MS;

    let mut view = ChartView::new(config);
    let mut now = 0.0;
    view.update(&data.records, now);
    write_svg(&view.scene(now + DURATION_MS), "target/out/revenues_revenue.svg")?;

    // Each tick flips the plotted metric; y rescales and every bar retargets.
    for field in ["profit", "revenue"] {
        now += TICK_MS;
        view.set_y_field(field);
        view.update(&data.records, now);
        // One frame mid-flight to show the interpolation, one settled.
        let mid = format!("target/out/revenues_{field}_midflight.svg");
        write_svg(&view.scene(now + DURATION_MS / 2.0), &mid)?;
        let settled = format!("target/out/revenues_{field}.svg");
        write_svg(&view.scene(now + DURATION_MS), &settled)?;
        info!(field, "wrote toggle frames");
    }
    Ok(())
}
