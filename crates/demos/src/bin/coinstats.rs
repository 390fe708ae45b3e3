// File: crates/demos/src/bin/coinstats.rs
// Summary: Time-series line chart of coin prices with date filtering and a focus overlay.

use anyhow::Result;
use chrono::NaiveDate;
use easel_core::format;
use easel_core::{
    AxisConfig, ChartConfig, ChartView, Dataset, DomainPolicy, LoadSpec, MarkConfig, Rgba,
    ScaleSpec, TickFormatter,
};
use easel_render_svg::write_svg;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/coins.json");
    let spec = LoadSpec::new("date")
        .metrics(&["price_usd", "24h_vol", "market_cap"])
        .date("date", "%d/%m/%Y");
    let mut data = match Dataset::from_json_group(&path, "bitcoin", &spec) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "loading coins dataset");
            return Ok(());
        }
    };
    data.sort_by_date();

    let x_axis = AxisConfig::new("Time", ScaleSpec::Time).with_ticks(5);
    let y_axis = AxisConfig::new("Price (USD)", ScaleSpec::Linear(DomainPolicy::auto()))
        .with_ticks(6)
        .with_formatter(TickFormatter::custom(format::kilo));
    let mark = MarkConfig::Line { stroke: Rgba::rgb(0x80, 0x80, 0x80), width: 3.0 };
    let config = ChartConfig::new(x_axis, y_axis, mark, "price_usd");

    let mut view = ChartView::new(config);
    view.update(&data.records, 0.0);

    // Simulated pointer at 60% across the plot drives the focus overlay.
    view.set_pointer(Some(view.plot_width() * 0.6));
    write_svg(&view.scene(0.0), "target/out/coinstats_price.svg")?;
    if let Some(focus) = view.focus_overlay() {
        info!(label = %focus.label, "focus overlay at nearest record");
    }

    // Range-slider contract: narrow the date window, rescale, re-render.
    let window = (
        NaiveDate::from_ymd_opt(2013, 9, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(2014, 3, 31).unwrap_or(NaiveDate::MAX),
    );
    view.set_date_window(Some(window));
    view.update(&data.records, 0.0);
    write_svg(&view.scene(0.0), "target/out/coinstats_price_windowed.svg")?;

    // Metric selector contract: switch to market cap over the full range.
    view.set_date_window(None);
    view.set_pointer(None);
    view.set_y_field("market_cap");
    view.update(&data.records, 0.0);
    write_svg(&view.scene(0.0), "target/out/coinstats_market_cap.svg")?;
    info!("wrote coinstats charts");
    Ok(())
}
