// File: crates/demos/src/bin/gapminder.rs
// Summary: Animated scatter of income vs life expectancy, looping over year frames.

use anyhow::Result;
use easel_core::{
    AxisConfig, ChartConfig, ChartView, DomainPolicy, FrameSet, FrameSpec, LoadSpec, MarkConfig,
    Player, RadiusRule, ScaleSpec,
};
use easel_render_svg::write_svg;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const TICK_MS: f64 = 100.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/gapminder.json");
    let record_spec = LoadSpec::new("country")
        .metrics(&["income", "life_exp", "population"])
        .group("continent")
        .require(&["income", "life_exp"]);
    let spec = FrameSpec::new("year", "countries", record_spec);
    let frames = match FrameSet::from_json_path(&path, &spec) {
        Ok(f) if !f.is_empty() => f,
        Ok(_) => {
            error!("gapminder dataset has no frames");
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, "loading gapminder dataset");
            return Ok(());
        }
    };

    // Fixed domains as the exercise uses them; log x stays strictly positive
    // by construction.
    let x_axis = AxisConfig::new("GDP Per Capita ($)", ScaleSpec::Log { min: 100.0, max: 100_000.0 });
    let y_axis = AxisConfig::new(
        "Life Expectancy (Years)",
        ScaleSpec::Linear(DomainPolicy::Fixed(0.0, 100.0)),
    );
    let mark = MarkConfig::Point {
        radius: RadiusRule::Area { field: "population".to_string(), divisor: 100.0 },
    };
    let mut config = ChartConfig::new(x_axis, y_axis, mark, "life_exp");
    config.x_field = Some("income".to_string());
    config.duration_ms = 0.55 * TICK_MS;
    config.legend = true;

    let mut view = ChartView::new(config);
    let mut player = Player::new(frames.len());
    let mut now = 0.0;

    let apply = |view: &mut ChartView, step: usize, now: f64| {
        if let Some(frame) = frames.get(step) {
            view.set_frame_label(frame.label.clone());
            view.update(&frame.dataset.records, now);
        }
    };

    apply(&mut view, player.step(), now);
    write_svg(&view.scene(now + TICK_MS), "target/out/gapminder_first.svg")?;

    // Loop through every frame and past the wrap point.
    player.play();
    for _ in 0..frames.len() + 1 {
        if !player.is_playing() {
            break;
        }
        now += TICK_MS;
        let step = player.advance();
        apply(&mut view, step, now);
    }
    write_svg(&view.scene(now + TICK_MS), "target/out/gapminder_wrapped.svg")?;
    info!(step = player.step(), "playback wrapped to the first frame");

    // Pause, jump to the last frame via the slider contract, filter a continent.
    player.pause();
    player.seek(frames.len() - 1);
    now += TICK_MS;
    view.set_group_filter(Some("africa".to_string()));
    apply(&mut view, player.step(), now);
    write_svg(&view.scene(now + TICK_MS), "target/out/gapminder_africa.svg")?;

    view.set_group_filter(None);
    now += TICK_MS;
    apply(&mut view, player.step(), now);
    write_svg(&view.scene(now + TICK_MS), "target/out/gapminder_last.svg")?;
    info!(frames = frames.len(), "wrote gapminder frames");
    Ok(())
}
