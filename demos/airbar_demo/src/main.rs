//! Headless host: drives both AirBar flavors with a scripted drag and logs
//! what a real host would show. Run with `RUST_LOG=info` (or `debug` to see
//! the widget's own transitions).
//!
//! An optional argument names a JSON config for the imperative bar.

use airbar_core::prelude::*;
use airbar_ui::*;
use anyhow::Context;

fn load_config() -> anyhow::Result<AirBarConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading AirBar config {path}"))?;
            AirBarConfig::from_json(&json).with_context(|| format!("parsing {path}"))
        }
        None => Ok(AirBarConfig::vertical()),
    }
}

fn run_view(config: &AirBarConfig) -> anyhow::Result<()> {
    let mut bar = AirBarView::new(config)?;
    bar.set_on_changed(|r| {
        log::info!(
            "VIEW: Progress: {} \t Percentage: {}",
            r.value,
            r.percentage
        )
    });
    bar.set_on_committed(|r| log::info!("VIEW: After Progress Changed: {}", r.value));

    bar.set_background_color(Color::parse_hex("#F5F5F5")?);
    bar.set_gradient_start(Color::parse_hex("#BB86FC")?);
    bar.set_gradient_end(Color::parse_hex("#3700B3")?);
    bar.set_icon(Some(Icon::new(1, 24.0, 24.0)));

    let bounds = if bar.orientation().is_horizontal() {
        Rect::new(0.0, 0.0, 300.0, 80.0)
    } else {
        Rect::new(0.0, 0.0, 60.0, 200.0)
    };
    bar.on_layout(bounds);

    let extent = bar.orientation().extent(bounds.size());
    let at = |t: f32| {
        if bar.orientation().is_horizontal() {
            (extent * t, bounds.h * 0.5)
        } else {
            (bounds.w * 0.5, extent * t)
        }
    };
    let mut script = vec![];
    let (x, y) = at(0.5);
    script.push(PointerEvent::down(x, y));
    for t in [0.45, 0.3, 0.1, -0.2, 0.25] {
        let (x, y) = at(t);
        script.push(PointerEvent::moved(x, y));
    }
    let (x, y) = at(0.25);
    script.push(PointerEvent::up(x, y));

    for event in &script {
        bar.on_pointer_event(event);
        if bar.redraw_handle().take() {
            let mut scene = Scene::default();
            let g = bar.draw(&mut scene);
            log::debug!("VIEW: repainted fill {:?} ({} nodes)", g.fill, scene.nodes.len());
        }
    }

    bar.set_value(bar.min());
    log::info!("VIEW: reset to {:?}", bar.reading());
    Ok(())
}

fn app(status: &Signal<String>) -> View {
    let config = AirBarConfig::horizontal().initial_value(50.0);
    let controller = match remember_air_bar_controller("volume", &config) {
        Ok(c) => c,
        Err(e) => return Text(format!("AirBar unavailable: {e}")),
    };

    Column(Modifier::new().padding(8.0)).with_children(vec![
        Text(status.get()),
        Column(Modifier::new().size(150.0, 80.0)).with_children(vec![AirBar(
            Modifier::new(),
            &controller,
            air_bar_style().icon(Icon::new(2, 24.0, 24.0)),
            {
                let controller = controller.clone();
                let status = status.clone();
                move |value| {
                    controller.set_progress(value);
                    status.set(format!("COMPOSE VIEW: Percentage: {value}, Value: -"));
                }
            },
        )]),
    ])
}

fn run_compose() {
    let mut scheduler = Scheduler::with_size(400, 300);
    let status = signal(String::from("COMPOSE VIEW: idle"));
    status.subscribe(|s| log::info!("{s}"));

    let compose = |scheduler: &mut Scheduler| {
        let status = status.clone();
        scheduler.compose(move |_| app(&status), layout_and_paint)
    };

    let mut frame = compose(&mut scheduler);
    let mut router = PointerRouter::new();
    let y = 8.0 + 16.0 * TEXT_LINE_HEIGHT + 40.0;
    let script = [
        PointerEvent::down(20.0, y),
        PointerEvent::moved(30.0, y),
        PointerEvent::moved(90.0, y),
        PointerEvent::moved(200.0, y),
        PointerEvent::moved(120.0, y),
        PointerEvent::up(120.0, y),
    ];

    for event in &script {
        router.dispatch(&frame, event);
        if scheduler.redraw.is_dirty() {
            frame = compose(&mut scheduler);
        }
    }

    let controller = remember_air_bar_controller("volume", &AirBarConfig::horizontal());
    if let Ok(c) = controller {
        log::info!("COMPOSE VIEW: settled at {:?}", c.reading());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    run_view(&config)?;
    run_compose();
    Ok(())
}
