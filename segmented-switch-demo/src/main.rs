//! Headless walkthrough of a segmented switch.
//!
//! Drives a switch through taps, a drag and programmatic selections at 60 Hz
//! and logs every notification plus the final frame's draw commands.
//! Set `RUST_LOG=segmented_switch=trace` to see per-frame animation detail.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use segmented_switch::{
    Color, DrawCommand, GestureDisposition, GestureEvent, Point, SegmentedSwitch, Size,
    SwitchStyle,
};
use tracing::{info, warn};

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

/// Ticks until the switch is at rest, returning the number of frames.
fn settle(switch: &mut SegmentedSwitch) -> usize {
    let mut frames = 0;
    while switch.needs_frame() {
        switch.tick(FRAME);
        frames += 1;
    }
    frames
}

fn drag(switch: &mut SegmentedSwitch, start: Point, total_dx: f32, steps: usize) {
    if switch.handle_gesture(GestureEvent::DragBegan { position: start })
        == GestureDisposition::Ignored
    {
        warn!(?start, "drag did not start on the indicator");
        return;
    }
    let step = total_dx / steps.max(1) as f32;
    for _ in 0..steps {
        switch.handle_gesture(GestureEvent::DragMoved {
            delta: Point::new(step, 0.0),
        });
        switch.tick(FRAME);
    }
    switch.handle_gesture(GestureEvent::DragEnded);
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::RoundedRect { rect, color, .. } => format!(
            "rounded rect x={:.1} w={:.1} rgba={:?}",
            rect.x,
            rect.width,
            color.to_array()
        ),
        DrawCommand::Text { text, rect, .. } => {
            format!("text {text:?} at ({:.0}, {:.0})", rect.x, rect.y)
        }
        DrawCommand::PushClip(clip) => format!(
            "push clip x={:.1} w={:.1} r={:.1}",
            clip.rect.x, clip.rect.width, clip.corner_radius
        ),
        DrawCommand::PopClip => "pop clip".to_owned(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let style = SwitchStyle::default()
        .background_color(Color::from_rgb(0.12, 0.12, 0.14))
        .selected_background_color(Color::from_rgb(0.95, 0.76, 0.2))
        .selected_title_color(Color::BLACK);
    let mut switch = SegmentedSwitch::with_style(["Day", "Week", "Month"], style)?;
    switch.layout(Size::new(300.0, 40.0));

    let changes = Arc::new(Mutex::new(0usize));
    switch.on_will_move(|index: isize| info!(index, "will move"));
    switch.on_did_move(|index: usize| info!(index, "did move"));
    {
        let changes = Arc::clone(&changes);
        switch.on_value_changed(move || {
            *changes.lock() += 1;
            info!("value changed");
        });
    }

    info!("tap on the last segment");
    switch.handle_gesture(GestureEvent::Tap {
        position: Point::new(250.0, 20.0),
    });

    info!("drag the indicator back to the middle");
    let grab = switch.indicator_bounds().center();
    drag(&mut switch, grab, -110.0, 8);
    let frames = settle(&mut switch);
    info!(frames, selected = switch.selected_index(), "drag settled");

    info!("animated selection, superseded halfway");
    switch.set_selected_index(0, true);
    for _ in 0..6 {
        switch.tick(FRAME);
    }
    switch.set_selected_index(2, true);
    let frames = settle(&mut switch);
    info!(frames, selected = switch.selected_index(), "selection settled");

    info!("out-of-range selection");
    if let Err(err) = switch.try_set_selected_index(7, false) {
        warn!(%err, "selection rejected");
    }

    info!("replace segments");
    switch.set_segments(["Off", "On"]);
    switch.set_corner_radius(Some(8.0));

    for command in switch.draw_commands() {
        info!("{}", describe(&command));
    }
    info!(
        value_changes = *changes.lock(),
        selected = switch.selected_index(),
        "done"
    );
    Ok(())
}
