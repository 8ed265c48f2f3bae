use scrolline::{
    Dispatcher, ScrollineResult, SequenceBuilder, StepBuilder, StepSample, ViewportSnapshot,
};

fn caption(title: &'static str) -> impl FnMut(StepSample) -> ScrollineResult<()> {
    move |s| {
        println!(
            "  {title}: local {:.3} weight {:.3} ({:?})",
            s.local, s.weight, s.role
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let timeline = SequenceBuilder::new()
        .default_overlap(0.2)
        .step(StepBuilder::new(caption("hero")).build()?)
        .step(
            StepBuilder::new(caption("the-problem"))
                .duration_text("600px")
                .anchor("the-problem")
                .build()?,
        )
        .step(StepBuilder::new(caption("the-fix")).duration(2.0).build()?)
        .step(StepBuilder::new(caption("recap")).anchor("recap").build()?)
        .build()?;

    let probe = |key: &str| match key {
        "the-problem" => Some(0.3),
        "recap" => Some(0.75),
        _ => None,
    };
    let mut d = Dispatcher::new(timeline, Box::new(probe));

    d.on_viewport_change(ViewportSnapshot {
        region_top: 0.0,
        region_height: 3200.0,
        viewport_height: 800.0,
    })?;
    if let Some(list) = d.timeline().segments() {
        for seg in list.segments() {
            println!(
                "step {} covers [{:.3}, {:.3})",
                seg.index, seg.span.start.0, seg.span.end.0
            );
        }
    }

    for px in (0..=2400).step_by(300) {
        d.on_scroll(-(px as f64));
        let trace = d.tick()?;
        println!(
            "scroll {px}px -> progress {:.3}, {} active",
            trace.active.progress.0,
            trace.active.entries.len()
        );
    }

    Ok(())
}
