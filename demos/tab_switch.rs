use scrolline::{
    Dispatcher, NoAnchors, ScrollineResult, SequenceBuilder, Step, StepBuilder, StepSample,
    ViewportSnapshot,
};

fn panel(tab: &'static str, idx: usize) -> ScrollineResult<Step> {
    StepBuilder::new(move |s: StepSample| {
        println!("  [{tab}] panel {idx}: local {:.3} weight {:.3}", s.local, s.weight);
        Ok(())
    })
    .build()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let timeline = SequenceBuilder::new()
        .default_overlap(0.25)
        .step(panel("overview", 0)?)
        .step(panel("overview", 1)?)
        .build()?;
    let mut d = Dispatcher::new(timeline, Box::new(NoAnchors));

    d.on_viewport_change(ViewportSnapshot {
        region_top: -600.0,
        region_height: 2000.0,
        viewport_height: 800.0,
    })?;
    println!("overview tab at progress {:.2}", d.progress().0);
    d.tick()?;

    // The reader switches tabs mid-scroll: same region, new step list.
    d.replace_steps(vec![
        panel("details", 0)?,
        panel("details", 1)?,
        panel("details", 2)?,
    ])?;
    println!(
        "details tab: {} segments at progress {:.2}",
        d.timeline().segments().map_or(0, |list| list.len()),
        d.progress().0
    );
    d.tick()?;

    Ok(())
}
