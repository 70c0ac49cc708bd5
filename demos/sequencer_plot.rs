//! Plot out the raw and quantized outputs of the sequencer for a few settings of the randomness knob
//!
//! Look in /images/ for the resulting plot.
//!
//! Requires plotters lib: https://docs.rs/plotters/latest/plotters/.

use mod1_turing::{
    calibration::CalibrationTable,
    output,
    quantizer::Scale,
    sequencer::{Controls, Sequencer},
};
use plotters::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const NUM_STEPS: usize = 64;
    const SEED: u64 = 1;

    std::fs::create_dir_all("images")?;

    let root =
        BitMapBackend::new("images/sequencer_example_plot_0.png", (960, 720)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Turing machine", ("sans-serif", 40))?;

    let sub_areas = root.split_evenly((2, 2));

    let table = CalibrationTable::factory();

    // the name, randomness knob, and scale for each plot
    let details = [
        ("Fully random, major", 500, Scale::Major),
        ("Slipping, minor", 300, Scale::Minor),
        ("Locked 5 steps, phrygian", 1023, Scale::Phrygian),
        ("Double locked 5 steps, major", 0, Scale::Major),
    ];

    for ((name, randomness, scale), area) in details.into_iter().zip(sub_areas.iter()) {
        // the same seed for every plot, so locked plots loop whatever the random warm-up made
        let mut seq = Sequencer::new(SEED);

        // fill the register with something to loop
        let warm_up = Controls::new(500, 0, 1023);
        for _ in 0..16 {
            seq.step(&warm_up);
        }

        let controls = Controls::new(randomness, 400, 1023);
        let outputs: Vec<output::CvOut> = (0..NUM_STEPS)
            .map(|_| {
                let step = seq.step(&controls);
                output::render(step.value, controls.gain, scale, &table)
            })
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption(name, ("Arial", 15).into_font())
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(0..NUM_STEPS, 0u32..256u32)?;

        chart
            .configure_mesh()
            .x_desc("Step")
            .y_desc("PWM level")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                outputs.iter().enumerate().map(|(x, o)| (x, o.raw as u32)),
                BLUE,
            ))?
            .label("Raw CV")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .draw_series(LineSeries::new(
                outputs
                    .iter()
                    .enumerate()
                    .map(|(x, o)| (x, o.quantized as u32)),
                RED,
            ))?
            .label("Quantized CV")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;

    Ok(())
}
