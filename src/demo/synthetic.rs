use anyhow::Result;
use morris_rust::{Counter, MorrisCounter, SeededSource, SharedSource};
use plotters::prelude::*;
use rayon::prelude::*;

pub type SeedData = (u64, Vec<(f64, f64)>);

const COUNTERS_PER_SEED: usize = 1_000;

/// Drives a batch of independent Morris counters through power-of-two
/// checkpoints and records the mean estimate at each one.
fn process_seed(seed: u64, ns: &[u64]) -> SeedData {
    let source = SharedSource::new(SeededSource::from_seed(seed));
    let mut counters: Vec<_> = (0..COUNTERS_PER_SEED)
        .map(|_| MorrisCounter::new(source.clone()))
        .collect();

    let mut points = Vec::new();
    let mut last_n = 0;
    for &n in ns {
        for counter in counters.iter_mut() {
            for _ in last_n..n {
                counter.increment();
            }
        }
        last_n = n;

        let mean =
            counters.iter().map(|c| c.value() as f64).sum::<f64>() / counters.len() as f64;
        points.push((n as f64, mean));
    }

    (seed, points)
}

fn checkpoints() -> Vec<u64> {
    // Past 256 the counters saturate, so the tail shows the plateau.
    (0..=10).map(|i| 1u64 << i).collect()
}

pub fn collect_test_data_sequential() -> Vec<SeedData> {
    let seeds: Vec<u64> = (1..=9).collect();
    let ns = checkpoints();

    seeds.iter().map(|&seed| process_seed(seed, &ns)).collect()
}

pub fn collect_test_data_parallel() -> Vec<SeedData> {
    let seeds: Vec<u64> = (1..=9).collect();
    let ns = checkpoints();

    seeds
        .par_iter()
        .map(|&seed| process_seed(seed, &ns))
        .collect()
}

pub fn plot_convergence(parallel: bool) -> Result<()> {
    println!("Collecting test data (parallel={})...", parallel);
    let data = if parallel {
        collect_test_data_parallel()
    } else {
        collect_test_data_sequential()
    };

    // Find the max value across all data for consistent scaling
    let max_val = data
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
        .fold(0.0f64, f64::max);

    let max_n = *checkpoints().last().unwrap() as f64;

    // Define colors for each seed (matching matplotlib default colors)
    let colors = [
        RGBColor(31, 119, 180),  // blue
        RGBColor(255, 127, 14),  // orange
        RGBColor(44, 160, 44),   // green
        RGBColor(214, 39, 40),   // red
        RGBColor(148, 103, 189), // purple
        RGBColor(140, 86, 75),   // brown
        RGBColor(227, 119, 194), // pink
        RGBColor(127, 127, 127), // gray
        RGBColor(188, 189, 34),  // olive
    ];

    let root = BitMapBackend::new("morris_convergence.png", (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Morris", ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (1.0f64..max_n).log_scale(),
            (1.0f64..max_val * 1.5).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("n")
        .y_desc("mean estimate")
        .label_style(("sans-serif", 18))
        .draw()?;

    // Draw the perfect counter line (y = x)
    chart.draw_series(LineSeries::new(
        vec![(1.0, 1.0), (max_n, max_n)],
        ShapeStyle::from(&BLACK).stroke_width(2),
    ))?;

    // Draw each seed's data
    for (i, (seed, points)) in data.iter().enumerate() {
        let color = colors[i % colors.len()];

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(3)))?
            .label(format!("seed {}", seed))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 18))
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    println!("Plot saved to morris_convergence.png");

    Ok(())
}
