use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use evobench::sweep::{format_elapsed, Combination, SweepOutcome};
use std::time::Duration;

pub fn print_grid_table(combinations: &[Combination]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        "#", "N_gen", "PS", "PC", "PM", "radius", "Pressure", "Repeats",
    ]);

    for (i, c) in combinations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(c.n_generations),
            Cell::new(c.population_size),
            Cell::new(c.crossover_prob),
            Cell::new(c.mutation_prob),
            Cell::new(c.mutation_radius),
            Cell::new(c.selection_pressure),
            Cell::new(c.repeats),
        ]);
    }

    for i in 0..8 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("{}", table);
}

pub fn print_sweep_summary(outcome: &SweepOutcome, elapsed: Duration, log_path: &str) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![Cell::new("Completed repeats"), Cell::new(outcome.completed)]);
    table.add_row(vec![
        Cell::new("Failed units"),
        Cell::new(outcome.failures.len()),
    ]);
    table.add_row(vec![
        Cell::new("Wall clock"),
        Cell::new(format_elapsed(elapsed)),
    ]);
    table.add_row(vec![Cell::new("Log file"), Cell::new(log_path)]);

    println!("{}", table);
}
