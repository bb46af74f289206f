// Example: a wide table with measured columns, and a resize that keeps the measurements.
use virtual_window::{Align, GridVirtualizer, GridVirtualizerOptions};

fn main() {
    let mut table = GridVirtualizer::new(GridVirtualizerOptions::new(100_000, 50, 24.0, 100.0));
    table.measure_columns([(0, 48.0), (1, 240.0)]);

    let window = table.visible_range(24_000.0, 0.0, 480.0, 800.0);
    println!(
        "rows={:?} columns={:?} cells={}",
        window.rows,
        window.columns,
        window.items.len()
    );

    let target = table.scroll_to_cell(50_000, 30, 480.0, 800.0, Align::Center);
    println!("scroll_to_cell(50_000, 30)={target:?}");

    let grown = table.resize(200_000, 40);
    println!(
        "after resize: {}x{} total={}x{} col1={}",
        grown.row_count(),
        grown.column_count(),
        grown.total_width(),
        grown.total_height(),
        grown.columns().get(1)
    );
}
