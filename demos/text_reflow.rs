// Example: feeding measured line heights back after wrapping, and using the dirty range to
// decide which cached line layouts to rebuild.
use virtual_window::{ListVirtualizer, ListVirtualizerOptions};

fn main() {
    let mut lines =
        ListVirtualizer::new(ListVirtualizerOptions::new(10_000, 18.0).with_overscan(2));
    let mut wrapped_rows = vec![1u32; 10_000];

    let window = lines.visible_range(0.0, 540.0);
    println!("before: range={:?} total={}", window.range(), window.total_size);

    // Pretend every fourth line wraps onto a second row.
    let measured: Vec<(usize, f64)> = window
        .items
        .iter()
        .map(|it| (it.index, if it.index % 4 == 0 { 36.0 } else { it.size }))
        .collect();
    let applied = lines.measure_items(measured);
    println!("measure_items: applied={applied} version={}", lines.version());

    if let Some(dirty) = lines.consume_dirty_range() {
        for i in dirty.start..dirty.end {
            wrapped_rows[i] = (lines.tree().get(i) / 18.0) as u32;
        }
        println!("relaid out lines {}..{}", dirty.start, dirty.end);
    }

    let window = lines.visible_range(0.0, 540.0);
    println!("after: range={:?} total={}", window.range(), window.total_size);
    println!("wrapped rows in view: {}", wrapped_rows[..window.end_index].iter().sum::<u32>());
}
