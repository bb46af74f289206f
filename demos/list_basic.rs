// Example: a million-row list, one viewport query and a scroll-to helper.
use virtual_window::{Align, ListVirtualizer, ListVirtualizerOptions};

fn main() {
    let v = ListVirtualizer::new(ListVirtualizerOptions::new(1_000_000, 20.0).with_overscan(3));

    let window = v.visible_range(123_456.0, 600.0);
    println!("total_size={}", window.total_size);
    println!("range={:?}", window.range());
    println!("first={:?}", window.items.first());

    let to = v.scroll_target(999_999, 600.0, Align::End);
    println!("scroll_target(999_999, End)={to}");
    println!("range at target={:?}", v.visible_range(to, 600.0).range());
}
