#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_portal::pagination::{PageItem, compute_showing_range, compute_window};

fuzz_target!(|input: (u32, u32, u8, u32, u64, u64)| {
    let (current, total, size, per_page, total_items, shown) = input;

    // Total over every input: must not panic or overflow.
    let window = compute_window(current, total, u32::from(size));
    let items = window.items();
    assert!(!items.windows(2).any(|w| w[0] == PageItem::Ellipsis && w[1] == PageItem::Ellipsis));

    let _ = compute_showing_range(current, per_page, total_items, shown);
});
