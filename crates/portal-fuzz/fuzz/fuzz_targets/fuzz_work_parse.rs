#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_portal::models::{ListPage, Work};

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return Ok or Err
    if let Ok(page) = serde_json::from_slice::<ListPage<Work>>(data) {
        for work in &page.results {
            let _ = work.abstract_text();
            let _ = work.title();
        }
        let _ = page.total_pages(25);
    }
});
