//! Benchmarks for ordering, pagination and momentum.
//!
//! Run with: cargo bench -p rcui-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rcui_core::event::TouchEvent;
use rcui_core::geometry::Rect;
use rcui_widgets::config::{RowMetrics, SelectorConfig};
use rcui_widgets::entry::Entry;
use rcui_widgets::file_selector::FileSelector;
use rcui_widgets::kinetic::Momentum;
use rcui_widgets::listing::{DirectoryLister, ListError, Listing, ListingFilter};
use rcui_widgets::sort::{SortMode, sort_entries};
use rcui_widgets::vars::MemoryStore;
use rcui_widgets::viewport::Viewport;
use std::hint::black_box;

fn entries(n: usize) -> Vec<Entry> {
    let mut out = vec![Entry::parent_link()];
    out.extend((0..n).map(|i| {
        // Scrambled but deterministic names, sizes and dates.
        let k = i.wrapping_mul(2_654_435_761) % 100_003;
        let name = if i % 3 == 0 {
            format!("Backup_{k:06}")
        } else {
            format!("file_{k:06}.zip")
        };
        Entry::file(name)
            .with_size((k * 37) as u64)
            .with_modified((k * 11) as i64)
    }));
    out
}

// ============================================================================
// Sorting
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/sort");

    for n in [100, 1_000, 10_000] {
        let input = entries(n);
        for mode in [SortMode::NameAsc, SortMode::DateNewest, SortMode::SizeSmallest] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), n),
                &input,
                |b, input| {
                    b.iter(|| {
                        let mut list = input.clone();
                        sort_entries(&mut list, mode);
                        black_box(list);
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Viewport
// ============================================================================

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/viewport");

    for total in [50usize, 5_000] {
        group.bench_with_input(BenchmarkId::new("drag_sweep", total), &total, |b, &total| {
            b.iter(|| {
                let mut v = Viewport::new(40, 430);
                for step in 0..200 {
                    let delta = if step < 100 { -37 } else { 37 };
                    black_box(v.scroll_by(delta, total));
                }
                black_box(v);
            })
        });

        group.bench_with_input(BenchmarkId::new("fling", total), &total, |b, &total| {
            b.iter(|| {
                let mut v = Viewport::new(40, 430);
                let mut m = Momentum::new();
                m.fling(-3_000);
                while m.tick(&mut v, total) {}
                black_box(v);
            })
        });

        group.bench_with_input(BenchmarkId::new("row_at", total), &total, |b, &total| {
            let mut v = Viewport::new(40, 430);
            v.scroll_by(-1_234, total);
            b.iter(|| {
                for y in (0..430).step_by(7) {
                    black_box(v.row_at(y, total));
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// Widget
// ============================================================================

struct Synthetic(Vec<Entry>);

impl DirectoryLister for Synthetic {
    fn list(&self, _path: &str, filter: &ListingFilter) -> Result<Listing, ListError> {
        Ok(Listing::from_entries(self.0.iter().cloned(), filter))
    }
}

fn bench_widget(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/widget");

    let mut sel = FileSelector::new(
        SelectorConfig::default().path_default("/sdcard"),
        RowMetrics::new(40),
        Rect::new(0, 0, 480, 800),
        Synthetic(entries(2_000)),
        MemoryStore::default(),
    );

    group.bench_function("drag_and_fling", |b| {
        b.iter(|| {
            sel.on_touch(TouchEvent::start(10, 700));
            for y in (200..700).rev().step_by(25) {
                sel.on_touch(TouchEvent::drag(10, y));
            }
            sel.on_touch(TouchEvent::release(10, 200));
            while sel.on_tick() {}
            black_box(sel.rows().len());
        })
    });

    group.bench_function("relist", |b| {
        b.iter(|| {
            sel.on_focus_gained();
            black_box(sel.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_scroll, bench_widget);
criterion_main!(benches);
