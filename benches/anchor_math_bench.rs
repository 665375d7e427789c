use criterion::{Criterion, criterion_group, criterion_main};
use listnav::api::{ListNavigator, NavigatorConfig};
use listnav::core::{calculate_anchor, resolve_restore_target};
use listnav::source::PagedSource;
use listnav::surface::{ListSurface, StackedSurface};
use std::hint::black_box;

fn bench_anchor_capture_10k(c: &mut Criterion) {
    let mut surface = StackedSurface::uniform(900.0, "row", 10_000, 48.0);
    surface.user_scroll_to(240_123.0);
    let items = surface.materialized();
    let metrics = surface.metrics();

    c.bench_function("anchor_capture_10k", |b| {
        b.iter(|| {
            let _ = calculate_anchor(black_box(metrics), black_box(&items));
        })
    });
}

fn bench_anchor_restore_10k(c: &mut Criterion) {
    let mut surface = StackedSurface::uniform(900.0, "row", 10_000, 48.0);
    surface.user_scroll_to(240_123.0);
    let anchor = calculate_anchor(surface.metrics(), &surface.materialized());
    let metrics = surface.metrics();

    c.bench_function("anchor_restore_10k", |b| {
        b.iter(|| {
            let _ = resolve_restore_target(black_box(&anchor), black_box(metrics), |id| {
                surface.find(id)
            });
        })
    });
}

fn bench_navigation_to_far_row_2k(c: &mut Criterion) {
    c.bench_function("navigation_to_far_row_2k", |b| {
        b.iter(|| {
            let surface = StackedSurface::uniform(900.0, "row", 2_000, 48.0);
            let source = PagedSource::new(surface.items().clone(), Vec::new());
            let config = NavigatorConfig::default().with_auto_fetch(false);
            let mut nav = ListNavigator::new(surface, source, config).expect("navigator init");
            nav.select_item(black_box("row-1750"), "Far")
                .expect("select should succeed");
            let _ = nav
                .run_navigations(1.0 / 60.0, 1_000)
                .expect("navigation should run");
        })
    });
}

criterion_group!(
    benches,
    bench_anchor_capture_10k,
    bench_anchor_restore_10k,
    bench_navigation_to_far_row_2k
);
criterion_main!(benches);
