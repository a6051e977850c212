//! Benchmarks for menu and breadcrumbs rendering.

use bsnav_container::{ContainerSource, Navigation, NavigationBuilder, Page, PageId};
use bsnav_helpers::{MenuOptions, NavigationServices};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Build a navigation with the given depth and breadth.
///
/// The last page of the deepest level is active.
fn create_navigation(depth: usize, breadth: usize) -> Navigation {
    fn add_level(
        builder: &mut NavigationBuilder,
        parent: Option<PageId>,
        prefix: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) {
        if current_depth > max_depth {
            return;
        }
        for i in 0..breadth {
            let href = format!("{prefix}/section-{i}");
            let page = Page::new(format!("Section {i}"), href.clone())
                .with_id(href.replace('/', "-"));
            let id = builder.add_page(page, parent);
            let depth = current_depth + 1;
            add_level(builder, Some(id), &href, depth, max_depth, breadth);
        }
    }

    let mut builder = NavigationBuilder::new();
    add_level(&mut builder, None, "", 0, depth, breadth);
    let mut nav = builder.build();

    let last = (0..=depth)
        .map(|_| format!("/section-{}", breadth - 1))
        .collect::<String>();
    nav.activate_href(&last);
    nav
}

fn bench_menu(c: &mut Criterion) {
    let services = NavigationServices::builder().build();
    let menu = services.menu();

    let mut group = c.benchmark_group("menu");

    for (depth, breadth) in [(1, 5), (2, 4), (3, 3)] {
        let nav = create_navigation(depth, breadth);

        group.bench_with_input(
            BenchmarkId::new("full", format!("{depth}x{breadth}")),
            &nav,
            |b, nav| b.iter(|| menu.render_menu(nav.clone(), &MenuOptions::default())),
        );

        let active_branch = MenuOptions {
            only_active_branch: Some(true),
            ..MenuOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::new("active_branch", format!("{depth}x{breadth}")),
            &nav,
            |b, nav| b.iter(|| menu.render_menu(nav.clone(), &active_branch)),
        );
    }

    group.finish();
}

fn bench_breadcrumbs(c: &mut Criterion) {
    let services = NavigationServices::builder().build();
    let mut breadcrumbs = services.breadcrumbs();
    breadcrumbs.invoke(create_navigation(4, 3)).unwrap();

    c.bench_function("breadcrumbs_depth_5", |b| {
        b.iter(|| breadcrumbs.render_straight(ContainerSource::None))
    });
}

criterion_group!(benches, bench_menu, bench_breadcrumbs);
criterion_main!(benches);
