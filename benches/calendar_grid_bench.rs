// Benchmark for month grid construction
// Measures classification cost as the number of booked intervals grows

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wedding_booking::models::booked_interval::{BookedInterval, ItemType};
use wedding_booking::models::selection::SelectionState;
use wedding_booking::services::availability::Availability;
use wedding_booking::services::calendar_grid::{DisplayedMonth, MonthGrid};

fn bookings(count: usize) -> Vec<BookedInterval> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let from = start + Duration::days(i as i64 * 4);
            BookedInterval::new(format!("Booking {}", i), ItemType::Venue, from, from + Duration::days(2))
        })
        .collect()
}

fn benchmark_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("month_grid");
    let month = DisplayedMonth::new(2024, 6).unwrap();
    let min_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let selection = SelectionState::Empty
        .click(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
        .click(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap())
        .range();

    for count in [0usize, 10, 100, 1000].iter() {
        let availability = Availability::new(bookings(*count), min_date, false);
        group.bench_with_input(BenchmarkId::new("build", count), count, |b, _| {
            b.iter(|| {
                MonthGrid::build(
                    black_box(month),
                    black_box(false),
                    black_box(&availability),
                    black_box(&selection),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_month_navigation(c: &mut Criterion) {
    let start = DisplayedMonth::new(2024, 6).unwrap();
    c.bench_function("navigate_ten_years", |b| {
        b.iter(|| {
            let mut month = black_box(start);
            for _ in 0..120 {
                month = month.next();
            }
            month
        });
    });
}

criterion_group!(benches, benchmark_grid_build, benchmark_month_navigation);
criterion_main!(benches);
