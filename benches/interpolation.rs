use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pvgis_tmy::{group_by_day, InterpolationMethod, TmyHour, TmyKey, TmyTable};

fn tmy() -> TmyTable {
    let hours = (1..=12u32)
        .flat_map(|month| {
            let days = match month {
                2 => 28,
                4 | 6 | 9 | 11 => 30,
                _ => 31,
            };
            (1..=days).flat_map(move |day| (0..24).map(move |hour| TmyKey::new(month, day, hour)))
        })
        .map(|key| {
            let solar = (f64::from(key.hour) - 12.0).abs();
            TmyHour::from_fn(key, |_| 1000.0 - 80.0 * solar + f64::from(key.day))
        })
        .collect();
    TmyTable::from_hours(hours).unwrap()
}

fn five_minute_year() -> Vec<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..365 * 288)
        .map(|i| start + Duration::minutes(5 * i))
        .collect()
}

fn bench_interpolation(c: &mut Criterion) {
    let table = tmy();
    let groups = group_by_day(five_minute_year());

    c.bench_function("group_by_day", |b| {
        b.iter(|| group_by_day(black_box(five_minute_year())))
    });
    for method in InterpolationMethod::ALL {
        c.bench_function(&format!("interpolate_year_{}", method), |b| {
            b.iter(|| table.interpolate(black_box(&groups), method).unwrap())
        });
    }
}

criterion_group!(benches, bench_interpolation);
criterion_main!(benches);
