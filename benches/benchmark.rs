use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matchup_core::estimator::estimate;
use matchup_core::record::GameRecord;
use matchup_core::simulator::{run_trial, simulate, simulate_parallel};
use matchup_core::team::TeamProfile;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_profiles() -> (TeamProfile, TeamProfile) {
    let team1 = TeamProfile::new(113.5, 11.2, 104.0, 10.4);
    let team2 = TeamProfile::new(110.9, 12.1, 109.9, 11.7);
    (team1, team2)
}

fn create_season(teams: usize, games: usize) -> Vec<GameRecord> {
    let opening = NaiveDate::from_ymd_opt(2017, 10, 17).unwrap();
    let mut records = Vec::with_capacity(teams * games);

    for t in 0..teams {
        for g in 0..games {
            let date = opening + Duration::days(g as i64 * 2);
            let scored = 95 + ((t * 7 + g * 13) % 30) as u32;
            let allowed = 95 + ((t * 11 + g * 5) % 30) as u32;
            records.push(GameRecord::new(format!("Team{}", t), date, scored, allowed));
        }
    }

    records
}

fn bench_estimate(c: &mut Criterion) {
    let records = create_season(30, 82);

    c.bench_function("estimate_30_teams_82_games", |b| {
        b.iter(|| estimate(black_box(&records), black_box("Team17")))
    });
}

fn bench_single_trial(c: &mut Criterion) {
    let (team1, team2) = create_test_profiles();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("run_trial", |b| {
        b.iter(|| run_trial(black_box(&team1), black_box(&team2), &mut rng))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let (team1, team2) = create_test_profiles();

    c.bench_function("simulate_10000_sequential", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            simulate(black_box(&team1), "A", black_box(&team2), "B", 10_000, &mut rng)
        })
    });

    c.bench_function("simulate_100000_parallel", |b| {
        b.iter(|| simulate_parallel(black_box(&team1), "A", black_box(&team2), "B", 100_000, 42, None))
    });
}

criterion_group!(benches, bench_estimate, bench_single_trial, bench_monte_carlo);
criterion_main!(benches);
