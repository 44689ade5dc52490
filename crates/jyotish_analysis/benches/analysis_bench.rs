use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jyotish_analysis::{
    AmshaVargaProvider, Analysis, GanitaData, GrahaData, RankingSystem, VargaProvider,
    rank_grahas,
};

fn sample_chart() -> GanitaData {
    [
        ("SU", 10, 6.5),
        ("MO", 4, 22.3),
        ("MA", 7, 28.9),
        ("ME", 9, 17.1),
        ("JU", 1, 3.4),
        ("VE", 11, 11.8),
        ("SA", 6, 25.2),
        ("RA", 2, 9.6),
        ("KE", 8, 9.6),
    ]
    .into_iter()
    .fold(GanitaData::default(), |data, (key, rashi, degree)| {
        data.with_graha(key, GrahaData::new(degree).with_rashi(rashi))
    })
    .with_extra("LG", GrahaData::new(14.0).with_rashi(5))
}

fn chara_karaka_bench(c: &mut Criterion) {
    let data = sample_chart();
    let analysis = Analysis::new(data.clone()).expect("engine");

    let mut group = c.benchmark_group("chara_karaka");
    group.bench_function("rank_grahas_parashara", |b| {
        b.iter(|| rank_grahas(black_box(&data.graha), RankingSystem::Parashara))
    });
    group.bench_function("chara_karaka_reversed_jaimini", |b| {
        b.iter(|| analysis.chara_karaka_reversed(black_box(RankingSystem::Jaimini)))
    });
    group.finish();
}

fn varga_bench(c: &mut Criterion) {
    let data = sample_chart();
    let provider = AmshaVargaProvider::default();
    let analysis = Analysis::new(data.clone()).expect("engine");
    analysis.varga_data("d9").expect("warm cache");

    let mut group = c.benchmark_group("varga");
    group.bench_function("provider_d9_uncached", |b| {
        b.iter(|| provider.varga_data(black_box("D9"), black_box(&data)))
    });
    group.bench_function("varga_data_d9_cached", |b| {
        b.iter(|| analysis.varga_data(black_box("d9")))
    });
    group.bench_function("karakamsha", |b| b.iter(|| analysis.karakamsha()));
    group.finish();
}

criterion_group!(benches, chara_karaka_bench, varga_bench);
criterion_main!(benches);
