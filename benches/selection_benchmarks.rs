use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use muraja::engine::selection::{pick_start_index, select_passage};
use muraja::quran::api::{
    RawTranslation, RawVerse, TranslationsResponse, VersesResponse, merge_verses, strip_html,
};

// Roughly the size of the longest juz.
const VERSE_COUNT: u16 = 300;

fn responses() -> (VersesResponse, TranslationsResponse) {
    let verses = (1..=VERSE_COUNT)
        .map(|a| RawVerse {
            id: u32::from(a),
            verse_key: format!("2:{a}"),
            text_uthmani: "\u{0628}\u{0650}\u{0633}\u{0652}\u{0645}\u{0650} \u{0671}\u{0644}\u{0644}\u{0651}\u{064E}\u{0647}\u{0650}".repeat(4),
        })
        .collect();
    let translations = (1..=VERSE_COUNT)
        .map(|a| RawTranslation {
            resource_id: 20,
            text: format!("Translation of ayah {a}<sup foot_note={a}>1</sup> with a note"),
            verse_key: Some(format!("2:{a}")),
        })
        .collect();
    (
        VersesResponse { verses },
        TranslationsResponse { translations },
    )
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge_verses (300 verses)", |b| {
        b.iter_batched(
            responses,
            |(v, t)| merge_verses(black_box(v), black_box(t)),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_strip_html(c: &mut Criterion) {
    let text = "In the name of Allah<sup foot_note=77>1</sup>, the Entirely Merciful, <i>the Especially Merciful</i>.".repeat(8);

    c.bench_function("strip_html (footnoted translation)", |b| {
        b.iter(|| strip_html(black_box(&text)))
    });
}

fn bench_selection(c: &mut Criterion) {
    let (v, t) = responses();
    let verses = merge_verses(v, t);
    let mut rng = SmallRng::seed_from_u64(42);

    c.bench_function("pick_start_index", |b| {
        b.iter(|| pick_start_index(black_box(verses.len()), black_box(5), &mut rng))
    });

    c.bench_function("select_passage (hide 5 of 300)", |b| {
        b.iter(|| select_passage(black_box(&verses), black_box(5), &mut rng))
    });
}

criterion_group!(benches, bench_merge, bench_strip_html, bench_selection);
criterion_main!(benches);
