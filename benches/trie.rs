use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spellcore::{Dictionary, RuleFlag, WordList};

fn sample_words(n: usize) -> Vec<String> {
    let alphabet = ['a', 'ą', 'b', 'c', 'ć', 'd', 'e', 'ę', 'i', 'k', 'ł', 'o', 'ó', 'r', 's', 't'];
    (0..n)
        .map(|i| {
            let mut w = String::new();
            let mut n = i + 1;
            while n > 0 {
                w.push(alphabet[n % alphabet.len()]);
                n /= alphabet.len();
            }
            w
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let words = sample_words(2_000);
    c.bench_function("trie insert 2000 words", |b| {
        b.iter(|| {
            let mut dict = Dictionary::new();
            for w in &words {
                dict.insert(black_box(w));
            }
        })
    });
}

fn bench_hints(c: &mut Criterion) {
    let words = sample_words(500);
    let mut dict = Dictionary::new();
    for w in &words {
        dict.insert(w);
    }
    dict.set_max_cost(1);
    let alphabet = ['a', 'ą', 'b', 'c', 'ć', 'd', 'e', 'ę', 'i', 'k', 'ł', 'o', 'ó', 'r', 's', 't'];
    for &from in &alphabet {
        for &to in &alphabet {
            if from != to {
                dict.add_rule(&from.to_string(), &to.to_string(), false, 1, RuleFlag::Normal)
                    .unwrap();
            }
        }
    }

    c.bench_function("hint query against 500-word dictionary", |b| {
        b.iter(|| {
            let mut out = WordList::new();
            dict.hints(black_box(&words[17]), &mut out);
        })
    });
}

criterion_group!(benches, bench_insert, bench_hints);
criterion_main!(benches);
