use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use javelin_syntax::LanguageLevel;

static SOURCE: &str = r#"
package bench;

import java.util.List;
import java.util.Map;

/** Accumulates totals. */
public final class Totals<K extends Comparable<K>> {
    private final Map<K, List<Long>> values = new java.util.HashMap<>();

    // adds one sample
    public void add(K key, long value) {
        values.computeIfAbsent(key, k -> new java.util.ArrayList<>()).add(value);
        int mask = (int) (value >>> 32) ^ 0xFFFF_FFFF;
        String label = "key=" + key + ", mask=" + mask;
        assert mask != 0 : label;
    }
}
"#;

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton";

static CANDIDATES: [(&str, &str); 2] = [("identifiers", IDENTIFIERS), ("class", SOURCE)];

fn iterate(s: &str) {
    let stream = javelin_tokenizer::tokenize(s, LanguageLevel::default());
    black_box(stream.map(|stream| stream.len()).unwrap_or_default());
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
