use std::hint::black_box;

use codspeed_criterion_compat::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use javelin_convert::{SyntaxPolicy, parse_and_convert};
use javelin_frontend::{JavaFrontEnd, SourceInput};
use javelin_syntax::LanguageLevel;

fn benchmark_convert(c: &mut Criterion) {
    let inputs = [
        SourceInput::new(
            "Simple",
            r#"
            class Simple {
                int answer() {
                    return 42;
                }
            }
            "#,
            LanguageLevel::default(),
        ),
        SourceInput::new(
            "Medium",
            r#"
            import java.util.List;
            import java.util.Map;

            public final class Totals<K extends Comparable<K>> {
                private final Map<K, List<Long>> values = new java.util.HashMap<>();
                private int count, samples[] = new int[8];

                public void add(K key, long value) {
                    outer:
                    for (int i = 0, j = 1; i < samples.length; i++, j++) {
                        if (samples[i] == 0) {
                            samples[i] = (int) value;
                            break outer;
                        }
                    }
                    values.computeIfAbsent(key, k -> new java.util.ArrayList<>()).add(value);
                    switch (count) {
                        case 0 -> count = 1;
                        default -> count++;
                    }
                }
            }
            "#,
            LanguageLevel::default(),
        ),
    ];

    let front_end = JavaFrontEnd::new();
    let policy = SyntaxPolicy::default();
    let mut group = c.benchmark_group("Converter Benchmark");

    for input in &inputs {
        group.throughput(Throughput::Bytes(input.text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_and_convert", &input.path), input, |b, input| {
            b.iter(|| black_box(parse_and_convert(&front_end, input, &policy)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_convert);
criterion_main!(benches);
