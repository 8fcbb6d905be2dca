use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use md5_engine::digest;
use md5_engine::digest::Framer;
use md5_engine::search::SaltedHasher;

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    // Single block, two blocks at the padding boundary, then bulk
    for len in [8usize, 55, 56, 1024, 64 * 1024] {
        let message = vec![0xA5u8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("one_shot", len), &message, |b, message| {
            b.iter(|| black_box(digest(black_box(message)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("framer", len), &message, |b, message| {
            let mut framer = Framer::new();
            b.iter(|| black_box(framer.hash(black_box(message)).unwrap()));
        });
    }

    group.finish();
}

fn bench_content_independence(c: &mut Criterion) {
    let mut group = c.benchmark_group("content");

    let zeros = vec![0u8; 4096];
    let ones = vec![0xFFu8; 4096];
    group.throughput(Throughput::Bytes(4096));
    group.bench_function("zeros_4kb", |b| {
        b.iter(|| black_box(digest(black_box(&zeros)).unwrap()));
    });
    group.bench_function("ones_4kb", |b| {
        b.iter(|| black_box(digest(black_box(&ones)).unwrap()));
    });

    group.finish();
}

fn bench_salted(c: &mut Criterion) {
    let mut group = c.benchmark_group("salted");

    group.bench_function("hash_index", |b| {
        let mut hasher = SaltedHasher::new("abcdefgh");
        let mut index = 0u64;
        b.iter(|| {
            index += 1;
            black_box(hasher.hash_index(index).unwrap())
        });
    });

    group.bench_function("hash_stretched_2016", |b| {
        let mut hasher = SaltedHasher::new("abc");
        b.iter(|| black_box(hasher.hash_stretched(black_box(18), 2016).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_digest, bench_content_independence, bench_salted);
criterion_main!(benches);
