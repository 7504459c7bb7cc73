use criterion::criterion_main;
use criterion::{criterion_group, Criterion};
use http::HeaderMap;
use urlgen_core::path::KeyEscape;
use urlgen_core::SigningScheme;
use urlgen_s3::{Config, Generator};

criterion_group!(benches, bench);
criterion_main!(benches);

fn config() -> Config {
    Config::new()
        .with_access_key_id("access_key_id")
        .with_secret_access_key("secret_access_key")
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("s3");

    group.bench_function("presign", |b| {
        let g = Generator::new(config()).expect("config must be valid");

        b.iter(|| {
            g.get("bucket", "hello/world.txt", HeaderMap::new())
                .expect("must success")
        })
    });

    group.bench_function("presign_encode_slash", |b| {
        let g = Generator::new(config().with_key_escape(KeyEscape::EncodeSlash))
            .expect("config must be valid");

        b.iter(|| {
            g.get("bucket", "hello/world.txt", HeaderMap::new())
                .expect("must success")
        })
    });

    group.bench_function("header", |b| {
        let g = Generator::new(config().with_scheme(SigningScheme::Header))
            .expect("config must be valid");

        b.iter(|| {
            let mut headers = HeaderMap::new();
            headers.insert("x-amz-meta-author", "alice".parse().expect("must valid"));
            g.put_bucket_acl("bucket", "<AccessControlPolicy/>", headers)
                .expect("must success")
        })
    });

    group.finish();
}
