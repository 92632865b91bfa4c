use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flickr_reflect::{sign, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{
    matchers::{method, query_param},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Create a mock server describing `count` methods under `flickr.bench`
async fn setup_mock_server(count: usize) -> MockServer {
    let server = MockServer::start().await;

    let methods: Vec<_> = (0..count)
        .map(|i| json!({"_content": format!("flickr.bench.method{}", i)}))
        .collect();
    Mock::given(method("GET"))
        .and(query_param("method", "flickr.reflection.getMethods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "methods": {"method": methods},
            "stat": "ok"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.reflection.getMethodInfo"))
        .respond_with(|req: &Request| {
            let name = req
                .url
                .query_pairs()
                .find(|(k, _)| k == "method_name")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "method": {"name": name, "needslogin": 0, "needssigning": 0},
                    "stat": "ok"
                }))
                .set_delay(Duration::from_millis(5)) // Simulate network latency
        })
        .mount(&server)
        .await;

    server
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");

    for size in [4, 16, 64].iter() {
        let params: Vec<(String, String)> = (0..*size)
            .map(|i| (format!("key{}", i), format!("value-{}", i)))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sign(black_box("s3cr3t"), black_box(&params).iter().map(|(k, v)| (k, v))));
        });
    }

    group.finish();
}

fn bench_build_url(c: &mut Criterion) {
    let client = ClientBuilder::new("bench-key")
        .shared_secret("s3cr3t")
        .build()
        .expect("Failed to build client");

    c.bench_function("build_url_signed", |b| {
        b.iter(|| {
            client
                .build_url(
                    black_box("flickr.photos.search"),
                    true,
                    vec![
                        ("text".to_string(), "red fox & friends".to_string()),
                        ("per_page".to_string(), "50".to_string()),
                    ],
                )
                .expect("Failed to build url")
        });
    });
}

fn bench_discovery(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(setup_mock_server(32));
    let dir = tempfile::tempdir().unwrap();

    let mut group = c.benchmark_group("discovery");
    group.sample_size(10);

    for concurrency in [1, 8, 32].iter() {
        let client = ClientBuilder::new("bench-key")
            .apis(["bench"])
            .rest_url(format!("{}/services/rest/", server.uri()))
            .cache_dir(dir.path())
            .discovery_concurrency(*concurrency)
            .retries(0) // No retries for benchmarks
            .build()
            .expect("Failed to build client");

        group.bench_with_input(
            BenchmarkId::from_parameter(concurrency),
            concurrency,
            |b, _| {
                b.iter(|| {
                    rt.block_on(async {
                        let surface = client.discover().await.expect("Discovery failed");
                        assert_eq!(surface.len(), 32);
                    });
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sign, bench_build_url, bench_discovery);
criterion_main!(benches);
