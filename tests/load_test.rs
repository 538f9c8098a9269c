//! Live-server and load testing.

use std::time::{Duration, Instant};

use tinyweb::{handler, App, AppConfig, Params};

mod common;

#[tokio::test]
async fn test_live_server_routes_and_shuts_down() {
    let (addr, shutdown) = common::start_server(common::sample_app()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("http://{}/api/items", addr))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["method"], "POST");

    let res = client
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(client
        .get(format!("http://{}/", addr))
        .timeout(Duration::from_secs(1))
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn test_load_performance() {
    let mut app = App::new(AppConfig::default());
    for i in 0..50 {
        app.add_route(
            &format!("/static/page/{i}"),
            handler(format!("static_{i}"), |_req, _p| async { "OK" }),
            &[],
            None,
        )
        .unwrap();
    }
    for i in 0..50 {
        app.add_route(
            &format!("/dynamic/<int:id>/resource/{i}"),
            handler(format!("dynamic_{i}"), |_req, params: Params| async move {
                params.get_int("id").unwrap_or_default().to_string()
            }),
            &[],
            None,
        )
        .unwrap();
    }

    let (addr, shutdown) = common::start_server(app).await;

    let concurrency = 20;
    let requests_per_task = 50;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = if task % 2 == 0 {
            format!("http://{}/static/page/25", addr)
        } else {
            format!("http://{}/dynamic/123/resource/25", addr)
        };
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for _ in 0..requests_per_task {
                let req_start = Instant::now();
                if let Ok(res) = client.get(&url).send().await {
                    if res.status().is_success() {
                        latencies.push(req_start.elapsed());
                    }
                }
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    assert_eq!(all_latencies.len(), total_requests, "every request should succeed");

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!(
        "Requests/sec:   {:.2}",
        total_requests as f64 / duration.as_secs_f64()
    );
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");

    shutdown.trigger();
}
