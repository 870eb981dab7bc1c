//! Load testing for the JSON-RPC server.
//!
//! Concurrent calls share nothing but the server; every response must carry
//! its own request's id back.

use std::time::{Duration, Instant};

use rpc_intake::ServerConfig;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_load_performance() {
    let (addr, shutdown) = common::start_server(ServerConfig::default()).await;

    let concurrency = 20; // Reduced for consistency in debug mode
    let requests_per_task = 50;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = common::rpc_url(addr);
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let id = task * requests_per_task + i;
                let envelope = json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "method": "add",
                    "params": [{"a": id, "b": 1}],
                });

                let req_start = Instant::now();
                let res = client
                    .post(&url)
                    .json(&envelope)
                    .send()
                    .await
                    .expect("server unreachable");
                assert!(res.status().is_success(), "call {id} returned {}", res.status());
                let body: Value = res.json().await.expect("response body is not JSON");

                assert_eq!(body["id"], id, "response correlated to the wrong call");
                assert_eq!(body["result"], id + 1);
                latencies.push(req_start.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        let latencies = task.await.unwrap();
        all_latencies.extend(latencies);
    }

    let duration = start.elapsed();
    let rps = total_requests as f64 / duration.as_secs_f64();

    assert_eq!(all_latencies.len(), total_requests, "every call must succeed");

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p95 = all_latencies[(all_latencies.len() as f64 * 0.95) as usize];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", rps);
    println!("P50 Latency:    {:?}", p50);
    println!("P95 Latency:    {:?}", p95);
    println!("P99 Latency:    {:?}", p99);
    println!("Success Rate:   {}/{}", all_latencies.len(), total_requests);
    println!("-------------------------\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_slow_call_does_not_block_others() {
    let (addr, shutdown) = common::start_server(ServerConfig::default()).await;
    let client = common::client();
    let url = common::rpc_url(addr);

    let slow = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            client
                .post(&url)
                .json(&json!({"jsonrpc": "2.0", "id": "slow", "method": "sleep", "params": 500}))
                .send()
                .await
                .unwrap()
                .json::<Value>()
                .await
                .unwrap()
        })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast_start = Instant::now();
    let fast: Value = client
        .post(&url)
        .json(&json!({"jsonrpc": "2.0", "id": "fast", "method": "echo", "params": [1]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fast["id"], "fast");
    assert!(fast_start.elapsed() < Duration::from_millis(400));

    let slow = slow.await.unwrap();
    assert_eq!(slow["id"], "slow");
    assert_eq!(slow["result"], 500);

    shutdown.trigger();
}
