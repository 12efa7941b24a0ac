//! statline demo
//!
//! Loads `statline.yaml` (or the path given as first argument), registers its
//! keys, feeds them with a synthetic load and prints every group's line plus the structured JSON after each tick.

use std::sync::Arc;
use std::time::Duration;

use statline_engine::{config, obs, CompletionSignal, StatEngine};

#[tokio::main]
async fn main() {
    obs::init_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| "statline.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");

    let signal = Arc::new(CompletionSignal::new(cfg.engine.signal_capacity));
    let engine = StatEngine::start(&cfg.engine, Some(Arc::clone(&signal))).expect("engine start failed");

    let keys = cfg.metric_keys();
    for key in &keys {
        engine.register(key.clone()).expect("key registration failed");
    }

    // Synthetic load: counters get +1 every 10ms, gauges the iteration number.
    let recorder = engine.recorder();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(10));
        let mut n: i64 = 0;
        loop {
            ticker.tick().await;
            n += 1;
            for k in &keys {
                let v = if k.is_gauge() { n } else { 1 };
                if recorder.record(&k.group, &k.name, v).await.is_err() {
                    return;
                }
            }
        }
    });
    tracing::info!(%path, groups = engine.groups().len(), "statline demo running");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            ev = signal.wait() => {
                let Some(ev) = ev else { break };
                for line in engine.text_lines() {
                    println!("#{} {}", ev.tick, line);
                }
                match engine.structured_json() {
                    Ok(js) => println!("{js}\n"),
                    Err(e) => tracing::warn!(error = %e, "structured snapshot failed"),
                }
            }
        }
    }

    engine.stop();
    signal.close();
    engine.join().await;
}
