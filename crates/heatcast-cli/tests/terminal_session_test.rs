//! Integration tests driving the live forecast through the terminal view.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use heatcast_cli::config::AppConfig;
use heatcast_cli::input::{Input, parse_input};
use heatcast_cli::terminal::TerminalView;
use heatcast_forecast::application::advisory::advisory_for;
use heatcast_forecast::application::live_loop::spawn_live_forecast;
use heatcast_test_support::{FixedClock, MockRng};

/// Writer whose bytes stay readable while the view owns it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    AppConfig::from_lookup(move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_session_renders_chart_then_ticks_then_switches_location() {
    let config = config_from(&[("HEATCAST_TICK_MS", "1000")]);
    let buffer = SharedBuffer::default();
    let handle = spawn_live_forecast(
        &config.location,
        config.live,
        Arc::new(FixedClock::on(2026, 1, 15)),
        Box::new(MockRng),
        Arc::new(TerminalView::new(buffer.clone())),
    )
    .unwrap();

    let initial = buffer.text();
    assert!(initial.starts_with("--- 15-day forecast ---\n"));
    assert!(initial.contains("Thu   37°C |"));
    assert!(initial.contains("Jalgaon: now 37°C (feels 37°C) [normal]"));

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    handle.snapshot().await.unwrap();
    let after_tick = buffer.text();
    assert_eq!(after_tick.matches("Jalgaon: now 37°C").count(), 2);

    if let Input::ChangeLocation(location) = parse_input("Pune\n") {
        handle.change_location(location).await.unwrap();
    }
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.location, "Pune");
    assert!(buffer.text().contains("Pune: now 41°C (feels 41°C) [unsafe] Next days unsafe"));
    assert_eq!(
        advisory_for(&snapshot),
        "Advisory for Pune: Current 41°C. Next days unsafe for spraying. Plan irrigation today."
    );

    let last = handle.stop().await.unwrap();
    assert_eq!(last.location, "Pune");
}

#[tokio::test]
async fn test_empty_location_defaults_and_stop_returns_readings() {
    let buffer = SharedBuffer::default();
    let handle = spawn_live_forecast(
        "",
        AppConfig::from_lookup(|_| None).unwrap().live,
        Arc::new(FixedClock::on(2024, 1, 1)),
        Box::new(MockRng),
        Arc::new(TerminalView::new(buffer.clone())),
    )
    .unwrap();

    let snapshot = handle.stop().await.unwrap();

    assert_eq!(snapshot.location, "Jalgaon");
    assert_eq!(
        snapshot.readings,
        [41, 42, 42, 42, 42, 40, 42, 42, 41, 39, 40, 38, 39, 39, 38].map(f64::from)
    );
    assert!(buffer.text().contains("Jalgaon: now 41°C"));
}
