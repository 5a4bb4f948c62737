//! Clock demo - a root component with a nested clock, driven from the terminal.
//!
//! Run with: cargo run --example clock
//! Logs go to stderr: RUST_LOG=spark_dom=debug cargo run --example clock 2>clock.log

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use spark_dom::{
    computed, mount, signal, Component, Computed, Document, Field, Members, Registry,
    RenderOptions, Signal,
};
use tracing_subscriber::EnvFilter;

// =============================================================================
// Components
// =============================================================================

struct AppComponent {
    title: Field<String>,
}

impl Component for AppComponent {
    const SELECTOR: &'static str = "app";
    const TEMPLATE: &'static str = "<div><h1>{{title}}</h1><clock></clock></div>";

    fn create() -> Self {
        Self {
            title: Field::new("spark-dom clock".into()),
        }
    }

    fn members() -> Members<Self> {
        Members::new().field("title", |app: &Self| app.title.get())
    }
}

struct ClockComponent {
    time: Signal<String>,
    ticks: Field<u32>,
    status: Computed<String>,
}

impl ClockComponent {
    fn tick(&self) {
        self.time.set(utc_now());
        self.ticks.update(|n| *n += 1);
    }
}

impl Component for ClockComponent {
    const SELECTOR: &'static str = "clock";
    const TEMPLATE: &'static str = r#"<p>{{time()}}</p><p>{{status()}}</p><p>Ticks: {{ticks}}</p><button (click)="tick()">Update</button>"#;

    fn create() -> Self {
        let time = signal(utc_now());
        let source = time.clone();
        Self {
            status: computed(move || {
                source.with(|time| {
                    if time.ends_with(":00") {
                        "on the minute".to_string()
                    } else {
                        "ticking".to_string()
                    }
                })
            }),
            time,
            ticks: Field::new(0),
        }
    }

    fn members() -> Members<Self> {
        Members::new()
            .reactive("time", |clock: &Self| clock.time.get())
            .reactive("status", |clock: &Self| clock.status.get())
            .field("ticks", |clock: &Self| clock.ticks.get().to_string())
            .handler("tick", Self::tick)
    }
}

/// Current UTC time of day as `HH:MM:SS`.
fn utc_now() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
        % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let registry = Registry::builder()
        .register::<AppComponent>()
        .register::<ClockComponent>()
        .build()?;

    let doc = Rc::new(Document::new());
    let app = mount::<AppComponent>(doc.clone(), &registry, RenderOptions::default())?;

    spark_dom::host::run(&app, &doc)?;
    app.unmount();
    Ok(())
}
