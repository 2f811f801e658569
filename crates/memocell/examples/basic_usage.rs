//! Basic usage example for the memocell crate

use std::thread;
use std::time::Duration;

use memocell::{Lazy, LazyCache};

/// Summary derived from all recorded samples.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Report {
    samples: usize,
    mean: f64,
}

/// Owning object that exposes an expensive derived report through a
/// memoizing accessor.
struct Telemetry {
    samples: Vec<f64>,
    report: LazyCache<Report, Box<dyn FnMut() -> Result<Report, String> + Send>>,
}

impl Telemetry {
    fn new(samples: Vec<f64>) -> Self {
        let data = samples.clone();
        Self {
            samples,
            report: LazyCache::new(Box::new(move || {
                if data.is_empty() {
                    return Err("no samples recorded".to_string());
                }
                // Simulate an expensive aggregation
                thread::sleep(Duration::from_millis(25));
                let mean = data.iter().sum::<f64>() / data.len() as f64;
                Ok(Report {
                    samples: data.len(),
                    mean,
                })
            })),
        }
    }

    fn report(&self) -> Result<Report, String> {
        self.report.get()
    }
}

fn main() -> Result<(), String> {
    let telemetry = Telemetry::new(vec![1.0, 2.0, 4.0, 8.0]);
    println!("recorded {} samples", telemetry.samples.len());

    println!("first access runs the aggregation...");
    let report = telemetry.report()?;
    println!("report: {report:?}");

    println!("second access is served from the cache");
    let cached = telemetry.report()?;
    println!(
        "report: {cached:?} (aggregation ran {} time(s), {} cache hit(s))",
        telemetry.report.computations(),
        telemetry.report.hits()
    );

    // Infallible derived values fit the Lazy companion
    let (x, y) = (3.0f64, 4.0f64);
    let distance = Lazy::new(move || (x * x + y * y).sqrt());
    println!("distance from origin: {}", distance.force());

    Ok(())
}
