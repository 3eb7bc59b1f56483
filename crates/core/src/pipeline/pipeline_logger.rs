use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for pipeline progress, kept separate from the `log` facade so
/// use cases can be watched without caring where the output goes.
pub trait PipelineLogger: Send {
    /// `current` of `total` units of `stage` are done.
    fn progress(&mut self, stage: &str, current: usize, total: usize);

    /// Adds `value` to the running total of a named counter.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// End-of-run report. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Used by tests and library callers.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _stage: &str, _current: usize, _total: usize) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: throttled progress lines through `log`, metric totals in
/// the summary.
pub struct StdoutPipelineLogger {
    throttle: usize,
    metrics: BTreeMap<String, f64>,
    start_time: Instant,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    pub fn metric_total(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Formatted summary, or `None` when nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.metrics.is_empty() {
            return None;
        }
        let mut lines = vec![format!(
            "Run summary ({:.1}s):",
            self.start_time.elapsed().as_secs_f64()
        )];
        for (name, total) in &self.metrics {
            lines.push(format!("  {name}: {total}"));
        }
        Some(lines.join("\n"))
    }

    fn should_report(&self, current: usize, total: usize) -> bool {
        total > 0 && (current % self.throttle == 0 || current == total)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, stage: &str, current: usize, total: usize) {
        if self.should_report(current, total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("{stage}: {current}/{total} ({pct:.1}%)");
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        *self.metrics.entry(name.to_string()).or_default() += value;
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
