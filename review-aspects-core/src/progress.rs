// throughput as periodic log lines
use {
    std::time::{Duration, Instant},
    tracing::info,
};

const REPORT_INTERVAL: Duration = Duration::from_secs(10);

pub struct Progress {
    message: String,
    started_at: Instant,
    reported_at: Instant,
    total_processed: u64,
}

impl Progress {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            started_at: Instant::now(),
            reported_at: Instant::now(),
            total_processed: 0,
        }
    }

    pub fn update(&mut self) -> bool {
        self.total_processed += 1;

        let now = Instant::now();
        if now - self.reported_at >= REPORT_INTERVAL {
            self.reported_at = now;
            info!("{}: {} total ({:.2}/second)", self.message, self.total_processed, self.rate(now));
            true
        } else {
            false
        }
    }

    pub fn finish(&self) {
        info!("{}: done, {} total ({:.2}/second)", self.message, self.total_processed, self.rate(Instant::now()));
    }

    fn rate(&self, now: Instant) -> f32 {
        let elapsed = (now - self.started_at).as_secs_f32();
        if elapsed > 0.0 {
            self.total_processed as f32 / elapsed
        } else {
            0.0
        }
    }
}
