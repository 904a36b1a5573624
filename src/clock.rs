use std::time::Instant;

/// Game clock. Starts on the first dig and stops counting at the time limit.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    started: Option<Instant>,
    limit: Option<u64>,
}

impl Clock {
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            started: None,
            limit,
        }
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// `None` until the clock starts.
    pub fn elapsed_secs(&self) -> Option<u64> {
        let elapsed = self.started?.elapsed().as_secs();
        Some(self.limit.map_or(elapsed, |limit| elapsed.min(limit)))
    }

    pub fn expired(&self) -> bool {
        match (self.limit, self.elapsed_secs()) {
            (Some(limit), Some(elapsed)) => elapsed >= limit,
            _ => false,
        }
    }

    pub fn describe(&self) -> String {
        let elapsed = self.elapsed_secs().unwrap_or(0);
        match self.limit {
            Some(limit) => format!("{}s left", limit.saturating_sub(elapsed)),
            None => format!("{}s", elapsed),
        }
    }
}
