use std::time::Instant;

use log::debug;

/// Reports how long a named scope took when dropped.
pub struct ScopeTimer {
    name: &'static str,
    start: Instant,
}

impl ScopeTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        debug!("{} took {:?}", self.name, self.start.elapsed());
    }
}
