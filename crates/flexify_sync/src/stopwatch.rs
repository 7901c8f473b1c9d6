/// Elapsed-time counter for a workout in progress, advanced by the host's
/// one-second tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    running: bool,
    elapsed_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Start or pause. Returns whether it is now running.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_secs = 0;
    }

    /// Advance one second if running.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs += 1;
        }
    }

    /// `MM:SS`; minutes keep counting past 59.
    pub fn format_elapsed(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}
