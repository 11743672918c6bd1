//! Load options

/// Options controlling how files are loaded
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Treat the first row as column headers
    pub headers: bool,
    /// Acquire an advisory rename lock before reading a file
    pub lock: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            headers: true,
            lock: false,
        }
    }
}

impl LoadOptions {
    /// Create options with defaults (headers on, no locking)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the first row is treated as headers
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// Set whether files are locked before reading
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }
}
