/// Pending connections the kernel queues while one peer is being drained.
pub const DEFAULT_BACKLOG: u32 = 10;

/// Bytes moved per read, on both sides of the relay.
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

#[derive(Clone, Debug)]
pub struct ListenerConfig {
    pub port: String,
    pub backlog: u32,
    pub chunk_size: usize,
    pub reuse_address: bool,
}

impl ListenerConfig {
    /// `port` is a number or a service name, resolved when binding.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            backlog: DEFAULT_BACKLOG,
            chunk_size: DEFAULT_CHUNK_SIZE,
            reuse_address: true,
        }
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_reuse_address(mut self, reuse_address: bool) -> Self {
        self.reuse_address = reuse_address;
        self
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn backlog(&self) -> u32 {
        self.backlog
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn reuse_address(&self) -> bool {
        self.reuse_address
    }
}

#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    pub host: String,
    pub port: String,
    pub chunk_size: usize,
}

impl ConnectorConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
