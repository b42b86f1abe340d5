//! Error types for the worker pool

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in the worker pool
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Pool has begun shutdown and no longer accepts jobs
    #[error("Pool '{pool_name}' is shutting down and no longer accepts jobs")]
    ShuttingDown {
        /// Name of the pool
        pool_name: String,
    },

    /// Failed to spawn a worker thread
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    Spawn {
        /// ID of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    Join {
        /// ID of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl PoolError {
    /// Create a shutting down error
    pub fn shutting_down(pool_name: impl Into<String>) -> Self {
        PoolError::ShuttingDown {
            pool_name: pool_name.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::Spawn {
            worker_id,
            message: message.into(),
            source: None,
        }
    }

    /// Create a spawn error with the underlying IO error
    pub fn spawn_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        PoolError::Spawn {
            worker_id,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::Join {
            worker_id,
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        PoolError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PoolError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PoolError::shutting_down("main_pool");
        assert!(matches!(err, PoolError::ShuttingDown { .. }));

        let err = PoolError::invalid_config("num_workers", "must be greater than 0");
        assert!(matches!(err, PoolError::InvalidConfig { .. }));

        let err = PoolError::join(3, "worker panicked");
        assert!(matches!(err, PoolError::Join { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PoolError::shutting_down("worker");
        assert_eq!(
            err.to_string(),
            "Pool 'worker' is shutting down and no longer accepts jobs"
        );

        let err = PoolError::invalid_config("num_workers", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'num_workers': must be greater than 0"
        );
    }

    #[test]
    fn test_spawn_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::OutOfMemory, "no threads left");
        let err = PoolError::spawn_with_source(5, "Cannot create thread", io_err);

        assert!(matches!(err, PoolError::Spawn { .. }));
        assert!(err.to_string().contains("worker thread #5"));
    }
}
