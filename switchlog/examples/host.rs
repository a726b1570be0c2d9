//! Wires a logger into a small host: the backend is chosen from the command
//! line, handed to each subsystem, rotated on demand and destroyed on exit.
//!
//! cargo run --example host -- file /tmp/host.log

use std::sync::Arc;
use std::thread;
use switchlog::*;

struct Cache {
    logger: Arc<dyn Logger>,
}

impl Cache {
    fn get(&self, key: &str) -> Option<u64> {
        log_debug!(self.logger, "cache lookup: {key}");
        None
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let backend = args.next().unwrap_or_else(|| "silent".to_string());
    let path = args
        .next()
        .unwrap_or_else(|| std::env::temp_dir().join("host.log").display().to_string());

    let config = LogConfig::new()
        .level(LogLevel::Debug)
        .file_path(path)
        .max_log_size(4096)
        .log_file_count(3)
        .tag("host");

    let logger = match create(&backend, &config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{e}, falling back to the silent backend");
            Arc::new(SilentLogger::new())
        }
    };

    // route `log` records from dependencies into the same backend
    if let Err(e) = LogBridge::new(logger.clone()).start() {
        eprintln!("failed to register log bridge: {e}");
    }

    log_info!(logger, "starting with the {} backend", logger.log_type());

    let cache = Arc::new(Cache {
        logger: logger.clone(),
    });
    let workers: Vec<_> = (0..4)
        .map(|id| {
            let cache = cache.clone();
            thread::spawn(move || {
                for n in 0..50 {
                    cache.get(&format!("worker-{id}-key-{n}"));
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    log::warn!("emitted through the log facade");

    if let Err(e) = logger.log_rotate() {
        eprintln!("rotation failed: {e}");
    }
    log_info!(logger, "shutting down");

    if let Err(e) = logger.destroy() {
        eprintln!("failed to close log: {e}");
    }
}
