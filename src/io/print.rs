// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Print trigger hook.
//!
//! The editor only signals that the user asked to print; producing paper or
//! a file is up to whoever implements [`PrintHook`].

pub trait PrintHook {
    fn trigger(&mut self);
}

/// Default hook: records the request in the log.
#[derive(Debug, Default)]
pub struct LogPrintHook {
    requests: usize,
}

impl LogPrintHook {
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl PrintHook for LogPrintHook {
    fn trigger(&mut self) {
        self.requests += 1;
        log::info!("Print requested ({} so far)", self.requests);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_hook_counts_requests() {
        let mut hook = LogPrintHook::default();
        hook.trigger();
        hook.trigger();
        assert_eq!(hook.requests(), 2);
    }
}
