//! Cooperative interrupt checks for long traversals

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Result, StackError};

/// Out-of-band cancellation flag.
///
/// The inspection layer is single-threaded and never suspends, so very long
/// backtraces and deep scope chains are made abortable by polling this token
/// once per frame stepped or symbol visited. A signal handler or UI thread
/// raises it; the next poll consumes it and aborts the request with
/// [`StackError::Interrupted`].
#[derive(Debug, Clone, Default)]
pub struct InterruptToken {
    flag: Arc<AtomicBool>,
}

impl InterruptToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the inspection in progress.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Poll the token, consuming a pending interrupt so the next request
    /// starts clean.
    pub fn check(&self) -> Result<()> {
        if self.flag.swap(false, Ordering::SeqCst) {
            Err(StackError::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_consumes_interrupt() {
        let token = InterruptToken::new();
        assert_eq!(token.check(), Ok(()));

        token.raise();
        assert!(token.is_raised());
        assert_eq!(token.check(), Err(StackError::Interrupted));

        // Consumed: the next request is not aborted again.
        assert!(!token.is_raised());
        assert_eq!(token.check(), Ok(()));
    }
}
