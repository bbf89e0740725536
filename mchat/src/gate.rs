//! Host-provided authorization gate for submit.

use std::sync::atomic::{AtomicBool, Ordering};

/// Answers whether the current user may submit. Sign-in itself happens elsewhere.
pub trait AccessGate: Send + Sync {
    fn is_authorized(&self) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAuthorized;

impl AccessGate for AlwaysAuthorized {
    fn is_authorized(&self) -> bool {
        true
    }
}

/// A gate the host flips on sign-in and sign-out.
#[derive(Debug, Default)]
pub struct SharedAccessGate {
    authorized: AtomicBool,
}

impl SharedAccessGate {
    pub fn new(authorized: bool) -> Self {
        Self {
            authorized: AtomicBool::new(authorized),
        }
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::SeqCst);
    }
}

impl AccessGate for SharedAccessGate {
    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }
}
