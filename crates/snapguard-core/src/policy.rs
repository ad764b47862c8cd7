//! Access policy consulted before any command runs
//!
//! The host decides who may drive the engine (typically "is the current
//! user an administrator"). The dispatcher only asks yes or no.

/// Decides whether the current caller may issue commands
///
/// # Example
/// ```
/// use snapguard_core::policy::{AccessCheck, AllowAll, DenyAll};
///
/// assert!(AllowAll.is_allowed());
/// assert!(!DenyAll.is_allowed());
/// assert!((|| true).is_allowed());
/// ```
pub trait AccessCheck: Send + Sync {
    /// `true` when the caller may issue commands
    fn is_allowed(&self) -> bool;
}

/// Every caller is allowed
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessCheck for AllowAll {
    fn is_allowed(&self) -> bool {
        true
    }
}

/// No caller is allowed
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessCheck for DenyAll {
    fn is_allowed(&self) -> bool {
        false
    }
}

impl<F> AccessCheck for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_allowed(&self) -> bool {
        self()
    }
}
