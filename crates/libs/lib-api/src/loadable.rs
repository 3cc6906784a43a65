//! Loading state for one remote resource.

use lib_core::{GuardianError, Notifier, Result};

/// `loading` is true only between [`begin`](Loadable::begin) and
/// [`finish`](Loadable::finish).
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub loading: bool,
    pub data: Option<T>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Store the outcome of a fetch. Failures reset `data` to `None`, emit
    /// the matching notice and hand the error back (so a view can redirect
    /// on [`GuardianError::Unauthorized`]).
    pub fn finish<N: Notifier + ?Sized>(&mut self, result: Result<T>, notifier: &N) -> Option<GuardianError> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                None
            }
            Err(err) => {
                self.data = None;
                notifier.notify(err.notice());
                Some(err)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.data.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::{Notice, NoticeLevel};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.borrow_mut().push(notice);
        }
    }

    #[test]
    fn test_not_found_clears_data_with_info_notice() {
        let notifier = Recorder::default();
        let mut portfolio = Loadable { loading: false, data: Some(1) };
        portfolio.begin();
        let err = portfolio.finish(Err(GuardianError::RemoteNotFound("portfolio".into())), &notifier);

        assert!(!portfolio.loading);
        assert_eq!(portfolio.data, None);
        assert_eq!(err, Some(GuardianError::RemoteNotFound("portfolio".into())));
        assert_eq!(notifier.0.borrow()[0].level, NoticeLevel::Info);
    }

    #[test]
    fn test_failure_is_an_error_notice() {
        let notifier = Recorder::default();
        let mut alerts: Loadable<Vec<u8>> = Loadable::new();
        alerts.begin();
        alerts.finish(Err(GuardianError::RemoteFailure("HTTP 500".into())), &notifier);
        assert!(alerts.is_empty());
        assert_eq!(notifier.0.borrow()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_success_stores_value_silently() {
        let notifier = Recorder::default();
        let mut risk = Loadable::new();
        risk.begin();
        assert!(risk.loading);
        assert_eq!(risk.finish(Ok(42.5), &notifier), None);
        assert_eq!(risk.data, Some(42.5));
        assert!(notifier.0.borrow().is_empty());
    }
}
