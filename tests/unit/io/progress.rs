//! Tests for attempt and rendering progress tracking

#[cfg(test)]
mod tests {
    use layerloom::io::error::configuration_error;
    use layerloom::io::progress::ProgressManager;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Tests ProgressManager construction
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();

        assert_eq!(pm.attempt_position(), None);
        assert_eq!(pm.saved_count(), None);
        pm.finish();
    }

    // Tests accepted counts move the attempt bar
    // Verified by incrementing instead of setting the position
    #[test]
    fn test_attempt_progress() {
        let mut pm = ProgressManager::default();

        pm.start_attempt(1, 10);
        pm.member_accepted(3);
        pm.member_accepted(4);

        assert_eq!(pm.attempt_position(), Some(4));
        pm.finish_generation();
        assert_eq!(pm.attempt_position(), None);
    }

    // Tests a failed attempt releases its bar and the next attempt starts from zero
    // Verified by reusing the previous bar
    #[test]
    fn test_failed_attempt_resets() {
        let mut pm = ProgressManager::new();

        pm.start_attempt(1, 10);
        pm.member_accepted(6);
        pm.fail_attempt(1, &configuration_error("pool ran dry"));
        assert_eq!(pm.attempt_position(), None);

        pm.start_attempt(2, 10);
        assert_eq!(pm.attempt_position(), Some(0));

        // Starting again without failing replaces the bar
        pm.member_accepted(2);
        pm.start_attempt(3, 10);
        assert_eq!(pm.attempt_position(), Some(0));
        pm.finish();
    }

    // Tests saved members are counted from several threads
    // Verified by counting on a copy of the bar
    #[test]
    fn test_member_saved_across_threads() {
        let mut pm = ProgressManager::new();
        pm.start_saving(8);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    pm.member_saved();
                    pm.member_saved();
                });
            }
        });

        assert_eq!(pm.saved_count(), Some(8));
        pm.finish();
        assert_eq!(pm.saved_count(), None);
    }

    // Tests a failed attempt is reported once with its number and cause
    // Verified by dropping the warning when no attempt bar is open
    #[test]
    fn test_fail_attempt_reports_cause() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut pm = ProgressManager::new();
        tracing::subscriber::with_default(subscriber, || {
            pm.start_attempt(4, 10);
            pm.fail_attempt(4, &configuration_error("pool ran dry"));
            pm.fail_attempt(5, &configuration_error("no bar open"));
        });

        let output = String::from_utf8_lossy(&log.0.lock().unwrap()).into_owned();
        let lines: Vec<&str> = output.lines().collect();
        let [bar_open, no_bar] = lines.as_slice() else {
            unreachable!("Expected two warnings, got {output}");
        };
        assert!(bar_open.contains("attempt failed"));
        assert!(bar_open.contains("attempt=4"));
        assert!(bar_open.contains("pool ran dry"));
        assert!(no_bar.contains("attempt=5"));
        assert_eq!(pm.attempt_position(), None);
    }
}
