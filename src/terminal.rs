// Terminal mode setup and teardown.
// The guard puts the terminal back on drop, early error return, or panic.

use std::io;
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Raw mode plus the alternate screen.
#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, enable_raw_mode},
        };

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor, execute,
            terminal::{LeaveAlternateScreen, disable_raw_mode},
        };

        // Run every step even if an earlier one fails.
        let mut first_err: Option<io::Error> = None;
        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Handle that restores the terminal at most once.
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    /// Run `ops.setup()`. A half-finished setup is undone before the error
    /// is returned.
    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        if let Err(err) = ops.setup() {
            let _ = ops.restore();
            return Err(err);
        }
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

/// Restore the terminal before the previously installed panic hook runs,
/// so the panic message lands on the normal screen.
pub fn install_panic_hook(restorer: TerminalRestorer) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restorer.restore();
        previous(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockOps {
        calls: Mutex<Vec<&'static str>>,
        fail_setup: bool,
    }

    impl TerminalOps for MockOps {
        fn setup(&self) -> io::Result<()> {
            self.calls.lock().unwrap().push("setup");
            if self.fail_setup {
                return Err(io::Error::other("no tty"));
            }
            Ok(())
        }

        fn restore(&self) -> io::Result<()> {
            self.calls.lock().unwrap().push("restore");
            Ok(())
        }
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let ops = Arc::new(MockOps::default());
        {
            let _guard = TerminalGuard::with_ops(ops.clone()).unwrap();
        }
        assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
    }

    #[test]
    fn test_restorer_is_idempotent() {
        let ops = Arc::new(MockOps::default());
        let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
        let restorer = guard.restorer();

        restorer.restore().unwrap();
        restorer.restore().unwrap();
        drop(guard);

        assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
    }

    #[test]
    fn test_failed_setup_is_undone() {
        let ops = Arc::new(MockOps {
            fail_setup: true,
            ..MockOps::default()
        });
        assert!(TerminalGuard::with_ops(ops.clone()).is_err());
        assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
    }

    #[test]
    fn test_guard_restores_when_run_panics() {
        let ops = Arc::new(MockOps::default());
        let guard_ops = ops.clone();

        let result = panic::catch_unwind(panic::AssertUnwindSafe(move || {
            let _guard = TerminalGuard::with_ops(guard_ops).unwrap();
            panic!("draw failed");
        }));

        assert!(result.is_err());
        assert_eq!(&*ops.calls.lock().unwrap(), &["setup", "restore"]);
    }
}
