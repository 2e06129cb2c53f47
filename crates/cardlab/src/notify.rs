//! Terminal notifier
//!
//! Engine notices go to stderr so stdout stays clean for command output.
//! In JSON mode printing is suppressed and the buffered notices are embedded
//! in the JSON document instead.

use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;

use cardlab_core::notify::{Notice, Notifier, Severity};

#[derive(Clone)]
pub struct CliNotifier {
    quiet: bool,
    seen: Rc<RefCell<Vec<Notice>>>,
}

impl CliNotifier {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Every notice received so far, in order
    pub fn notices(&self) -> Vec<Notice> {
        self.seen.borrow().clone()
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, notice: Notice) {
        if !self.quiet {
            let icon = match notice.severity {
                Severity::Info => "→".cyan(),
                Severity::Success => "✓".green(),
                Severity::Warning => "!".yellow(),
            };
            eprintln!("{} {}", icon, notice.message);
        }
        self.seen.borrow_mut().push(notice);
    }
}
