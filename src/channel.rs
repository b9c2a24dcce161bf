use std::cell::RefCell;

/// Destination for the lines notifiers produce
pub trait Channel {
    /// Deliver a single line of output
    fn deliver(&self, line: &str);
}

/// Prints every line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Channel for Console {
    fn deliver(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps delivered lines in memory, in delivery order
#[derive(Debug, Default)]
pub struct Recorder {
    /// Lines received so far
    lines: RefCell<Vec<String>>,
}

impl Recorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line received so far
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// All lines joined with trailing newlines, as they would appear on a console
    #[must_use]
    pub fn output(&self) -> String {
        self.lines.borrow().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

impl Channel for Recorder {
    fn deliver(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
