/// Severity of the footer status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// The single-line message area at the bottom of the board. Holds the most
/// recent message until it is replaced or dismissed; the browser-alert
/// moments (save results, rejected names, print preconditions) land here.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<(StatusLevel, String)>,
}

impl StatusLine {
    pub fn set_info(&mut self, message: impl Into<String>) {
        self.current = Some((StatusLevel::Info, message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.current = Some((StatusLevel::Error, message.into()));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<(StatusLevel, &str)> {
        self.current.as_ref().map(|(level, msg)| (*level, msg.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_message_wins() {
        let mut status = StatusLine::default();
        status.set_info("saved");
        status.set_error("save failed");
        assert_eq!(status.current(), Some((StatusLevel::Error, "save failed")));
        status.clear();
        assert!(status.current().is_none());
    }
}
