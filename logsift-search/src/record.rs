//! Log record model: the rows the search runs over.

use std::fmt;

/// Log priority, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Priority {
    /// Single-letter form used by logcat (`V`, `D`, `I`, `W`, `E`, `F`).
    pub fn letter(self) -> char {
        match self {
            Priority::Verbose => 'V',
            Priority::Debug => 'D',
            Priority::Info => 'I',
            Priority::Warn => 'W',
            Priority::Error => 'E',
            Priority::Fatal => 'F',
        }
    }
}

/// Searchable text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AppName,
    Tag,
    Message,
}

impl Field {
    /// The value of this field in `record`.
    pub fn value_of(self, record: &LogRecord) -> &str {
        match self {
            Field::AppName => record.app_name(),
            Field::Tag => record.tag(),
            Field::Message => record.message(),
        }
    }
}

/// A single parsed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    time: Option<String>,
    priority: Priority,
    tag: String,
    message: String,
    app_name: String,
}

impl LogRecord {
    pub fn new(priority: Priority, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            time: None,
            priority,
            tag: tag.into(),
            message: message.into(),
            app_name: String::new(),
        }
    }

    /// A record carrying only a message, handy for tests and synthetic rows.
    pub fn for_message(message: impl Into<String>) -> Self {
        Self::new(Priority::default(), String::new(), message)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the app name; surrounding whitespace is dropped.
    pub fn with_app_name(mut self, app_name: impl AsRef<str>) -> Self {
        self.app_name = app_name.as_ref().trim().to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the already formatted timestamp.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// App name, or `""` when it is unknown.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(time) = &self.time {
            write!(f, "{time}\t")?;
        }
        write!(f, "{}\t{}\t{}", self.priority.letter(), self.tag, self.message)
    }
}
