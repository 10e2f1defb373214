use std::fmt;

/// Errors from loading schedule data. The resolver itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScheduleError {
    /// Schedule text or a feature collection that is not valid JSON.
    Json { message: String, input: String },

    /// A data file that could not be read.
    Io { message: String, path: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { message, .. } => write!(f, "invalid schedule data: {message}"),
            Self::Io { message, path } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl ScheduleError {
    pub fn json(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            input: input.into(),
        }
    }

    pub fn io(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Format the error with the offending input echoed back, truncated to
    /// one line.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Json { input, .. } if !input.is_empty() => {
                format!("error: {self}\n  {}", excerpt(input, 60))
            }
            _ => format!("error: {self}"),
        }
    }
}

fn excerpt(input: &str, max: usize) -> String {
    let line = input.lines().next().unwrap_or("").trim();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
