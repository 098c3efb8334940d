use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-aware aggregation of validation messages. Messages recorded at this
/// level live in `messages`; nested routes (element names, member names,
/// list indexes) live in `children`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    pub messages: Vec<String>,
    pub children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message at the current level.
    pub fn add(&mut self, err: impl ToString) {
        self.messages.push(err.to_string());
    }

    /// Record a message under a nested route.
    pub fn add_for(&mut self, route: impl Into<String>, err: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(err);
    }

    /// Merge another tree at the current level.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.merge_for(route, child);
        }
    }

    /// Merge another tree under a nested route, dropping it if empty.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        self.children.entry(route.into()).or_default().merge(other);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages across all routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs in route order.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);

        out
    }

    fn flatten_into(&self, route: String, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((route.clone(), message.clone()));
        }

        for (segment, child) in &self.children {
            child.flatten_into(join_route(&route, segment), out);
        }
    }

    /// Return `Ok(())` when no messages were recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// index segments attach without a dot
fn join_route(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else if segment.starts_with('[') {
        format!("{prefix}{segment}")
    } else {
        format!("{prefix}.{segment}")
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, message)) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted message on an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {{
        $errs.add(format!($($arg)*));
    }};
}
