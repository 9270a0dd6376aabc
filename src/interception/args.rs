//! Argument lists captured at the call boundary.

use std::fmt::{self, Write};

/// Ordered list of a call's arguments, captured as `Debug` renderings.
///
/// The argument count is always exact. A value whose `Debug` impl fails is not
/// stored, and the list then refuses to render instead of echoing a partial list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    rendered: Vec<String>,
    count: usize,
    complete: bool,
}

impl CallArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self {
            rendered: Vec::new(),
            count: 0,
            complete: true,
        }
    }

    /// Append an argument.
    pub fn push<T: fmt::Debug + ?Sized>(&mut self, value: &T) {
        self.count += 1;

        let mut text = String::new();
        if write!(text, "{:?}", value).is_ok() {
            self.rendered.push(text);
        } else {
            self.complete = false;
        }
    }

    /// Builder-style [`CallArgs::push`].
    pub fn with<T: fmt::Debug + ?Sized>(mut self, value: &T) -> Self {
        self.push(value);
        self
    }

    /// Number of arguments the call received.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Render as `[a, b, c]`, or `None` if any argument failed to render.
    pub fn render(&self) -> Option<String> {
        if !self.complete {
            return None;
        }
        Some(format!("[{}]", self.rendered.join(", ")))
    }
}

/// Build a [`CallArgs`] from a list of expressions, each borrowed and rendered with `Debug`.
///
/// ```
/// use service_call_logger::call_args;
///
/// let args = call_args![42_u64, "sales"];
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.render().as_deref(), Some("[42, \"sales\"]"));
/// ```
#[macro_export]
macro_rules! call_args {
    () => {
        $crate::interception::CallArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {{
        let mut args = $crate::interception::CallArgs::new();
        $(args.push(&$arg);)+
        args
    }};
}
