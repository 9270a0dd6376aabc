//! Return value classification.
//!
//! A returned value is never logged wholesale. It is classified into a closed set
//! of [`RenderKind`]s and only the resulting [`SummaryValue`] reaches the log.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::{self, Write};
use std::sync::Arc;

/// Text written after a raw byte payload is returned.
pub const BYTES_SUMMARY: &str = "File as byte[]";

/// Closed set of renderable kinds a return value falls into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderKind {
    /// Nothing was returned
    Absent,

    /// A size-bearing container
    Collection { len: usize },

    /// A raw byte payload; its content is never rendered
    Bytes,

    /// Anything else, already rendered to text
    Other(String),
}

impl RenderKind {
    /// Apply the ordered summary rules.
    pub fn summary(self) -> Option<SummaryValue> {
        match self {
            Self::Absent => None,
            Self::Collection { len } => Some(SummaryValue(format!("Collection size - {}", len))),
            Self::Bytes => Some(SummaryValue(BYTES_SUMMARY.to_string())),
            Self::Other(text) => Some(SummaryValue(text)),
        }
    }
}

/// Short, log-safe stand-in for a return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryValue(String);

impl SummaryValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Types that can be classified at the call boundary.
///
/// Returns `Err` only when rendering an `Other` value fails; the caller then
/// skips the log line that would have carried the summary.
pub trait Summarize {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error>;
}

/// Classify and summarize a returned value.
pub fn summarize<T: Summarize + ?Sized>(value: &T) -> Result<Option<SummaryValue>, fmt::Error> {
    Ok(value.render_kind()?.summary())
}

/// Render through `Display` without panicking on a failing impl.
pub fn render_display<T: fmt::Display + ?Sized>(value: &T) -> Result<RenderKind, fmt::Error> {
    let mut text = String::new();
    write!(text, "{}", value)?;
    Ok(RenderKind::Other(text))
}

/// Opt types into [`Summarize`] as [`RenderKind::Other`] via their `Display` impl.
#[macro_export]
macro_rules! summarize_as_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::interception::Summarize for $ty {
                fn render_kind(
                    &self,
                ) -> ::std::result::Result<$crate::interception::RenderKind, ::std::fmt::Error> {
                    $crate::interception::summary::render_display(self)
                }
            }
        )+
    };
}

summarize_as_display!(
    String, str, bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
    f32, f64
);

/// Raw file contents returned by a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent(pub Vec<u8>);

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Summarize for FileContent {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Bytes)
    }
}

impl Summarize for () {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Absent)
    }
}

impl<T: Summarize> Summarize for Option<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        match self {
            Some(value) => value.render_kind(),
            None => Ok(RenderKind::Absent),
        }
    }
}

impl<T: Summarize + ?Sized> Summarize for &T {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        (**self).render_kind()
    }
}

impl<T: Summarize + ?Sized> Summarize for Box<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        (**self).render_kind()
    }
}

impl<T: Summarize + ?Sized> Summarize for Arc<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        (**self).render_kind()
    }
}

/// Sequences of `u8` are raw byte payloads, everything else is a collection.
fn sequence_kind<T: 'static>(len: usize) -> RenderKind {
    if TypeId::of::<T>() == TypeId::of::<u8>() {
        RenderKind::Bytes
    } else {
        RenderKind::Collection { len }
    }
}

impl<T: 'static> Summarize for [T] {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(sequence_kind::<T>(self.len()))
    }
}

impl<T: 'static> Summarize for Vec<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(sequence_kind::<T>(self.len()))
    }
}

impl<T: 'static> Summarize for VecDeque<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(sequence_kind::<T>(self.len()))
    }
}

impl<T, S> Summarize for HashSet<T, S> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Collection { len: self.len() })
    }
}

impl<T> Summarize for BTreeSet<T> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Collection { len: self.len() })
    }
}

impl<K, V, S> Summarize for HashMap<K, V, S> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Collection { len: self.len() })
    }
}

impl<K, V> Summarize for BTreeMap<K, V> {
    fn render_kind(&self) -> Result<RenderKind, fmt::Error> {
        Ok(RenderKind::Collection { len: self.len() })
    }
}
