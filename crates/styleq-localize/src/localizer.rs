//! Memoized bidirectional compilation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use log::trace;
use once_cell::sync::Lazy;
use styleq::{CompiledStyle, Descriptor, Style, StyleValue, StyleqOptions};

use crate::direction::DirectionCell;

/// Memos smaller than this are swept for dead sources on every miss. Larger
/// ones are swept each time they double.
const MIN_PRUNE_LEN: usize = 32;

static DEFAULT_LOCALIZER: Lazy<Localizer> = Lazy::new(Localizer::new);

/// Compiles `descriptor` for one writing direction with the process-wide
/// [`Localizer`].
///
/// Descriptors that are not compiled with the localize flag are returned as
/// is. For flagged ones, every `[ltr, rtl]` array value is replaced by the
/// element for the requested direction.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use styleq::{CompiledStyle, StyleValue};
/// use styleq_localize::localize;
///
/// let float = CompiledStyle::new()
///     .localized()
///     .set("float", vec!["float-left", "float-right"])
///     .into_descriptor();
///
/// let rtl = localize(&float, true);
/// assert_eq!(
///     rtl.as_compiled().unwrap().get("float"),
///     Some(&StyleValue::from("float-right"))
/// );
/// assert!(Arc::ptr_eq(&rtl, &localize(&float, true)));
/// ```
pub fn localize(descriptor: &Descriptor, is_rtl: bool) -> Descriptor {
    DEFAULT_LOCALIZER.localize(descriptor, is_rtl)
}

/// Both compiled outputs of one localized source, filled lazily.
#[derive(Debug)]
struct MemoEntry {
    source: Weak<Style>,
    slots: [Option<Descriptor>; 2],
}

#[derive(Debug, Default)]
struct MemoState {
    entries: HashMap<usize, MemoEntry>,
    prune_at: usize,
}

impl MemoState {
    fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.source.strong_count() > 0);
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!("pruned {} dead localized styles", removed);
        }
        removed
    }
}

/// A bidirectional compiler with its own memo.
///
/// Outputs are memoized per source identity, so asking for the same source
/// and direction again returns the identical [`Descriptor`]. Resolver caches
/// key on that identity.
///
/// The memo holds its outputs strongly. Once a source is dropped, its outputs
/// (and any resolver cache entries keyed on them) stay alive until the memo
/// is next swept: on the following miss while the memo is small, when a
/// large memo doubles in size, or on an explicit [`Localizer::prune`].
#[derive(Debug, Default)]
pub struct Localizer {
    memo: Mutex<MemoState>,
}

impl Localizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `descriptor` for one writing direction.
    pub fn localize(&self, descriptor: &Descriptor, is_rtl: bool) -> Descriptor {
        let source = match &**descriptor {
            Style::Compiled(style) if style.is_localized() => style,
            _ => return Arc::clone(descriptor),
        };
        let slot = usize::from(is_rtl);
        let key = Arc::as_ptr(descriptor) as usize;

        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = memo.entries.get(&key) {
            if entry.source.strong_count() > 0 {
                if let Some(compiled) = &entry.slots[slot] {
                    return Arc::clone(compiled);
                }
            }
        }

        let compiled = compile(source, slot);
        let len = memo.entries.len();
        if len < MIN_PRUNE_LEN || len >= memo.prune_at {
            memo.sweep();
            memo.prune_at = memo.entries.len() * 2;
        }

        let entry = memo.entries.entry(key).or_insert_with(|| MemoEntry {
            source: Arc::downgrade(descriptor),
            slots: [None, None],
        });
        entry.slots[slot] = Some(Arc::clone(&compiled));
        compiled
    }

    /// Drops the outputs of every source that has been dropped, returning how
    /// many sources were removed.
    pub fn prune(&self) -> usize {
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.sweep()
    }

    /// Number of sources with at least one memoized output.
    pub fn len(&self) -> usize {
        let memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.entries
            .values()
            .filter(|entry| entry.source.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolver options whose transform localizes with this localizer,
    /// reading the direction from `direction` on every call.
    pub fn options(self: &Arc<Self>, direction: DirectionCell) -> StyleqOptions {
        let localizer = Arc::clone(self);
        StyleqOptions::new()
            .transform(move |descriptor| localizer.localize(descriptor, direction.is_rtl()))
    }
}

/// Resolver options whose transform localizes with the process-wide
/// localizer, reading the direction from `direction` on every call.
///
/// # Example
///
/// ```rust
/// use styleq::{styles, CompiledStyle, Styleq};
/// use styleq_localize::{localized_options, DirectionCell};
///
/// let direction = DirectionCell::new(false);
/// let resolver = Styleq::factory(localized_options(direction.clone()));
/// let margin = CompiledStyle::new()
///     .localized()
///     .set("marginStart", vec!["margin-left-0px", "margin-right-0px"])
///     .into_descriptor();
///
/// assert_eq!(resolver.resolve(&styles![&margin]).class_name, "margin-left-0px");
/// direction.set_rtl(true);
/// assert_eq!(resolver.resolve(&styles![&margin]).class_name, "margin-right-0px");
/// ```
pub fn localized_options(direction: DirectionCell) -> StyleqOptions {
    StyleqOptions::new()
        .transform(move |descriptor| DEFAULT_LOCALIZER.localize(descriptor, direction.is_rtl()))
}

fn compile(source: &CompiledStyle, slot: usize) -> Descriptor {
    source
        .entries()
        .fold(
            CompiledStyle::new().with_marker(source.marker().clone()),
            |compiled, (property, value)| {
                let value = match value {
                    StyleValue::Array(pair) => pair.get(slot).cloned().unwrap_or_default(),
                    other => other.clone(),
                };
                compiled.set(property, value)
            },
        )
        .into_descriptor()
}
