//! Slash-variant expansion and substitution for path fragments
//!
//! A path fragment baked into a generated file can appear in either slash
//! style (`C:/old/proj` or `C:\old\proj`) depending on which tool wrote it.
//! Both variants of the old fragment are precomputed once and each is
//! replaced with the matching variant of the new fragment, so the slash
//! style of every occurrence is preserved.

use std::borrow::Cow;

/// A rewritten content buffer plus the number of occurrences replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
}

/// An old/new fragment pair expanded into both slash-normalized forms.
///
/// Built once at startup; [`FragmentPair::apply`] is pure and is called for
/// every scanned file.
#[derive(Debug, Clone)]
pub struct FragmentPair {
    old_forward: String,
    old_backward: String,
    new_forward: String,
    new_backward: String,
}

impl FragmentPair {
    pub fn new(old: &str, new: &str) -> Self {
        Self {
            old_forward: old.replace('\\', "/"),
            old_backward: old.replace('/', "\\"),
            new_forward: new.replace('\\', "/"),
            new_backward: new.replace('/', "\\"),
        }
    }

    /// Replace every occurrence of either slash form of the old fragment.
    ///
    /// The forward-slash form is replaced first, then the backslash form on
    /// the intermediate result; each occurrence takes the slash style of the
    /// form it matched. Matching is literal and non-overlapping, left to
    /// right. Returns `None` when the content comes out unchanged, so
    /// callers never rewrite a file that needs no fixing.
    pub fn apply(&self, content: &str) -> Option<Rewrite> {
        let mut replacements = 0;
        let mut current = Cow::Borrowed(content);

        if current.contains(&self.old_forward) {
            replacements += current.matches(&self.old_forward).count();
            current = Cow::Owned(current.replace(&self.old_forward, &self.new_forward));
        }

        if current.contains(&self.old_backward) {
            replacements += current.matches(&self.old_backward).count();
            current = Cow::Owned(current.replace(&self.old_backward, &self.new_backward));
        }

        match current {
            Cow::Borrowed(_) => None,
            // Still possible when old and new collapse to the same string
            Cow::Owned(rewritten) if rewritten == content => None,
            Cow::Owned(rewritten) => Some(Rewrite {
                content: rewritten,
                replacements,
            }),
        }
    }
}
