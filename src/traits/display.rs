//! Display target abstraction.
//!
//! A display target is anything the poller can write a status value into.
//! The terminal front end uses the in-memory handles from
//! [`crate::display`], but any widget that can hold a string can implement
//! this trait.

/// How a target reacts to incoming status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Content is replaced on every successful poll.
    Label,
    /// Written only while its current value is empty; user edits are kept.
    Input,
}

/// A value holder bound to one status field.
///
/// The poller and the UI write from different threads, so every
/// read-modify-write goes through [`update`](Self::update), which runs under
/// the target's own lock.
pub trait DisplayTarget: Send + Sync {
    /// Whether this target is a label or an input field.
    fn kind(&self) -> TargetKind;

    /// Current displayed content.
    fn value(&self) -> String;

    /// Edit the content in place as one atomic step.
    ///
    /// Returns whatever `edit` returns.
    fn update(&self, edit: &mut dyn FnMut(&mut String) -> bool) -> bool;

    /// Replace the displayed content unconditionally.
    fn set_value(&self, value: &str) {
        self.update(&mut |current| {
            current.clear();
            current.push_str(value);
            true
        });
    }

    /// Apply a value from a status document, honoring the target's kind.
    ///
    /// Returns `true` if the displayed content was written.
    fn apply(&self, value: &str) -> bool {
        match self.kind() {
            TargetKind::Label => {
                self.set_value(value);
                true
            }
            TargetKind::Input => self.update(&mut |current| {
                if current.is_empty() {
                    current.push_str(value);
                    true
                } else {
                    false
                }
            }),
        }
    }
}
