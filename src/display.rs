//! Display targets and the board that binds them to status fields.
//!
//! The board is an explicit field-name to target mapping supplied at
//! construction; the poller never looks targets up anywhere else.
//!
//! ```text
//! StatusDocument            DisplayBoard
//! ┌──────────────┐          ┌─────────────────────────────┐
//! │ hostname ────┼────────▶ │ "hostname"  → Label         │
//! │ wifi_ssid ───┼────────▶ │ "wifi_ssid" → InputField    │
//! │ extra        │  (skip)  │ "battery"   → Label         │ (not updated)
//! └──────────────┘          └─────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::status::StatusDocument;
use crate::traits::{DisplayTarget, TargetKind};

/// Placeholder shown by labels that have not received a value yet.
pub const PLACEHOLDER: &str = "—";

/// Shared cell behind the target handles.
#[derive(Debug, Default)]
struct Cell(RwLock<String>);

impl Cell {
    fn new(value: &str) -> Self {
        Self(RwLock::new(value.to_string()))
    }

    fn read(&self) -> RwLockReadGuard<'_, String> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, String> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read-only text whose content is replaced on every poll.
///
/// Cloning yields another handle to the same content.
#[derive(Debug, Clone)]
pub struct Label {
    cell: Arc<Cell>,
}

impl Label {
    /// Create a label showing [`PLACEHOLDER`].
    pub fn new() -> Self {
        Self::with_text(PLACEHOLDER)
    }

    /// Create a label with initial content.
    pub fn with_text(text: &str) -> Self {
        Self {
            cell: Arc::new(Cell::new(text)),
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayTarget for Label {
    fn kind(&self) -> TargetKind {
        TargetKind::Label
    }

    fn value(&self) -> String {
        self.cell.read().clone()
    }

    fn update(&self, edit: &mut dyn FnMut(&mut String) -> bool) -> bool {
        edit(&mut *self.cell.write())
    }
}

/// Editable field seeded from the first non-empty status value.
///
/// Once it holds text, from a poll or from the user, polls leave it alone.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    cell: Arc<Cell>,
}

impl InputField {
    /// Create an empty input field.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayTarget for InputField {
    fn kind(&self) -> TargetKind {
        TargetKind::Input
    }

    fn value(&self) -> String {
        self.cell.read().clone()
    }

    fn update(&self, edit: &mut dyn FnMut(&mut String) -> bool) -> bool {
        edit(&mut *self.cell.write())
    }
}

/// One field-name to target binding.
#[derive(Clone)]
pub struct Binding {
    /// Status field this target listens to.
    pub field: String,
    /// Human-readable caption.
    pub title: String,
    /// The target handle.
    pub target: Arc<dyn DisplayTarget>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("kind", &self.target.kind())
            .field("value", &self.target.value())
            .finish()
    }
}

/// What one application of a status document did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Targets whose content was written.
    pub written: usize,
    /// Input targets left alone because they already held a value.
    pub kept: usize,
    /// Document keys with no bound target.
    pub unmatched: Vec<String>,
}

/// Ordered set of display targets keyed by status field name.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    bindings: Vec<Binding>,
    index: HashMap<String, usize>,
}

impl DisplayBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `target` to `field`, captioned with the field name.
    pub fn bind(self, field: &str, target: Arc<dyn DisplayTarget>) -> Self {
        self.bind_titled(field, field, target)
    }

    /// Bind `target` to `field` with a caption.
    ///
    /// Rebinding a field replaces the earlier target in place.
    pub fn bind_titled(mut self, field: &str, title: &str, target: Arc<dyn DisplayTarget>) -> Self {
        let binding = Binding {
            field: field.to_string(),
            title: title.to_string(),
            target,
        };
        match self.index.get(field).copied() {
            Some(i) => self.bindings[i] = binding,
            None => {
                self.index.insert(field.to_string(), self.bindings.len());
                self.bindings.push(binding);
            }
        }
        self
    }

    /// The board for a BirdEdge microphone unit.
    ///
    /// `wifi_ssid` and `wifi_pass` are input fields feeding the WiFi form;
    /// everything else is a label.
    pub fn birdedge() -> Self {
        let labels = [
            ("hostname", "Hostname"),
            ("ip", "IP address"),
            ("ping", "Gateway ping (ms)"),
            ("uptime", "Uptime (s)"),
            ("wifi_rssi", "WiFi RSSI (dBm)"),
            ("heap", "Free heap (bytes)"),
            ("streaming", "Streaming"),
            ("battery", "Battery (V)"),
        ];

        let mut board = Self::new();
        for (field, title) in labels {
            board = board.bind_titled(field, title, Arc::new(Label::new()));
        }
        board
            .bind_titled("wifi_ssid", "SSID", Arc::new(InputField::new()))
            .bind_titled("wifi_pass", "Password", Arc::new(InputField::new()))
    }

    /// Look up the target bound to `field`.
    pub fn target(&self, field: &str) -> Option<&Arc<dyn DisplayTarget>> {
        self.index.get(field).map(|&i| &self.bindings[i].target)
    }

    /// Current content of the target bound to `field`.
    pub fn value(&self, field: &str) -> Option<String> {
        self.target(field).map(|t| t.value())
    }

    /// All bindings in insertion order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Bindings of one kind, in insertion order.
    pub fn bindings_of(&self, kind: TargetKind) -> impl Iterator<Item = &Binding> + '_ {
        self.bindings.iter().filter(move |b| b.target.kind() == kind)
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no fields are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Write a status document into the bound targets.
    ///
    /// Keys without a target are skipped; targets without a key are not
    /// touched.
    pub fn apply(&self, document: &StatusDocument) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (key, value) in document.iter() {
            match self.target(key) {
                Some(target) => {
                    if target.apply(&value) {
                        report.written += 1;
                    } else {
                        report.kept += 1;
                    }
                }
                None => report.unmatched.push(key.to_string()),
            }
        }

        report
    }

    /// Current content of every target, keyed by field.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.bindings
            .iter()
            .map(|b| (b.field.clone(), b.target.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> StatusDocument {
        StatusDocument::parse(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_label_replaced_every_time() {
        let label = Label::new();
        assert_eq!(label.value(), PLACEHOLDER);

        assert!(label.apply("21.5"));
        assert_eq!(label.value(), "21.5");

        assert!(label.apply("22.0"));
        assert_eq!(label.value(), "22.0");
    }

    #[test]
    fn test_input_first_write_wins() {
        let input = InputField::new();

        assert!(input.apply("18"));
        assert_eq!(input.value(), "18");

        assert!(!input.apply("20"));
        assert_eq!(input.value(), "18");
    }

    fn type_char(target: &dyn DisplayTarget, c: char) {
        target.update(&mut |value| {
            value.push(c);
            true
        });
    }

    #[test]
    fn test_input_user_edit_survives() {
        let input = InputField::new();
        type_char(&input, 'M');
        type_char(&input, 'y');

        assert!(!input.apply("BirdEdge"));
        assert_eq!(input.value(), "My");

        input.set_value("");
        assert!(input.apply("BirdEdge"));
        assert_eq!(input.value(), "BirdEdge");
    }

    #[test]
    fn test_input_clear_allows_reseed() {
        let input = InputField::new();
        input.apply("a");
        input.set_value("");
        assert!(input.apply("b"));
        assert_eq!(input.value(), "b");
    }

    /// Input whose plain reads are slow, widening any gap between a read
    /// and a later write.
    struct SlowReadInput(InputField);

    impl DisplayTarget for SlowReadInput {
        fn kind(&self) -> TargetKind {
            TargetKind::Input
        }

        fn value(&self) -> String {
            std::thread::sleep(std::time::Duration::from_millis(40));
            self.0.value()
        }

        fn update(&self, edit: &mut dyn FnMut(&mut String) -> bool) -> bool {
            self.0.update(edit)
        }
    }

    #[test]
    fn test_seeding_never_drops_concurrent_typing() {
        let input = Arc::new(SlowReadInput(InputField::new()));

        let seeder = {
            let input = Arc::clone(&input);
            std::thread::spawn(move || input.apply("POLL"))
        };
        std::thread::sleep(std::time::Duration::from_millis(10));
        type_char(input.as_ref(), 'u');
        let written = seeder.join().unwrap();

        let value = input.0.value();
        assert!(value.contains('u'), "typed text lost: {:?}", value);
        if written {
            assert_eq!(value, "POLLu");
        } else {
            assert_eq!(value, "u");
        }
    }

    #[test]
    fn test_label_clone_shares_content() {
        let label = Label::new();
        let handle = label.clone();
        label.set_value("x");
        assert_eq!(handle.value(), "x");
    }

    #[test]
    fn test_board_apply_skips_unmatched_keys() {
        let temperature = Arc::new(Label::new());
        let board = DisplayBoard::new().bind("temperature", temperature.clone());

        let report = board.apply(&doc(r#"{"temperature": "21.5", "extra": 1}"#));

        assert_eq!(temperature.value(), "21.5");
        assert_eq!(report.written, 1);
        assert_eq!(report.unmatched, vec!["extra".to_string()]);
    }

    #[test]
    fn test_board_apply_leaves_missing_fields() {
        let a = Arc::new(Label::with_text("old"));
        let b = Arc::new(Label::new());
        let board = DisplayBoard::new().bind("a", a.clone()).bind("b", b.clone());

        board.apply(&doc(r#"{"b": true}"#));

        assert_eq!(a.value(), "old");
        assert_eq!(b.value(), "true");
    }

    #[test]
    fn test_board_reports_kept_inputs() {
        let board = DisplayBoard::birdedge();
        board.apply(&doc(r#"{"wifi_ssid": "BirdEdge"}"#));
        let report = board.apply(&doc(r#"{"wifi_ssid": "Other"}"#));

        assert_eq!(report.kept, 1);
        assert_eq!(report.written, 0);
        assert_eq!(board.value("wifi_ssid").as_deref(), Some("BirdEdge"));
    }

    #[test]
    fn test_rebind_replaces_target() {
        let first = Arc::new(Label::with_text("first"));
        let second = Arc::new(Label::with_text("second"));
        let board = DisplayBoard::new()
            .bind("ip", first)
            .bind_titled("ip", "IP", second);

        assert_eq!(board.len(), 1);
        assert_eq!(board.bindings()[0].title, "IP");
        assert_eq!(board.value("ip").as_deref(), Some("second"));
    }

    #[test]
    fn test_birdedge_board_layout() {
        let board = DisplayBoard::birdedge();
        assert_eq!(board.len(), 10);

        let inputs: Vec<_> = board
            .bindings_of(TargetKind::Input)
            .map(|b| b.field.as_str())
            .collect();
        assert_eq!(inputs, vec!["wifi_ssid", "wifi_pass"]);

        for field in crate::status::KNOWN_FIELDS {
            assert!(board.target(field).is_some(), "{} should be bound", field);
        }
    }

    #[test]
    fn test_snapshot() {
        let board = DisplayBoard::new().bind("ip", Arc::new(Label::with_text("10.0.0.12")));
        let snapshot = board.snapshot();
        assert_eq!(snapshot.get("ip").map(String::as_str), Some("10.0.0.12"));
    }
}
