//! The calculator session and its transition function.

use crate::config::Config;
use crate::core::{normalize_to, Entry, Mode, NumberFormat, Operator, State, Tape, TapeEntry};
use crate::session::action::Action;
use crate::session::render::Render;

/// Result of dispatching a single action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or was rewritten to the same value)
    Applied,

    /// Precondition not met; nothing changed
    Ignored,

    /// A computation failed and the entry now holds the error text
    Failed,
}

/// A single calculator session.
///
/// Owns the entry buffer, the pending operation, the memory register and
/// the tape. Every input goes through [`Session::dispatch`].
///
/// # Example
///
/// ```rust
/// use tapecalc::{Action, Operator, Session};
///
/// let mut session = Session::new();
/// session.dispatch(Action::Digit(1));
/// session.dispatch(Action::Operator(Operator::Add));
/// session.dispatch(Action::Digit(2));
/// session.dispatch(Action::Equals);
///
/// let render = session.render();
/// assert_eq!(render.display_text, "3");
/// assert_eq!(render.tape_entries, vec!["1 + 2 = 3"]);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: Config,
    current: Entry,
    previous: Option<Entry>,
    operator: Option<Operator>,
    overwrite: bool,
    memory: f64,
    tape: Tape,
    tape_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a session with an already validated configuration.
    pub(crate) fn with_config(config: Config) -> Self {
        Self {
            config,
            current: Entry::zero(),
            previous: None,
            operator: None,
            overwrite: false,
            memory: 0.0,
            tape: Tape::new(),
            tape_visible: false,
        }
    }

    pub(crate) fn set_memory(&mut self, value: f64) {
        self.memory = value;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current(&self) -> &Entry {
        &self.current
    }

    pub fn previous(&self) -> Option<&Entry> {
        self.previous.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_visible(&self) -> bool {
        self.tape_visible
    }

    /// Summarise the session fields into a [`Mode`] (pure)
    pub fn mode(&self) -> Mode {
        Mode::classify(
            self.current.is_error(),
            self.operator.is_some(),
            self.overwrite,
        )
    }

    /// Apply one input action.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let before = self.mode();
        let outcome = match action {
            Action::Digit(d) => self.input_digit(d),
            Action::Dot => self.input_dot(),
            Action::ClearEntry => self.clear_entry(),
            Action::Operator(op) => self.set_operator(op),
            Action::Equals => self.equals(),
            Action::Clear => self.clear_all(),
            Action::Sign => self.toggle_sign(),
            Action::Percent => self.percent(),
            Action::Backspace => self.backspace(),
            Action::Sqrt => self.sqrt(),
            Action::Square => self.square(),
            Action::MemoryClear => self.memory_clear(),
            Action::MemoryRecall => self.memory_recall(),
            Action::MemoryAdd => self.memory_add(),
            Action::MemorySubtract => self.memory_subtract(),
            Action::TapeClear => self.tape_clear(),
            Action::ToggleTapeVisible => self.toggle_tape_visible(),
        };

        tracing::debug!(
            action = action.name(),
            from = before.name(),
            to = self.mode().name(),
            ?outcome,
            "Action dispatched"
        );
        outcome
    }

    /// Text for the main display.
    pub fn display_text(&self) -> String {
        let format = self.number_format();
        match self.current.value() {
            v if v.is_nan() => self.config.error_text.clone(),
            v => format.clamp_length(&format.format(v)),
        }
    }

    /// `"<previous> <operator>"` while an operation is pending, else empty.
    pub fn history_text(&self) -> String {
        match (&self.previous, self.operator) {
            (Some(previous), Some(op)) => format!("{} {}", self.describe(previous.value()), op),
            _ => String::new(),
        }
    }

    /// Derive the full render from the current state (pure)
    pub fn render(&self) -> Render {
        Render {
            display_text: self.display_text(),
            history_text: self.history_text(),
            tape_entries: self.tape.texts(),
            tape_visible: self.tape_visible,
        }
    }

    pub fn input_digit(&mut self, d: u8) -> Outcome {
        let Some(c) = char::from_digit(u32::from(d), 10) else {
            tracing::debug!(digit = d, "Not a decimal digit");
            return Outcome::Ignored;
        };

        if self.overwrite || !self.current_is_number() {
            self.current = Entry::from_text(c.to_string());
            self.overwrite = false;
        } else if self.current.is_zero_text() {
            self.current = Entry::from_text(c.to_string());
        } else if self.current.digit_len() < self.config.max_digits {
            self.current.push(c);
        } else {
            tracing::debug!(max_digits = self.config.max_digits, "Entry at digit limit");
            return Outcome::Ignored;
        }
        Outcome::Applied
    }

    pub fn input_dot(&mut self) -> Outcome {
        if self.overwrite || !self.current_is_number() {
            self.current = Entry::from_text("0.");
            self.overwrite = false;
        } else if !self.current.has_dot() && !self.current.is_exponent() {
            self.current.push('.');
        } else {
            return Outcome::Ignored;
        }
        Outcome::Applied
    }

    /// Set the pending operator, resolving an existing chain first.
    ///
    /// A chain is resolved only when an operator is pending, a left operand
    /// is held and a right operand has been typed since. Otherwise the entry
    /// becomes the left operand.
    pub fn set_operator(&mut self, op: Operator) -> Outcome {
        let mut outcome = Outcome::Applied;

        match (self.operator, self.previous.take(), self.overwrite) {
            (Some(pending), Some(previous), false) => {
                let (a, b) = (previous.value(), self.current.value());
                let result = pending.apply_with(a, b, self.config.significant_digits);
                if result.is_nan() {
                    tracing::debug!(operator = %pending, a, b, "Chained operation failed");
                    self.current = self.error_entry();
                    outcome = Outcome::Failed;
                } else {
                    self.record_binary(a, pending, b, result);
                    self.current = Entry::from_value(result);
                    self.previous = Some(self.current.clone());
                }
            }
            _ => {
                self.previous = Some(self.current.clone());
            }
        }

        self.operator = Some(op);
        self.overwrite = true;
        outcome
    }

    pub fn equals(&mut self) -> Outcome {
        let (Some(op), Some(previous)) = (self.operator, self.previous.as_ref()) else {
            tracing::debug!("Equals with no pending operation");
            return Outcome::Ignored;
        };

        let (a, b) = (previous.value(), self.current.value());
        let result = op.apply_with(a, b, self.config.significant_digits);
        let outcome = if result.is_nan() {
            tracing::debug!(operator = %op, a, b, "Operation failed");
            self.current = self.error_entry();
            Outcome::Failed
        } else {
            self.record_binary(a, op, b, result);
            self.current = Entry::from_value(result);
            Outcome::Applied
        };

        self.previous = None;
        self.operator = None;
        self.overwrite = true;
        outcome
    }

    /// Reset entry and pending operation; memory and tape survive.
    pub fn clear_all(&mut self) -> Outcome {
        self.current = Entry::zero();
        self.previous = None;
        self.operator = None;
        self.overwrite = false;
        Outcome::Applied
    }

    pub fn clear_entry(&mut self) -> Outcome {
        self.current = Entry::zero();
        self.overwrite = false;
        Outcome::Applied
    }

    pub fn toggle_sign(&mut self) -> Outcome {
        if self.current.is_zero_text() || self.current.is_error() {
            return Outcome::Ignored;
        }
        self.current.toggle_sign();
        Outcome::Applied
    }

    pub fn percent(&mut self) -> Outcome {
        let value = self.normalize(self.current.value() / 100.0);
        self.store(value)
    }

    pub fn backspace(&mut self) -> Outcome {
        if self.overwrite {
            tracing::debug!("Backspace ignored in overwrite mode");
            return Outcome::Ignored;
        }

        let len = self.current.char_len();
        if !self.current_is_number() || len <= 1 || (len == 2 && self.current.is_negative()) {
            self.current = Entry::zero();
            return Outcome::Applied;
        }

        // Exponent text can pass through unparsable forms like "1e-".
        self.current.pop();
        while self.current.is_error() && self.current.char_len() > 1 {
            self.current.pop();
        }
        if self.current.is_error() {
            self.current = Entry::zero();
        }
        Outcome::Applied
    }

    pub fn sqrt(&mut self) -> Outcome {
        let value = self.current.value();
        self.overwrite = true;
        if value < 0.0 {
            tracing::debug!(value, "Square root of a negative number");
            self.current = self.error_entry();
            return Outcome::Failed;
        }

        let result = normalize_to(
            self.normalize(value.sqrt()),
            self.config.sqrt_significant_digits,
        );
        if !result.is_nan() {
            let text = format!("√({}) = {}", self.describe(value), self.describe(result));
            self.tape.record(TapeEntry::new(text));
        }
        self.store(result)
    }

    pub fn square(&mut self) -> Outcome {
        let value = self.current.value();
        self.overwrite = true;

        let result = self.normalize(value * value);
        if !result.is_nan() {
            let text = format!("({})² = {}", self.describe(value), self.describe(result));
            self.tape.record(TapeEntry::new(text));
        }
        self.store(result)
    }

    pub fn memory_clear(&mut self) -> Outcome {
        self.memory = 0.0;
        Outcome::Applied
    }

    pub fn memory_recall(&mut self) -> Outcome {
        self.overwrite = true;
        self.store(self.memory)
    }

    pub fn memory_add(&mut self) -> Outcome {
        self.memory = self.normalize(self.memory + self.current.value());
        Outcome::Applied
    }

    pub fn memory_subtract(&mut self) -> Outcome {
        self.memory = self.normalize(self.memory - self.current.value());
        Outcome::Applied
    }

    pub fn tape_clear(&mut self) -> Outcome {
        self.tape.clear();
        Outcome::Applied
    }

    pub fn toggle_tape_visible(&mut self) -> Outcome {
        self.tape_visible = !self.tape_visible;
        Outcome::Applied
    }

    fn number_format(&self) -> NumberFormat {
        self.config.number_format()
    }

    fn normalize(&self, value: f64) -> f64 {
        normalize_to(value, self.config.significant_digits)
    }

    fn current_is_number(&self) -> bool {
        self.current.value().is_finite()
    }

    fn error_entry(&self) -> Entry {
        Entry::from_text(self.config.error_text.clone())
    }

    /// Store a computed value in the entry, the error text if NaN.
    fn store(&mut self, value: f64) -> Outcome {
        if value.is_nan() {
            self.current = self.error_entry();
            Outcome::Failed
        } else {
            self.current = Entry::from_value(value);
            Outcome::Applied
        }
    }

    /// Format a value for history and tape text.
    fn describe(&self, value: f64) -> String {
        if value.is_nan() {
            self.config.error_text.clone()
        } else {
            self.number_format().format(value)
        }
    }

    fn record_binary(&mut self, a: f64, op: Operator, b: f64, result: f64) {
        let text = format!(
            "{} {} {} = {}",
            self.describe(a),
            op,
            self.describe(b),
            self.describe(result)
        );
        self.tape.record(TapeEntry::new(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ERROR_TEXT;

    fn run(session: &mut Session, keys: &str) {
        for key in keys.split_whitespace() {
            let action = Action::from_key(key).unwrap();
            session.dispatch(action);
        }
    }

    #[test]
    fn new_session_shows_zero() {
        let session = Session::new();
        assert_eq!(session.current().as_str(), "0");
        assert_eq!(session.previous(), None);
        assert_eq!(session.operator(), None);
        assert!(!session.overwrite());
        assert_eq!(session.mode(), Mode::Entering);
        assert_eq!(session.display_text(), "0");
    }

    #[test]
    fn digits_replace_leading_zero_and_append() {
        let mut session = Session::new();
        run(&mut session, "0 0 4 2");
        assert_eq!(session.current().as_str(), "42");
    }

    #[test]
    fn digits_stop_at_limit() {
        let mut session = Session::new();
        for _ in 0..14 {
            assert_eq!(session.dispatch(Action::Digit(1)), Outcome::Applied);
        }
        assert_eq!(session.dispatch(Action::Digit(1)), Outcome::Ignored);
        assert_eq!(session.current().as_str(), "11111111111111");
    }

    #[test]
    fn digit_limit_ignores_sign_and_dot() {
        let mut session = Session::new();
        run(&mut session, "1 . 2 3 4 5 6 7 8 9 0 1 2 3 4");
        session.dispatch(Action::Sign);
        assert_eq!(session.current().digit_len(), 14);
        assert_eq!(session.dispatch(Action::Digit(9)), Outcome::Ignored);
        assert_eq!(session.current().as_str(), "-1.2345678901234");
    }

    #[test]
    fn invalid_digit_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.dispatch(Action::Digit(12)), Outcome::Ignored);
        assert_eq!(session.current().as_str(), "0");
    }

    #[test]
    fn dot_is_added_once() {
        let mut session = Session::new();
        run(&mut session, "3 . . 5");
        assert_eq!(session.current().as_str(), "3.5");
    }

    #[test]
    fn dot_after_operator_starts_fraction() {
        let mut session = Session::new();
        run(&mut session, "3 + .");
        assert_eq!(session.current().as_str(), "0.");
        assert!(!session.overwrite());
        assert_eq!(session.display_text(), "0");
    }

    #[test]
    fn first_operator_captures_entry() {
        let mut session = Session::new();
        run(&mut session, "5 +");
        assert_eq!(session.previous().map(Entry::as_str), Some("5"));
        assert_eq!(session.operator(), Some(Operator::Add));
        assert!(session.overwrite());
        assert_eq!(session.mode(), Mode::AwaitingOperand);
        assert_eq!(session.history_text(), "5 +");
    }

    #[test]
    fn chained_operator_resolves_pending_operation() {
        let mut session = Session::new();
        run(&mut session, "1 + 2 *");
        assert_eq!(session.current().as_str(), "3");
        assert_eq!(session.previous().map(Entry::as_str), Some("3"));
        assert_eq!(session.operator(), Some(Operator::Multiply));
        assert_eq!(session.tape().texts(), vec!["1 + 2 = 3"]);

        run(&mut session, "4 =");
        assert_eq!(session.display_text(), "12");
        assert_eq!(session.tape().texts(), vec!["1 + 2 = 3", "3 * 4 = 12"]);
    }

    #[test]
    fn repeated_operator_does_not_resolve() {
        let mut session = Session::new();
        run(&mut session, "5 + + 2 =");
        assert_eq!(session.display_text(), "7");
        assert_eq!(session.tape().texts(), vec!["5 + 2 = 7"]);
    }

    #[test]
    fn operator_replaces_pending_operator_in_overwrite() {
        let mut session = Session::new();
        run(&mut session, "8 + - 3 =");
        assert_eq!(session.display_text(), "5");
    }

    #[test]
    fn chained_failure_clears_previous() {
        let mut session = Session::new();
        run(&mut session, "5 / 0 +");
        assert_eq!(session.current().as_str(), ERROR_TEXT);
        assert_eq!(session.previous(), None);
        assert_eq!(session.operator(), Some(Operator::Add));
        assert_eq!(session.mode(), Mode::Error);
        assert!(session.tape().is_empty());
        assert_eq!(session.history_text(), "");
        assert_eq!(session.dispatch(Action::Equals), Outcome::Ignored);
    }

    #[test]
    fn equals_without_pending_operation_is_ignored() {
        let mut session = Session::new();
        run(&mut session, "7");
        assert_eq!(session.dispatch(Action::Equals), Outcome::Ignored);
        assert_eq!(session.current().as_str(), "7");
        assert!(!session.overwrite());
    }

    #[test]
    fn equals_right_after_operator_reuses_entry() {
        let mut session = Session::new();
        run(&mut session, "5 + =");
        assert_eq!(session.display_text(), "10");
    }

    #[test]
    fn division_by_zero_shows_error_text() {
        let mut session = Session::new();
        run(&mut session, "5 0 / 0");
        assert_eq!(session.dispatch(Action::Equals), Outcome::Failed);
        assert_eq!(session.display_text(), ERROR_TEXT);
        assert!(session.tape().is_empty());
        assert!(session.overwrite());
    }

    #[test]
    fn error_propagates_until_new_entry() {
        let mut session = Session::new();
        run(&mut session, "1 / 0 = + 2 =");
        assert_eq!(session.display_text(), ERROR_TEXT);
        assert!(session.tape().is_empty());

        run(&mut session, "4");
        assert_eq!(session.display_text(), "4");
    }

    #[test]
    fn clear_all_keeps_memory_and_tape() {
        let mut session = Session::new();
        run(&mut session, "2 + 3 = +");
        session.dispatch(Action::MemoryAdd);
        run(&mut session, "9 Escape");

        assert_eq!(session.current().as_str(), "0");
        assert_eq!(session.previous(), None);
        assert_eq!(session.operator(), None);
        assert!(!session.overwrite());
        assert_eq!(session.memory(), 5.0);
        assert_eq!(session.tape().len(), 1);
    }

    #[test]
    fn clear_entry_keeps_pending_operation() {
        let mut session = Session::new();
        run(&mut session, "6 * 7");
        session.dispatch(Action::ClearEntry);
        assert_eq!(session.current().as_str(), "0");
        assert_eq!(session.operator(), Some(Operator::Multiply));
        run(&mut session, "2 =");
        assert_eq!(session.display_text(), "12");
    }

    #[test]
    fn toggle_sign_skips_zero() {
        let mut session = Session::new();
        assert_eq!(session.dispatch(Action::Sign), Outcome::Ignored);
        run(&mut session, "4");
        session.dispatch(Action::Sign);
        assert_eq!(session.current().as_str(), "-4");
        session.dispatch(Action::Sign);
        assert_eq!(session.current().as_str(), "4");
    }

    #[test]
    fn toggle_sign_leaves_error_alone() {
        let mut session = Session::new();
        run(&mut session, "1 / 0 =");
        assert_eq!(session.dispatch(Action::Sign), Outcome::Ignored);
        assert_eq!(session.current().as_str(), ERROR_TEXT);
    }

    #[test]
    fn percent_divides_by_hundred() {
        let mut session = Session::new();
        run(&mut session, "5 %");
        assert_eq!(session.current().as_str(), "0.05");
        assert!(!session.overwrite());
        run(&mut session, "3");
        assert_eq!(session.current().as_str(), "0.053");
    }

    #[test]
    fn backspace_drops_last_character() {
        let mut session = Session::new();
        run(&mut session, "1 2 3 Backspace");
        assert_eq!(session.current().as_str(), "12");
        run(&mut session, "Backspace Backspace");
        assert_eq!(session.current().as_str(), "0");
    }

    #[test]
    fn backspace_resets_negative_single_digit() {
        let mut session = Session::new();
        run(&mut session, "7");
        session.dispatch(Action::Sign);
        session.dispatch(Action::Backspace);
        assert_eq!(session.current().as_str(), "0");
    }

    #[test]
    fn backspace_skips_unparsable_exponent_text() {
        let mut session = Session::new();
        run(&mut session, "0 . 0 0 0 0 0 0 0 0 0 0 0 0 1 %");
        assert_eq!(session.current().as_str(), "1e-15");
        assert!(!session.overwrite());

        assert_eq!(session.dispatch(Action::Dot), Outcome::Ignored);
        session.dispatch(Action::Backspace);
        assert_eq!(session.current().as_str(), "1e-1");
        session.dispatch(Action::Backspace);
        assert_eq!(session.current().as_str(), "1");
    }

    #[test]
    fn backspace_ignored_in_overwrite() {
        let mut session = Session::new();
        run(&mut session, "1 2 +");
        assert_eq!(session.dispatch(Action::Backspace), Outcome::Ignored);
        assert_eq!(session.current().as_str(), "12");
    }

    #[test]
    fn sqrt_records_tape_and_sets_overwrite() {
        let mut session = Session::new();
        run(&mut session, "2 r");
        assert_eq!(session.display_text(), "1.414214");
        assert_eq!(session.tape().texts(), vec!["√(2) = 1.414214"]);
        assert!(session.overwrite());
        assert_eq!(session.mode(), Mode::Showing);
    }

    #[test]
    fn sqrt_of_negative_fails() {
        let mut session = Session::new();
        run(&mut session, "9");
        session.dispatch(Action::Sign);
        assert_eq!(session.dispatch(Action::Sqrt), Outcome::Failed);
        assert_eq!(session.display_text(), ERROR_TEXT);
        assert!(session.overwrite());
        assert!(session.tape().is_empty());
    }

    #[test]
    fn unary_of_error_is_not_taped() {
        let mut session = Session::new();
        run(&mut session, "1 / 0 =");
        assert_eq!(session.dispatch(Action::Square), Outcome::Failed);
        assert_eq!(session.dispatch(Action::Sqrt), Outcome::Failed);
        assert!(session.tape().is_empty());
    }

    #[test]
    fn square_records_tape() {
        let mut session = Session::new();
        run(&mut session, "1 . 5 s");
        assert_eq!(session.display_text(), "2.25");
        assert_eq!(session.tape().texts(), vec!["(1.5)² = 2.25"]);
        assert!(session.overwrite());
    }

    #[test]
    fn square_keeps_small_results() {
        let mut session = Session::new();
        run(&mut session, "0 . 0 0 0 1 s");
        assert_eq!(session.display_text(), "0.00000001");
        assert_eq!(session.tape().texts(), vec!["(0.0001)² = 0.00000001"]);
    }

    #[test]
    fn sqrt_keeps_small_results() {
        let mut session = Session::new();
        run(&mut session, "0 . 0 0 0 0 0 0 0 0 0 0 0 0 1 r");
        assert_eq!(session.display_text(), "0.000000316228");
        assert_eq!(
            session.tape().texts(),
            vec!["√(1.000000e-13) = 0.000000316228"]
        );
    }

    #[test]
    fn memory_register_accumulates() {
        let mut session = Session::new();
        run(&mut session, "5");
        session.dispatch(Action::MemoryAdd);
        session.dispatch(Action::MemoryAdd);
        run(&mut session, "Escape 3");
        session.dispatch(Action::MemorySubtract);
        assert_eq!(session.memory(), 7.0);

        session.dispatch(Action::MemoryRecall);
        assert_eq!(session.display_text(), "7");
        assert!(session.overwrite());
    }

    #[test]
    fn memory_clear_then_recall_shows_zero() {
        let mut session = Session::new();
        run(&mut session, "5");
        session.dispatch(Action::MemoryAdd);
        session.dispatch(Action::MemoryClear);
        session.dispatch(Action::MemoryRecall);
        assert_eq!(session.display_text(), "0");
    }

    #[test]
    fn tape_clear_and_visibility() {
        let mut session = Session::new();
        run(&mut session, "1 + 1 =");
        assert!(!session.tape_visible());
        session.dispatch(Action::ToggleTapeVisible);
        assert!(session.render().tape_visible);
        session.dispatch(Action::TapeClear);
        assert!(session.render().tape_entries.is_empty());
        assert_eq!(session.display_text(), "2");
    }

    #[test]
    fn large_results_collapse_on_display() {
        let mut session = Session::new();
        run(&mut session, "9 9 9 9 9 9 9 * 9 9 9 9 9 9 9 =");
        assert_eq!(session.display_text(), "9.999998e13");
    }

    #[test]
    fn custom_error_text_is_used() {
        let mut session = Session::with_config(Config {
            error_text: "Error".to_string(),
            ..Config::default()
        });
        run(&mut session, "1 / 0 =");
        assert_eq!(session.display_text(), "Error");
        assert_eq!(session.mode(), Mode::Error);
    }
}
