//! Vocabulary quiz game

use rand::Rng;
use serde::Serialize;

/// Fixed English to French vocabulary the quiz draws from
const VOCABULARY: &[(&str, &str)] = &[
    ("hello", "bonjour"),
    ("goodbye", "au revoir"),
    ("thank you", "merci"),
    ("please", "s'il vous plaît"),
    ("yes", "oui"),
    ("no", "non"),
    ("cat", "chat"),
    ("dog", "chien"),
    ("house", "maison"),
    ("water", "eau"),
    ("bread", "pain"),
    ("cheese", "fromage"),
    ("friend", "ami"),
    ("book", "livre"),
    ("school", "école"),
];

/// Outcome of checking one answer
#[derive(Debug, Clone, Serialize)]
pub struct QuizVerdict {
    /// Whether the submitted answer matched
    pub correct: bool,
    /// The expected translation, revealed so a wrong answer can be shown
    pub expected: &'static str,
}

/// Two-phase word-guessing game state: Check, then Next
///
/// Holds the current target word, the last submitted answer and a checked
/// flag. One instance per session; never shared across sessions.
#[derive(Debug, Clone)]
pub struct VocabQuiz {
    word_index: usize,
    last_answer: String,
    checked: bool,
}

impl VocabQuiz {
    /// Start a quiz on a randomly drawn word
    pub fn new() -> Self {
        Self::with_index(rand::rng().random_range(0..VOCABULARY.len()))
    }

    /// Start on a fixed word; deterministic entry point for tests
    pub(crate) fn with_index(word_index: usize) -> Self {
        Self {
            word_index: word_index % VOCABULARY.len(),
            last_answer: String::new(),
            checked: false,
        }
    }

    /// The English word currently being asked
    pub fn word(&self) -> &'static str {
        VOCABULARY[self.word_index].0
    }

    /// The expected French translation of the current word
    pub fn expected(&self) -> &'static str {
        VOCABULARY[self.word_index].1
    }

    /// Whether the current word has been checked already
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Echo of the last submitted answer
    pub fn last_answer(&self) -> &str {
        &self.last_answer
    }

    /// Check an answer against the current word
    ///
    /// Matching is exact after trimming and case folding, so "Bonjour " is
    /// accepted for "bonjour" while "bonjou" is not.
    pub fn check(&mut self, answer: &str) -> QuizVerdict {
        self.last_answer = answer.to_string();
        self.checked = true;

        let correct = answer.trim().to_lowercase() == self.expected().to_lowercase();
        QuizVerdict {
            correct,
            expected: self.expected(),
        }
    }

    /// Cycle to a new random word, resetting the checked flag and echo
    pub fn next(&mut self) -> &'static str {
        let mut rng = rand::rng();
        let mut index = rng.random_range(0..VOCABULARY.len());
        while VOCABULARY.len() > 1 && index == self.word_index {
            index = rng.random_range(0..VOCABULARY.len());
        }

        self.word_index = index;
        self.last_answer.clear();
        self.checked = false;
        self.word()
    }
}

impl Default for VocabQuiz {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive_match() {
        let mut quiz = VocabQuiz::with_index(0);
        assert_eq!(quiz.word(), "hello");

        let verdict = quiz.check("  Bonjour ");
        assert!(verdict.correct);
        assert!(quiz.checked());
        assert_eq!(quiz.last_answer(), "  Bonjour ");
    }

    #[test]
    fn test_near_miss_is_rejected_and_answer_revealed() {
        let mut quiz = VocabQuiz::with_index(0);

        let verdict = quiz.check("bonjou");
        assert!(!verdict.correct);
        assert_eq!(verdict.expected, "bonjour");
        assert!(quiz.checked());
    }

    #[test]
    fn test_next_resets_state_and_changes_word() {
        let mut quiz = VocabQuiz::with_index(0);
        quiz.check("bonjou");

        let previous = quiz.word();
        let drawn = quiz.next();

        assert_ne!(drawn, previous);
        assert!(!quiz.checked());
        assert_eq!(quiz.last_answer(), "");
    }

    #[test]
    fn test_vocabulary_size_and_uniqueness() {
        assert_eq!(VOCABULARY.len(), 15);

        let mut words: Vec<&str> = VOCABULARY.iter().map(|(en, _)| *en).collect();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), VOCABULARY.len());
    }
}
