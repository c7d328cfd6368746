use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One completed question/answer turn.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub query: String,
    pub reply: String,
}

/// Bounded per-caller conversation history.
///
/// Keyed by caller profile so one caller's turns never leak into another's
/// transcript; each caller keeps only the most recent `window` exchanges.
pub struct ConversationMemory {
    window: usize,
    entries: Mutex<HashMap<String, VecDeque<Exchange>>>,
}

/// Exchanges retained per caller, matching the original sliding window.
pub const DEFAULT_WINDOW: usize = 6;

impl ConversationMemory {
    pub fn new(window: usize) -> Self {
        ConversationMemory {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn history(&self, profile: &str) -> Vec<Exchange> {
        self.entries
            .lock()
            .expect("memory lock poisoned")
            .get(profile)
            .map(|turns| turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn record(&self, profile: &str, query: &str, reply: &str) {
        let mut entries = self.entries.lock().expect("memory lock poisoned");
        let turns = entries.entry(profile.to_string()).or_default();
        turns.push_back(Exchange {
            query: query.to_string(),
            reply: reply.to_string(),
        });
        while turns.len() > self.window {
            turns.pop_front();
        }
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        ConversationMemory::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_for_unknown_caller() {
        let memory = ConversationMemory::default();
        assert!(memory.history("a@b.com").is_empty());
    }

    #[test]
    fn records_in_order() {
        let memory = ConversationMemory::default();
        memory.record("a@b.com", "q1", "r1");
        memory.record("a@b.com", "q2", "r2");
        let history = memory.history("a@b.com");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].query, "q1");
        assert_eq!(history[1].reply, "r2");
    }

    #[test]
    fn window_drops_oldest_exchanges() {
        let memory = ConversationMemory::new(3);
        for n in 0..5 {
            memory.record("a@b.com", &format!("q{n}"), &format!("r{n}"));
        }
        let history = memory.history("a@b.com");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].query, "q2");
        assert_eq!(history[2].query, "q4");
    }

    #[test]
    fn callers_are_isolated() {
        let memory = ConversationMemory::default();
        memory.record("a@b.com", "secret question", "secret answer");
        assert!(memory.history("c@d.com").is_empty());
        assert_eq!(memory.history("a@b.com").len(), 1);
    }
}
