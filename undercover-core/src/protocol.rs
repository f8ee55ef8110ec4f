//! The fixed text protocol between the engine and the agents.
//!
//! Everything here is load-bearing wire format: the `<think>` reasoning
//! delimiter, the `###Vote:` directive, the GM's `normal_word=..,
//! spy_word=..` line, and the reserved responder error prefix. Keep the
//! exact shapes stable; agents are prompted against them verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved prefix marking a responder failure substituted as text.
pub const ERROR_PREFIX: &str = "[ERROR]: ";

/// The abstain token accepted in a vote directive.
pub const ABSTAIN_TOKEN: &str = "None";

static THINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("valid think regex"));

static VOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^###Vote:\s*(.+)$").expect("valid vote regex"));

static WORD_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)normal_word\s*=\s*(.*?),\s*spy_word\s*=\s*(.*)$").expect("valid pair regex")
});

/// Wrap a responder failure as error-tagged public text.
pub fn error_text(detail: impl std::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{detail}")
}

/// Split a raw reply into private reasoning and public text.
///
/// Only the first `<think>...</think>` span counts; it is removed from the
/// text to produce the public portion. No span means the whole reply is
/// public, which is not an error.
pub fn extract_reasoning(text: &str) -> (Option<String>, String) {
    match THINK_RE.captures(text) {
        Some(caps) => {
            let private = caps.get(1).map(|m| m.as_str().trim().to_string());
            let public = THINK_RE.replace(text, "").trim().to_string();
            (private, public)
        }
        None => (None, text.to_string()),
    }
}

/// A vote extracted from an agent's public text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteIntent {
    /// A named elimination target (verbatim, whitespace-trimmed).
    Target(String),
    /// The explicit abstain token.
    Abstain,
    /// No vote directive found anywhere in the text.
    Unparsed,
}

impl VoteIntent {
    /// The target name, if this vote names one.
    pub fn target(&self) -> Option<&str> {
        match self {
            VoteIntent::Target(name) => Some(name),
            _ => None,
        }
    }
}

/// Scan public text line-by-line for the first `###Vote:` directive.
///
/// The directive keyword is case-insensitive; the remainder of the line is
/// the target. Later matching lines are ignored. An explicit
/// `###Vote: None` abstain is distinct from finding no directive at all,
/// though neither contributes to the tally.
pub fn parse_vote(public_text: &str) -> VoteIntent {
    for line in public_text.lines() {
        let line = line.trim();
        if let Some(caps) = VOTE_RE.captures(line) {
            let target = caps[1].trim().to_string();
            if target.eq_ignore_ascii_case(ABSTAIN_TOKEN) {
                return VoteIntent::Abstain;
            }
            return VoteIntent::Target(target);
        }
    }
    VoteIntent::Unparsed
}

/// Parse the GM's `normal_word=<X>, spy_word=<Y>` line.
///
/// The pair is expected as the last meaningful line of the GM's public
/// text, so lines are scanned in reverse.
pub fn parse_word_pair(public_text: &str) -> Option<(String, String)> {
    for line in public_text.lines().rev() {
        if let Some(caps) = WORD_PAIR_RE.captures(line.trim()) {
            let normal = caps[1].trim().to_string();
            let spy = caps[2].trim().to_string();
            if !normal.is_empty() && !spy.is_empty() {
                return Some((normal, spy));
            }
        }
    }
    None
}
