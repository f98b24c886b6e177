//! Tag rules for syntax highlighting
//!
//! A rule pairs a matcher with the tag it assigns. Rules live in an ordered
//! table; the tokenizer applies them strictly in table order and a later rule
//! overwrites an earlier one wherever their characters overlap.

use regex::Regex;

use super::tags::Tag;

/// Characters stripped from both ends of a word before word rules look at it
pub const WORD_PUNCTUATION: &[char] = &['(', ')', ',', ':'];

/// Context checks applied to each regex match
///
/// The regex engine has no look-around, so conditions on the characters
/// around a match are checked here after the fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guard {
    /// Reject matches preceded by an ASCII lowercase letter
    pub not_after_lowercase: bool,
    /// Require this character right after the match (it is not included)
    pub followed_by: Option<char>,
}

impl Guard {
    /// Check a match at `start..end` (byte offsets into `text`)
    pub fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        if self.not_after_lowercase
            && text[..start]
                .chars()
                .next_back()
                .is_some_and(|ch| ch.is_ascii_lowercase())
        {
            return false;
        }
        match self.followed_by {
            Some(expected) => text[end..].starts_with(expected),
            None => true,
        }
    }
}

/// How a rule recognises text
pub enum Matcher {
    /// Regex over the raw line, with optional context checks
    Pattern { regex: Regex, guard: Guard },
    /// Exact membership of a stripped whitespace-delimited word
    Words(&'static [&'static str]),
    /// Stripped word starting with this character
    Prefix(char),
}

/// A single entry in the rule table
pub struct TagRule {
    /// Name for debugging
    pub name: &'static str,
    /// What the rule matches
    pub matcher: Matcher,
    /// Tag assigned to matched text
    pub tag: Tag,
}

impl TagRule {
    /// Create a regex rule
    pub fn pattern(name: &'static str, pattern: &str, tag: Tag) -> Option<Self> {
        Self::guarded(name, pattern, Guard::default(), tag)
    }

    /// Create a regex rule with context checks
    pub fn guarded(name: &'static str, pattern: &str, guard: Guard, tag: Tag) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name,
            matcher: Matcher::Pattern { regex, guard },
            tag,
        })
    }

    /// Create a word-set rule
    pub fn words(name: &'static str, words: &'static [&'static str], tag: Tag) -> Self {
        Self {
            name,
            matcher: Matcher::Words(words),
            tag,
        }
    }

    /// Create a word-prefix rule
    pub fn prefix(name: &'static str, prefix: char, tag: Tag) -> Self {
        Self {
            name,
            matcher: Matcher::Prefix(prefix),
            tag,
        }
    }

    /// Whether this rule works on split words rather than raw text
    pub fn is_word_rule(&self) -> bool {
        !matches!(self.matcher, Matcher::Pattern { .. })
    }

    /// All accepted, non-overlapping regex matches as byte ranges.
    /// Word rules return nothing.
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.matcher {
            Matcher::Pattern { regex, guard } => regex
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .filter(|&(start, end)| start < end && guard.accepts(text, start, end))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Check a stripped word against a word rule. Regex rules never match here.
    pub fn matches_word(&self, word: &str) -> bool {
        match &self.matcher {
            Matcher::Words(words) => words.contains(&word),
            Matcher::Prefix(prefix) => word.starts_with(*prefix),
            Matcher::Pattern { .. } => false,
        }
    }
}

/// Import/definition keywords
pub const KEYWORDS_DEFINITION: &[&str] = &["import", "as", "from", "def", "try", "except", "self"];

/// Control-flow keywords
pub const KEYWORDS_FLOW: &[&str] = &[
    "if", "else", "elif", "try", "except", "for", "in", "while", "return", "with",
];

/// Ordered rule table
pub struct RuleTable {
    rules: Vec<TagRule>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it takes precedence over every rule already present
    pub fn push(&mut self, rule: TagRule) {
        self.rules.push(rule);
    }

    /// Rules in application order
    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// The Python-flavoured default table
    pub fn python() -> Self {
        let mut table = Self::new();
        let after_word = Guard {
            not_after_lowercase: true,
            followed_by: None,
        };

        if let Some(rule) = TagRule::pattern("single_string", r"'[^'\r\n]*'", Tag::String) {
            table.push(rule);
        }
        if let Some(rule) = TagRule::pattern("double_string", r#""[^"\r\n]*""#, Tag::String) {
            table.push(rule);
        }
        if let Some(rule) = TagRule::pattern("number", r"\b\d+\.?\d*\b", Tag::Digit) {
            table.push(rule);
        }
        if let Some(rule) = TagRule::guarded("constant", r"None|True|False", after_word, Tag::KeywordCaps) {
            table.push(rule);
        }
        if let Some(rule) = TagRule::guarded("self", r"self", after_word, Tag::Keyword1) {
            table.push(rule);
        }
        let call = Guard {
            not_after_lowercase: true,
            followed_by: Some('('),
        };
        if let Some(rule) = TagRule::guarded("builtin_call", r"print|list|dict|set|int|str", call, Tag::KeywordFunc) {
            table.push(rule);
        }

        table.push(TagRule::words("definition", KEYWORDS_DEFINITION, Tag::Keyword1));
        table.push(TagRule::words("flow", KEYWORDS_FLOW, Tag::KeywordFlow));
        table.push(TagRule::prefix("decorator", '@', Tag::Decorator));

        table
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::python()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<'a>(table: &'a RuleTable, name: &str) -> &'a TagRule {
        table.rules().iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_python_table_order() {
        let table = RuleTable::python();
        let names: Vec<_> = table.rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "single_string",
                "double_string",
                "number",
                "constant",
                "self",
                "builtin_call",
                "definition",
                "flow",
                "decorator"
            ]
        );
        let words = table.rules().iter().filter(|rule| rule.is_word_rule()).count();
        assert_eq!(words, 3);
    }

    #[test]
    fn test_pattern_rule() {
        let rule = TagRule::pattern("number", r"\d+", Tag::Digit).unwrap();
        assert_eq!(rule.find_all("abc 123 def 4"), vec![(4, 7), (12, 13)]);
        assert!(rule.find_all("no numbers").is_empty());
        assert!(TagRule::pattern("broken", r"(", Tag::Digit).is_none());
    }

    #[test]
    fn test_strings_stop_at_line_end_quote() {
        let table = RuleTable::python();
        let single = rule(&table, "single_string");
        assert_eq!(single.find_all("x = 'a' + 'b'"), vec![(4, 7), (10, 13)]);
        assert!(single.find_all("x = 'open").is_empty());
    }

    #[test]
    fn test_number_inside_parentheses() {
        let table = RuleTable::python();
        let number = rule(&table, "number");
        assert_eq!(number.find_all("f(12, 3.5)"), vec![(2, 4), (6, 9)]);
        assert!(number.find_all("abc1").is_empty());
    }

    #[test]
    fn test_constant_guard() {
        let table = RuleTable::python();
        let constant = rule(&table, "constant");
        assert_eq!(constant.find_all("x = None"), vec![(4, 8)]);
        assert_eq!(constant.find_all("(True,False)"), vec![(1, 5), (6, 11)]);
        assert!(constant.find_all("isNone").is_empty());
        assert_eq!(constant.find_all("XNone"), vec![(1, 5)]);
    }

    #[test]
    fn test_builtin_call_guard() {
        let table = RuleTable::python();
        let call = rule(&table, "builtin_call");
        assert_eq!(call.find_all("print(1)"), vec![(0, 5)]);
        assert!(call.find_all("print 1").is_empty());
        assert!(call.find_all("sprint(1)").is_empty());
        assert_eq!(call.find_all("x = str(int(y))"), vec![(4, 7), (8, 11)]);
    }

    #[test]
    fn test_word_rules() {
        let table = RuleTable::python();
        assert!(rule(&table, "definition").matches_word("import"));
        assert!(rule(&table, "flow").matches_word("elif"));
        assert!(!rule(&table, "flow").matches_word("Elif"));
        assert!(rule(&table, "decorator").matches_word("@property"));
        assert!(!rule(&table, "number").matches_word("5"));
        assert!(rule(&table, "flow").find_all("if x").is_empty());
    }

    #[test]
    fn test_guard_at_line_start() {
        let guard = Guard {
            not_after_lowercase: true,
            followed_by: Some('('),
        };
        assert!(guard.accepts("f(", 0, 1));
        assert!(!guard.accepts("f", 0, 1));
        assert!(!guard.accepts("af(", 1, 2));
    }
}
