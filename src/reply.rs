/// Line openers that mark deliberation rather than an answer.
pub const FILLER_PREFIXES: &[&str] = &[
    "Okay,",
    "Hmm",
    "I need",
    "Key points:",
    "Remember,",
    "As",
    "The tension",
    "I recall",
    "Right,",
    "But since",
    "We are discussing",
];

/// A reasoning line must be longer than this to be used when every line is filler.
pub const REASONING_LINE_MIN_LEN: usize = 20;
/// Speaker replies must be longer than this.
pub const SPEAKER_REPLY_MIN_LEN: usize = 10;
/// Generated topics must be longer than this.
pub const TOPIC_MIN_LEN: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct ExtractionRules<'a> {
    pub filler_prefixes: &'a [&'a str],
    pub reasoning_line_min_len: usize,
}

impl Default for ExtractionRules<'static> {
    fn default() -> Self {
        Self {
            filler_prefixes: FILLER_PREFIXES,
            reasoning_line_min_len: REASONING_LINE_MIN_LEN,
        }
    }
}

impl ExtractionRules<'_> {
    fn is_filler(&self, line: &str) -> bool {
        self.filler_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix))
    }
}

pub fn extract_reply(reasoning: &str, rules: &ExtractionRules) -> Option<String> {
    let lines = || reasoning.lines().rev().map(str::trim);

    lines()
        .find(|line| !line.is_empty() && !rules.is_filler(line))
        .or_else(|| lines().find(|line| line.chars().count() > rules.reasoning_line_min_len))
        .map(str::to_owned)
}

/// Prefers `content`; reads `reasoning_content` only when `content` is empty.
pub fn select_reply(
    content: Option<&str>,
    reasoning: Option<&str>,
    rules: &ExtractionRules,
) -> Option<String> {
    match content.filter(|content| !content.is_empty()) {
        Some(content) => Some(content.to_owned()),
        None => reasoning.and_then(|reasoning| extract_reply(reasoning, rules)),
    }
}

/// Strips quotes and whitespace, then rejects `none` and anything of
/// `min_len` characters or fewer.
pub fn accept_reply(text: &str, min_len: usize) -> Option<String> {
    let cleaned = text.trim().trim_matches(['"', '\'']).trim();

    if cleaned.eq_ignore_ascii_case("none") || cleaned.chars().count() <= min_len {
        None
    } else {
        Some(cleaned.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_last_non_filler_line() {
        let reasoning = "Okay, the user wants a debate opener.\n\
                         Hmm, I should be concise.\n\
                         AI safety matters because shared risk demands shared governance.\n\
                         \n\
                         Remember, stay in character.\n";

        assert_eq!(
            extract_reply(reasoning, &ExtractionRules::default()).as_deref(),
            Some("AI safety matters because shared risk demands shared governance.")
        );
    }

    #[test]
    fn lone_non_filler_line_near_the_top_is_found() {
        let lone = "Machines should serve us.";
        assert_eq!(lone.chars().count(), 25);
        let reasoning = format!(
            "Okay, let me think.\n{lone}\nHmm, what would he say about it here?\nI need two sentences.\nAs"
        );

        assert_eq!(
            extract_reply(&reasoning, &ExtractionRules::default()).as_deref(),
            Some(lone)
        );
    }

    #[test]
    fn all_filler_falls_back_to_last_long_line() {
        let reasoning = "Okay, this line is long enough to qualify.\n\
                         Hmm, this one is long enough as well.\n\
                         Right, short.\n\
                         As";

        assert_eq!(
            extract_reply(reasoning, &ExtractionRules::default()).as_deref(),
            Some("Hmm, this one is long enough as well.")
        );
    }

    #[test]
    fn nothing_usable_yields_none() {
        assert_eq!(
            extract_reply("Hmm\nOkay, fine.\n\n", &ExtractionRules::default()),
            None
        );
        assert_eq!(extract_reply("", &ExtractionRules::default()), None);
    }

    #[test]
    fn rules_are_configurable() {
        let rules = ExtractionRules {
            filler_prefixes: &["Note:"],
            reasoning_line_min_len: 6,
        };
        assert_eq!(
            extract_reply("Okay, answer.\nNote: ignore me", &rules).as_deref(),
            Some("Okay, answer.")
        );
        assert_eq!(
            extract_reply("Note: abcd\nNote:", &rules).as_deref(),
            Some("Note: abcd")
        );
    }

    #[test]
    fn content_is_preferred_over_reasoning() {
        let rules = ExtractionRules::default();
        assert_eq!(
            select_reply(Some("Direct answer."), Some("Something else entirely."), &rules)
                .as_deref(),
            Some("Direct answer.")
        );
        assert_eq!(
            select_reply(Some(""), Some("From the trace."), &rules).as_deref(),
            Some("From the trace.")
        );
        assert_eq!(select_reply(None, None, &rules), None);
    }

    #[test]
    fn rejects_none_and_short_text() {
        assert_eq!(accept_reply("None", SPEAKER_REPLY_MIN_LEN), None);
        assert_eq!(accept_reply("  \"NONE\" ", TOPIC_MIN_LEN), None);
        assert_eq!(accept_reply("0123456789", SPEAKER_REPLY_MIN_LEN), None);
        assert_eq!(accept_reply("\"Too short\"", SPEAKER_REPLY_MIN_LEN), None);
        assert_eq!(accept_reply("", TOPIC_MIN_LEN), None);
    }

    #[test]
    fn strips_quotes_and_whitespace() {
        assert_eq!(
            accept_reply("  \"Design is how it works.\"\n", SPEAKER_REPLY_MIN_LEN).as_deref(),
            Some("Design is how it works.")
        );
        assert_eq!(
            accept_reply("'Space Mining'", TOPIC_MIN_LEN).as_deref(),
            Some("Space Mining")
        );
    }
}
