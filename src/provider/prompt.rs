//! Prompt construction shared by every provider.

use std::borrow::Cow;

/// Diffs longer than this many characters are cut before being sent.
pub const MAX_DIFF_CHARS: usize = 15_000;

/// Appended to a diff that was cut at [`MAX_DIFF_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n... [Diff truncated] ...";

/// Default template for the chat-style providers (OpenAI, Anthropic).
pub const CHAT_PROMPT_TEMPLATE: &str = "Generate a git commit message for these changes:\n\n%s\n\n%s";

/// Cut `diff` to [`MAX_DIFF_CHARS`] characters and mark it as truncated.
///
/// Counts characters rather than bytes so multi-byte text is never split.
/// Short diffs are returned unchanged.
pub fn truncate_diff(diff: &str) -> Cow<'_, str> {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &diff[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(diff),
    }
}

/// Substitute `diff` and `context` into a prompt template.
///
/// Positional `%s` placeholders take the diff first and the context second,
/// which keeps templates written for printf-style formatting working. Named
/// `{diff}` and `{context}` placeholders are accepted as well, and `%%` yields
/// a literal percent sign. Substituted text is never scanned again, so a diff
/// containing `%s` is inserted verbatim.
pub fn render_prompt(template: &str, diff: &str, context: &str) -> String {
    const TOKENS: [&str; 4] = ["%%", "%s", "{diff}", "{context}"];

    let mut out = String::with_capacity(template.len() + diff.len() + context.len());
    let mut positional = [diff, context].into_iter();
    let mut rest = template;

    loop {
        let next = TOKENS
            .iter()
            .filter_map(|token| rest.find(token).map(|idx| (idx, *token)))
            .min_by_key(|(idx, _)| *idx);

        let Some((idx, token)) = next else {
            out.push_str(rest);
            break;
        };

        out.push_str(&rest[..idx]);
        match token {
            "%%" => out.push('%'),
            "%s" => out.push_str(positional.next().unwrap_or_default()),
            "{diff}" => out.push_str(diff),
            _ => out.push_str(context),
        }
        rest = &rest[idx + token.len()..];
    }

    out
}
