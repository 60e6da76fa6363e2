use regex::Regex;

use crate::output::format_verdict;

/// Tries every line of `content` against `rex` and reports each attempt.
///
/// Returns the report lines; `global_matched` is set when any line matched.
pub fn process_input(
    content: &str,
    rex: &Regex,
    filename: Option<&str>,
    use_color: bool,
    global_matched: &mut bool,
    show_filename: bool,
) -> Vec<String> {
    let prefix = if show_filename {
        filename.map(|f| format!("{f}:")).unwrap_or_default()
    } else {
        String::new()
    };

    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let matched = rex.is_match(line);
            *global_matched |= matched;
            format!(
                "{prefix}Attempt: {line}, value: {}",
                format_verdict(matched, use_color)
            )
        })
        .collect()
}
