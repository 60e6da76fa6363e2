const MATCH_COLOR: &str = "\x1b[01;32m";
const MISS_COLOR: &str = "\x1b[01;31m";
const COLOR_RESET: &str = "\x1b[m";

pub fn format_verdict(matched: bool, use_color: bool) -> String {
    if use_color {
        let color = if matched { MATCH_COLOR } else { MISS_COLOR };
        format!("{color}{matched}{COLOR_RESET}")
    } else {
        matched.to_string()
    }
}
