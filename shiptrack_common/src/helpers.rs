/// Collapses runs of whitespace (including newlines from pretty-printed XML) into single spaces and trims the ends.
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}
