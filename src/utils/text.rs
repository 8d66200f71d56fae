/// "s" unless exactly one.
pub fn plural_suffix(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Colon when a list follows, full stop otherwise.
pub fn dot_or_colon(n: usize) -> &'static str {
    if n > 0 {
        ":"
    } else {
        "."
    }
}
