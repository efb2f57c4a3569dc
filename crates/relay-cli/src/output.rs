use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Collapse a multi-line body to one line, truncated to `max` characters.
pub fn one_line(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_flattens_whitespace() {
        assert_eq!(one_line("print('a')\n\tprint('b')", 80), "print('a') print('b')");
    }

    #[test]
    fn one_line_truncates_long_text() {
        let out = one_line(&"x".repeat(50), 10);
        assert_eq!(out, "xxxxxxx...");
        assert_eq!(out.chars().count(), 10);
    }
}
