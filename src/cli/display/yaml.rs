//! Colorized YAML rendering

use super::colors::{table_color_to_colored_str, ColorTheme};
use colored::Colorize;

/// Highlights keys, scalars and comments of serialized YAML line by line
pub struct YamlRenderer {
    theme: ColorTheme,
}

impl Default for YamlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    pub fn render(&self, yaml: &str) -> String {
        let mut output = String::with_capacity(yaml.len() * 2);
        for line in yaml.lines() {
            output.push_str(&self.render_line(line));
            output.push('\n');
        }
        output
    }

    fn render_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if trimmed.starts_with('#') {
            return format!("{}{}", indent, trimmed.bright_black());
        }

        let (marker, body) = match trimmed.strip_prefix("- ") {
            Some(rest) => ("- ", rest),
            None if trimmed == "-" => return line.to_string(),
            None => ("", trimmed),
        };

        match split_key(body) {
            Some((key, value)) => format!(
                "{}{}{}:{}",
                indent,
                marker,
                key.color(table_color_to_colored_str(self.theme.key)),
                if value.is_empty() {
                    String::new()
                } else {
                    format!(" {}", self.render_scalar(value))
                }
            ),
            None => format!("{}{}{}", indent, marker, self.render_scalar(body)),
        }
    }

    fn render_scalar(&self, value: &str) -> String {
        let color = if value.starts_with('\'') || value.starts_with('"') {
            self.theme.string
        } else if value.parse::<f64>().is_ok()
            || matches!(value, "true" | "false" | "null" | "~")
        {
            self.theme.number
        } else if value.starts_with('[') || value.starts_with('{') || value.starts_with('|') {
            self.theme.muted
        } else {
            self.theme.string
        };
        value.color(table_color_to_colored_str(color)).to_string()
    }
}

/// Split `key: value` / `key:` outside of quotes
fn split_key(body: &str) -> Option<(&str, &str)> {
    if body.starts_with('\'') || body.starts_with('"') {
        let quote = body.chars().next()?;
        let close = body[1..].find(quote)? + 1;
        let rest = &body[close + 1..];
        let value = rest.strip_prefix(':')?;
        return Some((&body[..=close], value.trim_start()));
    }

    if let Some(key) = body.strip_suffix(':') {
        if !key.contains(": ") {
            return Some((key, ""));
        }
    }
    let idx = body.find(": ")?;
    Some((&body[..idx], body[idx + 2..].trim_start()))
}
