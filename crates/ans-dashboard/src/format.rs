//! Display helpers for money values and headline numbers.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

/// Format a value as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// Missing or non-finite values render as `R$ -`.
pub fn format_brl(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "R$ -".to_string(),
    };

    let cents = (value.abs() * 100.0).round() as u128;
    let reais = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, reais, cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Sizing of a headline figure so long numbers still fit their card.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineStyle {
    pub font_size: &'static str,
    pub width_em: f64,
}

impl HeadlineStyle {
    /// Inline CSS for the figure.
    pub fn css(&self) -> String {
        format!(
            "font-size: {}; width: {}em; white-space: nowrap; display: inline-block",
            self.font_size, self.width_em
        )
    }
}

/// Style for a rendered figure based on its length in characters.
pub fn headline_style(text: &str) -> HeadlineStyle {
    let len = text.chars().count();
    let font_size = match len {
        0..=12 => "3rem",
        13..=18 => "2.4rem",
        19..=24 => "2rem",
        _ => "1.5rem",
    };
    let width_em = (len as f64 * 0.58 + 1.0).max(14.0);
    HeadlineStyle {
        font_size,
        width_em,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Some(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(Some(0.0)), "R$ 0,00");
        assert_eq!(format_brl(Some(999.999)), "R$ 1.000,00");
        assert_eq!(format_brl(Some(1_234_567_890.1)), "R$ 1.234.567.890,10");
        assert_eq!(format_brl(Some(-42.5)), "-R$ 42,50");
    }

    #[test]
    fn test_format_brl_missing() {
        assert_eq!(format_brl(None), "R$ -");
        assert_eq!(format_brl(Some(f64::NAN)), "R$ -");
    }

    #[test]
    fn test_headline_style_steps() {
        assert_eq!(headline_style("R$ 1.234,56").font_size, "3rem");
        assert_eq!(headline_style("R$ 123.456.789,00").font_size, "2.4rem");
        assert_eq!(headline_style("R$ 123.456.789.012,00").font_size, "2rem");
        assert_eq!(
            headline_style("R$ 123.456.789.012.345.678,00").font_size,
            "1.5rem"
        );
    }

    #[test]
    fn test_headline_width_has_floor() {
        assert_eq!(headline_style("R$ 1,00").width_em, 14.0);
        let wide = headline_style(&"9".repeat(30));
        assert!((wide.width_em - 18.4).abs() < 1e-9);
        assert!(wide.css().contains("font-size: 1.5rem"));
    }
}
