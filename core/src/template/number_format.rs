//! Locale-aware digit grouping for function output

/// Grouping separator chosen from the system locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            separator: Some(','),
        }
    }
}

impl NumberFormat {
    /// No grouping at all ("1200")
    pub fn ungrouped() -> Self {
        Self { separator: None }
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            separator: Some(separator),
        }
    }

    /// Pick a separator for a BCP 47 / POSIX style tag ("en-US", "de_DE.UTF-8")
    pub fn from_locale(tag: &str) -> Self {
        let language = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "de" | "nl" | "it" | "es" | "pt" | "da" | "id" | "tr" | "el" => Self::with_separator('.'),
            "fr" | "ru" | "pl" | "sv" | "fi" | "nb" | "no" | "cs" | "sk" | "uk" | "hu" => {
                Self::with_separator('\u{a0}')
            }
            _ => Self::default(),
        }
    }

    /// Detect the separator from the OS locale, falling back to `,`
    pub fn from_system_locale() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => {
                let format = Self::from_locale(&tag);
                tracing::debug!(locale = %tag, separator = ?format.separator, "Detected number format");
                format
            }
            None => Self::default(),
        }
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    /// Format `n` with a separator every three digits
    pub fn format(&self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let Some(separator) = self.separator else {
            return n.to_string();
        };

        let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if n < 0 {
            result.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(separator);
            }
            result.push(c);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_every_three_digits() {
        let format = NumberFormat::default();
        assert_eq!(format.format(0), "0");
        assert_eq!(format.format(12), "12");
        assert_eq!(format.format(999), "999");
        assert_eq!(format.format(1200), "1,200");
        assert_eq!(format.format(1234567), "1,234,567");
        assert_eq!(format.format(-1234567), "-1,234,567");
        assert_eq!(format.format(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn ungrouped_prints_plain_number() {
        assert_eq!(NumberFormat::ungrouped().format(-1200), "-1200");
    }

    #[test]
    fn separator_follows_locale_language() {
        assert_eq!(NumberFormat::from_locale("en-US").separator(), Some(','));
        assert_eq!(NumberFormat::from_locale("de_DE.UTF-8").separator(), Some('.'));
        assert_eq!(NumberFormat::from_locale("fr-FR").separator(), Some('\u{a0}'));
        assert_eq!(NumberFormat::from_locale("").separator(), Some(','));
        assert_eq!(NumberFormat::from_locale("de-DE").format(1200), "1.200");
    }
}
