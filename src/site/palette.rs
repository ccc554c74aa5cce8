use crate::models::portfolio::{Background, PrimaryColor, TextTone, Theme};

/// Resolved color constants for one theme selection. Every field is a CSS
/// color literal embedded verbatim in the generated stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub page_bg: &'static str,
    pub surface: &'static str,
    pub accent: &'static str,
    pub accent_soft: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
}

/// Maps a theme selection to its fixed palette. Unknown input never reaches
/// this point; enum parsing already fell back to the defaults.
pub fn resolve(theme: &Theme) -> Palette {
    let (page_bg, surface) = match theme.background {
        Background::Dark => ("#0f172a", "#1e293b"),
        Background::Light => ("#f1f5f9", "#ffffff"),
        Background::Purple => ("#1e1b4b", "#312e81"),
        Background::Blue => ("#0c4a6e", "#075985"),
    };
    let (accent, accent_soft) = match theme.primary {
        PrimaryColor::Purple => ("#8b5cf6", "#8b5cf633"),
        PrimaryColor::Blue => ("#3b82f6", "#3b82f633"),
        PrimaryColor::Green => ("#22c55e", "#22c55e33"),
        PrimaryColor::Red => ("#ef4444", "#ef444433"),
    };
    let (text, muted) = match theme.text {
        TextTone::Light => ("#e2e8f0", "#94a3b8"),
        TextTone::Dark => ("#0f172a", "#475569"),
    };
    Palette {
        page_bg,
        surface,
        accent,
        accent_soft,
        text,
        muted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_resolves_to_dark_purple_light() {
        let palette = resolve(&Theme::default());
        assert_eq!(palette.page_bg, "#0f172a");
        assert_eq!(palette.accent, "#8b5cf6");
        assert_eq!(palette.text, "#e2e8f0");
    }

    #[test]
    fn every_background_has_a_distinct_page_color() {
        let backgrounds = [
            Background::Dark,
            Background::Light,
            Background::Purple,
            Background::Blue,
        ];
        let mut seen = Vec::new();
        for background in backgrounds {
            let palette = resolve(&Theme {
                background,
                ..Theme::default()
            });
            assert!(!seen.contains(&palette.page_bg));
            seen.push(palette.page_bg);
        }
    }

    #[test]
    fn light_background_pairs_with_white_surface() {
        let palette = resolve(&Theme {
            background: Background::Light,
            primary: PrimaryColor::Green,
            text: TextTone::Dark,
        });
        assert_eq!(palette.surface, "#ffffff");
        assert_eq!(palette.accent, "#22c55e");
        assert_eq!(palette.muted, "#475569");
    }
}
