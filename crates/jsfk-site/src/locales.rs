//! UI string tables.

use serde::Serialize;

/// Interface strings for a language. `{}` marks the substitution point.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UiStrings {
    pub avatar_alt: &'static str,
    pub tag_title: &'static str,
    pub article_title: &'static str,
    pub last_updated: &'static str,
    pub related_articles: &'static str,
}

pub const RU: UiStrings = UiStrings {
    avatar_alt: "Аватар {}",
    tag_title: "Перейти к тегу {}",
    article_title: "Перейти к статье {}",
    last_updated: "Обновлено {}",
    related_articles: "Похожие статьи",
};

pub const EN: UiStrings = UiStrings {
    avatar_alt: "{}'s avatar",
    tag_title: "Go to tag {}",
    article_title: "Go to article {}",
    last_updated: "Last updated {}",
    related_articles: "Related articles",
};

impl UiStrings {
    /// Strings for a language tag; unknown languages get English.
    pub fn for_lang(lang: &str) -> &'static UiStrings {
        match lang.split('-').next().unwrap_or(lang) {
            "ru" => &RU,
            _ => &EN,
        }
    }

    /// Substitute `value` into the first `{}` of `template`.
    pub fn fill(template: &str, value: &str) -> String {
        template.replacen("{}", value, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picks_table_by_language() {
        assert_eq!(UiStrings::for_lang("ru"), &RU);
        assert_eq!(UiStrings::for_lang("ru-RU"), &RU);
        assert_eq!(UiStrings::for_lang("en"), &EN);
        assert_eq!(UiStrings::for_lang("sv"), &EN);
    }

    #[test]
    fn fills_placeholder() {
        assert_eq!(UiStrings::fill(EN.avatar_alt, "VChet"), "VChet's avatar");
        assert_eq!(UiStrings::fill(RU.tag_title, "vue"), "Перейти к тегу vue");
        assert_eq!(
            UiStrings::fill(EN.related_articles, "x"),
            "Related articles"
        );
    }
}
