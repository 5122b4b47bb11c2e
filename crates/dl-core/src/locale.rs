//! UI text lookup for the hosts.
//!
//! The engine never renders text itself; hosts ask a [`Translator`] for the
//! string behind a key. Unknown keys come back unchanged.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Lang {
    /// Pick a language from a locale tag such as `zh-CN` or `en_US.UTF-8`.
    ///
    /// Tags starting with `zh` select Chinese; everything else is English.
    pub fn detect(tag: &str) -> Self {
        if tag.trim().to_lowercase().starts_with("zh") {
            Self::Zh
        } else {
            Self::En
        }
    }

    /// Detect from the `LC_ALL`, `LC_MESSAGES` and `LANG` environment variables.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty())
            .map(|v| Self::detect(&v))
            .unwrap_or_default()
    }

    /// Parse an explicit language code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "zh" | "cn" | "chinese" => Some(Self::Zh),
            _ => None,
        }
    }

    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    /// Native name of the language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "中文",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Zh => write!(f, "zh"),
        }
    }
}

/// Looks up UI text by key.
pub trait Translator {
    /// Text for `key` in `lang`, or the key itself when there is none.
    fn translate(&self, lang: Lang, key: &str) -> String;
}

// (key, English, Chinese)
const ENTRIES: &[(&str, &str, &str)] = &[
    ("siteName", "Draw Lots", "Draw Lots"),
    ("language", "English", "中文"),
    ("pleaseInput2", "Please enter at least 2 options", "请至少输入2个选项"),
    ("tryAgain", "Try again", "再试一次"),
    ("reset", "Reset", "重置"),
    ("modeJar", "Draw from jar", "抓阄"),
    ("modeWheel", "Lucky wheel", "幸运转盘"),
    ("option_title", "Options", "抓阄选项"),
    ("option_tip", "Add at least 2 options to draw", "至少2个选项开始抓阄"),
    ("option_placeholder", "Type an option and press Enter...", "输入选项并添加..."),
    ("option_added", "Added", "已添加"),
    ("lotteryjar_stick_label", "Top pick", "上上签"),
    ("lotteryjar_drawing", "Drawing...", "正在抓阄..."),
    ("lotteryjar_start", "Start drawing", "开始抓阄"),
    ("luckywheel_power", "Power", "蓄力"),
    ("luckywheel_spinning", "Spinning...", "转盘转动中..."),
    ("luckywheel_release", "Release to spin!", "释放开始旋转!"),
    ("luckywheel_charge", "Hold to charge", "长按蓄力"),
    ("result_title", "Result", "抓阄结果"),
    ("result_desc", "Fate has chosen...", "命运的选择是..."),
    ("result_try_again", "Try again", "再试一次"),
    ("result_reset", "Start over", "重新输入"),
    ("help_title", "Keys", "按键"),
    ("help_add", "Enter: add option / start draw", "Enter：添加选项 / 开始抓阄"),
    ("help_charge", "Space: hold / release charge", "空格：蓄力 / 释放"),
    ("help_select", "Up/Down: select, Delete: remove", "上/下：选择，Delete：删除"),
    ("help_mode", "F2 or Ctrl+W: switch mode", "F2 或 Ctrl+W：切换模式"),
    ("help_try_again", "Ctrl+T: try again", "Ctrl+T：再试一次"),
    ("help_reset", "Ctrl+R: reset", "Ctrl+R：重置"),
    ("help_lang", "Ctrl+L: switch language", "Ctrl+L：切换语言"),
    ("help_quit", "Esc or Ctrl+C: quit", "Esc 或 Ctrl+C：退出"),
    ("status_discarded", "Charge too weak, no spin", "蓄力不足，未转动"),
    ("hint_jar", "Enter:draw", "Enter：抓阄"),
    ("hint_wheel", "Space:charge/release", "空格：蓄力/释放"),
    (
        "hint_keys",
        "\u{2191}/\u{2193}:select  Del:remove  F2:mode  Ctrl+T:again  Ctrl+R:reset  F1:help  Esc:quit",
        "\u{2191}/\u{2193}：选择  Del：删除  F2：模式  Ctrl+T：再试  Ctrl+R：重置  F1：帮助  Esc：退出",
    ),
];

/// The built-in catalog covering every key the hosts use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    /// Create the built-in catalog.
    pub fn new() -> Self {
        Self
    }

    /// Every key the catalog knows.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        ENTRIES.iter().map(|(key, _, _)| *key)
    }

    /// Text for `key` in `lang`, if the catalog has it.
    pub fn get(&self, lang: Lang, key: &str) -> Option<&'static str> {
        ENTRIES
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, en, zh)| match lang {
                Lang::En => *en,
                Lang::Zh => *zh,
            })
    }
}

impl Translator for Catalog {
    fn translate(&self, lang: Lang, key: &str) -> String {
        self.get(lang, key).unwrap_or(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn detect_prefers_zh_prefix() {
        assert_eq!(Lang::detect("zh-CN"), Lang::Zh);
        assert_eq!(Lang::detect("zh_TW.UTF-8"), Lang::Zh);
        assert_eq!(Lang::detect("en-US"), Lang::En);
        assert_eq!(Lang::detect("fr"), Lang::En);
        assert_eq!(Lang::detect(""), Lang::En);
    }

    #[test]
    fn parse_codes() {
        assert_eq!(Lang::parse("ZH"), Some(Lang::Zh));
        assert_eq!(Lang::parse("en"), Some(Lang::En));
        assert_eq!(Lang::parse("de"), None);
        assert_eq!(Lang::Zh.toggled(), Lang::En);
    }

    #[test]
    fn translate_known_keys() {
        let catalog = Catalog::new();
        assert_eq!(catalog.translate(Lang::Zh, "modeWheel"), "幸运转盘");
        assert_eq!(catalog.translate(Lang::En, "modeWheel"), "Lucky wheel");
        assert_eq!(catalog.translate(Lang::Zh, "tryAgain"), "再试一次");
        assert_eq!(catalog.translate(Lang::Zh, "hint_wheel"), "空格：蓄力/释放");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let catalog = Catalog::new();
        assert_eq!(catalog.translate(Lang::En, "no_such_key"), "no_such_key");
        assert_eq!(catalog.get(Lang::Zh, "no_such_key"), None);
    }

    #[test]
    fn keys_are_unique_and_filled() {
        let catalog = Catalog::new();
        let mut seen = HashSet::new();
        for key in catalog.keys() {
            assert!(seen.insert(key), "duplicate key {key}");
            assert!(!catalog.translate(Lang::En, key).is_empty());
            assert!(!catalog.translate(Lang::Zh, key).is_empty());
        }
    }
}
