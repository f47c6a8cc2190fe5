//! Supported locales and the UI strings for each.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Locale {
    En,
    #[default]
    Zh,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Value for the `<html lang>` attribute.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN",
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }

    /// The other locale, for the language switch.
    pub fn alternate(&self) -> Locale {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }

    /// Pick the English variant of a field when reading in English, falling
    /// back to the default-language value when it is missing or blank.
    pub fn pick<'a>(&self, default: Option<&'a str>, english: Option<&'a str>) -> Option<&'a str> {
        let non_blank = |value: Option<&'a str>| value.filter(|v| !v.trim().is_empty());
        match self {
            Locale::En => non_blank(english).or(non_blank(default)),
            Locale::Zh => non_blank(default),
        }
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = UnsupportedLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed UI strings of one locale.
#[derive(Debug)]
pub struct Labels {
    pub site_name: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub nav_home: &'static str,
    pub nav_categories: &'static str,
    pub nav_about: &'static str,
    pub switch_language: &'static str,
    pub latest_articles: &'static str,
    pub no_articles: &'static str,
    pub load_more: &'static str,
    pub newer: &'static str,
    pub no_description: &'static str,
    pub uncategorized: &'static str,
    pub date_pending: &'static str,
    pub date_unknown: &'static str,
    pub read_time_pending: &'static str,
    pub back_to_list: &'static str,
    pub toc: &'static str,
    pub toc_empty: &'static str,
    pub no_content: &'static str,
    pub related: &'static str,
    pub no_related: &'static str,
    pub categories_title: &'static str,
    pub categories_subtitle: &'static str,
    pub no_categories: &'static str,
    pub articles_suffix: &'static str,
    pub category_not_found: &'static str,
    pub article_not_found: &'static str,
    pub page_not_found: &'static str,
    pub load_failed: &'static str,
    pub back_home: &'static str,
    pub contact: &'static str,
}

impl Labels {
    /// "12 articles" / "12 篇文章"
    pub fn article_count(&self, count: u64) -> String {
        format!("{} {}", count, self.articles_suffix)
    }
}

static EN: Labels = Labels {
    site_name: "DeepVeir Blog",
    hero_title: "Explore, Build and Think",
    hero_subtitle: "Insights on software architecture, AI applications and product design.",
    nav_home: "Home",
    nav_categories: "Categories",
    nav_about: "About",
    switch_language: "中文",
    latest_articles: "Latest articles",
    no_articles: "No articles yet",
    load_more: "Older articles",
    newer: "Newer articles",
    no_description: "No description",
    uncategorized: "Uncategorized",
    date_pending: "Unpublished",
    date_unknown: "Unknown date",
    read_time_pending: "Reading time pending",
    back_to_list: "Back to articles",
    toc: "Contents",
    toc_empty: "No headings",
    no_content: "This article has no content yet.",
    related: "Related reading",
    no_related: "No related articles",
    categories_title: "Categories",
    categories_subtitle: "Browse every article by topic",
    no_categories: "No categories yet",
    articles_suffix: "articles",
    category_not_found: "Category not found",
    article_not_found: "Article not found",
    page_not_found: "Page not found",
    load_failed: "Failed to load, please try again later",
    back_home: "Back to home",
    contact: "Contact",
};

static ZH: Labels = Labels {
    site_name: "DeepVeir Blog",
    hero_title: "探索、构建与思考",
    hero_subtitle: "分享关于技术架构、AI 应用与产品设计的深度见解。",
    nav_home: "首页",
    nav_categories: "分类",
    nav_about: "关于",
    switch_language: "English",
    latest_articles: "最新文章",
    no_articles: "暂无文章",
    load_more: "更早的文章",
    newer: "较新的文章",
    no_description: "暂无描述",
    uncategorized: "未分类",
    date_pending: "待发布",
    date_unknown: "未知日期",
    read_time_pending: "阅读时长待补充",
    back_to_list: "返回文章列表",
    toc: "目录",
    toc_empty: "暂无标题",
    no_content: "暂无正文内容",
    related: "相关阅读",
    no_related: "暂无相关文章",
    categories_title: "文章分类",
    categories_subtitle: "按主题浏览所有文章",
    no_categories: "暂无分类",
    articles_suffix: "篇文章",
    category_not_found: "分类不存在",
    article_not_found: "文章不存在",
    page_not_found: "页面不存在",
    load_failed: "加载失败，请稍后重试",
    back_home: "返回首页",
    contact: "联系我",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_locales_only() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" ZH ".parse::<Locale>(), Ok(Locale::Zh));
        assert!("fr".parse::<Locale>().is_err());
        assert!("favicon.ico".parse::<Locale>().is_err());
    }

    #[test]
    fn default_locale_is_chinese() {
        assert_eq!(Locale::default(), Locale::Zh);
        assert_eq!(Locale::default().labels().nav_home, "首页");
    }

    #[test]
    fn english_fields_fall_back_to_default_language() {
        assert_eq!(Locale::En.pick(Some("关于"), Some("About")), Some("About"));
        assert_eq!(Locale::En.pick(Some("关于"), Some("  ")), Some("关于"));
        assert_eq!(Locale::En.pick(Some("关于"), None), Some("关于"));
        assert_eq!(Locale::Zh.pick(Some("关于"), Some("About")), Some("关于"));
        assert_eq!(Locale::Zh.pick(None, Some("About")), None);
    }

    #[test]
    fn article_count_is_localized() {
        assert_eq!(Locale::En.labels().article_count(3), "3 articles");
        assert_eq!(Locale::Zh.labels().article_count(3), "3 篇文章");
    }
}
