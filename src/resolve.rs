//! Column-role resolution
//!
//! Input spreadsheets are loosely named: headers mix Chinese and English
//! labels and vary between campaigns. Each role is resolved by an ordered
//! list of alias substrings with an optional positional fallback. Aliases
//! are tried in rule order and, per alias, columns in sheet order; the
//! first match wins. ASCII aliases match case-insensitively, CJK aliases
//! match as exact substrings.

use crate::error::{FillError, FillResult};
use crate::sheet::Sheet;
use tracing::debug;

/// One resolution rule: alias substrings plus an optional fallback index
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    /// Role name used in error messages and the inspect output
    pub role: &'static str,
    /// Substring aliases, highest priority first
    pub aliases: &'static [&'static str],
    /// Column index used when no alias matches
    pub fallback: Option<usize>,
}

/// Link column in the source file: the campaign link tool labels it
/// "短链接"; older exports use "Short Link" or a bare "link" column.
pub const SOURCE_LINK: ColumnRule = ColumnRule {
    role: "link",
    aliases: &["短链接", "short link", "link", "链接"],
    fallback: Some(0),
};

pub const GROUP_ID: ColumnRule = ColumnRule {
    role: "copy group id",
    aliases: &["文案", "text"],
    fallback: Some(0),
};

pub const BODY: ColumnRule = ColumnRule {
    role: "body",
    aliases: &["正文", "body"],
    fallback: Some(1),
};

pub const PREFIX: ColumnRule = ColumnRule {
    role: "prefix",
    aliases: &["回到", "back"],
    fallback: Some(2),
};

pub const LINK_TARGET: ColumnRule = ColumnRule {
    role: "link placeholder",
    aliases: &["链接", "link"],
    fallback: Some(3),
};

pub const SUFFIX: ColumnRule = ColumnRule {
    role: "suffix",
    aliases: &["退订", "unsubscribe"],
    fallback: Some(4),
};

pub const LOCALE: ColumnRule = ColumnRule {
    role: "locale",
    aliases: &["语言", "language"],
    fallback: None,
};

pub const REGION: ColumnRule = ColumnRule {
    role: "region",
    aliases: &["区域", "region"],
    fallback: None,
};

pub const SENDER: ColumnRule = ColumnRule {
    role: "sender",
    aliases: &["发信人", "签名", "sender", "signature"],
    fallback: None,
};

pub const TITLE: ColumnRule = ColumnRule {
    role: "title",
    aliases: &["标题", "title"],
    fallback: None,
};

pub const CONTENT: ColumnRule = ColumnRule {
    role: "content",
    aliases: &["内容", "content"],
    fallback: None,
};

/// Resolve one rule against a header row
pub fn resolve_column(header: &[String], rule: &ColumnRule) -> Option<usize> {
    for alias in rule.aliases {
        for (idx, name) in header.iter().enumerate() {
            if header_matches(name, alias) {
                debug!(
                    role = rule.role,
                    alias, column = name.as_str(), "resolved column by alias"
                );
                return Some(idx);
            }
        }
    }

    match rule.fallback {
        Some(idx) if idx < header.len() => {
            debug!(role = rule.role, index = idx, "resolved column by position");
            Some(idx)
        }
        _ => None,
    }
}

fn header_matches(name: &str, alias: &str) -> bool {
    if alias.is_ascii() {
        name.to_lowercase().contains(alias)
    } else {
        name.contains(alias)
    }
}

/// Resolved roles in the source file
#[derive(Debug, Clone, Copy)]
pub struct SourceColumns {
    pub link: usize,
}

impl SourceColumns {
    pub fn resolve(sheet: &Sheet) -> FillResult<Self> {
        let link = resolve_column(&sheet.header, &SOURCE_LINK).ok_or_else(|| {
            FillError::Column("Source file has no columns to read links from".to_string())
        })?;
        Ok(Self { link })
    }
}

/// Resolved roles in the template file
///
/// `locale`, `region` and `group_id` are mandatory; everything else
/// degrades to `None` and is treated as empty or omitted downstream.
/// `link` and `content` are synthesized by the merge step when absent.
#[derive(Debug, Clone)]
pub struct TemplateColumns {
    pub group_id: usize,
    pub body: Option<usize>,
    pub prefix: Option<usize>,
    pub link: Option<usize>,
    pub suffix: Option<usize>,
    pub locale: usize,
    pub region: usize,
    pub sender: Option<usize>,
    pub title: Option<usize>,
    pub content: Option<usize>,
}

impl TemplateColumns {
    pub fn resolve(sheet: &Sheet) -> FillResult<Self> {
        let header = &sheet.header;

        let group_id = resolve_column(header, &GROUP_ID);
        let locale = resolve_column(header, &LOCALE);
        let region = resolve_column(header, &REGION);

        let mut missing = Vec::new();
        if locale.is_none() {
            missing.push(LOCALE.role);
        }
        if region.is_none() {
            missing.push(REGION.role);
        }
        if group_id.is_none() {
            missing.push(GROUP_ID.role);
        }
        if !missing.is_empty() {
            return Err(FillError::Column(format!(
                "Template is missing mandatory column(s): {}. Check the template header row.",
                missing.join(", ")
            )));
        }

        Ok(Self {
            group_id: group_id.unwrap_or_default(),
            body: resolve_column(header, &BODY),
            prefix: resolve_column(header, &PREFIX),
            link: resolve_column(header, &LINK_TARGET),
            suffix: resolve_column(header, &SUFFIX),
            locale: locale.unwrap_or_default(),
            region: region.unwrap_or_default(),
            sender: resolve_column(header, &SENDER),
            title: resolve_column(header, &TITLE),
            content: resolve_column(header, &CONTENT),
        })
    }

    /// Role → resolved header name, for the inspect command and the
    /// analyze preview
    pub fn describe(&self, sheet: &Sheet) -> Vec<(&'static str, Option<String>)> {
        let name = |idx: Option<usize>| idx.and_then(|i| sheet.header.get(i).cloned());
        vec![
            (GROUP_ID.role, name(Some(self.group_id))),
            (BODY.role, name(self.body)),
            (PREFIX.role, name(self.prefix)),
            (LINK_TARGET.role, name(self.link)),
            (SUFFIX.role, name(self.suffix)),
            (LOCALE.role, name(Some(self.locale))),
            (REGION.role, name(Some(self.region))),
            (SENDER.role, name(self.sender)),
            (TITLE.role, name(self.title)),
            (CONTENT.role, name(self.content)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chinese_alias_beats_english() {
        let h = header(&["Deep Link", "短链接地址"]);
        assert_eq!(resolve_column(&h, &SOURCE_LINK), Some(1));
    }

    #[test]
    fn test_english_alias_case_insensitive() {
        let h = header(&["id", "Short Link URL"]);
        assert_eq!(resolve_column(&h, &SOURCE_LINK), Some(1));
    }

    #[test]
    fn test_generic_link_alias() {
        let h = header(&["id", "campaign_link"]);
        assert_eq!(resolve_column(&h, &SOURCE_LINK), Some(1));
    }

    #[test]
    fn test_positional_fallback() {
        let h = header(&["first", "second"]);
        assert_eq!(resolve_column(&h, &SOURCE_LINK), Some(0));
    }

    #[test]
    fn test_fallback_out_of_range() {
        let h = header(&["only"]);
        assert_eq!(resolve_column(&h, &SUFFIX), None);
    }

    #[test]
    fn test_no_fallback_unresolved() {
        let h = header(&["a", "b", "c"]);
        assert_eq!(resolve_column(&h, &LOCALE), None);
    }

    #[test]
    fn test_first_match_wins_within_alias() {
        let h = header(&["链接A", "链接B"]);
        assert_eq!(resolve_column(&h, &LINK_TARGET), Some(0));
    }

    #[test]
    fn test_template_resolve_bilingual() {
        let sheet = Sheet::new(header(&[
            "文案", "正文", "回到首页", "链接", "退订文案", "语言标识", "区域列表", "发信人",
            "标题", "内容",
        ]));
        let cols = TemplateColumns::resolve(&sheet).unwrap();
        assert_eq!(cols.group_id, 0);
        assert_eq!(cols.body, Some(1));
        assert_eq!(cols.prefix, Some(2));
        assert_eq!(cols.link, Some(3));
        assert_eq!(cols.suffix, Some(4));
        assert_eq!(cols.locale, 5);
        assert_eq!(cols.region, 6);
        assert_eq!(cols.sender, Some(7));
        assert_eq!(cols.title, Some(8));
        assert_eq!(cols.content, Some(9));
    }

    #[test]
    fn test_template_resolve_english_headers() {
        let sheet = Sheet::new(header(&[
            "Text ID", "Body", "Back", "Link", "Unsubscribe", "Language", "Region",
        ]));
        let cols = TemplateColumns::resolve(&sheet).unwrap();
        assert_eq!(cols.group_id, 0);
        assert_eq!(cols.locale, 5);
        assert_eq!(cols.region, 6);
        assert_eq!(cols.sender, None);
        assert_eq!(cols.title, None);
        assert_eq!(cols.content, None);
    }

    #[test]
    fn test_template_missing_mandatory_columns() {
        let sheet = Sheet::new(header(&["a", "b", "c"]));
        let err = TemplateColumns::resolve(&sheet).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("locale"));
        assert!(msg.contains("region"));
        // group id resolves via fallback index 0, so it is not reported
        assert!(!msg.contains("copy group id"));
    }

    #[test]
    fn test_describe_maps_roles_to_headers() {
        let sheet = Sheet::new(header(&["文案", "正文", "回到", "链接", "退订", "语言", "区域"]));
        let cols = TemplateColumns::resolve(&sheet).unwrap();
        let described = cols.describe(&sheet);

        let locale = described.iter().find(|(role, _)| *role == "locale").unwrap();
        assert_eq!(locale.1.as_deref(), Some("语言"));
        let sender = described.iter().find(|(role, _)| *role == "sender").unwrap();
        assert_eq!(sender.1, None);
    }

    #[test]
    fn test_source_columns_resolve_fallback_first() {
        let sheet = Sheet::new(header(&["whatever"]));
        let cols = SourceColumns::resolve(&sheet).unwrap();
        assert_eq!(cols.link, 0);
    }
}
