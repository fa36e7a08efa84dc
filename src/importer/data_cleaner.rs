// ==========================================
// 冶金产品表观需求台账 - 单元格清洗器
// ==========================================
// 职责: TRIM / 不换行空格标准化 / NULL 标准化 / 去空白比较键
// 使用方: 文件加载器（构造 Cell）、产品表解析、地区占比表
// ==========================================

use crate::domain::grid::Cell;

pub struct DataCleaner;

impl DataCleaner {
    /// 去首尾空白，不换行空格 → 普通空格
    pub fn clean_text(&self, value: &str) -> String {
        value.replace('\u{a0}', " ").trim().to_string()
    }

    /// 空白文本 → None
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let cleaned = self.clean_text(&v);
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        })
    }

    /// 去除全部空白后的比较键（"Прокат  готовый,т" → "Прокатготовый,т"）
    pub fn compact(&self, value: &str) -> String {
        value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
            .collect()
    }

    /// 加载器读到的文本 → Cell（空白 → Empty）
    pub fn clean_cell(&self, value: &str) -> Cell {
        match self.normalize_null(Some(value.to_string())) {
            Some(text) => Cell::Text(text),
            None => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  Руда  "), "Руда");
        assert_eq!(cleaner.clean_text("\u{a0}1\u{a0}234\u{a0}"), "1 234");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("\u{a0}".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some(" Чугун ".to_string())),
            Some("Чугун".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_compact_and_clean_cell() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.compact("Прокат  готовый, т"), "Прокатготовый,т");
        assert_eq!(cleaner.clean_cell("   "), Cell::Empty);
        assert_eq!(cleaner.clean_cell(" 12,5 "), Cell::Text("12,5".to_string()));
    }
}
