//! Revision Context - 定位与替换
//!
//! 纯文本操作：精确子串匹配，不做任何归一化或模糊匹配。
//! 建议产出后正文可能已被自由编辑，偏移量会悄悄漂移，
//! 所以每次调用都对当前正文重新扫描，匹配失败以 NotFound 显式上报

use std::ops::Range;

use super::RevisionError;

/// 每行高度估算（像素）
pub const LINE_HEIGHT: u32 = 28;

/// 定位时上方预留的滚动边距（像素）
pub const FOCUS_MARGIN: u32 = 100;

/// 编辑器定位目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget {
    /// 匹配片段的字节区间（选区）
    pub range: Range<usize>,
    /// 建议滚动偏移（像素，≥ 0）
    pub scroll_offset: u32,
}

/// 返回 `snippet` 在 `document` 中首次出现的字节区间
///
/// 精确、大小写敏感；空片段或未找到返回 None
pub fn locate(document: &str, snippet: &str) -> Option<Range<usize>> {
    if snippet.is_empty() {
        return None;
    }
    document
        .find(snippet)
        .map(|start| start..start + snippet.len())
}

/// 定位片段并计算编辑器滚动偏移
///
/// 偏移 = 匹配前行数 × 行高 - 边距，下限为 0。
/// 未找到是良性失败，正文不受影响
pub fn focus(document: &str, snippet: &str) -> Option<FocusTarget> {
    let range = locate(document, snippet)?;
    let lines = document[..range.start].matches('\n').count() as u32 + 1;
    let scroll_offset = (lines * LINE_HEIGHT).saturating_sub(FOCUS_MARGIN);
    Some(FocusTarget {
        range,
        scroll_offset,
    })
}

/// 仅替换 `original` 的首次出现
///
/// `original` 不存在时返回 NotFound，调用方正文保持不变；
/// 后续出现的相同片段一律不动。同一批建议可以无协调地逐条调用，
/// 先前的替换可能使后来的建议合法地失配
pub fn apply(document: &str, original: &str, replacement: &str) -> Result<String, RevisionError> {
    if original.is_empty() || !document.contains(original) {
        return Err(RevisionError::NotFound);
    }
    Ok(document.replacen(original, replacement, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_occurrence() {
        let doc = "他说：你好。她说：你好。";
        let range = locate(doc, "你好").unwrap();
        assert_eq!(&doc[range.clone()], "你好");
        // 第一次出现（"他说：" = 3 个汉字 + 冒号，各 3 字节）
        assert_eq!(range.start, 9);
    }

    #[test]
    fn test_locate_not_found() {
        assert!(locate("他慢慢地走。", "飞快地").is_none());
    }

    #[test]
    fn test_locate_empty_snippet() {
        assert!(locate("正文", "").is_none());
    }

    #[test]
    fn test_locate_then_apply_succeeds() {
        let doc = "望着测验魔石碑，少年面无表情。";
        let range = locate(doc, "面无表情").unwrap();
        assert_eq!(&doc[range], "面无表情");
        let revised = apply(doc, "面无表情", "咬紧牙关").unwrap();
        assert_eq!(revised, "望着测验魔石碑，少年咬紧牙关。");
    }

    #[test]
    fn test_apply_scenario() {
        let doc = "他慢慺地走向森林。";
        let revised = apply(doc, "慢慺地", "飞快地").unwrap();
        assert_eq!(revised, "他飞快地走向森林。");
    }

    #[test]
    fn test_apply_not_found_leaves_document() {
        let doc = "他慢慢地走向森林。";
        let err = apply(doc, "慢慺地", "飞快地").unwrap_err();
        assert_eq!(err, RevisionError::NotFound);
        // 调用方正文未被触碰
        assert_eq!(doc, "他慢慢地走向森林。");
    }

    #[test]
    fn test_apply_only_first_occurrence() {
        let doc = "好的，好的，我知道了。";
        let revised = apply(doc, "好的", "行").unwrap();
        assert_eq!(revised, "行，好的，我知道了。");
    }

    #[test]
    fn test_apply_empty_original_is_not_found() {
        assert_eq!(apply("正文", "", "x").unwrap_err(), RevisionError::NotFound);
    }

    #[test]
    fn test_focus_scroll_offset() {
        let doc = "第一行\n第二行\n第三行的目标片段";
        let target = focus(doc, "目标片段").unwrap();
        // 匹配前有 2 个换行 → 第 3 行，3 * 28 - 100 = -16 → 0
        assert_eq!(target.scroll_offset, 0);
        assert_eq!(&doc[target.range], "目标片段");
    }

    #[test]
    fn test_focus_scroll_offset_deep_in_document() {
        let mut doc = String::new();
        for i in 0..10 {
            doc.push_str(&format!("第{}行内容\n", i));
        }
        doc.push_str("目标");
        let target = focus(&doc, "目标").unwrap();
        // 第 11 行，11 * 28 - 100 = 208
        assert_eq!(target.scroll_offset, 208);
    }

    #[test]
    fn test_focus_not_found_is_benign() {
        assert!(focus("正文", "不存在").is_none());
    }
}
