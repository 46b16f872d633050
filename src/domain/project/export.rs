//! Project Context - 文本导出
//!
//! 将项目快照渲染为可下载的纯文本备份

use super::ProjectSnapshot;

/// 将项目渲染为 TXT 备份文本
///
/// 没有创意时无可导出内容，返回 None
pub fn export_to_txt(snapshot: &ProjectSnapshot) -> Option<String> {
    let idea = snapshot.idea.as_ref()?;

    let mut text = String::new();
    text.push_str(&format!("书名：{}\n", idea.title));
    text.push_str(&format!("核心爽点：{}\n", idea.hook));
    text.push_str(&format!("金手指：{}\n\n", idea.goldfinger));

    text.push_str("=== 角色设定 ===\n");
    for c in &snapshot.characters {
        text.push_str(&format!("{} ({}): {}\n", c.name, c.role, c.personality));
    }

    text.push_str("\n=== 大纲 ===\n");
    for ch in &snapshot.outline {
        text.push_str(&format!("第{}章 {}: {}\n", ch.number, ch.title, ch.summary));
    }

    text.push_str("\n=== 正文 ===\n");
    text.push_str(&snapshot.content);

    Some(text)
}

/// 导出文件名（`<书名>_backup.txt`）
pub fn export_file_name(snapshot: &ProjectSnapshot) -> String {
    let title = snapshot
        .idea
        .as_ref()
        .map(|i| i.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("novel");
    format!("{}_backup.txt", title)
}
