//! Revision Context - 修改建议与建议集
//!
//! 建议由检测服务产出后不可变；忽略集以原始下标为键，
//! 过滤视图不改变下标含义

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::RevisionError;

/// 单条修改建议
///
/// `original` 是检测时正文的字面片段，不保证在应用时仍然存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// 原文中有问题的片段
    pub original: String,
    /// 首选修改方案（线上格式历史名为 `suggestion`）
    #[serde(alias = "suggestion")]
    pub primary_suggestion: String,
    /// 备选修改方案
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// 修改理由
    pub reason: String,
}

impl Suggestion {
    /// 候选集：首选方案 + 所有备选
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_suggestion.as_str())
            .chain(self.alternatives.iter().map(String::as_str))
    }

    /// 校验并返回候选方案
    ///
    /// 候选必须属于该建议自身的候选集，集外值直接拒绝
    pub fn select<'a>(&'a self, candidate: &str) -> Result<&'a str, RevisionError> {
        self.candidates()
            .find(|c| *c == candidate)
            .ok_or_else(|| RevisionError::UnknownCandidate(candidate.to_string()))
    }
}

/// 检测报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0-100，分数越高越像 AI
    pub score: u8,
    /// 简短评价，如 "一眼假"、"浑然天成"
    pub verdict: String,
    /// 检测到的人工写作特征
    #[serde(default)]
    pub human_traits: Vec<String>,
    /// 检测到的 AI 写作特征
    #[serde(default)]
    pub ai_traits: Vec<String>,
    /// 具体修改建议
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// 建议集 - 下标稳定的建议列表 + 忽略集
///
/// 不变量:
/// - `items` 创建后不增删、不重排
/// - 忽略以原始下标为键，加入后不再移除（除非整体重置）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    items: Vec<Suggestion>,
    ignored: HashSet<usize>,
}

impl SuggestionSet {
    pub fn new(items: Vec<Suggestion>) -> Self {
        Self {
            items,
            ignored: HashSet::new(),
        }
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 忽略指定下标的建议，幂等
    pub fn ignore(&mut self, index: usize) {
        self.ignored.insert(index);
    }

    pub fn is_ignored(&self, index: usize) -> bool {
        self.ignored.contains(&index)
    }

    /// 可见建议：按原始下标过滤忽略集
    pub fn active(&self) -> impl Iterator<Item = (usize, &Suggestion)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.ignored.contains(index))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// 所有建议均已忽略
    pub fn is_exhausted(&self) -> bool {
        self.active().next().is_none()
    }

    /// 清空忽略集（重新检测时使用）
    pub fn reset(&mut self) {
        self.ignored.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_suggestion() -> Suggestion {
        Suggestion {
            original: "慢慺地".to_string(),
            primary_suggestion: "飞快地".to_string(),
            alternatives: vec!["缓缓地".to_string(), "急匆匆地".to_string()],
            reason: "原词不通顺".to_string(),
        }
    }

    #[test]
    fn test_select_primary() {
        let s = sample_suggestion();
        assert_eq!(s.select("飞快地").unwrap(), "飞快地");
    }

    #[test]
    fn test_select_alternative() {
        let s = sample_suggestion();
        assert_eq!(s.select("缓缓地").unwrap(), "缓缓地");
    }

    #[test]
    fn test_select_rejects_out_of_set() {
        let s = sample_suggestion();
        let err = s.select("随便写的").unwrap_err();
        assert_eq!(err, RevisionError::UnknownCandidate("随便写的".to_string()));
    }

    #[test]
    fn test_ignore_idempotent() {
        let mut set = SuggestionSet::new(vec![sample_suggestion(), sample_suggestion()]);
        set.ignore(0);
        let after_first = set.clone();
        set.ignore(0);
        assert_eq!(set, after_first);
        assert_eq!(set.active_count(), 1);
    }

    #[test]
    fn test_ignore_order_independent() {
        let items = vec![sample_suggestion(), sample_suggestion(), sample_suggestion()];
        let mut a = SuggestionSet::new(items.clone());
        let mut b = SuggestionSet::new(items);
        a.ignore(2);
        a.ignore(0);
        b.ignore(0);
        b.ignore(2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_active_keeps_original_indices() {
        let mut set = SuggestionSet::new(vec![
            sample_suggestion(),
            sample_suggestion(),
            sample_suggestion(),
        ]);
        set.ignore(1);
        let indices: Vec<usize> = set.active().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_exhausted() {
        let mut set = SuggestionSet::new(vec![sample_suggestion()]);
        assert!(!set.is_exhausted());
        set.ignore(0);
        assert!(set.is_exhausted());
        set.reset();
        assert!(!set.is_exhausted());
    }

    #[test]
    fn test_wire_alias_for_primary() {
        let json = r#"{
            "original": "首先",
            "suggestion": "开头",
            "alternatives": [],
            "reason": "去除AI味"
        }"#;
        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.primary_suggestion, "开头");

        let value = serde_json::to_value(&s).unwrap();
        assert!(value.get("primarySuggestion").is_some());
    }
}
