//! Fake Generator Client - 用于测试与离线运行的生成客户端
//!
//! 始终返回固定的中文内容，不实际调用生成服务

use async_trait::async_trait;

use crate::application::ports::{AssistContext, AssistMode, GeneratorError, GeneratorPort};
use crate::domain::project::{
    Chapter, Character, Idea, Pacing, RankingBook, RankingCategory, RankingResult,
};
use crate::domain::revision::{AnalysisResult, Suggestion};

/// Fake Generator Client 配置
#[derive(Debug, Clone)]
pub struct FakeGeneratorConfig {
    /// 模拟延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeGeneratorConfig {
    fn default() -> Self {
        Self { delay_ms: 200 }
    }
}

/// Fake Generator Client
///
/// 用于测试，始终返回固定的生成内容
pub struct FakeGeneratorClient {
    config: FakeGeneratorConfig,
}

impl FakeGeneratorClient {
    pub fn new(config: FakeGeneratorConfig) -> Self {
        tracing::info!(delay_ms = config.delay_ms, "FakeGeneratorClient initialized");
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeGeneratorConfig::default())
    }

    /// 无延迟版本（测试用）
    pub fn instant() -> Self {
        Self::new(FakeGeneratorConfig { delay_ms: 0 })
    }

    /// 模拟生成延迟
    async fn simulate_latency(&self) {
        if self.config.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.delay_ms)).await;
        }
    }
}

#[async_trait]
impl GeneratorPort for FakeGeneratorClient {
    async fn generate_idea(&self, genre: &str, tone: &str) -> Result<Idea, GeneratorError> {
        if genre.trim().is_empty() || tone.trim().is_empty() {
            return Err(GeneratorError::InvalidInput(
                "分类和基调不能为空".to_string(),
            ));
        }
        self.simulate_latency().await;

        Ok(Idea {
            title: format!("我在{}世界当卷王", genre),
            hook: "开局觉醒签到系统，躺平也能变强。".to_string(),
            goldfinger: "每日签到系统，打卡即得修为。".to_string(),
            main_conflict: "废柴少年被宗门除名，誓要打回山门。".to_string(),
            target_audience: format!("喜欢{}节奏的读者", tone),
        })
    }

    async fn generate_outline(&self, idea: &Idea) -> Result<Vec<Chapter>, GeneratorError> {
        self.simulate_latency().await;

        Ok(vec![
            Chapter {
                number: 1,
                title: "陨落的天才".to_string(),
                summary: format!("主角登场，{}的日常被打破。", idea.title),
                pacing: Pacing::Fast,
                key_event: "当众受辱，埋下期待感。".to_string(),
            },
            Chapter {
                number: 2,
                title: "金手指觉醒".to_string(),
                summary: "绝境之中，系统激活。".to_string(),
                pacing: Pacing::Fast,
                key_event: idea.goldfinger.clone(),
            },
            Chapter {
                number: 3,
                title: "第一次打脸".to_string(),
                summary: "小高潮，展示金手指的威力。".to_string(),
                pacing: Pacing::Medium,
                key_event: "当众反杀，确立爽点。".to_string(),
            },
        ])
    }

    async fn generate_character(
        &self,
        role: &str,
        genre: &str,
        outline: Option<&[Chapter]>,
    ) -> Result<Character, GeneratorError> {
        self.simulate_latency().await;

        let backstory = match outline {
            Some(chapters) if !chapters.is_empty() => {
                format!("与大纲第{}章的剧情紧密相关。", chapters[0].number)
            }
            _ => format!("一个典型的{}世界出身。", genre),
        };

        Ok(Character {
            name: "林晚舟".to_string(),
            role: role.to_string(),
            archetype: "废柴逆袭".to_string(),
            personality: "外冷内热，杀伐果断。".to_string(),
            backstory,
            cheat_ability: Some("过目不忘".to_string()),
        })
    }

    async fn assist_writing(
        &self,
        _document: &str,
        mode: AssistMode,
        _context: &AssistContext,
    ) -> Result<String, GeneratorError> {
        self.simulate_latency().await;

        let text = match mode {
            AssistMode::Continue => "他深吸一口气，指尖的灵力骤然炸开，整座演武场为之一静。",
            AssistMode::Polish => "他咬了咬牙，眼底的狠劲再也压不住了。",
            AssistMode::Describe => "剑光如瀑，寒意顺着脊背炸起，整个人像被钉在原地。",
        };
        Ok(text.to_string())
    }

    async fn analyze(&self, _document: &str) -> Result<AnalysisResult, GeneratorError> {
        self.simulate_latency().await;

        Ok(AnalysisResult {
            score: 72,
            verdict: "略显生硬".to_string(),
            human_traits: vec!["有具体的动作细节".to_string()],
            ai_traits: vec![
                "连接词偏书面".to_string(),
                "长句偏多，缺乏网文短句节奏".to_string(),
            ],
            suggestions: vec![Suggestion {
                original: "慢慺地".to_string(),
                primary_suggestion: "飞快地".to_string(),
                alternatives: vec!["缓缓地".to_string()],
                reason: "原词用字生造，替换后更通顺。".to_string(),
            }],
        })
    }

    async fn fetch_rankings(&self) -> Result<RankingResult, GeneratorError> {
        self.simulate_latency().await;

        Ok(RankingResult {
            categories: vec![RankingCategory {
                name: "月票榜".to_string(),
                books: vec![RankingBook {
                    rank: 1,
                    title: "宿命之环".to_string(),
                    author: "爱潜水的乌贼".to_string(),
                    genre: "西幻".to_string(),
                    heat: "100万月票".to_string(),
                    summary: "蒸汽与机械的浪潮中，命运的齿轮开始转动。".to_string(),
                    highlights: "设定宏大，伏笔回收爽感极强。".to_string(),
                    cover_url: None,
                }],
            }],
            trend_analysis: "脑洞流与传统仙侠并行，快节奏打脸文依旧是基本盘。".to_string(),
            sources: Vec::new(),
        })
    }
}
