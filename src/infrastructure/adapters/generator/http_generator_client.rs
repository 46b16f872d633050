//! HTTP Generator Client - 调用外部生成服务
//!
//! 实现 GeneratorPort trait，通过 HTTP 调用 Gemini 风格的
//! `models/{model}:generateContent` 接口
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent?key={api_key}
//! Request: {"contents": [...], "generationConfig": {...}}  (JSON)
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::application::ports::{AssistContext, AssistMode, GeneratorError, GeneratorPort};
use crate::domain::project::{
    Chapter, Character, Idea, RankingCategory, RankingResult, RankingSource,
};
use crate::domain::revision::AnalysisResult;

/// HTTP 生成客户端配置
#[derive(Debug, Clone)]
pub struct HttpGeneratorConfig {
    /// 生成服务基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 快速模型（创意/角色/辅助/检测/榜单）
    pub model_flash: String,
    /// 高质量模型（大纲）
    pub model_pro: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model_flash: "gemini-3-flash-preview".to_string(),
            model_pro: "gemini-3-pro-preview".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpGeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 生成请求体 (JSON)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// 生成响应体
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateResponse {
    /// 取第一个候选的文本，拼接全部 parts
    fn first_text(&self) -> Result<String, GeneratorError> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeneratorError::InvalidResponse(
                "No response text from generator".to_string(),
            ));
        }
        Ok(text)
    }

    /// 抽取搜索引用来源
    fn sources(&self) -> Vec<RankingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(|chunk| {
                        let web = chunk.web.as_ref()?;
                        Some(RankingSource {
                            title: web.title.clone()?,
                            uri: web.uri.clone()?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 榜单结构化输出（sources 另行从 groundingMetadata 抽取）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankingsWire {
    #[serde(default)]
    categories: Vec<RankingCategory>,
    #[serde(default)]
    trend_analysis: Option<String>,
}

/// HTTP 生成客户端
pub struct HttpGeneratorClient {
    client: Client,
    config: HttpGeneratorConfig,
}

impl HttpGeneratorClient {
    /// 创建新的 HTTP 生成客户端
    pub fn new(config: HttpGeneratorConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        )
    }

    /// 发送一次生成请求
    async fn generate(
        &self,
        model: &str,
        prompt: String,
        system_instruction: Option<&str>,
        generation_config: Option<Value>,
        tools: Option<Value>,
    ) -> Result<GenerateResponse, GeneratorError> {
        let request = GenerateRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: system_instruction.map(Content::text),
            generation_config,
            tools,
        };

        tracing::debug!(model = %model, "Sending generate request");

        let response = self
            .client
            .post(self.generate_url(model))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout
                } else if e.is_connect() {
                    GeneratorError::NetworkError(format!(
                        "Cannot connect to generator service: {}",
                        e
                    ))
                } else {
                    GeneratorError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))
    }

    /// 请求 JSON 结构化输出并反序列化
    async fn generate_json<T: serde::de::DeserializeOwned>(
        &self,
        model: &str,
        prompt: String,
        system_instruction: Option<&str>,
        schema: Value,
    ) -> Result<T, GeneratorError> {
        let config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
        let response = self
            .generate(model, prompt, system_instruction, Some(config), None)
            .await?;
        let text = response.first_text()?;
        serde_json::from_str(&text).map_err(|e| GeneratorError::InvalidResponse(e.to_string()))
    }
}

/// 写作辅助的世界观上下文（创意/角色/近期大纲）
fn world_context(context: &AssistContext) -> String {
    let mut text = String::new();
    if let Some(idea) = &context.idea {
        text.push_str(&format!(
            "小说名：《{}》。核心爽点：{}。金手指：{}。\n",
            idea.title, idea.hook, idea.goldfinger
        ));
    }
    if !context.characters.is_empty() {
        let roster = context
            .characters
            .iter()
            .map(|c| format!("{}({}, {})", c.name, c.role, c.personality))
            .collect::<Vec<_>>()
            .join("、");
        text.push_str(&format!("主要角色：{}。\n", roster));
    }
    if !context.outline.is_empty() {
        let summaries = context
            .outline
            .iter()
            .take(3)
            .map(|c| c.summary.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        text.push_str(&format!("近期大纲参考：{}。\n", summaries));
    }
    text
}

/// 正文末尾的上下文窗口（按字符截取）
fn tail_chars(document: &str, n: usize) -> String {
    let count = document.chars().count();
    document.chars().skip(count.saturating_sub(n)).collect()
}

fn idea_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "吸睛的网文书名" },
            "hook": { "type": "STRING", "description": "一句话核心看点/爽点" },
            "goldfinger": { "type": "STRING", "description": "具体的金手指设定（系统、宝物、天赋等）" },
            "mainConflict": { "type": "STRING", "description": "主要矛盾或最终目标" },
            "targetAudience": { "type": "STRING", "description": "目标读者群体" }
        },
        "required": ["title", "hook", "goldfinger", "mainConflict", "targetAudience"]
    })
}

fn outline_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "number": { "type": "INTEGER" },
                "title": { "type": "STRING", "description": "章节名" },
                "summary": { "type": "STRING", "description": "章节剧情摘要" },
                "pacing": { "type": "STRING", "enum": ["快", "中", "慢"] },
                "keyEvent": { "type": "STRING", "description": "本章关键事件/爽点" }
            },
            "required": ["number", "title", "summary", "pacing", "keyEvent"]
        }
    })
}

fn character_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "角色名字" },
            "role": { "type": "STRING", "description": "角色定位" },
            "archetype": { "type": "STRING", "description": "角色原型/模板" },
            "personality": { "type": "STRING", "description": "性格描述" },
            "backstory": { "type": "STRING", "description": "背景故事" },
            "cheat_ability": { "type": "STRING", "description": "特殊能力/天赋（可选）" }
        },
        "required": ["name", "role", "archetype", "personality", "backstory"]
    })
}

fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "description": "0-100分，分数越高越像AI" },
            "verdict": { "type": "STRING", "description": "简短评价" },
            "humanTraits": { "type": "ARRAY", "items": { "type": "STRING" } },
            "aiTraits": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING", "description": "原文片段" },
                        "suggestion": { "type": "STRING", "description": "首选修改建议" },
                        "alternatives": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "reason": { "type": "STRING", "description": "修改理由" }
                    },
                    "required": ["original", "suggestion", "alternatives", "reason"]
                }
            }
        },
        "required": ["score", "verdict", "humanTraits", "aiTraits", "suggestions"]
    })
}

fn rankings_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "榜单名称，如'月票榜'" },
                        "books": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "rank": { "type": "INTEGER" },
                                    "title": { "type": "STRING" },
                                    "author": { "type": "STRING" },
                                    "genre": { "type": "STRING" },
                                    "heat": { "type": "STRING", "description": "热度数据，如'12万月票'" },
                                    "summary": { "type": "STRING" },
                                    "highlights": { "type": "STRING", "description": "核心看点分析" },
                                    "coverUrl": { "type": "STRING", "description": "封面图片URL，找不到则留空" }
                                },
                                "required": ["rank", "title", "author", "genre", "heat", "summary", "highlights"]
                            }
                        }
                    },
                    "required": ["name", "books"]
                }
            },
            "trendAnalysis": { "type": "STRING", "description": "当前网文市场流行趋势分析" }
        },
        "required": ["categories", "trendAnalysis"]
    })
}

#[async_trait]
impl GeneratorPort for HttpGeneratorClient {
    async fn generate_idea(&self, genre: &str, tone: &str) -> Result<Idea, GeneratorError> {
        if genre.trim().is_empty() || tone.trim().is_empty() {
            return Err(GeneratorError::InvalidInput(
                "分类和基调不能为空".to_string(),
            ));
        }

        let prompt = format!(
            "你是起点中文网的白金作家。\n\
             请在 \"{}\" 分类下，以 \"{}\" 的基调，生成一个具有爆款潜质的网文创意。\n\
             必须符合当前市场风向（黄金三章、爽文节奏）：\n\
             1. 必须要有一个强力的\"金手指\"（系统/独特优势）。\n\
             2. 必须要有清晰的\"爽点\"或核心看点。\n\
             3. 书名要吸睛（网文风格，长标题）。\n\
             请以 JSON 格式输出。内容必须是中文。",
            genre, tone
        );

        self.generate_json(
            &self.config.model_flash,
            prompt,
            Some("你是一位资深的起点中文网网文编辑和风向分析师，精通网文套路。"),
            idea_schema(),
        )
        .await
    }

    async fn generate_outline(&self, idea: &Idea) -> Result<Vec<Chapter>, GeneratorError> {
        let prompt = format!(
            "为以下起点网文创意生成前 5 章的大纲：\n\
             书名：{}\n金手指：{}\n看点：{}\n\n\
             重要要求：前三章必须符合\"黄金三章\"定律：\n\
             1. 第一章：主角登场，展示凄惨/受压迫的现状或巨大危机，引出期待感。\n\
             2. 第一章或第二章：金手指激活，主角获得翻盘希望。\n\
             3. 第三章：小高潮/打脸情节，展示金手指的威力，确立爽点。\n\
             保持快节奏。内容必须是中文。",
            idea.title, idea.goldfinger, idea.hook
        );

        self.generate_json(&self.config.model_pro, prompt, None, outline_schema())
            .await
    }

    async fn generate_character(
        &self,
        role: &str,
        genre: &str,
        outline: Option<&[Chapter]>,
    ) -> Result<Character, GeneratorError> {
        let context_prompt = match outline {
            Some(chapters) if !chapters.is_empty() => {
                let outline_str = chapters
                    .iter()
                    .map(|c| format!("第{}章 {}: {}", c.number, c.title, c.summary))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "【现有大纲剧情参考】\n{}\n\
                     请根据上述大纲剧情来设计这个角色，使其与剧情严丝合缝。\n",
                    outline_str
                )
            }
            _ => String::new(),
        };

        let prompt = format!(
            "为一部 {} 小说创建一个 {} 角色。\n{}\n\
             - 如果是主角：需要有代入感，性格坚毅或腹黑，适合该流派。\n\
             - 如果是反派：需要有具体的仇恨拉取点。\n\
             - 如果是女主/男主：需要有独特的人设标签。\n\
             内容必须是中文。",
            genre, role, context_prompt
        );

        self.generate_json(&self.config.model_flash, prompt, None, character_schema())
            .await
    }

    async fn assist_writing(
        &self,
        document: &str,
        mode: AssistMode,
        context: &AssistContext,
    ) -> Result<String, GeneratorError> {
        let world = world_context(context);
        let base = "你是一个专业的网文写手助手。请模仿起点中文网的白金大神风格：节奏快、有代入感、情绪调动强。";

        let prompt = match mode {
            AssistMode::Continue => format!(
                "{}\n\n【当前世界观与设定】\n{}\n\n\
                 【任务】请续写以下剧情（约200-300字）。\n\
                 要求：紧接上文逻辑通顺；尽量使用已有角色；保持爽文节奏。\n\n\
                 【现有文本】\n{}",
                base,
                if world.is_empty() {
                    "无特定设定，通用网文风格。"
                } else {
                    world.as_str()
                },
                document
            ),
            AssistMode::Polish => format!(
                "{}\n\n【任务】请润色以下文本。\n\
                 要求：去除AI味，增加口语化和画面感；强化情绪冲突；修复语病。\n\n\
                 【文本】\n{}",
                base, document
            ),
            AssistMode::Describe => format!(
                "{}\n\n【当前设定】\n{}\n\n\
                 【任务】基于上下文写一段生动的描写（场景、打斗招式或人物外貌）。\n\
                 要求：画面感强，用词精准，控制在100字以内。\n\n\
                 【上下文】\n{}",
                base,
                world,
                tail_chars(document, 300)
            ),
        };

        let response = self
            .generate(&self.config.model_flash, prompt, None, None, None)
            .await?;
        response.first_text()
    }

    async fn analyze(&self, document: &str) -> Result<AnalysisResult, GeneratorError> {
        let prompt = format!(
            "你是\"朱雀AI检测助手\"，专门服务于网文作者。检测这段文本是否具有浓重的\"AI味\"，\
             并区分\"人工特征\"与\"AI特征\"。\n\
             AI味的典型特征：滥用逻辑连接词；缺乏情绪起伏；描写华丽但空洞；长难句缺乏网文的短句节奏感。\n\
             人工特征：口语化、俚语；强烈的情绪表达；非常具体的细节描写。\n\
             请输出JSON：score（0-100，越高越像AI）、verdict（简短评价）、humanTraits、aiTraits、\
             suggestions（具体到句子的修改建议，含 original/suggestion/alternatives/reason）。\
             请至少提供2-3条具体修改建议。\n\n\
             输入文本：\n{}",
            document
        );

        self.generate_json(&self.config.model_flash, prompt, None, analysis_schema())
            .await
    }

    async fn fetch_rankings(&self) -> Result<RankingResult, GeneratorError> {
        let prompt = "请利用搜索引擎检索\"起点中文网\"最新的榜单数据（确保数据尽可能新）。\n\
             任务：\n\
             1. 搜集月票榜、畅销榜、阅读指数榜、推荐票榜、收藏榜、完本榜 6 个榜单。\n\
             2. 每个榜单提取前 6 本书：排名、书名、作者、类型、热度数值、一句话简介、核心看点。\n\
             3. 尽力寻找每本书的封面图片URL（coverUrl），必须是 http 开头的有效链接，找不到请留空，不要编造。\n\
             4. 对当前整体流行趋势写一段简短分析（trendAnalysis）。\n\
             输出必须是符合 Schema 的 JSON 格式。"
            .to_string();

        let config = json!({
            "responseMimeType": "application/json",
            "responseSchema": rankings_schema(),
        });
        let tools = json!([{ "googleSearch": {} }]);

        let response = self
            .generate(
                &self.config.model_flash,
                prompt,
                None,
                Some(config),
                Some(tools),
            )
            .await?;

        let sources = response.sources();
        let text = response.first_text()?;
        let wire: RankingsWire = serde_json::from_str(&text)
            .map_err(|_| GeneratorError::InvalidResponse("Failed to parse ranking data".to_string()))?;

        Ok(RankingResult {
            categories: wire.categories,
            trend_analysis: wire
                .trend_analysis
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "暂无趋势分析".to_string()),
            sources,
        })
    }
}
