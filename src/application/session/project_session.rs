//! Project Session - 项目会话
//!
//! 顶层组件：独占持有当前项目状态，把任务产物接回状态变更，
//! 并在每次变更后调度自动保存。
//! 正文只通过替换操作或直接编辑被修改，其它组件不持有可写引用

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AssistContext, AssistMode, GeneratorPort, SnapshotStorePort, TaskEntry, TaskKind, TaskOutput,
    TaskRegistryPort,
};
use crate::domain::project::{
    export_to_txt, now_millis, Chapter, Character, Idea, ProjectSnapshot, RankingResult,
};
use crate::domain::revision::{
    self, AnalysisResult, FocusTarget, RevisionError, SuggestionSet,
};

use super::AutosaveHandle;

/// 检测所需的最小正文字数
pub const MIN_ANALYSIS_CHARS: usize = 50;

/// 会话内存状态（创意/大纲/角色/正文）
#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    pub idea: Option<Idea>,
    pub outline: Vec<Chapter>,
    pub characters: Vec<Character>,
    pub content: String,
}

/// 检测视图：报告 + 下标稳定的建议集
///
/// 任务注册表中保留的旧报告不受视图重置影响
#[derive(Debug, Clone)]
pub struct ReviewPanel {
    pub analysis: AnalysisResult,
    pub suggestions: SuggestionSet,
}

/// 项目会话
pub struct ProjectSession {
    state: RwLock<ProjectState>,
    review: RwLock<Option<ReviewPanel>>,
    generator: Arc<dyn GeneratorPort>,
    tasks: Arc<dyn TaskRegistryPort>,
    store: Arc<dyn SnapshotStorePort>,
    autosave: AutosaveHandle,
}

impl ProjectSession {
    pub fn new(
        generator: Arc<dyn GeneratorPort>,
        tasks: Arc<dyn TaskRegistryPort>,
        store: Arc<dyn SnapshotStorePort>,
        autosave: AutosaveHandle,
    ) -> Self {
        Self {
            state: RwLock::new(ProjectState::default()),
            review: RwLock::new(None),
            generator,
            tasks,
            store,
            autosave,
        }
    }

    /// 从存储恢复项目状态（启动时调用）
    pub async fn restore(&self) {
        let snapshot = self.store.load().await;
        let mut state = self.state_write();
        state.idea = snapshot.idea;
        state.outline = snapshot.outline;
        state.characters = snapshot.characters;
        state.content = snapshot.content;
        tracing::info!("Project restored from store");
    }

    fn state_read(&self) -> RwLockReadGuard<'_, ProjectState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, ProjectState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn review_read(&self) -> RwLockReadGuard<'_, Option<ReviewPanel>> {
        self.review.read().unwrap_or_else(|e| e.into_inner())
    }

    fn review_write(&self) -> RwLockWriteGuard<'_, Option<ReviewPanel>> {
        self.review.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 当前状态的拷贝
    pub fn state(&self) -> ProjectState {
        self.state_read().clone()
    }

    /// 当前检测视图的拷贝
    pub fn review(&self) -> Option<ReviewPanel> {
        self.review_read().clone()
    }

    /// 指定任务槽的当前状态
    pub fn task(&self, kind: TaskKind) -> TaskEntry {
        self.tasks.entry(kind)
    }

    /// 当前状态的持久化快照
    pub fn snapshot(&self) -> ProjectSnapshot {
        let state = self.state_read();
        ProjectSnapshot {
            idea: state.idea.clone(),
            outline: state.outline.clone(),
            characters: state.characters.clone(),
            content: state.content.clone(),
            last_modified: now_millis(),
        }
    }

    /// 每次状态变更后调度防抖保存
    fn touch(&self) {
        self.autosave.schedule(self.snapshot());
    }

    // --- 生成任务 ---

    /// 生成小说创意
    pub async fn generate_idea(&self, genre: &str, tone: &str) -> Result<Idea, ApplicationError> {
        if genre.trim().is_empty() || tone.trim().is_empty() {
            return Err(ApplicationError::precondition("请填写完整的分类和基调"));
        }

        let request_id = self.tasks.begin(TaskKind::Idea);
        match self.generator.generate_idea(genre, tone).await {
            Ok(idea) => {
                let adopted = self.tasks.complete(
                    TaskKind::Idea,
                    request_id,
                    TaskOutput::Idea(idea.clone()),
                );
                if adopted {
                    self.state_write().idea = Some(idea.clone());
                    self.touch();
                }
                Ok(idea)
            }
            Err(e) => {
                self.tasks.fail(TaskKind::Idea, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// 生成大纲，要求已有创意
    pub async fn generate_outline(&self) -> Result<Vec<Chapter>, ApplicationError> {
        let idea = self
            .state_read()
            .idea
            .clone()
            .ok_or_else(|| ApplicationError::precondition("请先生成小说创意。"))?;

        let request_id = self.tasks.begin(TaskKind::Outline);
        match self.generator.generate_outline(&idea).await {
            Ok(chapters) => {
                let adopted = self.tasks.complete(
                    TaskKind::Outline,
                    request_id,
                    TaskOutput::Outline(chapters.clone()),
                );
                if adopted {
                    self.state_write().outline = chapters.clone();
                    self.touch();
                }
                Ok(chapters)
            }
            Err(e) => {
                self.tasks.fail(TaskKind::Outline, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// 生成角色并追加到角色列表
    ///
    /// `use_outline` 为真且大纲非空时，把大纲作为剧情参考传给生成服务
    pub async fn generate_character(
        &self,
        role: &str,
        genre: &str,
        use_outline: bool,
    ) -> Result<Character, ApplicationError> {
        let outline = {
            let state = self.state_read();
            if use_outline && !state.outline.is_empty() {
                Some(state.outline.clone())
            } else {
                None
            }
        };

        let request_id = self.tasks.begin(TaskKind::Character);
        match self
            .generator
            .generate_character(role, genre, outline.as_deref())
            .await
        {
            Ok(character) => {
                let adopted = self.tasks.complete(
                    TaskKind::Character,
                    request_id,
                    TaskOutput::Character(character.clone()),
                );
                if adopted {
                    self.state_write().characters.push(character.clone());
                    self.touch();
                }
                Ok(character)
            }
            Err(e) => {
                self.tasks
                    .fail(TaskKind::Character, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// 写作辅助：产物追加到正文末尾
    ///
    /// 润色模式以分隔块追加（保留原文对照），其余模式以空格衔接
    pub async fn assist(&self, mode: AssistMode) -> Result<String, ApplicationError> {
        let (document, context) = {
            let state = self.state_read();
            (
                state.content.clone(),
                AssistContext {
                    idea: state.idea.clone(),
                    characters: state.characters.clone(),
                    outline: state.outline.clone(),
                },
            )
        };

        let request_id = self.tasks.begin(TaskKind::Assist);
        match self
            .generator
            .assist_writing(&document, mode, &context)
            .await
        {
            Ok(text) => {
                let adopted = self.tasks.complete(
                    TaskKind::Assist,
                    request_id,
                    TaskOutput::Assist(text.clone()),
                );
                if adopted {
                    {
                        let mut state = self.state_write();
                        match mode {
                            AssistMode::Polish => {
                                state.content.push_str(&format!(
                                    "\n\n--- 润色版本 ---\n{}\n----------------------\n",
                                    text
                                ));
                            }
                            AssistMode::Continue | AssistMode::Describe => {
                                if !state.content.is_empty() && !state.content.ends_with(' ') {
                                    state.content.push(' ');
                                }
                                state.content.push_str(&text);
                            }
                        }
                    }
                    self.touch();
                }
                Ok(text)
            }
            Err(e) => {
                self.tasks.fail(TaskKind::Assist, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// 检测正文并装载建议视图
    ///
    /// 正文不足 50 字时直接拒绝，任务不进入 Running。
    /// 重新检测会先清空当前视图（忽略集随之重置）
    pub async fn analyze(&self) -> Result<AnalysisResult, ApplicationError> {
        let document = self.state_read().content.clone();
        if document.chars().count() < MIN_ANALYSIS_CHARS {
            return Err(ApplicationError::precondition("请至少输入50字进行检测。"));
        }

        self.reset_suggestion_view();

        let request_id = self.tasks.begin(TaskKind::Analysis);
        match self.generator.analyze(&document).await {
            Ok(result) => {
                let adopted = self.tasks.complete(
                    TaskKind::Analysis,
                    request_id,
                    TaskOutput::Analysis(result.clone()),
                );
                if adopted {
                    *self.review_write() = Some(ReviewPanel {
                        suggestions: SuggestionSet::new(result.suggestions.clone()),
                        analysis: result.clone(),
                    });
                }
                Ok(result)
            }
            Err(e) => {
                self.tasks
                    .fail(TaskKind::Analysis, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// 联网获取榜单，无前置条件，产物只存于任务槽
    pub async fn fetch_rankings(&self) -> Result<RankingResult, ApplicationError> {
        let request_id = self.tasks.begin(TaskKind::Ranking);
        match self.generator.fetch_rankings().await {
            Ok(result) => {
                self.tasks.complete(
                    TaskKind::Ranking,
                    request_id,
                    TaskOutput::Ranking(result.clone()),
                );
                Ok(result)
            }
            Err(e) => {
                self.tasks
                    .fail(TaskKind::Ranking, request_id, e.to_string());
                Err(e.into())
            }
        }
    }

    // --- 建议视图操作 ---

    /// 在正文中定位建议原文，返回选区与滚动偏移
    ///
    /// 片段已被改掉时返回 NotFound，属于良性失败
    pub fn focus_suggestion(&self, index: usize) -> Result<FocusTarget, ApplicationError> {
        let snippet = {
            let review = self.review_read();
            let panel = review
                .as_ref()
                .ok_or_else(|| ApplicationError::internal("no analysis loaded"))?;
            panel
                .suggestions
                .get(index)
                .ok_or_else(|| ApplicationError::internal(format!("no suggestion at {}", index)))?
                .original
                .clone()
        };

        let state = self.state_read();
        revision::focus(&state.content, &snippet)
            .ok_or_else(|| ApplicationError::Revision(RevisionError::NotFound))
    }

    /// 应用一条建议（可指定候选方案，默认首选）
    pub fn apply_suggestion(
        &self,
        index: usize,
        candidate: Option<&str>,
    ) -> Result<(), ApplicationError> {
        let (original, replacement) = {
            let review = self.review_read();
            let panel = review
                .as_ref()
                .ok_or_else(|| ApplicationError::internal("no analysis loaded"))?;
            let suggestion = panel
                .suggestions
                .get(index)
                .ok_or_else(|| ApplicationError::internal(format!("no suggestion at {}", index)))?;
            let replacement = match candidate {
                Some(c) => suggestion.select(c)?.to_string(),
                None => suggestion.primary_suggestion.clone(),
            };
            (suggestion.original.clone(), replacement)
        };

        self.apply_replacement(&original, &replacement)
    }

    /// 替换正文中 `original` 的首次出现
    pub fn apply_replacement(
        &self,
        original: &str,
        replacement: &str,
    ) -> Result<(), ApplicationError> {
        {
            let mut state = self.state_write();
            let revised = revision::apply(&state.content, original, replacement)?;
            state.content = revised;
        }
        self.touch();
        Ok(())
    }

    /// 忽略一条建议（以原始下标为键，幂等）
    pub fn ignore_suggestion(&self, index: usize) {
        if let Some(panel) = self.review_write().as_mut() {
            panel.suggestions.ignore(index);
        }
    }

    /// 清空忽略集并卸下当前检测结果（重新检测前调用）
    pub fn reset_suggestion_view(&self) {
        *self.review_write() = None;
    }

    // --- 正文与项目生命周期 ---

    /// 直接编辑正文
    pub fn set_content(&self, content: impl Into<String>) {
        self.state_write().content = content.into();
        self.touch();
    }

    /// 导入外部文本，覆盖当前正文
    pub fn import_text(&self, text: impl Into<String>) {
        self.set_content(text);
    }

    /// 导出 TXT 备份，没有创意时返回 None
    pub fn export_txt(&self) -> Option<String> {
        export_to_txt(&self.snapshot())
    }

    /// 显式保存，绕过防抖计时
    pub fn save_now(&self) {
        self.autosave.save_now(self.snapshot());
    }

    /// 清空项目：删除持久化记录并重置内存状态
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        self.store
            .clear()
            .await
            .map_err(|e| ApplicationError::internal(e.to_string()))?;
        *self.state_write() = ProjectState::default();
        *self.review_write() = None;
        tracing::info!("Project cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GeneratorError, StoreError, TaskStatus};
    use crate::application::session::SaveRequest;
    use crate::infrastructure::adapters::FakeGeneratorClient;
    use crate::infrastructure::memory::InMemoryTaskRegistry;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// 只在内存中记录快照的测试存储
    #[derive(Default)]
    struct MemoryStore {
        record: Mutex<Option<ProjectSnapshot>>,
    }

    #[async_trait]
    impl SnapshotStorePort for MemoryStore {
        async fn persist(&self, snapshot: &ProjectSnapshot) -> Result<(), StoreError> {
            *self.record.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        async fn load(&self) -> ProjectSnapshot {
            self.record
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(ProjectSnapshot::empty)
        }

        async fn clear(&self) -> Result<(), StoreError> {
            *self.record.lock().unwrap() = None;
            Ok(())
        }
    }

    /// 所有调用都失败的生成服务
    struct FailingGenerator;

    #[async_trait]
    impl GeneratorPort for FailingGenerator {
        async fn generate_idea(&self, _: &str, _: &str) -> Result<Idea, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }

        async fn generate_outline(&self, _: &Idea) -> Result<Vec<Chapter>, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }

        async fn generate_character(
            &self,
            _: &str,
            _: &str,
            _: Option<&[Chapter]>,
        ) -> Result<Character, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }

        async fn assist_writing(
            &self,
            _: &str,
            _: AssistMode,
            _: &AssistContext,
        ) -> Result<String, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }

        async fn analyze(&self, _: &str) -> Result<AnalysisResult, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }

        async fn fetch_rankings(&self) -> Result<RankingResult, GeneratorError> {
            Err(GeneratorError::ServiceError("quota exceeded".to_string()))
        }
    }

    /// 按预置的 (延迟, 书名) 队列响应创意请求
    struct SlowIdeaGenerator {
        replies: Mutex<VecDeque<(u64, String)>>,
    }

    impl SlowIdeaGenerator {
        fn new(replies: Vec<(u64, &str)>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|(d, t)| (d, t.to_string()))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl GeneratorPort for SlowIdeaGenerator {
        async fn generate_idea(&self, _: &str, _: &str) -> Result<Idea, GeneratorError> {
            let (delay_ms, title) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply");
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
            Ok(Idea {
                title,
                hook: "hook".to_string(),
                goldfinger: "goldfinger".to_string(),
                main_conflict: "conflict".to_string(),
                target_audience: "audience".to_string(),
            })
        }

        async fn generate_outline(&self, _: &Idea) -> Result<Vec<Chapter>, GeneratorError> {
            unreachable!()
        }

        async fn generate_character(
            &self,
            _: &str,
            _: &str,
            _: Option<&[Chapter]>,
        ) -> Result<Character, GeneratorError> {
            unreachable!()
        }

        async fn assist_writing(
            &self,
            _: &str,
            _: AssistMode,
            _: &AssistContext,
        ) -> Result<String, GeneratorError> {
            unreachable!()
        }

        async fn analyze(&self, _: &str) -> Result<AnalysisResult, GeneratorError> {
            unreachable!()
        }

        async fn fetch_rankings(&self) -> Result<RankingResult, GeneratorError> {
            unreachable!()
        }
    }

    struct TestHarness {
        session: Arc<ProjectSession>,
        store: Arc<MemoryStore>,
        // 保持接收端存活，入队才能成功
        _autosave_rx: mpsc::Receiver<SaveRequest>,
    }

    fn harness_with(generator: Arc<dyn GeneratorPort>) -> TestHarness {
        let (tx, rx) = mpsc::channel(100);
        let store = Arc::new(MemoryStore::default());
        let session = Arc::new(ProjectSession::new(
            generator,
            Arc::new(InMemoryTaskRegistry::new()),
            store.clone(),
            AutosaveHandle::new(tx),
        ));
        TestHarness {
            session,
            store,
            _autosave_rx: rx,
        }
    }

    fn harness() -> TestHarness {
        harness_with(Arc::new(FakeGeneratorClient::instant()))
    }

    #[tokio::test]
    async fn test_generate_idea_replaces_state() {
        let h = harness();
        let idea = h.session.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap();
        assert_eq!(h.session.state().idea, Some(idea));
        assert_eq!(h.session.task(TaskKind::Idea).status, TaskStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_idea_precondition_empty_inputs() {
        let h = harness();
        let err = h.session.generate_idea("", "打脸/爽文").await.unwrap_err();
        assert!(err.is_precondition());
        // 任务未进入 Running
        assert_eq!(h.session.task(TaskKind::Idea).status, TaskStatus::Idle);
    }

    #[tokio::test]
    async fn test_outline_requires_idea() {
        let h = harness();
        let err = h.session.generate_outline().await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(h.session.task(TaskKind::Outline).status, TaskStatus::Idle);

        h.session.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap();
        let chapters = h.session.generate_outline().await.unwrap();
        assert!(!chapters.is_empty());
        assert_eq!(h.session.state().outline, chapters);
    }

    #[tokio::test]
    async fn test_generate_character_appends() {
        let h = harness();
        h.session
            .generate_character("主角", "仙侠/修真", true)
            .await
            .unwrap();
        h.session
            .generate_character("反派", "仙侠/修真", false)
            .await
            .unwrap();
        assert_eq!(h.session.state().characters.len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_precondition_short_document() {
        let h = harness();
        h.session.set_content("太短了。");
        let err = h.session.analyze().await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(h.session.task(TaskKind::Analysis).status, TaskStatus::Idle);
    }

    #[tokio::test]
    async fn test_analysis_installs_review() {
        let h = harness();
        h.session.set_content("他慢慺地走向森林。".repeat(10));
        let result = h.session.analyze().await.unwrap();
        let review = h.session.review().unwrap();
        assert_eq!(review.analysis, result);
        assert_eq!(review.suggestions.len(), result.suggestions.len());
    }

    #[tokio::test]
    async fn test_failure_preserves_prior_output() {
        let h = harness();
        let idea = h.session.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap();

        // 换成必然失败的生成服务，复用同一个任务注册表
        let failing = ProjectSession::new(
            Arc::new(FailingGenerator),
            h.session.tasks.clone(),
            h.store.clone(),
            h.session.autosave.clone(),
        );
        let err = failing.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Generator(_)));

        let entry = failing.task(TaskKind::Idea);
        assert_eq!(entry.status, TaskStatus::Failed);
        assert_eq!(entry.error.as_deref(), Some("Service error: quota exceeded"));
        // 上一次成功的产物原样保留
        assert_eq!(entry.output, Some(TaskOutput::Idea(idea)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_idea_invocations_latest_issued_wins() {
        // 第一次调用 2000ms 后返回 A，第二次调用 1000ms 后返回 B。
        // B 是最新发出的请求，先到且被采纳；A 虽然最后返回，但作为过期响应被丢弃
        let h = harness_with(Arc::new(SlowIdeaGenerator::new(vec![
            (2000, "A"),
            (1000, "B"),
        ])));

        let s1 = h.session.clone();
        let first = tokio::spawn(async move { s1.generate_idea("都市/系统", "打脸/爽文").await });
        tokio::task::yield_now().await;

        let s2 = h.session.clone();
        let second = tokio::spawn(async move { s2.generate_idea("都市/系统", "打脸/爽文").await });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let state = h.session.state();
        assert_eq!(state.idea.unwrap().title, "B");
        match h.session.task(TaskKind::Idea).output {
            Some(TaskOutput::Idea(idea)) => assert_eq!(idea.title, "B"),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_apply_suggestion_flow() {
        let h = harness();
        h.session
            .set_content(format!("{}他慢慺地走向森林。", "前文铺垫。".repeat(10)));
        h.session.analyze().await.unwrap();

        // FakeGeneratorClient 的建议针对 "慢慺地"
        h.session.apply_suggestion(0, None).unwrap();
        assert!(h.session.state().content.contains("飞快地"));

        // 片段已被替换，重复应用属于良性失败，正文不变
        let before = h.session.state().content;
        let err = h.session.apply_suggestion(0, None).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Revision(RevisionError::NotFound)
        ));
        assert_eq!(h.session.state().content, before);
    }

    #[tokio::test]
    async fn test_apply_suggestion_rejects_foreign_candidate() {
        let h = harness();
        h.session
            .set_content(format!("{}他慢慺地走向森林。", "前文铺垫。".repeat(10)));
        h.session.analyze().await.unwrap();

        let err = h.session.apply_suggestion(0, Some("没见过的方案")).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Revision(RevisionError::UnknownCandidate(_))
        ));
    }

    #[tokio::test]
    async fn test_focus_suggestion_locates_snippet() {
        let h = harness();
        h.session
            .set_content(format!("{}\n他慢慺地走向森林。", "前文铺垫。".repeat(10)));
        h.session.analyze().await.unwrap();

        let target = h.session.focus_suggestion(0).unwrap();
        let content = h.session.state().content;
        assert_eq!(&content[target.range], "慢慺地");

        // 片段被改掉后定位失败，属于良性失败
        h.session.apply_suggestion(0, None).unwrap();
        let err = h.session.focus_suggestion(0).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Revision(RevisionError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_ignore_and_reset_view() {
        let h = harness();
        h.session
            .set_content(format!("{}他慢慺地走向森林。", "前文铺垫。".repeat(10)));
        h.session.analyze().await.unwrap();

        h.session.ignore_suggestion(0);
        h.session.ignore_suggestion(0);
        let review = h.session.review().unwrap();
        assert!(review.suggestions.is_ignored(0));

        h.session.reset_suggestion_view();
        assert!(h.session.review().is_none());
    }

    #[tokio::test]
    async fn test_assist_polish_appends_block() {
        let h = harness();
        h.session.set_content("原始正文。");
        let text = h.session.assist(AssistMode::Polish).await.unwrap();
        let content = h.session.state().content;
        assert!(content.starts_with("原始正文。"));
        assert!(content.contains("--- 润色版本 ---"));
        assert!(content.contains(&text));
    }

    #[tokio::test]
    async fn test_assist_continue_appends_with_space() {
        let h = harness();
        h.session.set_content("上文。");
        let text = h.session.assist(AssistMode::Continue).await.unwrap();
        assert_eq!(h.session.state().content, format!("上文。 {}", text));
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let h = harness();
        h.session.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap();
        h.session.set_content("一些正文");
        h.session.clear().await.unwrap();

        let state = h.session.state();
        assert!(state.idea.is_none());
        assert_eq!(state.content, "");
        assert!(h.store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_export_requires_idea() {
        let h = harness();
        assert!(h.session.export_txt().is_none());
        h.session.generate_idea("仙侠/修真", "打脸/爽文").await.unwrap();
        let text = h.session.export_txt().unwrap();
        assert!(text.contains("=== 正文 ==="));
    }
}
