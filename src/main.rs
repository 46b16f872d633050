//! Zaomeng - 网文创作助手
//!
//! 命令行入口：加载配置、初始化日志、组装会话，
//! 每个子命令对应会话的一个操作

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;

use zaomeng::application::ports::{AssistMode, GeneratorPort};
use zaomeng::application::session::{AutosaveHandle, ProjectSession};
use zaomeng::config::{load_config, load_config_from_path, print_config};
use zaomeng::domain::project::{export_file_name, GENRE_PRESETS, TONE_PRESETS};
use zaomeng::infrastructure::adapters::{
    FakeGeneratorClient, HttpGeneratorClient, HttpGeneratorConfig,
};
use zaomeng::infrastructure::memory::InMemoryTaskRegistry;
use zaomeng::infrastructure::persistence::sled::SledSnapshotStore;
use zaomeng::infrastructure::worker::{AutosaveWorker, AutosaveWorkerConfig};

#[derive(Debug, Parser)]
#[command(name = "zaomeng", version, about = "起点风网文创作助手核心引擎")]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 生成小说创意
    Idea {
        /// 小说分类（如 "仙侠/修真"，支持自定义）
        #[arg(long)]
        genre: String,
        /// 故事基调（如 "打脸/爽文"，支持自定义）
        #[arg(long)]
        tone: String,
    },
    /// 基于当前创意生成大纲（黄金三章）
    Outline,
    /// 生成角色设定
    Character {
        /// 角色定位
        #[arg(long, default_value = "主角")]
        role: String,
        /// 小说分类，缺省时使用第一个预置分类
        #[arg(long)]
        genre: Option<String>,
        /// 不参考现有大纲
        #[arg(long)]
        no_outline: bool,
    },
    /// 写作辅助：续写/润色/描写，结果追加到正文
    Assist {
        #[arg(value_enum)]
        mode: AssistModeArg,
    },
    /// 检测正文的 AI 味并列出修改建议
    Analyze,
    /// 联网获取榜单与趋势分析
    Rankings,
    /// 替换正文中首次出现的片段
    Revise {
        /// 要替换的原文片段
        #[arg(long)]
        original: String,
        /// 替换内容
        #[arg(long)]
        replacement: String,
    },
    /// 导入文本文件，覆盖当前正文
    Import {
        /// 文本文件路径 (txt/md)
        file: PathBuf,
    },
    /// 查看项目状态
    Status,
    /// 导出 TXT 备份
    Export {
        /// 输出路径，缺省为 <书名>_backup.txt
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// 立即保存项目
    Save,
    /// 清空项目（删除持久化记录）
    Clear,
    /// 列出预置的分类与基调
    Presets,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AssistModeArg {
    /// 智能续写
    Continue,
    /// 文笔润色
    Polish,
    /// 场景/打斗描写
    Describe,
}

impl From<AssistModeArg> for AssistMode {
    fn from(arg: AssistModeArg) -> Self {
        match arg {
            AssistModeArg::Continue => AssistMode::Continue,
            AssistModeArg::Polish => AssistMode::Polish,
            AssistModeArg::Describe => AssistMode::Describe,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path))?,
        None => load_config()?,
    };

    // 初始化日志
    let log_filter = format!("{},zaomeng={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.storage.snapshot_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化存储与任务注册表
    let store = SledSnapshotStore::open(&config.storage.snapshot_path)?.arc();
    let registry = InMemoryTaskRegistry::new().arc();

    // 启动自动保存 Worker
    let (autosave_tx, autosave_rx) = mpsc::channel(100);
    let worker = AutosaveWorker::new(
        AutosaveWorkerConfig {
            debounce_ms: config.autosave.debounce_ms,
        },
        autosave_rx,
        store.clone(),
    );
    let worker_handle = tokio::spawn(worker.run());

    // 选择生成客户端
    let generator: Arc<dyn GeneratorPort> = if config.generator.offline {
        Arc::new(FakeGeneratorClient::with_defaults())
    } else {
        Arc::new(HttpGeneratorClient::new(HttpGeneratorConfig {
            base_url: config.generator.base_url.clone(),
            api_key: config.generator.api_key.clone(),
            model_flash: config.generator.model_flash.clone(),
            model_pro: config.generator.model_pro.clone(),
            timeout_secs: config.generator.timeout_secs,
        })?)
    };

    // 组装会话并恢复项目
    let session = ProjectSession::new(generator, registry, store, AutosaveHandle::new(autosave_tx));
    session.restore().await;

    let result = run_command(cli.command, &session).await;

    // 关闭自动保存队列：挂起的快照在 Worker 退出前落盘
    drop(session);
    worker_handle.await?;

    result
}

async fn run_command(command: Command, session: &ProjectSession) -> anyhow::Result<()> {
    match command {
        Command::Idea { genre, tone } => {
            let idea = session.generate_idea(&genre, &tone).await?;
            println!("书名：{}", idea.title);
            println!("核心看点：{}", idea.hook);
            println!("金手指：{}", idea.goldfinger);
            println!("主要冲突：{}", idea.main_conflict);
            println!("目标读者：{}", idea.target_audience);
        }
        Command::Outline => {
            let chapters = session.generate_outline().await?;
            for chapter in chapters {
                println!(
                    "第{}章 {} [{}节奏]\n  {}\n  关键事件：{}",
                    chapter.number, chapter.title, chapter.pacing, chapter.summary, chapter.key_event
                );
            }
        }
        Command::Character {
            role,
            genre,
            no_outline,
        } => {
            let genre = genre.unwrap_or_else(|| GENRE_PRESETS[0].to_string());
            let character = session
                .generate_character(&role, &genre, !no_outline)
                .await?;
            println!("{} ({})", character.name, character.role);
            println!("原型：{}", character.archetype);
            println!("性格：{}", character.personality);
            if let Some(ability) = &character.cheat_ability {
                println!("特殊能力：{}", ability);
            }
            println!("背景：{}", character.backstory);
        }
        Command::Assist { mode } => {
            let text = session.assist(mode.into()).await?;
            println!("{}", text);
        }
        Command::Analyze => {
            let result = session.analyze().await?;
            println!("评分：{}分（越高越像AI） {}", result.score, result.verdict);
            if !result.human_traits.is_empty() {
                println!("人工特征：");
                for trait_ in &result.human_traits {
                    println!("  + {}", trait_);
                }
            }
            if !result.ai_traits.is_empty() {
                println!("AI特征：");
                for trait_ in &result.ai_traits {
                    println!("  - {}", trait_);
                }
            }
            if let Some(review) = session.review() {
                println!("修改建议：");
                for (index, suggestion) in review.suggestions.active() {
                    println!(
                        "  [{}] {} -> {}（{}）",
                        index,
                        suggestion.original,
                        suggestion.primary_suggestion,
                        suggestion.reason
                    );
                }
            }
        }
        Command::Rankings => {
            let result = session.fetch_rankings().await?;
            for category in &result.categories {
                println!("== {} ==", category.name);
                for book in &category.books {
                    println!(
                        "  #{} 《{}》 {} [{}] {}",
                        book.rank, book.title, book.author, book.genre, book.heat
                    );
                }
            }
            println!("趋势分析：{}", result.trend_analysis);
            for source in &result.sources {
                println!("来源：{} ({})", source.title, source.uri);
            }
        }
        Command::Revise {
            original,
            replacement,
        } => match session.apply_replacement(&original, &replacement) {
            Ok(()) => println!("已替换首次出现的片段。"),
            Err(e) => println!("未在正文中找到该片段（可能已被修改）：{}", e),
        },
        Command::Import { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            session.import_text(text);
            println!("已导入 {}", file.display());
        }
        Command::Status => {
            let state = session.state();
            match &state.idea {
                Some(idea) => println!("当前作品：{}", idea.title),
                None => println!("尚未生成创意。"),
            }
            println!("大纲章节数：{}", state.outline.len());
            println!("角色数：{}", state.characters.len());
            println!("正文字数：{}", state.content.chars().count());
        }
        Command::Export { out } => match session.export_txt() {
            Some(text) => {
                let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(&session.snapshot())));
                tokio::fs::write(&path, text).await?;
                println!("已导出到 {}", path.display());
            }
            None => println!("没有可导出的内容，请先生成创意。"),
        },
        Command::Save => {
            session.save_now();
            println!("已保存。");
        }
        Command::Clear => {
            session.clear().await?;
            println!("项目已清空。");
        }
        Command::Presets => {
            println!("小说分类：");
            for genre in GENRE_PRESETS {
                println!("  {}", genre);
            }
            println!("故事基调：");
            for tone in TONE_PRESETS {
                println!("  {}", tone);
            }
        }
    }
    Ok(())
}
