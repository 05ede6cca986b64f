// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::collections::HashMap;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use console::style;
use rand::seq::SliceRandom;

use romaji_drill::chunker::split_into_chunks;
use romaji_drill::config::{AppConfig, Difficulty, GameMode, default_config_path, project_dirs};
use romaji_drill::questions::{Question, questions_for};
use romaji_drill::save_data::{PlayerData, SaveStore, TypeRecord};
use romaji_drill::score::RunStats;
use romaji_drill::{
    AppError, BoardEvent, Key, PatternGenerator, TargetBoard, TargetId, logger,
};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

// --------------------------------------------------
// コマンドライン
// --------------------------------------------------

#[derive(Parser)]
#[command(name = "romaji-drill", version, about = "ひらがなローマ字タイピング")]
struct Cli {
    /// 設定ファイル (既定: OS の設定ディレクトリの config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// 同時に表示するお題の数
    #[arg(long)]
    targets: Option<usize>,
    /// お題の順番をシャッフルする
    #[arg(long)]
    shuffle: bool,
    /// 1単語あたりのパターン数の上限
    #[arg(long)]
    max_patterns: Option<usize>,
    /// お題の難易度
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,
    /// ひらがな or 英単語
    #[arg(long, value_enum)]
    mode: Option<GameMode>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// タイピングを始める (既定)
    Play,
    /// 単語ごとの入力パターンを表示する
    Patterns {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// プレイヤーの記録を表示する
    Stats,
    /// セーブデータを削除する
    Reset {
        /// 確認なしで削除する
        #[arg(long)]
        yes: bool,
    },
}

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 画面上のお題1つ分の計測
struct TargetRun {
    question: Question,
    /// 表示用の代表パターン
    hint: String,
    misses: u32,
    start_time: Option<Instant>,
}

/// アプリ全体の状態を管理する
struct AppState {
    board: TargetBoard,
    generator: PatternGenerator,
    runs: HashMap<TargetId, TargetRun>,

    /// お題の出題順
    questions: Vec<Question>,
    next_question_index: usize,

    is_error: bool, // ミスタイプ中か

    /// 直前のお題の記録
    last_record: Option<TypeRecord>,
    last_leveled_up: bool,

    player_data: PlayerData,
    store: SaveStore,
}

impl AppState {
    fn new(config: &AppConfig, store: SaveStore, player_data: PlayerData) -> Self {
        let mut questions = questions_for(config.mode, config.difficulty);
        if config.shuffle {
            questions.shuffle(&mut rand::rng());
        }
        let generator = PatternGenerator::new(config.generator.clone());

        let mut state = Self {
            board: TargetBoard::new(generator.clone()),
            generator,
            runs: HashMap::new(),
            questions,
            next_question_index: 0,
            is_error: false,
            last_record: None,
            last_leveled_up: false,
            player_data,
            store,
        };
        for _ in 0..config.targets.min(state.questions.len()) {
            state.spawn_target();
        }
        state
    }

    /// 次のお題を画面に追加する
    fn spawn_target(&mut self) {
        let question = self.questions[self.next_question_index];
        self.next_question_index = (self.next_question_index + 1) % self.questions.len();

        let hint = self
            .generator
            .generate(question.reading)
            .primary()
            .unwrap_or_default()
            .to_string();
        let id = self.board.add(question.reading);
        self.runs.insert(
            id,
            TargetRun {
                question,
                hint,
                misses: 0,
                start_time: None,
            },
        );
    }

    /// Tab: フォーカスを次のお題へ
    fn cycle_focus(&mut self) {
        if let Some(id) = self.board.cycle_focus() {
            if let Some(run) = self.runs.get_mut(&id) {
                run.misses = 0;
                run.start_time = None;
            }
        }
        self.is_error = false;
    }

    /// キー入力の処理
    fn handle_key(&mut self, key: Key) {
        match self.board.handle_key(key) {
            BoardEvent::Key { target, outcome } => {
                let typo = !outcome.accepted && matches!(key, Key::Char(_));
                if let Some(run) = self.runs.get_mut(&target) {
                    // タイマー開始
                    if run.start_time.is_none() {
                        run.start_time = Some(Instant::now());
                    }
                    if typo {
                        run.misses += 1; // ミス回数をカウント
                    }
                }
                self.is_error = typo;
            }
            BoardEvent::Completed {
                target,
                word,
                pattern,
            } => {
                self.finish_target(target, &word, &pattern);
                self.is_error = false;
            }
            BoardEvent::Unclaimed(c) => {
                log::debug!("no target starts with {c:?}");
                self.is_error = true;
            }
            BoardEvent::Ignored => {}
        }
    }

    /// 打ち終えたお題のリザルトを計算して保存し、次のお題を出す
    fn finish_target(&mut self, target: TargetId, word: &str, pattern: &str) {
        let (misses, duration_sec) = match self.runs.remove(&target) {
            Some(run) => (
                run.misses,
                run.start_time
                    .map(|start| start.elapsed().as_secs_f64())
                    .unwrap_or(0.0),
            ),
            None => (0, 0.0),
        };
        let stats = RunStats {
            total_chars: pattern.chars().count() as u32,
            misses,
            duration_sec,
        };
        let record = TypeRecord::new(word, pattern, &stats);

        self.last_leveled_up = self.player_data.record(record.clone());
        self.last_record = Some(record);
        if let Err(err) = self.store.save(&self.player_data) {
            log::error!("failed to save player data: {err}");
        }

        self.spawn_target();
    }
}

// --------------------------------------------------
// メイン関数
// --------------------------------------------------

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let data_dir = project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let log_path = logger::init(&data_dir, config.level_filter())?;
    log::info!("romaji-drill started (log: {})", log_path.display());

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&config),
        Command::Patterns { words } => {
            print_patterns(&config, &words);
            Ok(())
        }
        Command::Stats => print_stats(),
        Command::Reset { yes } => reset(yes),
    }
}

/// 設定ファイルを読み、コマンドライン引数で上書きする
fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut config = match path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    if let Some(targets) = cli.targets {
        config.targets = targets;
    }
    if cli.shuffle {
        config.shuffle = true;
    }
    if let Some(max_patterns) = cli.max_patterns {
        config.generator.max_patterns = max_patterns;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    config.validate()?;
    Ok(config)
}

fn play(config: &AppConfig) -> Result<(), AppError> {
    let store = SaveStore::default_location()?;
    let player_data = store.load()?; // 起動時にロード
    let mut app_state = AppState::new(config, store, player_data);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app_state);
    restore_terminal()?;
    result?;
    Ok(())
}

fn setup_terminal() -> std::io::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> std::io::Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app_state: &mut AppState) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Tab => app_state.cycle_focus(),
                        KeyCode::Backspace => app_state.handle_key(Key::Backspace),
                        KeyCode::Char(c) => app_state.handle_key(Key::from_char(c)),
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}

// --------------------------------------------------
// サブコマンド
// --------------------------------------------------

fn print_patterns(config: &AppConfig, words: &[String]) {
    let generator = PatternGenerator::new(config.generator.clone());
    for word in words {
        let set = generator.generate(word);
        let chunks: Vec<String> = split_into_chunks(word)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect();

        println!(
            "{} {}",
            style(word).bold().cyan(),
            style(format!("({} patterns)", set.len())).dim()
        );
        println!("  chunks: {}", chunks.join(" | "));
        for (i, pattern) in set.iter().enumerate() {
            if i == 0 {
                println!("  {}", style(pattern).green().bold());
            } else {
                println!("  {pattern}");
            }
        }
    }
}

fn print_stats() -> Result<(), AppError> {
    let store = SaveStore::default_location()?;
    let pd = store.load()?;

    println!(
        "{} Lv.{} ({} / {})",
        style("TYPE").bold().magenta(),
        pd.level,
        pd.current_xp,
        pd.required_xp_for_next_level()
    );
    println!("Typed: {} / Miss: {}", pd.total_typed_chars, pd.total_misses);
    for record in pd.history.iter().rev().take(10) {
        println!(
            "  {} {} ({}) CPS {:.2} Score {:.0} Miss {}",
            style(record.timestamp.format("%Y-%m-%d %H:%M")).dim(),
            record.word,
            record.pattern,
            record.cps,
            record.score,
            record.misses
        );
    }
    Ok(())
}

fn reset(yes: bool) -> Result<(), AppError> {
    let confirmed = yes
        || dialoguer::Confirm::new()
            .with_prompt("セーブデータを削除しますか？")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("キャンセルしました");
        return Ok(());
    }

    SaveStore::default_location()?.clear()?;
    log::info!("save data cleared");
    println!("セーブデータを削除しました");
    Ok(())
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

fn ui(f: &mut Frame, app_state: &AppState) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Romaji Drill");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] ステータスバー (Lv, XP)
            Constraint::Length(2), // [1] リザルト (2行)
            Constraint::Min(3),    // [2] お題一覧
            Constraint::Length(1), // [3] 進捗
            Constraint::Length(1), // [4] 操作説明
        ])
        .split(inner_area);

    // 0. ステータスバー (レベルとXPゲージ)
    let pd = &app_state.player_data;
    let req_xp = pd.required_xp_for_next_level();
    let ratio = if req_xp > 0 {
        (pd.current_xp as f64 / req_xp as f64).min(1.0)
    } else {
        0.0
    };

    let label = format!("Lv.{} ({} / {})", pd.level, pd.current_xp, req_xp);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, chunks[0]);

    // 1. リザルト表示
    let (cps_time_text, score_miss_text) = match &app_state.last_record {
        Some(record) => (
            format!(
                "{} ({}) CPS: {:.2} / Time: {:.2}s",
                record.word, record.pattern, record.cps, record.duration_sec
            ),
            format!(
                "Score: {:.0} / Miss: {}{}",
                record.score,
                record.misses,
                if app_state.last_leveled_up { "  LEVEL UP!" } else { "" }
            ),
        ),
        None => (String::new(), String::new()),
    };
    let result_paragraph = Paragraph::new(vec![
        Line::from(cps_time_text).style(Style::default().fg(Color::Yellow)),
        Line::from(score_miss_text).style(Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(result_paragraph, chunks[1]);

    // 2. お題一覧
    let mut lines = Vec::new();
    for target in app_state.board.targets() {
        let Some(run) = app_state.runs.get(&target.id()) else {
            continue;
        };

        let mut spans = vec![
            Span::styled(run.question.japanese, Style::default().fg(Color::White).bold()),
            Span::raw("  "),
            Span::styled(run.question.reading, Style::default().fg(Color::Gray)),
            Span::raw("  "),
        ];

        match target.session() {
            // フォーカス中 (入力中)
            Some(session) => {
                let typed = session.typed();
                let remaining = session.remaining();

                if !typed.is_empty() {
                    spans.push(Span::styled(
                        typed.to_string(),
                        Style::default().fg(Color::Green),
                    ));
                }

                if let Some(next) = remaining.chars().next() {
                    // カーソル (白または赤)
                    let style = if app_state.is_error {
                        Style::default().fg(Color::White).bg(Color::Red)
                    } else {
                        Style::default().fg(Color::Black).bg(Color::White)
                    };
                    spans.push(Span::styled(next.to_string(), style));
                    spans.push(Span::styled(
                        remaining[next.len_utf8()..].to_string(),
                        Style::default().fg(Color::Gray),
                    ));
                }
                lines.push(Line::from(spans).centered());

                // 別の入力方法 (最大3つ)
                let alternatives = session.alternatives(3);
                if !alternatives.is_empty() {
                    lines.push(
                        Line::from(format!("他: {}", alternatives.join(", ")))
                            .style(Style::default().fg(Color::DarkGray))
                            .centered(),
                    );
                }
            }
            // まだ手をつけていないお題 (灰色)
            None => {
                spans.push(Span::styled(
                    run.hint.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
                lines.push(Line::from(spans).centered());
            }
        }
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines), chunks[2]);

    // 3. フォーカス中のお題の進捗
    if let Some(session) = app_state.board.focused().and_then(|t| t.session()) {
        let progress = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(session.progress().clamp(0.0, 1.0));
        f.render_widget(progress, chunks[3]);
    }

    // 4. 操作説明
    f.render_widget(
        Paragraph::new("Tab: フォーカス切替 / Backspace: 1文字戻す / Esc: 終了")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[4],
    );
}
