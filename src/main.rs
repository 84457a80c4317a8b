use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use edulearn::error::ErrorCode;
use edulearn::llm::{LlmClient, LlmError};
use edulearn::scores::{FileScoreStore, ScoreLog, ScoreStore, StoreError};
use edulearn::speech::console::{ConsoleRecognizer, ConsoleSynthesizer};
use edulearn::speech::{DEFAULT_READ_TEXT, Dictation, ReadAloud, SpeechError};
use edulearn::state::AppState;
use edulearn::tools::catalog::{self, CATALOG, Mounted};
use edulearn::tools::chat::{self, Conversation};
use edulearn::tools::code::{CodeTask, guess_language};
use edulearn::tools::essay::EssayTask;
use edulearn::tools::handwriting::{HandwritingTask, ImageUpload};
use edulearn::tools::homework::HomeworkTask;
use edulearn::tools::quiz::{Difficulty, OPTIONS_PER_QUESTION, QuestionCount, QuizSession, QuizTask};
use edulearn::tools::summary::SummaryTask;
use edulearn::tools::{Task, ToolError};
use edulearn::widget::Widget;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Tool(#[from] ToolError),
    #[error("LLM client setup failed: {0}")]
    Llm(#[from] LlmError),
    #[error("score log: {0}")]
    Store(#[from] StoreError),
    #[error("voice tool: {0}")]
    Speech(#[from] SpeechError),
    #[error("terminal io failed: {0}")]
    Io(#[from] io::Error),
    #[error("score log encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Tool(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Speech(e) => e.error_code(),
            Self::Io(_) => "E_IO",
            Self::Json(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "edulearn", about = "EduLearn AI study tools in the terminal")]
struct Cli {
    #[arg(long, env = "EDULEARN_DATA_DIR", default_value = ".edulearn")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every tool in the catalog.
    Tools,
    /// Show what opening a catalog entry would mount.
    Open { id: String },
    /// Interactive chat with the study assistant.
    Chat,
    /// Generate a multiple-choice quiz and answer it.
    Quiz(QuizArgs),
    /// Explain a homework question or concept.
    Homework(TextArgs),
    /// Grade an essay or paragraph.
    Grade(TextArgs),
    /// Explain a code snippet line by line.
    Explain(TextArgs),
    /// Summarize an article or notes into key points.
    Summarize(TextArgs),
    /// Extract text from a PNG, JPG, or GIF image.
    Handwriting { path: PathBuf },
    /// Dictation and read-aloud.
    Voice(VoiceCommand),
    /// Print a persisted score log.
    Scores {
        #[arg(value_enum)]
        log: LogArg,
    },
}

#[derive(Args, Debug)]
struct TextArgs {
    #[arg(help = "Input text, or - (or nothing) to read stdin")]
    text: Option<String>,
}

#[derive(Args, Debug)]
struct QuizArgs {
    #[arg(long, help = "Topic or paragraph; read from stdin when omitted")]
    topic: Option<String>,

    #[arg(long, default_value = "5", help = "3, 5, 10, or 15")]
    count: QuestionCount,

    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,
}

#[derive(Args, Debug)]
struct VoiceCommand {
    #[command(subcommand)]
    command: VoiceSubcommand,
}

#[derive(Subcommand, Debug)]
enum VoiceSubcommand {
    /// Type lines as if speaking; an empty line stops recording.
    Dictate,
    /// Read text aloud.
    Read { text: Option<String> },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogArg {
    Essays,
    Quizzes,
}

impl From<LogArg> for ScoreLog {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Essays => Self::Essays,
            LogArg::Quizzes => Self::Quizzes,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Tools => {
            list_tools();
            Ok(())
        }
        Command::Open { id } => open_tool(&id),
        Command::Scores { log } => print_scores(&FileScoreStore::new(cli.data_dir), log.into()).await,
        Command::Voice(voice) => run_voice(voice).await,
        command => {
            let state = app_state(cli.data_dir)?;
            run_ai(&state, command).await
        }
    }
}

fn app_state(data_dir: PathBuf) -> Result<AppState, CliError> {
    let llm = LlmClient::from_env()?;
    info!(model = llm.model(), data_dir = %data_dir.display(), "LLM client initialized");
    Ok(AppState::new(Arc::new(llm), Arc::new(FileScoreStore::new(data_dir))))
}

async fn run_ai(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Chat => run_chat(state).await,
        Command::Quiz(args) => run_quiz(state, args).await,
        Command::Homework(args) => {
            let task = HomeworkTask { question: read_input(args.text)? };
            submit(state, &task, |answer| println!("{answer}")).await
        }
        Command::Grade(args) => {
            let task = EssayTask { essay: read_input(args.text)? };
            submit(state, &task, |grade| {
                println!("Overall score: {}/100", grade.overall_score);
                println!("  Clarity:   {}", grade.scores.clarity);
                println!("  Structure: {}", grade.scores.structure);
                println!("  Grammar:   {}", grade.scores.grammar);
                print_points("Good points", &grade.feedback.good_points);
                print_points("Suggestions", &grade.feedback.suggestions);
                print_points("Blunders", &grade.feedback.blunders);
            })
            .await
        }
        Command::Explain(args) => {
            let task = CodeTask { code: read_input(args.text)? };
            println!("Language: {}", guess_language(&task.code));
            submit(state, &task, |explanation| print_points("Explanation", &explanation.explanation_points)).await
        }
        Command::Summarize(args) => {
            let task = SummaryTask { content: read_input(args.text)? };
            submit(state, &task, |summary| print_points("Summary", &summary.summary_points)).await
        }
        Command::Handwriting { path } => {
            let task = HandwritingTask { image: Some(ImageUpload::from_path(&path).await?) };
            submit(state, &task, |text| println!("{text}")).await
        }
        Command::Tools | Command::Open { .. } | Command::Scores { .. } | Command::Voice(_) => Ok(()),
    }
}

/// One pass through a fresh widget, rendering the result on success.
async fn submit<T: Task>(state: &AppState, task: &T, render: impl FnOnce(&T::Output)) -> Result<(), CliError> {
    let mut widget = Widget::<T>::new();
    eprintln!("Working...");
    render(widget.submit(state, task).await?);
    Ok(())
}

fn read_input(arg: Option<String>) -> Result<String, CliError> {
    read_input_from(arg, io::stdin())
}

/// Argument text, or everything on `reader` for `-` or no argument. Either
/// way the surrounding whitespace is dropped.
fn read_input_from(arg: Option<String>, mut reader: impl Read) -> Result<String, CliError> {
    let text = match arg {
        Some(text) if text != "-" => text,
        _ => {
            let mut buf = String::new();
            reader.read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text.trim().to_string())
}

fn print_points(heading: &str, points: &[String]) {
    println!("{heading}:");
    if points.is_empty() {
        println!("  (none)");
    }
    for point in points {
        println!("  - {point}");
    }
}

// =============================================================================
// CATALOG
// =============================================================================

fn list_tools() {
    for info in &CATALOG {
        let badge = if info.available { "" } else { " (coming soon)" };
        println!("{:<12} {}{badge}", info.id, info.title);
        println!("{:<12} {}", "", info.description);
    }
}

fn open_tool(id: &str) -> Result<(), CliError> {
    match catalog::open(id)? {
        Mounted::Tool(info) => {
            println!("{}", info.title);
            println!("{}", info.description);
        }
        Mounted::ComingSoon(info) => {
            println!("{} is coming soon. Stay tuned!", info.title);
        }
    }
    Ok(())
}

async fn print_scores(store: &dyn ScoreStore, log: ScoreLog) -> Result<(), CliError> {
    let entries = store.read(log).await?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

// =============================================================================
// CHAT
// =============================================================================

async fn run_chat(state: &AppState) -> Result<(), CliError> {
    let mut conversation = Conversation::new();
    for message in conversation.messages() {
        println!("AI: {}", message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        eprintln!("{}", chat::THINKING);
        match conversation.send(state.llm.as_ref(), &line).await {
            Ok(reply) => println!("AI: {}", reply.text),
            Err(e) => println!("{}", e.user_message()),
        }
    }
    Ok(())
}

// =============================================================================
// QUIZ
// =============================================================================

async fn run_quiz(state: &AppState, args: QuizArgs) -> Result<(), CliError> {
    let topic = read_input(args.topic)?;
    let task = QuizTask { topic, count: args.count, difficulty: args.difficulty };

    let mut widget = Widget::<QuizTask>::new();
    eprintln!("Generating quiz...");
    let quiz = widget.submit(state, &task).await?.clone();
    let started = widget.last_started().unwrap_or_else(Instant::now);
    let mut session = QuizSession::new(task.topic.clone(), quiz, started);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    for (index, question) in session.questions().to_vec().iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, question.question);
        for (option, text) in question.options.iter().enumerate() {
            println!("   {}) {text}", option_label(option));
        }
        loop {
            print!("Your answer: ");
            io::stdout().flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(ToolError::Invalid("Please answer every question before checking.".into()).into());
            }
            match parse_option(&line).map(|option| session.select(index, option)) {
                Some(Ok(())) => break,
                Some(Err(e)) => println!("{}", e.user_message()),
                None => println!("Please answer with a letter a-d or a number 1-4."),
            }
        }
    }
    drop(input);

    let outcome = session.check(state.scores.as_ref()).await?;
    println!();
    for (index, question) in session.questions().iter().enumerate() {
        let mark = if session.is_correct(index) == Some(true) { "correct" } else { "wrong" };
        println!(
            "{}. {mark} (answer: {})",
            index + 1,
            option_label(question.correct_answer_index)
        );
    }
    println!("You scored {} out of {}!", outcome.correct, outcome.total);
    Ok(())
}

fn option_label(option: usize) -> char {
    u8::try_from(option).map_or('?', |n| char::from(b'a' + n))
}

fn parse_option(line: &str) -> Option<usize> {
    let answer = line.trim().to_ascii_lowercase();
    let option = match answer.as_bytes() {
        [c @ b'a'..=b'z'] => usize::from(c - b'a'),
        _ => answer.parse::<usize>().ok()?.checked_sub(1)?,
    };
    (option < OPTIONS_PER_QUESTION).then_some(option)
}

// =============================================================================
// VOICE
// =============================================================================

async fn run_voice(voice: VoiceCommand) -> Result<(), CliError> {
    match voice.command {
        VoiceSubcommand::Dictate => {
            let recognizer = ConsoleRecognizer::new();
            let mut dictation = Dictation::new();
            eprintln!("Recording. Type what you say; an empty line stops.");
            let mut events = dictation.start(&recognizer)?;
            if let Some(alert) = dictation.listen(&mut events).await {
                eprintln!("{}", alert.message());
            }
            dictation.stop(&recognizer);
            println!("{}", dictation.transcript().trim_end());
            Ok(())
        }
        VoiceSubcommand::Read { text } => {
            let text = text.unwrap_or_else(|| DEFAULT_READ_TEXT.to_string());
            let synth = ConsoleSynthesizer::new();
            let mut reader = ReadAloud::new();
            let mut events = reader.read(&synth, &text)?;
            if let Some(alert) = reader.wait(&mut events).await {
                eprintln!("{}", alert.message());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
