//! Duolog CLI
//!
//! Usage:
//!   duolog chat.json                         # Coloured summary
//!   duolog chat.json --json                  # Full report as JSON
//!   duolog chat.json --stat reply-times      # One statistic family
//!   duolog chat.json --today 2024-03-07      # Fix the clock for current streak
//!   duolog --serve --addr 127.0.0.1:3000     # HTTP API server

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use duolog::config::{AnalysisConfig, StreakAdjacency};
use duolog::core::{run_server, ChatAnalyzer};
use duolog::types::{AnalysisReport, DayOfWeek, ParticipantNames, StreakRecord, Transcript};
use duolog::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "duolog",
    version = VERSION,
    about = "Duolog - Statistics and a relationship score for two-person chat exports",
    long_about = "Duolog reads the JSON export of a one-on-one chat and reports who talks\n\
                  how much, when, how quickly they answer each other, how long their\n\
                  daily streaks run, and a single 0-100 style relationship score.\n\n\
                  The chat owner (the account that exported the chat) is B, the\n\
                  counterpart is A.\n\n\
                  Logging goes to stderr and follows RUST_LOG (default: info)."
)]
struct Args {
    /// Chat export to analyse
    #[arg(required_unless_present = "serve")]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Only report one statistic family
    #[arg(long, value_enum)]
    stat: Option<Stat>,

    /// Date the current streak must end on (default: local today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Analysis configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of top words to report
    #[arg(long)]
    top_n: Option<usize>,

    /// Longest gap in minutes that still counts as a reply
    #[arg(long, value_name = "MINUTES")]
    reply_cap: Option<f64>,

    /// How neighbouring active days join a streak
    #[arg(long, value_enum)]
    streak_adjacency: Option<StreakAdjacency>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

/// Statistic families selectable with --stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stat {
    TopWords,
    MessageCounts,
    WordCounts,
    SharedVocabulary,
    ActiveDays,
    MessagesPerDay,
    AverageMessagesPerDay,
    WeeklyStats,
    HourlyStats,
    MostActiveWeekday,
    MessageLengthStats,
    ReplyTimes,
    ConversationStarters,
    Streaks,
    CurrentStreak,
    RelationshipScore,
}

/// Single family output, same shape as the HTTP responses
#[derive(Serialize)]
struct StatOutput<'a> {
    participants: &'a ParticipantNames,
    result: serde_json::Value,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args)?;

    if args.serve {
        run_server(&args.addr, config)
            .await
            .with_context(|| format!("server on {} failed", args.addr))?;
        return Ok(());
    }

    let path = args.file.as_deref().context("no chat export given")?;
    let transcript = load_transcript(path)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let analyzer = ChatAnalyzer::from_config(config);
    let report = analyzer
        .analyze(&transcript, today)
        .with_context(|| format!("cannot analyse {}", path.display()))?;

    match args.stat {
        Some(stat) => print_stat(&report, stat, args.json)?,
        None if args.json => println!("{}", serde_json::to_string_pretty(&report)?),
        None => print_summary(&transcript, &report),
    }
    Ok(())
}

/// Install the tracing subscriber on stderr
fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

/// Config file first, then single-field flags on top
fn load_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(cap) = args.reply_cap {
        config.max_reply_gap_minutes = cap;
    }
    if let Some(adjacency) = args.streak_adjacency {
        config.streak_adjacency = adjacency;
    }

    config.validate()?;
    debug!(?config, "configuration");
    Ok(config)
}

fn load_transcript(path: &Path) -> Result<Transcript> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Transcript::from_json(&raw).with_context(|| format!("{} is not a chat export", path.display()))
}

fn stat_value(report: &AnalysisReport, stat: Stat) -> serde_json::Result<serde_json::Value> {
    match stat {
        Stat::TopWords => serde_json::to_value(&report.top_words),
        Stat::MessageCounts => serde_json::to_value(report.message_counts),
        Stat::WordCounts => serde_json::to_value(&report.word_counts),
        Stat::SharedVocabulary => serde_json::to_value(&report.shared_vocabulary),
        Stat::ActiveDays => serde_json::to_value(report.active_days),
        Stat::MessagesPerDay => serde_json::to_value(&report.messages_per_day),
        Stat::AverageMessagesPerDay => serde_json::to_value(report.average_messages_per_day),
        Stat::WeeklyStats => serde_json::to_value(&report.weekly),
        Stat::HourlyStats => serde_json::to_value(&report.hourly),
        Stat::MostActiveWeekday => serde_json::to_value(report.most_active_weekday),
        Stat::MessageLengthStats => serde_json::to_value(report.message_lengths),
        Stat::ReplyTimes => serde_json::to_value(&report.reply_times),
        Stat::ConversationStarters => serde_json::to_value(report.conversation_starters),
        Stat::Streaks => serde_json::to_value(&report.streaks),
        Stat::CurrentStreak => serde_json::to_value(&report.current_streak),
        Stat::RelationshipScore => serde_json::to_value(&report.relationship),
    }
}

fn print_stat(report: &AnalysisReport, stat: Stat, json: bool) -> Result<()> {
    let output = StatOutput {
        participants: &report.participants,
        result: stat_value(report, stat)?,
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let name = stat.to_possible_value().map(|v| v.get_name().to_string()).unwrap_or_default();
        println!("{}", name.bold());
        println!("{}", serde_json::to_string_pretty(&output.result)?);
    }
    Ok(())
}

/// Human readable report
fn print_summary(transcript: &Transcript, report: &AnalysisReport) {
    let names = &report.participants;
    let (a, b) = (names.a.as_str(), names.b.as_str());

    println!("{}", format!("Duolog v{} - {}", VERSION, transcript.name).bold());
    println!("  A = {}   B = {} (owner)", a.cyan(), b.magenta());
    println!();

    section("Activity");
    let counts = &report.message_counts;
    println!("  messages        {} total ({} {}, {} {})", counts.total, a, counts.a, b, counts.b);
    println!("  active days     {}", report.active_days);
    let avg = &report.average_messages_per_day;
    println!("  per active day  {:.2} ({} {:.2}, {} {:.2})", avg.overall, a, avg.a, b, avg.b);
    let weekday = &report.most_active_weekday;
    println!(
        "  busiest weekday {} ({} {}, {} {})",
        weekday_name(weekday.overall),
        a,
        weekday_name(weekday.a),
        b,
        weekday_name(weekday.b)
    );
    let starters = &report.conversation_starters.counts;
    println!("  starters        {} {}, {} {}", a, starters.a, b, starters.b);
    println!();

    section("Words");
    let words = &report.word_counts;
    println!(
        "  words           {} {} ({}/msg), {} {} ({}/msg)",
        a,
        words.totals.a,
        per_message(words.averages.a),
        b,
        words.totals.b,
        per_message(words.averages.b)
    );
    let lengths = &report.message_lengths;
    println!(
        "  chars/msg       {} {:.1}, {} {:.1}",
        a, lengths.a.average, b, lengths.b.average
    );
    let top: Vec<String> = report
        .top_words
        .iter()
        .map(|w| format!("{} ({}/{})", w.word, w.counts.a, w.counts.b))
        .collect();
    println!("  top words       {}", top.join(", "));
    println!(
        "  shared words    {}",
        report.shared_vocabulary.iter().take(10).cloned().collect::<Vec<_>>().join(", ")
    );
    println!();

    section("Replies");
    let replies = &report.reply_times.overall;
    if replies.is_empty() {
        println!("  {}", "no replies within the counted window".dimmed());
    } else {
        println!(
            "  reply time      avg {:.1} min, min {:.1}, max {:.1} over {} replies",
            replies.average, replies.min, replies.max, replies.samples
        );
    }
    println!();

    section("Streaks");
    println!("  longest         {}", streak_text(&report.streaks.overall));
    println!("  {:<15} {}", a, streak_text(&report.streaks.a));
    println!("  {:<15} {}", b, streak_text(&report.streaks.b));
    println!("  current         {}", streak_text(&report.current_streak));
    println!();

    section("Relationship score");
    let score = &report.relationship;
    println!("  {}", score_colored(score.score));
    let c = &score.components;
    println!(
        "  {}",
        format!(
            "messages {:.2} | streaks {:.2} | consistency {:.2} | weekday -{:.2} | replies {:.2} | words {:.2} | daily {:.2}",
            c.s1, c.s2, c.s3, c.s4, c.s5, c.s6, c.s7
        )
        .dimmed()
    );

    let skipped = [
        report.weekly.skipped,
        report.hourly.skipped,
        report.reply_times.skipped,
        report.streaks.skipped,
        report.conversation_starters.skipped,
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    if skipped > 0 {
        println!();
        println!(
            "{}",
            format!("⚠ {} messages had malformed timestamps and were skipped", skipped).yellow()
        );
    }
}

fn section(title: &str) {
    println!("{}", title.bold().underline());
}

fn weekday_name(day: Option<DayOfWeek>) -> &'static str {
    day.map(|d| d.name()).unwrap_or("-")
}

fn per_message(average: Option<f64>) -> String {
    average.map(|avg| format!("{:.2}", avg)).unwrap_or_else(|| "-".to_string())
}

fn streak_text(record: &StreakRecord) -> String {
    if record.is_empty() {
        return "0 days".to_string();
    }
    format!("{} days ({} .. {})", record.length, record.start_date, record.end_date)
}

fn score_colored(score: f64) -> ColoredString {
    let text = format!("{:.0}", score);
    if score >= 80.0 {
        text.green().bold()
    } else if score >= 50.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}
