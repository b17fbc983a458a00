//! Detective Quest
//!
//! Explore the mansion, collect the clues and accuse the culprit. Runs as a
//! full-screen terminal UI, or as a plain line console with `--plain`.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use detective_quest::game::narrative::{ConsoleNarrator, LineChoices};
use detective_quest::game::scenario::Chapter;
use detective_quest::game::CaseReport;
use detective_quest::observability::{self, LogTarget, LoggingConfig};
use detective_quest::tui::App;
use detective_quest::Investigation;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "detective-quest", version, about)]
struct Cli {
    /// Chapter to play
    #[arg(long, value_enum, default_value = "accusation", env = "DETECTIVE_QUEST_CHAPTER")]
    chapter: Chapter,

    /// Line-by-line console instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Print the case report as JSON when the game ends
    #[arg(long)]
    summary: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file
    #[arg(long, env = "DETECTIVE_QUEST_LOG")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn logging(&self) -> LoggingConfig {
        let target = match (&self.log_file, self.plain) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => LogTarget::Stderr,
            // The full-screen UI owns the terminal
            (None, false) => LogTarget::Off,
        };
        LoggingConfig {
            target,
            verbose: self.verbose,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init(&cli.logging()).context("failed to set up logging")?;
    tracing::debug!(?cli, "starting");

    let report = if cli.plain {
        Some(run_console(cli.chapter)?)
    } else {
        run_tui(cli.chapter)?
    };

    if cli.summary {
        if let Some(report) = report {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn run_console(chapter: Chapter) -> anyhow::Result<CaseReport> {
    let stdin = io::stdin();
    let mut source = LineChoices::new(stdin.lock());
    let mut narrator = ConsoleNarrator::new(stdout().lock());

    narrator.say(&format!("=== Detective Quest: {} ===", chapter.title()));
    narrator.say(chapter.synopsis());

    let mut investigation = Investigation::new(chapter.scenario());
    let report = investigation.run(&mut source, &mut narrator)?;
    narrator.say("");
    narrator.say("Fim do jogo. Obrigado por jogar!");
    let _stdout = narrator.finish().context("failed to write to stdout")?;
    Ok(report)
}

/// Returns the report of the case on screen when the player quit, if any
fn run_tui(chapter: Chapter) -> anyhow::Result<Option<CaseReport>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(chapter);
    let result = event_loop(&mut terminal, &mut app);

    // Cleanup, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Obrigado por jogar Detective Quest!                   ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(app
        .investigation
        .as_ref()
        .map(|investigation| investigation.case_report(app.judgment.clone())))
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
