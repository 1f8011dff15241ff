use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blind_chess::config::{parse_setoption, SessionConfig};
use blind_chess::errors::BlindChessErrors;
use blind_chess::game_state::board_state::BoardState;
use blind_chess::session::game_session::GameSession;
use blind_chess::speech::speech_queue::SpeechQueue;
use blind_chess::surface::simulated_surface::SimulatedSurface;
use blind_chess::utils::render_game_state::render_game_state;
use blind_chess::voice::voice_latch::VoiceLatch;

type Surface = Rc<RefCell<SimulatedSurface>>;
type Session = GameSession<Surface, Surface, SpeechQueue, VoiceLatch>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

#[derive(Parser)]
#[command(name = "blind_chess")]
#[command(about = "Play chess by speaking moves (typed here) against a simulated board")]
#[command(version)]
struct Args {
    /// Side the local player plays
    #[arg(long, value_enum, default_value = "white")]
    play_as: Side,

    /// Start position in FEN (white always moves first)
    #[arg(long)]
    fen: Option<String>,

    /// Milliseconds between session ticks
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Milliseconds to wait for the board to confirm a castle
    #[arg(long, default_value_t = 2000)]
    castling_timeout_ms: u64,

    /// Board polls the simulated opponent waits before replying
    #[arg(long, default_value_t = 1)]
    opponent_reply_polls: u32,

    /// Seed for the simulated opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, for example `debug` or `blind_chess=trace` (defaults to RUST_LOG, then `info`)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn start_board(args: &Args) -> Result<BoardState, BlindChessErrors> {
    let mut board = match &args.fen {
        Some(fen) => BoardState::from_fen(fen)?,
        None => BoardState::new_game(),
    };
    board.is_flipped = args.play_as == Side::Black;
    Ok(board)
}

fn new_game(start: &BoardState, config: &SessionConfig) -> (Session, Surface) {
    let surface = Rc::new(RefCell::new(SimulatedSurface::new(
        start.clone(),
        config.opponent_reply_polls,
        config.opponent_seed,
    )));
    let mut session = GameSession::new(
        config,
        Rc::clone(&surface),
        Rc::clone(&surface),
        SpeechQueue::new(),
        VoiceLatch::new(),
    );
    session.start();
    (session, surface)
}

fn speak_pending(session: &mut Session) {
    while let Some(sentence) = session.speech_mut().pop_next() {
        println!("[{}] {sentence}", chrono::Local::now().format("%H:%M:%S"));
    }
}

fn run(args: &Args) -> Result<(), BlindChessErrors> {
    let start = start_board(args)?;
    let mut config = SessionConfig {
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        castling_timeout: Duration::from_millis(args.castling_timeout_ms),
        opponent_reply_polls: args.opponent_reply_polls.max(1),
        opponent_seed: args.seed,
    };

    let (line_tx, line_rx) = channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim().to_owned();
            if !trimmed.is_empty() && line_tx.send(trimmed).is_err() {
                break;
            }
        }
    });

    let (mut session, mut surface) = new_game(&start, &config);
    println!("{}", render_game_state(surface.borrow().board()));
    println!("Say a piece and a square (\"knight f3\"), or \"castle kingside\".");
    println!("Commands: board, new, setoption name <N> value <V>, quit");
    speak_pending(&mut session);

    let mut next_tick = Instant::now() + config.tick_interval;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match line_rx.recv_timeout(wait) {
            Ok(line) => match line.split_whitespace().next().unwrap_or_default() {
                "quit" => break,
                "board" => println!("{}", render_game_state(surface.borrow().board())),
                "new" => {
                    session.stop();
                    (session, surface) = new_game(&start, &config);
                    info!("[CLI] new game");
                }
                "setoption" => {
                    let applied = parse_setoption(&line)
                        .and_then(|(name, value)| config.set_option(&name, &value));
                    match applied {
                        Ok(()) => {
                            session.apply_config(&config);
                            info!("[CLI] options now {config:?}");
                        }
                        Err(err) => warn!("[CLI] setoption error: {err}"),
                    }
                }
                _ => session.voice_mut().hear(&line),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        if now >= next_tick {
            session.tick(now);
            next_tick = now + config.tick_interval;
        }
        speak_pending(&mut session);
    }

    session.stop();
    speak_pending(&mut session);
    Ok(())
}
