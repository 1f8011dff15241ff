//! One game: the turn state machine wired to its collaborators.
//!
//! A session tick runs three steps in order:
//! 1. `tick` the state machine with the latched voice signals,
//! 2. dispatch the returned requests; a board fetch is answered right away
//!    through `on_board_state`, so at most one validation runs per tick,
//! 3. poll the board once more for the watcher and feed any detected move
//!    back through `on_move_detected`.
//!
//! Until the watcher holds a baseline board, a tick only retries that first
//! look; the machine is not started before the player's side is known.
//!
//! Everything runs on the caller's thread; nothing here blocks or sleeps.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::errors::BlindChessErrors;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Color;
use crate::session::board_watcher::BoardWatcher;
use crate::session::collaborators::{BoardObserver, MoveExecutor, SpeechSink, VoiceSignalSource};
use crate::turn::turn_requests::SessionRequest;
use crate::turn::turn_state_machine::TurnStateMachine;

pub struct GameSession<O, E, S, V> {
    machine: TurnStateMachine,
    watcher: BoardWatcher,
    observer: O,
    executor: E,
    speech: S,
    voice: V,
    running: bool,
}

impl<O, E, S, V> GameSession<O, E, S, V>
where
    O: BoardObserver,
    E: MoveExecutor,
    S: SpeechSink,
    V: VoiceSignalSource,
{
    pub fn new(config: &SessionConfig, observer: O, executor: E, speech: S, voice: V) -> Self {
        Self {
            machine: TurnStateMachine::new(Color::Light, config.castling_timeout),
            watcher: BoardWatcher::new(),
            observer,
            executor,
            speech,
            voice,
            running: false,
        }
    }

    #[inline]
    pub fn machine(&self) -> &TurnStateMachine {
        &self.machine
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speech_mut(&mut self) -> &mut S {
        &mut self.speech
    }

    pub fn voice_mut(&mut self) -> &mut V {
        &mut self.voice
    }

    pub fn apply_config(&mut self, config: &SessionConfig) {
        self.machine.set_castling_timeout(config.castling_timeout);
    }

    /// Take the baseline board and start accepting ticks.
    pub fn start(&mut self) {
        info!("[SESSION] starting");
        self.running = true;
        self.watcher.reset();
        self.poll_watcher(Instant::now());
    }

    /// Stop ticking and drop any pending castling confirmation.
    pub fn stop(&mut self) {
        info!("[SESSION] stopping");
        self.running = false;
        self.machine.stop();
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }

        if !self.watcher.has_baseline() {
            self.poll_watcher(now);
            return;
        }

        let signals = self.voice.signals();
        let requests = self.machine.tick(now, &signals);
        self.dispatch(now, requests);
        self.poll_watcher(now);
    }

    fn fetch_state(&mut self) -> Result<BoardState, BlindChessErrors> {
        let observed = self.observer.fetch_board()?;
        BoardState::from_observed(&observed)
    }

    fn dispatch(&mut self, now: Instant, requests: Vec<SessionRequest>) {
        let mut queue: VecDeque<SessionRequest> = requests.into();

        while let Some(request) = queue.pop_front() {
            match request {
                SessionRequest::FetchBoard => {
                    let board = self.fetch_state();
                    queue.extend(self.machine.on_board_state(now, board));
                }
                SessionRequest::ExecuteMove(move_request) => {
                    if let Err(err) = self.executor.execute_move(&move_request) {
                        warn!("[SESSION] execute {move_request:?} failed: {err}");
                        // Follow-ups of the failed request no longer apply.
                        queue.clear();
                        queue.extend(self.machine.on_execution_failed());
                    }
                }
                SessionRequest::Touch(touch_request) => {
                    if let Err(err) = self.executor.touch(&touch_request) {
                        warn!("[SESSION] touch {touch_request:?} failed: {err}");
                        queue.clear();
                        queue.extend(self.machine.on_execution_failed());
                    }
                }
                SessionRequest::Announce(sentence) => self.speech.enqueue(sentence),
                SessionRequest::ResetVoice => self.voice.reset(),
            }
        }
    }

    fn poll_watcher(&mut self, now: Instant) {
        let state = match self.fetch_state() {
            Ok(state) => state,
            Err(err) => {
                debug!("[SESSION] watcher poll skipped: {err}");
                return;
            }
        };
        if !self.watcher.has_baseline() {
            self.machine.begin(state.player_color());
        } else {
            self.machine.set_player_color(state.player_color());
        }

        if let Some(detected) = self.watcher.observe(&state) {
            let requests = self.machine.on_move_detected(&detected);
            self.dispatch(now, requests);
        }
    }
}
