//! Scene state machine
//!
//! Exactly one scene is active. Every transition runs in the same order:
//! 1. take the old scene's entities off the stage
//! 2. clear all frame callbacks
//! 3. build the new scene (dropping the old one and its state)
//! 4. register the new scene's frame callbacks
//!
//! Clearing callbacks before anything new is registered means a stale
//! physics callback can never touch a discarded `GameState`.

pub mod registry;
pub mod stage;


use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::share::ShareRequest;
use crate::sim::{GameState, TickOutcome, tick};

pub use registry::{CallbackId, FrameCallback, FrameCallbackRegistry};
pub use stage::{
    EntityId, EntityKind, FreeSlots, HeadlessEntity, HeadlessStage, Stage, TextStyle,
};

/// User input delivered by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Ball pressed
    Activate,
    /// Retry button pressed
    Retry,
    /// Share button pressed
    Share,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Activate => "activate",
            Signal::Retry => "retry",
            Signal::Share => "share",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "activate" => Some(Signal::Activate),
            "retry" => Some(Signal::Retry),
            "share" => Some(Signal::Share),
            _ => None,
        }
    }
}

/// Which scene is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Playing,
    Result,
}

/// A round in progress
#[derive(Debug)]
pub struct PlayingScene {
    pub state: GameState,
    ball: EntityId,
    score_text: EntityId,
}

/// The results screen after the ball dropped out
#[derive(Debug)]
pub struct ResultScene {
    pub final_score: u32,
    headline: EntityId,
    retry_button: EntityId,
    share_button: EntityId,
}

/// The active scene and the entities it owns
#[derive(Debug)]
pub enum Scene {
    Playing(PlayingScene),
    Result(ResultScene),
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Playing(_) => SceneKind::Playing,
            Scene::Result(_) => SceneKind::Result,
        }
    }

    /// Entities this scene put on stage
    pub fn entities(&self) -> Vec<EntityId> {
        match self {
            Scene::Playing(p) => vec![p.ball, p.score_text],
            Scene::Result(r) => vec![r.headline, r.retry_button, r.share_button],
        }
    }
}

enum Transition {
    ToResult { final_score: u32 },
    ToPlaying,
}

/// Owns the active scene, its frame callbacks and the stage it draws on
pub struct SceneMachine<S: Stage> {
    stage: S,
    settings: Settings,
    registry: FrameCallbackRegistry,
    scene: Scene,
    /// Frames dispatched so far
    frame: u64,
    /// Scene transitions so far (startup not counted)
    transitions: u32,
    /// Frame callbacks invoked so far
    callbacks_run: u64,
}

impl<S: Stage> SceneMachine<S> {
    /// Start in the Playing scene
    pub fn new(mut stage: S, settings: Settings) -> Self {
        let scene = Scene::Playing(build_playing(&mut stage, &settings));
        let mut registry = FrameCallbackRegistry::new();
        registry.register(FrameCallback::PlayingUpdate);
        log::info!("Round started");

        Self {
            stage,
            settings,
            registry,
            scene,
            frame: 0,
            transitions: 0,
            callbacks_run: 0,
        }
    }

    /// Run every live frame callback once. Called by the ticker each display frame.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        for (id, callback) in self.registry.snapshot() {
            // An earlier callback this frame may have changed scenes
            if !self.registry.is_live(id) {
                continue;
            }
            self.run_callback(callback);
        }
    }

    /// Deliver a user signal; `Share` yields the request to open
    pub fn dispatch(&mut self, signal: Signal) -> Option<ShareRequest> {
        match signal {
            Signal::Activate => {
                self.on_ball_activate();
                None
            }
            Signal::Retry => {
                self.on_retry_clicked();
                None
            }
            Signal::Share => self.on_share_clicked(),
        }
    }

    pub fn on_ball_activate(&mut self) {
        match &mut self.scene {
            Scene::Playing(playing) => {
                playing.state.activate(&self.settings.physics);
                log::debug!(
                    "Ball activated (score {}, y {:.1})",
                    playing.state.score,
                    playing.state.ball.pos.y
                );
            }
            Scene::Result(_) => log::debug!("Ignoring activate on results screen"),
        }
    }

    pub fn on_retry_clicked(&mut self) {
        match self.scene {
            Scene::Result(_) => self.transition(Transition::ToPlaying),
            Scene::Playing(_) => log::debug!("Ignoring retry during play"),
        }
    }

    pub fn on_share_clicked(&mut self) -> Option<ShareRequest> {
        match &self.scene {
            Scene::Result(result) => {
                let request = ShareRequest::for_score(result.final_score, &self.settings.share);
                log::info!("Sharing score {}", result.final_score);
                Some(request)
            }
            Scene::Playing(_) => {
                log::debug!("Ignoring share during play");
                None
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    /// State of the round in progress, if playing
    pub fn game_state(&self) -> Option<&GameState> {
        match &self.scene {
            Scene::Playing(playing) => Some(&playing.state),
            Scene::Result(_) => None,
        }
    }

    /// Score of the finished round, if on the results screen
    pub fn final_score(&self) -> Option<u32> {
        match &self.scene {
            Scene::Result(result) => Some(result.final_score),
            Scene::Playing(_) => None,
        }
    }

    pub fn registry(&self) -> &FrameCallbackRegistry {
        &self.registry
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn callbacks_run(&self) -> u64 {
        self.callbacks_run
    }

    fn run_callback(&mut self, callback: FrameCallback) {
        self.callbacks_run += 1;
        match callback {
            FrameCallback::PlayingUpdate => self.update_playing(),
        }
    }

    fn update_playing(&mut self) {
        let Scene::Playing(playing) = &mut self.scene else {
            log::error!("Playing update fired outside the Playing scene");
            return;
        };

        // HUD refreshes even while the ball rests
        self.stage
            .set_text(playing.score_text, &playing.state.score_text());

        match tick(&mut playing.state, &self.settings.physics) {
            TickOutcome::Frozen => {}
            TickOutcome::Moved { bounced } => {
                self.stage.set_position(playing.ball, playing.state.ball.pos);
                if let Some(wall) = bounced {
                    log::trace!("Ball bounced off {:?} wall", wall);
                }
            }
            TickOutcome::BallLost { final_score } => {
                self.transition(Transition::ToResult { final_score });
            }
        }
    }

    fn transition(&mut self, to: Transition) {
        for id in self.scene.entities() {
            self.stage.remove_from_scene(id);
        }
        self.registry.clear_all();

        self.scene = match to {
            Transition::ToResult { final_score } => {
                log::info!("Round over with score {}", final_score);
                Scene::Result(build_result(&mut self.stage, final_score))
            }
            Transition::ToPlaying => {
                log::info!("Round started");
                Scene::Playing(build_playing(&mut self.stage, &self.settings))
            }
        };

        if let Scene::Playing(_) = self.scene {
            self.registry.register(FrameCallback::PlayingUpdate);
        }
        self.transitions += 1;
    }
}

fn build_playing<S: Stage>(stage: &mut S, settings: &Settings) -> PlayingScene {
    let state = GameState::new(&settings.physics);

    let ball = stage.create_entity(EntityKind::Ball {
        size: settings.physics.ball_width,
        signal: Signal::Activate,
    });
    stage.set_position(ball, state.ball.pos);
    stage.add_to_scene(ball);

    let score_text = stage.create_entity(EntityKind::Text {
        text: state.score_text(),
        style: TextStyle::HUD,
    });
    stage.set_position(score_text, Vec2::ZERO);
    stage.add_to_scene(score_text);

    PlayingScene {
        state,
        ball,
        score_text,
    }
}

fn build_result<S: Stage>(stage: &mut S, final_score: u32) -> ResultScene {
    let headline = stage.create_entity(EntityKind::Text {
        text: format!("SCORE:{final_score}で力尽きた"),
        style: TextStyle::HEADLINE,
    });
    stage.set_position(headline, RESULT_HEADLINE_POS);
    stage.add_to_scene(headline);

    let retry_button = spawn_button(stage, "もう一度", 0xff0000, Signal::Retry, RETRY_BUTTON_POS);
    let share_button = spawn_button(stage, "ツイート", 0x0000ff, Signal::Share, SHARE_BUTTON_POS);

    ResultScene {
        final_score,
        headline,
        retry_button,
        share_button,
    }
}

fn spawn_button<S: Stage>(
    stage: &mut S,
    label: &str,
    color: u32,
    signal: Signal,
    pos: Vec2,
) -> EntityId {
    let id = stage.create_entity(EntityKind::Button {
        label: label.to_string(),
        size: BUTTON_SIZE,
        color,
        alpha: 0.6,
        signal,
    });
    stage.set_position(id, pos);
    stage.add_to_scene(id);
    id
}
