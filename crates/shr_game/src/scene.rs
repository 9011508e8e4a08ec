//! Scene lifecycle: start screen, the game itself, and the two terminal
//! screens. The `GameSession` -- and with it every per-scene timer and
//! counter -- is created when the game scene is entered and dropped the
//! moment it is left, so nothing scheduled in one playthrough can fire
//! into the next.

use shr_core::{classify, GameConfig, GameSession, Terminal, TickOutput, VolumeLevel};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    #[default]
    Start,
    Game,
    GameOver,
    Win,
}

impl SceneId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Game => "game",
            Self::GameOver => "gameover",
            Self::Win => "win",
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub struct SceneController {
    config: GameConfig,
    seed: u64,
    active: SceneId,
    session: Option<GameSession>,
}

impl SceneController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            active: SceneId::Start,
            session: None,
        }
    }

    pub fn active(&self) -> SceneId {
        self.active
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.active, SceneId::GameOver | SceneId::Win)
    }

    pub fn go_to(&mut self, scene: SceneId) {
        log::info!("Scene transition: {} -> {}", self.active, scene);
        // The session lives exactly as long as the game scene.
        self.session = if scene == SceneId::Game {
            Some(GameSession::new(self.config.clone(), self.seed))
        } else {
            None
        };
        self.active = scene;
    }

    pub fn set_paused(&mut self, paused: bool) {
        if let Some(session) = &mut self.session {
            session.set_paused(paused);
        }
    }

    /// Feed one raw volume sample into whatever the active scene does with
    /// it. Returns the game scene's tick output when one was produced.
    pub fn tick(&mut self, raw_volume: f32, dt: f32) -> Option<TickOutput> {
        match self.active {
            SceneId::Start => {
                // Shout to start: only the top band opens the game.
                if classify(raw_volume, &self.config.thresholds) == VolumeLevel::Screaming {
                    self.go_to(SceneId::Game);
                }
                None
            }
            SceneId::Game => {
                let session = self
                    .session
                    .as_mut()
                    .expect("game scene always owns a session");
                let out = session.tick(raw_volume, dt);
                match out.transition {
                    Some(Terminal::GameOver) => self.go_to(SceneId::GameOver),
                    Some(Terminal::Win) => self.go_to(SceneId::Win),
                    None => {}
                }
                Some(out)
            }
            SceneId::GameOver | SceneId::Win => None,
        }
    }
}
