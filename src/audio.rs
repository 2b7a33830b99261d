//! Audio cues
//!
//! Gameplay fires cues through the `CuePlayer` capability and never looks at
//! the result. On the web the cues are sampled `.wav` files played through
//! `HtmlAudioElement`s; headless builds use `SilentCues`.

use serde::{Deserialize, Serialize};

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Start / try again button click
    Button,
    /// Every interrupt tap
    Interrupt,
    /// Background loop while a run is live
    GameLoop,
    /// Defeat sting
    Defeat,
    /// Victory sting
    Victory,
}

impl Cue {
    pub const ALL: [Cue; 5] = [
        Cue::Button,
        Cue::Interrupt,
        Cue::GameLoop,
        Cue::Defeat,
        Cue::Victory,
    ];

    pub fn asset_path(self) -> &'static str {
        match self {
            Cue::Button => "assets/Button.wav",
            Cue::Interrupt => "assets/Interrupt.wav",
            Cue::GameLoop => "assets/GameLoop.wav",
            Cue::Defeat => "assets/Defeat.wav",
            Cue::Victory => "assets/Victory.wav",
        }
    }

    /// Mix level before user volume settings
    pub fn base_volume(self) -> f32 {
        match self {
            Cue::Interrupt => 0.75,
            Cue::GameLoop => 0.55,
            Cue::Button | Cue::Defeat | Cue::Victory => 0.9,
        }
    }

    /// Routed through the music channel rather than sfx
    pub fn is_music(self) -> bool {
        self == Cue::GameLoop
    }
}

/// Fire-and-forget cue playback.
///
/// Implementations must tolerate any call at any time (audio locked, asset
/// missing) by doing nothing.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
    /// Start looping `cue`; a cue that is already looping keeps playing
    fn start_loop(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
}

/// No-op player for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: Cue) {}
    fn start_loop(&mut self, _cue: Cue) {}
    fn stop(&mut self, _cue: Cue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebCuePlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::{HashMap, HashSet};

    use wasm_bindgen::prelude::*;
    use web_sys::HtmlAudioElement;

    use super::{Cue, CuePlayer};
    use crate::settings::Settings;

    /// Cue player backed by preloaded `<audio>` elements
    pub struct WebCuePlayer {
        elements: HashMap<Cue, HtmlAudioElement>,
        looping: HashSet<Cue>,
        settings: Settings,
        unlocked: bool,
        /// Shared handler for rejected `play()` promises (e.g. autoplay blocked)
        on_reject: Closure<dyn FnMut(JsValue)>,
    }

    impl WebCuePlayer {
        pub fn new(settings: Settings) -> Self {
            let mut elements = HashMap::new();
            for cue in Cue::ALL {
                match HtmlAudioElement::new_with_src(cue.asset_path()) {
                    Ok(el) => {
                        el.set_preload("auto");
                        elements.insert(cue, el);
                    }
                    Err(e) => log::warn!("Failed to create audio element for {:?}: {:?}", cue, e),
                }
            }
            Self {
                elements,
                looping: HashSet::new(),
                settings,
                unlocked: false,
                on_reject: Closure::new(|e: JsValue| {
                    log::warn!("Audio playback rejected: {:?}", e);
                }),
            }
        }

        /// Allow playback (browsers require a user gesture first)
        pub fn unlock(&mut self) {
            if !self.unlocked {
                self.unlocked = true;
                log::info!("Audio unlocked");
            }
        }

        pub fn is_unlocked(&self) -> bool {
            self.unlocked
        }

        pub fn set_settings(&mut self, settings: Settings) {
            self.settings = settings;
            for cue in &self.looping {
                if let Some(el) = self.elements.get(cue) {
                    el.set_volume(self.volume_for(*cue) as f64);
                }
            }
        }

        fn volume_for(&self, cue: Cue) -> f32 {
            let channel = if cue.is_music() {
                self.settings.effective_music_volume()
            } else {
                self.settings.effective_sfx_volume()
            };
            (cue.base_volume() * channel).clamp(0.0, 1.0)
        }

        fn start(&self, cue: Cue, looped: bool) -> bool {
            if !self.unlocked {
                return false;
            }
            let Some(el) = self.elements.get(&cue) else {
                return false;
            };
            el.set_loop(looped);
            el.set_volume(self.volume_for(cue) as f64);
            el.set_current_time(0.0);
            match el.play() {
                Ok(promise) => {
                    let _ = promise.catch(&self.on_reject);
                    true
                }
                Err(e) => {
                    log::warn!("Failed to play {:?}: {:?}", cue, e);
                    false
                }
            }
        }
    }

    impl CuePlayer for WebCuePlayer {
        fn play(&mut self, cue: Cue) {
            self.start(cue, false);
        }

        fn start_loop(&mut self, cue: Cue) {
            if self.looping.contains(&cue) {
                return;
            }
            if self.start(cue, true) {
                self.looping.insert(cue);
            }
        }

        fn stop(&mut self, cue: Cue) {
            self.looping.remove(&cue);
            if let Some(el) = self.elements.get(&cue) {
                if let Err(e) = el.pause() {
                    log::warn!("Failed to pause {:?}: {:?}", cue, e);
                }
                el.set_current_time(0.0);
            }
        }
    }
}
