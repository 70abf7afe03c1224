//! Character model asset and its one-shot loading.
//!
//! The host loads the model however it likes and hands the scene the
//! receiving end of a oneshot channel. The scene polls it once per tick.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::core::{Error, Result};

/// Character model as far as the scene cares: a name, a scale and a looping
/// walk clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterAsset {
    pub name: String,
    /// Uniform scale applied to the model.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Length of the walk clip in seconds.
    #[serde(default = "default_walk_duration")]
    pub walk_clip_duration: f32,
}

fn default_scale() -> f32 {
    1.0
}

fn default_walk_duration() -> f32 {
    1.0
}

impl CharacterAsset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scale: default_scale(),
            walk_clip_duration: default_walk_duration(),
        }
    }
}

/// Read a character manifest (JSON) from disk.
pub async fn load_character(path: impl AsRef<Path>) -> Result<CharacterAsset> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let asset: CharacterAsset = serde_json::from_str(&text)?;
    if asset.walk_clip_duration.is_nan() || asset.walk_clip_duration <= 0.0 {
        return Err(Error::Asset(format!(
            "{}: walk clip duration must be positive",
            path.display()
        )));
    }
    log::info!("Loaded character '{}' from {}", asset.name, path.display());
    Ok(asset)
}

/// An asset that may still be loading.
#[derive(Debug)]
pub enum AssetSlot<T> {
    /// Nothing requested.
    Empty,
    /// Waiting on the loader.
    Pending(oneshot::Receiver<Result<T>>),
    Ready(T),
    /// The load failed or the loader went away.
    Failed,
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> AssetSlot<T> {
    /// New pending slot plus the sender the loader completes.
    pub fn pending() -> (oneshot::Sender<Result<T>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self::Pending(rx))
    }

    /// Check a pending load without blocking. Returns the asset once ready.
    ///
    /// A failed load is logged once and the slot becomes `Failed`.
    pub fn poll(&mut self, label: &str) -> Option<&T> {
        if let Self::Pending(rx) = self {
            match rx.try_recv() {
                Ok(Ok(asset)) => {
                    log::debug!("{} loaded", label);
                    *self = Self::Ready(asset);
                }
                Ok(Err(e)) => {
                    log::warn!("Failed to load {}: {}", label, e);
                    *self = Self::Failed;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    log::warn!("Failed to load {}: loader dropped", label);
                    *self = Self::Failed;
                }
            }
        }
        self.get()
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    /// Drop whatever is held. A load completing later goes nowhere.
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}

/// Playback state of the looping walk clip.
#[derive(Clone, Debug)]
pub struct WalkCycle {
    pub time: f32,
    pub speed: f32,
    pub playing: bool,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            playing: false,
        }
    }
}

impl WalkCycle {
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause (keeps current time)
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and rewind
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Advance a clip of `duration` seconds, looping.
    pub fn advance(&mut self, dt: f32, duration: f32) {
        if !self.playing || duration <= 0.0 {
            return;
        }
        self.time = (self.time + dt * self.speed) % duration;
    }

    /// Normalized position in the clip, `[0, 1)`.
    pub fn phase(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            0.0
        } else {
            self.time / duration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_pending_then_ready() {
        let (tx, mut slot) = AssetSlot::pending();
        assert!(slot.poll("farmer").is_none());
        assert!(matches!(slot, AssetSlot::Pending(_)));
        tx.send(Ok(CharacterAsset::new("farmer"))).unwrap();
        assert_eq!(slot.poll("farmer").map(|a| a.name.as_str()), Some("farmer"));
    }

    #[test]
    fn test_slot_failure_is_terminal() {
        let (tx, mut slot) = AssetSlot::<CharacterAsset>::pending();
        tx.send(Err(Error::Asset("missing".into()))).unwrap();
        assert!(slot.poll("farmer").is_none());
        assert!(matches!(slot, AssetSlot::Failed));
        assert!(slot.poll("farmer").is_none());
    }

    #[test]
    fn test_slot_dropped_sender_fails() {
        let (tx, mut slot) = AssetSlot::<CharacterAsset>::pending();
        drop(tx);
        assert!(slot.poll("farmer").is_none());
        assert!(matches!(slot, AssetSlot::Failed));
    }

    #[test]
    fn test_cleared_slot_ignores_late_load() {
        let (tx, mut slot) = AssetSlot::pending();
        slot.clear();
        // Receiver is gone, so the send fails and nothing is applied
        assert!(tx.send(Ok(CharacterAsset::new("farmer"))).is_err());
        assert!(slot.poll("farmer").is_none());
    }

    #[test]
    fn test_walk_cycle_loops() {
        let mut walk = WalkCycle::default();
        walk.advance(0.5, 1.0);
        assert_eq!(walk.time, 0.0);
        walk.play();
        walk.advance(0.75, 1.0);
        walk.advance(0.5, 1.0);
        assert!((walk.time - 0.25).abs() < 1e-5);
        walk.stop();
        assert_eq!(walk.time, 0.0);
    }

    #[tokio::test]
    async fn test_load_character_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("farmer.json");
        std::fs::write(&path, r#"{ "name": "farmer", "walk_clip_duration": 0.8 }"#).unwrap();
        let asset = load_character(&path).await.unwrap();
        assert_eq!(asset.name, "farmer");
        assert_eq!(asset.scale, 1.0);
        assert!((asset.walk_clip_duration - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_load_character_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_character(dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
