use serde::{Deserialize, Serialize};

/// Heterogeneous key/value arguments carried by tune and private commands.
pub type ParamMap = serde_json::Map<String, serde_json::Value>;

/// Opaque reference to a rendering surface owned by the display side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);

/// Opaque token identifying the window an overlay view attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFallback {
    #[default]
    Default,
    Mute,
    Fail,
}

/// Rate parameters for time-shifted playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackParams {
    pub speed: f32,
    pub pitch: f32,
    pub audio_fallback: AudioFallback,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            pitch: 1.0,
            audio_fallback: AudioFallback::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn rect_dimensions() {
        let rect = Rect::new(10, 20, 110, 220);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 200);
    }
}
