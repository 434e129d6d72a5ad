use std::time::Duration;

use crate::config::RelayConfig;
use crate::types::{ParamMap, PlaybackParams, Rect, SurfaceHandle, WindowToken};

/// Shared surface of the per-variant command enums.
///
/// The dispatch queue and the execution loop only ever reason about commands
/// through this trait; everything kind-specific stays inside the exhaustive
/// matches of the enum impls.
pub trait RelayCommand: Send + 'static {
    /// Stable lowercase label used in log fields and budget diagnostics.
    fn label(&self) -> &'static str;

    /// True when enqueuing `self` supersedes the still-pending `pending`,
    /// which is then discarded without executing.
    fn coalesces_with(&self, pending: &Self) -> bool {
        let _ = pending;
        false
    }

    /// Hard completion budget for this command kind.
    fn hard_budget(&self, config: &RelayConfig) -> Duration {
        config.command_budget
    }
}

#[derive(Debug, Clone)]
pub enum PlaybackCommand {
    Release,
    SetMain {
        is_main: bool,
    },
    SetSurface {
        surface: Option<SurfaceHandle>,
    },
    DispatchSurfaceChanged {
        format: i32,
        width: i32,
        height: i32,
    },
    SetStreamVolume {
        volume: f32,
    },
    Tune {
        uri: String,
        params: ParamMap,
    },
    SetCaptionEnabled {
        enabled: bool,
    },
    SelectTrack {
        track_type: i32,
        track_id: Option<String>,
    },
    AppPrivateCommand {
        action: String,
        data: ParamMap,
    },
    CreateOverlayView {
        window_token: WindowToken,
        frame: Rect,
    },
    RelayoutOverlayView {
        frame: Rect,
    },
    RemoveOverlayView,
    UnblockContent {
        rating: String,
    },
    TimeShiftPlay {
        uri: String,
    },
    TimeShiftPause,
    TimeShiftResume,
    TimeShiftSeekTo {
        time_ms: i64,
    },
    TimeShiftSetPlaybackParams {
        params: PlaybackParams,
    },
    TimeShiftEnablePositionTracking {
        enable: bool,
    },
}

impl RelayCommand for PlaybackCommand {
    fn label(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::SetMain { .. } => "set_main",
            Self::SetSurface { .. } => "set_surface",
            Self::DispatchSurfaceChanged { .. } => "dispatch_surface_changed",
            Self::SetStreamVolume { .. } => "set_stream_volume",
            Self::Tune { .. } => "tune",
            Self::SetCaptionEnabled { .. } => "set_caption_enabled",
            Self::SelectTrack { .. } => "select_track",
            Self::AppPrivateCommand { .. } => "app_private_command",
            Self::CreateOverlayView { .. } => "create_overlay_view",
            Self::RelayoutOverlayView { .. } => "relayout_overlay_view",
            Self::RemoveOverlayView => "remove_overlay_view",
            Self::UnblockContent { .. } => "unblock_content",
            Self::TimeShiftPlay { .. } => "time_shift_play",
            Self::TimeShiftPause => "time_shift_pause",
            Self::TimeShiftResume => "time_shift_resume",
            Self::TimeShiftSeekTo { .. } => "time_shift_seek_to",
            Self::TimeShiftSetPlaybackParams { .. } => "time_shift_set_playback_params",
            Self::TimeShiftEnablePositionTracking { .. } => "time_shift_enable_position_tracking",
        }
    }

    fn coalesces_with(&self, pending: &Self) -> bool {
        matches!((self, pending), (Self::Tune { .. }, Self::Tune { .. }))
    }

    fn hard_budget(&self, config: &RelayConfig) -> Duration {
        match self {
            Self::Tune { .. } => config.tune_budget,
            _ => config.command_budget,
        }
    }
}

#[derive(Debug, Clone)]
pub enum RecordingCommand {
    Release,
    Tune {
        uri: String,
        params: ParamMap,
    },
    AppPrivateCommand {
        action: String,
        data: ParamMap,
    },
    StartRecording {
        program_uri: Option<String>,
    },
    StopRecording,
}

impl RelayCommand for RecordingCommand {
    fn label(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Tune { .. } => "tune",
            Self::AppPrivateCommand { .. } => "app_private_command",
            Self::StartRecording { .. } => "start_recording",
            Self::StopRecording => "stop_recording",
        }
    }

    fn coalesces_with(&self, pending: &Self) -> bool {
        matches!((self, pending), (Self::Tune { .. }, Self::Tune { .. }))
    }

    fn hard_budget(&self, config: &RelayConfig) -> Duration {
        match self {
            Self::Tune { .. } => config.tune_budget,
            _ => config.command_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{PlaybackCommand, RecordingCommand, RelayCommand};
    use crate::config::RelayConfig;
    use crate::types::ParamMap;

    fn tune(uri: &str) -> PlaybackCommand {
        PlaybackCommand::Tune {
            uri: uri.to_string(),
            params: ParamMap::new(),
        }
    }

    #[test]
    fn only_tune_coalesces_with_tune() {
        let newer = tune("service://channel/2");
        assert!(newer.coalesces_with(&tune("service://channel/1")));
        assert!(!newer.coalesces_with(&PlaybackCommand::Release));
        assert!(!PlaybackCommand::RemoveOverlayView.coalesces_with(&tune("service://channel/1")));
    }

    #[test]
    fn tune_gets_the_shorter_hard_budget() {
        let config = RelayConfig::default();
        assert_eq!(
            tune("service://channel/1").hard_budget(&config),
            Duration::from_millis(2000)
        );
        assert_eq!(
            PlaybackCommand::TimeShiftPause.hard_budget(&config),
            Duration::from_millis(5000)
        );
        assert_eq!(
            RecordingCommand::StopRecording.hard_budget(&config),
            Duration::from_millis(5000)
        );
        let recording_tune = RecordingCommand::Tune {
            uri: "service://channel/1".to_string(),
            params: ParamMap::new(),
        };
        assert_eq!(
            recording_tune.hard_budget(&config),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn recording_tune_coalesces_too() {
        let first = RecordingCommand::Tune {
            uri: "service://channel/1".to_string(),
            params: ParamMap::new(),
        };
        let second = RecordingCommand::Tune {
            uri: "service://channel/2".to_string(),
            params: ParamMap::new(),
        };
        assert!(second.coalesces_with(&first));
        assert!(!second.coalesces_with(&RecordingCommand::StopRecording));
    }
}
