// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted clocks, synthetic pages, and playback tracking for pagefold
//! demos and tests.
//!
//! The engine is entirely host-driven, so a test can play a whole transition
//! deterministically: build a [`PageFold`] over synthetic
//! [`Snapshot`] pages, start a fold, and [`drive`] it with a
//! [`ScriptedClock`]. The returned [`Playback`] records per-tick progress and
//! renders an ASCII sparkline for quick eyeballing in demo output.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use pagefold_core::container::{FoldFinished, PageFold, TickContent};
use pagefold_core::host::Snapshot;
use pagefold_core::surface::Surface;
use pagefold_core::time::{Duration, HostTime};

/// A deterministic tick source: a start time plus a fixed step.
#[derive(Clone, Copy, Debug)]
pub struct ScriptedClock {
    next: HostTime,
    step: Duration,
}

impl ScriptedClock {
    /// Creates a clock that starts at `start` and advances by `step` per
    /// tick.
    #[must_use]
    pub const fn new(start: HostTime, step: Duration) -> Self {
        Self { next: start, step }
    }

    /// Returns the timestamp the next [`advance`](Self::advance) will yield.
    #[must_use]
    pub const fn peek(&self) -> HostTime {
        self.next
    }

    /// Returns the current timestamp and steps the clock.
    pub fn advance(&mut self) -> HostTime {
        let now = self.next;
        self.next = now + self.step;
        now
    }
}

/// A synthetic page of a single solid color.
#[derive(Clone, Copy, Debug)]
pub struct SolidSnapshot {
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
    /// Fill color (`0xAARRGGBB`).
    pub color: u32,
}

impl Snapshot for SolidSnapshot {
    fn capture(&self) -> Surface {
        Surface::filled(self.width, self.height, self.color)
    }
}

/// A synthetic page of horizontal color bands, equal rows per band.
///
/// Useful for verifying which source rows end up where after a fold frame
/// is rasterized.
#[derive(Clone, Debug)]
pub struct BandedSnapshot {
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
    /// Band colors, top to bottom.
    pub bands: Vec<u32>,
}

impl Snapshot for BandedSnapshot {
    fn capture(&self) -> Surface {
        let mut surface = Surface::new(self.width, self.height);
        if self.bands.is_empty() {
            return surface;
        }
        for y in 0..self.height {
            let band = (y as usize * self.bands.len()) / self.height as usize;
            let color = self.bands[band];
            for x in 0..self.width {
                surface.set_pixel(x, y, color);
            }
        }
        surface
    }
}

/// One recorded tick of a playback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSample {
    /// Timestamp of the tick.
    pub now: HostTime,
    /// Fold progress if the tick composited a frame; `None` for resting
    /// ticks.
    pub progress: Option<f32>,
}

/// A recorded fold playback.
#[derive(Clone, Debug, Default)]
pub struct Playback {
    /// Per-tick samples, in order.
    pub samples: Vec<PlaybackSample>,
    /// Completion details if the fold finished during the playback.
    pub finished: Option<FoldFinished>,
}

impl Playback {
    /// Number of ticks that composited a frame.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.iter().filter(|s| s.progress.is_some()).count()
    }

    /// Renders the recorded progress as an ASCII sparkline, one character
    /// per frame tick. Progress 0 maps to the lowest level and 1 (or above,
    /// for overshooting curves) to the highest.
    #[must_use]
    pub fn sparkline_ascii(&self) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let mut out = String::new();
        for sample in &self.samples {
            let Some(progress) = sample.progress else {
                continue;
            };
            let t = f64::from(progress.clamp(0.0, 1.0));
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "t is clamped to [0, 1], so the level index is in range"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
        }
        out
    }
}

/// Ticks `fold` with timestamps from `clock` until it stops requesting
/// redraws (or `max_ticks` is reached), recording each tick.
///
/// Call after starting a fold; an idle container records a single resting
/// sample. The clock is left ready for the next playback.
pub fn drive<C: Snapshot>(
    fold: &mut PageFold<C>,
    clock: &mut ScriptedClock,
    max_ticks: usize,
) -> Playback {
    let mut playback = Playback::default();
    for _ in 0..max_ticks {
        let now = clock.advance();
        let result = fold.tick(now);
        playback.samples.push(PlaybackSample {
            now,
            progress: match &result.content {
                TickContent::Frame(frame) => Some(frame.progress),
                TickContent::Resting(_) => None,
            },
        });
        if result.finished.is_some() {
            playback.finished = result.finished;
        }
        if !result.needs_redraw {
            break;
        }
    }
    playback
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pagefold_core::fold::FoldDirection;
    use pagefold_core::surface::argb;
    use pagefold_core::time::Timebase;

    use super::*;

    const WHITE: u32 = argb(255, 255, 255, 255);
    const GRAY: u32 = argb(255, 128, 128, 128);

    fn two_page_fold() -> PageFold<SolidSnapshot> {
        let mut fold = PageFold::new(Timebase::MILLIS);
        fold.attach_children(vec![
            SolidSnapshot {
                width: 8,
                height: 6,
                color: WHITE,
            },
            SolidSnapshot {
                width: 8,
                height: 6,
                color: GRAY,
            },
        ]);
        fold.set_direction(FoldDirection::Up);
        fold
    }

    #[test]
    fn scripted_clock_steps_deterministically() {
        let mut clock = ScriptedClock::new(HostTime(100), Duration(16));
        assert_eq!(clock.peek(), HostTime(100));
        assert_eq!(clock.advance(), HostTime(100));
        assert_eq!(clock.advance(), HostTime(116));
        assert_eq!(clock.peek(), HostTime(132));
    }

    #[test]
    fn banded_snapshot_stripes_rows() {
        let page = BandedSnapshot {
            width: 2,
            height: 6,
            bands: vec![1, 2, 3],
        };
        let surface = page.capture();
        assert_eq!(surface.pixel(0, 0), 1);
        assert_eq!(surface.pixel(0, 2), 2);
        assert_eq!(surface.pixel(1, 5), 3);
    }

    #[test]
    fn drive_plays_a_fold_to_completion() {
        let mut fold = two_page_fold();
        fold.set_duration_ms(100);
        let mut clock = ScriptedClock::new(HostTime(0), Duration(25));

        fold.fold(clock.peek()).unwrap();
        let playback = drive(&mut fold, &mut clock, 64);

        // Frames at 0/25/50/75ms, completion at 100ms.
        assert_eq!(playback.frame_count(), 4);
        assert_eq!(playback.samples.len(), 5);
        let finished = playback.finished.expect("fold completes");
        assert_eq!(finished.index, 1);
        assert_eq!(finished.frames, 4);

        // Linear easing: progress is strictly increasing across frames.
        let progress: Vec<f32> = playback
            .samples
            .iter()
            .filter_map(|s| s.progress)
            .collect();
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn drive_on_idle_container_records_one_resting_sample() {
        let mut fold = two_page_fold();
        let mut clock = ScriptedClock::new(HostTime(0), Duration(16));
        let playback = drive(&mut fold, &mut clock, 10);
        assert_eq!(playback.samples.len(), 1);
        assert_eq!(playback.samples[0].progress, None);
        assert!(playback.finished.is_none());
    }

    #[test]
    fn sparkline_rises_for_a_linear_fold() {
        let mut fold = two_page_fold();
        fold.set_duration_ms(100);
        let mut clock = ScriptedClock::new(HostTime(0), Duration(10));
        fold.fold(clock.peek()).unwrap();
        let playback = drive(&mut fold, &mut clock, 64);

        let line = playback.sparkline_ascii();
        assert_eq!(line.len(), playback.frame_count());
        assert!(line.starts_with(' '), "starts at zero progress: {line:?}");
        assert!(line.ends_with('%'), "ends near full progress: {line:?}");
    }
}
