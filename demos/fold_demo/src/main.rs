// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end fold demo over synthetic pages.
//!
//! Folds from a banded "page A" to a banded "page B" with the bounce easing
//! curve over 3 seconds, ticking a scripted 16 ms clock. Selected frames are
//! rasterized and dumped as ASCII luminance art, followed by a progress
//! sparkline and the recorded trace. Pass a path argument to also write a
//! Chrome Trace Event Format JSON file:
//!
//! ```text
//! cargo run -p fold_demo -- fold_trace.json
//! ```

use pagefold_core::container::{PageFold, TickContent};
use pagefold_core::easing;
use pagefold_core::fold::FoldDirection;
use pagefold_core::surface::{Surface, alpha, argb, blue, green, red};
use pagefold_core::time::{Duration, HostTime, Timebase};
use pagefold_core::trace::Tracer;
use pagefold_debug::chrome;
use pagefold_debug::pretty::PrettyPrintSink;
use pagefold_debug::recorder::RecorderSink;
use pagefold_harness::{BandedSnapshot, Playback, PlaybackSample, ScriptedClock};

const PAGE_WIDTH: u32 = 48;
const PAGE_HEIGHT: u32 = 16;
const TICK_MS: u64 = 16;
const DURATION_MS: u64 = 3000;
/// Dump roughly this many frames as ASCII art.
const DUMPS: u64 = 6;

fn main() {
    let timebase = Timebase::MILLIS;
    let mut fold = PageFold::new(timebase);
    fold.attach_children(vec![
        BandedSnapshot {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            bands: vec![
                argb(255, 250, 250, 250),
                argb(255, 180, 180, 180),
                argb(255, 250, 250, 250),
                argb(255, 180, 180, 180),
            ],
        },
        BandedSnapshot {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            bands: vec![argb(255, 40, 40, 40), argb(255, 120, 120, 120)],
        },
    ]);
    fold.set_direction(FoldDirection::Up);
    fold.set_duration_ms(DURATION_MS);
    fold.set_easing(easing::bounce);

    let mut recorder = RecorderSink::new();
    let mut clock = ScriptedClock::new(HostTime(0), Duration::from_millis(TICK_MS, timebase));
    let mut playback = Playback::default();
    let mut out = Surface::new(PAGE_WIDTH, PAGE_HEIGHT);

    let total_ticks = DURATION_MS / TICK_MS;
    let dump_every = (total_ticks / DUMPS).max(1);

    {
        let mut tracer = Tracer::new(&mut recorder);
        fold.fold_traced(clock.peek(), &mut tracer)
            .expect("two pages attached");

        let mut tick_index = 0u64;
        loop {
            let now = clock.advance();
            let result = fold.tick_traced(now, &mut tracer);
            match &result.content {
                TickContent::Frame(frame) => {
                    playback.samples.push(PlaybackSample {
                        now,
                        progress: Some(frame.progress),
                    });
                    if tick_index % dump_every == 0 {
                        let quadrants = fold.quadrants().expect("folding");
                        pagefold_raster::render(frame, quadrants, &mut out);
                        println!(
                            "--- {:>5}ms  progress {:+.3}  angle {:+7.1}° ---",
                            now.ticks(),
                            frame.progress,
                            frame.angle_deg,
                        );
                        dump_ascii(&out);
                    }
                }
                TickContent::Resting(index) => {
                    playback.samples.push(PlaybackSample { now, progress: None });
                    println!("--- {:>5}ms  resting on page {index} ---", now.ticks());
                }
            }
            if let Some(finished) = &result.finished {
                playback.finished = Some(*finished);
            }
            if !result.needs_redraw {
                break;
            }
            tick_index += 1;
        }
    }

    println!();
    println!(
        "composited {} frames; progress sparkline:",
        playback.frame_count()
    );
    println!("  [{}]", playback.sparkline_ascii());

    println!();
    println!("trace ({} events; begin/end shown):", recorder.len());
    let mut pretty = PrettyPrintSink::with_writer(std::io::stdout(), timebase);
    replay_endpoints(&recorder, &mut pretty);

    if let Some(path) = std::env::args().nth(1) {
        let mut file = std::fs::File::create(&path).expect("create trace file");
        chrome::export(recorder.events(), timebase, &mut file).expect("write trace file");
        println!("wrote Chrome trace to {path}");
    }
}

/// Replays only the begin/end events into a sink (frame events are too
/// chatty for stdout).
fn replay_endpoints<W: std::io::Write>(recorder: &RecorderSink, sink: &mut PrettyPrintSink<W>) {
    use pagefold_core::trace::TraceSink as _;
    use pagefold_debug::recorder::RecordedEvent;

    for event in recorder.events() {
        match event {
            RecordedEvent::Begin(e) => sink.on_fold_begin(e),
            RecordedEvent::End(e) => sink.on_fold_end(e),
            RecordedEvent::Frame(_) => {}
        }
    }
}

/// Prints a surface as ASCII luminance art, one character per pixel.
fn dump_ascii(surface: &Surface) {
    const LEVELS: &[u8] = b" .:-=+*#%@";
    for y in 0..surface.height() {
        let mut line = String::with_capacity(surface.width() as usize);
        for x in 0..surface.width() {
            let p = surface.pixel(x, y);
            if alpha(p) < 16 {
                line.push(' ');
                continue;
            }
            let luma =
                (u32::from(red(p)) * 299 + u32::from(green(p)) * 587 + u32::from(blue(p)) * 114)
                    / 1000;
            let level = (luma as usize * (LEVELS.len() - 1)) / 255;
            line.push(LEVELS[level] as char);
        }
        println!("|{line}|");
    }
}
