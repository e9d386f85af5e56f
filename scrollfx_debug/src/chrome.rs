// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] buffers events as JSON objects and
//! [`write_to`](ChromeTraceSink::write_to) emits them as a
//! [Chrome Trace Event Format][format] array, loadable in `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/).
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use scrollfx_core::effects::EffectGroup;
use scrollfx_core::time::Timebase;
use scrollfx_core::trace::{
    DiscoveryEvent, FrameSkippedEvent, FrameSummary, FrameTickEvent, PhaseBeginEvent,
    PhaseEndEvent, SettleEvent, TraceSink,
};

/// Collects trace events in memory for export.
#[derive(Debug)]
pub struct ChromeTraceSink {
    timebase: Timebase,
    events: Vec<Value>,
    /// Time of the latest tick; events without their own timestamp use it.
    last_ts: f64,
}

impl ChromeTraceSink {
    /// Creates an empty sink converting timestamps with `timebase`.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self {
            timebase,
            events: Vec::new(),
            last_ts: 0.0,
        }
    }

    /// Buffered events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the buffered events as a JSON array.
    ///
    /// # Errors
    ///
    /// Propagates write and serialization failures.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }

    fn instant(&mut self, name: &str, cat: &str, ts: f64, scope: &str, args: Value) {
        self.events.push(json!({
            "ph": "i",
            "name": name,
            "cat": cat,
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "s": scope,
            "args": args,
        }));
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let ts = self.us(e.now.ticks());
        self.last_ts = ts;
        self.instant(
            "FrameTick",
            "Scheduler",
            ts,
            "g",
            json!({
                "frame_index": e.frame_index,
                "raw": e.raw,
                "smoothed": e.smoothed,
            }),
        );
        self.events.push(json!({
            "ph": "C",
            "name": "scroll",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "raw": e.raw,
                "smoothed": e.smoothed,
            }
        }));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.events.push(json!({
            "ph": "B",
            "name": e.phase.name(),
            "cat": "Frame",
            "ts": self.us(e.timestamp.ticks()),
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
            }
        }));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.events.push(json!({
            "ph": "E",
            "name": e.phase.name(),
            "cat": "Frame",
            "ts": self.us(e.timestamp.ticks()),
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
            }
        }));
    }

    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        let mut counts = serde_json::Map::new();
        for group in EffectGroup::ALL {
            counts.insert(group.name().into(), e.count(group).into());
        }
        counts.insert("pass".into(), e.pass.into());
        let ts = self.last_ts;
        self.instant("Discovery", "Registry", ts, "g", Value::Object(counts));
    }

    fn on_frame_skipped(&mut self, e: &FrameSkippedEvent) {
        let ts = self.last_ts;
        self.instant(
            "FrameSkipped",
            "Scheduler",
            ts,
            "t",
            json!({
                "frame_index": e.frame_index,
                "reason": format!("{:?}", e.reason),
            }),
        );
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        let ts = self.us(e.now.ticks());
        self.instant(
            "Settle",
            "Scheduler",
            ts,
            "g",
            json!({
                "frame_index": e.frame_index,
                "smoothed": e.smoothed,
            }),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let ts = self.us(s.now.ticks());
        let total_us = self.us(s.total_ticks());
        self.instant(
            "FrameSummary",
            "Summary",
            ts,
            "g",
            json!({
                "frame_index": s.frame_index,
                "tracked": s.tracked,
                "changed": s.changed,
                "skipped": s.skipped,
                "total_us": total_us,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_core::config::EffectConfig;
    use scrollfx_core::headless::{Node, StaticDocument};
    use scrollfx_core::scheduler::FrameScheduler;
    use scrollfx_core::time::HostTime;
    use scrollfx_core::timing::FrameTick;
    use scrollfx_core::trace::{PhaseKind, Tracer};

    fn exported(sink: &ChromeTraceSink) -> Vec<Value> {
        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new(Timebase::MICROS);
        sink.on_frame_tick(&FrameTickEvent {
            frame_index: 0,
            now: HostTime(1_000),
            raw: 10.0,
            smoothed: 1.2,
        });
        sink.on_phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Parallax,
            timestamp: HostTime(1_000),
        });
        sink.on_phase_end(&PhaseEndEvent {
            frame_index: 0,
            phase: PhaseKind::Parallax,
            timestamp: HostTime(1_050),
        });

        let parsed = exported(&sink);
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "FrameTick");
        assert_eq!(parsed[0]["ts"], 1000.0);
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[2]["ph"], "B");
        assert_eq!(parsed[2]["name"], "parallax");
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["ts"], 1050.0);
    }

    #[test]
    fn export_empty_sink() {
        let sink = ChromeTraceSink::new(Timebase::NANOS);
        assert!(exported(&sink).is_empty());
    }

    #[test]
    fn records_a_scheduler_run() {
        let markers = EffectConfig::standard().markers;
        let mut doc = StaticDocument::new(1280.0, 800.0);
        doc.push(Node::new(300.0, 100.0).with_marker(markers.glow));
        doc.push(Node::new(900.0, 100.0).with_marker(markers.float));

        let mut sink = ChromeTraceSink::new(Timebase::MICROS);
        let mut scheduler = FrameScheduler::new(doc, EffectConfig::standard(), Timebase::MICROS);
        scheduler.discover(&mut Tracer::new(&mut sink));
        scheduler.scroll_to(200.0, HostTime(0));
        for frame_index in 0..3 {
            scheduler.tick(
                FrameTick {
                    now: HostTime(frame_index * 16_667),
                    frame_index,
                },
                &mut Tracer::new(&mut sink),
            );
        }

        let parsed = exported(&sink);
        assert_eq!(parsed[0]["name"], "Discovery");
        assert_eq!(parsed[0]["args"]["glow"], 1);
        assert_eq!(parsed[0]["args"]["float"], 1);

        let begins = parsed.iter().filter(|e| e["ph"] == "B").count();
        let ends = parsed.iter().filter(|e| e["ph"] == "E").count();
        assert_eq!(begins, 3 * PhaseKind::ALL.len());
        assert_eq!(begins, ends);

        let summaries: Vec<&Value> = parsed
            .iter()
            .filter(|e| e["name"] == "FrameSummary")
            .collect();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0]["args"]["tracked"], 2);
    }
}
