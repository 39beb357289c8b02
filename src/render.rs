use std::fmt::Write;

use anyhow::Result;
use log::error;

use crate::roulette::{Snapshot, SpinStatus};
use crate::wheel::Pointer;

pub trait Renderer: Send + Sync {
    fn format(&self, snapshot: &Snapshot) -> Result<String>;

    fn render(&self, snapshot: &Snapshot) {
        match self.format(snapshot) {
            Ok(out) => println!("{out}"),
            Err(why) => error!("failed to render state: {why:?}"),
        }
    }
}

/// One JSON object per line.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self, snapshot: &Snapshot) -> Result<String> {
        Ok(serde_json::to_string(snapshot)?)
    }
}

pub struct TextRenderer;

impl TextRenderer {
    fn status_line(snapshot: &Snapshot) -> String {
        match snapshot.status {
            SpinStatus::Spinning => match snapshot.target_rotation {
                Some(rotation) => format!("Spinning... turning the wheel {rotation} degrees"),
                None => "Spinning...".to_string(),
            },
            SpinStatus::Ready if snapshot.history.is_empty() => "Ready: spin the roulette".to_string(),
            SpinStatus::Ready => "Ready: spin again".to_string(),
            SpinStatus::NeedsMore => "Needs at least 2 participants".to_string(),
            SpinStatus::AllDrawn => "Everyone has been drawn!".to_string(),
        }
    }
}

impl Renderer for TextRenderer {
    fn format(&self, snapshot: &Snapshot) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "== Participants ({}) ==", snapshot.roster.len())?;
        if snapshot.roster.is_empty() {
            writeln!(out, "  No participants added yet")?;
        } else {
            writeln!(out, "  {}", snapshot.roster.join(", "))?;
        }

        writeln!(out, "== Wheel ==")?;
        if snapshot.wheel.is_empty() && !snapshot.roster.is_empty() {
            writeln!(out, "  Everyone has been drawn!")?;
        }
        for slot in &snapshot.wheel {
            let marker = match slot.pointer() {
                Some(Pointer::Top) => '^',
                Some(Pointer::Bottom) => 'v',
                None => ' ',
            };
            writeln!(out, "  {:>6.1}° {marker} {}", slot.angle, slot.name)?;
        }

        writeln!(out, "== Groups ==")?;
        if snapshot.history.is_empty() {
            writeln!(out, "  No draws yet")?;
        }
        for group in &snapshot.history {
            writeln!(out, "  Group {}: {}", group.index, group.members.join(" & "))?;
        }

        write!(out, "[{}]", Self::status_line(snapshot))?;
        Ok(out)
    }
}
