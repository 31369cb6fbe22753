//! Gesture scripts for `flick simulate`
//!
//! A script is a TOML file describing the element sizes and a list of
//! timestamped pointer inputs:
//!
//! ```toml
//! elastic = true
//!
//! [sizes]
//! viewport = { width = 300, height = 300 }
//! content = { width = 300, height = 900 }
//!
//! [[steps]]
//! at = 0
//! input = "start"
//! y = 200
//! ```

use anyhow::{Context, Result};
use flick_scroll::{PointerInput, Sample, ScrollerOptions, StaticSizes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepInput {
    Start,
    Move,
    End,
    Cancel,
}

/// One pointer input at `at` milliseconds
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Step {
    pub at: f64,
    pub input: StepInput,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Step {
    pub fn to_input(self) -> PointerInput {
        let sample = Sample::new(self.x, self.y, self.at);
        match self.input {
            StepInput::Start => PointerInput::Start(sample),
            StepInput::Move => PointerInput::Move(sample),
            StepInput::End => PointerInput::End(sample),
            StepInput::Cancel => PointerInput::Cancel,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureScript {
    #[serde(default)]
    pub elastic: bool,
    #[serde(default = "default_scrollbars")]
    pub scrollbars: bool,
    /// Animation frame interval in milliseconds
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    pub sizes: StaticSizes,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_scrollbars() -> bool {
    true
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

impl GestureScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read gesture script {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid gesture script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: GestureScript = toml::from_str(content)?;
        if !(script.frame_ms.is_finite() && script.frame_ms > 0.0) {
            anyhow::bail!("frameMs must be a positive number, got {}", script.frame_ms);
        }
        Ok(script)
    }

    pub fn options(&self) -> ScrollerOptions {
        ScrollerOptions {
            elastic: self.elastic,
            scrollbars: self.scrollbars,
        }
    }
}
