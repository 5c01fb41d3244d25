//! Weight history chart

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::prelude::Point;
use weightloss_protocol::{Frame, FRAME_HEIGHT, FRAME_WIDTH};

use super::cadence::{Cadence, RedrawCounter};
use super::canvas::{Canvas, Palette};
use crate::traits::{CollaboratorError, SharedWeightStore};
use crate::trend;

/// Which values of the weight log are plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChartSeries {
    /// Measured weights
    #[default]
    Weight,
    /// Smoothed trend
    Trend,
}

impl ChartSeries {
    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "weight" => Some(ChartSeries::Weight),
            "trend" => Some(ChartSeries::Trend),
            _ => None,
        }
    }
}

/// Where a chart re-reads its samples from
struct HistorySource {
    person: String,
    series: ChartSeries,
    store: SharedWeightStore,
}

/// Polyline of weight samples scaled to fill the panel
///
/// At most one sample per pixel column is kept, newest last.
pub struct WeightChartScreen {
    redraw: RedrawCounter,
    samples: Vec<f32>,
    source: Option<HistorySource>,
}

fn newest(mut samples: Vec<f32>) -> Vec<f32> {
    if samples.len() > FRAME_WIDTH {
        samples.drain(..samples.len() - FRAME_WIDTH);
    }
    samples
}

impl WeightChartScreen {
    /// A chart of fixed samples
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            redraw: RedrawCounter::new(Cadence::FirstPollOnly),
            samples: newest(samples),
            source: None,
        }
    }

    /// A chart of the history of `person`, re-read by [`Self::reload`]
    pub fn from_store(
        person: &str,
        series: ChartSeries,
        store: SharedWeightStore,
    ) -> Result<Self, CollaboratorError> {
        let mut screen = Self::new(Vec::new());
        screen.source = Some(HistorySource {
            person: person.to_string(),
            series,
            store,
        });
        screen.reload()?;
        Ok(screen)
    }

    /// Re-read the history so weights committed elsewhere show up
    pub fn reload(&mut self) -> Result<(), CollaboratorError> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let history = source.store.borrow_mut().read_history(&source.person)?;
        let samples = match source.series {
            ChartSeries::Weight => history.iter().map(|e| e.weight_kg).collect(),
            ChartSeries::Trend => trend::smooth(&history)
                .iter()
                .map(|p| p.trend_kg)
                .collect(),
        };
        log::debug!("chart for {}: {} samples", source.person, history.len());
        self.samples = newest(samples);
        Ok(())
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn does_need_update(&mut self) -> bool {
        self.redraw.poll()
    }

    /// Panel coordinates of every sample
    ///
    /// Samples are spaced `FRAME_WIDTH / n` pixels apart. The lowest value
    /// sits on the bottom row, the highest on the top row; a series without
    /// spread is drawn at half height.
    pub fn plot_points(&self) -> Vec<Point> {
        let n = self.samples.len();
        if n == 0 {
            return Vec::new();
        }
        let x_step = (FRAME_WIDTH / n) as i32;
        let min = self.samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let span = max - min;
        let height = FRAME_HEIGHT as f32;

        (0i32..)
            .zip(self.samples.iter())
            .map(|(i, &value)| {
                let y = if span <= f32::EPSILON {
                    FRAME_HEIGHT as i32 / 2
                } else {
                    (height - (value - min) / span * height) as i32
                };
                Point::new(i * x_step, y.clamp(0, FRAME_HEIGHT as i32 - 1))
            })
            .collect()
    }

    pub fn create_image(&self) -> Frame {
        let mut canvas = Canvas::new(Palette::DARK_ON_LIGHT);
        canvas.polyline(&self.plot_points());
        canvas.finish()
    }
}
