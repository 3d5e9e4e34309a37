use rand::rngs::StdRng;

use crate::asset::{AffectorConfig, ColourStage};
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Interpolates particle colour through a gradient over each particle's
/// lifetime.
#[derive(Debug, Default, Clone)]
pub struct ColourInterpolatorAffector {
    stages: Vec<ColourStage>,
}

impl ColourInterpolatorAffector {
    /// Creates an interpolator with the given stages, sorted by time.
    pub fn new(mut stages: Vec<ColourStage>) -> Self {
        stages.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { stages }
    }

    /// The colour stages, ordered by time.
    pub fn stages(&self) -> &[ColourStage] {
        &self.stages
    }
}

impl AffectorDef for ColourInterpolatorAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::ColourInterpolator { stages } = config {
            *self = Self::new(stages.clone());
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, _dt: f32, _rng: &mut StdRng) {
        let Some(first) = self.stages.first() else {
            return;
        };
        let last = &self.stages[self.stages.len() - 1];

        for slot in 0..cpu_data.alive_count() {
            let i = cpu_data.alive_at(slot) as usize;
            let total = cpu_data.total_time_to_live[i];
            if total <= 0.0 {
                continue;
            }
            let age = 1.0 - cpu_data.time_to_live[i] / total;

            cpu_data.colour[i] = if age <= first.time {
                first.colour
            } else if age >= last.time {
                last.colour
            } else {
                let next = self
                    .stages
                    .iter()
                    .position(|stage| stage.time > age)
                    .unwrap_or(self.stages.len() - 1);
                let a = &self.stages[next - 1];
                let b = &self.stages[next];
                let span = b.time - a.time;
                let t = if span > 0.0 { (age - a.time) / span } else { 1.0 };
                a.colour.lerp(b.colour, t)
            };
        }
    }
}

/// Factory for [`ColourInterpolatorAffector`], registered as
/// `"colour_interpolator"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColourInterpolatorAffectorFactory;

impl AffectorDefFactory for ColourInterpolatorAffectorFactory {
    fn name(&self) -> &'static str {
        "colour_interpolator"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(ColourInterpolatorAffector::default())
    }
}
