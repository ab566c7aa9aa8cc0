//! Real-input FFT processing with windowing

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use super::windows::hann;
use crate::error::Result;

/// Windowed magnitude-spectrum computation for fixed-length frames
pub struct FftProcessor {
    fft: Arc<dyn RealToComplex<f64>>,
    window: Vec<f64>,
    input: Vec<f64>,
    output: Vec<Complex<f64>>,
    fft_size: usize,
}

impl FftProcessor {
    /// Plan a Hann-windowed real FFT of `fft_size` points
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let input = fft.make_input_vec();
        let output = fft.make_output_vec();
        Self {
            fft,
            window: hann(fft_size),
            input,
            output,
            fft_size,
        }
    }

    /// Magnitudes of the `fft_size / 2 + 1` non-negative frequency bins.
    ///
    /// Frames shorter than the FFT size are zero-padded.
    pub fn magnitude_spectrum(&mut self, samples: &[f32], magnitudes: &mut Vec<f64>) -> Result<()> {
        for (i, slot) in self.input.iter_mut().enumerate() {
            *slot = samples.get(i).map_or(0.0, |&s| s as f64 * self.window[i]);
        }

        self.fft.process(&mut self.input, &mut self.output)?;

        magnitudes.clear();
        magnitudes.extend(self.output.iter().map(|c| c.norm()));
        Ok(())
    }

    /// Center frequency of every output bin
    pub fn bin_frequencies(&self, sample_rate: u32) -> Vec<f64> {
        let resolution = sample_rate as f64 / self.fft_size as f64;
        (0..self.num_bins()).map(|k| k as f64 * resolution).collect()
    }

    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}
