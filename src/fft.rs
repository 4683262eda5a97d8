use num_complex::Complex32;
use realfft::RealFftPlanner;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT plan for forward complex FFT operations.
///
/// Caches the rustfft plan for reuse across frames of a single
/// spectrogram pass.
///
/// # Example
/// ```
/// use skylark::fft::FftPlan;
/// use num_complex::Complex32;
///
/// let plan = FftPlan::new(512);
/// let mut buffer = vec![Complex32::new(1.0, 0.0); 512];
/// plan.forward(&mut buffer);
/// ```
pub struct FftPlan {
    forward: Arc<dyn Fft<f32>>,
}

impl FftPlan {
    /// Create a new FFT plan for a given size.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        Self { forward }
    }

    /// Perform forward FFT in-place.
    pub fn forward(&self, buffer: &mut [Complex32]) {
        self.forward.process(buffer);
    }
}

const _: () = {
    fn _assert_send_sync<T: Send + Sync>() {}
    fn _check() {
        _assert_send_sync::<FftPlan>();
    }
};

/// Compute the real-to-complex FFT (rfft) of a real-valued input.
///
/// Returns only the non-redundant half of the spectrum.
///
/// # Arguments
/// * `input` - Real-valued input signal
///
/// # Returns
/// Complex FFT output of length input.len() / 2 + 1
///
/// # Example
/// ```
/// use skylark::fft::rfft;
///
/// let signal = vec![1.0f32; 1024];
/// let spectrum = rfft(&signal);
/// assert_eq!(spectrum.len(), 513); // 1024/2 + 1
/// ```
pub fn rfft(input: &[f32]) -> Vec<Complex32> {
    if input.is_empty() {
        return Vec::new();
    }
    let len = input.len();
    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(len);
    let mut in_buf = input.to_vec();
    let mut out_buf = r2c.make_output_vec();
    let _ = r2c.process(&mut in_buf, &mut out_buf);
    out_buf
}
