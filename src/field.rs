use crate::wave::{RandomSource, Wave, WAVE_COUNT};

/// The drawing surface dimensions together with the waves plotted on it.
///
/// Waves are regenerated as a whole on every [`WaveField::resize`]; the
/// field never mutates an individual wave.
#[derive(Debug)]
pub struct WaveField<R> {
    width: u32,
    height: u32,
    waves: [Wave; WAVE_COUNT],
    rng: R,
}

impl<R: RandomSource> WaveField<R> {
    pub fn new(width: u32, height: u32, mut rng: R) -> Self {
        let waves = Self::generate(&mut rng, height);
        Self { width, height, waves, rng }
    }

    /// Adopts new dimensions and discards the previous waves.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.waves = Self::generate(&mut self.rng, height);
    }

    fn generate(rng: &mut R, height: u32) -> [Wave; WAVE_COUNT] {
        std::array::from_fn(|_| Wave::random(rng, height))
    }
}

impl<R> WaveField<R> {
    /// Builds a field from known waves, bypassing the random source.
    pub fn with_waves(width: u32, height: u32, waves: [Wave; WAVE_COUNT], rng: R) -> Self {
        Self { width, height, waves, rng }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn waves(&self) -> &[Wave; WAVE_COUNT] {
        &self.waves
    }

    /// Points of `wave` at every integer column in `[0, width)`.
    pub fn polyline<'a>(&self, wave: &'a Wave, now_ms: f64) -> impl Iterator<Item = (f64, f64)> + 'a {
        (0..self.width).map(move |x| {
            let x = f64::from(x);
            (x, wave.y_at(x, now_ms))
        })
    }
}
