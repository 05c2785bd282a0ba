use crate::config::RippleConfig;
use crate::field::WaveField;

/// Drawing surface the frame renderer paints through.
pub trait Painter {
    type Error;

    /// Covers `[0, width) x [0, height)` with `style`.
    fn fill_rect(&mut self, style: &str, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Strokes the open path through `points`. Empty input draws nothing.
    fn stroke_polyline<I>(&mut self, points: I, style: &str, line_width: f64) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = (f64, f64)>;
}

/// Paints one animation tick: the fading fill first, then every wave.
pub fn render_frame<P, R>(
    painter: &mut P,
    field: &WaveField<R>,
    config: &RippleConfig,
    now_ms: f64,
) -> Result<(), P::Error>
where
    P: Painter,
{
    painter.fill_rect(
        &config.fill_style,
        f64::from(field.width()),
        f64::from(field.height()),
    )?;
    for wave in field.waves() {
        painter.stroke_polyline(field.polyline(wave, now_ms), &config.stroke_style, config.line_width)?;
    }
    Ok(())
}
