// Sample-level helpers for the audio graph: shaper curves and reverb noise.

/// Soft clipping curve for a distortion amount in `[0, 1]`.
pub fn distortion_curve(amount: f32, len: usize) -> Vec<f32> {
    let k = amount.max(0.0) * 100.0;
    let deg = std::f32::consts::PI / 180.0;
    let len = len.max(2);
    (0..len)
        .map(|i| {
            let x = (i as f32 / (len - 1) as f32) * 2.0 - 1.0;
            if x.abs() < 0.001 {
                0.0
            } else {
                (3.0 + k) * x * 20.0 * deg / (std::f32::consts::PI + k * x.abs())
            }
        })
        .collect()
}

/// One channel of decaying noise for the convolver.
pub fn impulse_channel(len: usize, seed: u32) -> Vec<f32> {
    let mut s = seed.max(1);
    let mut buf = Vec::with_capacity(len);
    for i in 0..len {
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        let n = (s as f32 / u32::MAX as f32) * 2.0 - 1.0;
        let t = 1.0 - i as f32 / len.max(1) as f32;
        buf.push(n * t * t);
    }
    buf
}
