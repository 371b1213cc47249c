//! In-place pixel filters
//!
//! Every filter walks the raster once, rewrites pixels in place and never
//! resizes the buffer. Filters are total over valid rasters: an empty raster
//! is logged and left untouched.

use crate::Raster;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// 8x8 ordered-dither threshold matrix (row-major, levels 1..=64)
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [1, 49, 13, 61, 4, 52, 16, 64],
    [33, 17, 45, 29, 36, 20, 48, 32],
    [9, 57, 5, 53, 12, 60, 8, 56],
    [41, 25, 37, 21, 44, 28, 40, 24],
    [3, 51, 15, 63, 2, 50, 14, 62],
    [35, 19, 47, 31, 34, 18, 46, 30],
    [11, 59, 7, 55, 10, 58, 6, 54],
    [43, 27, 39, 23, 42, 26, 38, 22],
];

/// Number of threshold levels in [`BAYER_8X8`]
const SHADES: u32 = 64;

/// Bias added to the quantized gray level before thresholding
pub const DITHER_BIAS: i32 = -5;

/// Brightness factor used when none is configured
pub const DEFAULT_BRIGHTNESS: f32 = 0.5;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// Which cumulative distribution drives each channel during auto tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoToneMode {
    /// Each channel is remapped through its own CDF
    #[default]
    PerChannel,
    /// All three channels are remapped through the red channel's CDF.
    /// Reproduces the output of the first viewer release.
    RedChannelCdf,
}

/// A single filter invocation, used to describe filter sequences as data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Grayscale,
    Brightness(f32),
    Dither { bias: i32 },
    AutoTone(AutoToneMode),
}

impl Filter {
    /// Apply this filter to a raster in place
    pub fn apply(&self, raster: &mut Raster) {
        match *self {
            Filter::Grayscale => raster.grayscale(),
            Filter::Brightness(factor) => raster.brightness(factor),
            Filter::Dither { bias } => raster.dither_with_bias(bias),
            Filter::AutoTone(mode) => raster.auto_tone(mode),
        };
    }

    /// Short lowercase name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Brightness(_) => "brightness",
            Filter::Dither { .. } => "dither",
            Filter::AutoTone(_) => "auto tone",
        }
    }
}

/// Integer mean of the three channels
#[inline]
fn gray_level([r, g, b]: [u8; 3]) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Scale a channel, rounding and clamping to 0..=255
#[inline]
fn scale_channel(value: u8, factor: f32) -> u8 {
    (value as f32 * factor).round().clamp(0.0, 255.0) as u8
}

/// Whether a brightness factor actually changes pixels
///
/// Factors outside (0, 2] (including NaN) and exactly 1.0 are ignored.
pub(crate) fn brightness_applies(factor: f32) -> bool {
    factor > 0.0 && factor <= 2.0 && factor != 1.0
}

fn equalize(cdf: &[u64; 256], value: u8, total: f64) -> u8 {
    (cdf[value as usize] as f64 / total * 255.0).round() as u8
}

fn cumulative(histogram: &[u64; 256]) -> [u64; 256] {
    let mut cdf = [0u64; 256];
    let mut sum = 0u64;
    for (slot, &count) in cdf.iter_mut().zip(histogram.iter()) {
        sum += count;
        *slot = sum;
    }
    cdf
}

impl Raster {
    fn skip_if_empty(&self, filter: &str) -> bool {
        if self.is_empty() {
            warn!("{filter} skipped: raster has zero area");
            return true;
        }
        debug!("{filter} on {}x{} raster", self.width(), self.height());
        false
    }

    /// Replace every pixel with the integer mean of its channels
    ///
    /// Idempotent: a gray pixel maps to itself.
    pub fn grayscale(&mut self) -> &mut Self {
        if self.skip_if_empty("grayscale") {
            return self;
        }
        for pixel in self.buffer_mut().pixels_mut() {
            let gray = gray_level(pixel.0);
            pixel.0 = [gray; 3];
        }
        self
    }

    /// Multiply every channel by `factor`, rounding and clamping to 0..=255
    ///
    /// Factors outside (0, 2] and exactly 1.0 leave the raster untouched.
    pub fn brightness(&mut self, factor: f32) -> &mut Self {
        if !brightness_applies(factor) {
            warn!("brightness factor {factor} ignored (accepted range is (0, 2], excluding 1)");
            return self;
        }
        if self.skip_if_empty("brightness") {
            return self;
        }
        for pixel in self.buffer_mut().pixels_mut() {
            let [r, g, b] = pixel.0;
            pixel.0 = [
                scale_channel(r, factor),
                scale_channel(g, factor),
                scale_channel(b, factor),
            ];
        }
        self
    }

    /// Monochrome ordered dithering with [`BAYER_8X8`] and the default bias
    pub fn dither(&mut self) -> &mut Self {
        self.dither_with_bias(DITHER_BIAS)
    }

    /// Monochrome ordered dithering with an explicit bias
    ///
    /// The gray level of each pixel is quantized to 0..=64, shifted by `bias`
    /// and compared against the matrix threshold at `(x mod 8, y mod 8)`.
    /// Pixels strictly above the threshold become white, all others black.
    pub fn dither_with_bias(&mut self, bias: i32) -> &mut Self {
        if self.skip_if_empty("dither") {
            return self;
        }
        for (x, y, pixel) in self.buffer_mut().enumerate_pixels_mut() {
            let quantized = (gray_level(pixel.0) as u32 * SHADES / 255) as i32;
            let threshold = BAYER_8X8[(y % 8) as usize][(x % 8) as usize] as i32;
            pixel.0 = if quantized + bias > threshold {
                WHITE
            } else {
                BLACK
            };
        }
        self
    }

    /// Histogram equalization over the R, G and B channels
    ///
    /// Each channel value `v` becomes `round(cdf[v] / pixel_count * 255)`.
    /// Channels are stretched independently, which can shift color balance.
    pub fn auto_tone(&mut self, mode: AutoToneMode) -> &mut Self {
        if self.skip_if_empty("auto tone") {
            return self;
        }

        let mut histograms = [[0u64; 256]; 3];
        for pixel in self.pixels() {
            for (histogram, value) in histograms.iter_mut().zip(pixel) {
                histogram[value as usize] += 1;
            }
        }

        let cdfs = match mode {
            AutoToneMode::PerChannel => [
                cumulative(&histograms[0]),
                cumulative(&histograms[1]),
                cumulative(&histograms[2]),
            ],
            AutoToneMode::RedChannelCdf => {
                let red = cumulative(&histograms[0]);
                [red, red, red]
            }
        };

        let total = self.pixel_count() as f64;
        for pixel in self.buffer_mut().pixels_mut() {
            let [r, g, b] = pixel.0;
            pixel.0 = [
                equalize(&cdfs[0], r, total),
                equalize(&cdfs[1], g, total),
                equalize(&cdfs[2], b, total),
            ];
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn raster_of(width: u32, height: u32, pixels: &[[u8; 3]]) -> Raster {
        Raster::from_rgb(width, height, pixels.concat()).unwrap()
    }

    #[test]
    fn test_bayer_matrix_is_permutation() {
        let mut levels: Vec<u8> = BAYER_8X8.iter().flatten().copied().collect();
        levels.sort_unstable();
        assert_eq!(levels, (1..=64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_grayscale_integer_mean() {
        let mut raster = raster_of(2, 1, &[[10, 20, 31], [255, 255, 254]]);
        raster.grayscale();
        assert_eq!(raster.pixel(0, 0), Some([20, 20, 20]));
        assert_eq!(raster.pixel(1, 0), Some([254, 254, 254]));
    }

    #[test]
    fn test_grayscale_empty_raster() {
        let mut raster = Raster::empty();
        raster.grayscale();
        assert!(raster.is_empty());
    }

    #[test]
    fn test_brightness_halves() {
        let mut raster = raster_of(1, 1, &[[100, 51, 255]]);
        raster.brightness(0.5);
        // 25.5 rounds away from zero, 127.5 likewise
        assert_eq!(raster.pixel(0, 0), Some([50, 26, 128]));
    }

    #[test]
    fn test_brightness_clamps() {
        let mut raster = raster_of(1, 1, &[[200, 100, 0]]);
        raster.brightness(2.0);
        assert_eq!(raster.pixel(0, 0), Some([255, 200, 0]));
    }

    #[test]
    fn test_brightness_ignored_factors() {
        let original = raster_of(1, 1, &[[10, 20, 30]]);
        for factor in [0.0, -1.0, 1.0, 2.0001, 5.0, f32::NAN, f32::INFINITY] {
            let mut raster = original.clone();
            raster.brightness(factor);
            assert_eq!(raster, original, "factor {factor} should be a no-op");
        }
    }

    #[test]
    fn test_dither_known_pixels() {
        // gray 255 -> q 64 -> 59 > 1 at (0, 0); 59 > 64 fails at (7, 0)
        let mut raster = Raster::filled(8, 1, [255, 255, 255]);
        raster.dither();
        assert_eq!(raster.pixel(0, 0), Some(WHITE));
        assert_eq!(raster.pixel(7, 0), Some(BLACK));
        // threshold 61 at (3, 0)
        assert_eq!(raster.pixel(3, 0), Some(BLACK));
        // threshold 52 at (5, 0)
        assert_eq!(raster.pixel(5, 0), Some(WHITE));
    }

    #[test]
    fn test_dither_black_stays_black() {
        let mut raster = Raster::filled(16, 16, BLACK);
        raster.dither();
        assert!(raster.pixels().all(|p| p == BLACK));
    }

    #[test]
    fn test_dither_mid_gray_density() {
        // gray 128 -> q 32 -> biased 27: exactly the thresholds 1..=26 pass
        let mut raster = Raster::filled(8, 8, [128, 128, 128]);
        raster.dither();
        let white = raster.pixels().filter(|&p| p == WHITE).count();
        assert_eq!(white, 26);
    }

    #[test]
    fn test_dither_custom_bias() {
        let mut raster = Raster::filled(8, 8, [255, 255, 255]);
        raster.dither_with_bias(1);
        assert!(raster.pixels().all(|p| p == WHITE));
    }

    #[test]
    fn test_dither_matrix_tiles() {
        let mut raster = Raster::filled(16, 16, [128, 128, 128]);
        raster.dither();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(raster.pixel(x, y), raster.pixel(x + 8, y + 8));
            }
        }
    }

    #[test]
    fn test_auto_tone_two_levels() {
        let mut raster = raster_of(
            2,
            2,
            &[[50, 50, 50], [50, 50, 50], [200, 200, 200], [200, 200, 200]],
        );
        raster.auto_tone(AutoToneMode::PerChannel);
        // cdf(50) = 2/4 -> 127.5 -> 128, cdf(200) = 4/4 -> 255
        assert_eq!(raster.pixel(0, 0), Some([128, 128, 128]));
        assert_eq!(raster.pixel(0, 1), Some([255, 255, 255]));
    }

    #[test]
    fn test_auto_tone_per_channel_vs_red_cdf() {
        let pixels = [[0, 100, 10], [255, 200, 20], [255, 200, 30], [255, 250, 40]];
        let mut per_channel = raster_of(4, 1, &pixels);
        let mut red_only = per_channel.clone();

        per_channel.auto_tone(AutoToneMode::PerChannel);
        red_only.auto_tone(AutoToneMode::RedChannelCdf);

        // green 100 is the lowest green value: its own CDF gives 1/4
        assert_eq!(per_channel.pixel(0, 0), Some([64, 64, 64]));
        // red CDF: cdf_r(100) = 1 (only the 0 is below), cdf_r(10) = 1
        assert_eq!(red_only.pixel(0, 0), Some([64, 64, 64]));
        // the last pixel holds the top value of every channel,
        // but under the red CDF green 250 and blue 40 only count the red 0
        assert_eq!(per_channel.pixel(3, 0), Some([255, 255, 255]));
        assert_eq!(red_only.pixel(3, 0), Some([255, 64, 64]));
    }

    #[test]
    fn test_auto_tone_empty_raster() {
        let mut raster = Raster::empty();
        raster.auto_tone(AutoToneMode::PerChannel);
        assert!(raster.is_empty());
    }

    #[test]
    fn test_auto_tone_uniform_image_goes_white() {
        let mut raster = Raster::filled(3, 3, [40, 80, 120]);
        raster.auto_tone(AutoToneMode::PerChannel);
        assert!(raster.pixels().all(|p| p == WHITE));
    }

    #[test]
    fn test_filter_apply_matches_methods() {
        let original = raster_of(2, 1, &[[10, 200, 30], [90, 60, 250]]);

        let mut via_enum = original.clone();
        Filter::Brightness(1.5).apply(&mut via_enum);
        let mut via_method = original.clone();
        via_method.brightness(1.5);
        assert_eq!(via_enum, via_method);

        let mut via_enum = original.clone();
        Filter::Dither { bias: DITHER_BIAS }.apply(&mut via_enum);
        let mut via_method = original;
        via_method.dither();
        assert_eq!(via_enum, via_method);
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(Filter::Grayscale.name(), "grayscale");
        assert_eq!(Filter::AutoTone(AutoToneMode::default()).name(), "auto tone");
    }

    fn arb_raster() -> impl Strategy<Value = Raster> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |data| Raster::from_rgb(w, h, data).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_grayscale_idempotent(raster in arb_raster()) {
            let mut once = raster.clone();
            once.grayscale();
            let mut twice = once.clone();
            twice.grayscale();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.pixels().all(|[r, g, b]| r == g && g == b));
        }

        #[test]
        fn prop_grayscale_is_channel_mean(raster in arb_raster()) {
            let mut gray = raster.clone();
            gray.grayscale();
            for (before, after) in raster.pixels().zip(gray.pixels()) {
                let mean = (before.iter().map(|&c| c as u32).sum::<u32>() / 3) as u8;
                prop_assert_eq!(after, [mean; 3]);
            }
        }

        #[test]
        fn prop_brightness_formula(raster in arb_raster(), factor in 0.01f32..=2.0) {
            prop_assume!(factor != 1.0);
            let mut scaled = raster.clone();
            scaled.brightness(factor);
            for (before, after) in raster.pixels().zip(scaled.pixels()) {
                for (b, a) in before.iter().zip(after.iter()) {
                    let expected = (*b as f32 * factor).round().clamp(0.0, 255.0) as u8;
                    prop_assert_eq!(*a, expected);
                }
            }
        }

        #[test]
        fn prop_brightness_out_of_range_is_identity(raster in arb_raster(), factor in 2.001f32..100.0) {
            let mut scaled = raster.clone();
            scaled.brightness(factor);
            prop_assert_eq!(&scaled, &raster);
            scaled.brightness(-factor);
            prop_assert_eq!(&scaled, &raster);
        }

        #[test]
        fn prop_dither_binary_and_deterministic(raster in arb_raster()) {
            let mut first = raster.clone();
            first.dither();
            let mut second = raster.clone();
            second.dither();
            prop_assert_eq!(&first, &second);
            prop_assert!(first.pixels().all(|p| p == WHITE || p == BLACK));
        }

        #[test]
        fn prop_dither_second_pass_never_whitens(raster in arb_raster()) {
            let mut once = raster.clone();
            once.dither();
            let mut twice = once.clone();
            twice.dither();
            for (a, b) in once.pixels().zip(twice.pixels()) {
                if a == BLACK {
                    prop_assert_eq!(b, BLACK);
                }
            }
        }

        #[test]
        fn prop_auto_tone_keeps_dimensions(raster in arb_raster()) {
            let mut toned = raster.clone();
            toned.auto_tone(AutoToneMode::PerChannel);
            prop_assert_eq!(toned.dimensions(), raster.dimensions());
            // the brightest value of every channel maps to 255
            for channel in 0..3 {
                let brightest = raster.pixels().map(|p| p[channel]).max().unwrap();
                let index = raster.pixels().position(|p| p[channel] == brightest).unwrap();
                let after = toned.pixels().nth(index).unwrap();
                prop_assert_eq!(after[channel], 255);
            }
        }
    }
}
