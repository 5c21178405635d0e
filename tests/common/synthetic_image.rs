use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertical step: columns below `split` are `dark`, the rest `bright`.
pub fn vertical_step_u8(width: usize, height: usize, split: usize, dark: u8, bright: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            img[y * width + x] = if x < split { dark } else { bright };
        }
    }
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Deterministic pseudo-random bytes for a given seed.
pub fn noise_u8(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

/// Append half-resolution chroma to a luma plane as NV21 (interleaved VU).
pub fn nv21_from_luma(luma: &[u8], width: usize, height: usize) -> Vec<u8> {
    let chroma = width.div_ceil(2) * height.div_ceil(2);
    let mut data = luma.to_vec();
    for i in 0..chroma {
        data.push((i * 7 % 256) as u8);
        data.push((255 - i * 3 % 256) as u8);
    }
    data
}

/// Expand a gray plane into interleaved RGBA with R=G=B.
pub fn gray_to_rgba(gray: &[u8]) -> Vec<u8> {
    gray.iter().flat_map(|&v| [v, v, v, 255]).collect()
}
