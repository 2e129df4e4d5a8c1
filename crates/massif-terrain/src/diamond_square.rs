//! Seeded midpoint-displacement terrain generation.
//!
//! Fills a [`HeightGrid`] with fractal terrain using the diamond-square
//! algorithm on the grid's toroidal lattice: successive halving passes
//! displace lattice midpoints by random offsets whose bound decays between
//! passes. All randomness comes from a ChaCha8 stream seeded once per
//! generation, so the same inputs reproduce the same terrain on every
//! platform.

use massif_grid::HeightGrid;
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Parameters for diamond-square generation.
#[derive(Clone, Debug)]
pub struct DiamondSquareParams {
    /// Seed for the deterministic random stream.
    pub seed: u64,
    /// Displacement decay control: 0 halves the displacement bound every
    /// pass (smoothest terrain), 1 keeps it constant (roughest). Values
    /// outside `[0, 1]` are accepted and scale the decay accordingly.
    pub roughness: f32,
    /// Displacement bound of the first pass, in height units.
    pub amplitude: f32,
}

impl Default for DiamondSquareParams {
    fn default() -> Self {
        Self {
            seed: 1234,
            roughness: 0.1,
            amplitude: 2.0,
        }
    }
}

/// One pass of the halving schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSpec {
    /// Half the stride between the cells visited this pass.
    pub radius: u32,
    /// Displacement offsets this pass are drawn uniformly from
    /// `[-bound, bound]`.
    pub bound: f32,
}

/// Compute the radius/bound schedule for a lattice of `segments` faces.
///
/// The radius starts at `segments / 2` and halves each pass until it reaches
/// zero; the bound starts at `amplitude` and is multiplied by
/// `2^(roughness - 1)` after every pass. Power-of-two segment counts walk the
/// radius all the way down to 1 and cover the whole lattice; other counts
/// still terminate but leave cells unvisited by some strides, which degrades
/// output quality without being an error.
pub fn displacement_schedule(segments: u32, roughness: f32, amplitude: f32) -> Vec<PassSpec> {
    // libm rather than the platform libc, so the decay is bit-identical
    // everywhere.
    let decay = libm::exp2f(roughness - 1.0);
    let mut passes = Vec::new();
    let mut bound = amplitude;
    let mut radius = segments / 2;
    while radius > 0 {
        passes.push(PassSpec { radius, bound });
        bound *= decay;
        radius >>= 1;
    }
    passes
}

/// Errors reported by [`DiamondSquareGenerator::generate`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The halving schedule assumes one shared segment count per axis.
    #[error("diamond-square needs a square lattice, got {segments_u}x{segments_v} segments")]
    NonSquareLattice { segments_u: u32, segments_v: u32 },

    /// The displacement bound cannot parameterize a uniform distribution
    /// (non-finite or negative amplitude).
    #[error("displacement bound {bound} is not a valid uniform range")]
    InvalidBound { bound: f32 },
}

/// Deterministically fills a [`HeightGrid`] with fractal terrain.
///
/// Holds no state between calls: every [`generate`](Self::generate) clears
/// the grid and seeds a fresh random stream from the configured seed, so
/// identical parameters over identical lattices yield bit-identical buffers.
pub struct DiamondSquareGenerator {
    params: DiamondSquareParams,
}

impl DiamondSquareGenerator {
    /// Create a generator with the given parameters.
    pub fn new(params: DiamondSquareParams) -> Self {
        Self { params }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &DiamondSquareParams {
        &self.params
    }

    /// Clear the grid and run the full displacement schedule over it.
    ///
    /// Each pass visits lattice origins at stride `2r` along U then V and
    /// performs one diamond update and two square updates per origin; the
    /// two remaining square edges of every cell are written by neighboring
    /// origins thanks to the toroidal wrap. Reads always happen before the
    /// corresponding write, and the iteration order plus the fixed
    /// {diamond, square, square} update order keep the draw sequence, and
    /// therefore the output, reproducible for a given seed.
    pub fn generate(&self, grid: &mut HeightGrid) -> Result<(), GenerateError> {
        let (segments_u, segments_v) = (grid.segments_u(), grid.segments_v());
        if segments_u != segments_v {
            return Err(GenerateError::NonSquareLattice {
                segments_u,
                segments_v,
            });
        }
        let segments = i64::from(segments_u);
        let schedule =
            displacement_schedule(segments_u, self.params.roughness, self.params.amplitude);

        grid.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);

        for pass in &schedule {
            // One distribution object per pass, shared by every draw in it.
            let offsets = Uniform::new_inclusive(-pass.bound, pass.bound)
                .map_err(|_| GenerateError::InvalidBound { bound: pass.bound })?;
            let radius = i64::from(pass.radius);
            let stride = (2 * radius) as usize;

            for i in (0..segments).step_by(stride) {
                for j in (0..segments).step_by(stride) {
                    diamond(grid, i + radius, j + radius, radius, offsets.sample(&mut rng));
                    square(grid, i + radius, j, radius, offsets.sample(&mut rng));
                    square(grid, i, j + radius, radius, offsets.sample(&mut rng));
                }
            }
        }

        debug!(
            "diamond-square: {} passes over a {}x{} lattice (seed {})",
            schedule.len(),
            segments_u,
            segments_u,
            self.params.seed
        );
        Ok(())
    }
}

/// Displace the point diagonally centered between four known samples.
fn diamond(grid: &mut HeightGrid, u: i64, v: i64, r: i64, offset: f32) {
    let avg = (grid.height_wrapped(u - r, v - r)
        + grid.height_wrapped(u - r, v + r)
        + grid.height_wrapped(u + r, v - r)
        + grid.height_wrapped(u + r, v + r))
        / 4.0;
    grid.set_height_wrapped(u, v, avg + offset);
}

/// Displace the point orthogonally centered between four known samples.
fn square(grid: &mut HeightGrid, u: i64, v: i64, r: i64, offset: f32) {
    let avg = (grid.height_wrapped(u - r, v)
        + grid.height_wrapped(u + r, v)
        + grid.height_wrapped(u, v - r)
        + grid.height_wrapped(u, v + r))
        / 4.0;
    grid.set_height_wrapped(u, v, avg + offset);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(segments: u32) -> HeightGrid {
        HeightGrid::new(10.0, 10.0, segments).expect("grid allocation")
    }

    #[test]
    fn test_same_seed_reproduces_buffer() {
        let generator = DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 42,
            roughness: 0.5,
            amplitude: 8.0,
        });
        let mut a = grid(64);
        let mut b = grid(64);
        generator.generate(&mut a).unwrap();
        generator.generate(&mut b).unwrap();
        assert_eq!(
            a.heights(),
            b.heights(),
            "same parameters must reproduce the buffer bit for bit"
        );
    }

    #[test]
    fn test_generate_clears_previous_contents() {
        let generator = DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 7,
            roughness: 0.3,
            amplitude: 4.0,
        });
        let mut fresh = grid(16);
        generator.generate(&mut fresh).unwrap();

        let mut reused = grid(16);
        for u in 0..16_i64 {
            reused.set_height_wrapped(u, u, 99.0);
        }
        generator.generate(&mut reused).unwrap();

        assert_eq!(
            fresh.heights(),
            reused.heights(),
            "generation must not depend on prior grid contents"
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = grid(16);
        let mut b = grid(16);
        DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 1,
            roughness: 0.5,
            amplitude: 8.0,
        })
        .generate(&mut a)
        .unwrap();
        DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 2,
            roughness: 0.5,
            amplitude: 8.0,
        })
        .generate(&mut b)
        .unwrap();
        assert_ne!(
            a.heights(),
            b.heights(),
            "different seeds should produce different terrain"
        );
    }

    #[test]
    fn test_wraparound_holds_after_generation() {
        let mut g = grid(8);
        DiamondSquareGenerator::new(DiamondSquareParams::default())
            .generate(&mut g)
            .unwrap();
        for u in 0..8_i64 {
            for v in 0..8_i64 {
                for k in [-2_i64, -1, 1, 2] {
                    assert_eq!(
                        g.height_wrapped(u + k * 8, v),
                        g.height_wrapped(u, v),
                        "sample ({u}, {v}) must match its wrapped alias at k={k}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_amplitude_stays_flat() {
        let mut g = grid(16);
        DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 5,
            roughness: 0.5,
            amplitude: 0.0,
        })
        .generate(&mut g)
        .unwrap();
        assert!(
            g.heights().iter().all(|&h| h == 0.0),
            "zero amplitude must leave the grid flat"
        );
    }

    #[test]
    fn test_tiny_grid_single_pass() {
        let amplitude = 10.0_f32;
        let mut g = grid(2);
        DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 77,
            roughness: 0.5,
            amplitude,
        })
        .generate(&mut g)
        .unwrap();

        assert_eq!(displacement_schedule(2, 0.5, amplitude).len(), 1);

        // The single pass at radius 1 writes the diamond center (1, 1) and
        // the two square midpoints (1, 0) and (0, 1); the origin is never
        // touched.
        assert_eq!(g.height_wrapped(0, 0), 0.0, "origin must stay untouched");

        let center = g.height_wrapped(1, 1);
        assert!(
            center.abs() <= amplitude,
            "diamond over a zero baseline must stay within the bound, got {center}"
        );
        // Each square midpoint averages two zero samples and the freshly
        // written center (read twice through the wrap), then adds one draw.
        for (u, v) in [(1_i64, 0_i64), (0, 1)] {
            let offset = g.height_wrapped(u, v) - center / 2.0;
            assert!(
                offset.abs() <= amplitude,
                "square at ({u}, {v}) displaced by {offset}, beyond the bound {amplitude}"
            );
        }
    }

    #[test]
    fn test_schedule_radii_for_64_segments() {
        let radii: Vec<u32> = displacement_schedule(64, 0.5, 1.0)
            .iter()
            .map(|p| p.radius)
            .collect();
        assert_eq!(radii, vec![32, 16, 8, 4, 2, 1]);
    }

    #[test]
    fn test_schedule_roughness_zero_halves_bound() {
        let bounds: Vec<f32> = displacement_schedule(16, 0.0, 8.0)
            .iter()
            .map(|p| p.bound)
            .collect();
        assert_eq!(bounds, vec![8.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_schedule_roughness_one_keeps_bound() {
        let bounds: Vec<f32> = displacement_schedule(16, 1.0, 8.0)
            .iter()
            .map(|p| p.bound)
            .collect();
        assert_eq!(bounds, vec![8.0, 8.0, 8.0, 8.0]);
    }

    #[test]
    fn test_schedule_terminates_for_non_power_of_two() {
        let radii: Vec<u32> = displacement_schedule(6, 0.5, 1.0)
            .iter()
            .map(|p| p.radius)
            .collect();
        assert_eq!(radii, vec![3, 1]);
    }

    #[test]
    fn test_non_square_lattice_rejected() {
        let mut g = HeightGrid::with_segments(10.0, 10.0, 4, 8).unwrap();
        let err = DiamondSquareGenerator::new(DiamondSquareParams::default())
            .generate(&mut g)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::NonSquareLattice {
                segments_u: 4,
                segments_v: 8
            }
        ));
    }

    #[test]
    fn test_non_finite_amplitude_rejected() {
        let mut g = grid(4);
        let err = DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 1,
            roughness: 0.5,
            amplitude: f32::NAN,
        })
        .generate(&mut g)
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBound { .. }));
    }

    #[test]
    fn test_negative_amplitude_rejected() {
        let mut g = grid(4);
        let err = DiamondSquareGenerator::new(DiamondSquareParams {
            seed: 1,
            roughness: 0.5,
            amplitude: -3.0,
        })
        .generate(&mut g)
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBound { bound } if bound == -3.0));
    }

    #[test]
    fn test_default_params_match_host_defaults() {
        let params = DiamondSquareParams::default();
        assert_eq!(params.seed, 1234);
        assert_eq!(params.roughness, 0.1);
        assert_eq!(params.amplitude, 2.0);
    }
}
