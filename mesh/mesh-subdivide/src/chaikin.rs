//! Chaikin corner cutting for polylines.

use nalgebra::Point3;
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::ChaikinParams;

/// Refine a polyline by repeated corner cutting.
///
/// Every pass replaces each segment `(p0, p1)` with the two points at
/// parameters `min(u, v)` and `max(u, v)` along it. Blend parameters whose
/// sum exceeds one are scaled down proportionally first. An open polyline
/// of `n` points yields `2(n - 1)` points per pass, plus the two original
/// endpoints when `retain_endpoints` is set. A closed polyline also cuts the
/// segment from the last point back to the first and yields `2n` points.
///
/// Zero iterations returns the input as is.
///
/// # Errors
///
/// Returns [`SubdivideError::InvalidBlend`] if `u` or `v` is not a finite
/// value in `[0, 1]`, and [`SubdivideError::InsufficientPoints`] for fewer
/// than two points.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{subdivide_polyline, ChaikinParams};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ];
/// let refined = subdivide_polyline(&points, &ChaikinParams::classic())?;
///
/// assert_eq!(refined.len(), 4);
/// assert!((refined[0].x - 0.25).abs() < 1e-12);
/// assert!((refined[3].x - 1.75).abs() < 1e-12);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_polyline(
    points: &[Point3<f64>],
    params: &ChaikinParams,
) -> SubdivideResult<Vec<Point3<f64>>> {
    if params.iterations == 0 {
        return Ok(points.to_vec());
    }
    if !params.is_valid() {
        return Err(SubdivideError::InvalidBlend {
            u: params.u,
            v: params.v,
        });
    }
    if points.len() < 2 {
        return Err(SubdivideError::InsufficientPoints {
            required: 2,
            actual: points.len(),
        });
    }

    let blend = params.normalized();
    let near = blend.u.min(blend.v);
    let far = blend.u.max(blend.v);

    let mut current = points.to_vec();
    for pass in 0..params.iterations {
        current = cut_corners(&current, near, far, params);
        debug!(pass = pass + 1, points = current.len(), "Chaikin pass");
    }
    Ok(current)
}

fn cut_corners(
    points: &[Point3<f64>],
    near: f64,
    far: f64,
    params: &ChaikinParams,
) -> Vec<Point3<f64>> {
    let lerp = |a: &Point3<f64>, b: &Point3<f64>, t: f64| a + (b - a) * t;
    let mut out = Vec::with_capacity(points.len() * 2 + 2);

    if params.closed {
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            out.push(lerp(a, b, near));
            out.push(lerp(a, b, far));
        }
        return out;
    }

    let keep_ends = params.retain_endpoints;
    if keep_ends {
        out.extend(points.first().copied());
    }
    for pair in points.windows(2) {
        out.push(lerp(&pair[0], &pair[1], near));
        out.push(lerp(&pair[0], &pair[1], far));
    }
    if keep_ends {
        out.extend(points.last().copied());
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]
    }

    fn xs(points: &[Point3<f64>]) -> Vec<f64> {
        points.iter().map(|p| p.x).collect()
    }

    #[test]
    fn classic_single_pass() {
        let out = subdivide_polyline(&line(), &ChaikinParams::classic()).unwrap();
        assert_eq!(out.len(), 4);
        for (got, want) in xs(&out).iter().zip([0.25, 0.75, 1.25, 1.75]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        assert!(out.iter().all(|p| p.y == 0.0 && p.z == 0.0));
    }

    #[test]
    fn blend_order_does_not_matter() {
        let a = subdivide_polyline(&line(), &ChaikinParams::new(0.75, 0.25)).unwrap();
        let b = subdivide_polyline(&line(), &ChaikinParams::classic()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn retained_endpoints() {
        let params = ChaikinParams::classic().with_retain_endpoints(true);
        let out = subdivide_polyline(&line(), &params).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(out[5], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn closed_loop_cuts_wraparound() {
        let square = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let params = ChaikinParams::classic().with_closed(true);
        let out = subdivide_polyline(&square, &params).unwrap();
        assert_eq!(out.len(), 8);
        // Last two points lie on the segment back to the start
        assert_relative_eq!(out[6], Point3::new(0.0, 0.75, 0.0), epsilon = 1e-12);
        assert_relative_eq!(out[7], Point3::new(0.0, 0.25, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn oversized_blend_is_normalized() {
        // 0.6 + 0.8 > 1: scaled to 3/7 and 4/7
        let pair = [Point3::new(0.0, 0.0, 0.0), Point3::new(7.0, 0.0, 0.0)];
        let out = subdivide_polyline(&pair, &ChaikinParams::new(0.6, 0.8)).unwrap();
        assert_relative_eq!(out[0].x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].x, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn iterations_compound() {
        let params = ChaikinParams::classic().with_iterations(3);
        let out = subdivide_polyline(&line(), &params).unwrap();
        assert_eq!(out.len(), params.output_len(3));
        // 3 -> 4 -> 6 -> 10
        assert_eq!(out.len(), 10);
        // Collinear input stays on the line and inside the original span
        assert!(out.iter().all(|p| p.y == 0.0 && (0.0..=2.0).contains(&p.x)));
    }

    #[test]
    fn zero_iterations_is_identity() {
        let params = ChaikinParams::classic().with_iterations(0);
        assert_eq!(subdivide_polyline(&line(), &params).unwrap(), line());
    }

    #[test]
    fn invalid_inputs() {
        let err = subdivide_polyline(&line(), &ChaikinParams::new(-0.1, 0.5)).unwrap_err();
        assert!(matches!(err, SubdivideError::InvalidBlend { .. }));

        let err = subdivide_polyline(&line(), &ChaikinParams::new(f64::NAN, 0.5)).unwrap_err();
        assert!(matches!(err, SubdivideError::InvalidBlend { .. }));

        let err = subdivide_polyline(&line()[..1], &ChaikinParams::classic()).unwrap_err();
        assert!(matches!(
            err,
            SubdivideError::InsufficientPoints {
                required: 2,
                actual: 1
            }
        ));
    }
}
