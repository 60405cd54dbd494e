//! Neighbour suppression for ranked results.

use crate::rank::topk::RankedResult;

/// Keeps results farther than `radius` (Chebyshev distance) from every
/// previously kept result.
///
/// `ranked` must already be in rank order; the first result of a cluster
/// wins. A radius of zero keeps everything.
pub fn suppress_neighbors(ranked: &[RankedResult], radius: usize) -> Vec<RankedResult> {
    if radius == 0 {
        return ranked.to_vec();
    }

    let radius = radius as u64;
    let mut kept: Vec<RankedResult> = Vec::new();
    'outer: for result in ranked.iter().copied() {
        for kept_result in kept.iter() {
            let dx = result.location.x.abs_diff(kept_result.location.x);
            let dy = result.location.y.abs_diff(kept_result.location.y);
            if dx.max(dy) <= radius {
                continue 'outer;
            }
        }
        kept.push(result);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::suppress_neighbors;
    use crate::geometry::Point2D;
    use crate::rank::topk::RankedResult;

    fn result(x: i64, y: i64, score: u64) -> RankedResult {
        RankedResult {
            location: Point2D::new(x, y),
            score,
        }
    }

    #[test]
    fn suppresses_within_radius() {
        let ranked = [
            result(10, 10, 9),
            result(11, 12, 8),
            result(14, 10, 7),
            result(12, 12, 6),
        ];
        let kept = suppress_neighbors(&ranked, 2);
        assert_eq!(kept, vec![result(10, 10, 9), result(14, 10, 7)]);
    }

    #[test]
    fn zero_radius_keeps_all() {
        let ranked = [result(0, 0, 2), result(0, 1, 2)];
        assert_eq!(suppress_neighbors(&ranked, 0), ranked.to_vec());
    }
}
