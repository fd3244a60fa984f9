//! Average-link (UPGMA) agglomerative clustering over cosine similarity.
//!
//! Every item starts alone. Each round finds the pair of groups with the
//! highest mean member-to-member similarity and merges it if that mean is
//! strictly above the threshold. Group-to-group similarity *sums* are kept in
//! a matrix and updated on merge, so a round costs one scan of the active
//! pairs instead of a full recomputation.
//!
//! Still quadratic per round and up to cubic overall; callers cap the input.

use tracing::debug;

use crate::domain::values::term_vector::TermVector;

/// A later pair only displaces the current best when larger by more than this.
const TIE_EPSILON: f64 = 1e-9;

/// Items grouped by the engine; position in `raw_groups` output is the group id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGroup {
    pub members: Vec<usize>,
}

impl RawGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Cosine similarity matrix; the diagonal is 1.
pub fn similarity_matrix(vectors: &[TermVector]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let norms: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();
    let mut sims = vec![vec![0.0; n]; n];
    for i in 0..n {
        sims[i][i] = 1.0;
        for j in (i + 1)..n {
            let denom = norms[i] * norms[j];
            let s = if denom == 0.0 {
                0.0
            } else {
                vectors[i].dot(&vectors[j]) / denom
            };
            sims[i][j] = s;
            sims[j][i] = s;
        }
    }
    sims
}

/// Assign each vector a raw group id. Ids are dense and numbered in order
/// of each group's first member.
pub fn cluster(vectors: &[TermVector], threshold: f64) -> Vec<usize> {
    let n = vectors.len();
    if n == 0 {
        return Vec::new();
    }

    // sums[i][j]: total similarity between members of slot i and slot j.
    // A slot is named after its lowest member index.
    let mut sums = similarity_matrix(vectors);
    let mut sizes = vec![1usize; n];
    let mut active = vec![true; n];
    let mut slot_of: Vec<usize> = (0..n).collect();
    let mut merges = 0usize;

    loop {
        let live: Vec<usize> = (0..n).filter(|&i| active[i]).collect();
        let mut best: Option<(usize, usize, f64)> = None;

        for (a, &i) in live.iter().enumerate() {
            for &j in &live[a + 1..] {
                let avg = sums[i][j] / (sizes[i] * sizes[j]) as f64;
                match best {
                    Some((_, _, b)) if avg <= b + TIE_EPSILON => {}
                    _ => best = Some((i, j, avg)),
                }
            }
        }

        let Some((i, j, avg)) = best else { break };
        if avg <= threshold {
            break;
        }

        for &k in &live {
            if k != i && k != j {
                let merged = sums[i][k] + sums[j][k];
                sums[i][k] = merged;
                sums[k][i] = merged;
            }
        }
        sizes[i] += sizes[j];
        active[j] = false;
        for slot in slot_of.iter_mut() {
            if *slot == j {
                *slot = i;
            }
        }
        merges += 1;
    }

    let mut dense: Vec<Option<usize>> = vec![None; n];
    let mut next = 0usize;
    let assignment: Vec<usize> = slot_of
        .iter()
        .map(|&slot| {
            *dense[slot].get_or_insert_with(|| {
                next += 1;
                next - 1
            })
        })
        .collect();

    debug!(
        "Agglomerative clustering done - items={}, merges={}, groups={}, threshold={:.3}",
        n, merges, next, threshold
    );
    assignment
}

/// Collect an assignment into groups, ordered by raw group id.
pub fn raw_groups(assignment: &[usize]) -> Vec<RawGroup> {
    let count = assignment.iter().max().map_or(0, |m| m + 1);
    let mut groups = vec![RawGroup { members: Vec::new() }; count];
    for (idx, &gid) in assignment.iter().enumerate() {
        groups[gid].members.push(idx);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(pairs: &[(&str, f64)]) -> TermVector {
        pairs.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster(&[], 0.5).is_empty());
        assert!(raw_groups(&[]).is_empty());
    }

    #[test]
    fn test_single_item() {
        assert_eq!(cluster(&[vector(&[("yarn", 1.0)])], 0.5), vec![0]);
    }

    #[test]
    fn test_identical_vectors_merge() {
        let v = vector(&[("cotton", 1.0), ("yarn", 1.0)]);
        let assignment = cluster(&[v.clone(), v.clone(), v], 0.7);
        assert_eq!(assignment, vec![0, 0, 0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // cos = 0.5 exactly
        let a = vector(&[("x", 1.0), ("y", 1.0)]);
        let b = vector(&[("y", 1.0), ("z", 1.0)]);
        assert_eq!(cluster(&[a.clone(), b.clone()], 0.5), vec![0, 1]);
        assert_eq!(cluster(&[a, b], 0.49), vec![0, 0]);
    }

    #[test]
    fn test_empty_vectors_never_merge() {
        let assignment = cluster(&[TermVector::new(), TermVector::new()], 0.0);
        assert_eq!(assignment, vec![0, 1]);
    }

    #[test]
    fn test_average_link_blocks_chaining() {
        // a~b strongly, c only similar to b. Single-link would chain all
        // three; the average over {a,b} x {c} stays below the threshold.
        let a = vector(&[("p", 1.0), ("q", 1.0)]);
        let b = vector(&[("p", 1.0), ("q", 1.0), ("r", 1.0)]);
        let c = vector(&[("r", 1.0), ("s", 0.3)]);
        let sims = similarity_matrix(&[a.clone(), b.clone(), c.clone()]);
        assert!(sims[1][2] > 0.5);
        assert!((sims[0][2] + sims[1][2]) / 2.0 < 0.5);
        assert_eq!(cluster(&[a, b, c], 0.5), vec![0, 0, 1]);
    }

    #[test]
    fn test_ties_resolve_to_first_pair() {
        // 0~1 and 0~2 are equally similar; 1 and 2 are unrelated.
        let a = vector(&[("p", 1.0), ("q", 1.0)]);
        let b = vector(&[("p", 1.0), ("x", 1.0)]);
        let c = vector(&[("q", 1.0), ("y", 1.0)]);
        assert_eq!(cluster(&[a, b, c], 0.4), vec![0, 0, 1]);
    }

    #[test]
    fn test_ids_follow_first_appearance() {
        let a = vector(&[("wool", 1.0)]);
        let b = vector(&[("silk", 1.0)]);
        let assignment = cluster(&[a.clone(), b.clone(), a, b], 0.5);
        assert_eq!(assignment, vec![0, 1, 0, 1]);
        let groups = raw_groups(&assignment);
        assert_eq!(groups[0].members, vec![0, 2]);
        assert_eq!(groups[1].members, vec![1, 3]);
    }
}
