/// Stable u32-key radix sort for SoA (inds/vals).
/// - Sorts by inds ascending
/// - Reorders vals accordingly, equal keys keep their relative order
/// - Requires `N: Copy` so the scratch buffer can be seeded from `vals`
///
/// Complexity: 4 passes, each O(n + 256)
#[inline]
pub fn radix_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort is faster than allocating scratch.
    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    let mut inds_tmp = vec![0u32; n];
    let mut vals_tmp: Vec<N> = vals.to_vec();

    // Even pass count, so the final result lands back in `inds`/`vals`.
    let mut in_scratch = false;
    for shift in [0u32, 8, 16, 24] {
        if in_scratch {
            scatter_pass(&inds_tmp, &vals_tmp, inds, vals, shift);
        } else {
            scatter_pass(inds, vals, &mut inds_tmp, &mut vals_tmp, shift);
        }
        in_scratch = !in_scratch;
    }
}

/// One counting pass over byte `shift / 8` of the keys.
#[inline]
fn scatter_pass<N: Copy>(
    src_inds: &[u32],
    src_vals: &[N],
    dst_inds: &mut [u32],
    dst_vals: &mut [N],
    shift: u32,
) {
    let mut count = [0usize; 256];
    for &k in src_inds {
        count[((k >> shift) & 0xFF) as usize] += 1;
    }

    // Prefix sum -> starting positions
    let mut sum = 0usize;
    for c in count.iter_mut() {
        let tmp = *c;
        *c = sum;
        sum += tmp;
    }

    for (&k, &v) in src_inds.iter().zip(src_vals) {
        let b = ((k >> shift) & 0xFF) as usize;
        let pos = count[b];
        count[b] = pos + 1;
        dst_inds[pos] = k;
        dst_vals[pos] = v;
    }
}

/// Tiny insertion sort for small n (SoA).
#[inline]
fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    let n = inds.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// sort by key, and if key is equal, preserve original order (stable).
    fn baseline_stable_sort<N: Copy>(inds: &[u32], vals: &[N]) -> (Vec<u32>, Vec<N>) {
        let mut pairs: Vec<(u32, N)> = inds.iter().copied().zip(vals.iter().copied()).collect();
        pairs.sort_by_key(|p| p.0);
        pairs.into_iter().unzip()
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn radix_sort_handles_empty_and_single() {
        let mut inds: Vec<u32> = vec![];
        let mut vals: Vec<u64> = vec![];
        radix_sort_u32_soa(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u32];
        let mut vals = vec![7u64];
        radix_sort_u32_soa(&mut inds, &mut vals);
        assert_eq!(inds, vec![42]);
        assert_eq!(vals, vec![7]);
    }

    #[test]
    fn radix_sort_is_stable_on_duplicates() {
        let mut inds = vec![3u32, 1, 3, 2, 1, 3, 0];
        let mut vals: Vec<u32> = (0..inds.len() as u32).collect();
        let (base_k, base_v) = baseline_stable_sort(&inds, &vals);

        radix_sort_u32_soa(&mut inds, &mut vals);

        assert_eq!(inds, base_k);
        assert_eq!(vals, base_v);
    }

    #[test]
    fn radix_sort_matches_baseline_above_insertion_threshold() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[33usize, 64, 129, 1024] {
            let mut inds = Vec::with_capacity(n);
            let mut vals = Vec::with_capacity(n);
            for i in 0..n {
                inds.push(rng.next_u32() & 0x00FF_FFFF);
                vals.push(i as u64);
            }
            let (base_k, base_v) = baseline_stable_sort(&inds, &vals);

            radix_sort_u32_soa(&mut inds, &mut vals);

            assert_eq!(inds, base_k, "keys mismatch at n={n}");
            assert_eq!(vals, base_v, "vals mismatch at n={n}");
        }
    }
}
