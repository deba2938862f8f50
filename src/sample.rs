// ============================================
// src/sample.rs
// ランダム抽出 (関連項目のプレビュー・クイズの選択肢用)
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;

/// `items` から最大 `n` 個をランダムに取り出す
///
/// - `items.len() <= n` のときは全要素を元の順番のまま返す (シャッフルも水増しもしない)
/// - それ以外は重複なしでちょうど `n` 個をランダムな順番で返す
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    if items.len() <= n {
        return items.to_vec();
    }

    // 部分的な Fisher-Yates: 先頭 n 個だけ確定させる
    let mut pool = items.to_vec();
    let (chosen, _) = pool.partial_shuffle(rng, n);
    chosen.to_vec()
}

/// スレッドローカルな乱数で `sample` する
pub fn sample_random<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    sample(items, n, &mut rand::rng())
}

/// 全要素をシャッフルしたコピーを返す
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    result.shuffle(rng);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn small_input_is_returned_whole_and_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec!["a", "b", "c"];
        assert_eq!(sample(&items, 3, &mut rng), items);
        assert_eq!(sample(&items, 10, &mut rng), items);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut rng = StdRng::seed_from_u64(2);
        let items: Vec<u32> = Vec::new();
        assert!(sample(&items, 5, &mut rng).is_empty());
        assert!(sample(&items, 0, &mut rng).is_empty());
    }

    #[test]
    fn large_input_yields_exactly_n_distinct_members() {
        let items: Vec<u32> = (0..50).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = sample(&items, 7, &mut rng);
            assert_eq!(picked.len(), 7);

            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 7);
            assert!(picked.iter().all(|x| items.contains(x)));
        }
    }

    #[test]
    fn zero_from_nonempty_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(sample(&[1, 2, 3], 0, &mut rng).is_empty());
    }

    #[test]
    fn every_element_can_be_drawn() {
        let items: Vec<u32> = (0..6).collect();
        let mut seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            seen.extend(sample(&items, 2, &mut rng));
        }
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(9);
        let items: Vec<u32> = (0..20).collect();
        let mut result = shuffled(&items, &mut rng);
        result.sort_unstable();
        assert_eq!(result, items);
    }

    #[test]
    fn thread_rng_variant_respects_bounds() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(sample_random(&items, 4).len(), 4);
        assert_eq!(sample_random(&items, 40).len(), 10);
    }
}
