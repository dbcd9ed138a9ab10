//! Instrumented Quadratic Sorts
//!
//! Four classic O(n²) sorts that sort a slice in place and return how many loop
//! passes they made. Every outer-loop iteration and every inner-loop iteration
//! adds one to the count, whether or not it swapped anything, so the count
//! tracks the structural work of the algorithm rather than its swaps.
//!
//! Fixed costs for tiny inputs:
//!
//! | algorithm        | len 0 | len 1 |
//! |------------------|-------|-------|
//! | bubble           | 1     | 1     |
//! | insertion        | 0     | 0     |
//! | optimized bubble | 1     | 1     |
//! | selection        | 0     | 1     |

use std::fmt;
use std::str::FromStr;

use crate::error::GrowthError;

/// Bubble sort with full-length passes until a pass makes no swap.
///
/// Counts one per pass (the final no-swap pass included) and one per
/// adjacent pair examined.
pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) -> u64 {
    let mut count = 0;
    let mut swapped = true;

    while swapped {
        count += 1;
        swapped = false;

        for i in 1..items.len() {
            count += 1;
            if items[i] < items[i - 1] {
                items.swap(i, i - 1);
                swapped = true;
            }
        }
    }

    count
}

/// Insertion sort walking each element left while its neighbour is larger.
///
/// Counts one per outer position and one per shift.
pub fn insertion_sort<T: PartialOrd>(items: &mut [T]) -> u64 {
    let mut count = 0;

    for i in 1..items.len() {
        count += 1;

        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            count += 1;
            items.swap(j - 1, j);
            j -= 1;
        }
    }

    count
}

/// Bubble sort whose scanned range shrinks by one after every pass.
///
/// After pass k the k largest values are in their final slots, so the
/// bound drops even when the pass made no swap.
pub fn opt_bubble_sort<T: PartialOrd>(items: &mut [T]) -> u64 {
    let mut count = 0;
    let mut bound = items.len();
    let mut swapped = true;

    while swapped {
        count += 1;
        swapped = false;

        for i in 1..bound {
            count += 1;
            if items[i - 1] > items[i] {
                items.swap(i - 1, i);
                swapped = true;
            }
        }

        bound = bound.saturating_sub(1);
    }

    count
}

/// Selection sort; the minimum of the unsorted tail is swapped into place
/// even when it already is in place.
pub fn selection_sort<T: PartialOrd>(items: &mut [T]) -> u64 {
    let mut count = 0;

    for i in 0..items.len() {
        count += 1;

        let mut min = i;
        for j in (i + 1)..items.len() {
            count += 1;
            if items[j] < items[min] {
                min = j;
            }
        }

        items.swap(min, i);
    }

    count
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// The four instrumented sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Insertion,
    OptimizedBubble,
    Selection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::OptimizedBubble,
        Algorithm::Selection,
    ];

    /// Stable identifier, used for table file names and report keys.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble_sort",
            Algorithm::Insertion => "insertion_sort",
            Algorithm::OptimizedBubble => "opt_bubble_sort",
            Algorithm::Selection => "selection_sort",
        }
    }

    /// Human readable name for menus and plot legends.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble sort",
            Algorithm::Insertion => "Insertion sort",
            Algorithm::OptimizedBubble => "Optimized bubble sort",
            Algorithm::Selection => "Selection sort",
        }
    }

    /// File name of the persisted trial table, e.g. `bubble_sort.csv`.
    pub fn table_file_name(&self) -> String {
        format!("{}.csv", self.name())
    }

    /// Sort `items` in place with this algorithm and return its operation count.
    pub fn count<T: PartialOrd>(&self, items: &mut [T]) -> u64 {
        match self {
            Algorithm::Bubble => bubble_sort(items),
            Algorithm::Insertion => insertion_sort(items),
            Algorithm::OptimizedBubble => opt_bubble_sort(items),
            Algorithm::Selection => selection_sort(items),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "bubble" | "bubble_sort" => Ok(Algorithm::Bubble),
            "insertion" | "insertion_sort" => Ok(Algorithm::Insertion),
            "opt_bubble" | "opt_bubble_sort" | "optimized_bubble" => {
                Ok(Algorithm::OptimizedBubble)
            }
            "selection" | "selection_sort" => Ok(Algorithm::Selection),
            other => Err(GrowthError::InvalidParameter(format!(
                "unknown algorithm '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::Rng;

    fn random_data(len: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.gen()).collect()
    }

    fn sorted_copy(data: &[f64]) -> Vec<f64> {
        let mut expected = data.to_vec();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        expected
    }

    #[test]
    fn test_fixed_cost_empty() {
        let empty: [u32; 0] = [];
        assert_eq!(bubble_sort(&mut empty.clone()), 1);
        assert_eq!(insertion_sort(&mut empty.clone()), 0);
        assert_eq!(opt_bubble_sort(&mut empty.clone()), 1);
        assert_eq!(selection_sort(&mut empty.clone()), 0);
    }

    #[test]
    fn test_fixed_cost_single() {
        assert_eq!(bubble_sort(&mut [42]), 1);
        assert_eq!(insertion_sort(&mut [42]), 0);
        assert_eq!(opt_bubble_sort(&mut [42]), 1);
        assert_eq!(selection_sort(&mut [42]), 1);
    }

    #[test]
    fn test_two_elements_descending() {
        let mut data = [6, 1];
        assert_eq!(bubble_sort(&mut data), 4);
        assert_eq!(data, [1, 6]);

        let mut data = [6, 1];
        assert_eq!(insertion_sort(&mut data), 2);
        assert_eq!(data, [1, 6]);

        let mut data = [6, 1];
        assert_eq!(opt_bubble_sort(&mut data), 3);
        assert_eq!(data, [1, 6]);

        let mut data = [6, 1];
        assert_eq!(selection_sort(&mut data), 3);
        assert_eq!(data, [1, 6]);
    }

    #[test]
    fn test_two_elements_ascending() {
        assert_eq!(bubble_sort(&mut [1, 6]), 2);
        assert_eq!(insertion_sort(&mut [1, 6]), 1);
        assert_eq!(opt_bubble_sort(&mut [1, 6]), 2);
        assert_eq!(selection_sort(&mut [1, 6]), 3);
    }

    #[test]
    fn test_selection_count_ignores_order() {
        for n in 0..30u64 {
            let expected = n + n * n.saturating_sub(1) / 2;
            let mut data = random_data(n as usize);
            assert_eq!(selection_sort(&mut data), expected);
            let mut reversed: Vec<u64> = (0..n).rev().collect();
            assert_eq!(selection_sort(&mut reversed), expected);
        }
    }

    #[test]
    fn test_reverse_input_counts() {
        for n in 1..30u64 {
            let reversed: Vec<u64> = (0..n).rev().collect();

            assert_eq!(bubble_sort(&mut reversed.clone()), n * n);
            assert_eq!(opt_bubble_sort(&mut reversed.clone()), n + n * (n - 1) / 2);
            assert_eq!(insertion_sort(&mut reversed.clone()), (n - 1) + n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_sorted_input_counts() {
        for n in 1..30u64 {
            let sorted: Vec<u64> = (0..n).collect();

            assert_eq!(bubble_sort(&mut sorted.clone()), n);
            assert_eq!(opt_bubble_sort(&mut sorted.clone()), n);
            assert_eq!(insertion_sort(&mut sorted.clone()), n - 1);
        }
    }

    #[test]
    fn test_all_algorithms_sort_random() {
        for algorithm in Algorithm::ALL {
            for len in [0, 1, 2, 3, 10, 57, 200] {
                let original = random_data(len);
                let mut data = original.clone();
                algorithm.count(&mut data);
                assert!(is_sorted(&data), "{} left data unsorted", algorithm);
                assert_eq!(data, sorted_copy(&original), "{} lost values", algorithm);
            }
        }
    }

    #[test]
    fn test_duplicates() {
        for algorithm in Algorithm::ALL {
            let mut data = vec![5, 3, 5, 1, 3, 5, 1, 1];
            algorithm.count(&mut data);
            assert_eq!(data, vec![1, 1, 1, 3, 3, 5, 5, 5]);
        }
    }

    #[test]
    fn test_count_is_deterministic() {
        let original = random_data(64);
        for algorithm in Algorithm::ALL {
            let first = algorithm.count(&mut original.clone());
            let second = algorithm.count(&mut original.clone());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_opt_bubble_never_exceeds_bubble() {
        for _ in 0..20 {
            let original = random_data(40);
            let plain = bubble_sort(&mut original.clone());
            let optimized = opt_bubble_sort(&mut original.clone());
            assert!(optimized <= plain);
        }
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::Bubble.table_file_name(), "bubble_sort.csv");
        assert_eq!(Algorithm::OptimizedBubble.to_string(), "opt_bubble_sort");
        assert_eq!(Algorithm::Selection.label(), "Selection sort");
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("bubble".parse::<Algorithm>().unwrap(), Algorithm::Bubble);
        assert_eq!(
            "opt-bubble".parse::<Algorithm>().unwrap(),
            Algorithm::OptimizedBubble
        );
        assert_eq!(
            "Insertion_Sort".parse::<Algorithm>().unwrap(),
            Algorithm::Insertion
        );
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!(matches!(
            "quick".parse::<Algorithm>(),
            Err(GrowthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[1, 2, 3, 4, 5]));
        assert!(is_sorted(&[1, 1, 1, 1]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted::<u32>(&[]));
        assert!(!is_sorted(&[5, 4, 3, 2, 1]));
        assert!(!is_sorted(&[1, 3, 2]));
    }

    proptest! {
        #[test]
        fn prop_every_algorithm_returns_sorted_permutation(
            data in prop::collection::vec(any::<i32>(), 0..64)
        ) {
            let mut expected = data.clone();
            expected.sort_unstable();

            for algorithm in Algorithm::ALL {
                let mut items = data.clone();
                algorithm.count(&mut items);
                prop_assert!(is_sorted(&items), "{} left input unsorted", algorithm);
                prop_assert_eq!(&items, &expected);
            }
        }

        #[test]
        fn prop_counts_are_deterministic(data in prop::collection::vec(any::<i32>(), 0..64)) {
            for algorithm in Algorithm::ALL {
                let first = algorithm.count(&mut data.clone());
                let second = algorithm.count(&mut data.clone());
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn prop_selection_count_ignores_values(data in prop::collection::vec(any::<i32>(), 0..64)) {
            let n = data.len() as u64;
            let expected = n + n * n.saturating_sub(1) / 2;
            prop_assert_eq!(selection_sort(&mut data.clone()), expected);
        }
    }
}
