// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Assumes both vectors are sorted. Items of b which aren't in a are ignored.
pub fn difference<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: PartialOrd + Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        if a[ap] < b[bp] {
            c.push(a[ap]);
            ap += 1;
        } else if b[bp] < a[ap] {
            bp += 1;
        } else {
            ap += 1;
            bp += 1;
        }
    }
    while ap < a.len() {
        c.push(a[ap]);
        ap += 1;
    }
    c
}

// Assumes both vectors are sorted.
pub fn is_subset<T>(a: &[T], b: &[T]) -> bool
where
    T: PartialOrd,
{
    let mut bp = 0;
    for x in a {
        while bp < b.len() && b[bp] < *x {
            bp += 1;
        }
        if bp == b.len() || b[bp] != *x {
            return false;
        }
        bp += 1;
    }
    true
}

// True when every element is strictly greater than the one before it.
pub fn is_strictly_ascending<T>(a: &[T]) -> bool
where
    T: PartialOrd,
{
    a.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    fn to_item_vec(nums: &[u32]) -> Vec<Item> {
        nums.iter().map(|i| Item::with_id(*i)).collect()
    }

    #[test]
    fn test_difference() {
        use super::difference;

        let test_cases: Vec<(Vec<Item>, Vec<Item>, Vec<Item>)> = [
            (vec![1, 2, 3], vec![2], vec![1, 3]),
            (vec![1, 2, 3], vec![1, 3], vec![2]),
            (vec![1, 2, 3], vec![1, 2, 3], vec![]),
            (vec![1, 2, 3], vec![], vec![1, 2, 3]),
            (vec![1, 3], vec![2, 4], vec![1, 3]),
            (vec![], vec![1], vec![]),
        ]
        .iter()
        .map(|&(ref a, ref b, ref d)| (to_item_vec(a), to_item_vec(b), to_item_vec(d)))
        .collect();

        for &(ref a, ref b, ref d) in &test_cases {
            assert_eq!(&difference(&a, &b), d);
        }
    }

    #[test]
    fn test_is_subset() {
        use super::is_subset;
        assert!(is_subset(&[1, 3], &[1, 2, 3]));
        assert!(is_subset::<u32>(&[], &[1]));
        assert!(is_subset(&[2], &[2]));
        assert!(!is_subset(&[1, 4], &[1, 2, 3]));
        assert!(!is_subset(&[1, 2], &[2]));
    }

    #[test]
    fn test_is_strictly_ascending() {
        use super::is_strictly_ascending;
        assert!(is_strictly_ascending::<u32>(&[]));
        assert!(is_strictly_ascending(&[4]));
        assert!(is_strictly_ascending(&[1, 2, 9]));
        assert!(!is_strictly_ascending(&[1, 1, 2]));
        assert!(!is_strictly_ascending(&[3, 2]));
    }
}
