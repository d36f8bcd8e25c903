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

use std::ops::Range;

/// Half-open range `[rank*total/size, (rank+1)*total/size)` of the
/// `total` positions owned by `rank`. Ranges of all ranks tile `[0,total)`.
pub fn block_range(rank: usize, size: usize, total: usize) -> Range<usize> {
    assert!(size > 0 && rank < size);
    let first = rank * total / size;
    let last = (rank + 1) * total / size;
    first..last
}

/// Block lengths for a reduce-scatter of `total` values over `size` ranks:
/// `total/size` each, plus one for each of the first `total%size` ranks.
pub fn block_sizes(total: usize, size: usize) -> Vec<usize> {
    assert!(size > 0);
    let part = total / size;
    let remainder = total % size;
    (0..size)
        .map(|rank| if rank < remainder { part + 1 } else { part })
        .collect()
}

/// Running offsets of `sizes`, for locating each rank's block in a
/// concatenated buffer.
pub fn offsets(sizes: &[usize]) -> Vec<usize> {
    let mut sum = 0;
    sizes
        .iter()
        .map(|size| {
            let offset = sum;
            sum += size;
            offset
        })
        .collect()
}
