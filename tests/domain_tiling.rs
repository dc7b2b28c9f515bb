//! Tiling invariant: the union of all ranks' read domains covers the
//! checkpointed global window exactly once.

use std::collections::HashMap;

use field_restart::prelude::*;
use proptest::prelude::*;

/// Per-rank window state for a grid sliding along axis 1: the position-0 row
/// absorbs the leading-edge offset into its local window, everyone else sees
/// the full local domain.
fn window_for_rank(
    position: [usize; 2],
    extent: [usize; 2],
    local_size: [usize; 2],
    slide_count: usize,
    leading_edge: usize,
) -> MovingWindowState<2> {
    let mut window =
        MovingWindowState::unslid(1, local_size, extent).with_slide_count(slide_count);
    window.global_window_offset[1] = leading_edge;
    window.global_window_size[1] -= leading_edge;
    if position[1] == 0 {
        window.local_window_offset[1] = leading_edge;
        window.local_window_size[1] -= leading_edge;
    }
    window
}

/// Count how often each global cell is claimed by some rank's descriptor.
fn coverage(
    extent: [usize; 2],
    local_size: [usize; 2],
    slide_count: usize,
    leading_edge: usize,
) -> HashMap<(usize, usize), usize> {
    let mut cells: HashMap<(usize, usize), usize> = HashMap::new();
    for px in 0..extent[0] {
        for py in 0..extent[1] {
            let topo = CartesianTopology::new([px, py], extent, local_size);
            let window = window_for_rank([px, py], extent, local_size, slide_count, leading_edge);
            let dom = read_domain(&topo, &window);
            for x in dom.offset[0]..dom.offset[0] + dom.size[0] {
                for y in dom.offset[1]..dom.offset[1] + dom.size[1] {
                    *cells.entry((x, y)).or_default() += 1;
                }
            }
        }
    }
    cells
}

fn assert_exact_tiling(
    extent: [usize; 2],
    local_size: [usize; 2],
    slide_count: usize,
    leading_edge: usize,
) -> Result<(), TestCaseError> {
    let cells = coverage(extent, local_size, slide_count, leading_edge);

    // expected window: full extent on axis 0, slid and cut by the leading
    // edge on axis 1
    let x_range = 0..extent[0] * local_size[0];
    let y_start = slide_count * local_size[1] + leading_edge;
    let y_end = slide_count * local_size[1] + extent[1] * local_size[1];

    let expected = x_range.len() * (y_end - y_start);
    prop_assert_eq!(cells.len(), expected, "coverage extent mismatch");
    for (&(x, y), &count) in &cells {
        prop_assert_eq!(count, 1, "cell ({}, {}) covered {} times", x, y, count);
        prop_assert!(x_range.contains(&x));
        prop_assert!((y_start..y_end).contains(&y));
    }
    Ok(())
}

proptest! {
    #[test]
    fn rank_domains_tile_the_global_window(
        extent in (1usize..=3, 1usize..=3),
        local_size in (1usize..=5, 2usize..=5),
        slide_count in 0usize..=3,
        leading_frac in 0usize..=4,
    ) {
        let extent = [extent.0, extent.1];
        let local_size = [local_size.0, local_size.1];
        let leading_edge = leading_frac % local_size[1];
        assert_exact_tiling(extent, local_size, slide_count, leading_edge)?;
    }
}

#[test]
fn three_ranks_along_the_sliding_axis_with_slide_and_leading_edge() {
    assert_exact_tiling([2, 3], [4, 4], 2, 3).unwrap();
}

#[test]
fn single_rank_degenerate_grid_tiles_itself() {
    assert_exact_tiling([1, 1], [5, 3], 0, 0).unwrap();
}
