use approx::assert_relative_eq;
use sp500_charts::core::{Rect, Viewport};
use sp500_charts::layout::{SQUARIFY_RATIO, TreemapConfig, TreemapLayout};

fn unpadded() -> TreemapConfig {
    TreemapConfig {
        padding_px: 0.0,
        ratio: SQUARIFY_RATIO,
    }
}

fn canvas() -> Rect {
    Rect::from_viewport(Viewport::new(400, 200))
}

#[test]
fn leaf_areas_are_proportional_to_weights() {
    let layout = TreemapLayout::compute(&[3.0, 1.0], canvas(), unpadded()).expect("layout");

    assert_eq!(layout.leaves.len(), 2);
    assert_eq!(layout.leaves[0].index, 0);
    assert_relative_eq!(layout.leaves[0].cell.area(), 60_000.0, epsilon = 1e-6);
    assert_relative_eq!(layout.leaves[1].cell.area(), 20_000.0, epsilon = 1e-6);
}

#[test]
fn unpadded_cells_tile_the_whole_canvas() {
    let weights = [0.071, 0.065, 0.031, 0.028, 0.02, 0.017, 0.012, 0.009, 0.004];
    let layout = TreemapLayout::compute(&weights, canvas(), unpadded()).expect("layout");

    let covered: f64 = layout.leaves.iter().map(|leaf| leaf.cell.area()).sum();
    assert_relative_eq!(covered, canvas().area(), epsilon = 1e-6);
}

#[test]
fn leaves_come_out_in_descending_weight_order() {
    let layout = TreemapLayout::compute(&[1.0, 5.0, 3.0], canvas(), unpadded()).expect("layout");
    let order: Vec<usize> = layout.leaves.iter().map(|leaf| leaf.index).collect();
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn equal_weights_keep_input_order() {
    let layout =
        TreemapLayout::compute(&[2.0, 1.0, 1.0, 1.0, 2.0], canvas(), unpadded()).expect("layout");
    let order: Vec<usize> = layout.leaves.iter().map(|leaf| leaf.index).collect();
    assert_eq!(order, vec![0, 4, 1, 2, 3]);
}

#[test]
fn empty_or_zero_weights_produce_no_leaves() {
    for weights in [&[][..], &[0.0, 0.0][..], &[-1.0, f64::NAN][..]] {
        let layout = TreemapLayout::compute(weights, canvas(), unpadded()).expect("layout");
        assert!(layout.is_empty());
        assert!(layout.hit_test(10.0, 10.0).is_none());
    }
}

#[test]
fn invalid_weights_count_as_zero_area() {
    let layout =
        TreemapLayout::compute(&[4.0, f64::INFINITY, -2.0], canvas(), unpadded()).expect("layout");
    assert_eq!(layout.total_weight, 4.0);
    assert_relative_eq!(layout.leaves[0].cell.area(), canvas().area(), epsilon = 1e-6);
    assert!(layout.leaves[1..].iter().all(|leaf| leaf.cell.area() < 1e-9));
}

#[test]
fn negative_and_nan_weights_are_laid_out_not_rejected() {
    let layout = TreemapLayout::compute(&[4.0, -2.0, f64::NAN], canvas(), TreemapConfig::default())
        .expect("lenient weights still lay out");
    assert_eq!(layout.leaves.len(), 3);
    assert_eq!(layout.leaves[0].index, 0);
    assert_eq!(layout.total_weight, 4.0);
    assert!(layout.leaves[1..].iter().all(|leaf| leaf.weight == 0.0));
    assert!(layout.leaves[1..].iter().all(|leaf| leaf.bounds.area() == 0.0));
}

#[test]
fn padding_insets_canvas_and_every_cell() {
    let config = TreemapConfig {
        padding_px: 4.0,
        ratio: SQUARIFY_RATIO,
    };
    let layout = TreemapLayout::compute(&[5.0, 3.0, 2.0], canvas(), config).expect("layout");

    assert_eq!(layout.tiled, Rect::new(2.0, 2.0, 398.0, 198.0));
    for leaf in &layout.leaves {
        assert_relative_eq!(leaf.bounds.x0, leaf.cell.x0 + 2.0, epsilon = 1e-9);
        assert_relative_eq!(leaf.bounds.y1, leaf.cell.y1 - 2.0, epsilon = 1e-9);
        assert!(leaf.bounds.x0 >= layout.tiled.x0 && leaf.bounds.x1 <= layout.tiled.x1);
        assert!(leaf.bounds.y0 >= layout.tiled.y0 && leaf.bounds.y1 <= layout.tiled.y1);
    }
}

#[test]
fn negative_padding_is_rejected() {
    let config = TreemapConfig {
        padding_px: -1.0,
        ratio: SQUARIFY_RATIO,
    };
    assert!(TreemapLayout::compute(&[1.0], canvas(), config).is_err());
}

#[test]
fn hit_test_finds_the_leaf_under_the_point() {
    let layout = TreemapLayout::compute(&[3.0, 1.0], canvas(), TreemapConfig::default())
        .expect("layout");

    for leaf in &layout.leaves {
        let cx = (leaf.bounds.x0 + leaf.bounds.x1) / 2.0;
        let cy = (leaf.bounds.y0 + leaf.bounds.y1) / 2.0;
        let hit = layout.hit_test(cx, cy).expect("hit");
        assert_eq!(hit.index, leaf.index);
    }
    assert!(layout.hit_test(-5.0, 50.0).is_none());
    assert!(layout.hit_test(0.5, 0.5).is_none(), "outer padding is not a cell");
}

#[test]
fn narrow_cells_do_not_fit_labels() {
    let layout = TreemapLayout::compute(&[99.0, 1.0], canvas(), unpadded()).expect("layout");
    assert!(layout.leaves[0].fits_label(30.0));
    assert!(!layout.leaves[1].fits_label(30.0));
}
