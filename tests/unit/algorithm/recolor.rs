//! Tests for recoloring binary tiles from source block colors

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tilecast::algorithm::recolor::{ColorRecoverer, apply_assignment, recolor};
    use tilecast::analysis::statistics::{ColorAssignment, ModeStrategy};
    use tilecast::io::configuration::{BLACK, WHITE};
    use tilecast::spatial::tiles::Tile;

    fn vertical_split() -> Tile {
        Tile::from_fn(8, 8, |_, c| if c < 4 { BLACK } else { WHITE })
    }

    // Tests each class takes the dominant color of its own positions
    // Verified by sampling the whole block for both classes
    #[test]
    fn test_recolor_two_classes() {
        let block = Tile::from_fn(8, 8, |r, c| match (r, c) {
            (7, 7) => [0, 0, 0],
            (_, c) if c < 4 => [220, 20, 60],
            _ => [34, 139, 34],
        });

        let colored = recolor(&vertical_split(), &block).unwrap();
        assert_eq!(colored.pixel(0, 0), Some([220, 20, 60]));
        assert_eq!(colored.pixel(7, 7), Some([34, 139, 34]));
        assert_eq!(colored.dim(), (8, 8));
    }

    // Tests the output only holds the two representative colors
    // Verified by copying source pixels into the output
    #[test]
    fn test_recolor_closed_color_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..25 {
            let bits: Vec<bool> = (0..64).map(|_| rng.random_bool(0.5)).collect();
            let candidate = Tile::from_fn(8, 8, |r, c| if bits[r * 8 + c] { WHITE } else { BLACK });
            let palette: Vec<[u8; 3]> = (0..3).map(|_| rng.random()).collect();
            let block = Tile::from_fn(8, 8, |r, c| palette[(r * 3 + c * 5) % 3]);

            let assignment =
                ColorAssignment::compute(&candidate, &block, ModeStrategy::Joint).unwrap();
            let colored = recolor(&candidate, &block).unwrap();

            for color in colored.pixels() {
                assert!(
                    Some(color) == assignment.black || Some(color) == assignment.white,
                    "Unexpected color {color:?}"
                );
            }
        }
    }

    // Tests an all-white candidate takes the block mode everywhere
    // Verified by painting the empty black class with a default color
    #[test]
    fn test_recolor_monochrome_candidate() {
        let candidate = Tile::filled(8, 8, WHITE);
        let block = Tile::from_fn(8, 8, |r, _| if r == 0 { [1, 2, 3] } else { [90, 80, 70] });

        let colored = recolor(&candidate, &block).unwrap();
        assert!(colored.pixels().all(|p| p == [90, 80, 70]));
    }

    // Tests pixels outside both classes pass through unchanged
    // Verified by treating non-white pixels as black
    #[test]
    fn test_recolor_keeps_unclassified_pixels() {
        let mut candidate = vertical_split();
        candidate.set_pixel(2, 2, [128, 128, 128]);
        let block = Tile::filled(8, 8, [5, 6, 7]);

        let colored = recolor(&candidate, &block).unwrap();
        assert_eq!(colored.pixel(2, 2), Some([128, 128, 128]));
        assert_eq!(colored.pixel(2, 3), Some([5, 6, 7]));
    }

    // Tests an unassigned class is left as-is by apply_assignment
    // Verified by mapping missing classes to black
    #[test]
    fn test_apply_partial_assignment() {
        let assignment = ColorAssignment {
            black: Some([9, 9, 9]),
            white: None,
        };
        let colored = apply_assignment(&vertical_split(), &assignment);
        assert_eq!(colored.pixel(0, 0), Some([9, 9, 9]));
        assert_eq!(colored.pixel(0, 7), Some(WHITE));
    }

    // Tests the per-channel strategy is honoured by the recoverer
    // Verified by ignoring the configured strategy
    #[test]
    fn test_recoverer_per_channel() {
        let candidate = Tile::filled(8, 8, BLACK);
        let block = Tile::from_fn(8, 8, |r, _| match r {
            0..=2 => [10, 0, 0],
            3..=5 => [0, 20, 0],
            _ => [0, 0, 30],
        });

        let joint = ColorRecoverer::new(ModeStrategy::Joint)
            .recolor(&candidate, &block)
            .unwrap();
        let per_channel = ColorRecoverer::new(ModeStrategy::PerChannel)
            .recolor(&candidate, &block)
            .unwrap();

        assert_eq!(joint.pixel(0, 0), Some([0, 20, 0]));
        assert_eq!(per_channel.pixel(0, 0), Some([0, 0, 0]));
    }

    // Tests mismatched shapes propagate as errors
    // Verified by recoloring only the overlapping area
    #[test]
    fn test_recolor_shape_mismatch() {
        let block = Tile::filled(9, 9, WHITE);
        assert!(recolor(&vertical_split(), &block).is_err());
    }
}
