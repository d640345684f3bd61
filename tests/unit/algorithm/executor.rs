//! Tests for whole-image conversion, block ordering and the top-level entry point

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tilecast::algorithm::executor::{
        BlockScore, Conversion, ConversionConfig, ConversionOutcome, Converter, convert,
    };
    use tilecast::algorithm::matcher::{ExhaustiveSearch, MatchResult, SearchStrategy};
    use tilecast::analysis::statistics::ModeStrategy;
    use tilecast::analysis::tileset::Tileset;
    use tilecast::io::configuration::{BLACK, TILE_SIZE, WHITE};
    use tilecast::io::error::TileArtError;
    use tilecast::spatial::grid::EdgePolicy;
    use tilecast::spatial::tiles::Tile;

    // Keeps every block it is asked to match and returns it unchanged
    #[derive(Default)]
    struct RecordingSearch {
        blocks: Mutex<Vec<Tile>>,
    }

    impl SearchStrategy for RecordingSearch {
        fn search(&self, block: &Tile) -> tilecast::Result<MatchResult> {
            self.blocks.lock().unwrap().push(block.clone());
            Ok(MatchResult {
                tile: block.clone(),
                score: 1.0,
                candidate_index: 0,
                evaluated: 1,
            })
        }
    }

    fn tileset_image() -> RgbImage {
        RgbImage::from_fn(16, 8, |x, y| {
            let black = if x < 8 { x < 4 } else { y > x - 8 };
            Rgb(if black { BLACK } else { WHITE })
        })
    }

    fn source_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8])
        })
    }

    // Tests block sizes below the SSIM window are rejected
    // Verified by accepting any positive tile size
    #[test]
    fn test_converter_validates_tile_size() {
        assert!(matches!(
            Converter::new(6, EdgePolicy::Replicate, false),
            Err(TileArtError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));
        assert!(Converter::new(7, EdgePolicy::Replicate, false).is_ok());
        assert!(Converter::new(TILE_SIZE, EdgePolicy::Black, true).is_ok());
    }

    // Tests output dimensions equal input dimensions for ragged images
    // Verified by rounding the output up to whole blocks
    #[test]
    fn test_convert_image_preserves_dimensions() {
        let tileset = Tileset::build(&tileset_image(), 8);
        let search = ExhaustiveSearch::new(&tileset);
        let converter = Converter::new(8, EdgePolicy::Replicate, false).unwrap();

        let source = source_image(20, 12);
        let outcome = converter.convert_image(&source, &search, &|| {}).unwrap();

        assert_eq!(outcome.image.dimensions(), (20, 12));
        assert_eq!(outcome.block_scores.len(), 6);
        let origins: Vec<[u32; 2]> = outcome.block_scores.iter().map(|b| b.origin).collect();
        assert_eq!(
            origins,
            vec![[0, 0], [8, 0], [16, 0], [0, 8], [8, 8], [16, 8]]
        );
        for block in &outcome.block_scores {
            assert!((-1.0..=1.0).contains(&block.score));
            assert!(block.candidate_index < tileset.len());
        }
    }

    // Tests parallel and sequential conversion agree exactly
    // Verified by pasting blocks in completion order
    #[test]
    fn test_parallel_matches_sequential() {
        let tileset = Tileset::build(&tileset_image(), 8);
        let search = ExhaustiveSearch::new(&tileset);
        let source = source_image(40, 27);

        let sequential = Converter::new(8, EdgePolicy::Replicate, false)
            .unwrap()
            .convert_image(&source, &search, &|| {})
            .unwrap();
        let parallel = Converter::new(8, EdgePolicy::Replicate, true)
            .unwrap()
            .convert_image(&source, &search, &|| {})
            .unwrap();

        assert_eq!(sequential.image, parallel.image);
        assert_eq!(sequential.block_scores, parallel.block_scores);
    }

    // Tests the progress callback fires once per block
    // Verified by reporting progress once per row
    #[test]
    fn test_progress_callback_per_block() {
        let tileset = Tileset::build(&tileset_image(), 8);
        let search = ExhaustiveSearch::new(&tileset);
        let converter = Converter::new(8, EdgePolicy::Replicate, true).unwrap();
        let counter = AtomicUsize::new(0);

        let source = source_image(33, 17);
        converter
            .convert_image(&source, &search, &|| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();

        assert_eq!(counter.load(Ordering::Relaxed), converter.block_count(33, 17));
        assert_eq!(converter.block_count(33, 17), 15);
    }

    // Tests an empty source converts to an empty image without consulting the tileset
    // Verified by failing on empty tilesets before walking blocks
    #[test]
    fn test_empty_source() {
        let tileset = Tileset::build(&RgbImage::new(0, 0), 8);
        let search = ExhaustiveSearch::new(&tileset);
        let converter = Converter::new(8, EdgePolicy::Replicate, false).unwrap();

        let outcome = converter
            .convert_image(&RgbImage::new(0, 0), &search, &|| {})
            .unwrap();
        assert_eq!(outcome.image.dimensions(), (0, 0));
        assert_eq!(outcome.mean_score(), None);
    }

    // Tests shape errors carry the origin of the failing block
    // Verified by dropping the block context
    #[test]
    fn test_shape_mismatch_reports_block() {
        let tileset = Tileset::build(&tileset_image(), 16);
        let search = ExhaustiveSearch::new(&tileset);
        let converter = Converter::new(8, EdgePolicy::Replicate, false).unwrap();

        let result = converter.convert_image(&source_image(16, 16), &search, &|| {});
        assert!(matches!(
            result,
            Err(TileArtError::ShapeMismatch {
                block: Some([0, 0]),
                ..
            })
        ));
    }

    // Tests ragged blocks are padded with black under default configuration
    // Verified by replicating edge pixels by default
    #[test]
    fn test_default_config_pads_ragged_blocks_black() {
        let config = ConversionConfig::new("in.png", "tiles.png");
        let converter = Converter::from_config(&ConversionConfig {
            parallel: false,
            ..config
        })
        .unwrap();
        let search = RecordingSearch::default();
        let source = RgbImage::from_pixel(11, 8, Rgb([90, 160, 30]));

        let outcome = converter.convert_image(&source, &search, &|| {}).unwrap();
        assert_eq!(outcome.image, source);

        let blocks = search.blocks.lock().unwrap();
        assert_eq!(blocks.len(), 2);
        let ragged = &blocks[1];
        assert_eq!(ragged.pixel(7, 2), Some([90, 160, 30]));
        assert_eq!(ragged.pixel(0, 3), Some(BLACK));
        assert_eq!(ragged.pixel(7, 7), Some(BLACK));
        assert_eq!(ragged.pixels().filter(|&p| p == BLACK).count(), 40);
    }

    // Tests the mean score averages block scores
    // Verified by summing without dividing
    #[test]
    fn test_mean_score() {
        let outcome = ConversionOutcome {
            image: RgbImage::new(16, 8),
            block_scores: vec![
                BlockScore {
                    origin: [0, 0],
                    score: 1.0,
                    candidate_index: 0,
                },
                BlockScore {
                    origin: [8, 0],
                    score: 0.5,
                    candidate_index: 3,
                },
            ],
        };
        assert_eq!(outcome.mean_score(), Some(0.75));
    }

    // Tests configuration defaults
    // Verified by defaulting to sequential matching
    #[test]
    fn test_config_defaults() {
        let config = ConversionConfig::new("in.png", "tiles.png");
        assert_eq!(config.tile_size, TILE_SIZE);
        assert_eq!(config.mode_strategy, ModeStrategy::Joint);
        assert_eq!(config.edge_policy, EdgePolicy::Black);
        assert!(config.parallel);
    }

    // Tests the top-level entry point converts files end to end
    // Verified by loading the tileset from the source path
    #[test]
    fn test_convert_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("source.png");
        let tileset_path = dir.path().join("tileset.png");
        source_image(21, 13).save(&source_path).unwrap();
        tileset_image().save(&tileset_path).unwrap();

        let outcome = convert(ConversionConfig::new(&source_path, &tileset_path)).unwrap();
        assert_eq!(outcome.image.dimensions(), (21, 13));
        assert_eq!(outcome.block_scores.len(), 6);

        let conversion = Conversion::prepare(ConversionConfig::new(&source_path, &tileset_path))
            .unwrap();
        assert_eq!(conversion.tileset().len(), 16);
        assert_eq!(conversion.converter().tile_size(), TILE_SIZE);
        let again = conversion.run(&|| {}).unwrap();
        assert_eq!(again.image, outcome.image);
    }

    // Tests missing inputs abort with an image load error
    // Verified by substituting a blank image for missing files
    #[test]
    fn test_convert_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("source.png");
        source_image(8, 8).save(&source_path).unwrap();

        let missing_tileset = convert(ConversionConfig::new(
            &source_path,
            dir.path().join("nope.png"),
        ));
        assert!(matches!(missing_tileset, Err(TileArtError::ImageLoad { .. })));

        let tileset_path = dir.path().join("tileset.png");
        tileset_image().save(&tileset_path).unwrap();
        let missing_source = convert(ConversionConfig::new(
            dir.path().join("nope.png"),
            &tileset_path,
        ));
        assert!(matches!(missing_source, Err(TileArtError::ImageLoad { .. })));
    }
}
