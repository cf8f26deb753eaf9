use molpaint::{DepictError, EngineError, ImageRenderer, RenderOptions, RenderRequest};
use rstest::rstest;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[rstest]
fn valid_smiles_match_requested_size(
    #[values("CCO", "c1ccccc1", "CC(=O)Oc1ccccc1C(=O)O", "[Na+].[Cl-]", "C#N", "O")] smiles: &str,
    #[values((300, 300), (100, 100), (64, 200), (1, 1))] size: (u32, u32),
) {
    init_logging();
    let (width, height) = size;
    let renderer = ImageRenderer::new();
    let image = renderer
        .render(&RenderRequest::new(smiles, width, height))
        .unwrap();
    assert_eq!(image.dimensions(), (width, height));
}

#[rstest]
#[case::letters("not-a-smiles")]
#[case::open_ring("C1CC")]
#[case::open_branch("CC(C")]
#[case::bad_bracket("[Xx]")]
#[case::empty("")]
fn syntax_errors(#[case] smiles: &str) {
    let err = ImageRenderer::new().render_one(smiles).unwrap_err();
    assert!(matches!(err, DepictError::SmilesSyntax { .. }), "{smiles:?}: {err}");
}

#[rstest]
#[case::unkekulizable("c1cccc1")]
#[case::pentavalent_carbon("C(C)(C)(C)(C)C")]
fn engine_errors(#[case] smiles: &str) {
    let err = ImageRenderer::new().render_one(smiles).unwrap_err();
    assert!(
        matches!(
            err,
            DepictError::ChemistryEngine {
                source: EngineError::Kekulize(_) | EngineError::Valence(_),
                ..
            }
        ),
        "{smiles:?}: {err}"
    );
}

#[test]
fn array_keeps_failures_in_place() {
    init_logging();
    let mut renderer = ImageRenderer::new();
    let results = renderer.render_array(&["CCO", "not-a-smiles", "c1ccccc1"], 100, 100);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().dimensions(), (100, 100));
    assert!(matches!(results[1], Err(DepictError::SmilesSyntax { .. })));
    assert_eq!(results[2].as_ref().unwrap().dimensions(), (100, 100));
    assert_eq!((renderer.width(), renderer.height()), (100, 100));
}

#[test]
fn empty_batches() {
    let mut renderer = ImageRenderer::new();
    let empty: [&str; 0] = [];
    assert!(renderer.render_array(&empty, 10, 10).is_empty());
    assert!(renderer.render_map(&empty, 10, 10).is_empty());
}

#[test]
fn map_collapses_duplicates_and_drops_failures() {
    init_logging();
    let mut renderer = ImageRenderer::new();
    let map = renderer.render_map(&["CCO", "not-a-smiles", "CCO"], 100, 100);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("CCO").unwrap().dimensions(), (100, 100));
    assert!(map.get("not-a-smiles").is_none());
    assert_eq!(map.failures.len(), 1);
    assert_eq!(map.failures[0].smiles(), Some("not-a-smiles"));
}

#[test]
fn icon_size_sticks_for_later_renders() {
    let mut renderer = ImageRenderer::new();
    let icon = renderer.render_icon(50, 80, "CCO").unwrap();
    assert_eq!((icon.icon_width(), icon.icon_height()), (50, 80));
    let image = renderer.render_one("CC").unwrap();
    assert_eq!(image.dimensions(), (50, 80));
}

#[test]
fn repeated_renders_are_identical() {
    let renderer = ImageRenderer::new();
    let first = renderer.render_one("c1ccc2ccccc2c1").unwrap();
    let second = renderer.render_one("c1ccc2ccccc2c1").unwrap();
    assert_eq!(first.dimensions(), second.dimensions());
    assert_eq!(first, second);
}

#[test]
fn zero_dimensions_are_rejected() {
    let renderer = ImageRenderer::new();
    let err = renderer.render(&RenderRequest::new("CCO", 0, 10)).unwrap_err();
    assert!(matches!(err, DepictError::InvalidDimensions { width: 0, height: 10 }));
}

#[test]
fn bonds_are_drawn_in_the_foreground_colour() {
    let renderer = ImageRenderer::new();
    let image = renderer.render_one("CCCC").unwrap();
    let dark = image.pixels().filter(|p| p.0.iter().all(|&c| c < 128)).count();
    assert!(dark > 50, "only {dark} dark pixels");
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn custom_background() {
    let options: RenderOptions = serde_json::from_str(r##"{"background": "#102030"}"##).unwrap();
    let renderer = ImageRenderer::with_options(options);
    let image = renderer.render_one("CC").unwrap();
    assert_eq!(image.get_pixel(0, 0).0, [0x10, 0x20, 0x30]);
}

#[test]
fn renderer_can_be_shared_between_threads() {
    let renderer = std::sync::Arc::new(ImageRenderer::new());
    let handles: Vec<_> = ["CCO", "c1ccccc1", "CC#N"]
        .into_iter()
        .map(|s| {
            let renderer = renderer.clone();
            std::thread::spawn(move || renderer.render_one(s).map(|i| i.dimensions()))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().unwrap(), (300, 300));
    }
}
