use swatchboard::config::{BoardConfig, SwatchSeed};
use swatchboard::stage::{Stage, StageBounds};

#[test]
fn test_default_config() {
    let config = BoardConfig::default();
    assert_eq!(config.stage.swatch_size, 12.0);
    assert_eq!(config.stage.initial_swatches, 3);
    assert_eq!(config.drag.threshold, 5.0);
    assert_eq!(config.drag.overhang, 0.3);
    assert_eq!(config.mixer.small_step, 1);
    assert_eq!(config.mixer.large_step, 10);
    assert!(config.swatches.is_empty());
}

#[test]
fn test_parse_toml() {
    let toml_str = r##"
[stage]
swatch_size = 16.0

[drag]
threshold = 3.0

[[swatches]]
color = "#ff8000"
x = 4.0
y = 8.0

[[swatches]]
color = "hsl(200, 50%, 40%)"
x = 30.0
y = 10.0
"##;

    let config = BoardConfig::from_toml(toml_str).unwrap();
    assert_eq!(config.stage.swatch_size, 16.0);
    // Unset keys keep their defaults
    assert_eq!(config.stage.initial_swatches, 3);
    assert_eq!(config.drag.threshold, 3.0);
    assert_eq!(config.drag.overhang, 0.3);
    assert_eq!(config.swatches.len(), 2);
    assert_eq!(config.swatches[0].color, "#ff8000");
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(BoardConfig::from_toml("[stage]\nswatch_size = \"big\"").is_err());
}

#[test]
fn test_out_of_range_values_are_rejected() {
    for toml in [
        "[mixer]\nlarge_step = 2147483647",
        "[mixer]\nsmall_step = 0",
        "[stage]\nswatch_size = -4.0",
        "[drag]\nthreshold = -1.0",
        "[drag]\noverhang = 2.5",
    ] {
        let err = BoardConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config value"), "{toml}: {err}");
    }
    assert!(BoardConfig::from_toml("[mixer]\nlarge_step = 360").is_ok());
}

#[test]
fn test_seed_stage_normalizes_colors() {
    let config = BoardConfig {
        swatches: vec![
            SwatchSeed {
                color: "#ff8000".to_string(),
                x: 4.0,
                y: 8.0,
            },
            SwatchSeed {
                color: "definitely not a color".to_string(),
                x: 0.0,
                y: 0.0,
            },
        ],
        ..BoardConfig::default()
    };
    let mut stage = Stage::new(StageBounds::new(80.0, 60.0));
    let ids = config.seed_stage(&mut stage);

    assert_eq!(ids.len(), 2);
    let first = stage.get(ids[0]).unwrap();
    assert_eq!(first.fill, "rgb(255,128,0)");
    assert_eq!(first.size, 12.0);
    assert_eq!(stage.get(ids[1]).unwrap().fill, "definitely not a color");
    assert_eq!(stage.order(), ids);
}

#[test]
fn test_save_and_reload() {
    let dir = std::env::temp_dir().join(format!("swatchboard-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("board.toml");

    let mut config = BoardConfig::default();
    config.mixer.large_step = 15;
    config.swatches.push(SwatchSeed {
        color: "rgb(1,2,3)".to_string(),
        x: 1.5,
        y: 2.5,
    });
    config.save(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[mixer]"));
    assert!(content.contains("large_step = 15"));
    assert!(content.contains("[[swatches]]"));

    let reloaded = BoardConfig::from_toml(&content).unwrap();
    assert_eq!(reloaded, config);

    std::fs::remove_dir_all(&dir).unwrap();
}
