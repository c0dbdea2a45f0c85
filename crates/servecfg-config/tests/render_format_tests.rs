//! Canonical rendering stability.
//!
//! The golden comparison in the harness truncates candidates against a
//! prefix of the rendered configuration, so the field order of the rendered
//! form is observable behavior: it must follow declaration order and never
//! be re-sorted.

use std::collections::BTreeMap;

use servecfg_config::{DataType, ModelConfig, ModelIo, VersionPolicy};

fn full_config() -> ModelConfig {
    ModelConfig {
        name: "addsub".to_string(),
        platform: "tensorflow_savedmodel".to_string(),
        max_batch_size: 4,
        version_policy: VersionPolicy::Specific { versions: vec![1, 3] },
        default_model_filename: "model.savedmodel".to_string(),
        input: vec![
            ModelIo { name: "INPUT0".to_string(), data_type: DataType::Fp32, dims: vec![-1, 16] },
            ModelIo { name: "INPUT1".to_string(), data_type: DataType::Int64, dims: vec![16] },
        ],
        output: vec![ModelIo {
            name: "OUTPUT0".to_string(),
            data_type: DataType::Fp32,
            dims: vec![16],
        }],
        parameters: BTreeMap::from([
            ("b_param".to_string(), "2".to_string()),
            ("a_param".to_string(), "1".to_string()),
        ]),
    }
}

#[test]
fn fields_render_in_declaration_order() {
    let rendered = full_config().render().unwrap();
    let positions: Vec<usize> = [
        "name:",
        "platform:",
        "max_batch_size:",
        "version_policy:",
        "default_model_filename:",
        "input:",
        "output:",
        "parameters:",
    ]
    .iter()
    .map(|field| rendered.find(field).unwrap_or_else(|| panic!("missing field {field}")))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "rendered field order must follow declaration order");
}

#[test]
fn parameters_render_in_key_order() {
    let rendered = full_config().render().unwrap();
    assert!(rendered.find("a_param").unwrap() < rendered.find("b_param").unwrap());
}

#[test]
fn render_round_trips_through_parse() {
    let config = full_config();
    let rendered = config.render().unwrap();
    let parsed: ModelConfig = serde_yaml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn rerender_is_stable() {
    let config = full_config();
    let first = config.render().unwrap();
    let reparsed: ModelConfig = serde_yaml::from_str(&first).unwrap();
    assert_eq!(reparsed.render().unwrap(), first);
}
