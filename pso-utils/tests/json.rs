use pso_utils::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Run {
    route: Vec<usize>,
    distance: f64,
    history: Vec<(usize, f64)>,
}

#[test]
fn test_jsonify_sorts_keys_at_every_level() {
    let value = json!({
        "zeta": 1,
        "alpha": { "y": true, "b": [ { "d": 1, "c": 2 } ] }
    });
    assert_eq!(
        jsonify(&value).unwrap(),
        r#"{"alpha":{"b":[{"c":2,"d":1}],"y":true},"zeta":1}"#
    );
}

#[test]
fn test_jsonify_struct() {
    let run = Run {
        route: vec![0, 2, 1],
        distance: 4.0,
        history: vec![(0, 5.5), (10, 4.0)],
    };
    let text = jsonify(&run).unwrap();
    assert_eq!(
        text,
        r#"{"distance":4.0,"history":[[0,5.5],[10,4.0]],"route":[0,2,1]}"#
    );
    assert_eq!(dejsonify::<Run>(&text).unwrap(), run);
}

#[test]
fn test_compress_obj() {
    let run = Run {
        route: (0..100).collect(),
        distance: 1234.5,
        history: (0..50).map(|i| (i * 10, 2000.0 - i as f64)).collect(),
    };
    let compressed = compress_obj(&run).unwrap();
    assert!(compressed.len() < jsonify(&run).unwrap().len());
    assert_eq!(decompress_obj::<Run>(&compressed).unwrap(), run);
}

#[test]
fn test_decompress_garbage_fails() {
    assert!(decompress_obj::<Run>(b"not zlib").is_err());
}

#[test]
fn test_read_json_arg() {
    assert_eq!(read_json_arg(r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);
    assert!(read_json_arg("/definitely/not/here.json").is_err());

    let path = std::env::temp_dir().join("pso_utils_read_json_arg.json");
    std::fs::write(&path, r#"{"swarm_size":4}"#).unwrap();
    assert_eq!(
        read_json_arg(path.to_str().unwrap()).unwrap(),
        r#"{"swarm_size":4}"#
    );
    std::fs::remove_file(&path).unwrap();
}
