use pn_project::schema::*;
use pn_project::{ProjectError, load_json, load_yaml, save_json, save_yaml, validate_map};

fn camp_map() -> StationMap {
    StationMap {
        version: LATEST_VERSION,
        name: "Camp".to_string(),
        stations: vec![
            StationDef::new("base", 0.0, 0.0),
            StationDef::new("depot", -1.25, 7.5),
        ],
        links: vec![LinkDef::new("base", "depot")],
    }
}

#[test]
fn roundtrip_yaml() {
    let map = camp_map();
    validate_map(&map).unwrap();

    let path = std::env::temp_dir().join("pn_project_roundtrip.yaml");
    save_yaml(&path, &map).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(map, loaded);
}

#[test]
fn roundtrip_json() {
    let map = camp_map();
    let path = std::env::temp_dir().join("pn_project_roundtrip.json");
    save_json(&path, &map).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(map, loaded);
}

#[test]
fn links_are_written_as_pairs() {
    let yaml = serde_yaml::to_string(&camp_map()).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let link = &value["links"][0];
    assert_eq!(link[0].as_str(), Some("base"));
    assert_eq!(link[1].as_str(), Some("depot"));
}

#[test]
fn save_refuses_invalid_map() {
    let mut map = camp_map();
    map.links.push(LinkDef::new("base", "ghost"));
    let path = std::env::temp_dir().join("pn_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &map),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn missing_sections_default_to_empty() {
    let map: StationMap = serde_yaml::from_str("version: 1\nname: Empty\n").unwrap();
    validate_map(&map).unwrap();
    assert!(map.stations.is_empty());
    assert!(map.links.is_empty());
}
