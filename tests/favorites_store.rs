use country_explorer::favorites::{Favorites, FavoritesStore, JsonFileStore, MemoryStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn toggle_adds_then_removes() {
    let mut favs = Favorites::new(MemoryStore::default());
    let set = favs.toggle("FRA").unwrap();
    assert!(set.contains("FRA"));
    assert!(favs.contains("FRA").unwrap());

    let set = favs.toggle("FRA").unwrap();
    assert!(!set.contains("FRA"));
    assert!(!favs.contains("FRA").unwrap());
}

#[test]
fn toggle_leaves_other_codes_alone() {
    let mut favs = Favorites::new(MemoryStore::with_codes(["DEU", "PER"]));
    let set = favs.toggle("JPN").unwrap();
    assert_eq!(set.len(), 3);
    let set = favs.toggle("DEU").unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["JPN", "PER"]);
}

#[test]
fn missing_file_is_an_empty_set() {
    let dir = tempdir().unwrap();
    let favs = Favorites::new(JsonFileStore::new(dir.path().join("none.json")));
    assert!(favs.get().unwrap().is_empty());
}

#[test]
fn file_is_written_wholesale_as_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("favoriteCountries.json");
    let mut favs = Favorites::new(JsonFileStore::new(&path));
    favs.toggle("PER").unwrap();
    favs.toggle("DEU").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let stored: Vec<String> = serde_json::from_str(&text).unwrap();
    assert_eq!(stored, vec!["DEU", "PER"]);

    // A second accessor over the same file sees the same set.
    let other = Favorites::new(JsonFileStore::new(&path));
    assert!(other.contains("PER").unwrap());
}

#[test]
fn duplicates_in_storage_collapse_and_toggle_removes_all() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favs.json");
    fs::write(&path, r#"["PER","PER","DEU"]"#).unwrap();

    let mut favs = Favorites::new(JsonFileStore::new(&path));
    let set = favs.toggle("PER").unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["DEU"]);
    let stored: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored, vec!["DEU"]);
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favs.json");
    fs::write(&path, "{not json").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(store.load().unwrap().is_empty());

    let mut favs = Favorites::new(store);
    let set = favs.toggle("PER").unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["PER"]);
    let stored: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored, vec!["PER"]);
}

#[test]
fn unreadable_path_is_an_error() {
    let dir = tempdir().unwrap();
    // A directory where the file should be.
    let store = JsonFileStore::new(dir.path());
    let err = store.load().unwrap_err();
    assert!(format!("{err:#}").contains("read"));
}

#[test]
fn last_writer_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favs.json");
    let mut a = Favorites::new(JsonFileStore::new(&path));
    let mut b = Favorites::new(JsonFileStore::new(&path));
    a.toggle("PER").unwrap();
    b.toggle("DEU").unwrap();
    // b read PER before writing, so both survive.
    assert_eq!(a.get().unwrap().len(), 2);

    let mut store = JsonFileStore::new(&path);
    store.save(&["ISL".to_string()].into_iter().collect()).unwrap();
    assert_eq!(a.get().unwrap().into_iter().collect::<Vec<_>>(), vec!["ISL"]);
}
