use chrono::{TimeZone, Utc};
use cloudpet_core::db::{open_db, open_db_in_memory};
use cloudpet_core::persistence::decode_snapshot;
use cloudpet_core::{
    list_types, seed_collection, Accessory, Customizations, EyeStyle, LoadOrigin, MouthStyle,
    Pattern, Pet, PetFactory, PetId, PetValidationError, SeedReason, SlotRepository,
    SnapshotError, SnapshotStore, SqliteSlotRepository, DEFAULT_SLOT_KEY,
};
use proptest::prelude::*;

fn sample_pets() -> Vec<cloudpet_core::Pet> {
    let mut factory = PetFactory::new();
    let mut first = factory.create_pet("Bolt", "compute").unwrap();
    first.created_at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    first.level = 3;
    first.experience = 45;
    first.happiness = 80;
    let second = factory.create_pet("Vault", "storage").unwrap();
    vec![first, second]
}

#[test]
fn absent_slot_loads_seed_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());

    let (pets, origin) = store.load_with_origin();

    assert_eq!(origin, LoadOrigin::Seeded(SeedReason::Absent));
    assert_eq!(pets, seed_collection());
    let names: Vec<_> = pets.iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(names, ["Cloudy", "Stormy", "Droplet"]);
    let types: Vec<_> = pets.iter().map(|pet| pet.type_id.as_str()).collect();
    assert_eq!(types, ["compute", "storage", "database"]);
}

#[test]
fn corrupted_slot_falls_back_to_seed_without_failing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.write_slot(DEFAULT_SLOT_KEY, "{not json").unwrap();
    let store = SnapshotStore::new(repo);

    let (pets, origin) = store.load_with_origin();

    assert_eq!(origin, LoadOrigin::Seeded(SeedReason::Corrupt));
    assert_eq!(pets, seed_collection());
}

#[test]
fn structurally_wrong_records_count_as_corrupt() {
    let cases = [
        r#"{"pets": []}"#,
        r#"[{"id": "11111111-2222-4333-8444-555555555555"}]"#,
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"X","typeId":"compute","level":1,"happiness":100,"experience":0,"createdAt":"yesterday","customizations":{"eyeStyle":"happy","mouthStyle":"smile","accessory":"none","pattern":"none"}}]"#,
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"X","typeId":"compute","level":1,"happiness":100,"experience":0,"createdAt":"2025-01-01T00:00:00Z","customizations":{"eyeStyle":"laser","mouthStyle":"smile","accessory":"none","pattern":"none"}}]"#,
    ];

    for raw in cases {
        let err = decode_snapshot(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)), "case {raw}: {err}");
    }
}

#[test]
fn invariant_violations_count_as_corrupt() {
    let mut pets = sample_pets();
    pets[1].experience = 150;
    let raw = serde_json::to_string(&pets).unwrap();
    let err = decode_snapshot(&raw).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidRecord { index: 1, .. }));

    let mut pets = sample_pets();
    pets[0].type_id = "mainframe".to_string();
    let raw = serde_json::to_string(&pets).unwrap();
    assert!(matches!(
        decode_snapshot(&raw).unwrap_err(),
        SnapshotError::InvalidRecord { index: 0, .. }
    ));

    let mut pets = sample_pets();
    pets[1].id = pets[0].id.clone();
    let raw = serde_json::to_string(&pets).unwrap();
    assert!(matches!(
        decode_snapshot(&raw).unwrap_err(),
        SnapshotError::DuplicateId(id) if id == pets[0].id
    ));

    let mut pets = sample_pets();
    pets[0].id = PetId::from("  ");
    let raw = serde_json::to_string(&pets).unwrap();
    assert!(matches!(
        decode_snapshot(&raw).unwrap_err(),
        SnapshotError::InvalidRecord {
            index: 0,
            source: PetValidationError::EmptyId
        }
    ));
}

#[test]
fn records_with_opaque_token_ids_load_as_stored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.write_slot(
        DEFAULT_SLOT_KEY,
        r#"[{"id":"k3j4h5g6f7d8s","name":"Nimbus","typeId":"compute","level":2,"happiness":90,"experience":35,"createdAt":"2024-03-10T08:00:00.000Z","customizations":{"eyeStyle":"wink","mouthStyle":"smirk","accessory":"hat","pattern":"stars"}}]"#,
    )
    .unwrap();
    let store = SnapshotStore::new(repo);

    let (pets, origin) = store.load_with_origin();

    assert_eq!(origin, LoadOrigin::Stored);
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].id.as_str(), "k3j4h5g6f7d8s");
    assert_eq!(pets[0].name, "Nimbus");

    store.save(&pets).unwrap();
    assert_eq!(store.load_with_origin(), (pets, LoadOrigin::Stored));
}

#[test]
fn save_then_load_roundtrips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let pets = sample_pets();

    store.save(&pets).unwrap();
    let (loaded, origin) = store.load_with_origin();

    assert_eq!(origin, LoadOrigin::Stored);
    assert_eq!(loaded, pets);
    assert_eq!(loaded[0].created_at.timestamp_subsec_nanos(), 123_456_789);
}

#[test]
fn saving_twice_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let pets = sample_pets();

    store.save(&pets).unwrap();
    let first = repo.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap();
    store.save(&pets).unwrap();
    let second = repo.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(store.load(), pets);
}

#[test]
fn empty_collection_roundtrips_as_empty_not_seed() {
    let conn = open_db_in_memory().unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());

    store.save(&[]).unwrap();
    let (loaded, origin) = store.load_with_origin();

    assert_eq!(origin, LoadOrigin::Stored);
    assert!(loaded.is_empty());
}

#[test]
fn slot_uses_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let pets = sample_pets();
    store.save(&pets).unwrap();

    let raw = repo.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &json[0];

    assert_eq!(record["id"], pets[0].id.to_string());
    assert_eq!(record["name"], "Bolt");
    assert_eq!(record["typeId"], "compute");
    assert_eq!(record["level"], 3);
    assert_eq!(record["happiness"], 80);
    assert_eq!(record["experience"], 45);
    assert_eq!(record["createdAt"], "2023-11-14T22:13:20.123456789Z");
    assert!(record["customizations"]["eyeStyle"].is_string());
    assert!(record["customizations"]["mouthStyle"].is_string());
    assert!(record["customizations"]["accessory"].is_string());
    assert!(record["customizations"]["pattern"].is_string());
}

#[test]
fn null_cosmetics_and_millisecond_timestamps_are_accepted() {
    let raw = r#"[{
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Legacy",
        "typeId": "network",
        "level": 2,
        "happiness": 70,
        "experience": 30,
        "createdAt": "2024-05-01T12:30:00.250Z",
        "customizations": {
            "eyeStyle": "round",
            "mouthStyle": "open",
            "accessory": null,
            "pattern": null
        }
    }]"#;

    let pets = decode_snapshot(raw).unwrap();

    assert_eq!(pets[0].customizations.accessory, Accessory::None);
    assert_eq!(pets[0].customizations.pattern, Pattern::None);
    assert_eq!(pets[0].created_at.timestamp_subsec_millis(), 250);
}

#[test]
fn slots_with_different_keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let primary = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let secondary =
        SnapshotStore::with_slot_key(SqliteSlotRepository::try_new(&conn).unwrap(), "altPets");
    assert_eq!(secondary.slot_key(), "altPets");

    primary.save(&sample_pets()).unwrap();

    let (_, origin) = secondary.load_with_origin();
    assert_eq!(origin, LoadOrigin::Seeded(SeedReason::Absent));
}

#[test]
fn clear_returns_to_seed_on_next_load() {
    let conn = open_db_in_memory().unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    store.save(&sample_pets()).unwrap();

    assert!(store.clear().unwrap());
    assert!(!store.clear().unwrap());
    assert_eq!(store.load(), seed_collection());
}

#[test]
fn collection_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloudpet.db");
    let pets = sample_pets();

    {
        let conn = open_db(&path).unwrap();
        let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
        store.save(&pets).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    assert_eq!(store.load_with_origin(), (pets, LoadOrigin::Stored));
}

fn arb_pet(index: usize) -> impl Strategy<Value = Pet> {
    (
        0..list_types().len(),
        1u32..=50,
        0u8..=100,
        0u8..=100,
        0i64..4_000_000_000,
        0u32..1_000_000_000,
        (0..4usize, 0..4usize, 0..4usize, 0..4usize),
    )
        .prop_map(
            move |(type_index, level, happiness, experience, secs, nanos, traits)| Pet {
                id: PetId::from(format!("pet-{index}")),
                name: format!("Pet {index}"),
                type_id: list_types()[type_index].id.to_string(),
                level,
                happiness,
                experience,
                created_at: Utc.timestamp_opt(secs, nanos).unwrap(),
                customizations: Customizations {
                    eye_style: EyeStyle::ALL[traits.0],
                    mouth_style: MouthStyle::ALL[traits.1],
                    accessory: Accessory::ALL[traits.2],
                    pattern: Pattern::ALL[traits.3],
                },
            },
        )
}

fn arb_collection() -> impl Strategy<Value = Vec<Pet>> {
    (0usize..8).prop_flat_map(|len| (0..len).map(arb_pet).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn load_returns_exactly_what_was_saved(pets in arb_collection()) {
        let conn = open_db_in_memory().unwrap();
        let store = SnapshotStore::new(SqliteSlotRepository::try_new(&conn).unwrap());

        store.save(&pets).unwrap();

        prop_assert_eq!(store.load_with_origin(), (pets, LoadOrigin::Stored));
    }
}
