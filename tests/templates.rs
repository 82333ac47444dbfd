#![forbid(unsafe_code)]
use chrono::NaiveDate;
use shiftboard::{
    export_config_json, load_config_from_file, ClockTime, Department, SelectionMode,
    ShiftDefinition, ShiftGenerator, StaffingConfig, TaskStatus,
};
use tempfile::tempdir;

#[test]
fn save_and_load_config_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staffing.json");
    let config = StaffingConfig::hotel_default();
    export_config_json(&path, &config).unwrap();

    let loaded = load_config_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    let reception = loaded.department(Department::Reception).unwrap();
    assert_eq!(reception.selection, SelectionMode::Rotation);
    assert!(!reception.exclude_repeat_staff);
}

#[test]
fn generate_from_edited_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staffing.json");
    let mut config = StaffingConfig::hotel_default();
    config.departments.retain(|t| t.department == Department::Bar);
    let bar = &mut config.departments[0];
    // service du week-end uniquement
    bar.shifts.push(
        ShiftDefinition::staffed(
            "Brunch",
            ClockTime::from_hm(10, 0).unwrap(),
            ClockTime::from_hm(13, 0).unwrap(),
            1,
        )
        .on_days(&[6, 7]),
    );
    export_config_json(&path, &config).unwrap();
    let config = load_config_from_file(&path).unwrap();

    let friday = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();
    let plans = ShiftGenerator::seeded(&config, 5).generate_range(friday, 3).unwrap();
    let per_day: Vec<_> = plans.iter().map(|p| p.records.len()).collect();
    assert_eq!(per_day, [3, 4, 4]);

    let brunch: Vec<_> = plans
        .iter()
        .flat_map(|p| &p.records)
        .filter(|r| r.start_time == "10:00")
        .collect();
    assert_eq!(brunch.len(), 2);
    assert!(brunch.iter().all(|r| r.status == TaskStatus::Scheduled));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staffing.json");
    std::fs::write(
        &path,
        r#"{"departments": [{
            "department": "reception",
            "resources": ["Front Desk"],
            "staff": ["Sarah Wilson"],
            "shifts": [{"name": "Night", "startTime": "23:00", "endTime": "07:00", "staffCount": 1}]
        }]}"#,
    )
    .unwrap();
    let err = load_config_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("rolloverToNextDay"));

    std::fs::write(&path, "[]").unwrap();
    let err = load_config_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing config"));
}
