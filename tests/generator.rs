#![forbid(unsafe_code)]
use chrono::NaiveDate;
use shiftboard::{
    template::{DepartmentTemplate, SelectionMode, ShiftDefinition, StaffingConfig},
    ClockTime, Department, LabelPolicy, ShiftGenerator, StaffId, StaffLedger, TaskRecord,
    TaskStatus,
};
use std::collections::HashMap;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn hm(h: u32, m: u32) -> ClockTime {
    ClockTime::from_hm(h, m).unwrap()
}

fn per_staff(records: &[TaskRecord]) -> HashMap<StaffId, u32> {
    let mut counts = HashMap::new();
    for r in records {
        for s in &r.assigned_staff {
            *counts.entry(s.clone()).or_insert(0) += 1;
        }
    }
    counts
}

fn config_with(template: DepartmentTemplate) -> StaffingConfig {
    StaffingConfig {
        max_shifts_per_day: 2,
        labels: LabelPolicy::default(),
        departments: vec![template],
    }
}

#[test]
fn reception_rotation_is_reproducible() {
    let cfg = StaffingConfig::hotel_default();
    let day = d(2025, 1, 1);

    let mut first = ShiftGenerator::seeded(&cfg, 1);
    let mut second = ShiftGenerator::seeded(&cfg, 999);
    let a = first
        .generate(Department::Reception, day, &mut StaffLedger::new(day))
        .unwrap();
    let b = second
        .generate(Department::Reception, day, &mut StaffLedger::new(day))
        .unwrap();

    let staff = |rs: &[TaskRecord]| rs.iter().map(|r| r.assigned_staff.clone()).collect::<Vec<_>>();
    assert_eq!(staff(&a), staff(&b));

    let titles: Vec<_> = a.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Sarah Wilson & Mark Johnson",
            "Mark Johnson & Emily Davis",
            "Emily Davis & James Brown",
            "James Brown & Lisa Anderson",
        ]
    );
    assert!(a.iter().all(|r| r.status == TaskStatus::Scheduled));
    assert!(per_staff(&a).values().all(|&n| n <= 2));
}

#[test]
fn random_departments_respect_daily_cap() {
    let cfg = StaffingConfig::hotel_default();
    let day = d(2025, 3, 14);
    for seed in 0..25 {
        let mut generator = ShiftGenerator::seeded(&cfg, seed);
        for dep in [Department::Spa, Department::Restaurant, Department::Bar, Department::RoomServices] {
            let template = cfg.department(dep).unwrap();
            let cap = cfg.cap_for(template);
            let records = generator
                .generate(dep, day, &mut StaffLedger::new(day))
                .unwrap();
            let counts = per_staff(&records);
            assert!(
                counts.values().all(|&n| n <= cap),
                "{dep} seed {seed}: {counts:?}"
            );
            // jamais deux fois la même personne dans un shift
            for r in &records {
                let mut s = r.assigned_staff.clone();
                s.sort();
                s.dedup();
                assert_eq!(s.len(), r.assigned_staff.len());
            }
        }
    }
}

#[test]
fn overnight_shift_is_filed_on_the_next_day() {
    let template = DepartmentTemplate {
        department: Department::Reception,
        resources: vec!["Front Desk".into()],
        shifts: vec![
            ShiftDefinition::staffed("Early", hm(7, 0), hm(15, 0), 1),
            ShiftDefinition::staffed("Late", hm(15, 0), hm(23, 0), 1),
            ShiftDefinition::staffed("Night", hm(23, 0), hm(7, 0), 1).with_rollover(),
        ],
        staff: ["Sarah Wilson", "Mark Johnson", "Emily Davis"]
            .iter()
            .map(StaffId::new)
            .collect(),
        selection: SelectionMode::Rotation,
        staffed_status: TaskStatus::Scheduled,
        exclude_repeat_staff: true,
        max_shifts_per_day: None,
        labels: None,
    };
    let cfg = config_with(template);
    let day = d(2025, 12, 31);
    let mut generator = ShiftGenerator::seeded(&cfg, 0);
    let records = generator
        .generate(Department::Reception, day, &mut StaffLedger::new(day))
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, day);
    assert_eq!(records[1].date, day);
    let night = &records[2];
    assert_eq!(night.date, d(2026, 1, 1));
    assert_eq!(night.start_time, "23:00");
    assert_eq!(night.end_time, "07:00");
    assert_eq!(night.status, TaskStatus::Scheduled);
}

#[test]
fn capped_pool_yields_understaffed_shift() {
    let template = DepartmentTemplate {
        department: Department::Spa,
        resources: vec!["Rest Room No: 01".into()],
        shifts: vec![ShiftDefinition::staffed("Morning", hm(8, 0), hm(12, 0), 2)],
        staff: ["Ana Reyes", "Juan Cruz", "Sofia Mendoza"]
            .iter()
            .map(StaffId::new)
            .collect(),
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Booked,
        exclude_repeat_staff: true,
        max_shifts_per_day: None,
        labels: None,
    };
    let cfg = config_with(template);
    let day = d(2025, 7, 4);

    let mut ledger = StaffLedger::new(day);
    let busy = [StaffId::new("Ana Reyes"), StaffId::new("Juan Cruz")];
    ledger.record(busy.iter().chain(busy.iter()));

    let mut generator = ShiftGenerator::seeded(&cfg, 5);
    let records = generator.generate(Department::Spa, day, &mut ledger).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].assigned_staff, vec![StaffId::new("Sofia Mendoza")]);
    assert_eq!(records[0].status, TaskStatus::Understaffed);
    assert_eq!(records[0].title, "Sofia Mendoza");
    assert_eq!(ledger.count(&StaffId::new("Sofia Mendoza")), 1);
}

#[test]
fn empty_selection_uses_placeholder_title() {
    let template = DepartmentTemplate {
        department: Department::Bar,
        resources: vec!["Drink Corner".into()],
        shifts: vec![
            ShiftDefinition::staffed("Afternoon", hm(14, 0), hm(18, 0), 1),
            ShiftDefinition::staffed("Evening", hm(18, 0), hm(23, 0), 1),
        ],
        staff: vec![StaffId::new("Kevin Macel")],
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Scheduled,
        exclude_repeat_staff: true,
        max_shifts_per_day: None,
        labels: None,
    };
    let cfg = config_with(template);
    let day = d(2025, 7, 4);
    let records = ShiftGenerator::seeded(&cfg, 2)
        .generate(Department::Bar, day, &mut StaffLedger::new(day))
        .unwrap();
    assert_eq!(records[0].title, "Kevin Macel");
    assert_eq!(records[1].title, "Available");
    assert!(records[1].assigned_staff.is_empty());
    assert_eq!(records[1].status, TaskStatus::Understaffed);
}

#[test]
fn spa_day_has_closed_blocks_and_fresh_afternoon_staff() {
    let cfg = StaffingConfig::hotel_default();
    let day = d(2025, 5, 20);
    let records = ShiftGenerator::seeded(&cfg, 11)
        .generate(Department::Spa, day, &mut StaffLedger::new(day))
        .unwrap();
    assert_eq!(records.len(), 16);

    for room in records.chunks(4) {
        let [closed, morning, lunch, afternoon] = room else {
            panic!("expected four blocks per room");
        };
        assert_eq!(closed.status, TaskStatus::Closed);
        assert_eq!(closed.title, "Closed");
        assert!(closed.assigned_staff.is_empty());
        assert_eq!((closed.start_time.as_str(), closed.end_time.as_str()), ("18:00", "07:59"));
        assert_eq!(lunch.status, TaskStatus::Closed);
        assert!(morning
            .assigned_staff
            .iter()
            .all(|s| !afternoon.assigned_staff.contains(s)));
        // la fermeture de nuit est classée au matin où elle se termine
        assert_eq!(closed.date, day.succ_opt().unwrap());
        assert!([morning, lunch, afternoon].iter().all(|r| r.date == day));
    }
}

#[test]
fn ledger_is_reset_between_days() {
    let cfg = StaffingConfig::hotel_default();
    let start = d(2025, 2, 27);
    let plans = ShiftGenerator::seeded(&cfg, 77).generate_range(start, 3).unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[2].date, d(2025, 3, 1));

    for plan in &plans {
        assert!(plan.is_complete());
        let spa: Vec<_> = plan
            .records
            .iter()
            .filter(|r| r.department == Department::Spa)
            .cloned()
            .collect();
        assert!(per_staff(&spa).values().all(|&n| n <= 2));
        // deuxième et troisième jour : le plafond de la veille ne bloque rien
        assert!(spa.iter().all(|r| r.status != TaskStatus::Understaffed));
    }

    let bar_late: Vec<_> = plans[0]
        .records
        .iter()
        .filter(|r| r.department == Department::Bar && r.start_time == "23:00")
        .collect();
    assert_eq!(bar_late.len(), 1);
    assert_eq!(bar_late[0].date, d(2025, 2, 28));
}
