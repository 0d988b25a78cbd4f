use chrono::Utc;
use roster::{
    export::{self, DEFAULT_BASENAME, ExportFormat},
    types::Gender,
    user::{UserDraft, UserRecord},
    validate,
};

fn user(id: u64, name: &str, email: &str, age: u32, gender: Gender) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        age,
        gender,
        created_at: None,
        updated_at: None,
        is_active: Some(true),
    }
}

fn sample() -> Vec<UserRecord> {
    vec![
        user(1, "Ann", "ann@x.com", 30, Gender::Female),
        user(2, "Bob", "bob@x.com", 24, Gender::Male),
    ]
}

#[test]
fn csv_artifact_has_header_and_one_row_per_record() {
    let artifact = export::render(&sample(), ExportFormat::Csv).expect("render");
    let text = String::from_utf8(artifact.bytes).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,name,email,age,gender"));
    assert!(lines[1].contains("Ann"));
    assert!(lines[2].contains("bob@x.com"));
    assert_eq!(artifact.content_type, "text/csv");
}

#[test]
fn spreadsheet_artifact_is_tab_delimited() {
    let artifact = export::render(&sample(), ExportFormat::Spreadsheet).expect("render");
    let text = String::from_utf8(artifact.bytes).expect("utf8");
    assert!(text.lines().next().expect("header").contains("id\tname\temail"));
    assert!(artifact.filename.ends_with(".xls"));
    assert_eq!(artifact.content_type, "application/vnd.ms-excel");
}

#[test]
fn json_artifact_parses_back() {
    let users = sample();
    let artifact = export::render(&users, ExportFormat::Json).expect("render");
    let parsed: Vec<UserRecord> = serde_json::from_slice(&artifact.bytes).expect("parse");
    assert_eq!(parsed, users);
    assert!(artifact.filename.ends_with(".json"));
}

#[test]
fn filename_embeds_basename_and_current_date() {
    let artifact = export::render(&[], ExportFormat::Csv).expect("render");
    let today = Utc::now().format("%Y-%m-%d").to_string();
    assert!(artifact.filename.starts_with(DEFAULT_BASENAME));
    assert!(artifact.filename.contains(&today));
}

#[test]
fn empty_collection_exports_header_only() {
    let artifact = export::render(&[], ExportFormat::Csv).expect("render");
    let text = String::from_utf8(artifact.bytes).expect("utf8");
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn valid_draft_passes_with_no_messages() {
    let report = validate::validate_draft(&UserDraft {
        name: "Ann Smith".to_string(),
        email: "ann@x.com".to_string(),
        age: 30,
        gender: "female".to_string(),
    });
    assert!(report.is_valid());
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn name_checks_cover_required_length_and_pattern() {
    assert!(!validate::validate_name("").is_valid());
    assert!(!validate::validate_name("A").is_valid());
    assert!(!validate::validate_name(&"a".repeat(51)).is_valid());
    assert!(!validate::validate_name("Ann42").is_valid());
    assert!(validate::validate_name("Mary-Jane O'Neil").is_valid());
}

#[test]
fn email_checks_reject_malformed_addresses() {
    assert!(!validate::validate_email("").is_valid());
    assert!(!validate::validate_email("not-an-email").is_valid());
    assert!(!validate::validate_email("a@b").is_valid());
    assert!(validate::validate_email("Ann.Smith@example.co.uk").is_valid());
}

#[test]
fn age_checks_enforce_bounds() {
    assert!(!validate::validate_age(0).is_valid());
    assert!(!validate::validate_age(151).is_valid());
    assert!(validate::validate_age(1).is_valid());
    assert!(validate::validate_age(150).is_valid());
}

#[test]
fn gender_check_is_set_membership() {
    assert!(validate::validate_gender("male").is_valid());
    assert!(validate::validate_gender("Female").is_valid());
    assert!(!validate::validate_gender("").is_valid());
    assert!(!validate::validate_gender("robot").is_valid());
}

#[test]
fn draft_validation_collects_warnings() {
    let report = validate::validate_draft(&UserDraft {
        name: "Kid Example".to_string(),
        email: "kid+test@x.com".to_string(),
        age: 16,
        gender: "other".to_string(),
    });
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 2);
}
