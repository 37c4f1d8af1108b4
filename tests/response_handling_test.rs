use reqwest::StatusCode;
use reserves_sync::canvas::dto::{CanvasUser, parse_course, read_user};
use reserves_sync::error::AppError;
use reserves_sync::leganto::dto::{CourseSearchResponse, read_search};
use serde_json::json;

fn search(body: serde_json::Value) -> CourseSearchResponse {
    serde_json::from_value(body).expect("valid search body")
}

#[test]
fn test_zero_record_count_is_not_found() {
    let result = search(json!({ "total_record_count": 0 })).into_record("MOD101_A");
    assert!(matches!(result, Err(AppError::NotFound(ref code)) if code == "MOD101_A"));

    let result = read_search(
        "MOD101_A",
        StatusCode::OK,
        &json!({ "total_record_count": 0, "course": [] }).to_string(),
    );
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn test_matching_record_is_returned() {
    let record = search(json!({
        "total_record_count": 1,
        "course": [{ "id": "999", "code": "MOD101_A", "name": "Intro" }]
    }))
    .into_record("MOD101_A")
    .unwrap();
    assert_eq!(record.id, "999");
}

#[test]
fn test_nonzero_count_without_records_is_malformed() {
    let result = search(json!({ "total_record_count": 2 })).into_record("MOD101_A");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));

    // A record for a different code is not an exact match.
    let result = search(json!({
        "total_record_count": 1,
        "course": [{ "id": "5", "code": "MOD101_B" }]
    }))
    .into_record("MOD101_A");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[test]
fn test_search_errors_are_not_not_found() {
    let result = read_search("MOD101_A", StatusCode::UNAUTHORIZED, "bad api key");
    assert!(matches!(
        result,
        Err(AppError::Transport { status, ref body }) if status == StatusCode::UNAUTHORIZED && body == "bad api key"
    ));

    let result = read_search("MOD101_A", StatusCode::OK, "<html>maintenance</html>");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));

    let result = read_search("MOD101_A", StatusCode::OK, r#"{"course": []}"#);
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[test]
fn test_user_with_sis_id_resolves() {
    let body = json!({ "id": 7, "name": "A Teacher", "sis_user_id": "staff42" }).to_string();
    assert_eq!(read_user(7, StatusCode::OK, &body).unwrap(), "staff42");
}

#[test]
fn test_user_without_usable_sis_id_is_missing() {
    for body in [
        json!({ "id": 7, "sis_user_id": null }),
        json!({ "id": 7, "sis_user_id": "  " }),
        json!({ "id": 7 }),
    ] {
        let user: CanvasUser = serde_json::from_value(body.clone()).unwrap();
        assert!(matches!(user.sis_id(), Err(AppError::MissingIdentity(7))), "{}", body);
        assert!(read_user(7, StatusCode::OK, &body.to_string()).ok().is_none());
    }
}

#[test]
fn test_failed_user_lookup_is_absent() {
    let result = read_user(7, StatusCode::NOT_FOUND, r#"{"errors":[{"message":"not found"}]}"#);
    assert!(matches!(result, Err(AppError::Transport { status, .. }) if status == StatusCode::NOT_FOUND));
    assert!(result.ok().is_none());

    let result = read_user(7, StatusCode::OK, "not json");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[test]
fn test_unreadable_course_keeps_its_code() {
    let rejected = parse_course(json!({ "id": 1, "sis_course_id": "MOD101_A", "total_students": "many" }))
        .unwrap_err();
    assert_eq!(rejected.code, "MOD101_A");
    assert!(matches!(rejected.error, AppError::MalformedResponse(_)));

    let rejected = parse_course(json!({ "id": 12, "teachers": "none" })).unwrap_err();
    assert_eq!(rejected.code, "canvas:12");

    let rejected = parse_course(json!({ "name": "no id" })).unwrap_err();
    assert_eq!(rejected.code, "canvas:unknown");
}

#[test]
fn test_null_course_fields_read_as_defaults() {
    let course = parse_course(json!({
        "id": 1,
        "sis_course_id": "MOD101_A",
        "name": null,
        "total_students": null,
        "account": { "name": null },
        "term": { "name": null, "start_at": null, "end_at": null },
        "teachers": null
    }))
    .unwrap();

    assert_eq!(course.total_students, 0);
    assert_eq!(course.name, "");
    assert_eq!(course.department(), "");
    assert_eq!(course.term.unwrap().name, "");
    assert!(course.teachers.is_empty());
}
