use super::CreateSessionRequest;
use super::StudySession;

fn create_request() -> CreateSessionRequest {
    return CreateSessionRequest {
        title: "Midterm cram".to_string(),
        course_code: "CS101".to_string(),
        description: "Midterm review".to_string(),
        date: "2024-03-14".to_string(),
        time: "18:00".to_string(),
        location: "Library room 2".to_string(),
        meeting_type: "on_campus".to_string(),
        max_capacity: 5,
    };
}

#[test]
fn it_labels_capacity_and_meeting_type() {
    let session = StudySession {
        id: "session-1".to_string(),
        title: "Midterm cram".to_string(),
        course_code: "CS101".to_string(),
        description: "Midterm review".to_string(),
        date: "2024-03-14".to_string(),
        time: "18:00".to_string(),
        location: "Library room 2".to_string(),
        meeting_type: "on_campus".to_string(),
        max_capacity: 5,
        current_capacity: 3,
        creator_id: "user-1".to_string(),
        creator_name: "Jane Doe".to_string(),
        is_full: false,
    };

    assert_eq!(session.capacity_label(), "3/5");
    assert_eq!(session.meeting_type_label(), "ON CAMPUS");
}

#[test]
fn it_accepts_a_valid_create_request() {
    assert!(create_request().validate().is_ok());
}

#[test]
fn it_rejects_a_create_request_with_a_blank_title() {
    let mut req = create_request();
    req.title = "  ".to_string();
    assert_eq!(req.validate().unwrap_err().to_string(), "Title is required");
}

#[test]
fn it_rejects_an_unknown_meeting_type() {
    let mut req = create_request();
    req.meeting_type = "carrier_pigeon".to_string();
    assert_eq!(
        req.validate().unwrap_err().to_string(),
        "Meeting type must be one of on_campus, off_campus, online"
    );
}

#[test]
fn it_rejects_a_non_positive_capacity() {
    let mut req = create_request();
    req.max_capacity = 0;
    assert_eq!(
        req.validate().unwrap_err().to_string(),
        "Max capacity must be greater than zero"
    );
}
