use super::*;

fn alpha() -> TeamRef {
    TeamRef::new("ABC123", "Team Alpha")
}

#[test]
fn encode_segment_keeps_unreserved_characters() {
    assert_eq!(encode_segment("Team-1_a.b~"), "Team-1_a.b~");
}

#[test]
fn encode_segment_escapes_spaces_and_reserved_bytes() {
    assert_eq!(encode_segment("Team Alpha"), "Team%20Alpha");
    assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
    assert_eq!(encode_segment("é"), "%C3%A9");
}

#[test]
fn board_endpoint_formats_expected_path() {
    assert_eq!(board_endpoint(API_BASE, &alpha()), "/api/rooms/ABC123/teams/Team%20Alpha/board");
}

#[test]
fn energy_endpoint_formats_expected_path() {
    assert_eq!(energy_endpoint(API_BASE, &alpha()), "/api/rooms/ABC123/teams/Team%20Alpha/energy");
}

#[test]
fn room_endpoint_formats_expected_path() {
    assert_eq!(room_endpoint("http://localhost:3001/api", "ABC123"), "http://localhost:3001/api/rooms/ABC123");
}

#[test]
fn http_store_trims_trailing_slash() {
    assert_eq!(HttpStore::new("http://host/api/").base(), "http://host/api");
    assert_eq!(HttpStore::default().base(), API_BASE);
}

#[test]
fn status_404_maps_to_not_found() {
    assert!(matches!(status_error(404, &alpha()), StoreError::NotFound(name) if name == "Team Alpha"));
    assert!(matches!(status_error(500, &alpha()), StoreError::Status { status: 500 }));
}
