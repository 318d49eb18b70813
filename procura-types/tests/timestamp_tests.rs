use procura_types::Timestamp;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_is_millisecond_precise() {
    let ts = Timestamp::now();
    assert_eq!(ts.as_datetime().timestamp_subsec_nanos() % 1_000_000, 0);
}

#[test]
fn from_millis_roundtrip() {
    let ts = Timestamp::from_millis(1_700_000_000_123);
    assert_eq!(ts.as_millis(), 1_700_000_000_123);
}

// ── Formatting ───────────────────────────────────────────────────

#[test]
fn iso8601_has_millis_and_z_suffix() {
    let ts = Timestamp::from_millis(0);
    assert_eq!(ts.to_iso8601(), "1970-01-01T00:00:00.000Z");
    assert_eq!(ts.to_string(), "1970-01-01T00:00:00.000Z");
}

#[test]
fn parse_accepts_offsets() {
    let ts = Timestamp::parse("2026-10-17T11:30:00.250+02:00").unwrap();
    assert_eq!(ts.to_iso8601(), "2026-10-17T09:30:00.250Z");
}

#[test]
fn parse_rejects_garbage() {
    assert!(Timestamp::parse("yesterday").is_err());
}

// ── Ordering & tick ──────────────────────────────────────────────

#[test]
fn ordering_follows_time() {
    let a = Timestamp::from_millis(100);
    let b = Timestamp::from_millis(200);
    assert!(a < b);
}

#[test]
fn tick_never_goes_backwards() {
    let future = Timestamp::from_millis(Timestamp::now().as_millis() + 60_000);
    assert_eq!(future.tick(), future);
}

#[test]
fn tick_from_past_moves_to_now() {
    let past = Timestamp::from_millis(0);
    assert!(past.tick() > past);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serde_uses_iso_string() {
    let ts = Timestamp::from_millis(1_000);
    let json = serde_json::to_string(&ts).unwrap();
    assert_eq!(json, "\"1970-01-01T00:00:01.000Z\"");
    let back: Timestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ts);
}

#[test]
fn deserialize_rejects_non_timestamp() {
    assert!(serde_json::from_str::<Timestamp>("\"not a time\"").is_err());
    assert!(serde_json::from_str::<Timestamp>("12").is_err());
}
