use ontime::parser::{parse_time, TimeOfDay, TimeParseError};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn time(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

#[test_case("14:30", 14, 30; "hour and minute taken as 24 hour")]
#[test_case("2:30pm", 14, 30; "afternoon with minutes")]
#[test_case("2:30PM", 14, 30; "period is case insensitive")]
#[test_case("10:05am", 10, 5; "morning with minutes")]
#[test_case("12am", 0, 0; "midnight")]
#[test_case("12pm", 12, 0; "noon")]
#[test_case("12:45am", 0, 45; "after midnight")]
#[test_case("12:15pm", 12, 15; "after noon")]
#[test_case("8pm", 20, 0; "hour with period")]
#[test_case("9", 9, 0; "hour only")]
#[test_case("12", 0, 0; "hour only twelve is midnight")]
#[test_case("0", 0, 0; "hour only zero")]
#[test_case("23", 23, 0; "hour only late")]
#[test_case("12:00", 12, 0; "noon in 24 hour form")]
#[test_case("00:00", 0, 0; "midnight in 24 hour form")]
#[test_case("7:00", 7, 0; "zero minutes")]
fn test_valid_times(input: &str, hour: u32, minute: u32) {
    assert_eq!(parse_time(input), Ok(time(hour, minute)));
}

#[test_case("abc"; "letters")]
#[test_case(""; "empty")]
#[test_case("1:2:3"; "too many parts")]
#[test_case("123"; "three digit hour")]
#[test_case("1:5pm"; "single digit minute")]
#[test_case("10:00 PM"; "space before period")]
#[test_case(" 9"; "untrimmed")]
#[test_case("8xm"; "unknown period")]
#[test_case("8p"; "one letter period")]
#[test_case("-3"; "negative")]
fn test_unparsable(input: &str) {
    assert_eq!(parse_time(input), Err(TimeParseError::UnparsableFormat { input: input.to_string() }));
}

#[test_case("13pm"; "period hour above twelve")]
#[test_case("13:15am"; "morning hour above twelve")]
#[test_case("0am"; "period hour zero")]
#[test_case("14:75"; "minute above 59")]
#[test_case("24:00"; "hour 24")]
#[test_case("24"; "hour only 24")]
#[test_case("25:61"; "both fields out of range")]
#[test_case("25:61pm"; "both fields out of range with period")]
#[test_case("11:60pm"; "minute 60 with period")]
fn test_out_of_range(input: &str) {
    assert!(
        matches!(parse_time(input), Err(TimeParseError::OutOfRange { .. })),
        "expected out of range for {}",
        input
    );
}

#[test]
fn test_out_of_range_reports_fields() {
    assert_eq!(parse_time("14:75"), Err(TimeParseError::OutOfRange { hour: 14, minute: 75 }));
    assert_eq!(parse_time("13pm"), Err(TimeParseError::OutOfRange { hour: 13, minute: 0 }));
}

#[test]
fn test_twelve_hour_form_reparses_to_same_time() {
    for hour in 0..24 {
        for minute in [0, 1, 30, 59] {
            let original = time(hour, minute);
            let reparsed = parse_time(&original.to_twelve_hour()).unwrap();
            assert_eq!(reparsed, original, "via {}", original.to_twelve_hour());
        }
    }
}

#[test]
fn test_from_str() {
    let parsed: TimeOfDay = "6:15pm".parse().unwrap();
    assert_eq!(parsed, time(18, 15));
    assert!("noon".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_time("abc").unwrap_err().to_string(),
        "'abc' is not a recognized time format"
    );
    assert_eq!(parse_time("14:75").unwrap_err().to_string(), "time 14:75 is out of range");
}
